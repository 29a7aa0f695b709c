//! Markdown → ratatui `Text` renderer for dialog and snippet content.
//!
//! The tour's companion lines use `*emphasis*` for keyword callouts and the
//! protocol trainers carry fenced code snippets, so this wrapper around
//! `pulldown_cmark` covers paragraphs, emphasis/strong, inline code, lists,
//! and fenced code blocks (highlighted with syntect). Tables, headings, and
//! the rest of CommonMark never appear in the content and are skipped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Keyword callouts (`*emphasis*`) render in this accent color, matching the
/// companion guide's highlight treatment.
const ACCENT: Color = Color::Cyan;

/// Parse markdown content into styled `Text` with the given base foreground.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg);
    for event in Parser::new(content) {
        w.handle(event);
    }
    w.text
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack; styles compose via `patch` so nested
    /// emphasis+strong works.
    styles: Vec<Style>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Active syntax highlighter for fenced code blocks.
    highlighter: Option<HighlightLines<'static>>,
    in_plain_code: bool,
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn push_line(&mut self, line: Line<'static>) {
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.push_span(Span::styled(c.to_string(), style));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            _ => {} // headings, rules, HTML — not present in tour content
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Emphasis => self.push_style(
                Style::default()
                    .fg(ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::CodeBlock(kind) => {
                if !self.text.lines.is_empty() {
                    self.push_line(Line::default());
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                if !lang.is_empty() {
                    if let Some(syn) = SYNTAX_SET.find_syntax_by_token(lang) {
                        let theme = &THEME_SET.themes["base16-ocean.dark"];
                        self.highlighter = Some(HighlightLines::new(syn, theme));
                    }
                }
                if self.highlighter.is_none() {
                    self.in_plain_code = true;
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Emphasis | TagEnd::Strong => {
                self.styles.pop();
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.needs_newline = true;
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        // Syntax-highlighted code block — take the highlighter out to avoid
        // a double mutable borrow (highlight_line borrows it, push_line
        // borrows self).
        if self.highlighter.is_some() {
            let mut hl = self.highlighter.take().unwrap();
            for line in LinesWithEndings::from(text.as_str()) {
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(hl_style, frag)| {
                            let content = frag.trim_end_matches('\n').to_owned();
                            if content.is_empty() {
                                return None;
                            }
                            let fg = Color::Rgb(
                                hl_style.foreground.r,
                                hl_style.foreground.g,
                                hl_style.foreground.b,
                            );
                            Some(Span::styled(content, Style::default().fg(fg)))
                        })
                        .collect();
                    self.push_line(Line::from(spans));
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        if self.in_plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_gets_accent_color() {
        let text = render("*Security*: browsers add https", Color::Gray);
        let line = &text.lines[0];
        let em = line.spans.iter().find(|s| s.content == "Security").unwrap();
        assert_eq!(em.style.fg, Some(ACCENT));
        assert!(em.style.add_modifier.contains(Modifier::BOLD));
        // Trailing text keeps the base color.
        let rest = line
            .spans
            .iter()
            .find(|s| s.content.contains("browsers"))
            .unwrap();
        assert_eq!(rest.style.fg, Some(Color::Gray));
    }

    #[test]
    fn strong_text_is_bold() {
        let text = render("the **ACK** flag", Color::Gray);
        let line = &text.lines[0];
        let bold = line.spans.iter().find(|s| s.content == "ACK").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render("send `SYN` first", Color::Gray);
        let line = &text.lines[0];
        let code = line.spans.iter().find(|s| s.content == "SYN").unwrap();
        assert_eq!(code.style.fg, Some(Color::White));
        assert_eq!(code.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn fenced_code_block_produces_lines() {
        let text = render("```\nGET / HTTP/1.1\nHost: example.com\n```", Color::Gray);
        let contents: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(contents.iter().any(|l| l.contains("GET / HTTP/1.1")));
        assert!(contents.iter().any(|l| l.contains("Host: example.com")));
    }

    #[test]
    fn list_items_get_markers() {
        let text = render("- one\n- two", Color::Gray);
        let contents: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(contents.iter().any(|l| l.starts_with("- ") && l.contains("one")));
        assert!(contents.iter().any(|l| l.starts_with("- ") && l.contains("two")));
    }

    #[test]
    fn every_tour_dialog_renders_nonempty() {
        let journey = crate::core::content::journey();
        for stage in journey.stages() {
            for dialog in &stage.dialogs {
                let text = render(dialog, Color::Gray);
                assert!(!text.lines.is_empty(), "dialog rendered empty: {dialog}");
            }
        }
    }
}
