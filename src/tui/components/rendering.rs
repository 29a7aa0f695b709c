//! # Browser Rendering Stage
//!
//! The final leg: bytes of HTML become pixels. Four pipeline steps from
//! parsing to composite, driven by the shared
//! [`PipelineState`](super::pipeline::PipelineState) engine.

use super::pipeline::{PipelineState, PipelineStep};

const STEPS: [PipelineStep; 4] = [
    PipelineStep {
        name: "Parse HTML & CSS",
        detail: "The HTML parser builds the DOM tree while the CSS parser \
                 builds the CSSOM. Parsing is incremental — rendering can \
                 start before the last byte arrives — but a blocking \
                 <script> tag stops the parser cold until it runs.",
        metric: Some("~30ms"),
        snippet: Some(
            "```html\n<script src=\"app.js\" defer></script>\n<!-- defer: download now, run after parsing -->\n```",
        ),
    },
    PipelineStep {
        name: "Style & Layout",
        detail: "DOM and CSSOM merge into the render tree, then layout \
                 (reflow) computes the exact geometry of every box. \
                 Changing an element's width can cascade through the whole \
                 tree, which is why layout thrashing kills performance.",
        metric: Some("~15ms"),
        snippet: Some(
            "```js\n// read-after-write forces a synchronous reflow\nel.style.width = '50%';\nconst w = el.offsetWidth;\n```",
        ),
    },
    PipelineStep {
        name: "Paint",
        detail: "Each render-tree node is rasterized into pixels: text, \
                 colors, borders, shadows, images, in stacking order. \
                 Painting happens in layers so later changes can redraw \
                 only what moved.",
        metric: Some("~8ms"),
        snippet: None,
    },
    PipelineStep {
        name: "Composite",
        detail: "The GPU assembles the painted layers into the final frame. \
                 transform and opacity animate on this step alone, skipping \
                 layout and paint entirely — that's what makes them cheap. \
                 The page is on screen.",
        metric: Some("~4ms · 60fps budget 16ms"),
        snippet: Some(
            "```css\n.slide-in {\n    transform: translateX(0);  /* compositor-only */\n    transition: transform 200ms;\n}\n```",
        ),
    },
];

pub fn rendering_pipeline() -> PipelineState {
    PipelineState::new("Pixels on Screen", "Page rendered", &STEPS)
}
