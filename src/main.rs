use std::fs::File;
use std::process;

use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{ConfigBuilder, WriteLogger};

use wirewalk::core::config::{self, CliOverrides};
use wirewalk::tui;

/// Follow a URL through the stack, one stage at a time.
#[derive(Parser, Debug)]
#[command(name = "wirewalk", version, about)]
struct Args {
    /// Pre-fill the address bar with this URL.
    #[arg(long)]
    url: Option<String>,

    /// Stage to open on (0 = Browser Input … 7 = Browser Rendering).
    #[arg(long)]
    stage: Option<usize>,

    /// Simulated HTTP response delay in milliseconds (0 = immediate).
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Enable debug-level logging.
    #[arg(long, short)]
    verbose: bool,
}

/// The TUI owns stdout, so logs go to `~/.wirewalk/wirewalk.log`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_path = config::config_path()
        .and_then(|p| p.parent().map(|d| d.join("wirewalk.log")))
        .unwrap_or_else(|| "wirewalk.log".into());
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    match File::create(&log_path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, log_config, file);
        }
        Err(_) => {
            // No log file is not fatal; the app just runs quiet.
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("wirewalk {} starting", env!("CARGO_PKG_VERSION"));

    // A malformed config file is fatal: silently ignoring the user's
    // explicit settings would be worse than refusing to start.
    let file_config = config::load_config()?;
    let overrides = CliOverrides {
        url: args.url,
        stage: args.stage,
        latency_ms: args.latency_ms,
    };
    let resolved = config::resolve(&file_config, &overrides);
    info!("Resolved config: {:?}", resolved);

    tui::run(&resolved)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Fatal: {e}");
        eprintln!("wirewalk: {e}");
        process::exit(1);
    }
}
