use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use omr_scan::{scan_image, ErrorReport, PageType, ScanError, ScanReport};

/// Read a scanned questionnaire page and print the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "omr-scan", version, about, long_about = None)]
struct Cli {
    /// Page image (PNG, JPEG, TIFF, ...)
    image_path: PathBuf,

    /// Kind of page; echoed in the report metadata
    #[arg(long, value_enum)]
    page_type: Option<PageType>,

    /// JSON file overriding detector and OCR parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level for stderr diagnostics (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Emit `tracing` spans as JSON lines on stderr
    #[cfg(feature = "tracing")]
    #[arg(long)]
    trace_json: bool,
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn run(cli: &Cli) -> Result<ScanReport, ScanError> {
    scan_image(&cli.image_path, cli.config.as_deref(), cli.page_type)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    omr_scan::core::init_tracing(cli.trace_json, &cli.log_level.to_string().to_lowercase());
    #[cfg(not(feature = "tracing"))]
    let _ = omr_scan::core::init_with_level(cli.log_level);

    let outcome = run(&cli).and_then(|report| Ok(to_json(&report, cli.pretty)?));
    match outcome {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let body = ErrorReport::new(&err);
            match to_json(&body, cli.pretty) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "'")),
            }
            ExitCode::FAILURE
        }
    }
}
