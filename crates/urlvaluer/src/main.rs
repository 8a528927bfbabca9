use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use urlvaluer::generate;

#[derive(Parser, Debug)]
#[command(
    name = "urlvaluer",
    version,
    about = "Generates UrlValues query-encoding methods for Go structs"
)]
struct Args {
    /// Go source files to process. Each FILE.go gets a companion
    /// FILE.urlvaluer.go next to it. No files is a no-op.
    files: Vec<PathBuf>,

    /// Log progress and per-field resolution decisions to stdout.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging is off unless asked for; errors always reach stderr
    // through the failure path below.
    if args.verbose {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new("urlvaluer=debug"));
        tracing_subscriber::registry().with(stdout_layer).init();
    }

    for path in &args.files {
        match generate::process_file(path) {
            Ok(report) => {
                info!(
                    "generated {} ({} of {} structs)",
                    report.output_path.display(),
                    report.methods_emitted,
                    report.structs_found
                );
            }
            Err(error) => {
                eprintln!("urlvaluer: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
