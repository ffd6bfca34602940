use clap::Parser;
use dirs::config_dir;
use env_logger::Builder;
use gobuilder::cli::Cli;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::PathBuf;

/** Main entry point for gobuilder
 *
 * # Process Flow
 * 1. Parse command line arguments using Clap
 * 2. Initialize logging with file output
 * 3. Run the requested command (the build pipeline by default)
 * 4. Print the first error to stderr and exit with code 1
 *
 * # Example
 * ```bash
 * # Build the default target from build-config.yaml
 * gobuilder
 *
 * # Build every platform listed under the `all` target
 * gobuilder --config ci/build-config.yaml --target all
 * ```
 */
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().expect("Failed to print clap error");
            std::process::exit(e.exit_code());
        }
    };

    init_logging(cli.verbose());

    if let Err(e) = cli.execute().await {
        log::error!("gobuilder failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/** Initializes file-based logging
 *
 * # Configuration
 * - Log file: `<config dir>/gobuilder/gobuilder.log`, current directory as fallback
 * - Level: Info, Debug with `--verbose`; `RUST_LOG` is honoured as well
 * - Output: append mode to keep the history of previous runs
 *
 * # Notes
 * - Logging failures are non-fatal, the run continues without a log file
 */
fn init_logging(verbose: bool) {
    let log_file = log_file_path(config_dir(), std::env::current_dir().ok());

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}",
                log_file.display(),
                e
            );
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder.init();
    log::info!("gobuilder started");
}

const LOG_DIR: &str = "gobuilder";
const LOG_FILE: &str = "gobuilder.log";

/// `<config dir>/gobuilder/gobuilder.log`, else `gobuilder.log` in `fallback_dir`.
fn log_file_path(config_dir: Option<PathBuf>, fallback_dir: Option<PathBuf>) -> PathBuf {
    match (config_dir, fallback_dir) {
        (Some(dir), _) => dir.join(LOG_DIR).join(LOG_FILE),
        (None, Some(dir)) => dir.join(LOG_FILE),
        (None, None) => PathBuf::from(LOG_FILE),
    }
}
