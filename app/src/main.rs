//! FILENAME: app/src/main.rs
// PURPOSE: CLI entry point with unified logging.
// FORMAT: seq|level|category|message

use clap::Parser;

use app_lib::{logging, run, Cli};

fn main() {
    let cli = Cli::parse();

    let level = logging::level_for(cli.verbose, cli.quiet);
    if let Err(e) = logging::init(level, cli.log_file.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
