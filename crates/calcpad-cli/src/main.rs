//! Calcpad: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! calcpad                               # Interactive calculator
//! calcpad --theme violet                # Start with a theme
//! calcpad --keys "2 + 3 * 4 ="          # Print 14 and exit
//! calcpad --config calcpad.json -v      # Config file, debug logging
//! ```

use std::process::ExitCode;

use calcpad::theme::SchemeSignal;
use calcpad_cli::{build_app, init_tracing, run_interactive, run_keys, Cli, CliResult};
use clap::Parser;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_tracing(&config.log_filter);

    let mut app = build_app(&config, SchemeSignal::new(cli.os_scheme), cli.theme);

    match &cli.keys {
        Some(keys) => {
            println!("{}", run_keys(&mut app, keys)?);
            Ok(())
        }
        None => run_interactive(&mut app),
    }
}
