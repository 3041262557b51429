//! CLI argument definitions using clap

use std::path::PathBuf;

use calcpad::config::CalculatorConfig;
use calcpad::theme::{ColorScheme, ThemeOption};
use clap::Parser;

use crate::error::CliResult;

/// Calcpad: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "calcpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "CALCPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Theme to select at startup (dark, light, violet, system)
    #[arg(short, long)]
    pub theme: Option<ThemeOption>,

    /// OS color scheme followed while the theme is `system` (light, dark)
    #[arg(long, default_value = "light")]
    pub os_scheme: ColorScheme,

    /// Fractional digits kept in results (overrides the config file)
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Preference file for the theme choice (overrides the config file)
    #[arg(long)]
    pub preferences: Option<PathBuf>,

    /// Press whitespace-separated keys (e.g. "1 + 2 ="), print the display and exit
    #[arg(short, long)]
    pub keys: Option<String>,

    /// Verbosity level (-v, -vv); ignored when RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Loads the config file (or defaults) and applies command-line overrides
    pub fn load_config(&self) -> CliResult<CalculatorConfig> {
        let mut config = match &self.config {
            Some(path) => CalculatorConfig::from_file(path)?,
            None => CalculatorConfig::default(),
        };
        if let Some(precision) = self.precision {
            config = config.with_precision(precision);
        }
        if let Some(path) = &self.preferences {
            config = config.with_preferences_path(path);
        }
        match self.verbose {
            0 => {}
            1 => config = config.with_log_filter("debug"),
            _ => config = config.with_log_filter("trace"),
        }
        config.validate()?;
        Ok(config)
    }
}
