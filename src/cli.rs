use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::routing::Route;

/// Browse rental offers in six cities from the terminal.
#[derive(Debug, Parser)]
#[command(name = "six-cities", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/six-cities/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Screen to open first, e.g. /offer/42
    #[arg(long, value_name = "PATH", default_value = "/")]
    pub route: Route,

    /// Write logs to this file (filter with SIX_CITIES_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// City selected when the listing opens
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(city) = &self.city {
            config.ui.default_city = city.clone();
        }
    }

    pub fn load_config(&self) -> Result<Config, crate::config::ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}
