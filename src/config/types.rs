use serde::{Deserialize, Serialize};

use crate::domain::{City, Location};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Supported cities, in tab order.
    #[serde(default = "default_cities")]
    pub cities: Vec<City>,
    /// Rating labels for the review form, best first.
    #[serde(default = "default_ratings")]
    pub ratings: Vec<String>,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the rental API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 5).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Connection timeout in seconds (default: 3).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// City selected when the listing opens.
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Tick interval of the event loop in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/six-cities".to_string()
}

fn default_request_timeout() -> u32 {
    5
}

fn default_connect_timeout() -> u32 {
    3
}

fn default_city() -> String {
    "Paris".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

pub fn default_cities() -> Vec<City> {
    vec![
        City::new(1, "Paris", Location::new(48.85661, 2.351499, 13)),
        City::new(2, "Cologne", Location::new(50.938361, 6.959974, 13)),
        City::new(3, "Brussels", Location::new(50.846557, 4.351697, 13)),
        City::new(4, "Amsterdam", Location::new(52.37454, 4.897976, 13)),
        City::new(5, "Hamburg", Location::new(53.550341, 10.000654, 13)),
        City::new(6, "Dusseldorf", Location::new(51.225402, 6.776314, 13)),
    ]
}

pub fn default_ratings() -> Vec<String> {
    ["perfect", "good", "not bad", "badly", "terribly"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            cities: default_cities(),
            ratings: default_ratings(),
        }
    }
}
