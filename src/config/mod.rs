//! Configuration: API endpoint and timeouts, UI defaults, and the static
//! lists (cities, rating labels) injected at startup.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{default_cities, default_ratings, ApiConfig, Config, UiConfig};
