pub mod config;
pub mod paths;

pub use config::{Config, ProviderConfig, SearchOptions};
pub use paths::PathManager;
