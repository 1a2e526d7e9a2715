// Rotrs Config
// TOML sensor configuration

pub mod parser;

pub use parser::{Config, ConfigError, SensorEntry};
