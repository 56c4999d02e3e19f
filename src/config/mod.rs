mod config_error;
mod telemetry_config;

pub use config_error::ConfigError;
pub use telemetry_config::TelemetryConfig;
