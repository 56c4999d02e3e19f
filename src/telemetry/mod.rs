mod create_telemetry;
mod telemetry_source;

pub use create_telemetry::{create_probe, create_telemetry};
pub use telemetry_source::TelemetrySource;
