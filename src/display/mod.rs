mod activity_indicator;
mod level_meter;
mod probe_overlay;

pub use activity_indicator::ActivityIndicatorModel;
pub use level_meter::LevelMeterModel;
pub use probe_overlay::{format_message, MessageItem, ProbeOverlay, ProbedConnection};
