use std::sync::Arc;

use crate::{
    probe_tap, sample_relay, ActivityTracker, Clock, ConfigError, LevelEnvelope, LevelMeters,
    PollDispatcher, ProbeOverlay, ProbeTap, TelemetryConfig, TelemetrySource,
};

/// Create the telemetry relay
///
/// This returns a pair:
///
/// * The `TelemetrySource` meters blocks and records activity. Move it to the
///   realtime thread.
///
/// * The `PollDispatcher` stays on the UI thread, where displays register with
///   it and the host's event loop drives it.
pub fn create_telemetry(
    config: TelemetryConfig,
    clock: Arc<dyn Clock>,
) -> Result<(TelemetrySource, PollDispatcher), ConfigError> {
    let config = config.validated()?;

    let tracker = Arc::new(ActivityTracker::new(clock));
    let meters = Arc::new(LevelMeters::new(config.channel_count));

    let source = TelemetrySource::new(
        Arc::clone(&tracker),
        Arc::clone(&meters),
        LevelEnvelope::new(config.level_decay, config.level_floor),
    );

    let dispatcher = PollDispatcher::new(tracker, meters, config.activity_threshold());

    log::debug!(
        "Created telemetry relay with {} channels",
        config.channel_count
    );

    Ok((source, dispatcher))
}

/// Create a connection probe
///
/// The `ProbeTap` goes to the realtime thread and is fed the probed
/// connection's blocks. The `ProbeOverlay` stays with the UI; it subscribes the
/// tap while a signal connection is hovered.
pub fn create_probe(
    config: &TelemetryConfig,
    clock: Arc<dyn Clock>,
) -> Result<(ProbeTap, ProbeOverlay), ConfigError> {
    config.validate()?;

    let (producer, consumer) = sample_relay(config.channel_count, config.sample_capacity);
    let (tap, switch) = probe_tap(producer);
    let overlay = ProbeOverlay::new(clock, consumer, switch, config.display_window);

    Ok((tap, overlay))
}
