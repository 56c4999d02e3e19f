//! telemetry-relay carries meter and activity data from a realtime audio
//! thread to a UI thread
//!
//! You can use it to:
//! - Meter every channel of the processed audio with a decaying peak
//! - Light MIDI in/out and DSP indicators while traffic is flowing
//! - Stream the samples of a probed connection into a waveform display
//! - Fan all of it out to display widgets on a fixed polling cadence
//!
//! # Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc, sync::Arc, time::Duration};
//! use telemetry_relay::{create_telemetry, LevelMeterModel, MonotonicClock, TelemetryConfig};
//!
//! let config = TelemetryConfig::default().with_channel_count(2);
//! let (mut source, mut dispatcher) =
//!     create_telemetry(config, Arc::new(MonotonicClock::new())).unwrap();
//!
//! let meter = Rc::new(RefCell::new(LevelMeterModel::new()));
//! dispatcher.add_listener(&meter);
//! dispatcher.start(Duration::from_millis(100));
//!
//! // On the audio thread, for every block:
//! // source.process_block(&[left, right], midi_in, midi_out);
//!
//! // On the UI thread, from the event loop:
//! // dispatcher.update();
//! ```

mod activity;
mod config;
mod dispatch;
mod display;
mod level;
mod midi;
mod relay;
mod telemetry;
mod utility;

pub use activity::Activity;
pub use activity::ActivityState;
pub use activity::ActivityTracker;
pub use activity::Clock;
pub use activity::ManualClock;
pub use activity::MonotonicClock;

pub use config::ConfigError;
pub use config::TelemetryConfig;

pub use dispatch::ListenerId;
pub use dispatch::ListenerRegistry;
pub use dispatch::PollDispatcher;
pub use dispatch::PollTimer;
pub use dispatch::TelemetryListener;

pub use display::format_message;
pub use display::ActivityIndicatorModel;
pub use display::LevelMeterModel;
pub use display::MessageItem;
pub use display::ProbeOverlay;
pub use display::ProbedConnection;

pub use level::LevelEnvelope;
pub use level::LevelMeters;

pub use midi::has_real_events;
pub use midi::is_sysex;
pub use midi::MidiDirection;

pub use relay::probe_tap;
pub use relay::sample_relay;
pub use relay::ProbeSwitch;
pub use relay::ProbeTap;
pub use relay::SampleConsumer;
pub use relay::SampleProducer;
pub use relay::SignalScope;

pub use telemetry::create_probe;
pub use telemetry::create_telemetry;
pub use telemetry::TelemetrySource;

pub use utility::Level;
pub use utility::MINUS_INFINITY_DECIBELS;
pub use utility::Timestamp;

/// The most channels a relay, meter or scope carries
pub const MAXIMUM_CHANNEL_COUNT: usize = 8;

/// Default number of samples each channel's queue holds
pub const SAMPLE_QUEUE_CAPACITY: usize = 512;
