mod probe_tap;
mod sample_relay;
mod signal_scope;

pub use probe_tap::{probe_tap, ProbeSwitch, ProbeTap};
pub use sample_relay::{sample_relay, SampleConsumer, SampleProducer};
pub use signal_scope::SignalScope;
