mod listener;
mod listener_registry;
mod poll_dispatcher;
mod poll_timer;

pub use listener::{ListenerId, TelemetryListener};
pub use listener_registry::ListenerRegistry;
pub use poll_dispatcher::PollDispatcher;
pub use poll_timer::PollTimer;
