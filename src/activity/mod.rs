mod activity_tracker;
mod clock;

pub use activity_tracker::{Activity, ActivityState, ActivityTracker};
pub use clock::{Clock, ManualClock, MonotonicClock};
