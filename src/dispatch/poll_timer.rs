use std::time::Duration;

use crate::Timestamp;

/// A repeating timer driven by the host's event loop
///
/// The timer does not run on its own: the host calls [`PollTimer::advance`]
/// with the current time and the timer reports whether it is due. If several
/// intervals went by since the last call they count as a single fire.
///
/// Deadlines are measured from the start time, so rounding never accumulates
/// from one fire to the next.
#[derive(Debug, Default)]
pub struct PollTimer {
    interval: Duration,
    started_at: Option<Timestamp>,
    next_fire_index: u64,
}

const NANOSECONDS_PER_SECOND: u128 = 1_000_000_000;

impl PollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Timestamp, interval: Duration) {
        assert!(!interval.is_zero());

        self.interval = interval;
        self.started_at = Some(now);
        self.next_fire_index = 1;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next fire, if the timer is running
    pub fn time_until_next(&self, now: Timestamp) -> Option<Duration> {
        self.next_fire().map(|next_fire| {
            if next_fire <= now {
                Duration::ZERO
            } else {
                Duration::from_secs_f64((next_fire - now).as_seconds())
            }
        })
    }

    pub fn advance(&mut self, now: Timestamp) -> bool {
        let started_at = match self.started_at {
            Some(started_at) => started_at,
            None => return false,
        };

        if self.deadline(started_at, self.next_fire_index) > now {
            return false;
        }

        let elapsed_intervals =
            ((now - started_at).as_seconds() / self.interval.as_secs_f64()).floor() as u64;

        let mut next_fire_index = elapsed_intervals
            .saturating_add(1)
            .max(self.next_fire_index.saturating_add(1));

        // The estimate can land one interval out either side of a deadline
        if self.deadline(started_at, next_fire_index) <= now {
            next_fire_index += 1;
        } else if next_fire_index > self.next_fire_index.saturating_add(1)
            && self.deadline(started_at, next_fire_index - 1) > now
        {
            next_fire_index -= 1;
        }

        self.next_fire_index = next_fire_index;
        true
    }

    fn next_fire(&self) -> Option<Timestamp> {
        self.started_at
            .map(|started_at| self.deadline(started_at, self.next_fire_index))
    }

    fn deadline(&self, started_at: Timestamp, fire_index: u64) -> Timestamp {
        let nanoseconds = self
            .interval
            .as_nanos()
            .saturating_mul(u128::from(fire_index));

        let offset = Duration::new(
            u64::try_from(nanoseconds / NANOSECONDS_PER_SECOND).unwrap_or(u64::MAX),
            (nanoseconds % NANOSECONDS_PER_SECOND) as u32,
        );

        started_at.incremented_by(offset)
    }
}
