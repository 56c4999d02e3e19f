use std::{cell::RefCell, rc::Rc, sync::Arc, time::Duration};

use super::{ListenerId, ListenerRegistry, PollTimer, TelemetryListener};
use crate::{ActivityState, ActivityTracker, Level, LevelMeters, MidiDirection};

/// Polls the shared telemetry on the UI thread and fans it out to listeners
///
/// Activity changes are edge-triggered: listeners hear about a change once.
/// Levels and ticks are sent on every fire.
pub struct PollDispatcher {
    tracker: Arc<ActivityTracker>,
    meters: Arc<LevelMeters>,
    registry: ListenerRegistry,
    timer: PollTimer,
    activity_threshold: Duration,
    notified: ActivityState,
    levels: Vec<Level>,
}

impl PollDispatcher {
    pub fn new(
        tracker: Arc<ActivityTracker>,
        meters: Arc<LevelMeters>,
        activity_threshold: Duration,
    ) -> Self {
        let channel_count = meters.channel_count();

        Self {
            tracker,
            meters,
            registry: ListenerRegistry::new(),
            timer: PollTimer::new(),
            activity_threshold,
            notified: ActivityState::default(),
            levels: vec![Level::zero(); channel_count],
        }
    }

    pub fn start(&mut self, interval: Duration) {
        self.timer.start(self.tracker.now(), interval);
        log::debug!("Started telemetry polling every {:?}", interval);
    }

    pub fn stop(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            log::debug!("Stopped telemetry polling");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Time until the next poll is due, for hosts that sleep between events
    pub fn time_until_next_poll(&self) -> Option<Duration> {
        self.timer.time_until_next(self.tracker.now())
    }

    /// Poll if the timer is due
    ///
    /// Call this from the host's event loop. Returns whether a poll happened.
    pub fn update(&mut self) -> bool {
        if self.timer.advance(self.tracker.now()) {
            self.poll_now();
            return true;
        }

        false
    }

    /// Poll immediately, regardless of the timer
    pub fn poll_now(&mut self) {
        let state = self
            .tracker
            .poll(self.tracker.now(), self.activity_threshold);

        if state.midi_in != self.notified.midi_in {
            self.notified.midi_in = state.midi_in;
            self.registry.for_each(|listener| {
                listener.on_midi_activity_changed(MidiDirection::In, state.midi_in)
            });
        }

        if state.midi_out != self.notified.midi_out {
            self.notified.midi_out = state.midi_out;
            self.registry.for_each(|listener| {
                listener.on_midi_activity_changed(MidiDirection::Out, state.midi_out)
            });
        }

        if state.audio != self.notified.audio {
            self.notified.audio = state.audio;
            self.registry
                .for_each(|listener| listener.on_audio_activity_changed(state.audio));
        }

        self.meters.read_into(&mut self.levels);

        let levels = &self.levels;
        self.registry.for_each(|listener| {
            listener.on_level_changed(levels);
            listener.on_tick();
        });
    }

    /// The activity state listeners were last told about
    pub fn activity_state(&self) -> ActivityState {
        self.notified
    }

    pub fn add_listener<L>(&self, listener: &Rc<RefCell<L>>) -> ListenerId
    where
        L: TelemetryListener + 'static,
    {
        self.registry.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.registry.remove(id)
    }

    /// A handle to the listener set that stays valid while the dispatcher
    /// is busy notifying
    pub fn registry(&self) -> ListenerRegistry {
        self.registry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activity, ManualClock, Timestamp};

    #[derive(Default)]
    struct Recorder {
        midi_in: Vec<bool>,
        midi_out: Vec<bool>,
        audio: Vec<bool>,
        levels: Vec<Vec<f32>>,
        ticks: usize,
    }

    impl TelemetryListener for Recorder {
        fn on_level_changed(&mut self, levels: &[Level]) {
            self.levels
                .push(levels.iter().map(Level::as_linear_f32).collect());
        }

        fn on_midi_activity_changed(&mut self, direction: MidiDirection, active: bool) {
            match direction {
                MidiDirection::In => self.midi_in.push(active),
                MidiDirection::Out => self.midi_out.push(active),
            }
        }

        fn on_audio_activity_changed(&mut self, active: bool) {
            self.audio.push(active);
        }

        fn on_tick(&mut self) {
            self.ticks += 1;
        }
    }

    struct Fixture {
        clock: ManualClock,
        tracker: Arc<ActivityTracker>,
        meters: Arc<LevelMeters>,
        dispatcher: PollDispatcher,
    }

    impl Fixture {
        fn new() -> Self {
            let clock = ManualClock::new();
            let tracker = Arc::new(ActivityTracker::new(Arc::new(clock.clone())));
            let meters = Arc::new(LevelMeters::new(2));
            let dispatcher = PollDispatcher::new(
                Arc::clone(&tracker),
                Arc::clone(&meters),
                Duration::from_millis(700),
            );

            Self {
                clock,
                tracker,
                meters,
                dispatcher,
            }
        }

        fn poll_at(&mut self, milliseconds: u64) {
            self.clock.set_millis(milliseconds);
            self.dispatcher.poll_now();
        }
    }

    #[test]
    fn activity_is_edge_triggered() {
        let mut fixture = Fixture::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        fixture.dispatcher.add_listener(&recorder);

        fixture.poll_at(0);
        fixture.poll_at(100);
        assert!(recorder.borrow().midi_in.is_empty());

        fixture
            .tracker
            .record_at(Activity::MidiIn, Timestamp::from_millis(150));
        fixture.poll_at(200);
        fixture.poll_at(300);
        assert_eq!(recorder.borrow().midi_in, vec![true]);

        fixture.poll_at(900);
        fixture.poll_at(1_000);
        assert_eq!(recorder.borrow().midi_in, vec![true, false]);
        assert!(recorder.borrow().midi_out.is_empty());
        assert!(recorder.borrow().audio.is_empty());
    }

    #[test]
    fn levels_and_ticks_go_out_every_poll() {
        let mut fixture = Fixture::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        fixture.dispatcher.add_listener(&recorder);

        fixture.meters.store(0, 0.25);
        fixture.poll_at(0);
        fixture.poll_at(100);

        let recorder = recorder.borrow();
        assert_eq!(recorder.ticks, 2);
        assert_eq!(recorder.levels, vec![vec![0.25, 0.0], vec![0.25, 0.0]]);
    }

    #[test]
    fn update_follows_the_timer() {
        let mut fixture = Fixture::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        fixture.dispatcher.add_listener(&recorder);

        assert!(!fixture.dispatcher.update());

        fixture.dispatcher.start(Duration::from_millis(100));
        assert!(fixture.dispatcher.is_running());

        fixture.clock.set_millis(50);
        assert!(!fixture.dispatcher.update());
        fixture.clock.set_millis(100);
        assert!(fixture.dispatcher.update());

        fixture.dispatcher.stop();
        fixture.clock.set_millis(500);
        assert!(!fixture.dispatcher.update());

        assert_eq!(recorder.borrow().ticks, 1);
    }

    #[test]
    fn listener_can_unregister_itself_mid_dispatch() {
        struct OneShot {
            registry: ListenerRegistry,
            id: Option<ListenerId>,
            ticks: usize,
        }

        impl TelemetryListener for OneShot {
            fn on_tick(&mut self) {
                self.ticks += 1;
                if let Some(id) = self.id.take() {
                    self.registry.remove(id);
                }
            }
        }

        let mut fixture = Fixture::new();
        let one_shot = Rc::new(RefCell::new(OneShot {
            registry: fixture.dispatcher.registry(),
            id: None,
            ticks: 0,
        }));
        let id = fixture.dispatcher.add_listener(&one_shot);
        one_shot.borrow_mut().id = Some(id);

        fixture.poll_at(0);
        fixture.poll_at(100);

        assert_eq!(one_shot.borrow().ticks, 1);
    }

    #[test]
    fn listener_removed_by_another_misses_the_rest_of_the_fire() {
        struct Remover {
            registry: ListenerRegistry,
            target: Option<ListenerId>,
        }

        impl TelemetryListener for Remover {
            fn on_tick(&mut self) {
                if let Some(target) = self.target.take() {
                    self.registry.remove(target);
                }
            }
        }

        let mut fixture = Fixture::new();
        let remover = Rc::new(RefCell::new(Remover {
            registry: fixture.dispatcher.registry(),
            target: None,
        }));
        let removed = Rc::new(RefCell::new(Recorder::default()));

        fixture.dispatcher.add_listener(&remover);
        let removed_id = fixture.dispatcher.add_listener(&removed);
        remover.borrow_mut().target = Some(removed_id);

        fixture.poll_at(0);
        fixture.poll_at(100);

        assert!(!fixture.dispatcher.registry().contains(removed_id));
        assert_eq!(removed.borrow().ticks, 0);
        assert!(removed.borrow().levels.is_empty());
    }

    #[test]
    fn dropped_listener_is_never_called() {
        let mut fixture = Fixture::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        fixture.dispatcher.add_listener(&recorder);

        drop(recorder);
        fixture.tracker.record_midi_out();
        fixture.poll_at(10);

        assert!(fixture.dispatcher.registry().is_empty());
        assert!(fixture.dispatcher.activity_state().midi_out);
    }
}
