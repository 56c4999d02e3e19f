use std::{
    rc::{Rc, Weak},
    sync::Arc,
    time::Duration,
};

use crate::{
    utility::macros::unwrap_or_return, Clock, PollTimer, ProbeSwitch, SampleConsumer,
    SignalScope, TelemetryListener, Timestamp,
};

const HOVER_DELAY: Duration = Duration::from_millis(500);
const HOVER_EXIT_DELAY: Duration = Duration::from_millis(500);
const SIGNAL_REFRESH_INTERVAL: Duration = Duration::from_millis(1000 / 10);
const MESSAGE_REFRESH_INTERVAL: Duration = Duration::from_millis(1000 / 60);
const DEFAULT_MESSAGE_BUDGET: usize = 48;
const SIGNAL_DISPLAY_WIDTH: usize = 130;
const NO_MESSAGE: &str = "no message yet";

/// A patch connection the overlay can describe
pub trait ProbedConnection {
    /// Audio-rate connections show a waveform, control connections show
    /// their last message
    fn is_signal(&self) -> bool;

    /// The last message sent through the connection, one atom per item
    fn message(&self) -> Vec<String>;
}

/// One piece of the message line
#[derive(Clone, Debug, PartialEq)]
pub struct MessageItem {
    pub text: String,
    pub emphasised: bool,
}

impl MessageItem {
    fn new(text: impl Into<String>, emphasised: bool) -> Self {
        Self {
            text: text.into(),
            emphasised,
        }
    }
}

/// Split a message into display items, eliding whatever does not fit in
/// `budget` characters
pub fn format_message(atoms: &[String], budget: usize) -> Vec<MessageItem> {
    if atoms.first().map_or(true, |atom| atom.is_empty()) {
        return vec![MessageItem::new(NO_MESSAGE, false)];
    }

    let last = atoms.len() - 1;
    let mut used = 0;
    let mut items = Vec::with_capacity(atoms.len());

    for (index, atom) in atoms.iter().enumerate() {
        let text = if index == 0 || index == last {
            atom.clone()
        } else {
            format!("{},", atom)
        };

        let width = text.chars().count();
        if used + width > budget {
            items.push(MessageItem::new(
                format!("({})...", atoms.len() - index),
                true,
            ));
            break;
        }

        used += width;
        items.push(MessageItem::new(text, index == 0));
    }

    items
}

/// The hover display for a single connection
///
/// Hovering starts a delay before the overlay appears. Once it has been shown
/// and hidden, the next hover appears without delay until the exit delay runs
/// out, like a tooltip. Signal connections subscribe the probe tap while
/// hovered and refresh the scope at 10 Hz; message connections refresh their
/// text at 60 Hz.
pub struct ProbeOverlay {
    clock: Arc<dyn Clock>,
    connection: Option<Weak<dyn ProbedConnection>>,
    position: (i32, i32),
    is_signal: bool,
    visible: bool,
    hover_delay: Duration,
    show_at: Option<Timestamp>,
    restore_delay_at: Option<Timestamp>,
    repaint_timer: PollTimer,
    scope: SignalScope,
    consumer: SampleConsumer,
    switch: ProbeSwitch,
    message: Vec<MessageItem>,
    message_budget: usize,
    needs_repaint: bool,
}

impl ProbeOverlay {
    pub fn new(
        clock: Arc<dyn Clock>,
        consumer: SampleConsumer,
        switch: ProbeSwitch,
        window: usize,
    ) -> Self {
        let scope = SignalScope::new(consumer.channel_count(), window);

        Self {
            clock,
            connection: None,
            position: (0, 0),
            is_signal: false,
            visible: false,
            hover_delay: HOVER_DELAY,
            show_at: None,
            restore_delay_at: None,
            repaint_timer: PollTimer::new(),
            scope,
            consumer,
            switch,
            message: Vec::new(),
            message_budget: DEFAULT_MESSAGE_BUDGET,
            needs_repaint: false,
        }
    }

    pub fn with_message_budget(mut self, message_budget: usize) -> Self {
        self.message_budget = message_budget;
        self
    }

    /// Start showing `connection` near `position`
    pub fn hover<C>(&mut self, connection: &Rc<C>, position: (i32, i32))
    where
        C: ProbedConnection + 'static,
    {
        let now = self.clock.now();
        let weak_connection = Rc::downgrade(connection);
        let weak_connection: Weak<dyn ProbedConnection> = weak_connection;

        self.connection = Some(weak_connection);
        self.position = position;
        self.is_signal = connection.is_signal();
        self.restore_delay_at = None;

        if self.is_signal {
            self.scope.clear(&mut self.consumer);
            self.switch.subscribe();
            self.repaint_timer.start(now, SIGNAL_REFRESH_INTERVAL);
            self.scope.refresh(&mut self.consumer);
        } else {
            self.switch.unsubscribe();
            self.repaint_timer.start(now, MESSAGE_REFRESH_INTERVAL);
            self.refresh_message();
        }

        if self.hover_delay.is_zero() {
            self.show_at = None;
            self.visible = true;
        } else {
            self.show_at = Some(now.incremented_by(self.hover_delay));
        }

        self.needs_repaint = true;
        log::debug!("Probing connection at {:?}", position);
    }

    /// Hide the overlay when the pointer leaves the connection
    pub fn leave(&mut self) {
        if self.connection.is_none() {
            return;
        }

        self.hide();

        self.hover_delay = Duration::ZERO;
        self.show_at = None;
        self.restore_delay_at = Some(self.clock.now().incremented_by(HOVER_EXIT_DELAY));
    }

    fn hide(&mut self) {
        self.switch.unsubscribe();
        self.repaint_timer.stop();
        self.connection = None;

        if self.visible {
            self.visible = false;
            self.needs_repaint = true;
            log::debug!("Hid connection probe");
        }
    }

    fn live_connection(&self) -> Option<Rc<dyn ProbedConnection>> {
        self.connection.as_ref().and_then(Weak::upgrade)
    }

    fn refresh_message(&mut self) {
        let connection = unwrap_or_return!(self.live_connection());
        let message = format_message(&connection.message(), self.message_budget);

        if message != self.message {
            self.message = message;
            self.needs_repaint = true;
        }
    }

    fn refresh(&mut self) {
        if self.live_connection().is_none() {
            self.hide();
            return;
        }

        if self.is_signal {
            self.scope.refresh(&mut self.consumer);
            self.needs_repaint = true;
        } else {
            self.refresh_message();
        }
    }

    /// Run whichever timers are due
    ///
    /// Returns whether the overlay needs repainting.
    pub fn update(&mut self) -> bool {
        let now = self.clock.now();

        if self.repaint_timer.advance(now) {
            self.refresh();
        }

        if self.show_at.is_some_and(|show_at| show_at <= now) {
            self.show_at = None;

            if self.live_connection().is_some() {
                if !self.is_signal {
                    self.refresh_message();
                }
                self.visible = true;
                self.needs_repaint = true;
            } else {
                self.hide();
            }
        }

        if self
            .restore_delay_at
            .is_some_and(|restore_at| restore_at <= now)
        {
            self.restore_delay_at = None;
            self.hover_delay = HOVER_DELAY;
        }

        std::mem::take(&mut self.needs_repaint)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_signal(&self) -> bool {
        self.is_signal
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn hover_delay(&self) -> Duration {
        self.hover_delay
    }

    pub fn message(&self) -> &[MessageItem] {
        &self.message
    }

    pub fn scope(&self) -> &SignalScope {
        &self.scope
    }

    /// Width and height of the waveform display
    pub fn preferred_signal_size(&self) -> (usize, usize) {
        (SIGNAL_DISPLAY_WIDTH, self.scope.preferred_height())
    }
}

impl TelemetryListener for ProbeOverlay {
    fn on_tick(&mut self) {
        self.update();
    }
}

impl Drop for ProbeOverlay {
    fn drop(&mut self) {
        self.switch.unsubscribe();
    }
}
