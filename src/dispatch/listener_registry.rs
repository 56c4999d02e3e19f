use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::{ListenerId, TelemetryListener};

type WeakListener = Weak<RefCell<dyn TelemetryListener>>;

/// Insertion-ordered set of weakly held listeners
///
/// The registry never keeps a listener alive. Clones share the same set, so a
/// listener can hold a clone and unregister itself from inside a callback.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    entries: Rc<RefCell<Vec<(ListenerId, WeakListener)>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning the existing id if it is already
    /// registered
    pub fn add<L>(&self, listener: &Rc<RefCell<L>>) -> ListenerId
    where
        L: TelemetryListener + 'static,
    {
        let weak_listener = Rc::downgrade(listener);
        let weak_listener: WeakListener = weak_listener;
        let mut entries = self.entries.borrow_mut();

        if let Some((id, _)) = entries
            .iter()
            .find(|(_, existing)| existing.ptr_eq(&weak_listener))
        {
            return *id;
        }

        let id = ListenerId::generate();
        entries.push((id, weak_listener));
        log::debug!("Added telemetry listener {:?}", id);
        id
    }

    /// Unregister a listener, returning whether it was registered
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let count_before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);

        let removed = entries.len() != count_before;
        if removed {
            log::debug!("Removed telemetry listener {:?}", id);
        }

        removed
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    /// The number of registrations, including listeners that have been
    /// dropped but not yet pruned
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn upgrade(&self, id: ListenerId) -> Option<Rc<RefCell<dyn TelemetryListener>>> {
        self.entries
            .borrow()
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .and_then(|(_, listener)| listener.upgrade())
    }

    /// Forget listeners that no longer exist
    pub fn prune(&self) {
        self.entries
            .borrow_mut()
            .retain(|(_, listener)| listener.strong_count() > 0);
    }

    /// Call `notify` on each live listener in registration order
    ///
    /// The registry is re-checked before every call, so a listener removed by
    /// an earlier callback is skipped. The registry is not borrowed while a
    /// callback runs.
    pub fn for_each(&self, mut notify: impl FnMut(&mut dyn TelemetryListener)) {
        let ids: Vec<ListenerId> = self.entries.borrow().iter().map(|(id, _)| *id).collect();
        let mut found_dead = false;

        for id in ids {
            let listener = match self.upgrade(id) {
                Some(listener) => listener,
                None => {
                    found_dead |= self.contains(id);
                    continue;
                }
            };

            match listener.try_borrow_mut() {
                Ok(mut listener) => notify(&mut *listener),
                Err(_) => log::warn!("Skipped re-entrant notification of listener {:?}", id),
            };
        }

        if found_dead {
            self.prune();
        }
    }
}
