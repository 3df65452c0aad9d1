//! Event dispatch system
//!
//! A named-topic notification channel. Listeners are invoked synchronously,
//! in the order they subscribed to a topic.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

new_key_type! {
    /// Handle returned by [`EventEmitter::on`], used to unsubscribe
    pub struct ListenerId;
}

/// Listener callback type
pub type Listener<P> = Box<dyn FnMut(&P)>;

/// Dispatches payloads to listeners registered per topic
pub struct EventEmitter<T, P> {
    /// Topic each live listener is registered under
    topics: SlotMap<ListenerId, T>,
    /// Listeners per topic, in subscription order
    listeners: FxHashMap<T, SmallVec<[(ListenerId, Listener<P>); 2]>>,
}

impl<T, P> EventEmitter<T, P>
where
    T: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            topics: SlotMap::with_key(),
            listeners: FxHashMap::default(),
        }
    }

    /// Register a listener for a topic
    pub fn on<F>(&mut self, topic: T, listener: F) -> ListenerId
    where
        F: FnMut(&P) + 'static,
    {
        let id = self.topics.insert(topic);
        self.listeners
            .entry(topic)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let Some(topic) = self.topics.remove(id) else {
            return false;
        };
        if let Some(list) = self.listeners.get_mut(&topic) {
            list.retain(|(listener_id, _)| *listener_id != id);
        }
        true
    }

    /// Dispatch a payload to every listener of `topic`.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&mut self, topic: T, payload: &P) -> usize {
        match self.listeners.get_mut(&topic) {
            Some(list) => {
                for (_, listener) in list.iter_mut() {
                    listener(payload);
                }
                list.len()
            }
            None => 0,
        }
    }

    /// Number of listeners registered for a topic
    pub fn listener_count(&self, topic: T) -> usize {
        self.listeners.get(&topic).map_or(0, |list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.topics.clear();
        self.listeners.clear();
    }
}

impl<T, P> Default for EventEmitter<T, P>
where
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for EventEmitter<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.topics.len())
            .finish()
    }
}
