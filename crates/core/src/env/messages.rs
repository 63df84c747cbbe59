//! Outbound text delivery.
//!
//! The core never talks to sessions directly; it hands text to a
//! [`MessageSink`] and moves on. Delivery is fire-and-forget with no
//! acknowledgment, and ordering within one resolution call is the call
//! order.

use std::sync::Mutex;

use crate::types::{ActorId, RoomId};

/// Consumer-side messaging contract.
pub trait MessageSink: Send + Sync {
    /// Sends text to a single actor.
    fn notify(&self, actor: ActorId, text: &str);

    /// Sends text to every occupant of a room except those in `exclude`.
    fn notify_room(&self, room: RoomId, text: &str, exclude: &[ActorId]);

    /// Sends text to every connected actor in the world.
    fn broadcast(&self, text: &str);
}

/// One delivered message, as recorded by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Actor { to: ActorId, text: String },
    Room {
        room: RoomId,
        text: String,
        exclude: Vec<ActorId>,
    },
    Global { text: String },
}

/// In-memory sink that records every delivery, for tests and tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything delivered so far.
    pub fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries.lock().expect("sink poisoned"))
    }

    /// Texts delivered directly to the given actor, in order.
    pub fn texts_for(&self, actor: ActorId) -> Vec<String> {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter_map(|d| match d {
                Delivery::Actor { to, text } if *to == actor => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Globally broadcast texts, in order.
    pub fn broadcasts(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter_map(|d| match d {
                Delivery::Global { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Room texts delivered to the given room, in order.
    pub fn room_texts(&self, room: RoomId) -> Vec<String> {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter_map(|d| match d {
                Delivery::Room { room: r, text, .. } if *r == room => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl MessageSink for MemorySink {
    fn notify(&self, actor: ActorId, text: &str) {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .push(Delivery::Actor {
                to: actor,
                text: text.to_string(),
            });
    }

    fn notify_room(&self, room: RoomId, text: &str, exclude: &[ActorId]) {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .push(Delivery::Room {
                room,
                text: text.to_string(),
                exclude: exclude.to_vec(),
            });
    }

    fn broadcast(&self, text: &str) {
        self.deliveries
            .lock()
            .expect("sink poisoned")
            .push(Delivery::Global {
                text: text.to_string(),
            });
    }
}
