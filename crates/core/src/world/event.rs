//! World events published for observers.
//!
//! The world does not call observers directly while it is being mutated;
//! it queues events and the orchestration layer drains and dispatches them
//! after each operation. Arrival events are how mobs get aggro pushed to
//! them instead of polling for newcomers.

use crate::types::{ActorId, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// An actor entered a room (move, relocation, or spawn).
    OccupantArrived { room: RoomId, actor: ActorId },

    /// An actor's health reached zero and death handling completed.
    ActorDied {
        actor: ActorId,
        killer: Option<ActorId>,
    },

    /// A mob was destroyed and removed from the world.
    MobRemoved { actor: ActorId },
}
