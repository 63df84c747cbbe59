//! Error types for world-state access.
//!
//! These cover dangling identifiers only. Gameplay rejections (illegal
//! target, insufficient mana, and the like) are user-visible messages and
//! silent no-ops, never `Err` values.

use thiserror::Error;

use crate::types::{ActorId, ItemId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),
}

pub type Result<T> = core::result::Result<T, WorldError>;
