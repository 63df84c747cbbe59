//! Rooms and exits.

use bitflags::bitflags;

use crate::actor::Actor;
use crate::types::{ActorId, ItemId, RoomId};

bitflags! {
    /// Special room kinds, stored as a bitmask on the room record.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct RoomFlags: u32 {
        /// Combat and mob spawning never happen here.
        const NO_COMBAT = 1 << 0;
        /// Elevated mob spawn chance, see `generator_magnitude`.
        const MONSTER_GENERATOR = 1 << 1;
    }
}

/// Connector to another room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exit {
    pub name: String,
    pub to: RoomId,
    /// Closed exits admit nobody.
    pub open: bool,
    /// Mobs roam only through exits that admit them; players are
    /// unrestricted. Mirrors per-actor traverse locks.
    pub mob_passable: bool,
}

impl Exit {
    pub fn new(name: impl Into<String>, to: RoomId) -> Self {
        Self {
            name: name.into(),
            to,
            open: true,
            mob_passable: true,
        }
    }

    pub fn players_only(mut self) -> Self {
        self.mob_passable = false;
        self
    }

    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    /// Per-actor traversal predicate.
    pub fn may_traverse(&self, actor: &Actor) -> bool {
        self.open && (actor.is_player() || self.mob_passable)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Room {
    pub name: String,
    pub flags: RoomFlags,
    /// Spawn chance (percent) when flagged MONSTER_GENERATOR.
    pub generator_magnitude: u32,
    pub exits: Vec<Exit>,
    pub occupants: Vec<ActorId>,
    pub items: Vec<ItemId>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_flags(mut self, flags: RoomFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_generator(mut self, magnitude: u32) -> Self {
        self.flags |= RoomFlags::MONSTER_GENERATOR;
        self.generator_magnitude = magnitude;
        self
    }

    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }

    /// Exits the given actor may traverse right now.
    pub fn traversable_exits<'a>(&'a self, actor: &'a Actor) -> Vec<&'a Exit> {
        self.exits.iter().filter(|e| e.may_traverse(actor)).collect()
    }
}
