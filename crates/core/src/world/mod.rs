//! Owning world state: rooms, actors, items, and the pending event queue.
//!
//! `WorldState` is a plain data structure with accessor and mutation
//! helpers; it performs no rule resolution itself. Exactly one owner may
//! mutate it at a time. Under the runtime that owner is the world worker
//! task, which serializes every command and tick.

mod event;
mod item;
mod room;

pub use event::WorldEvent;
pub use item::{Item, ItemBonuses, ItemKind, ItemSpec};
pub use room::{Exit, Room, RoomFlags};

use std::collections::HashMap;

use crate::actor::Actor;
use crate::error::{Result, WorldError};
use crate::types::{ActorId, ItemId, RoomId};

#[derive(Debug, Default, Clone)]
pub struct WorldState {
    rooms: HashMap<RoomId, Room>,
    actors: HashMap<ActorId, Actor>,
    items: HashMap<ItemId, Item>,

    /// Holding area dead players are relocated to.
    pub void_room: RoomId,
    /// Gold regranted to a player after death.
    pub starting_gold: i64,

    next_actor_id: u64,
    next_room_id: u64,
    next_item_id: u64,
    pending_events: Vec<WorldEvent>,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            starting_gold: 100,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Id allocation
    // ------------------------------------------------------------------

    pub fn allocate_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        id
    }

    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(&id).ok_or(WorldError::UnknownActor(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors.get_mut(&id).ok_or(WorldError::UnknownActor(id))
    }

    pub fn room(&self, id: RoomId) -> Result<&Room> {
        self.rooms.get(&id).ok_or(WorldError::UnknownRoom(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room> {
        self.rooms.get_mut(&id).ok_or(WorldError::UnknownRoom(id))
    }

    pub fn item(&self, id: ItemId) -> Result<&Item> {
        self.items.get(&id).ok_or(WorldError::UnknownItem(id))
    }

    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Occupants of a room, in arrival order.
    pub fn occupants(&self, room: RoomId) -> Result<&[ActorId]> {
        Ok(&self.room(room)?.occupants)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        self.rooms.insert(id, room);
        id
    }

    /// Inserts the actor and publishes its arrival.
    pub fn add_actor(&mut self, actor: Actor) -> Result<ActorId> {
        let id = actor.id;
        let room = actor.location;
        self.room_mut(room)?.occupants.push(id);
        self.actors.insert(id, actor);
        self.pending_events
            .push(WorldEvent::OccupantArrived { room, actor: id });
        Ok(id)
    }

    /// Creates an item held by nobody and nowhere until placed.
    pub fn add_item(&mut self, spec: ItemSpec) -> ItemId {
        let id = self.allocate_item_id();
        self.items.insert(id, Item::from_spec(id, spec));
        id
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Moves an actor to a new room and publishes the arrival.
    pub fn move_actor(&mut self, id: ActorId, dest: RoomId) -> Result<()> {
        // Validate the destination before touching occupant lists.
        self.room(dest)?;
        let from = self.actor(id)?.location;
        self.room_mut(from)?.occupants.retain(|o| *o != id);
        self.room_mut(dest)?.occupants.push(id);
        self.actor_mut(id)?.location = dest;
        self.pending_events
            .push(WorldEvent::OccupantArrived { room: dest, actor: id });
        Ok(())
    }

    /// Removes an actor from the world entirely (mob destruction).
    pub fn remove_actor(&mut self, id: ActorId) -> Result<()> {
        let room = self.actor(id)?.location;
        self.room_mut(room)?.occupants.retain(|o| *o != id);
        self.actors.remove(&id);
        self.pending_events.push(WorldEvent::MobRemoved { actor: id });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub fn give_item(&mut self, actor: ActorId, item: ItemId) -> Result<()> {
        self.item(item)?;
        self.actor_mut(actor)?.inventory.push(item);
        Ok(())
    }

    /// Moves an item from an actor's hands to a room floor.
    pub fn drop_item(&mut self, holder: ActorId, item: ItemId, room: RoomId) -> Result<()> {
        self.actor_mut(holder)?.inventory.retain(|i| *i != item);
        self.room_mut(room)?.items.push(item);
        Ok(())
    }

    /// Places a fresh item directly on a room floor.
    pub fn place_item(&mut self, room: RoomId, spec: ItemSpec) -> Result<ItemId> {
        let id = self.add_item(spec);
        self.room_mut(room)?.items.push(id);
        Ok(id)
    }

    /// Destroys an item wherever it is.
    pub fn destroy_item(&mut self, id: ItemId) {
        for actor in self.actors.values_mut() {
            actor.inventory.retain(|i| *i != id);
        }
        for room in self.rooms.values_mut() {
            room.items.retain(|i| *i != id);
        }
        self.items.remove(&id);
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn publish(&mut self, event: WorldEvent) {
        self.pending_events.push(event);
    }

    /// Drains everything published since the last drain.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
