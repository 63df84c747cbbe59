//! Shared fixtures for unit tests.

use crate::actor::{Actor, CharacterClass, MobSheet};
use crate::env::{
    FixedSaves, MemoryMobCatalog, MemorySink, MobTemplateBuilder, RecordingScheduler,
    ScriptedDice, Services, ThresholdCurve,
};
use crate::env::MobTemplate;
use crate::types::{ActorId, ItemId, RoomId};
use crate::world::{ItemSpec, Room, WorldState};

/// A world with a Void room and one starting room.
pub(crate) struct TestWorld {
    pub world: WorldState,
    pub room: RoomId,
}

impl TestWorld {
    pub fn new() -> Self {
        let mut world = WorldState::new();
        world.void_room = world.add_room(Room::new("The Void"));
        let room = world.add_room(Room::new("dusty crossroads"));
        Self { world, room }
    }

    pub fn player(&mut self, name: &str) -> ActorId {
        self.player_with_class(name, CharacterClass::fighter(), 0)
    }

    pub fn player_with_xp(&mut self, name: &str, xp: i64) -> ActorId {
        self.player_with_class(name, CharacterClass::fighter(), xp)
    }

    pub fn player_with_class(&mut self, name: &str, class: CharacterClass, xp: i64) -> ActorId {
        let room = self.room;
        self.spawn_player(name, room, class, xp)
    }

    pub fn player_in(&mut self, name: &str, room: RoomId) -> ActorId {
        self.spawn_player(name, room, CharacterClass::fighter(), 0)
    }

    fn spawn_player(&mut self, name: &str, room: RoomId, class: CharacterClass, xp: i64) -> ActorId {
        let id = self.world.allocate_actor_id();
        self.world
            .add_actor(Actor::new_player(id, name, room, class, xp))
            .expect("room exists");
        self.world.drain_events();
        id
    }

    pub fn mob(
        &mut self,
        name: &str,
        customize: impl FnOnce(MobTemplateBuilder) -> MobTemplateBuilder,
    ) -> ActorId {
        let room = self.room;
        self.mob_in(name, room, customize)
    }

    pub fn mob_in(
        &mut self,
        name: &str,
        room: RoomId,
        customize: impl FnOnce(MobTemplateBuilder) -> MobTemplateBuilder,
    ) -> ActorId {
        let template: MobTemplate = customize(MobTemplate::builder(name)).build();
        let sheet = MobSheet::from_template(&template, template.base_health);
        let id = self.world.allocate_actor_id();
        self.world
            .add_actor(Actor::new_mob(id, name, room, sheet))
            .expect("room exists");
        self.world.drain_events();
        id
    }

    /// Creates an item, hands it to the player, and equips it.
    pub fn equip(&mut self, player: ActorId, spec: ItemSpec) -> ItemId {
        let id = self.world.add_item(spec);
        self.world.give_item(player, id).expect("give");
        let item = self.world.item(id).expect("item").clone();
        let sheet = self
            .world
            .actor_mut(player)
            .expect("player")
            .player_mut()
            .expect("player sheet");
        sheet.equipment.equip(&item);
        id
    }
}

/// Collaborator doubles: recording sink and scheduler, fixed saves,
/// threshold curve, empty catalog, scripted dice.
pub(crate) struct TestServices {
    pub sink: MemorySink,
    pub saves: FixedSaves,
    pub curve: ThresholdCurve,
    pub scheduler: RecordingScheduler,
    pub catalog: MemoryMobCatalog,
    pub dice: ScriptedDice,
}

impl TestServices {
    pub fn new() -> Self {
        Self {
            sink: MemorySink::new(),
            saves: FixedSaves(true),
            curve: ThresholdCurve,
            scheduler: RecordingScheduler::new(),
            catalog: MemoryMobCatalog::empty(),
            dice: ScriptedDice::new([]),
        }
    }

    pub fn svc(&mut self) -> Services<'_> {
        Services {
            messages: &self.sink,
            saves: &self.saves,
            xp: &self.curve,
            scheduler: &self.scheduler,
            catalog: &self.catalog,
            dice: &mut self.dice,
        }
    }
}
