//! Chance-based mob spawning.
//!
//! A generator tick is anchored to a subject actor; each firing may spawn
//! a mob in the subject's room, scaled to the subject's level. Rooms
//! flagged as monster generators spawn more eagerly; no-combat rooms never
//! spawn. A catalog with no eligible template is an expected outcome, not
//! an error.

use crate::actor::{Actor, MobSheet};
use crate::env::{Dice, MessageSink, MobCatalog, Services};
use crate::error::Result;
use crate::mob::behavior;
use crate::types::{ActorId, RoomId};
use crate::world::{RoomFlags, WorldState};

/// Baseline spawn chance (percent) in unflagged rooms.
const DEFAULT_SPAWN_CHANCE: u32 = 1;

/// One generator tick for the given subject. Stale subjects are tolerated.
pub fn generator_tick(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    subject: ActorId,
) -> Result<()> {
    if !world.contains_actor(subject) {
        return Ok(());
    }
    let actor = world.actor(subject)?;
    let room_id = actor.location;
    let level = actor.level(svc.xp);

    let room = world.room(room_id)?;
    if room.flags.contains(RoomFlags::NO_COMBAT) {
        // Never spawn in a no-combat room.
        return Ok(());
    }
    let chance = if room.flags.contains(RoomFlags::MONSTER_GENERATOR) {
        room.generator_magnitude
    } else {
        DEFAULT_SPAWN_CHANCE
    };

    if svc.dice.percent() < chance {
        spawn_in(world, svc, room_id, level)?;
    }
    Ok(())
}

/// Spawns a random eligible mob in a room. Returns `None` when the
/// catalog has nothing suitable.
pub fn spawn_in(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    room: RoomId,
    level: u32,
) -> Result<Option<ActorId>> {
    let candidates = svc.catalog.eligible(level);
    if candidates.is_empty() {
        return Ok(None);
    }
    let template = &candidates[svc.dice.index(candidates.len())];

    let rolled_health =
        template.base_health + svc.dice.up_to(template.random_health.max(0) as u32) as i32;
    let sheet = MobSheet::from_template(template, rolled_health);
    let id = world.allocate_actor_id();
    world.add_actor(Actor::new_mob(id, template.key.clone(), room, sheet))?;
    svc.messages
        .notify_room(room, &format!("A {} appears!", template.key), &[]);

    behavior::activate(world, svc, id)?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MemoryMobCatalog, MobTemplate, ScriptedDice, TickKind};
    use crate::mob::BehaviorState;
    use crate::testutil::{TestServices, TestWorld};
    use crate::world::Room;

    fn catalog() -> MemoryMobCatalog {
        MemoryMobCatalog::new(vec![
            MobTemplate::builder("rat").min_level(0).health(20, 10).build(),
            MobTemplate::builder("troll").min_level(5).build(),
        ])
    }

    #[test]
    fn spawn_rolls_health_and_activates_patrol() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = catalog();
        // Index draw picks the rat, health roll lands on 7.
        ts.dice = ScriptedDice::new([0, 7]);

        let room = tw.room;
        let id = spawn_in(&mut tw.world, &mut ts.svc(), room, 2)
            .expect("spawn")
            .expect("template found");

        let actor = tw.world.actor(id).unwrap();
        assert_eq!(actor.name, "rat");
        assert_eq!(actor.health, 27);
        assert_eq!(actor.mob().unwrap().state, BehaviorState::Patrolling);
        assert!(ts.scheduler.interval(id, TickKind::Behavior).is_some());
        assert!(ts.scheduler.interval(id, TickKind::HealthRegen).is_some());
        assert!(
            ts.sink
                .room_texts(room)
                .contains(&"A rat appears!".to_string())
        );
    }

    #[test]
    fn spawn_with_no_eligible_template_is_a_silent_noop() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = MemoryMobCatalog::empty();
        let room = tw.room;

        let spawned = spawn_in(&mut tw.world, &mut ts.svc(), room, 2).expect("ok");
        assert!(spawned.is_none());
        assert!(ts.sink.take().is_empty());
    }

    #[test]
    fn generator_never_fires_in_no_combat_rooms() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = catalog();
        let sanctuary = tw
            .world
            .add_room(Room::new("sanctuary").with_flags(RoomFlags::NO_COMBAT));
        let player = tw.player_in("Renn", sanctuary);
        tw.world.drain_events();
        // A roll that would otherwise always spawn.
        ts.dice = ScriptedDice::new([0]);

        generator_tick(&mut tw.world, &mut ts.svc(), player).expect("tick");
        assert_eq!(tw.world.actors().filter(|a| a.is_mob()).count(), 0);
    }

    #[test]
    fn generator_rooms_use_their_magnitude() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = catalog();
        let den = tw.world.add_room(Room::new("den").with_generator(50));
        let player = tw.player_in("Renn", den);
        tw.world.drain_events();
        // 49 < 50 fires; then template index 0, health roll 0.
        ts.dice = ScriptedDice::new([49, 0, 0]);

        generator_tick(&mut tw.world, &mut ts.svc(), player).expect("tick");
        assert_eq!(tw.world.actors().filter(|a| a.is_mob()).count(), 1);
    }

    #[test]
    fn plain_rooms_spawn_at_one_percent() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = catalog();
        let player = tw.player("Renn");
        // 1 >= 1: misses the 1% chance.
        ts.dice = ScriptedDice::new([1]);

        generator_tick(&mut tw.world, &mut ts.svc(), player).expect("tick");
        assert_eq!(tw.world.actors().filter(|a| a.is_mob()).count(), 0);
    }

    #[test]
    fn low_level_subject_never_draws_high_level_mobs() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        ts.catalog = catalog();
        ts.dice = ScriptedDice::new([1, 0]);

        let room = tw.room;
        let id = spawn_in(&mut tw.world, &mut ts.svc(), room, 2)
            .expect("spawn")
            .expect("found");
        // Only the rat is eligible at level 2, whatever the index draw.
        assert_eq!(tw.world.actor(id).unwrap().name, "rat");
    }
}
