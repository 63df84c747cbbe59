//! Death and its consequences.
//!
//! Invoked exactly once per death, synchronously from the health mutation
//! point. Players are reset and relocated to the Void; mobs are removed
//! from the world outright.

use crate::actor::Equipment;
use crate::combat::xp;
use crate::env::{ExperienceCurve, MessageSink, Services, TickKind, TickScheduler};
use crate::error::Result;
use crate::types::ActorId;
use crate::world::{ItemSpec, WorldState};

/// Builds the world-visible death announcement. Wording varies by which
/// of killer and weapon are known.
fn death_broadcast(victim: &str, killer: Option<&str>, weapon: Option<&str>) -> String {
    match (killer, weapon) {
        (Some(k), Some(w)) => format!("{victim} has been slain by {k}'s {w}."),
        (Some(k), None) => format!("{victim} has been slain by {k}."),
        (None, Some(w)) => format!("{victim} has been slain by a {w}."),
        (None, None) => format!("{victim} has died of mysterious causes."),
    }
}

/// Awards kill experience when the killer is a player.
fn award_kill_xp(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    killer: Option<ActorId>,
    victim_name: &str,
    victim_xp: i64,
) -> Result<()> {
    let Some(killer_id) = killer else {
        return Ok(());
    };
    let Ok(killer_actor) = world.actor(killer_id) else {
        return Ok(());
    };
    let Some(sheet) = killer_actor.player() else {
        return Ok(());
    };
    svc.messages
        .notify(killer_id, &format!("You killed {victim_name}!"));
    let award = svc.xp.kill_award(sheet.xp, victim_xp);
    xp::gain_xp(world, svc, killer_id, award)
}

/// Full death handling for a player character.
pub fn character_death(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    victim_id: ActorId,
    killer: Option<ActorId>,
    weapon_name: Option<&str>,
) -> Result<()> {
    let victim = world.actor(victim_id)?;
    let victim_name = victim.name.clone();
    let victim_room = victim.location;
    let victim_xp = victim.player().map(|s| s.xp).unwrap_or(0);

    let killer_name = killer
        .and_then(|k| world.actor(k).ok())
        .map(|a| a.name.clone());
    svc.messages.broadcast(&death_broadcast(
        &victim_name,
        killer_name.as_deref(),
        weapon_name,
    ));

    award_kill_xp(world, svc, killer, &victim_name, victim_xp)?;

    // Drop everything of worth where the victim fell; destroy the rest.
    let held: Vec<_> = world.actor(victim_id)?.inventory.clone();
    for item_id in held {
        let Ok(item) = world.item(item_id) else {
            continue;
        };
        if item.worth() > 0 && item.spec.droppable {
            let key = item.key().to_string();
            world.drop_item(victim_id, item_id, victim_room)?;
            svc.messages
                .notify(victim_id, &format!("You drop {key}."));
            svc.messages.notify_room(
                victim_room,
                &format!("{victim_name} drops {key}."),
                &[victim_id],
            );
        } else {
            world.destroy_item(item_id);
        }
    }

    // Off to the holding area.
    svc.messages.notify_room(
        victim_room,
        &format!("{victim_name} disappears in a cloud of greasy black smoke."),
        &[victim_id],
    );
    let void = world.void_room;
    world.move_actor(victim_id, void)?;

    // The survivor keeps half their experience.
    xp::set_xp(world, svc, victim_id, victim_xp / 2)?;

    // One-shot reset of everything transient.
    let starting_gold = world.starting_gold;
    let actor = world.actor_mut(victim_id)?;
    actor.transient.reset();
    actor.mana = 0;
    actor.poisoned = false;
    if let Some(sheet) = actor.player_mut() {
        sheet.equipment = Equipment::empty();
        sheet.gold = starting_gold;
    }
    svc.messages.notify(
        victim_id,
        &format!("You find {starting_gold} gold in your pocket."),
    );

    Ok(())
}

/// Death handling for a mob: reward, drops, then removal from the world.
pub fn mob_death(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    mob_id: ActorId,
    killer: Option<ActorId>,
) -> Result<()> {
    let mob = world.actor(mob_id)?;
    let mob_name = mob.name.clone();
    let mob_room = mob.location;
    let Some(sheet) = mob.mob() else {
        return Ok(());
    };
    let mob_xp = sheet.xp;
    let drop_gold = sheet.drop_gold;
    let drop_item = sheet.drop_item.clone();

    award_kill_xp(world, svc, killer, &mob_name, mob_xp)?;

    svc.messages.notify_room(
        mob_room,
        &format!("{mob_name} disappears in a cloud of greasy black smoke."),
        &[mob_id],
    );

    if drop_gold > 0 {
        world.place_item(mob_room, ItemSpec::trinket("pile of gold", drop_gold))?;
    }
    if let Some(spec) = drop_item {
        world.place_item(mob_room, spec)?;
    }

    // Stop every recurring tick before the actor disappears.
    svc.scheduler.unsubscribe(mob_id, TickKind::Behavior);
    svc.scheduler.unsubscribe(mob_id, TickKind::HealthRegen);
    svc.scheduler.unsubscribe(mob_id, TickKind::ManaRegen);

    world.remove_actor(mob_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::apply_health_delta;
    use crate::env::Delivery;
    use crate::testutil::{TestServices, TestWorld};
    use crate::world::ItemSpec;

    #[test]
    fn broadcast_varies_by_known_facts() {
        assert_eq!(
            death_broadcast("Renn", Some("Grak"), Some("club")),
            "Renn has been slain by Grak's club."
        );
        assert_eq!(
            death_broadcast("Renn", Some("Grak"), None),
            "Renn has been slain by Grak."
        );
        assert_eq!(
            death_broadcast("Renn", None, Some("club")),
            "Renn has been slain by a club."
        );
        assert_eq!(
            death_broadcast("Renn", None, None),
            "Renn has died of mysterious causes."
        );
    }

    #[test]
    fn death_halves_xp_exactly_once_and_resets_state() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player_with_xp("Renn", 4000);
        {
            let actor = tw.world.actor_mut(player).unwrap();
            actor.mana = 40;
            actor.poisoned = true;
            actor.transient.hiding = 2;
            actor.transient.resting = true;
            actor.transient.frozen_until = 99;
        }

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("kill");

        let actor = tw.world.actor(player).unwrap();
        assert_eq!(actor.player().unwrap().xp, 2000);
        assert_eq!(actor.mana, 0);
        assert!(!actor.poisoned);
        assert!(!actor.is_hiding());
        assert!(!actor.transient.resting);
        assert_eq!(actor.transient.frozen_until, 0);
        assert_eq!(actor.location, tw.world.void_room);
        assert_eq!(actor.player().unwrap().gold, tw.world.starting_gold);
        assert_eq!(ts.sink.broadcasts().len(), 1);
    }

    #[test]
    fn worthless_items_are_destroyed_and_valuables_dropped() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");
        let home = tw.room;
        let worthless = tw.world.add_item(ItemSpec::trinket("pebble", 0));
        let valuable = tw.world.add_item(ItemSpec::trinket("ruby", 5));
        tw.world.give_item(player, worthless).unwrap();
        tw.world.give_item(player, valuable).unwrap();

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("kill");

        assert!(tw.world.item(worthless).is_err());
        assert!(tw.world.room(home).unwrap().items.contains(&valuable));
        assert!(
            ts.sink
                .room_texts(home)
                .iter()
                .any(|t| t == "Renn drops ruby.")
        );
    }

    #[test]
    fn bound_items_are_destroyed_not_dropped() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");
        let bound = tw.world.add_item(ItemSpec::trinket("soul shard", 50).bound());
        tw.world.give_item(player, bound).unwrap();

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("kill");
        assert!(tw.world.item(bound).is_err());
    }

    #[test]
    fn killer_gets_award_and_notification() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let killer = tw.player_with_xp("Grak", 1000);
        let victim = tw.player_with_xp("Renn", 4000);

        apply_health_delta(
            &mut tw.world,
            &mut ts.svc(),
            victim,
            -5000,
            Some(killer),
            Some("club"),
        )
        .expect("kill");

        assert!(
            ts.sink
                .texts_for(killer)
                .contains(&"You killed Renn!".to_string())
        );
        // ThresholdCurve: killer behind victim, award = 4000 / 10.
        assert_eq!(
            tw.world.actor(killer).unwrap().player().unwrap().xp,
            1000 + 400
        );
        assert!(
            ts.sink
                .broadcasts()
                .contains(&"Renn has been slain by Grak's club.".to_string())
        );
    }

    #[test]
    fn mob_death_removes_mob_and_stops_ticks() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let home = tw.room;
        let mob_id = tw.mob("gnarl", |t| t.health(30, 0).drops(25, Some("fang")));
        crate::mob::activate(&mut tw.world, &mut ts.svc(), mob_id).expect("activate");
        assert!(ts.scheduler.count_for(mob_id) > 0);

        apply_health_delta(&mut tw.world, &mut ts.svc(), mob_id, -100, None, None)
            .expect("kill");

        assert!(!tw.world.contains_actor(mob_id));
        assert_eq!(ts.scheduler.count_for(mob_id), 0);
        let floor: Vec<_> = tw
            .world
            .room(home)
            .unwrap()
            .items
            .iter()
            .map(|i| tw.world.item(*i).unwrap().key().to_string())
            .collect();
        assert!(floor.contains(&"pile of gold".to_string()));
        assert!(floor.contains(&"fang".to_string()));
        // No global broadcast for mobs, just the room message.
        assert!(ts.sink.broadcasts().is_empty());
        assert!(ts.sink.take().iter().any(|d| matches!(
            d,
            Delivery::Room { text, .. } if text.contains("disappears in a cloud")
        )));
    }
}
