//! The single health mutation point.
//!
//! No other code path may write an actor's health. Damage, healing, spell
//! effects, and poison drain all land here, which is what makes death
//! detection reliable: the moment health reaches zero this function cancels
//! the victim's in-flight actions and runs the death cascade, atomically
//! from the caller's perspective.

use crate::combat::{death, messages};
use crate::env::{MessageSink, Services};
use crate::error::Result;
use crate::mob;
use crate::stats;
use crate::types::ActorId;
use crate::vitals::MIN_HEALTH;
use crate::world::{WorldEvent, WorldState};

/// Applies a health delta to an actor.
///
/// Negative deltas clamp at the floor and may trigger death handling;
/// positive deltas clamp at the actor's max health and never do. The
/// damager and weapon name, when known, flow into the death broadcast.
pub fn apply_health_delta(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    actor_id: ActorId,
    delta: i32,
    damager: Option<ActorId>,
    weapon_name: Option<&str>,
) -> Result<()> {
    let actor = world.actor(actor_id)?;
    let max_health = stats::snapshot(world, actor, svc.xp).max_health;

    if delta < 0 {
        if actor.is_dead() {
            // Already resolved elsewhere; nothing further may happen.
            return Ok(());
        }
        let name = actor.name.clone();
        let location = actor.location;
        let is_player = actor.is_player();

        let new_health = (actor.health + delta).max(MIN_HEALTH).min(max_health);
        world.actor_mut(actor_id)?.health = new_health;

        if is_player {
            svc.messages
                .notify(actor_id, &format!("You take {} damage.", -delta));
            svc.messages
                .notify(actor_id, &messages::health_msg("You", new_health));
        }
        svc.messages.notify_room(
            location,
            &messages::health_msg(&name, new_health),
            &[actor_id],
        );

        if new_health <= 0 {
            // Suppress anything the victim still had in flight.
            world.actor_mut(actor_id)?.transient.cancel_actions();
            if is_player {
                death::character_death(world, svc, actor_id, damager, weapon_name)?;
            } else {
                death::mob_death(world, svc, actor_id, damager)?;
            }
            world.publish(WorldEvent::ActorDied {
                actor: actor_id,
                killer: damager,
            });
        } else if !is_player {
            // A mob that survives a hit turns on its attacker.
            let needs_aggro = match world.actor_mut(actor_id)?.mob_mut() {
                Some(sheet) if sheet.state != mob::BehaviorState::Attacking => {
                    sheet.config.aggressive = true;
                    true
                }
                _ => false,
            };
            if needs_aggro {
                mob::start_attacking(world, svc.scheduler, actor_id)?;
            }
        }
    } else {
        let actor = world.actor_mut(actor_id)?;
        let name = actor.name.clone();
        let location = actor.location;
        let is_player = actor.is_player();
        actor.health = (actor.health + delta).min(max_health).max(MIN_HEALTH);
        let new_health = actor.health;

        if is_player {
            svc.messages
                .notify(actor_id, &messages::health_msg("You", new_health));
        }
        svc.messages.notify_room(
            location,
            &messages::health_msg(&name, new_health),
            &[actor_id],
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{TestServices, TestWorld};

    #[test]
    fn damage_clamps_at_zero_and_heal_at_max() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("damage");
        // Dead and relocated, but never negative.
        assert_eq!(tw.world.actor(player).unwrap().health, 0);

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, 9999, None, None).expect("heal");
        assert_eq!(tw.world.actor(player).unwrap().health, 1000);
    }

    #[test]
    fn damage_on_already_dead_actor_is_a_silent_noop() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");
        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("kill");
        let broadcasts_before = ts.sink.broadcasts().len();

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -10, None, None).expect("noop");
        // No second death cascade.
        assert_eq!(ts.sink.broadcasts().len(), broadcasts_before);
        assert_eq!(tw.world.actor(player).unwrap().health, 0);
    }

    #[test]
    fn lethal_damage_cancels_in_flight_actions() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");
        {
            let actor = tw.world.actor_mut(player).unwrap();
            actor.transient.active_action = Some("attack".to_string());
            actor.transient.queued_actions.push_back("flee".to_string());
        }

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, -5000, None, None)
            .expect("kill");
        let transient = &tw.world.actor(player).unwrap().transient;
        assert!(transient.active_action.is_none());
        assert!(transient.queued_actions.is_empty());
    }

    #[test]
    fn surviving_mob_aggros_its_attacker() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let mob_id = tw.mob("gnarl", |t| t.health(50, 0));

        apply_health_delta(&mut tw.world, &mut ts.svc(), mob_id, -10, None, None)
            .expect("damage");
        let sheet = tw.world.actor(mob_id).unwrap().mob().unwrap();
        assert_eq!(sheet.state, mob::BehaviorState::Attacking);
    }

    #[test]
    fn heal_messages_report_new_health() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let player = tw.player("Renn");
        tw.world.actor_mut(player).unwrap().health = 500;

        apply_health_delta(&mut tw.world, &mut ts.svc(), player, 100, None, None).expect("heal");
        let texts = ts.sink.texts_for(player);
        assert!(texts.contains(&"You now have 600 health.".to_string()));
    }
}
