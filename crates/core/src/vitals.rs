//! Vital regeneration ticks.
//!
//! Health and mana tick back on their own recurring subscriptions. Poison
//! inverts the health tick: a poisoned actor bleeds instead of healing,
//! through the same single health mutation point as everything else.

use crate::combat::apply_health_delta;
use crate::env::Services;
use crate::error::Result;
use crate::stats;
use crate::types::ActorId;
use crate::world::WorldState;

/// Health floor for every actor.
pub const MIN_HEALTH: i32 = 0;

/// Health lost per regeneration tick while poisoned.
pub const POISON_TICK_DAMAGE: i32 = 5;

/// One health-regeneration tick. `player_amount` is the configured regain
/// for player characters; mobs use their own heal amount. Resting doubles
/// the regain. Stale subjects are tolerated.
pub fn health_regen_tick(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    actor_id: ActorId,
    player_amount: i32,
) -> Result<()> {
    if !world.contains_actor(actor_id) {
        return Ok(());
    }
    let actor = world.actor(actor_id)?;
    if actor.is_dead() {
        return Ok(());
    }

    if actor.poisoned {
        return apply_health_delta(
            world,
            svc,
            actor_id,
            -POISON_TICK_DAMAGE,
            None,
            Some("poison"),
        );
    }

    let mut amount = actor.mob().map(|s| s.heal_amount).unwrap_or(player_amount);
    if actor.transient.resting {
        amount *= 2;
    }
    let max_health = stats::snapshot(world, actor, svc.xp).max_health;
    if amount > 0 && actor.health < max_health {
        apply_health_delta(world, svc, actor_id, amount, None, None)?;
    }
    Ok(())
}

/// One mana-regeneration tick. Mana is not combat-critical, so it is
/// written directly rather than through the health pipeline.
pub fn mana_regen_tick(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    actor_id: ActorId,
    amount: i32,
) -> Result<()> {
    if !world.contains_actor(actor_id) {
        return Ok(());
    }
    let actor = world.actor(actor_id)?;
    if actor.is_dead() {
        return Ok(());
    }
    let max_mana = stats::snapshot(world, actor, svc.xp).max_mana;
    let actor = world.actor_mut(actor_id)?;
    actor.mana = (actor.mana + amount).min(max_mana).max(0);
    Ok(())
}
