//! Experience mutators for player characters.
//!
//! The curve itself belongs to the `ExperienceCurve` collaborator; these
//! helpers just write the new total and announce level changes.

use crate::env::{ExperienceCurve, MessageSink, Services};
use crate::error::Result;
use crate::types::ActorId;
use crate::world::WorldState;

/// Experience total a player can never drop below by *gaining*.
const GAIN_FLOOR: i64 = 1000;

/// Grants experience. Gains are floored so a fresh character always ends
/// up with at least the first-level total.
pub fn gain_xp(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    actor_id: ActorId,
    amount: i64,
) -> Result<()> {
    let Some(sheet) = world.actor(actor_id)?.player() else {
        return Ok(());
    };
    let new_xp = (sheet.xp + amount).max(GAIN_FLOOR);
    set_xp(world, svc, actor_id, new_xp)
}

/// Sets the experience total directly (death halving uses this; no floor).
pub fn set_xp(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    actor_id: ActorId,
    new_xp: i64,
) -> Result<()> {
    let actor = world.actor_mut(actor_id)?;
    let Some(sheet) = actor.player_mut() else {
        return Ok(());
    };
    let old_level = svc.xp.level_from_xp(sheet.xp);
    sheet.xp = new_xp;
    let new_level = svc.xp.level_from_xp(new_xp);
    if old_level != new_level {
        svc.messages
            .notify(actor_id, &format!("You are now level {new_level}."));
    }
    Ok(())
}
