//! Spell effect dispatch.
//!
//! A pure lookup from effect kind to handler. Kinds without a handler are
//! deliberate no-ops, not errors; the enum is the extension point for
//! future rulesets. Damage from effects goes through the same health
//! mutation entry point as every weapon and claw.

use crate::combat::apply_health_delta;
use crate::env::{Dice, Services};
use crate::error::Result;
use crate::spell::{SpellEffect, SpellEffectKind};
use crate::types::ActorId;
use crate::world::WorldState;

/// Applies one declared effect of a spell.
pub fn apply_effect(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    effect: &SpellEffect,
    caster_id: ActorId,
    target: Option<ActorId>,
) -> Result<()> {
    match effect.kind {
        SpellEffectKind::Hurt => apply_hurt(world, svc, effect, caster_id, target),

        // No-op kinds in the current ruleset; handlers slot in here.
        SpellEffectKind::CurePoison
        | SpellEffectKind::Strength
        | SpellEffectKind::Speed
        | SpellEffectKind::Invisible
        | SpellEffectKind::SeeInvisible
        | SpellEffectKind::Heal
        | SpellEffectKind::Sleep
        | SpellEffectKind::Push
        | SpellEffectKind::Announce
        | SpellEffectKind::Command
        | SpellEffectKind::DistanceHurt
        | SpellEffectKind::DetectMagic
        | SpellEffectKind::FindPerson
        | SpellEffectKind::Locate
        | SpellEffectKind::Weaken
        | SpellEffectKind::Slow => Ok(()),
    }
}

/// Level-scaled direct damage.
///
/// `damage = (base + level_base * level) + uniform(0..=rand + level_rand *
/// level)`. Room-wide effects hit every other occupant; `affects_caster`
/// additionally hits the caster, with no damager credited.
fn apply_hurt(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    effect: &SpellEffect,
    caster_id: ActorId,
    target: Option<ActorId>,
) -> Result<()> {
    let caster = world.actor(caster_id)?;
    let level = caster.level(svc.xp) as i32;
    let caster_room = caster.location;

    let [base, level_base, rand, level_rand] = effect.params;
    let base_damage = base + level_base * level;
    let random_range = (rand + level_rand * level).max(0) as u32;
    let damage = base_damage + svc.dice.up_to(random_range) as i32;

    if effect.affects_room {
        let occupants: Vec<ActorId> = world
            .occupants(caster_room)?
            .iter()
            .copied()
            .filter(|id| *id != caster_id)
            .collect();
        for occupant in occupants {
            apply_health_delta(world, svc, occupant, -damage, Some(caster_id), None)?;
        }
    } else if let Some(target_id) = target {
        if world.contains_actor(target_id) {
            apply_health_delta(world, svc, target_id, -damage, Some(caster_id), None)?;
        }
    }

    if effect.affects_caster {
        apply_health_delta(world, svc, caster_id, -damage, None, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::testutil::{TestServices, TestWorld};

    fn hurt(params: [i32; 4]) -> SpellEffect {
        SpellEffect::new(SpellEffectKind::Hurt, params)
    }

    #[test]
    fn hurt_scales_with_caster_level() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        // Level 2 at 2000 xp.
        let caster = tw.player_with_xp("Renn", 2000);
        let target = tw.player("Grak");
        // 5 + 3*2 = 11 base, random range 4 + 1*2 = 6, roll 6.
        ts.dice = ScriptedDice::new([6]);

        apply_effect(
            &mut tw.world,
            &mut ts.svc(),
            &hurt([5, 3, 4, 1]),
            caster,
            Some(target),
        )
        .expect("effect");
        assert_eq!(tw.world.actor(target).unwrap().health, 1000 - 17);
    }

    #[test]
    fn room_wide_hurt_spares_the_caster() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let bystander = tw.player("Grak");
        let mob_id = tw.mob("gnarl", |t| t.health(100, 0));

        apply_effect(
            &mut tw.world,
            &mut ts.svc(),
            &hurt([10, 0, 0, 0]).room_wide(),
            caster,
            None,
        )
        .expect("effect");

        assert_eq!(tw.world.actor(caster).unwrap().health, 1000);
        assert_eq!(tw.world.actor(bystander).unwrap().health, 990);
        assert_eq!(tw.world.actor(mob_id).unwrap().health, 90);
    }

    #[test]
    fn rebounding_hurt_also_damages_the_caster() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");

        apply_effect(
            &mut tw.world,
            &mut ts.svc(),
            &hurt([10, 0, 0, 0]).rebounds(),
            caster,
            Some(target),
        )
        .expect("effect");

        assert_eq!(tw.world.actor(target).unwrap().health, 990);
        assert_eq!(tw.world.actor(caster).unwrap().health, 990);
    }

    #[test]
    fn unhandled_kinds_are_silent_noops() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");

        for kind in [
            SpellEffectKind::Strength,
            SpellEffectKind::Invisible,
            SpellEffectKind::DetectMagic,
        ] {
            apply_effect(
                &mut tw.world,
                &mut ts.svc(),
                &SpellEffect::new(kind, [99, 99, 99, 99]),
                caster,
                Some(target),
            )
            .expect("noop");
        }
        assert_eq!(tw.world.actor(target).unwrap().health, 1000);
        assert!(ts.sink.take().is_empty());
    }

    #[test]
    fn missing_target_is_tolerated() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");

        apply_effect(
            &mut tw.world,
            &mut ts.svc(),
            &hurt([10, 0, 0, 0]),
            caster,
            None,
        )
        .expect("no target, no effect");
    }
}
