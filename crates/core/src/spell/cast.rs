//! Cast eligibility and the casting sequence.
//!
//! `can_cast` and `cast` share the same four ordered checks: class, group,
//! level, mana. Each failing check rejects with a caster-visible reason
//! and changes nothing. A failed casting roll also changes nothing: mana
//! is only deducted once the spell is known to go off.

use crate::env::{Dice, MessageSink, Services};
use crate::error::Result;
use crate::spell::{Spell, apply_effect};
use crate::types::ActorId;
use crate::world::WorldState;

/// Why a cast attempt was rejected, phrased for the caster.
fn eligibility_failure(
    world: &WorldState,
    svc: &Services<'_>,
    caster_id: ActorId,
    spell: &Spell,
) -> Result<Option<String>> {
    let caster = world.actor(caster_id)?;
    let level = caster.level(svc.xp);

    let class = caster.player().map(|s| &s.class);
    if let Some(required) = &spell.class_key {
        if class.map(|c| &c.key) != Some(required) {
            return Ok(Some(
                "You are the wrong class to cast that spell.".to_string(),
            ));
        }
    }
    if let Some(required) = &spell.group {
        if class.map(|c| &c.group) != Some(required) {
            return Ok(Some(
                "You are the wrong group to cast that spell.".to_string(),
            ));
        }
    }
    if spell.min_level > level {
        return Ok(Some(format!(
            "Your level is too low to cast {}.",
            spell.key
        )));
    }
    if spell.mana_cost_at(level) > caster.mana {
        return Ok(Some("You do not have enough mana.".to_string()));
    }
    Ok(None)
}

/// Checks whether the caster could cast the spell right now, telling the
/// caster why not when the answer is no.
pub fn can_cast(
    world: &WorldState,
    svc: &mut Services<'_>,
    caster_id: ActorId,
    spell: &Spell,
) -> Result<bool> {
    match eligibility_failure(world, svc, caster_id, spell)? {
        Some(reason) => {
            svc.messages.notify(caster_id, &reason);
            Ok(false)
        }
        None => Ok(true),
    }
}

/// Casts a spell, applying every declared effect in order on success.
pub fn cast(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    caster_id: ActorId,
    spell: &Spell,
    target: Option<ActorId>,
) -> Result<()> {
    if let Some(reason) = eligibility_failure(world, svc, caster_id, spell)? {
        svc.messages.notify(caster_id, &reason);
        return Ok(());
    }

    // Casting in the open: reveal before anything else happens.
    if spell.reveals && world.actor(caster_id)?.is_hiding() {
        world.actor_mut(caster_id)?.transient.reveal();
    }

    // The spell may simply fizzle. Nothing has been spent yet.
    if spell.failure_chance > 0 && svc.dice.percent() < spell.failure_chance {
        let text = spell
            .failure_desc
            .as_deref()
            .unwrap_or("Your spell failed!");
        svc.messages.notify(caster_id, text);
        return Ok(());
    }

    let caster = world.actor(caster_id)?;
    let caster_name = caster.name.clone();
    let caster_room = caster.location;
    let cost = spell.mana_cost_at(caster.level(svc.xp));
    let caster = world.actor_mut(caster_id)?;
    caster.mana = (caster.mana - cost).max(0);

    svc.messages
        .notify(caster_id, &format!("You cast {}.", spell.key));
    svc.messages.notify_room(
        caster_room,
        &format!("{caster_name} casts {}.", spell.key),
        &[caster_id],
    );
    if let Some(desc) = &spell.caster_desc {
        svc.messages.notify(caster_id, desc);
    }
    if let Some(desc) = &spell.victim_desc {
        let desc = desc.replace('#', &caster_name);
        if spell.affects_room {
            svc.messages.notify_room(caster_room, &desc, &[caster_id]);
        } else if let Some(target_id) = target {
            svc.messages.notify(target_id, &desc);
        }
    }

    // Effects are independent; one outcome never gates a later effect.
    for effect in &spell.effects {
        apply_effect(world, svc, effect, caster_id, target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::spell::{SpellEffect, SpellEffectKind};
    use crate::testutil::{TestServices, TestWorld};

    fn zap() -> Spell {
        Spell::new("zap")
            .mana_cost(10, 0)
            .with_effect(SpellEffect::new(SpellEffectKind::Hurt, [10, 0, 0, 0]))
    }

    #[test]
    fn wrong_class_is_rejected_without_side_effects() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");
        let spell = zap().for_class("necromancer");

        cast(&mut tw.world, &mut ts.svc(), caster, &spell, Some(target)).expect("cast");

        assert_eq!(
            ts.sink.texts_for(caster),
            vec!["You are the wrong class to cast that spell.".to_string()]
        );
        assert_eq!(tw.world.actor(caster).unwrap().mana, 50);
        assert_eq!(tw.world.actor(target).unwrap().health, 1000);
    }

    #[test]
    fn wrong_group_is_rejected() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let spell = zap().for_group("caster");

        assert!(!can_cast(&tw.world, &mut ts.svc(), caster, &spell).unwrap());
        assert_eq!(
            ts.sink.texts_for(caster),
            vec!["You are the wrong group to cast that spell.".to_string()]
        );
    }

    #[test]
    fn low_level_is_rejected_by_name() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let spell = zap().min_level(5);

        assert!(!can_cast(&tw.world, &mut ts.svc(), caster, &spell).unwrap());
        assert_eq!(
            ts.sink.texts_for(caster),
            vec!["Your level is too low to cast zap.".to_string()]
        );
    }

    #[test]
    fn insufficient_mana_is_rejected() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        tw.world.actor_mut(caster).unwrap().mana = 5;

        assert!(!can_cast(&tw.world, &mut ts.svc(), caster, &zap()).unwrap());
        assert_eq!(
            ts.sink.texts_for(caster),
            vec!["You do not have enough mana.".to_string()]
        );
    }

    #[test]
    fn mana_cost_scales_with_level() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        // Level 2 at 2000 xp.
        let caster = tw.player_with_xp("Renn", 2000);
        tw.world.actor_mut(caster).unwrap().mana = 100;
        let spell = Spell::new("drain").mana_cost(10, 20);

        cast(&mut tw.world, &mut ts.svc(), caster, &spell, None).expect("cast");
        // cost = 10 + 20 * 2
        assert_eq!(tw.world.actor(caster).unwrap().mana, 50);
    }

    #[test]
    fn failed_roll_leaves_mana_unchanged() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");
        let spell = zap().failure_chance(50);
        // 0 < 50: the spell fizzles.
        ts.dice = ScriptedDice::new([0]);

        cast(&mut tw.world, &mut ts.svc(), caster, &spell, Some(target)).expect("cast");

        assert_eq!(tw.world.actor(caster).unwrap().mana, 50);
        assert_eq!(tw.world.actor(target).unwrap().health, 1000);
        assert_eq!(
            ts.sink.texts_for(caster),
            vec!["Your spell failed!".to_string()]
        );
    }

    #[test]
    fn successful_cast_deducts_messages_and_hurts() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");
        let spell = zap().victim_desc("# hurls crackling fire at you!");

        cast(&mut tw.world, &mut ts.svc(), caster, &spell, Some(target)).expect("cast");

        assert_eq!(tw.world.actor(caster).unwrap().mana, 40);
        assert_eq!(tw.world.actor(target).unwrap().health, 990);
        assert!(
            ts.sink
                .texts_for(caster)
                .contains(&"You cast zap.".to_string())
        );
        assert!(
            ts.sink
                .texts_for(target)
                .contains(&"Renn hurls crackling fire at you!".to_string())
        );
    }

    #[test]
    fn casting_reveals_a_hidden_caster() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        tw.world.actor_mut(caster).unwrap().transient.hiding = 2;

        cast(&mut tw.world, &mut ts.svc(), caster, &zap(), None).expect("cast");
        assert!(!tw.world.actor(caster).unwrap().is_hiding());
    }

    #[test]
    fn effects_apply_in_declared_order() {
        let mut tw = TestWorld::new();
        let mut ts = TestServices::new();
        let caster = tw.player("Renn");
        let target = tw.player("Grak");
        let spell = Spell::new("barrage")
            .with_effect(SpellEffect::new(SpellEffectKind::Hurt, [10, 0, 0, 0]))
            .with_effect(SpellEffect::new(SpellEffectKind::Hurt, [20, 0, 0, 0]));

        cast(&mut tw.world, &mut ts.svc(), caster, &spell, Some(target)).expect("cast");

        assert_eq!(tw.world.actor(target).unwrap().health, 970);
        // Health reports arrive in effect order: 990 first, then 970.
        let texts = ts.sink.texts_for(target);
        let at_990 = texts.iter().position(|t| t.contains("990")).unwrap();
        let at_970 = texts.iter().position(|t| t.contains("970")).unwrap();
        assert!(at_990 < at_970);
    }
}
