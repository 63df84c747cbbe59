//! Raw damage computation and armor mitigation.

use crate::env::{Dice, MessageSink, Services};
use crate::stats::CombatStats;
use crate::types::ActorId;

/// Surprise attacks always swing at this fixed multiplier instead of a
/// random draw.
pub const SURPRISE_MULTIPLIER: f64 = 0.7;

/// Computes raw damage for a weapon or claw attack.
///
/// With a weapon: `base + floor(random * multiplier)`, scaled by weapon
/// proficiency over 100. Unarmed (claws): `base + floor(random *
/// multiplier) + per-level * level`. A surprise attack then adds
/// `floor(raw * shadow_percent / 100)`; the shadow percent may be
/// negative, so the result is floored at zero.
pub fn resolve_damage(
    stats: &CombatStats,
    has_weapon: bool,
    is_surprise: bool,
    dice: &mut dyn Dice,
) -> i32 {
    let multiplier = if is_surprise {
        SURPRISE_MULTIPLIER
    } else {
        dice.unit()
    };

    let mut damage = if has_weapon {
        let swing =
            stats.base_weapon_damage + (f64::from(stats.random_weapon_damage) * multiplier) as i32;
        swing * stats.total_weapon_use / 100
    } else {
        stats.base_claw_damage
            + (f64::from(stats.random_claw_damage) * multiplier) as i32
            + stats.level_claw_damage * stats.level as i32
    };

    if is_surprise {
        damage += damage * stats.shadow_damage_percent / 100;
    }

    damage.max(0)
}

/// Computes raw damage for a mob's implicit claws.
///
/// Mobs roll a flat `base + uniform(0..=random)`; the surprise bonus uses
/// the mob's own shadow percent.
pub fn resolve_mob_damage(stats: &CombatStats, is_surprise: bool, dice: &mut dyn Dice) -> i32 {
    let random = stats.random_claw_damage.max(0) as u32;
    let mut damage = stats.base_claw_damage + dice.up_to(random) as i32;
    if is_surprise {
        damage += damage * stats.shadow_damage_percent / 100;
    }
    damage.max(0)
}

/// Applies the target's armor to incoming damage and tells the target
/// what happened.
///
/// The deflect roll comes first and is independent of the flat reduction;
/// both may fire in the same resolution. Deflection halves (integer
/// floor), flat armor then scales by `(100 - armor) / 100`.
pub fn apply_armor(
    svc: &mut Services<'_>,
    target: ActorId,
    target_stats: &CombatStats,
    damage: i32,
) -> i32 {
    let mut mitigated = damage;
    if target_stats.deflect_armor > 0 && (svc.dice.percent() as i32) < target_stats.deflect_armor {
        svc.messages
            .notify(target, "The attack is deflected by your armor.");
        mitigated = damage / 2;
    }
    if target_stats.base_armor > 0 {
        svc.messages
            .notify(target, "The attack is partially blocked by your armor.");
        mitigated = mitigated * (100 - target_stats.base_armor) / 100;
    }
    mitigated
}
