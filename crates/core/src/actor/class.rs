//! Character classes: the base layer of every player stat.

use serde::{Deserialize, Serialize};

/// Immutable class definition a player character is built on.
///
/// Per-level components scale with the level derived from the character's
/// experience, never with a stored level field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub key: String,
    /// Class group for spell restrictions (e.g. "fighter", "caster").
    pub group: String,

    pub base_health: i32,
    pub level_health: i32,
    pub base_mana: i32,
    pub level_mana: i32,

    /// Unarmed attack line. Classes without claws cannot attack bare-handed
    /// through the weapon-attack path (the punch path is always open).
    pub has_claws: bool,
    pub base_claw_damage: i32,
    pub random_claw_damage: i32,
    pub level_claw_damage: i32,

    /// Weapon proficiency percent, plus growth per level.
    pub weapon_use: i32,
    pub level_weapon_use: i32,

    /// Surprise-attack bonus percent. Negative for classes that fight
    /// poorly from the shadows.
    pub shadow_damage_percent: i32,

    /// Chance (percent) that a landed attack carries poison.
    pub poison_chance: u32,

    pub attack_speed: i32,
}

impl CharacterClass {
    /// A plain melee baseline, useful as a starting point.
    pub fn fighter() -> Self {
        Self {
            key: "fighter".to_string(),
            group: "fighter".to_string(),
            base_health: 1000,
            level_health: 50,
            base_mana: 50,
            level_mana: 10,
            has_claws: false,
            base_claw_damage: 0,
            random_claw_damage: 0,
            level_claw_damage: 0,
            weapon_use: 100,
            level_weapon_use: 0,
            shadow_damage_percent: 0,
            poison_chance: 0,
            attack_speed: 10,
        }
    }
}
