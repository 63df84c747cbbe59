//! Spells: immutable templates, casting, and effect dispatch.

mod cast;
mod effects;

pub use cast::{can_cast, cast};
pub use effects::apply_effect;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Tag identifying what a spell effect does.
///
/// The set is intentionally open: in the current ruleset only `Hurt`
/// carries logic and the rest are valid no-ops waiting for handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SpellEffectKind {
    CurePoison,
    Strength,
    Speed,
    Invisible,
    SeeInvisible,
    Heal,
    Hurt,
    Sleep,
    Push,
    Announce,
    Command,
    DistanceHurt,
    DetectMagic,
    FindPerson,
    Locate,
    Weaken,
    Slow,
}

/// One declared effect of a spell.
///
/// The four parameters are effect-kind-specific; for `Hurt` they are base
/// damage, per-level base, random range, and per-level random range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub kind: SpellEffectKind,
    pub params: [i32; 4],
    /// Applies to every other occupant of the caster's room.
    pub affects_room: bool,
    /// Additionally applies to the caster.
    pub affects_caster: bool,
}

impl SpellEffect {
    pub fn new(kind: SpellEffectKind, params: [i32; 4]) -> Self {
        Self {
            kind,
            params,
            affects_room: false,
            affects_caster: false,
        }
    }

    pub fn room_wide(mut self) -> Self {
        self.affects_room = true;
        self
    }

    pub fn rebounds(mut self) -> Self {
        self.affects_caster = true;
        self
    }
}

/// Immutable spell template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub key: String,
    /// Restricts casting to one class, when set.
    pub class_key: Option<String>,
    /// Restricts casting to one class group, when set.
    pub group: Option<String>,
    pub min_level: u32,

    pub mana: i32,
    pub level_mana: i32,
    pub failure_chance: u32,
    /// Casting pulls the caster out of concealment.
    pub reveals: bool,

    pub caster_desc: Option<String>,
    /// Target-facing description; `#` is replaced with the caster's name.
    pub victim_desc: Option<String>,
    pub failure_desc: Option<String>,
    /// Routes `victim_desc` to the whole room instead of the target.
    pub affects_room: bool,

    /// Applied in declared order; effects are independent of one another.
    pub effects: Vec<SpellEffect>,
}

impl Spell {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            class_key: None,
            group: None,
            min_level: 0,
            mana: 0,
            level_mana: 0,
            failure_chance: 0,
            reveals: true,
            caster_desc: None,
            victim_desc: None,
            failure_desc: None,
            affects_room: false,
            effects: Vec::new(),
        }
    }

    pub fn for_class(mut self, class_key: impl Into<String>) -> Self {
        self.class_key = Some(class_key.into());
        self
    }

    pub fn for_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn min_level(mut self, level: u32) -> Self {
        self.min_level = level;
        self
    }

    pub fn mana_cost(mut self, mana: i32, level_mana: i32) -> Self {
        self.mana = mana;
        self.level_mana = level_mana;
        self
    }

    pub fn failure_chance(mut self, chance: u32) -> Self {
        self.failure_chance = chance;
        self
    }

    pub fn with_effect(mut self, effect: SpellEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn victim_desc(mut self, desc: impl Into<String>) -> Self {
        self.victim_desc = Some(desc.into());
        self
    }

    /// Mana cost at a given caster level.
    pub fn mana_cost_at(&self, level: u32) -> i32 {
        self.mana + self.level_mana * level as i32
    }
}
