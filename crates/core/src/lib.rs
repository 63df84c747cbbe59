//! Combat-and-behavior core for a persistent multiplayer text world.
//!
//! `voidmud-core` defines the canonical rules: the damage pipeline shared
//! by melee, unarmed, mob, and spell attacks; the mob autonomy state
//! machine; and the spell effect dispatcher. External collaborators
//! (messaging, scheduling, saving throws, experience, templates) enter
//! through the traits in [`env`], so the whole core runs deterministically
//! under test and single-owner-mutably under the runtime.

pub mod actor;
pub mod combat;
pub mod env;
pub mod error;
pub mod mob;
pub mod spell;
pub mod stats;
pub mod types;
pub mod vitals;
pub mod world;

#[cfg(test)]
pub(crate) mod testutil;

pub use actor::{Actor, ActorKind, CharacterClass, Equipment, MobSheet, PlayerSheet, TransientCombatState};
pub use combat::{
    apply_armor, apply_health_delta, gain_xp, resolve_attack, resolve_damage, resolve_mob_attack,
    resolve_punch, set_xp,
};
pub use env::{
    Dice, ExperienceCurve, Hazard, MemoryMobCatalog, MessageSink, MobCatalog, MobTemplate,
    PcgDice, SavingThrows, Services, ThresholdCurve, TickKind, TickScheduler,
};
pub use error::{Result, WorldError};
pub use mob::{BehaviorConfig, BehaviorState};
pub use spell::{Spell, SpellEffect, SpellEffectKind};
pub use stats::CombatStats;
pub use types::{ActorId, ItemId, RoomId};
pub use world::{Exit, Item, ItemBonuses, ItemKind, ItemSpec, Room, RoomFlags, WorldEvent, WorldState};
