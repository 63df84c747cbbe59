//! Combat resolution: damage, mitigation, health mutation, and death.
//!
//! Stage order within one resolution call is fixed (legality, surprise,
//! damage, messaging, mitigation, poison, health application) and all
//! damage, whether melee, unarmed, mob, or spell-originated, funnels into
//! [`apply_health_delta`], the system's only health write.

mod damage;
mod death;
mod health;
pub mod messages;
mod resolver;
mod xp;

pub use damage::{SURPRISE_MULTIPLIER, apply_armor, resolve_damage, resolve_mob_damage};
pub use death::{character_death, mob_death};
pub use health::apply_health_delta;
pub use resolver::{resolve_attack, resolve_mob_attack, resolve_punch};
pub use xp::{gain_xp, set_xp};
