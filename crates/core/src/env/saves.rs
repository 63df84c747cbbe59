//! Saving throws against named hazards.

use strum::Display;

use crate::actor::Actor;

/// Hazard categories a defender can resist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Hazard {
    Poison,
    Magic,
}

/// Resistance check service. Returns `true` when the actor resists.
pub trait SavingThrows: Send + Sync {
    fn saving_throw(&self, actor: &Actor, hazard: Hazard) -> bool;
}

/// Saving-throw double with a fixed outcome.
#[derive(Clone, Copy, Debug)]
pub struct FixedSaves(pub bool);

impl SavingThrows for FixedSaves {
    fn saving_throw(&self, _actor: &Actor, _hazard: Hazard) -> bool {
        self.0
    }
}
