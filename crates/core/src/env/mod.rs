//! Traits describing the collaborators this core is embedded against.
//!
//! Messaging, saving throws, experience curves, tick scheduling, mob
//! templates, and dice all enter through the traits here. The [`Services`]
//! aggregate bundles them so resolution code can take one context argument
//! instead of hard coupling to concrete implementations.

mod dice;
mod experience;
mod messages;
mod saves;
mod scheduler;
mod templates;

pub use dice::{Dice, PcgDice, ScriptedDice};
pub use experience::{ExperienceCurve, ThresholdCurve};
pub use messages::{Delivery, MemorySink, MessageSink};
pub use saves::{FixedSaves, Hazard, SavingThrows};
pub use scheduler::{RecordingScheduler, TickKind, TickScheduler};
pub use templates::{MemoryMobCatalog, MobCatalog, MobTemplate, MobTemplateBuilder};

/// Collaborator bundle threaded through every resolution call.
///
/// Dice are held mutably; everything else is shared and internally
/// synchronized by its implementation.
pub struct Services<'a> {
    pub messages: &'a dyn MessageSink,
    pub saves: &'a dyn SavingThrows,
    pub xp: &'a dyn ExperienceCurve,
    pub scheduler: &'a dyn TickScheduler,
    pub catalog: &'a dyn MobCatalog,
    pub dice: &'a mut dyn Dice,
}
