//! Actors: player characters and mobs.
//!
//! The two variants are a sealed enum rather than a dynamic capability
//! probe; anything that is an [`Actor`] can fight and be damaged, and
//! nothing else can. Health is never written directly by gameplay code;
//! every change goes through `combat::apply_health_delta`.

mod class;
mod equipment;

pub use class::CharacterClass;
pub use equipment::Equipment;

use std::collections::VecDeque;

use crate::env::{ExperienceCurve, MobTemplate};
use crate::mob::{BehaviorConfig, BehaviorState};
use crate::types::{ActorId, ItemId, RoomId};
use crate::world::ItemSpec;

/// Per-actor transient combat fields, reset as one unit.
///
/// Consolidates what the rest of the system would otherwise scribble on
/// ad hoc: concealment depth, rest state, the action freeze timer, and
/// the in-flight/queued action labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransientCombatState {
    /// Concealment depth; greater than zero means hidden.
    pub hiding: u32,
    pub resting: bool,
    /// Actions are frozen until this scheduler timestamp (milliseconds).
    pub frozen_until: u64,
    /// Label of the action currently executing, if any.
    pub active_action: Option<String>,
    /// Labels of queued follow-up actions.
    pub queued_actions: VecDeque<String>,
}

impl TransientCombatState {
    pub fn is_hiding(&self) -> bool {
        self.hiding > 0
    }

    /// Clears concealment without touching anything else.
    pub fn reveal(&mut self) {
        self.hiding = 0;
    }

    /// Cancels the in-flight action and empties the queue.
    pub fn cancel_actions(&mut self) {
        self.active_action = None;
        self.queued_actions.clear();
    }

    /// Full reset: everything transient goes back to baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Player-specific actor data.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSheet {
    pub class: CharacterClass,
    pub xp: i64,
    pub equipment: Equipment,
    pub gold: i64,
}

/// Mob-specific actor data: a fixed stat block plus behavior settings.
#[derive(Clone, Debug, PartialEq)]
pub struct MobSheet {
    pub level: u32,
    pub xp: i64,
    pub max_health: i32,
    pub base_damage: i32,
    pub random_damage: i32,
    pub armor: i32,
    pub spell_armor: i32,
    pub shadow_damage_percent: i32,
    pub heal_amount: i32,

    pub drop_gold: i64,
    pub drop_item: Option<ItemSpec>,

    pub state: BehaviorState,
    pub config: BehaviorConfig,
}

impl MobSheet {
    /// Stat block from a template; `rolled_health` is the max health the
    /// spawner rolled (base + random part).
    pub fn from_template(template: &MobTemplate, rolled_health: i32) -> Self {
        Self {
            level: template.min_level,
            xp: template.xp,
            max_health: rolled_health,
            base_damage: template.base_damage,
            random_damage: template.random_damage,
            armor: template.armor,
            spell_armor: template.spell_armor,
            shadow_damage_percent: template.shadow_damage_percent,
            heal_amount: template.heal_amount,
            drop_gold: template.drop_gold,
            drop_item: template
                .drop_item
                .as_ref()
                .map(|key| ItemSpec::trinket(key.clone(), 1)),
            state: BehaviorState::Idle,
            config: BehaviorConfig::from_template(template),
        }
    }
}

/// Variant data for the two combatant kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ActorKind {
    Player(PlayerSheet),
    Mob(MobSheet),
}

/// Any entity that participates in combat.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub location: RoomId,
    /// Fallback room when the actor has nowhere to go.
    pub home: RoomId,

    pub health: i32,
    pub mana: i32,
    pub poisoned: bool,

    pub transient: TransientCombatState,
    pub inventory: Vec<ItemId>,

    pub kind: ActorKind,
}

impl Actor {
    pub fn new_player(
        id: ActorId,
        name: impl Into<String>,
        location: RoomId,
        class: CharacterClass,
        xp: i64,
    ) -> Self {
        let health = class.base_health;
        let mana = class.base_mana;
        Self {
            id,
            name: name.into(),
            location,
            home: location,
            health,
            mana,
            poisoned: false,
            transient: TransientCombatState::default(),
            inventory: Vec::new(),
            kind: ActorKind::Player(PlayerSheet {
                class,
                xp,
                equipment: Equipment::empty(),
                gold: 0,
            }),
        }
    }

    pub fn new_mob(id: ActorId, name: impl Into<String>, location: RoomId, sheet: MobSheet) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            home: location,
            health: sheet.max_health,
            mana: 0,
            poisoned: false,
            transient: TransientCombatState::default(),
            inventory: Vec::new(),
            kind: ActorKind::Mob(sheet),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player(_))
    }

    pub fn is_mob(&self) -> bool {
        matches!(self.kind, ActorKind::Mob(_))
    }

    pub fn player(&self) -> Option<&PlayerSheet> {
        match &self.kind {
            ActorKind::Player(sheet) => Some(sheet),
            ActorKind::Mob(_) => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerSheet> {
        match &mut self.kind {
            ActorKind::Player(sheet) => Some(sheet),
            ActorKind::Mob(_) => None,
        }
    }

    pub fn mob(&self) -> Option<&MobSheet> {
        match &self.kind {
            ActorKind::Mob(sheet) => Some(sheet),
            ActorKind::Player(_) => None,
        }
    }

    pub fn mob_mut(&mut self) -> Option<&mut MobSheet> {
        match &mut self.kind {
            ActorKind::Mob(sheet) => Some(sheet),
            ActorKind::Player(_) => None,
        }
    }

    pub fn is_hiding(&self) -> bool {
        self.transient.is_hiding()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Combat level: derived from experience for players, fixed for mobs.
    pub fn level(&self, curve: &dyn ExperienceCurve) -> u32 {
        match &self.kind {
            ActorKind::Player(sheet) => curve.level_from_xp(sheet.xp),
            ActorKind::Mob(sheet) => sheet.level,
        }
    }

    /// Whether this actor is a legal attack target: a combatant that is
    /// not concealed. Deadness is checked separately so the caller can
    /// stay silent about it.
    pub fn attackable(&self) -> bool {
        !self.is_hiding()
    }
}
