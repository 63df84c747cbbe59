//! Mob templates and the catalog that serves them.
//!
//! Templates are immutable spawn blueprints owned by the embedding game.
//! The core only asks the catalog for candidates at or below a level and
//! instantiates whichever one the dice pick.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Spawn blueprint for a mob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MobTemplate {
    pub key: String,
    /// Lowest area level this mob may appear at.
    pub min_level: u32,
    pub xp: i64,

    pub base_health: i32,
    pub random_health: i32,
    pub base_mana: i32,

    pub base_damage: i32,
    pub random_damage: i32,
    pub armor: i32,
    pub spell_armor: i32,
    pub shadow_damage_percent: i32,

    pub drop_gold: i64,
    pub drop_item: Option<String>,

    pub aggressive: bool,
    pub patrols: bool,
    pub hunts: bool,
    pub roams: bool,
    pub patrol_pace: Duration,
    pub hunt_pace: Duration,
    pub attack_pace: Duration,
    pub heal_pace: Duration,
    pub heal_amount: i32,

    pub sayings: Vec<String>,
}

impl MobTemplate {
    pub fn builder(key: impl Into<String>) -> MobTemplateBuilder {
        MobTemplateBuilder::new(key)
    }
}

/// Builder with playable defaults; set only what a template overrides.
#[derive(Clone, Debug)]
pub struct MobTemplateBuilder {
    template: MobTemplate,
}

impl MobTemplateBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            template: MobTemplate {
                key: key.into(),
                min_level: 0,
                xp: 100,
                base_health: 50,
                random_health: 0,
                base_mana: 0,
                base_damage: 5,
                random_damage: 0,
                armor: 0,
                spell_armor: 0,
                shadow_damage_percent: 0,
                drop_gold: 0,
                drop_item: None,
                aggressive: true,
                patrols: true,
                hunts: true,
                roams: true,
                patrol_pace: Duration::from_secs(6),
                hunt_pace: Duration::from_secs(1),
                attack_pace: Duration::from_secs(2),
                heal_pace: Duration::from_secs(10),
                heal_amount: 5,
                sayings: Vec::new(),
            },
        }
    }

    pub fn min_level(mut self, level: u32) -> Self {
        self.template.min_level = level;
        self
    }

    pub fn xp(mut self, xp: i64) -> Self {
        self.template.xp = xp;
        self
    }

    pub fn health(mut self, base: i32, random: i32) -> Self {
        self.template.base_health = base;
        self.template.random_health = random;
        self
    }

    pub fn damage(mut self, base: i32, random: i32) -> Self {
        self.template.base_damage = base;
        self.template.random_damage = random;
        self
    }

    pub fn armor(mut self, armor: i32) -> Self {
        self.template.armor = armor;
        self
    }

    pub fn spell_armor(mut self, spell_armor: i32) -> Self {
        self.template.spell_armor = spell_armor;
        self
    }

    pub fn drops(mut self, gold: i64, item: Option<&str>) -> Self {
        self.template.drop_gold = gold;
        self.template.drop_item = item.map(str::to_string);
        self
    }

    pub fn aggressive(mut self, aggressive: bool) -> Self {
        self.template.aggressive = aggressive;
        self
    }

    pub fn patrols(mut self, patrols: bool) -> Self {
        self.template.patrols = patrols;
        self
    }

    pub fn hunts(mut self, hunts: bool) -> Self {
        self.template.hunts = hunts;
        self
    }

    pub fn roams(mut self, roams: bool) -> Self {
        self.template.roams = roams;
        self
    }

    pub fn paces(mut self, patrol: Duration, hunt: Duration, attack: Duration) -> Self {
        self.template.patrol_pace = patrol;
        self.template.hunt_pace = hunt;
        self.template.attack_pace = attack;
        self
    }

    pub fn healing(mut self, pace: Duration, amount: i32) -> Self {
        self.template.heal_pace = pace;
        self.template.heal_amount = amount;
        self
    }

    pub fn saying(mut self, line: impl Into<String>) -> Self {
        self.template.sayings.push(line.into());
        self
    }

    pub fn build(self) -> MobTemplate {
        self.template
    }
}

/// Template lookup service consumed by the spawn logic.
pub trait MobCatalog: Send + Sync {
    /// Templates whose `min_level` does not exceed `max_level`.
    fn eligible(&self, max_level: u32) -> Vec<MobTemplate>;
}

/// Catalog backed by a plain vector.
#[derive(Clone, Debug, Default)]
pub struct MemoryMobCatalog {
    templates: Vec<MobTemplate>,
}

impl MemoryMobCatalog {
    pub fn new(templates: Vec<MobTemplate>) -> Self {
        Self { templates }
    }

    /// Catalog with nothing in it; every spawn attempt silently no-ops.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl MobCatalog for MemoryMobCatalog {
    fn eligible(&self, max_level: u32) -> Vec<MobTemplate> {
        self.templates
            .iter()
            .filter(|t| t.min_level <= max_level)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_filters_by_min_level() {
        let catalog = MemoryMobCatalog::new(vec![
            MobTemplate::builder("rat").min_level(0).build(),
            MobTemplate::builder("troll").min_level(5).build(),
        ]);
        let low = catalog.eligible(2);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].key, "rat");
        assert_eq!(catalog.eligible(5).len(), 2);
    }

    #[test]
    fn template_round_trips_through_serde() {
        let template = MobTemplate::builder("lurker")
            .min_level(3)
            .damage(7, 4)
            .drops(25, Some("rusty dagger"))
            .saying("The lurker gurgles.")
            .build();
        let json = serde_json::to_string(&template).expect("serialize");
        let back: MobTemplate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, template);
    }
}
