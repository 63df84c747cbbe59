//! Items: equipment, loot, and the stat contributions they carry.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// Which slot family an item occupies when equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// One-handed weapon unless `two_handed` is set.
    Weapon { two_handed: bool },
    Shield,
    Armor,
    /// Carried only; never equipped.
    Trinket,
}

/// Stat contributions an equipped item adds to its wearer.
///
/// Field set follows the object effect kinds of the source data: weapon
/// damage, armor values, and attack speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBonuses {
    pub base_weapon_damage: i32,
    pub random_weapon_damage: i32,
    pub base_armor: i32,
    pub deflect_armor: i32,
    pub spell_armor: i32,
    pub attack_speed: i32,
}

/// Item blueprint without instance identity. Used for mob drop tables and
/// to stamp out live [`Item`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub key: String,
    pub worth: i64,
    /// Before-drop veto: when false the item is destroyed instead of
    /// dropped on its holder's death.
    pub droppable: bool,
    pub kind: ItemKind,
    pub bonuses: ItemBonuses,
}

impl ItemSpec {
    pub fn trinket(key: impl Into<String>, worth: i64) -> Self {
        Self {
            key: key.into(),
            worth,
            droppable: true,
            kind: ItemKind::Trinket,
            bonuses: ItemBonuses::default(),
        }
    }

    pub fn weapon(key: impl Into<String>, base: i32, random: i32) -> Self {
        Self {
            key: key.into(),
            worth: 10,
            droppable: true,
            kind: ItemKind::Weapon { two_handed: false },
            bonuses: ItemBonuses {
                base_weapon_damage: base,
                random_weapon_damage: random,
                ..ItemBonuses::default()
            },
        }
    }

    pub fn two_handed_weapon(key: impl Into<String>, base: i32, random: i32) -> Self {
        let mut spec = Self::weapon(key, base, random);
        spec.kind = ItemKind::Weapon { two_handed: true };
        spec
    }

    pub fn shield(key: impl Into<String>, deflect: i32) -> Self {
        Self {
            key: key.into(),
            worth: 10,
            droppable: true,
            kind: ItemKind::Shield,
            bonuses: ItemBonuses {
                deflect_armor: deflect,
                ..ItemBonuses::default()
            },
        }
    }

    pub fn armor(key: impl Into<String>, base: i32, deflect: i32) -> Self {
        Self {
            key: key.into(),
            worth: 10,
            droppable: true,
            kind: ItemKind::Armor,
            bonuses: ItemBonuses {
                base_armor: base,
                deflect_armor: deflect,
                ..ItemBonuses::default()
            },
        }
    }

    pub fn worth(mut self, worth: i64) -> Self {
        self.worth = worth;
        self
    }

    pub fn bound(mut self) -> Self {
        self.droppable = false;
        self
    }
}

/// A live item instance somewhere in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub spec: ItemSpec,
}

impl Item {
    pub fn from_spec(id: ItemId, spec: ItemSpec) -> Self {
        Self { id, spec }
    }

    pub fn key(&self) -> &str {
        &self.spec.key
    }

    pub fn worth(&self) -> i64 {
        self.spec.worth
    }
}
