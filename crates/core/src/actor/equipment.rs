//! Equipment slots for player characters.
//!
//! Invariants: an item occupies exactly one slot, and a two-handed weapon
//! and the one-handed weapon/shield pair are mutually exclusive. Equipping
//! across that boundary evicts the conflicting occupants and hands their
//! ids back to the caller, who returns them to the inventory.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;
use crate::world::{Item, ItemKind};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    weapon: Option<ItemId>,
    shield: Option<ItemId>,
    two_handed: Option<ItemId>,
    armor: Option<ItemId>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips the item, returning any evicted occupants.
    ///
    /// Trinkets cannot be equipped; the call is a no-op returning nothing.
    pub fn equip(&mut self, item: &Item) -> Vec<ItemId> {
        let mut evicted = Vec::new();
        match item.spec.kind {
            ItemKind::Weapon { two_handed: true } => {
                evicted.extend(self.weapon.take());
                evicted.extend(self.shield.take());
                evicted.extend(self.two_handed.replace(item.id));
            }
            ItemKind::Weapon { two_handed: false } => {
                evicted.extend(self.two_handed.take());
                evicted.extend(self.weapon.replace(item.id));
            }
            ItemKind::Shield => {
                evicted.extend(self.two_handed.take());
                evicted.extend(self.shield.replace(item.id));
            }
            ItemKind::Armor => {
                evicted.extend(self.armor.replace(item.id));
            }
            ItemKind::Trinket => {}
        }
        evicted
    }

    /// Removes the item from whichever slot holds it. Idempotent.
    pub fn unequip(&mut self, id: ItemId) {
        for slot in [
            &mut self.weapon,
            &mut self.shield,
            &mut self.two_handed,
            &mut self.armor,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    /// The weapon that swings on an attack, if any.
    pub fn weapon(&self) -> Option<ItemId> {
        self.two_handed.or(self.weapon)
    }

    pub fn armor(&self) -> Option<ItemId> {
        self.armor
    }

    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.iter().any(|slot| slot == id)
    }

    /// All equipped item ids, for stat composition.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        [self.weapon, self.shield, self.two_handed, self.armor]
            .into_iter()
            .flatten()
    }
}
