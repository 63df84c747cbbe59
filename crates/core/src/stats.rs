//! Derived combat statistics.
//!
//! A [`CombatStats`] snapshot is a pure function of the actor's class,
//! level, and currently equipped items (players) or stored stat block
//! (mobs). Snapshots are never cached: equipment changes invalidate
//! derived values implicitly because every caller recomputes.

use crate::actor::{Actor, ActorKind};
use crate::env::ExperienceCurve;
use crate::world::{Item, ItemBonuses, WorldState};

/// Derived combat stats for one actor at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatStats {
    pub level: u32,
    pub max_health: i32,
    pub max_mana: i32,

    pub base_weapon_damage: i32,
    pub random_weapon_damage: i32,
    pub total_weapon_use: i32,

    pub has_claws: bool,
    pub base_claw_damage: i32,
    pub random_claw_damage: i32,
    pub level_claw_damage: i32,

    pub base_armor: i32,
    pub deflect_armor: i32,
    pub spell_armor: i32,

    pub shadow_damage_percent: i32,
    pub poison_chance: u32,
    pub attack_speed: i32,
}

/// Computes the current snapshot for an actor.
pub fn snapshot(world: &WorldState, actor: &Actor, curve: &dyn ExperienceCurve) -> CombatStats {
    match &actor.kind {
        ActorKind::Player(sheet) => {
            let level = curve.level_from_xp(sheet.xp) as i32;
            let class = &sheet.class;

            // Sum contributions from everything currently equipped; a
            // weapon's damage may be spread across several objects.
            let mut gear = ItemBonuses::default();
            for id in sheet.equipment.iter() {
                if let Ok(item) = world.item(id) {
                    let b = item.spec.bonuses;
                    gear.base_weapon_damage += b.base_weapon_damage;
                    gear.random_weapon_damage += b.random_weapon_damage;
                    gear.base_armor += b.base_armor;
                    gear.deflect_armor += b.deflect_armor;
                    gear.spell_armor += b.spell_armor;
                    gear.attack_speed += b.attack_speed;
                }
            }

            CombatStats {
                level: level as u32,
                max_health: class.base_health + class.level_health * level,
                max_mana: class.base_mana + class.level_mana * level,
                base_weapon_damage: gear.base_weapon_damage,
                random_weapon_damage: gear.random_weapon_damage,
                total_weapon_use: class.weapon_use + class.level_weapon_use * level,
                has_claws: class.has_claws,
                base_claw_damage: class.base_claw_damage,
                random_claw_damage: class.random_claw_damage,
                level_claw_damage: class.level_claw_damage,
                base_armor: gear.base_armor,
                deflect_armor: gear.deflect_armor,
                spell_armor: gear.spell_armor,
                shadow_damage_percent: class.shadow_damage_percent,
                poison_chance: class.poison_chance,
                attack_speed: class.attack_speed + gear.attack_speed,
            }
        }
        ActorKind::Mob(sheet) => CombatStats {
            level: sheet.level,
            max_health: sheet.max_health,
            max_mana: 0,
            base_weapon_damage: 0,
            random_weapon_damage: 0,
            total_weapon_use: 0,
            // Mobs always have an implicit claws attack.
            has_claws: true,
            base_claw_damage: sheet.base_damage,
            random_claw_damage: sheet.random_damage,
            level_claw_damage: 0,
            base_armor: sheet.armor,
            // Mobs never deflect.
            deflect_armor: 0,
            spell_armor: sheet.spell_armor,
            shadow_damage_percent: sheet.shadow_damage_percent,
            poison_chance: 0,
            attack_speed: 0,
        },
    }
}

/// The weapon an actor would swing, if it has one equipped.
pub fn equipped_weapon<'a>(world: &'a WorldState, actor: &Actor) -> Option<&'a Item> {
    let sheet = actor.player()?;
    let id = sheet.equipment.weapon()?;
    world.item(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::CharacterClass;
    use crate::env::ThresholdCurve;
    use crate::testutil::TestWorld;
    use crate::world::ItemSpec;

    #[test]
    fn player_stats_compose_class_gear_and_level() {
        let mut tw = TestWorld::new();
        let mut class = CharacterClass::fighter();
        class.level_health = 100;
        class.level_mana = 20;
        class.level_weapon_use = 5;
        class.weapon_use = 50;
        // 2000 xp puts the fighter at level 2.
        let player = tw.player_with_class("Renn", class, 2000);
        tw.equip(player, ItemSpec::weapon("sword", 10, 4));
        tw.equip(player, ItemSpec::shield("buckler", 15));

        let actor = tw.world.actor(player).unwrap();
        let stats = snapshot(&tw.world, actor, &ThresholdCurve);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.max_health, 1000 + 100 * 2);
        assert_eq!(stats.max_mana, 50 + 20 * 2);
        assert_eq!(stats.base_weapon_damage, 10);
        assert_eq!(stats.random_weapon_damage, 4);
        assert_eq!(stats.total_weapon_use, 50 + 5 * 2);
        assert_eq!(stats.deflect_armor, 15);
    }

    #[test]
    fn snapshot_tracks_equipment_changes_without_caching() {
        let mut tw = TestWorld::new();
        let player = tw.player("Renn");
        let sword = tw.equip(player, ItemSpec::weapon("sword", 10, 0));

        let before = snapshot(&tw.world, tw.world.actor(player).unwrap(), &ThresholdCurve);
        assert_eq!(before.base_weapon_damage, 10);

        tw.world
            .actor_mut(player)
            .unwrap()
            .player_mut()
            .unwrap()
            .equipment
            .unequip(sword);
        let after = snapshot(&tw.world, tw.world.actor(player).unwrap(), &ThresholdCurve);
        assert_eq!(after.base_weapon_damage, 0);
    }

    #[test]
    fn mob_stats_come_straight_from_the_sheet() {
        let mut tw = TestWorld::new();
        let mob = tw.mob("gnarl", |t| t.damage(7, 3).armor(20));
        let actor = tw.world.actor(mob).unwrap();
        let stats = snapshot(&tw.world, actor, &ThresholdCurve);
        assert!(stats.has_claws);
        assert_eq!(stats.base_claw_damage, 7);
        assert_eq!(stats.random_claw_damage, 3);
        assert_eq!(stats.base_armor, 20);
        assert_eq!(stats.deflect_armor, 0);
    }
}
