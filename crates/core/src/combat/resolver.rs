//! Attack orchestration.
//!
//! One resolution call runs the fixed stage order: legality, surprise
//! check, damage computation, messaging, mitigation, poison check, health
//! application. Later stages read state earlier stages set, so the order
//! is a contract, not an implementation detail.

use crate::combat::damage::{apply_armor, resolve_damage, resolve_mob_damage};
use crate::combat::health::apply_health_delta;
use crate::combat::messages;
use crate::env::{Dice, Hazard, MessageSink, SavingThrows, Services};
use crate::error::Result;
use crate::stats;
use crate::types::ActorId;
use crate::world::WorldState;

/// Fixed damage for punching yourself.
const SELF_PUNCH_DAMAGE: i32 = 100;

/// One resolved attack, assembled across the stages and discarded when the
/// call returns.
#[derive(Debug)]
struct AttackDescriptor {
    attacker: ActorId,
    target: ActorId,
    attack_name: String,
    is_surprise: bool,
    raw_damage: i32,
    mitigated_damage: i32,
}

/// Resolves a weapon or claw attack from one actor against another.
///
/// Rejections are messages to the attacker and change nothing; an
/// already-dead target is a silent no-op.
pub fn resolve_attack(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    attacker_id: ActorId,
    target_id: ActorId,
) -> Result<()> {
    let attacker = world.actor(attacker_id)?;
    let attacker_name = attacker.name.clone();
    let attacker_room = attacker.location;
    let attacker_stats = stats::snapshot(world, attacker, svc.xp);
    let weapon_name = stats::equipped_weapon(world, attacker).map(|w| w.key().to_string());

    // Legality, in order; each check is terminal.
    if weapon_name.is_none() && !attacker_stats.has_claws {
        svc.messages
            .notify(attacker_id, "You have no equipped weapon!");
        return Ok(());
    }
    let target = world.actor(target_id)?;
    if attacker_name == target.name {
        svc.messages.notify(attacker_id, "You can't attack yourself!");
        return Ok(());
    }
    if !target.attackable() {
        svc.messages.notify(attacker_id, "You can't attack that.");
        return Ok(());
    }
    if target.is_dead() {
        // Already resolved elsewhere.
        return Ok(());
    }
    let target_name = target.name.clone();
    let target_stats = stats::snapshot(world, target, svc.xp);

    // A concealed attacker is always revealed, and strikes by surprise.
    let mut is_surprise = false;
    if world.actor(attacker_id)?.is_hiding() {
        svc.messages.notify(
            attacker_id,
            &format!("You unexpectedly attack {target_name}!"),
        );
        svc.messages.notify(target_id, "Surprise!!!");
        world.actor_mut(attacker_id)?.transient.reveal();
        is_surprise = true;
    }

    let has_weapon = weapon_name.is_some();
    let mut attack = AttackDescriptor {
        attacker: attacker_id,
        target: target_id,
        attack_name: weapon_name.unwrap_or_else(|| "claws".to_string()),
        is_surprise,
        raw_damage: 0,
        mitigated_damage: 0,
    };
    attack.raw_damage = resolve_damage(&attacker_stats, has_weapon, attack.is_surprise, svc.dice);

    // Messaging happens on the raw number, before mitigation.
    svc.messages.notify(
        attack.attacker,
        &messages::attack_attacker_msg(&target_name, &attack.attack_name, attack.raw_damage),
    );
    svc.messages.notify(
        attack.target,
        &messages::attack_target_msg(&attacker_name, &attack.attack_name, attack.raw_damage),
    );
    svc.messages.notify_room(
        attacker_room,
        &messages::attack_bystander_msg(
            &attacker_name,
            &target_name,
            &attack.attack_name,
            attack.raw_damage,
        ),
        &[attack.attacker, attack.target],
    );

    attack.mitigated_damage = apply_armor(svc, attack.target, &target_stats, attack.raw_damage);

    check_poison(world, svc, &attack, &attacker_name, &target_name, attacker_stats.poison_chance)?;

    apply_health_delta(
        world,
        svc,
        attack.target,
        -attack.mitigated_damage,
        Some(attack.attacker),
        Some(&attack.attack_name),
    )
}

/// Independent poison side effect, rolled after messaging and mitigation
/// but before the damage lands.
fn check_poison(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    attack: &AttackDescriptor,
    attacker_name: &str,
    target_name: &str,
    poison_chance: u32,
) -> Result<()> {
    if poison_chance == 0 || svc.dice.percent() >= poison_chance {
        return Ok(());
    }
    svc.messages.notify(
        attack.attacker,
        &format!("You've poisoned {target_name}!"),
    );
    let target = world.actor(attack.target)?;
    if !svc.saves.saving_throw(target, Hazard::Poison) {
        svc.messages.notify(
            attack.target,
            &format!(
                "You've been poisoned by {attacker_name}'s {}!",
                attack.attack_name
            ),
        );
        let room = target.location;
        svc.messages.notify_room(
            room,
            &format!("{attacker_name} has poisoned {target_name}!"),
            &[attack.attacker, attack.target],
        );
        world.actor_mut(attack.target)?.poisoned = true;
    }
    Ok(())
}

/// Resolves a bare-fisted punch.
///
/// Punches skip armor entirely and carry their own flavor table. Punching
/// yourself is legal, always reveals you, and costs a flat 100 health.
pub fn resolve_punch(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    attacker_id: ActorId,
    target_id: ActorId,
) -> Result<()> {
    let attack_name = "fists of fury";
    let target = world.actor(target_id)?;
    if target.is_dead() {
        return Ok(());
    }
    let target_name = target.name.clone();
    let attacker = world.actor(attacker_id)?;
    let attacker_name = attacker.name.clone();
    let attacker_room = attacker.location;

    if attacker_id == target_id {
        // Surprisingly enough, you can punch yourself.
        if world.actor(attacker_id)?.is_hiding() {
            world.actor_mut(attacker_id)?.transient.reveal();
        }
        svc.messages.notify(
            attacker_id,
            "You catch yourself off guard with an elbow to the ribs, arrg!",
        );
        svc.messages.notify_room(
            attacker_room,
            &format!("{attacker_name} is heading for the void."),
            &[attacker_id],
        );
        return apply_health_delta(
            world,
            svc,
            attacker_id,
            -SELF_PUNCH_DAMAGE,
            Some(attacker_id),
            Some(attack_name),
        );
    }

    if world.actor(attacker_id)?.is_hiding() {
        svc.messages.notify(
            attacker_id,
            &format!("You pounce unexpectedly on {target_name}!"),
        );
        svc.messages.notify(
            target_id,
            &format!("{attacker_name} pounces on you from the shadows!"),
        );
        svc.messages.notify_room(
            attacker_room,
            &format!("{attacker_name} jumps out of the shadows and attacks {target_name}."),
            &[attacker_id, target_id],
        );
        world.actor_mut(attacker_id)?.transient.reveal();
    }

    let mut punch_num = svc.dice.up_to(messages::PUNCH_KINDS);
    if world.actor(attacker_id)?.health < 75 {
        punch_num = messages::DESPERATE_PUNCH;
    }

    svc.messages.notify(
        attacker_id,
        &messages::punch_attacker_msg(&target_name, punch_num),
    );
    svc.messages.notify(
        target_id,
        &messages::punch_target_msg(&attacker_name, punch_num),
    );
    svc.messages.notify_room(
        attacker_room,
        &messages::punch_bystander_msg(&attacker_name, &target_name, punch_num),
        &[attacker_id, target_id],
    );

    apply_health_delta(
        world,
        svc,
        target_id,
        -messages::punch_damage(punch_num),
        Some(attacker_id),
        Some(attack_name),
    )
}

/// Resolves a mob's claw attack.
///
/// Reuses the mitigation and health stages; the weapon-presence, self, and
/// concealment legality checks do not apply to mobs.
pub fn resolve_mob_attack(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    mob_id: ActorId,
    target_id: ActorId,
) -> Result<()> {
    let target = world.actor(target_id)?;
    if target.is_dead() {
        return Ok(());
    }
    let target_name = target.name.clone();
    let target_stats = stats::snapshot(world, target, svc.xp);
    let mob = world.actor(mob_id)?;
    let mob_name = mob.name.clone();
    let mob_room = mob.location;
    let mob_stats = stats::snapshot(world, mob, svc.xp);

    let mut attack = AttackDescriptor {
        attacker: mob_id,
        target: target_id,
        attack_name: "claws".to_string(),
        is_surprise: false,
        raw_damage: 0,
        mitigated_damage: 0,
    };
    attack.raw_damage = resolve_mob_damage(&mob_stats, attack.is_surprise, svc.dice);

    svc.messages.notify(
        attack.target,
        &messages::attack_target_msg(&mob_name, &attack.attack_name, attack.raw_damage),
    );
    svc.messages.notify_room(
        mob_room,
        &messages::attack_bystander_msg(
            &mob_name,
            &target_name,
            &attack.attack_name,
            attack.raw_damage,
        ),
        &[attack.attacker, attack.target],
    );

    attack.mitigated_damage = apply_armor(svc, attack.target, &target_stats, attack.raw_damage);

    apply_health_delta(
        world,
        svc,
        attack.target,
        -attack.mitigated_damage,
        Some(attack.attacker),
        Some(&attack.attack_name),
    )
}
