//! Combat message builders.
//!
//! Every attack produces three renderings of the same fact: one for the
//! attacker, one for the target, one for bystanders. Keeping the wording
//! here keeps the resolver free of string soup.

/// Number of regular punch flavors. Index [`DESPERATE_PUNCH`] is reserved
/// for attackers on their last legs.
pub const PUNCH_KINDS: u32 = 15;

/// Flavor index forced when the attacker's health is below 75.
pub const DESPERATE_PUNCH: u32 = 16;

const PUNCH_BLOWS: [&str; 17] = [
    "a quick jab",
    "a left hook",
    "a right cross",
    "a backhand slap",
    "a glancing blow",
    "an elbow strike",
    "a knuckle rap",
    "a body blow",
    "a sharp uppercut",
    "a hammering fist",
    "a double-fisted smash",
    "a spinning backfist",
    "a crushing haymaker",
    "a brutal gut punch",
    "a skull-rattling hook",
    "a bone-jarring slam",
    "a wild, desperate flurry",
];

pub fn attack_attacker_msg(target: &str, attack_name: &str, damage: i32) -> String {
    format!("You hit {target} with your {attack_name} for {damage} damage!")
}

pub fn attack_target_msg(attacker: &str, attack_name: &str, damage: i32) -> String {
    format!("{attacker} hits you with {attack_name} for {damage} damage!")
}

pub fn attack_bystander_msg(attacker: &str, target: &str, attack_name: &str, damage: i32) -> String {
    format!("{attacker} hits {target} with {attack_name} for {damage} damage.")
}

fn punch_blow(num: u32) -> &'static str {
    PUNCH_BLOWS[(num as usize).min(PUNCH_BLOWS.len() - 1)]
}

pub fn punch_attacker_msg(target: &str, num: u32) -> String {
    format!("You land {} on {target}!", punch_blow(num))
}

pub fn punch_target_msg(attacker: &str, num: u32) -> String {
    format!("{attacker} lands {} on you!", punch_blow(num))
}

pub fn punch_bystander_msg(attacker: &str, target: &str, num: u32) -> String {
    format!("{attacker} lands {} on {target}.", punch_blow(num))
}

/// Punch damage steps up through the flavor table.
pub fn punch_damage(num: u32) -> i32 {
    if num < 7 {
        25
    } else if num < 12 {
        50
    } else if num < 15 {
        75
    } else {
        100
    }
}

pub fn health_msg(name: &str, health: i32) -> String {
    format!("{name} now {} {health} health.", if name == "You" { "have" } else { "has" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punch_damage_steps() {
        assert_eq!(punch_damage(0), 25);
        assert_eq!(punch_damage(6), 25);
        assert_eq!(punch_damage(7), 50);
        assert_eq!(punch_damage(11), 50);
        assert_eq!(punch_damage(12), 75);
        assert_eq!(punch_damage(14), 75);
        assert_eq!(punch_damage(15), 100);
        assert_eq!(punch_damage(DESPERATE_PUNCH), 100);
    }

    #[test]
    fn health_msg_inflects_for_second_person() {
        assert_eq!(health_msg("You", 90), "You now have 90 health.");
        assert_eq!(health_msg("Grak", 40), "Grak now has 40 health.");
    }
}
