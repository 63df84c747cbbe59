//! Runtime configuration shared across the orchestrator and worker.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_buffer: usize,
    pub message_buffer: usize,
    /// Dice seed; `None` seeds from entropy.
    pub seed: Option<u64>,

    pub player_heal_amount: i32,
    pub player_heal_pace: Duration,
    pub player_mana_amount: i32,
    pub player_mana_pace: Duration,

    /// Anchor a mob-generator tick to every player character.
    pub spawn_generators: bool,
    pub generator_pace: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_buffer: 32,
            message_buffer: 256,
            seed: None,
            player_heal_amount: 10,
            player_heal_pace: Duration::from_secs(10),
            player_mana_amount: 5,
            player_mana_pace: Duration::from_secs(10),
            spawn_generators: true,
            generator_pace: Duration::from_secs(10),
        }
    }
}
