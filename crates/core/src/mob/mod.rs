//! Mob autonomy: the behavior state machine and chance-based spawning.

mod behavior;
mod spawn;

pub use behavior::{
    BehaviorConfig, BehaviorState, activate, notice_arrival, on_behavior_tick, react_to_events,
    start_attacking, start_hunting, start_idle, start_patrolling,
};
pub use spawn::{generator_tick, spawn_in};
