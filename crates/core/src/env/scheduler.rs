//! Recurring-tick scheduling contract.
//!
//! Each subscription is keyed by `(subject, kind)`. Subscribing again for
//! the same key replaces the previous subscription in one step, so a
//! subject can never accumulate two live ticks of the same kind.
//! Unsubscribing a key that is not present is a no-op, never an error.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::types::ActorId;

/// What a recurring tick drives when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Mob autonomy state machine step.
    Behavior,
    /// Health regeneration (and poison drain).
    HealthRegen,
    /// Mana regeneration.
    ManaRegen,
    /// Chance-based mob spawning anchored to a subject.
    MobGenerator,
}

/// Shared tick scheduler consumed by the core.
pub trait TickScheduler: Send + Sync {
    /// Installs the subject's recurring tick, replacing any existing
    /// subscription with the same `(subject, kind)` key.
    fn subscribe(&self, subject: ActorId, every: Duration, kind: TickKind);

    /// Removes the subject's tick of the given kind. Idempotent.
    fn unsubscribe(&self, subject: ActorId, kind: TickKind);
}

/// Scheduler double that records subscriptions without running anything.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    active: Mutex<HashMap<(ActorId, TickKind), Duration>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active interval for the key, if subscribed.
    pub fn interval(&self, subject: ActorId, kind: TickKind) -> Option<Duration> {
        self.active
            .lock()
            .expect("scheduler poisoned")
            .get(&(subject, kind))
            .copied()
    }

    /// Number of live subscriptions for the subject across all kinds.
    pub fn count_for(&self, subject: ActorId) -> usize {
        self.active
            .lock()
            .expect("scheduler poisoned")
            .keys()
            .filter(|(s, _)| *s == subject)
            .count()
    }
}

impl TickScheduler for RecordingScheduler {
    fn subscribe(&self, subject: ActorId, every: Duration, kind: TickKind) {
        self.active
            .lock()
            .expect("scheduler poisoned")
            .insert((subject, kind), every);
    }

    fn unsubscribe(&self, subject: ActorId, kind: TickKind) {
        self.active
            .lock()
            .expect("scheduler poisoned")
            .remove(&(subject, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_replaces_same_key() {
        let sched = RecordingScheduler::new();
        let id = ActorId(1);
        sched.subscribe(id, Duration::from_secs(6), TickKind::Behavior);
        sched.subscribe(id, Duration::from_secs(2), TickKind::Behavior);
        assert_eq!(sched.count_for(id), 1);
        assert_eq!(
            sched.interval(id, TickKind::Behavior),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn unsubscribe_missing_is_noop() {
        let sched = RecordingScheduler::new();
        sched.unsubscribe(ActorId(9), TickKind::HealthRegen);
        assert_eq!(sched.count_for(ActorId(9)), 0);
    }
}
