//! Tokio-backed tick scheduling.
//!
//! One interval task per `(subject, kind)` subscription, each firing
//! `Command::Tick` into the world worker. Subscribing again for the same
//! key aborts the previous task before spawning the replacement, so the
//! swap is atomic from the worker's point of view: ticks are only ever
//! observed from one generation of the subscription.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use voidmud_core::{ActorId, TickKind, TickScheduler};

use crate::worker::Command;

pub struct TickerService {
    command_tx: mpsc::Sender<Command>,
    tasks: Mutex<HashMap<(ActorId, TickKind), JoinHandle<()>>>,
}

impl TickerService {
    pub fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self {
            command_tx,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live subscriptions, for diagnostics.
    pub fn active_count(&self) -> usize {
        self.tasks.lock().expect("ticker poisoned").len()
    }

    /// Aborts every interval task. Used at shutdown.
    pub fn clear(&self) {
        let mut tasks = self.tasks.lock().expect("ticker poisoned");
        for (_, task) in tasks.drain() {
            task.abort();
        }
    }
}

impl TickScheduler for TickerService {
    fn subscribe(&self, subject: ActorId, every: Duration, kind: TickKind) {
        let tx = self.command_tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; swallow it so
            // subscriptions fire one full period after installation.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Command::Tick { subject, kind }).await.is_err() {
                    // Worker is gone; the subscription dies with it.
                    break;
                }
            }
        });

        let mut tasks = self.tasks.lock().expect("ticker poisoned");
        if let Some(previous) = tasks.insert((subject, kind), task) {
            previous.abort();
        }
        tracing::debug!(%subject, ?kind, ?every, "tick subscription installed");
    }

    fn unsubscribe(&self, subject: ActorId, kind: TickKind) {
        let mut tasks = self.tasks.lock().expect("ticker poisoned");
        if let Some(task) = tasks.remove(&(subject, kind)) {
            task.abort();
            tracing::debug!(%subject, ?kind, "tick subscription removed");
        }
        // Removing a missing subscription is a no-op by contract.
    }
}

impl Drop for TickerService {
    fn drop(&mut self) {
        self.clear();
    }
}
