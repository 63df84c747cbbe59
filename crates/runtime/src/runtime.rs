//! High-level runtime orchestrator.
//!
//! Owns the worker task, wires the command channel, ticker service, and
//! default collaborator implementations, and hands out [`WorldHandle`]s.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use voidmud_core::{MobCatalog, PcgDice, ThresholdCurve, WorldState};

use crate::config::RuntimeConfig;
use crate::handle::WorldHandle;
use crate::scheduler::TickerService;
use crate::services::{ChannelSink, LevelSaves, Outbound};
use crate::worker::WorldWorker;

pub struct WorldRuntime {
    handle: WorldHandle,
    sink: Arc<ChannelSink>,
    scheduler: Arc<TickerService>,
    worker_task: JoinHandle<()>,
}

impl WorldRuntime {
    /// Starts the worker and schedulers over an already-built world.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(
        config: RuntimeConfig,
        world: WorldState,
        catalog: impl MobCatalog + 'static,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer);

        let sink = Arc::new(ChannelSink::new(config.message_buffer));
        let scheduler = Arc::new(TickerService::new(command_tx.clone()));
        let saves = Arc::new(LevelSaves::new(ThresholdCurve, seed.wrapping_add(1)));

        let worker = WorldWorker::new(
            world,
            PcgDice::seeded(seed),
            sink.clone(),
            saves,
            Arc::new(ThresholdCurve),
            Arc::new(catalog),
            scheduler.clone(),
            config,
            command_rx,
        );
        let worker_task = tokio::spawn(worker.run());
        tracing::info!(seed, "world runtime started");

        Self {
            handle: WorldHandle::new(command_tx),
            sink,
            scheduler,
            worker_task,
        }
    }

    /// Cloneable command handle.
    pub fn handle(&self) -> WorldHandle {
        self.handle.clone()
    }

    /// Subscribes to outbound text for session fan-out.
    pub fn messages(&self) -> broadcast::Receiver<Outbound> {
        self.sink.subscribe()
    }

    /// Stops all tick tasks and the worker.
    pub fn shutdown(self) {
        self.scheduler.clear();
        self.worker_task.abort();
        tracing::info!("world runtime shut down");
    }
}
