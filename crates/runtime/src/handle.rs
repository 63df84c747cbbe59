//! Cloneable command facade over the world worker.

use tokio::sync::{mpsc, oneshot};
use voidmud_core::{ActorId, Spell, WorldState};

use crate::error::{Result, RuntimeError};
use crate::worker::Command;

/// Handle for sending commands into the world. Cheap to clone; every clone
/// talks to the same worker.
#[derive(Clone)]
pub struct WorldHandle {
    command_tx: mpsc::Sender<Command>,
}

impl WorldHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    async fn send_and_wait<T>(
        &self,
        command: Command,
        reply_rx: oneshot::Receiver<Result<T>>,
    ) -> Result<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::WorkerGone)?;
        reply_rx.await.map_err(|_| RuntimeError::WorkerGone)?
    }

    /// Resolves a weapon/claw attack.
    pub async fn attack(&self, attacker: ActorId, target: ActorId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.send_and_wait(
            Command::Attack {
                attacker,
                target,
                reply,
            },
            reply_rx,
        )
        .await
    }

    /// Resolves a bare-fisted punch.
    pub async fn punch(&self, attacker: ActorId, target: ActorId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.send_and_wait(
            Command::Punch {
                attacker,
                target,
                reply,
            },
            reply_rx,
        )
        .await
    }

    /// Casts a spell at an optional target.
    pub async fn cast(
        &self,
        caster: ActorId,
        spell: Spell,
        target: Option<ActorId>,
    ) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.send_and_wait(
            Command::Cast {
                caster,
                spell: Box::new(spell),
                target,
                reply,
            },
            reply_rx,
        )
        .await
    }

    /// Traverses a named exit. Resolves to whether the move happened.
    pub async fn move_through(&self, actor: ActorId, exit: &str) -> Result<bool> {
        let (reply, reply_rx) = oneshot::channel();
        self.send_and_wait(
            Command::MoveThrough {
                actor,
                exit: exit.to_string(),
                reply,
            },
            reply_rx,
        )
        .await
    }

    /// Snapshot of the current world state.
    pub async fn snapshot(&self) -> Result<WorldState> {
        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Query { reply })
            .await
            .map_err(|_| RuntimeError::WorkerGone)?;
        reply_rx.await.map_err(|_| RuntimeError::WorkerGone)
    }
}
