//! The world-owning worker task.
//!
//! The worker is the single owner of the [`WorldState`]: commands from
//! handles and ticks from the scheduler all arrive on one channel and are
//! processed to completion, one at a time. After every operation the
//! pending world events are drained and dispatched (arrival aggro, death
//! logging) before the next message is taken.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use voidmud_core::{
    ActorId, ExperienceCurve, MessageSink, MobCatalog, PcgDice, SavingThrows, Services, Spell,
    TickKind, TickScheduler, WorldEvent, WorldState, combat, mob, spell, vitals,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::scheduler::TickerService;

/// Messages the worker processes.
pub enum Command {
    Attack {
        attacker: ActorId,
        target: ActorId,
        reply: oneshot::Sender<Result<()>>,
    },
    Punch {
        attacker: ActorId,
        target: ActorId,
        reply: oneshot::Sender<Result<()>>,
    },
    Cast {
        caster: ActorId,
        spell: Box<Spell>,
        target: Option<ActorId>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Traverse a named exit out of the actor's current room. Replies with
    /// whether the move happened.
    MoveThrough {
        actor: ActorId,
        exit: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    /// Read-only snapshot of the whole world.
    Query {
        reply: oneshot::Sender<WorldState>,
    },
    Tick {
        subject: ActorId,
        kind: TickKind,
    },
}

pub struct WorldWorker {
    world: WorldState,
    dice: PcgDice,
    sink: Arc<dyn MessageSink>,
    saves: Arc<dyn SavingThrows>,
    curve: Arc<dyn ExperienceCurve>,
    catalog: Arc<dyn MobCatalog>,
    scheduler: Arc<TickerService>,
    config: RuntimeConfig,
    command_rx: mpsc::Receiver<Command>,
}

impl WorldWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        world: WorldState,
        dice: PcgDice,
        sink: Arc<dyn MessageSink>,
        saves: Arc<dyn SavingThrows>,
        curve: Arc<dyn ExperienceCurve>,
        catalog: Arc<dyn MobCatalog>,
        scheduler: Arc<TickerService>,
        config: RuntimeConfig,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            world,
            dice,
            sink,
            saves,
            curve,
            catalog,
            scheduler,
            config,
            command_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        self.bootstrap();
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        tracing::debug!("world worker channel closed, shutting down");
    }

    /// Installs recurring ticks for everything already in the world: mob
    /// behavior and vitals, player vitals, and (optionally) a mob
    /// generator anchored to each player.
    fn bootstrap(&mut self) {
        let actors: Vec<(ActorId, bool)> = self
            .world
            .actors()
            .map(|a| (a.id, a.is_player()))
            .collect();
        for (id, is_player) in actors {
            if is_player {
                self.scheduler
                    .subscribe(id, self.config.player_heal_pace, TickKind::HealthRegen);
                self.scheduler
                    .subscribe(id, self.config.player_mana_pace, TickKind::ManaRegen);
                if self.config.spawn_generators {
                    self.scheduler
                        .subscribe(id, self.config.generator_pace, TickKind::MobGenerator);
                }
            } else {
                let result = self.with_services(|world, svc| mob::activate(world, svc, id));
                if let Err(error) = result {
                    tracing::warn!(%id, %error, "failed to activate mob");
                }
            }
        }
        tracing::info!(
            subscriptions = self.scheduler.active_count(),
            "world worker bootstrapped"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Attack {
                attacker,
                target,
                reply,
            } => {
                let result = self
                    .with_services(|world, svc| combat::resolve_attack(world, svc, attacker, target))
                    .map_err(RuntimeError::from);
                let _ = reply.send(result);
            }
            Command::Punch {
                attacker,
                target,
                reply,
            } => {
                let result = self
                    .with_services(|world, svc| combat::resolve_punch(world, svc, attacker, target))
                    .map_err(RuntimeError::from);
                let _ = reply.send(result);
            }
            Command::Cast {
                caster,
                spell: cast_spell,
                target,
                reply,
            } => {
                let result = self
                    .with_services(|world, svc| {
                        spell::cast(world, svc, caster, &cast_spell, target)
                    })
                    .map_err(RuntimeError::from);
                let _ = reply.send(result);
            }
            Command::MoveThrough { actor, exit, reply } => {
                let result = self
                    .with_services(|world, svc| move_through(world, svc, actor, &exit))
                    .map_err(RuntimeError::from);
                let _ = reply.send(result);
            }
            Command::Query { reply } => {
                let _ = reply.send(self.world.clone());
            }
            Command::Tick { subject, kind } => {
                let result = match kind {
                    TickKind::Behavior => {
                        self.with_services(|world, svc| mob::on_behavior_tick(world, svc, subject))
                    }
                    TickKind::HealthRegen => {
                        let amount = self.config.player_heal_amount;
                        self.with_services(|world, svc| {
                            vitals::health_regen_tick(world, svc, subject, amount)
                        })
                    }
                    TickKind::ManaRegen => {
                        let amount = self.config.player_mana_amount;
                        self.with_services(|world, svc| {
                            vitals::mana_regen_tick(world, svc, subject, amount)
                        })
                    }
                    TickKind::MobGenerator => {
                        self.with_services(|world, svc| mob::generator_tick(world, svc, subject))
                    }
                };
                if let Err(error) = result {
                    tracing::warn!(%subject, ?kind, %error, "tick failed");
                }
            }
        }
    }

    /// Runs an operation against the world with a fully wired service
    /// bundle, then drains and dispatches the events it produced.
    fn with_services<T>(
        &mut self,
        operation: impl FnOnce(&mut WorldState, &mut Services<'_>) -> voidmud_core::Result<T>,
    ) -> voidmud_core::Result<T> {
        let mut svc = Services {
            messages: self.sink.as_ref(),
            saves: self.saves.as_ref(),
            xp: self.curve.as_ref(),
            scheduler: &*self.scheduler,
            catalog: self.catalog.as_ref(),
            dice: &mut self.dice,
        };
        let output = operation(&mut self.world, &mut svc)?;

        let events = self.world.drain_events();
        for event in &events {
            match event {
                WorldEvent::ActorDied { actor, killer } => {
                    tracing::info!(actor = %actor, killer = ?killer, "actor died");
                }
                WorldEvent::MobRemoved { actor } => {
                    tracing::debug!(actor = %actor, "mob removed from world");
                }
                WorldEvent::OccupantArrived { .. } => {}
            }
        }
        mob::react_to_events(&mut self.world, &mut svc, &events)?;
        Ok(output)
    }
}

/// Traverses a named exit if the actor may use it.
fn move_through(
    world: &mut WorldState,
    _svc: &mut Services<'_>,
    actor_id: ActorId,
    exit_name: &str,
) -> voidmud_core::Result<bool> {
    let actor = world.actor(actor_id)?;
    let room = world.room(actor.location)?;
    let dest = room
        .exits
        .iter()
        .find(|e| e.name == exit_name && e.may_traverse(actor))
        .map(|e| e.to);
    match dest {
        Some(dest) => {
            world.move_actor(actor_id, dest)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
