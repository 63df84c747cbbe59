//! Default collaborator implementations.

use std::sync::Mutex;

use tokio::sync::broadcast;
use voidmud_core::{
    Actor, ActorId, Dice, ExperienceCurve, Hazard, MessageSink, PcgDice, RoomId, SavingThrows,
};

/// One outbound text message, addressed for a session layer to fan out.
#[derive(Clone, Debug)]
pub enum Outbound {
    Actor {
        to: ActorId,
        text: String,
    },
    Room {
        room: RoomId,
        text: String,
        exclude: Vec<ActorId>,
    },
    Global {
        text: String,
    },
}

/// Message sink that publishes onto a broadcast channel, best-effort: with
/// no subscribers the text is simply dropped.
pub struct ChannelSink {
    tx: broadcast::Sender<Outbound>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Outbound> {
        self.tx.subscribe()
    }
}

impl MessageSink for ChannelSink {
    fn notify(&self, actor: ActorId, text: &str) {
        let _ = self.tx.send(Outbound::Actor {
            to: actor,
            text: text.to_string(),
        });
    }

    fn notify_room(&self, room: RoomId, text: &str, exclude: &[ActorId]) {
        let _ = self.tx.send(Outbound::Room {
            room,
            text: text.to_string(),
            exclude: exclude.to_vec(),
        });
    }

    fn broadcast(&self, text: &str) {
        let _ = self.tx.send(Outbound::Global {
            text: text.to_string(),
        });
    }
}

/// Level-scaled saving throws: resist chance is 25% plus 5% per level,
/// capped at 95%, for every hazard category.
pub struct LevelSaves<C> {
    curve: C,
    dice: Mutex<PcgDice>,
}

impl<C: ExperienceCurve> LevelSaves<C> {
    pub fn new(curve: C, seed: u64) -> Self {
        Self {
            curve,
            dice: Mutex::new(PcgDice::seeded(seed)),
        }
    }
}

impl<C: ExperienceCurve> SavingThrows for LevelSaves<C> {
    fn saving_throw(&self, actor: &Actor, _hazard: Hazard) -> bool {
        let level = actor.level(&self.curve);
        let chance = (25 + 5 * level).min(95);
        let roll = self.dice.lock().expect("saves poisoned").percent();
        roll < chance
    }
}
