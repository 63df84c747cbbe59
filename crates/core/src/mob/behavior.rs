//! The mob autonomy state machine.
//!
//! Each mob is in exactly one behavioral state. Every non-Idle state owns
//! one recurring behavior tick at its own pace; entering a state replaces
//! the previous subscription through the scheduler, so a mob can never
//! accumulate stacked ticks. Ticks arrive from the scheduler as
//! [`on_behavior_tick`] calls; arrivals are pushed in via world events
//! instead of being polled for.

use std::time::Duration;

use strum::Display;

use crate::combat::resolve_mob_attack;
use crate::env::{Dice, MessageSink, MobTemplate, Services, TickKind, TickScheduler};
use crate::error::Result;
use crate::types::{ActorId, RoomId};
use crate::world::{WorldEvent, WorldState};

/// Chance per tick of an idle utterance.
const SAY_CHANCE: f64 = 0.01;

/// Behavioral state of a mob. Exactly one is active at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum BehaviorState {
    #[default]
    Idle,
    Patrolling,
    Hunting,
    Attacking,
}

/// Static behavior settings, fixed at spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorConfig {
    /// Attacks targets on sight.
    pub aggressive: bool,
    /// Walks its area when unoccupied.
    pub patrols: bool,
    /// Chases prey into adjacent rooms.
    pub hunts: bool,
    /// May move between rooms at all.
    pub roams: bool,

    pub patrol_pace: Duration,
    pub hunt_pace: Duration,
    pub attack_pace: Duration,
    pub heal_pace: Duration,

    pub sayings: Vec<String>,
}

impl BehaviorConfig {
    pub fn from_template(template: &MobTemplate) -> Self {
        Self {
            aggressive: template.aggressive,
            patrols: template.patrols,
            hunts: template.hunts,
            roams: template.roams,
            patrol_pace: template.patrol_pace,
            hunt_pace: template.hunt_pace,
            attack_pace: template.attack_pace,
            heal_pace: template.heal_pace,
            sayings: template.sayings.clone(),
        }
    }
}

/// Brings a freshly spawned mob to life: vitals tick plus its starting
/// behavioral state (Patrolling when configured to patrol, else Idle).
pub fn activate(world: &mut WorldState, svc: &mut Services<'_>, mob_id: ActorId) -> Result<()> {
    let heal_pace = world
        .actor(mob_id)?
        .mob()
        .map(|s| s.config.heal_pace)
        .unwrap_or(Duration::from_secs(10));
    svc.scheduler
        .subscribe(mob_id, heal_pace, TickKind::HealthRegen);
    start_patrolling(world, svc.scheduler, mob_id)
}

/// Behavior settings for the actor, or `None` when it is not a mob.
fn mob_config(world: &WorldState, mob_id: ActorId) -> Result<Option<BehaviorConfig>> {
    Ok(world.actor(mob_id)?.mob().map(|s| s.config.clone()))
}

fn set_state(world: &mut WorldState, mob_id: ActorId, state: BehaviorState) -> Result<()> {
    if let Some(sheet) = world.actor_mut(mob_id)?.mob_mut() {
        sheet.state = state;
    }
    Ok(())
}

/// Stops the behavior tick entirely.
pub fn start_idle(
    world: &mut WorldState,
    scheduler: &dyn TickScheduler,
    mob_id: ActorId,
) -> Result<()> {
    scheduler.unsubscribe(mob_id, TickKind::Behavior);
    set_state(world, mob_id, BehaviorState::Idle)
}

/// Enters Patrolling at a leisurely pace, unless this mob never patrols.
pub fn start_patrolling(
    world: &mut WorldState,
    scheduler: &dyn TickScheduler,
    mob_id: ActorId,
) -> Result<()> {
    let Some(config) = mob_config(world, mob_id)? else {
        return Ok(());
    };
    if !config.patrols {
        return start_idle(world, scheduler, mob_id);
    }
    scheduler.subscribe(mob_id, config.patrol_pace, TickKind::Behavior);
    set_state(world, mob_id, BehaviorState::Patrolling)
}

/// Enters Hunting, unless this mob never hunts (falls back to patrol).
pub fn start_hunting(
    world: &mut WorldState,
    scheduler: &dyn TickScheduler,
    mob_id: ActorId,
) -> Result<()> {
    let Some(config) = mob_config(world, mob_id)? else {
        return Ok(());
    };
    if !config.hunts {
        return start_patrolling(world, scheduler, mob_id);
    }
    scheduler.subscribe(mob_id, config.hunt_pace, TickKind::Behavior);
    set_state(world, mob_id, BehaviorState::Hunting)
}

/// Enters Attacking, unless this mob is not aggressive (falls back to
/// hunting).
pub fn start_attacking(
    world: &mut WorldState,
    scheduler: &dyn TickScheduler,
    mob_id: ActorId,
) -> Result<()> {
    let Some(config) = mob_config(world, mob_id)? else {
        return Ok(());
    };
    if !config.aggressive {
        return start_hunting(world, scheduler, mob_id);
    }
    scheduler.subscribe(mob_id, config.attack_pace, TickKind::Behavior);
    set_state(world, mob_id, BehaviorState::Attacking)
}

/// One behavior tick for a mob. Ticks for removed or dead mobs are stale
/// and tolerated as no-ops.
pub fn on_behavior_tick(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    mob_id: ActorId,
) -> Result<()> {
    if !world.contains_actor(mob_id) {
        return Ok(());
    }
    let actor = world.actor(mob_id)?;
    if actor.is_dead() {
        return Ok(());
    }
    let state = actor.mob().map(|s| s.state).unwrap_or_default();
    match state {
        BehaviorState::Idle => Ok(()),
        BehaviorState::Patrolling => do_patrol(world, svc, mob_id),
        BehaviorState::Hunting => do_hunt(world, svc, mob_id),
        BehaviorState::Attacking => do_attack(world, svc, mob_id),
    }
}

/// Patrol tick: maybe mutter, jump on local prey, otherwise wander.
fn do_patrol(world: &mut WorldState, svc: &mut Services<'_>, mob_id: ActorId) -> Result<()> {
    maybe_say_something(world, svc, mob_id)?;

    let Some(config) = mob_config(world, mob_id)? else {
        return Ok(());
    };
    let here = world.actor(mob_id)?.location;

    if config.aggressive && find_target(world, svc, mob_id, here)?.is_some() {
        return start_attacking(world, svc.scheduler, mob_id);
    }

    if config.roams {
        let mob = world.actor(mob_id)?;
        let exits: Vec<RoomId> = world
            .room(here)?
            .traversable_exits(mob)
            .iter()
            .map(|e| e.to)
            .collect();
        if exits.is_empty() {
            // No way out; slink home.
            let home = mob.home;
            world.move_actor(mob_id, home)?;
        } else {
            let dest = exits[svc.dice.index(exits.len())];
            world.move_actor(mob_id, dest)?;
        }
    }
    Ok(())
}

/// Hunt tick: as patrol, but scan adjacent rooms and chase the first prey
/// found; give up and patrol when the trail is cold.
fn do_hunt(world: &mut WorldState, svc: &mut Services<'_>, mob_id: ActorId) -> Result<()> {
    maybe_say_something(world, svc, mob_id)?;

    let Some(config) = mob_config(world, mob_id)? else {
        return Ok(());
    };
    let here = world.actor(mob_id)?.location;

    if config.aggressive && find_target(world, svc, mob_id, here)?.is_some() {
        return start_attacking(world, svc.scheduler, mob_id);
    }

    if config.roams {
        let mob = world.actor(mob_id)?;
        let exits: Vec<RoomId> = world
            .room(here)?
            .traversable_exits(mob)
            .iter()
            .map(|e| e.to)
            .collect();
        if exits.is_empty() {
            let home = world.actor(mob_id)?.home;
            world.move_actor(mob_id, home)?;
            return Ok(());
        }
        for dest in exits {
            if find_target(world, svc, mob_id, dest)?.is_some() {
                world.move_actor(mob_id, dest)?;
                return Ok(());
            }
        }
        // The prey is gone; resume patrolling.
        return start_patrolling(world, svc.scheduler, mob_id);
    }
    Ok(())
}

/// Attack tick: keep swinging while a target remains, else go hunting.
fn do_attack(world: &mut WorldState, svc: &mut Services<'_>, mob_id: ActorId) -> Result<()> {
    maybe_say_something(world, svc, mob_id)?;

    let here = world.actor(mob_id)?.location;
    match find_target(world, svc, mob_id, here)? {
        None => start_hunting(world, svc.scheduler, mob_id),
        Some(target) => resolve_mob_attack(world, svc, mob_id, target),
    }
}

/// Uniform-random pick among eligible occupants of a room: player
/// characters that are alive and not concealed. The chosen target is
/// warned, which is how prey learns it has been noticed.
fn find_target(
    world: &WorldState,
    svc: &mut Services<'_>,
    mob_id: ActorId,
    room: RoomId,
) -> Result<Option<ActorId>> {
    let mob_name = world.actor(mob_id)?.name.clone();
    let candidates: Vec<ActorId> = world
        .occupants(room)?
        .iter()
        .copied()
        .filter(|id| {
            world
                .actor(*id)
                .map(|a| a.is_player() && !a.is_dead() && !a.is_hiding())
                .unwrap_or(false)
        })
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    let choice = candidates[svc.dice.index(candidates.len())];
    svc.messages.notify(
        choice,
        &format!("{mob_name} doesn't like the look of you!"),
    );
    Ok(Some(choice))
}

/// Small chance of an idle utterance each tick.
fn maybe_say_something(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    mob_id: ActorId,
) -> Result<()> {
    let mob = world.actor(mob_id)?;
    let Some(sheet) = mob.mob() else {
        return Ok(());
    };
    let sayings = &sheet.config.sayings;
    if sayings.is_empty() {
        return Ok(());
    }
    let room = mob.location;
    if svc.dice.unit() < SAY_CHANCE {
        let line = sayings[svc.dice.index(sayings.len())].clone();
        svc.messages.notify_room(room, &line, &[]);
    }
    Ok(())
}

/// Push notification from the world: a new occupant arrived. Aggressive
/// mobs that are not already attacking turn on player arrivals at once
/// instead of waiting for their next tick.
pub fn notice_arrival(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    room: RoomId,
    arrival: ActorId,
) -> Result<()> {
    let is_player_arrival = world
        .actor(arrival)
        .map(|a| a.is_player() && !a.is_dead())
        .unwrap_or(false);
    if !is_player_arrival {
        return Ok(());
    }
    let mobs: Vec<ActorId> = world
        .occupants(room)?
        .iter()
        .copied()
        .filter(|id| *id != arrival)
        .collect();
    for mob_id in mobs {
        let Ok(actor) = world.actor(mob_id) else {
            continue;
        };
        let Some(sheet) = actor.mob() else { continue };
        if actor.is_dead() {
            continue;
        }
        if sheet.config.aggressive && sheet.state != BehaviorState::Attacking {
            start_attacking(world, svc.scheduler, mob_id)?;
        }
    }
    Ok(())
}

/// Dispatches drained world events to the mob layer.
pub fn react_to_events(
    world: &mut WorldState,
    svc: &mut Services<'_>,
    events: &[WorldEvent],
) -> Result<()> {
    for event in events {
        if let WorldEvent::OccupantArrived { room, actor } = event {
            notice_arrival(world, svc, *room, *actor)?;
        }
    }
    Ok(())
}
