//! Tokio orchestration for the combat-and-behavior core.
//!
//! This crate wires the core's collaborator traits to real machinery: a
//! single worker task owns the [`voidmud_core::WorldState`] and serializes
//! every command and tick (two ticks for the same actor, or an attack
//! concurrent with that actor's own tick, can never interleave); a ticker
//! service runs one interval task per subscription; and a broadcast sink
//! carries outbound text for whatever session layer is bolted on top.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator
//! - [`handle`] exposes the cloneable command facade
//! - [`scheduler`] implements the core's tick scheduling contract
//! - [`services`] provides default collaborator implementations
//! - [`worker`] keeps the world-owning task internal to the crate

pub mod config;
pub mod error;
pub mod handle;
pub mod runtime;
pub mod scheduler;
pub mod services;

mod worker;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use handle::WorldHandle;
pub use runtime::WorldRuntime;
pub use scheduler::TickerService;
pub use services::{ChannelSink, LevelSaves, Outbound};
