//! Runtime error types.

use thiserror::Error;
use voidmud_core::WorldError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The world worker has shut down and can no longer take commands.
    #[error("world worker is gone")]
    WorkerGone,

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
