//! Unified error types surfaced by the runtime API.
//!
//! Wraps calculation failures, worker coordination and catalog loading so
//! clients can bubble them up with consistent context.
use std::path::PathBuf;

use calc_core::CalcError;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("enumeration worker command channel closed")]
    CommandChannelClosed,

    #[error("enumeration worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("enumeration task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("unknown pet: {name}")]
    UnknownPet { name: String },

    #[error("pet {name} has no level-1 snapshot; an observation must be supplied")]
    MissingObservation { name: String },

    #[error("failed to load {what} from {}: {message}", path.display())]
    CatalogLoad {
        what: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("failed to write {what} cache to {}", path.display())]
    CacheWrite {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// The calculation error behind this failure, if any.
    pub fn calc_error(&self) -> Option<&CalcError> {
        match self {
            Self::Calc(error) => Some(error),
            _ => None,
        }
    }
}
