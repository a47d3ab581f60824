//! Error types for the todo store.
//!
//! # Design
//! Lookups return `Result` instead of panicking. `NotFound` carries the
//! requested identifier so the transport can log it; the message rendered to
//! clients is fixed (see `hal::NOT_FOUND_MESSAGE`).

use crate::types::TodoId;

/// Errors returned by `TodoStore` queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    /// No item in the store has the requested identifier.
    #[error("todo {id} not found")]
    NotFound { id: TodoId },
}
