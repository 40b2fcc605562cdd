//! Error types for girder's caller-facing boundaries.
//!
//! Graph read-queries never fail; the variants here are produced only by
//! direct lookups and by the dependency-add advisory check.

use thiserror::Error;

use crate::domain::TicketId;

/// The error type for girder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Ticket does not exist in the current snapshot.
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// A ticket was asked to depend on itself.
    #[error("Ticket cannot depend on itself: {0}")]
    SelfDependency(TicketId),

    /// Adding the proposed dependency would close a cycle.
    #[error("Adding {blocker} as a dependency of {ticket} would create a cycle")]
    DependencyCycle {
        /// The ticket that would gain the new dependency.
        ticket: TicketId,
        /// The proposed blocker.
        blocker: TicketId,
    },

    /// Priority outside the 0-4 range.
    #[error("Priority must be 0-4, got {0}")]
    InvalidPriority(u8),

    /// Ticket title is empty or whitespace-only.
    #[error("Title must not be empty")]
    EmptyTitle,
}

/// A specialized Result type for girder operations.
pub type Result<T> = std::result::Result<T, Error>;
