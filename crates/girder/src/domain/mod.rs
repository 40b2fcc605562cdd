//! Domain types for ticket tracking.
//!
//! These are the record types the storage layer materializes and hands to the
//! graph engine. The engine reads them but never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Unique identifier for a ticket
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl TicketId {
    /// Create a new ticket ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A ticket record in the tracking system.
///
/// The graph engine only reads `id`, `status`, `deps`, and `title`; the other
/// fields travel with the record for the callers that own them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier for the ticket
    pub id: TicketId,

    /// Ticket title
    pub title: String,

    /// Ticket type
    pub ticket_type: TicketType,

    /// Current status
    pub status: TicketStatus,

    /// Priority level (0 = highest, 4 = lowest)
    pub priority: u8,

    /// Assignee (optional)
    pub assignee: Option<String>,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Blocking dependencies: ids that must reach closed status before this
    /// ticket may proceed. Ordered; may contain duplicates, the ticket's own
    /// id, or ids with no record in the snapshot.
    pub deps: Vec<TicketId>,

    /// Related tickets. Informational only, never blocks.
    pub links: Vec<TicketId>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last update timestamp
    pub updated: DateTime<Utc>,
}

impl Ticket {
    /// Create a ticket with default metadata: a `task` that is `open` at
    /// priority 2, stamped with the current time.
    pub fn new(id: impl Into<TicketId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            ticket_type: TicketType::Task,
            status: TicketStatus::Open,
            priority: 2,
            assignee: None,
            tags: Vec::new(),
            deps: Vec::new(),
            links: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Validate ticket fields before the record is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPriority`] for a priority above 4 and
    /// [`Error::EmptyTitle`] for a blank title.
    pub fn validate(&self) -> Result<()> {
        if self.priority > 4 {
            return Err(Error::InvalidPriority(self.priority));
        }
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        Ok(())
    }
}

/// Status of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    /// Ticket is open and available to work on
    Open,

    /// Ticket is currently being worked on
    InProgress,

    /// Ticket has been completed
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Type of ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// Bug fix
    Bug,

    /// New feature
    Feature,

    /// General task
    Task,

    /// Epic (parent ticket)
    Epic,

    /// Maintenance/chore
    Chore,
}
