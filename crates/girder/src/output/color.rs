//! Color and styling helpers for tree output.
//!
//! Semantic color theme:
//!   - Reference: cyan   (ticket ids)
//!   - Done:      green  (closed status)
//!   - Active:    yellow (in-progress status)
//!   - Default:   white  (open status)
//!   - Muted:     dimmed (connectors, cycle/not-found markers)

use colored::Colorize;

use super::OutputConfig;
use crate::domain::TicketStatus;

/// Colorize a ticket id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Apply color to status text based on ticket status.
pub(crate) fn colorize_status(status: TicketStatus, config: &OutputConfig) -> String {
    let text = format!("{status}");
    if !config.use_colors {
        return text;
    }
    match status {
        TicketStatus::Open => text.white().to_string(),
        TicketStatus::InProgress => text.yellow().to_string(),
        TicketStatus::Closed => text.green().to_string(),
    }
}

/// Dim muted text (connectors, markers).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}
