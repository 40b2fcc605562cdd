//! Dependency tree rendering with ASCII/Unicode connectors.
//!
//! The graph engine builds a [`TreeNode`] per root; this module draws it:
//!
//! ```text
//! gd-a1b2c3 [open] Implement auth
//! ├── gd-d4e5f6 [closed] Design auth flow
//! └── gd-g7h8i9 [open] Set up JWT library
//!     └── gd-j0k1l2 [closed] Research JWT options
//! ```

use std::io::{self, Write};

use super::color::{colorize_id, colorize_status, dimmed};
use super::OutputConfig;
use crate::domain::{TicketId, TicketStatus};

/// Terminal annotation on a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMarker {
    /// The node closes a cycle back to an ancestor on the same path; it is
    /// not recursed into.
    Cycle,
    /// The id has no ticket record in the snapshot.
    NotFound,
}

/// A node in a dependency tree for rendering purposes.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Ticket id of this node.
    pub id: TicketId,
    /// Ticket status (absent on marker nodes).
    pub status: Option<TicketStatus>,
    /// Ticket title (absent on marker nodes).
    pub title: Option<String>,
    /// Terminal marker, if the node could not be expanded.
    pub marker: Option<TreeMarker>,
    /// Dependents of this node, ordered by id.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Terminal leaf for an id with no ticket record.
    pub(crate) fn not_found(id: TicketId) -> Self {
        Self {
            id,
            status: None,
            title: None,
            marker: Some(TreeMarker::NotFound),
            children: Vec::new(),
        }
    }

    /// Terminal leaf for a node that closes a cycle on the current path.
    pub(crate) fn cycle(id: TicketId) -> Self {
        Self {
            id,
            status: None,
            title: None,
            marker: Some(TreeMarker::Cycle),
            children: Vec::new(),
        }
    }
}

/// Render a tree to a string, one line per node, trailing newline included.
pub fn render_tree(root: &TreeNode, config: &OutputConfig) -> String {
    let mut out = String::new();
    out.push_str(&node_text(root, config));
    out.push('\n');
    render_children(&mut out, &root.children, &[], config);
    out
}

/// Print a tree to stdout.
///
/// # Errors
///
/// Returns any I/O error raised while writing to stdout.
pub fn print_tree(root: &TreeNode, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(render_tree(root, config).as_bytes())
}

/// Recursively render tree children with proper connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines (`│`).
fn render_children(
    out: &mut String,
    children: &[TreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        for &has_more in prefix_segments {
            let segment = if has_more { pipe } else { space };
            out.push_str(&dimmed(segment, config));
        }

        let connector = if is_last { corner } else { branch };
        out.push_str(&dimmed(connector, config));
        out.push_str(&node_text(child, config));
        out.push('\n');

        if !child.children.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            render_children(out, &child.children, &next_segments, config);
        }
    }
}

/// Format one node's line content (without connectors).
fn node_text(node: &TreeNode, config: &OutputConfig) -> String {
    let id_str = colorize_id(node.id.as_str(), config);
    match node.marker {
        Some(TreeMarker::Cycle) => format!("{} {}", id_str, dimmed("(cycle)", config)),
        Some(TreeMarker::NotFound) => format!("{} {}", id_str, dimmed("(not found)", config)),
        None => {
            let status_str = node
                .status
                .map(|s| format!(" [{}]", colorize_status(s, config)))
                .unwrap_or_default();
            let title_str = node
                .title
                .as_deref()
                .map(|t| format!(" {t}"))
                .unwrap_or_default();
            format!("{id_str}{status_str}{title_str}")
        }
    }
}

/// Convert a dependency tree to a JSON value for programmatic output.
pub fn tree_to_json(node: &TreeNode) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "id": node.id.as_str(),
    });

    if let Some(status) = node.status {
        obj["status"] = serde_json::json!(status.to_string());
    }
    if let Some(title) = &node.title {
        obj["title"] = serde_json::json!(title);
    }
    match node.marker {
        Some(TreeMarker::Cycle) => obj["cycle"] = serde_json::json!(true),
        Some(TreeMarker::NotFound) => obj["missing"] = serde_json::json!(true),
        None => {}
    }
    obj["dependents"] = serde_json::json!(node
        .children
        .iter()
        .map(tree_to_json)
        .collect::<Vec<_>>());

    obj
}
