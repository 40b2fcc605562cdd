//! Exhaustive cycle enumeration over the dependency snapshot.
//!
//! Depth-first search with three-color marking (unvisited / in-progress /
//! done), started from every unvisited ticket in ascending id order so
//! results are reproducible. When traversal meets an in-progress node, the
//! current path from that node's first occurrence to the current node — with
//! the repeated node appended — is one cycle. Edges to dangling ids are
//! skipped; duplicate dep entries are visited once per node. The same
//! structural cycle may be reported more than once when reachable from
//! multiple roots; callers that want a deduplicated report normalize the
//! paths themselves.

use std::collections::{HashMap, HashSet};

use crate::domain::{Ticket, TicketId};

/// DFS colors for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited.
    White,
    /// Currently on the DFS stack.
    Gray,
    /// Fully processed.
    Black,
}

/// Enumerate all cycles reachable in the snapshot's deps edges.
pub(super) fn find_cycles_impl(tickets: &HashMap<TicketId, Ticket>) -> Vec<Vec<TicketId>> {
    let mut color: HashMap<&TicketId, Color> =
        tickets.keys().map(|id| (id, Color::White)).collect();
    let mut cycles = Vec::new();
    let mut path: Vec<&TicketId> = Vec::new();

    let mut roots: Vec<&TicketId> = tickets.keys().collect();
    roots.sort();

    for id in roots {
        if color.get(id).copied() == Some(Color::White) {
            dfs(id, tickets, &mut color, &mut path, &mut cycles);
        }
    }

    cycles
}

fn dfs<'a>(
    node: &'a TicketId,
    tickets: &'a HashMap<TicketId, Ticket>,
    color: &mut HashMap<&'a TicketId, Color>,
    path: &mut Vec<&'a TicketId>,
    cycles: &mut Vec<Vec<TicketId>>,
) {
    color.insert(node, Color::Gray);
    path.push(node);

    if let Some(ticket) = tickets.get(node) {
        let mut seen: HashSet<&TicketId> = HashSet::new();
        for neighbor in &ticket.deps {
            if !seen.insert(neighbor) {
                continue;
            }
            // Dangling ids have no color entry and cannot be expanded.
            let Some(state) = color.get(neighbor).copied() else {
                continue;
            };
            match state {
                Color::Gray => {
                    // Back edge: the path from the neighbor's first occurrence
                    // to the current node closes a cycle.
                    let start = path.iter().position(|p| *p == neighbor).unwrap_or(0);
                    let mut cycle: Vec<TicketId> =
                        path[start..].iter().map(|p| (*p).clone()).collect();
                    cycle.push(neighbor.clone());
                    cycles.push(cycle);
                }
                Color::White => dfs(neighbor, tickets, color, path, cycles),
                Color::Black => {}
            }
        }
    }

    path.pop();
    color.insert(node, Color::Black);
}
