//! Dependency graph engine built from a ticket snapshot.
//!
//! The graph is constructed once per command invocation from the full set of
//! tickets the storage layer hands over, queried, and discarded. It carries no
//! state across invocations and never mutates ticket data; a caller that adds
//! or removes a dependency rebuilds the graph to see the new state.
//!
//! # Graph Representation and Edge Direction Convention
//!
//! Two views of the same edges are kept:
//!
//! - `blockers_of` / `blocked_by`: forward and reverse adjacency maps keyed by
//!   ticket id, used by the readiness queries and the tree builder.
//! - A petgraph [`DiGraph`] plus an id → `NodeIndex` map, used for the
//!   cycle-introduction pre-check.
//!
//! Edges point from **dependent -> blocker** (source depends on target): if
//! ticket A lists B in its `deps`, the edge is `A -> B`.
//!
//! # Blocking Semantics
//!
//! A ticket is **blocked** when at least one of its deps resolves to a known
//! ticket that is not closed. A dep id with no record in the snapshot (a
//! dangling reference) never blocks; it surfaces as `(not found)` in tree
//! output. Closed tickets are neither ready nor blocked.
//!
//! # Failure Semantics
//!
//! Read-queries complete on any input, including snapshots that already
//! contain cycles, self-references, duplicate deps, or dangling ids. The only
//! fallible operations are [`DepGraph::require`] and
//! [`DepGraph::check_new_blocker`], which belong to the caller boundary.

mod cycles;

use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::domain::{Ticket, TicketId, TicketStatus};
use crate::error::{Error, Result};
use crate::output::tree::{render_tree, TreeNode};
use crate::output::OutputConfig;

/// Maximum number of trees rendered when no root ticket exists.
///
/// A snapshot where every ticket has dependencies (typically because of
/// cycles) has no natural roots; rendering falls back to the first ids in
/// ascending order, capped to keep the output bounded.
const MAX_FALLBACK_ROOTS: usize = 5;

/// Outcome of [`DepGraph::check_new_blocker`] when the edge is admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerCheck {
    /// The dependency does not exist yet and may be added.
    New,
    /// The dependency is already recorded; adding it again is a no-op.
    AlreadyPresent,
}

/// An immutable dependency graph over one snapshot of tickets.
///
/// Build with [`DepGraph::from_tickets`]; every query runs against the
/// snapshot taken at build time.
#[derive(Debug, Default)]
pub struct DepGraph {
    /// Tickets indexed by ID for O(1) lookups.
    tickets: HashMap<TicketId, Ticket>,

    /// id → the ids it depends on (its direct blockers).
    blockers_of: HashMap<TicketId, HashSet<TicketId>>,

    /// id → the ids that list it as a blocker (its direct dependents).
    blocked_by: HashMap<TicketId, HashSet<TicketId>>,

    /// Dependency graph using petgraph. Nodes exist for every ticket id and
    /// every dangling dep id; edge direction is dependent -> blocker.
    graph: DiGraph<TicketId, ()>,

    /// Mapping from ticket id to graph node index.
    node_map: HashMap<TicketId, NodeIndex>,
}

impl DepGraph {
    /// Build a graph from a snapshot of tickets in one linear pass.
    ///
    /// Each id in a ticket's `deps` becomes a forward edge in `blockers_of`
    /// and a reverse edge in `blocked_by`. Dangling dep ids are recorded as
    /// edge targets but gain no ticket entry; no error is raised for them at
    /// build time. Complexity is O(T + E) for T tickets and E dep edges.
    pub fn from_tickets<I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = Ticket>,
    {
        let mut built = Self::default();
        let mut edges = 0usize;

        for ticket in tickets {
            let node = built.intern(ticket.id.clone());
            for dep_id in &ticket.deps {
                let dep_node = built.intern(dep_id.clone());
                built.graph.add_edge(node, dep_node, ());
                built
                    .blockers_of
                    .entry(ticket.id.clone())
                    .or_default()
                    .insert(dep_id.clone());
                built
                    .blocked_by
                    .entry(dep_id.clone())
                    .or_default()
                    .insert(ticket.id.clone());
                edges += 1;
            }
            built.tickets.insert(ticket.id.clone(), ticket);
        }

        tracing::debug!(
            tickets = built.tickets.len(),
            edges,
            "built dependency graph"
        );
        built
    }

    /// Node index for an id, creating the node on first sight.
    fn intern(&mut self, id: TicketId) -> NodeIndex {
        if let Some(&node) = self.node_map.get(&id) {
            node
        } else {
            let node = self.graph.add_node(id.clone());
            self.node_map.insert(id, node);
            node
        }
    }

    /// Number of tickets in the snapshot.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Return `true` if the snapshot holds no tickets.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Look up a ticket by id.
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Look up a ticket by id, failing if it is not in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TicketNotFound`] for an unknown id.
    pub fn require(&self, id: &TicketId) -> Result<&Ticket> {
        self.tickets
            .get(id)
            .ok_or_else(|| Error::TicketNotFound(id.clone()))
    }

    // ========================================================================
    // Blocked/Ready Queries
    // ========================================================================

    /// Return `true` if the ticket is blocked by unresolved dependencies.
    ///
    /// A ticket is blocked when at least one of its deps resolves to a known
    /// ticket that is not closed. Unknown ids and tickets without deps are
    /// never blocked.
    pub fn is_blocked(&self, id: &TicketId) -> bool {
        let Some(ticket) = self.tickets.get(id) else {
            return false;
        };
        ticket.deps.iter().any(|dep_id| {
            self.tickets
                .get(dep_id)
                .is_some_and(|dep| dep.status != TicketStatus::Closed)
        })
    }

    /// The direct deps currently blocking this ticket, in `deps` order.
    ///
    /// Only deps that resolve to a known, non-closed ticket appear; closed
    /// and dangling deps are filtered out. Unknown ids yield an empty list.
    pub fn get_blockers(&self, id: &TicketId) -> Vec<TicketId> {
        let Some(ticket) = self.tickets.get(id) else {
            return Vec::new();
        };
        ticket
            .deps
            .iter()
            .filter(|dep_id| {
                self.tickets
                    .get(*dep_id)
                    .is_some_and(|dep| dep.status != TicketStatus::Closed)
            })
            .cloned()
            .collect()
    }

    /// All non-closed tickets that are ready to work on (not blocked),
    /// sorted by id.
    pub fn ready_tickets(&self) -> Vec<&Ticket> {
        let mut ready: Vec<&Ticket> = self
            .tickets
            .values()
            .filter(|t| t.status != TicketStatus::Closed && !self.is_blocked(&t.id))
            .collect();
        ready.sort_by(|a, b| a.id.cmp(&b.id));
        ready
    }

    /// All non-closed tickets that are blocked, sorted by id.
    pub fn blocked_tickets(&self) -> Vec<&Ticket> {
        let mut blocked: Vec<&Ticket> = self
            .tickets
            .values()
            .filter(|t| t.status != TicketStatus::Closed && self.is_blocked(&t.id))
            .collect();
        blocked.sort_by(|a, b| a.id.cmp(&b.id));
        blocked
    }

    /// All transitive blockers of a ticket, not just its direct deps.
    ///
    /// Depth-first over `blockers_of` seeded from the ticket's own deps, in
    /// list order; each id appears at most once, in first-discovery order.
    /// Dangling ids appear in the result but are not expanded. The start id
    /// itself is not seeded, though it can appear if a cycle leads back to
    /// it. Terminates on cyclic graphs via the visited set.
    pub fn all_blockers(&self, id: &TicketId) -> Vec<TicketId> {
        let Some(ticket) = self.tickets.get(id) else {
            return Vec::new();
        };

        let mut visited: HashSet<TicketId> = HashSet::new();
        let mut result = Vec::new();
        let mut stack: Vec<TicketId> = ticket.deps.iter().rev().cloned().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(ticket) = self.tickets.get(&current) {
                stack.extend(ticket.deps.iter().rev().cloned());
            }
            result.push(current);
        }

        result
    }

    // ========================================================================
    // Dependency Modification Advisory
    // ========================================================================

    /// Return `true` if adding `candidate_blocker_id` to `ticket_id`'s deps
    /// would create a cycle.
    ///
    /// This holds exactly when `ticket_id` is already reachable from
    /// `candidate_blocker_id` along existing deps edges, i.e. the candidate
    /// blocker (transitively) depends on the ticket it is asked to block.
    /// A ticket always cycles with itself. Terminates on graphs that already
    /// contain cycles or dangling references. The engine never writes the
    /// edge; committing it is the caller's job.
    pub fn would_create_cycle(
        &self,
        ticket_id: &TicketId,
        candidate_blocker_id: &TicketId,
    ) -> bool {
        if ticket_id == candidate_blocker_id {
            return true;
        }
        let (Some(&from), Some(&to)) = (
            self.node_map.get(candidate_blocker_id),
            self.node_map.get(ticket_id),
        ) else {
            return false;
        };
        algo::has_path_connecting(&self.graph, from, to, None)
    }

    /// Validate a proposed new dependency edge `ticket_id -> blocker_id`.
    ///
    /// Runs the full pre-commit sequence: both tickets must exist, a ticket
    /// may not depend on itself, an existing edge is reported as
    /// [`BlockerCheck::AlreadyPresent`] rather than an error, and an edge
    /// that would close a cycle is rejected.
    ///
    /// # Errors
    ///
    /// [`Error::TicketNotFound`] when either id is unknown,
    /// [`Error::SelfDependency`] for `ticket_id == blocker_id`, and
    /// [`Error::DependencyCycle`] when [`Self::would_create_cycle`] holds.
    pub fn check_new_blocker(
        &self,
        ticket_id: &TicketId,
        blocker_id: &TicketId,
    ) -> Result<BlockerCheck> {
        let ticket = self.require(ticket_id)?;
        if !self.tickets.contains_key(blocker_id) {
            return Err(Error::TicketNotFound(blocker_id.clone()));
        }
        if ticket_id == blocker_id {
            return Err(Error::SelfDependency(ticket_id.clone()));
        }
        if ticket.deps.contains(blocker_id) {
            return Ok(BlockerCheck::AlreadyPresent);
        }
        if self.would_create_cycle(ticket_id, blocker_id) {
            return Err(Error::DependencyCycle {
                ticket: ticket_id.clone(),
                blocker: blocker_id.clone(),
            });
        }
        Ok(BlockerCheck::New)
    }

    // ========================================================================
    // Cycle Detection
    // ========================================================================

    /// Find all dependency cycles.
    ///
    /// Each cycle is the DFS path from the repeated node back to itself, with
    /// the repeated node appearing at both ends; a self-loop reports as
    /// `[id, id]`. Traversal starts from every unvisited ticket in ascending
    /// id order so output is reproducible. The same structural cycle may be
    /// reported more than once when it is reachable from multiple DFS roots;
    /// no global dedup is performed.
    pub fn find_cycles(&self) -> Vec<Vec<TicketId>> {
        let cycles = cycles::find_cycles_impl(&self.tickets);
        tracing::debug!(cycles = cycles.len(), "cycle scan complete");
        cycles
    }

    /// Return `true` if at least one dependency cycle exists.
    pub fn has_cycle(&self) -> bool {
        !self.find_cycles().is_empty()
    }

    // ========================================================================
    // Tree Visualization
    // ========================================================================

    /// Build the dependents tree rooted at `root_id`.
    ///
    /// Children are the tickets that list the node as a dep (`blocked_by`
    /// edges), ordered by id. The traversal carries a per-path visited set:
    /// a node revisited on the same downward path becomes a terminal
    /// `(cycle)` leaf, and an id with no ticket record becomes a terminal
    /// `(not found)` leaf. Sibling branches never see each other's visits.
    pub fn dependents_tree(&self, root_id: &TicketId) -> TreeNode {
        let mut visited = HashSet::new();
        self.build_subtree(root_id, &mut visited)
    }

    fn build_subtree(&self, id: &TicketId, visited: &mut HashSet<TicketId>) -> TreeNode {
        let Some(ticket) = self.tickets.get(id) else {
            return TreeNode::not_found(id.clone());
        };
        if visited.contains(id) {
            return TreeNode::cycle(id.clone());
        }

        // The set always holds exactly the current path: entries are removed
        // on unwind so sibling branches are unaffected.
        visited.insert(id.clone());

        let mut child_ids: Vec<&TicketId> = self
            .blocked_by
            .get(id)
            .map(|dependents| dependents.iter().collect())
            .unwrap_or_default();
        child_ids.sort();

        let children = child_ids
            .into_iter()
            .map(|child_id| self.build_subtree(child_id, visited))
            .collect();

        visited.remove(id);

        TreeNode {
            id: id.clone(),
            status: Some(ticket.status),
            title: Some(ticket.title.clone()),
            marker: None,
            children,
        }
    }

    /// Format the dependency tree as plain text.
    ///
    /// With a root id, renders that ticket and its dependents. Without one,
    /// renders one tree per root ticket (a ticket with no dependencies of its
    /// own), sorted by id; if no root exists — every ticket depends on
    /// something, typically because of cycles — the first
    /// [`MAX_FALLBACK_ROOTS`] ids in ascending order are rendered instead.
    /// An empty snapshot yields an empty string.
    pub fn format_tree(&self, root_id: Option<&TicketId>) -> String {
        let config = OutputConfig::new(false, false);
        match root_id {
            Some(id) => render_tree(&self.dependents_tree(id), &config),
            None => {
                let mut roots: Vec<&TicketId> = self
                    .tickets
                    .keys()
                    .filter(|id| !self.blockers_of.contains_key(*id))
                    .collect();
                roots.sort();

                if roots.is_empty() {
                    roots = self.tickets.keys().collect();
                    roots.sort();
                    roots.truncate(MAX_FALLBACK_ROOTS);
                }

                roots
                    .into_iter()
                    .map(|id| render_tree(&self.dependents_tree(id), &config))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tree::TreeMarker;

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn ticket(id: &str, deps: &[&str]) -> Ticket {
        let mut t = Ticket::new(id, format!("Ticket {id}"));
        t.deps = deps.iter().map(|d| TicketId::from(*d)).collect();
        t
    }

    fn ticket_with_status(id: &str, deps: &[&str], status: TicketStatus) -> Ticket {
        let mut t = ticket(id, deps);
        t.status = status;
        t
    }

    fn id(s: &str) -> TicketId {
        TicketId::from(s)
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn empty_snapshot_builds_empty_graph() {
        let graph = DepGraph::from_tickets(Vec::new());
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.ready_tickets().is_empty());
        assert!(graph.blocked_tickets().is_empty());
    }

    #[test]
    fn adjacency_maps_are_inverses() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);

        assert_eq!(graph.len(), 2);
        assert!(graph.blockers_of[&id("gd-aaa")].contains(&id("gd-bbb")));
        assert!(graph.blocked_by[&id("gd-bbb")].contains(&id("gd-aaa")));
        assert!(!graph.blockers_of.contains_key(&id("gd-bbb")));
    }

    #[test]
    fn dangling_dep_gets_edge_but_no_ticket() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &["gd-ghost"])]);

        assert!(graph.ticket(&id("gd-ghost")).is_none());
        assert!(graph.blocked_by[&id("gd-ghost")].contains(&id("gd-aaa")));
        assert!(graph.node_map.contains_key(&id("gd-ghost")));
    }

    // ------------------------------------------------------------------------
    // Blocked/ready queries
    // ------------------------------------------------------------------------

    #[test]
    fn open_dep_blocks() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);
        assert!(graph.is_blocked(&id("gd-aaa")));
        assert!(!graph.is_blocked(&id("gd-bbb")));
    }

    #[test]
    fn closed_dep_does_not_block() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket_with_status("gd-bbb", &[], TicketStatus::Closed),
        ]);
        assert!(!graph.is_blocked(&id("gd-aaa")));
    }

    #[test]
    fn any_open_dep_among_many_blocks() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb", "gd-ccc"]),
            ticket_with_status("gd-bbb", &[], TicketStatus::Closed),
            ticket("gd-ccc", &[]),
        ]);
        assert!(graph.is_blocked(&id("gd-aaa")));
    }

    #[test]
    fn dangling_dep_does_not_block() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &["gd-ghost"])]);
        assert!(!graph.is_blocked(&id("gd-aaa")));
    }

    #[test]
    fn unknown_ticket_is_not_blocked() {
        let graph = DepGraph::from_tickets(Vec::new());
        assert!(!graph.is_blocked(&id("gd-nope")));
    }

    #[test]
    fn get_blockers_keeps_deps_order_and_filters() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-ddd", "gd-bbb", "gd-ghost", "gd-ccc"]),
            ticket("gd-bbb", &[]),
            ticket_with_status("gd-ccc", &[], TicketStatus::Closed),
            ticket_with_status("gd-ddd", &[], TicketStatus::InProgress),
        ]);

        let blockers = graph.get_blockers(&id("gd-aaa"));
        assert_eq!(blockers, vec![id("gd-ddd"), id("gd-bbb")]);
    }

    #[test]
    fn get_blockers_unknown_ticket_is_empty() {
        let graph = DepGraph::from_tickets(Vec::new());
        assert!(graph.get_blockers(&id("gd-nope")).is_empty());
    }

    #[test]
    fn ready_and_blocked_partition_non_closed() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
            ticket("gd-ccc", &["gd-ddd"]),
            ticket_with_status("gd-ddd", &[], TicketStatus::Closed),
        ]);

        let ready: Vec<&str> = graph.ready_tickets().iter().map(|t| t.id.as_str()).collect();
        let blocked: Vec<&str> = graph
            .blocked_tickets()
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(ready, vec!["gd-bbb", "gd-ccc"]);
        assert_eq!(blocked, vec!["gd-aaa"]);
    }

    #[test]
    fn closed_tickets_are_neither_ready_nor_blocked() {
        let graph = DepGraph::from_tickets(vec![ticket_with_status(
            "gd-aaa",
            &[],
            TicketStatus::Closed,
        )]);
        assert!(graph.ready_tickets().is_empty());
        assert!(graph.blocked_tickets().is_empty());
    }

    // ------------------------------------------------------------------------
    // Transitive blockers
    // ------------------------------------------------------------------------

    #[test]
    fn all_blockers_follows_chain_in_discovery_order() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-ccc"]),
            ticket("gd-ccc", &["gd-ddd"]),
            ticket("gd-ddd", &[]),
        ]);

        let blockers = graph.all_blockers(&id("gd-aaa"));
        assert_eq!(blockers, vec![id("gd-bbb"), id("gd-ccc"), id("gd-ddd")]);
    }

    #[test]
    fn all_blockers_visits_deps_in_list_order() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-ccc", "gd-bbb"]),
            ticket("gd-bbb", &[]),
            ticket("gd-ccc", &["gd-ddd"]),
            ticket("gd-ddd", &[]),
        ]);

        let blockers = graph.all_blockers(&id("gd-aaa"));
        assert_eq!(
            blockers,
            vec![id("gd-ccc"), id("gd-ddd"), id("gd-bbb")],
            "depth-first: gd-ccc's subtree is explored before gd-bbb"
        );
    }

    #[test]
    fn all_blockers_terminates_on_cycle_and_can_include_start() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-aaa"]),
        ]);

        let blockers = graph.all_blockers(&id("gd-aaa"));
        assert!(blockers.contains(&id("gd-bbb")));
        assert!(blockers.contains(&id("gd-aaa")));
        assert_eq!(blockers.len(), 2);
    }

    #[test]
    fn all_blockers_includes_dangling_ids() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-ghost"]),
        ]);

        let blockers = graph.all_blockers(&id("gd-aaa"));
        assert_eq!(blockers, vec![id("gd-bbb"), id("gd-ghost")]);
    }

    #[test]
    fn all_blockers_empty_for_no_deps_or_unknown() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[])]);
        assert!(graph.all_blockers(&id("gd-aaa")).is_empty());
        assert!(graph.all_blockers(&id("gd-nope")).is_empty());
    }

    // ------------------------------------------------------------------------
    // Cycle pre-check
    // ------------------------------------------------------------------------

    #[test]
    fn reversing_an_edge_would_create_cycle() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);
        assert!(graph.would_create_cycle(&id("gd-bbb"), &id("gd-aaa")));
    }

    #[test]
    fn transitive_reachability_creates_cycle() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-ccc"]),
            ticket("gd-ccc", &[]),
        ]);
        assert!(graph.would_create_cycle(&id("gd-ccc"), &id("gd-aaa")));
    }

    #[test]
    fn unrelated_tickets_do_not_cycle() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
            ticket("gd-ccc", &[]),
        ]);
        assert!(!graph.would_create_cycle(&id("gd-aaa"), &id("gd-ccc")));
    }

    #[test]
    fn self_dependency_always_cycles() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[])]);
        assert!(graph.would_create_cycle(&id("gd-aaa"), &id("gd-aaa")));
        // Holds even for ids absent from the snapshot.
        assert!(graph.would_create_cycle(&id("gd-nope"), &id("gd-nope")));
    }

    #[test]
    fn duplicate_edge_does_not_cycle() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);
        assert!(!graph.would_create_cycle(&id("gd-aaa"), &id("gd-bbb")));
    }

    #[test]
    fn pre_check_terminates_when_graph_already_cyclic() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-aaa"]),
            ticket("gd-ccc", &[]),
        ]);
        assert!(!graph.would_create_cycle(&id("gd-ccc"), &id("gd-aaa")));
        assert!(graph.would_create_cycle(&id("gd-aaa"), &id("gd-bbb")));
    }

    #[test]
    fn dangling_candidate_cannot_reach_anything() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &["gd-ghost"])]);
        assert!(!graph.would_create_cycle(&id("gd-aaa"), &id("gd-ghost")));
        // But the dangling id is reachable from its dependent.
        assert!(graph.would_create_cycle(&id("gd-ghost"), &id("gd-aaa")));
    }

    // ------------------------------------------------------------------------
    // check_new_blocker
    // ------------------------------------------------------------------------

    #[test]
    fn check_new_blocker_accepts_fresh_edge() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[]), ticket("gd-bbb", &[])]);
        assert_eq!(
            graph.check_new_blocker(&id("gd-aaa"), &id("gd-bbb")).unwrap(),
            BlockerCheck::New
        );
    }

    #[test]
    fn check_new_blocker_reports_existing_edge() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);
        assert_eq!(
            graph.check_new_blocker(&id("gd-aaa"), &id("gd-bbb")).unwrap(),
            BlockerCheck::AlreadyPresent
        );
    }

    #[test]
    fn check_new_blocker_rejects_self() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[])]);
        assert!(matches!(
            graph.check_new_blocker(&id("gd-aaa"), &id("gd-aaa")),
            Err(Error::SelfDependency(_))
        ));
    }

    #[test]
    fn check_new_blocker_rejects_cycle() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &[]),
        ]);
        assert!(matches!(
            graph.check_new_blocker(&id("gd-bbb"), &id("gd-aaa")),
            Err(Error::DependencyCycle { .. })
        ));
    }

    #[test]
    fn check_new_blocker_requires_both_tickets() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[])]);
        assert!(matches!(
            graph.check_new_blocker(&id("gd-nope"), &id("gd-aaa")),
            Err(Error::TicketNotFound(_))
        ));
        assert!(matches!(
            graph.check_new_blocker(&id("gd-aaa"), &id("gd-nope")),
            Err(Error::TicketNotFound(_))
        ));
    }

    #[test]
    fn require_distinguishes_known_and_unknown() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &[])]);
        assert!(graph.require(&id("gd-aaa")).is_ok());
        assert!(matches!(
            graph.require(&id("gd-nope")),
            Err(Error::TicketNotFound(_))
        ));
    }

    // ------------------------------------------------------------------------
    // Dependents tree
    // ------------------------------------------------------------------------

    #[test]
    fn dependents_tree_orders_children_by_id() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-root", &[]),
            ticket("gd-bbb", &["gd-root"]),
            ticket("gd-aaa", &["gd-root"]),
        ]);

        let tree = graph.dependents_tree(&id("gd-root"));
        let child_ids: Vec<&str> = tree.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, vec!["gd-aaa", "gd-bbb"]);
    }

    #[test]
    fn dependents_tree_marks_cycles_per_path() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-aaa"]),
        ]);

        let tree = graph.dependents_tree(&id("gd-aaa"));
        assert_eq!(tree.marker, None);
        let child = &tree.children[0];
        assert_eq!(child.id.as_str(), "gd-bbb");
        let grandchild = &child.children[0];
        assert_eq!(grandchild.marker, Some(TreeMarker::Cycle));
        assert!(grandchild.children.is_empty());
    }

    #[test]
    fn dependents_tree_does_not_mark_siblings_as_cycles() {
        // gd-left and gd-right both depend on gd-root and both are depended
        // on by gd-top; gd-top appears in two sibling branches and must not
        // be mistaken for a cycle in the second one.
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-root", &[]),
            ticket("gd-left", &["gd-root"]),
            ticket("gd-right", &["gd-root"]),
            ticket("gd-top", &["gd-left", "gd-right"]),
        ]);

        let tree = graph.dependents_tree(&id("gd-root"));
        let top_nodes: Vec<&TreeNode> = tree
            .children
            .iter()
            .flat_map(|c| c.children.iter())
            .collect();
        assert_eq!(top_nodes.len(), 2);
        assert!(top_nodes.iter().all(|n| n.marker.is_none()));
    }

    #[test]
    fn dependents_tree_unknown_root_is_not_found() {
        let graph = DepGraph::from_tickets(vec![ticket("gd-aaa", &["gd-ghost"])]);
        let tree = graph.dependents_tree(&id("gd-ghost"));
        assert_eq!(tree.marker, Some(TreeMarker::NotFound));
        assert!(tree.children.is_empty());
    }

    // ------------------------------------------------------------------------
    // format_tree
    // ------------------------------------------------------------------------

    #[test]
    fn format_tree_renders_all_roots_sorted() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-root2", &[]),
            ticket("gd-root1", &[]),
            ticket("gd-child", &["gd-root1"]),
        ]);

        let out = graph.format_tree(None);
        assert!(out.contains("gd-root1"));
        assert!(out.contains("gd-root2"));
        assert!(out.contains("gd-child"));
        let pos1 = out.find("gd-root1").unwrap();
        let pos2 = out.find("gd-root2").unwrap();
        assert!(pos1 < pos2);
    }

    #[test]
    fn format_tree_falls_back_when_everything_has_deps() {
        let graph = DepGraph::from_tickets(vec![
            ticket("gd-aaa", &["gd-bbb"]),
            ticket("gd-bbb", &["gd-aaa"]),
        ]);

        let out = graph.format_tree(None);
        assert!(!out.is_empty());
        assert!(out.contains("gd-aaa"));
        assert!(out.contains("(cycle)"));
    }

    #[test]
    fn format_tree_empty_snapshot_is_empty() {
        let graph = DepGraph::from_tickets(Vec::new());
        assert_eq!(graph.format_tree(None), "");
    }
}
