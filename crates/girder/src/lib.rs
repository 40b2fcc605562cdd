//! Girder - dependency graph engine for a local issue tracker.
//!
//! This crate interprets the blocking relationships between tickets: it
//! answers readiness queries, detects dependency cycles, pre-checks whether a
//! new dependency edge would introduce a cycle, and renders human-readable
//! dependency trees.
//!
//! The engine never touches storage. The caller materializes a snapshot of
//! tickets, builds a [`graph::DepGraph`] from it, runs queries, and discards
//! the graph. Any change to ticket data goes through the storage layer, after
//! which a fresh graph must be built to observe the new state.

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod graph;
pub mod output;
