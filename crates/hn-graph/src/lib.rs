//! hn-graph: graph-structural layer for hydronet.
//!
//! Provides:
//! - [`Network`]: a read-only, normalized edge view over components and
//!   connections (the shared input contract of all graph algorithms)
//! - [`validate`]: structural well-formedness checks producing a
//!   [`TopologyReport`] of errors and warnings
//! - [`would_create_invalid_loop`] / [`has_loops`]: cycle queries for the
//!   interaction layer
//!
//! Everything here is a pure, synchronous projection: nothing mutates the
//! component or connection data, and no operation panics on malformed
//! input.
//!
//! # Example
//!
//! ```
//! use hn_model::{Component, ComponentKind, Connection};
//! use hn_graph::{Network, validate};
//!
//! let components = vec![
//!     Component::new("res", ComponentKind::Reservoir, 100.0),
//!     Component::new("pump", ComponentKind::Pump, 98.0),
//! ];
//! let connections = vec![Connection::new("c1", "res", "out", "pump", "suction")];
//!
//! let net = Network::new(&components, &connections);
//! let report = validate(&net);
//! assert!(report.is_valid);
//! ```

pub mod network;
pub mod validate;

// Re-exports for ergonomics
pub use network::{Edge, Network};
pub use validate::{
    Severity, TopologyIssue, TopologyReport, has_loops, validate, would_create_invalid_loop,
};
