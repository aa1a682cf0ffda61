//! hn-results: immutable solved-result snapshots.
//!
//! The solver collaborator hands back one [`SolvedResults`] per solve,
//! keyed by component id and connection id. This crate only defines the
//! snapshot shape and the lookup conventions (legacy `pipe_<id>` keys,
//! port-declaration ordering); it performs no computation of its own.

pub mod types;

pub use types::{ComponentResult, ConnectionResult, PortResult, SolvedResults};
