//! hn-model: schema layer for hydronet.
//!
//! Contains:
//! - components (kinds, categories, ports, elevations, level bands)
//! - connections (piping descriptors, fittings, legacy downstream refs)
//!
//! These types are the disposable snapshot the graph algorithms consume;
//! nothing in this crate mutates or traverses the network.

pub mod component;
pub mod connection;

// Re-exports: nice ergonomics for downstream crates
pub use component::{Component, ComponentCategory, ComponentKind, DownstreamRef, Port, PortDirection};
pub use connection::{Connection, Fitting, FittingKind, PipeMaterial, Piping};

/// Stable string identifier of a component, unique within a project.
pub type ComponentId = String;

/// Stable string identifier of a connection, unique within a project.
pub type ConnectionId = String;
