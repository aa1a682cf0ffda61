//! hn-layout: deterministic schematic layout for the component chain.
//!
//! Provides:
//! - minimal 2-D geometry primitives ([`Point`], [`Rect`])
//! - left-to-right level placement with orthogonal connection routing
//! - manual position overrides that re-route without re-levelling
//!
//! This is a constrained signal-flow layout for hydraulic chains, not a
//! general graph-drawing algorithm: no crossing minimization, no force
//! simulation. The output is a pure projection consumed by the rendering
//! collaborator.

pub mod engine;
pub mod geom;

// Re-exports for ergonomics
pub use engine::{Layout, LayoutOptions, PlacedComponent, RoutedConnection, layout};
pub use geom::{Point, Rect};
