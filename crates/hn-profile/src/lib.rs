//! hn-profile: elevation / hydraulic-grade-line profile construction.
//!
//! Flattens the component chain into an ordered sequence of typed segments
//! for the 1-D profile chart: one segment per component, one per traversed
//! connection, annotated with elevations, level bands and solved head
//! changes. Pure projection; the chart collaborator owns all rendering.

pub mod builder;

pub use builder::{ComponentSegment, ConnectionSegment, ProfileSegment, build_profile};
