//! Profile linearization.
//!
//! The output ordering is the contract the chart depends on: a component
//! segment is followed by one connection segment per outgoing edge, each
//! connection preceding its target component. On a linear chain of N
//! components this alternates strictly, yielding 2N-1 segments.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use hn_graph::{Edge, Network};
use hn_model::Component;
use hn_results::SolvedResults;

/// Segment for one component symbol on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSegment {
    pub id: String,
    /// Elevation at the first declared port (component datum if none).
    pub upstream_elevation_m: f64,
    /// Elevation at the last declared port (component datum if none).
    pub downstream_elevation_m: f64,
    /// Water-surface band, sources only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_elevation_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_elevation_m: Option<f64>,
    /// Signed head change across the component; negative = loss, positive =
    /// gain (a pump). `None` means no solved data, not zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_change_m: Option<f64>,
}

/// Segment for one traversed connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSegment {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Elevation at the source end (from-port override or source datum).
    pub upstream_elevation_m: f64,
    /// Elevation at the target end.
    pub downstream_elevation_m: f64,
    /// Pipe length; zero for legacy edges with no length data.
    pub length_m: f64,
    /// Negated solved head loss. `None` means no solved data, not zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_change_m: Option<f64>,
}

/// One entry in the flattened profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileSegment {
    Component(ComponentSegment),
    Connection(ConnectionSegment),
}

impl ProfileSegment {
    pub fn is_component(&self) -> bool {
        matches!(self, ProfileSegment::Component(_))
    }

    pub fn id(&self) -> &str {
        match self {
            ProfileSegment::Component(s) => &s.id,
            ProfileSegment::Connection(s) => &s.id,
        }
    }
}

/// Flatten the chain into profile segments, upstream first.
///
/// The root is the first component with no inbound edge, falling back to
/// the first component (the same orientation rule the layout engine uses,
/// so both views agree on "upstream"). Traversal is breadth-first; only
/// components reachable from the root appear — disconnected fragments are
/// the validator's concern, not the chart's. Never panics; missing solved
/// data leaves `head_change_m` unset.
pub fn build_profile(
    net: &Network<'_>,
    results: Option<&SolvedResults>,
) -> Vec<ProfileSegment> {
    let components = net.components();
    if components.is_empty() {
        return Vec::new();
    }

    let mut outgoing: HashMap<&str, Vec<&Edge>> = HashMap::new();
    for edge in net.edges() {
        outgoing.entry(edge.from.as_str()).or_default().push(edge);
    }

    let roots = net.roots();
    let Some(&root) = roots.first() else {
        return Vec::new();
    };

    let mut segments = Vec::with_capacity(2 * components.len());
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root);
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(root);

    while let Some(id) = queue.pop_front() {
        let Some(comp) = net.component(id) else {
            continue;
        };
        segments.push(component_segment(comp, results));
        for edge in outgoing.get(id).into_iter().flatten() {
            segments.push(connection_segment(net, edge, results));
            if visited.insert(edge.to.as_str()) {
                queue.push_back(edge.to.as_str());
            }
        }
    }

    tracing::trace!(
        components = components.len(),
        segments = segments.len(),
        "profile built"
    );
    segments
}

fn component_segment(comp: &Component, results: Option<&SolvedResults>) -> ProfileSegment {
    let upstream = comp
        .ports
        .first()
        .map(|p| comp.port_elevation(&p.id))
        .unwrap_or(comp.elevation_m);
    let downstream = comp
        .ports
        .last()
        .map(|p| comp.port_elevation(&p.id))
        .unwrap_or(comp.elevation_m);
    let band = comp.elevation_band();
    let head_change_m = results.and_then(|r| {
        r.component_head_change(&comp.id, comp.ports.iter().map(|p| p.id.as_str()))
    });

    ProfileSegment::Component(ComponentSegment {
        id: comp.id.clone(),
        upstream_elevation_m: upstream,
        downstream_elevation_m: downstream,
        min_elevation_m: band.map(|(lo, _)| lo),
        max_elevation_m: band.map(|(_, hi)| hi),
        head_change_m,
    })
}

fn connection_segment(
    net: &Network<'_>,
    edge: &Edge,
    results: Option<&SolvedResults>,
) -> ProfileSegment {
    // Port overrides apply when the edge names ports; legacy edges fall
    // back to the component datum on both ends.
    let upstream = net.component(&edge.from).map_or(0.0, |c| {
        edge.from_port
            .as_deref()
            .map_or(c.elevation_m, |p| c.port_elevation(p))
    });
    let downstream = net.component(&edge.to).map_or(0.0, |c| {
        edge.to_port
            .as_deref()
            .map_or(c.elevation_m, |p| c.port_elevation(p))
    });
    let head_change_m = results
        .and_then(|r| r.connection_head_loss(&edge.id))
        .map(|loss| -loss);

    ProfileSegment::Connection(ConnectionSegment {
        id: edge.id.clone(),
        from: edge.from.clone(),
        to: edge.to.clone(),
        upstream_elevation_m: upstream,
        downstream_elevation_m: downstream,
        length_m: edge.length_m,
        head_change_m,
    })
}
