//! Topology validation over the normalized network.
//!
//! All checks degrade gracefully: malformed references are skipped, never
//! dereferenced, and no function here returns an error or panics. Validity
//! is a property of the report, not of the call.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::network::Network;

/// Severity of a topology issue. Only errors block validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A single structural finding, addressed to the component or connection
/// pair it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyIssue {
    #[error("connection on '{component}' points back at the same component")]
    SelfLoop { component: String },

    #[error("duplicate connection from '{from}' to '{to}'")]
    DuplicateConnection { from: String, to: String },

    #[error("network has no source component (reservoir or tank)")]
    MissingSource,

    #[error("component '{component}' is not connected to any source")]
    OrphanedComponent { component: String },

    #[error("source '{component}' has no outgoing connection")]
    IdleSource { component: String },

    #[error("terminal '{component}' has no incoming connection")]
    UnfedTerminal { component: String },

    #[error("component '{component}' has no connections")]
    UnconnectedComponent { component: String },

    #[error("network contains a circular flow path")]
    CircularFlow,
}

impl TopologyIssue {
    pub fn severity(&self) -> Severity {
        match self {
            TopologyIssue::SelfLoop { .. }
            | TopologyIssue::MissingSource
            | TopologyIssue::OrphanedComponent { .. }
            | TopologyIssue::CircularFlow => Severity::Error,
            TopologyIssue::DuplicateConnection { .. }
            | TopologyIssue::IdleSource { .. }
            | TopologyIssue::UnfedTerminal { .. }
            | TopologyIssue::UnconnectedComponent { .. } => Severity::Warning,
        }
    }

    /// The component this issue is pinned to, when there is exactly one.
    pub fn component_id(&self) -> Option<&str> {
        match self {
            TopologyIssue::SelfLoop { component }
            | TopologyIssue::OrphanedComponent { component }
            | TopologyIssue::IdleSource { component }
            | TopologyIssue::UnfedTerminal { component }
            | TopologyIssue::UnconnectedComponent { component } => Some(component),
            _ => None,
        }
    }
}

/// Outcome of [`validate`]: the full issue list plus summary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyReport {
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    /// Deterministic order: edge findings in edge order, then source and
    /// orphan findings, then per-component endpoint findings in project
    /// order, then the cycle finding.
    pub issues: Vec<TopologyIssue>,
}

impl TopologyReport {
    fn from_issues(issues: Vec<TopologyIssue>) -> Self {
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            is_valid: error_count == 0,
            error_count,
            warning_count,
            issues,
        }
    }

    /// Ids of components flagged as orphaned.
    pub fn orphans(&self) -> HashSet<&str> {
        self.issues
            .iter()
            .filter_map(|i| match i {
                TopologyIssue::OrphanedComponent { component } => Some(component.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Run every structural check and collect the findings.
///
/// An empty network is trivially valid. Warnings never flip `is_valid`.
pub fn validate(net: &Network<'_>) -> TopologyReport {
    let components = net.components();
    if components.is_empty() {
        return TopologyReport::from_issues(Vec::new());
    }

    let mut issues = Vec::new();

    // One pass over the edges builds both adjacency directions and flags
    // self-loops and duplicates on the way. Self-loop edges stay out of the
    // adjacency maps: they carry no structural information.
    let mut downstream: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut upstream: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
    for edge in net.edges() {
        if edge.from == edge.to {
            issues.push(TopologyIssue::SelfLoop {
                component: edge.from.clone(),
            });
            continue;
        }
        if !seen_pairs.insert((edge.from.as_str(), edge.to.as_str())) {
            issues.push(TopologyIssue::DuplicateConnection {
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        }
        downstream
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        upstream
            .entry(edge.to.as_str())
            .or_default()
            .push(edge.from.as_str());
    }

    let sources: Vec<&str> = components
        .iter()
        .filter(|c| c.is_source())
        .map(|c| c.id.as_str())
        .collect();
    if sources.is_empty() {
        issues.push(TopologyIssue::MissingSource);
    }

    // Reachability treats edges as undirected: a component feeding into a
    // source is still part of the network.
    let mut reachable: HashSet<&str> = sources.iter().copied().collect();
    let mut queue: VecDeque<&str> = sources.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        let forward = downstream.get(id).into_iter().flatten();
        let backward = upstream.get(id).into_iter().flatten();
        for &neighbor in forward.chain(backward) {
            if reachable.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    for comp in components {
        if !reachable.contains(comp.id.as_str()) {
            issues.push(TopologyIssue::OrphanedComponent {
                component: comp.id.clone(),
            });
        }
    }

    // Dangling endpoints, one advisory finding per component.
    for comp in components {
        let id = comp.id.as_str();
        let out_degree = downstream.get(id).map_or(0, Vec::len);
        let in_degree = upstream.get(id).map_or(0, Vec::len);
        if comp.is_source() {
            if out_degree == 0 && components.len() > 1 {
                issues.push(TopologyIssue::IdleSource {
                    component: comp.id.clone(),
                });
            }
        } else if comp.is_terminal() {
            if in_degree == 0 {
                issues.push(TopologyIssue::UnfedTerminal {
                    component: comp.id.clone(),
                });
            }
        } else if in_degree == 0 && out_degree == 0 {
            issues.push(TopologyIssue::UnconnectedComponent {
                component: comp.id.clone(),
            });
        }
    }

    // Self-loops are reported separately above, so the cycle check runs on
    // the filtered adjacency and only fires for multi-component cycles.
    if detect_cycle(components.iter().map(|c| c.id.as_str()), &downstream) {
        issues.push(TopologyIssue::CircularFlow);
    }

    let report = TopologyReport::from_issues(issues);
    tracing::debug!(
        components = components.len(),
        errors = report.error_count,
        warnings = report.warning_count,
        "topology validated"
    );
    report
}

/// Would adding the edge `from -> to` close a directed cycle?
///
/// Simulates the insertion on a local copy of the forward adjacency and
/// searches forward from `to`; the real graph is never touched. Called by
/// the interaction layer during drag-to-connect, before the edge is
/// committed.
pub fn would_create_invalid_loop(net: &Network<'_>, from: &str, to: &str) -> bool {
    let mut adjacency: HashMap<&str, Vec<&str>> = net.downstream_map();
    adjacency.entry(from).or_default().push(to);

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(to);
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(to);
    while let Some(id) = queue.pop_front() {
        if id == from {
            return true;
        }
        for &next in adjacency.get(id).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// Does the network contain any directed cycle (self-loops included)?
///
/// Covers components disconnected from every source: the scan starts a
/// search from each still-unvisited component.
pub fn has_loops(net: &Network<'_>) -> bool {
    let adjacency = net.downstream_map();
    detect_cycle(net.components().iter().map(|c| c.id.as_str()), &adjacency)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

/// Three-color depth-first search with an explicit stack (no recursion, so
/// pathological chains cannot blow the call stack). A back-edge to a gray
/// node is a cycle.
fn detect_cycle<'n>(
    nodes: impl Iterator<Item = &'n str>,
    adjacency: &HashMap<&'n str, Vec<&'n str>>,
) -> bool {
    // Unvisited nodes are simply absent from the map (white).
    let mut color: HashMap<&str, Color> = HashMap::new();
    for start in nodes {
        if color.contains_key(start) {
            continue;
        }
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        color.insert(start, Color::Gray);
        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let children = adjacency.get(node).map_or(&[][..], Vec::as_slice);
            if frame.1 < children.len() {
                let child = children[frame.1];
                frame.1 += 1;
                match color.get(child) {
                    Some(Color::Gray) => return true,
                    Some(Color::Black) => {}
                    None => {
                        color.insert(child, Color::Gray);
                        stack.push((child, 0));
                    }
                }
            } else {
                color.insert(node, Color::Black);
                stack.pop();
            }
        }
    }
    false
}
