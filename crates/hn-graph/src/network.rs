//! Graph model reader: a normalized, read-only view over the component chain.
//!
//! Projects (components, connections) into a single edge shape, folding the
//! legacy per-component `downstream_connections` representation into ordinary
//! edges so the algorithms downstream only ever see one kind of edge.

use std::collections::HashMap;

use hn_model::{Component, Connection};

/// A normalized directed edge between two components.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Port ids are absent on edges synthesized from legacy references.
    pub from_port: Option<String>,
    pub to_port: Option<String>,
    pub length_m: f64,
    /// True when synthesized from an embedded [`hn_model::DownstreamRef`].
    pub legacy: bool,
}

/// Read-only snapshot of the component chain with normalized edges.
///
/// Built fresh on every graph change; owns no data beyond its index and the
/// normalized edge list. Edges whose endpoint components do not exist are
/// dropped during normalization (the caller may be mid-edit), while
/// self-loops and duplicates are kept so the validator can report them.
#[derive(Debug)]
pub struct Network<'a> {
    components: &'a [Component],
    index: HashMap<&'a str, usize>,
    edges: Vec<Edge>,
}

impl<'a> Network<'a> {
    /// Normalize both connection representations into one edge list.
    ///
    /// Legacy embedded references only participate for components that have
    /// no explicit outgoing connection, so partially migrated projects do
    /// not grow duplicate edges.
    pub fn new(components: &'a [Component], connections: &'a [Connection]) -> Self {
        let index: HashMap<&str, usize> = components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.as_str(), i))
            .collect();

        let mut edges = Vec::with_capacity(connections.len());
        for conn in connections {
            if !index.contains_key(conn.from_component.as_str())
                || !index.contains_key(conn.to_component.as_str())
            {
                tracing::debug!(
                    connection = %conn.id,
                    "dropping connection with unknown endpoint component"
                );
                continue;
            }
            edges.push(Edge {
                id: conn.id.clone(),
                from: conn.from_component.clone(),
                to: conn.to_component.clone(),
                from_port: Some(conn.from_port.clone()),
                to_port: Some(conn.to_port.clone()),
                length_m: conn.piping.length_m,
                legacy: false,
            });
        }

        for comp in components {
            if comp.downstream_connections.is_empty() {
                continue;
            }
            let has_explicit = edges.iter().any(|e| !e.legacy && e.from == comp.id);
            if has_explicit {
                continue;
            }
            for (i, dref) in comp.downstream_connections.iter().enumerate() {
                if !index.contains_key(dref.target.as_str()) {
                    tracing::debug!(
                        component = %comp.id,
                        target = %dref.target,
                        "dropping legacy downstream reference to unknown component"
                    );
                    continue;
                }
                edges.push(Edge {
                    id: format!("{}__down{}", comp.id, i),
                    from: comp.id.clone(),
                    to: dref.target.clone(),
                    from_port: None,
                    to_port: None,
                    length_m: dref.length_m.unwrap_or(0.0),
                    legacy: true,
                });
            }
        }

        Self {
            components,
            index,
            edges,
        }
    }

    /// All components, in project order.
    pub fn components(&self) -> &'a [Component] {
        self.components
    }

    /// Look up a component by id.
    pub fn component(&self, id: &str) -> Option<&'a Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    /// Normalized edges, explicit connections first, then legacy fallbacks.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Forward adjacency: component id -> downstream component ids, in edge
    /// order. Includes self-loops.
    pub fn downstream_map(&self) -> HashMap<&str, Vec<&str>> {
        let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            map.entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
        }
        map
    }

    /// Reverse adjacency: component id -> upstream component ids.
    pub fn upstream_map(&self) -> HashMap<&str, Vec<&str>> {
        let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            map.entry(edge.to.as_str())
                .or_default()
                .push(edge.from.as_str());
        }
        map
    }

    /// Components with no inbound edge, in project order.
    ///
    /// Falls back to the first component when every component has an
    /// inbound edge (an all-cyclic chain), so traversals always have a
    /// starting point. The layout engine seeds from all of these; the
    /// profile builder takes the first. Empty only for an empty network.
    pub fn roots(&self) -> Vec<&str> {
        let upstream = self.upstream_map();
        let roots: Vec<&str> = self
            .components
            .iter()
            .map(|c| c.id.as_str())
            .filter(|id| !upstream.contains_key(id))
            .collect();
        if roots.is_empty() {
            self.components
                .iter()
                .take(1)
                .map(|c| c.id.as_str())
                .collect()
        } else {
            roots
        }
    }
}
