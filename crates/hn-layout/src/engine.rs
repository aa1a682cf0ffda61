//! Left-to-right placement and orthogonal routing.
//!
//! Placement is a longest-path levelling: every component sits at its
//! maximum edge distance from any root, so a component fed by two paths of
//! different lengths lands past its longest dependency chain and edges point
//! forward in the common case. Routing is per-connection Manhattan with a
//! single vertical jog at the midpoint; connections are routed independently
//! of each other.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use hn_graph::Network;

use crate::geom::{Point, Rect};

/// Spacing and sizing knobs. Every distance the engine uses comes from
/// here; nothing is hardcoded in the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Symbol width, also the horizontal extent of a level slot.
    pub component_width: f64,
    /// Symbol height.
    pub component_height: f64,
    /// Horizontal gap between consecutive levels.
    pub horizontal_gap: f64,
    /// Vertical gap between stacked components within a level.
    pub vertical_gap: f64,
    /// Horizontal centerline the per-level stacks are centered on.
    pub midline_y: f64,
    /// Margin added around the bounding box of all placed components.
    pub padding: f64,
    /// Bounds reported for an empty network.
    pub empty_width: f64,
    pub empty_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            component_width: 120.0,
            component_height: 80.0,
            horizontal_gap: 60.0,
            vertical_gap: 40.0,
            midline_y: 300.0,
            padding: 40.0,
            empty_width: 800.0,
            empty_height: 600.0,
        }
    }
}

/// A placed component symbol; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: String,
    /// Level index (column) assigned by longest-path levelling.
    pub level: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedComponent {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Right-edge midpoint, where outgoing routes leave.
    pub fn outlet_point(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Left-edge midpoint, where incoming routes arrive.
    pub fn inlet_point(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }
}

/// An orthogonal polyline for one connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedConnection {
    pub id: String,
    pub from: String,
    pub to: String,
    pub points: Vec<Point>,
}

/// Full schematic layout: placed symbols, routed polylines, overall bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub components: Vec<PlacedComponent>,
    pub connections: Vec<RoutedConnection>,
    pub bounds: Rect,
}

impl Layout {
    /// Replace the computed position of the given components and re-derive
    /// the affected routes and the bounds.
    ///
    /// Levels are left untouched; this is a position override, not a
    /// re-layout, so a dragged symbol keeps its column assignment.
    pub fn apply_manual_positions(
        &mut self,
        overrides: &HashMap<String, Point>,
        options: &LayoutOptions,
    ) {
        for placed in &mut self.components {
            if let Some(pos) = overrides.get(&placed.id) {
                placed.x = pos.x;
                placed.y = pos.y;
            }
        }

        let by_id: HashMap<&str, &PlacedComponent> = self
            .components
            .iter()
            .map(|p| (p.id.as_str(), p))
            .collect();
        let mut reroutes: Vec<(usize, Vec<Point>)> = Vec::new();
        for (i, route) in self.connections.iter().enumerate() {
            if !overrides.contains_key(&route.from) && !overrides.contains_key(&route.to) {
                continue;
            }
            if let (Some(src), Some(dst)) = (by_id.get(route.from.as_str()), by_id.get(route.to.as_str())) {
                reroutes.push((i, route_points(src, dst)));
            }
        }
        for (i, points) in reroutes {
            self.connections[i].points = points;
        }

        self.bounds = bounds_of(&self.components, options);
    }
}

/// Compute the full schematic layout for a network.
///
/// Deterministic for a given (network, options) pair; never panics. Edges
/// whose endpoints are unplaced (or point back at their own component) are
/// skipped when routing.
pub fn layout(net: &Network<'_>, options: &LayoutOptions) -> Layout {
    let components = net.components();
    if components.is_empty() {
        return Layout {
            components: Vec::new(),
            connections: Vec::new(),
            bounds: Rect::new(0.0, 0.0, options.empty_width, options.empty_height),
        };
    }

    let levels = assign_levels(net);

    // Group by level, preserving project order within a level.
    let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for comp in components {
        let level = levels.get(comp.id.as_str()).copied().unwrap_or(0);
        groups.entry(level).or_default().push(comp.id.as_str());
    }
    let mut slots: HashMap<&str, (usize, usize, usize)> = HashMap::new();
    for (&level, members) in &groups {
        for (i, &id) in members.iter().enumerate() {
            slots.insert(id, (level, i, members.len()));
        }
    }

    let mut placed = Vec::with_capacity(components.len());
    for comp in components {
        let (level, slot, count) = slots
            .get(comp.id.as_str())
            .copied()
            .unwrap_or((0, 0, 1));
        let x = level as f64 * (options.component_width + options.horizontal_gap);
        let stack_height = count as f64 * options.component_height
            + (count as f64 - 1.0) * options.vertical_gap;
        let top = options.midline_y - stack_height / 2.0;
        let y = top + slot as f64 * (options.component_height + options.vertical_gap);
        placed.push(PlacedComponent {
            id: comp.id.clone(),
            level,
            x,
            y,
            width: options.component_width,
            height: options.component_height,
        });
    }

    let by_id: HashMap<&str, &PlacedComponent> =
        placed.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut connections = Vec::with_capacity(net.edges().len());
    for edge in net.edges() {
        if edge.from == edge.to {
            tracing::debug!(edge = %edge.id, "skipping self-loop edge in routing");
            continue;
        }
        let (Some(src), Some(dst)) = (by_id.get(edge.from.as_str()), by_id.get(edge.to.as_str()))
        else {
            continue;
        };
        connections.push(RoutedConnection {
            id: edge.id.clone(),
            from: edge.from.clone(),
            to: edge.to.clone(),
            points: route_points(src, dst),
        });
    }

    let bounds = bounds_of(&placed, options);
    Layout {
        components: placed,
        connections,
        bounds,
    }
}

/// Longest-path level assignment.
///
/// Queue relaxation from all roots: a component's level only ever grows,
/// and never beyond the component count, so cyclic inputs terminate.
/// Components unreachable from any root are parked one level past the
/// current maximum so the layout never omits a node.
fn assign_levels<'n>(net: &'n Network<'_>) -> HashMap<&'n str, usize> {
    let adjacency = net.downstream_map();
    let count = net.components().len();

    let mut levels: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for root in net.roots() {
        levels.insert(root, 0);
        queue.push_back(root);
    }
    while let Some(id) = queue.pop_front() {
        let next = levels.get(id).copied().unwrap_or(0) + 1;
        // A simple path visits at most `count` components.
        if next >= count {
            continue;
        }
        for &child in adjacency.get(id).into_iter().flatten() {
            if child == id {
                continue;
            }
            if levels.get(child).is_none_or(|&l| next > l) {
                levels.insert(child, next);
                queue.push_back(child);
            }
        }
    }

    let overflow = levels.values().max().map_or(0, |m| m + 1);
    for comp in net.components() {
        levels.entry(comp.id.as_str()).or_insert(overflow);
    }
    levels
}

/// Manhattan route: out of the source's right edge, vertical jog at the
/// horizontal midpoint, into the target's left edge. Collapses to a single
/// straight segment when the endpoints are already aligned.
fn route_points(src: &PlacedComponent, dst: &PlacedComponent) -> Vec<Point> {
    let start = src.outlet_point();
    let end = dst.inlet_point();
    if (start.y - end.y).abs() < 1e-9 {
        return vec![start, end];
    }
    let mid_x = (start.x + end.x) / 2.0;
    vec![
        start,
        Point::new(mid_x, start.y),
        Point::new(mid_x, end.y),
        end,
    ]
}

fn bounds_of(placed: &[PlacedComponent], options: &LayoutOptions) -> Rect {
    let mut iter = placed.iter();
    let Some(first) = iter.next() else {
        return Rect::new(0.0, 0.0, options.empty_width, options.empty_height);
    };
    let mut bounds = first.rect();
    for p in iter {
        bounds = bounds.union(&p.rect());
    }
    bounds.expand(options.padding)
}
