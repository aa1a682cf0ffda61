//! Integration tests for hn-layout.

use std::collections::HashSet;

use hn_graph::Network;
use hn_layout::{LayoutOptions, layout};
use hn_model::{Component, ComponentKind, Connection};

use proptest::prelude::*;

fn id(n: u8) -> String {
    format!("n{n}")
}

fn arb_graph() -> impl Strategy<Value = (u8, Vec<(u8, u8)>)> {
    (1u8..10).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..20);
        (Just(n), edges)
    })
}

proptest! {
    #[test]
    fn every_component_is_placed_exactly_once((n, edges) in arb_graph()) {
        let components: Vec<Component> = (0..n)
            .map(|i| Component::new(id(i), ComponentKind::Pump, 0.0))
            .collect();
        let connections: Vec<Connection> = edges
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| Connection::new(format!("c{i}"), id(a), "out", id(b), "in"))
            .collect();

        let net = Network::new(&components, &connections);
        let options = LayoutOptions::default();
        let result = layout(&net, &options);

        let placed_ids: HashSet<&str> = result.components.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(result.components.len(), components.len());
        prop_assert_eq!(placed_ids.len(), components.len());

        for placed in &result.components {
            prop_assert!(result.bounds.contains_rect(&placed.rect()));
            // Padding really surrounds the symbol.
            prop_assert!(placed.x - result.bounds.x >= options.padding - 1e-9);
            prop_assert!(result.bounds.right() - placed.rect().right() >= options.padding - 1e-9);
        }
    }

    #[test]
    fn in_degree_zero_components_sit_at_level_zero((n, edges) in arb_graph()) {
        let components: Vec<Component> = (0..n)
            .map(|i| Component::new(id(i), ComponentKind::Pump, 0.0))
            .collect();
        let connections: Vec<Connection> = edges
            .iter()
            .filter(|(a, b)| a != b)
            .enumerate()
            .map(|(i, &(a, b))| Connection::new(format!("c{i}"), id(a), "out", id(b), "in"))
            .collect();

        let net = Network::new(&components, &connections);
        let result = layout(&net, &LayoutOptions::default());

        let targets: HashSet<&str> = net.edges().iter().map(|e| e.to.as_str()).collect();
        for placed in &result.components {
            if !targets.contains(placed.id.as_str()) {
                prop_assert_eq!(placed.level, 0);
            }
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let components: Vec<Component> = (0..6)
        .map(|i| Component::new(id(i), ComponentKind::Valve, 0.0))
        .collect();
    let connections = vec![
        Connection::new("c1", "n0", "out", "n1", "in"),
        Connection::new("c2", "n0", "out", "n2", "in"),
        Connection::new("c3", "n1", "out", "n3", "in"),
        Connection::new("c4", "n2", "out", "n3", "in"),
        Connection::new("c5", "n3", "out", "n4", "in"),
    ];
    let net = Network::new(&components, &connections);
    let options = LayoutOptions::default();
    assert_eq!(layout(&net, &options), layout(&net, &options));
}
