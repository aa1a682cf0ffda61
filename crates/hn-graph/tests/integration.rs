//! Integration tests for hn-graph.

use hn_model::{Component, ComponentKind, Connection, DownstreamRef};

use hn_graph::{Network, TopologyIssue, has_loops, validate, would_create_invalid_loop};

fn conn(id: &str, from: &str, to: &str) -> Connection {
    Connection::new(id, from, "out", to, "in")
}

/// Reservoir -> pump -> valve -> tank, with a legacy-style tee hanging off
/// the valve. Exercises both connection representations end to end.
fn plant() -> (Vec<Component>, Vec<Connection>) {
    let mut valve = Component::new("valve", ComponentKind::Valve, 5.0);
    valve.downstream_connections = vec![DownstreamRef {
        target: "tank".into(),
        length_m: Some(15.0),
    }];
    let components = vec![
        Component::new("res", ComponentKind::Reservoir, 100.0),
        Component::new("pump", ComponentKind::Pump, 2.0),
        valve,
        Component::new("tank", ComponentKind::Tank, 80.0),
    ];
    let connections = vec![
        conn("c1", "res", "pump").with_length(30.0),
        conn("c2", "pump", "valve").with_length(10.0),
    ];
    (components, connections)
}

#[test]
fn mixed_representation_network_is_valid() {
    let (components, connections) = plant();
    let net = Network::new(&components, &connections);

    // Two explicit edges plus one synthesized from the legacy ref.
    assert_eq!(net.edges().len(), 3);
    assert!(net.edges()[2].legacy);
    assert_eq!(net.edges()[2].length_m, 15.0);

    let report = validate(&net);
    assert!(report.is_valid, "unexpected issues: {:?}", report.issues);
    // The tank is a source with no outbound edge, which is advisory only.
    assert_eq!(report.warning_count, 1);
    assert!(report.issues.contains(&TopologyIssue::IdleSource {
        component: "tank".into()
    }));
}

#[test]
fn edit_gesture_rejection() {
    let (components, connections) = plant();
    let net = Network::new(&components, &connections);

    // Closing the chain back onto the reservoir would create a cycle.
    assert!(would_create_invalid_loop(&net, "tank", "res"));
    assert!(would_create_invalid_loop(&net, "valve", "pump"));
    // A second parallel branch would not.
    assert!(!would_create_invalid_loop(&net, "res", "valve"));
    assert!(!has_loops(&net));

    // The probe never mutated the snapshot.
    assert_eq!(net.edges().len(), 3);
    assert!(validate(&net).is_valid);
}

#[test]
fn issue_ordering_is_deterministic() {
    let components = vec![
        Component::new("p1", ComponentKind::Pump, 0.0),
        Component::new("p2", ComponentKind::Pump, 0.0),
    ];
    let connections = vec![conn("c1", "p1", "p1")];
    let net = Network::new(&components, &connections);

    let a = validate(&net);
    let b = validate(&net);
    assert_eq!(a, b);
    // Edge findings come before network-level and per-component findings.
    assert_eq!(
        a.issues[0],
        TopologyIssue::SelfLoop {
            component: "p1".into()
        }
    );
    assert!(a.issues.contains(&TopologyIssue::MissingSource));
}

mod properties {
    use super::*;
    use hn_graph::Severity;
    use proptest::prelude::*;

    /// Arbitrary small edge lists over a fixed id universe, including
    /// dangling targets, self-loops and duplicates.
    fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
        prop::collection::vec((0u8..8, 0u8..8), 0..24)
    }

    fn id(n: u8) -> String {
        format!("n{n}")
    }

    proptest! {
        #[test]
        fn validate_is_total_and_consistent(edges in arb_edges(), n_components in 0u8..6) {
            let components: Vec<Component> = (0..n_components)
                .map(|i| {
                    let kind = if i == 0 { ComponentKind::Reservoir } else { ComponentKind::Pump };
                    Component::new(id(i), kind, f64::from(i))
                })
                .collect();
            let connections: Vec<Connection> = edges
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| conn(&format!("c{i}"), &id(a), &id(b)))
                .collect();

            let net = Network::new(&components, &connections);
            let report = validate(&net);

            // Counts always add up and define validity.
            prop_assert_eq!(report.error_count + report.warning_count, report.issues.len());
            let errors = report.issues.iter().filter(|i| i.severity() == Severity::Error).count();
            prop_assert_eq!(errors, report.error_count);
            prop_assert_eq!(report.is_valid, report.error_count == 0);

            // At most one orphan finding per component.
            let orphans: Vec<_> = report
                .issues
                .iter()
                .filter_map(|i| match i {
                    TopologyIssue::OrphanedComponent { component } => Some(component.clone()),
                    _ => None,
                })
                .collect();
            let mut deduped = orphans.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(orphans.len(), deduped.len());
        }

        #[test]
        fn loop_probe_agrees_with_detector(edges in arb_edges(), from in 0u8..8, to in 0u8..8) {
            let components: Vec<Component> = (0..8)
                .map(|i| Component::new(id(i), ComponentKind::Pump, 0.0))
                .collect();
            let connections: Vec<Connection> = edges
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| conn(&format!("c{i}"), &id(a), &id(b)))
                .collect();
            let net = Network::new(&components, &connections);

            // Committing an edge the probe accepted must not introduce a
            // cycle into a previously acyclic graph.
            if !has_loops(&net) && !would_create_invalid_loop(&net, &id(from), &id(to)) {
                let mut extended = connections.clone();
                extended.push(conn("probe", &id(from), &id(to)));
                let net2 = Network::new(&components, &extended);
                prop_assert!(!has_loops(&net2));
            }
        }
    }
}
