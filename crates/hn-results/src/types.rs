//! Solved-result snapshot types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-port solved values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortResult {
    /// Static pressure at the port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_pa: Option<f64>,
    /// Hydraulic grade line at the port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgl_m: Option<f64>,
}

/// Solved values for one component, keyed by port id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    #[serde(default)]
    pub ports: HashMap<String, PortResult>,
}

/// Solved values for one connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionResult {
    /// Head loss along the pipe run, positive = loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_loss_m: Option<f64>,
    /// Volumetric flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_m3_s: Option<f64>,
}

/// One immutable solve snapshot.
///
/// Absent entries mean "no data", never "zero" — consumers must keep the
/// distinction (an unannotated chart segment, not a flat one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolvedResults {
    #[serde(default)]
    pub components: HashMap<String, ComponentResult>,
    #[serde(default)]
    pub connections: HashMap<String, ConnectionResult>,
}

impl SolvedResults {
    /// HGL at one port of a component, if solved.
    pub fn port_hgl(&self, component_id: &str, port_id: &str) -> Option<f64> {
        self.components
            .get(component_id)?
            .ports
            .get(port_id)?
            .hgl_m
    }

    /// Signed head change across a multi-port component: HGL at the last
    /// port minus HGL at the first, taken in **port-declaration order**
    /// (suction before discharge — callers own that ordering).
    ///
    /// Returns `None` unless at least two ports of the component carry an
    /// HGL value.
    pub fn component_head_change<'p>(
        &self,
        component_id: &str,
        port_order: impl Iterator<Item = &'p str>,
    ) -> Option<f64> {
        let result = self.components.get(component_id)?;
        let hgls: Vec<f64> = port_order
            .filter_map(|port_id| result.ports.get(port_id)?.hgl_m)
            .collect();
        if hgls.len() < 2 {
            return None;
        }
        Some(hgls[hgls.len() - 1] - hgls[0])
    }

    /// Head loss for a connection, trying the connection's own id first and
    /// falling back to the legacy `pipe_<id>` key older solvers emit.
    pub fn connection_head_loss(&self, connection_id: &str) -> Option<f64> {
        if let Some(result) = self.connections.get(connection_id) {
            if result.head_loss_m.is_some() {
                return result.head_loss_m;
            }
        }
        self.connections
            .get(&format!("pipe_{connection_id}"))?
            .head_loss_m
    }
}
