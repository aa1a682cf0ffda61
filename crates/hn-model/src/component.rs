//! Hydraulic component schema: kinds, categories, ports, elevations.

use serde::{Deserialize, Serialize};

/// Structural role of a component, derived from its kind.
///
/// The category decides how the topology validator treats the component:
/// sources seed reachability, fittings may legitimately dead-end, and
/// equipment is expected to sit between an inlet and an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    /// Reference node that feeds the network (reservoir, tank).
    Source,
    /// Branch or end fitting (tee, wye, reducer, dead end, discharge).
    Fitting,
    /// Active or passive inline equipment (pump, valve, orifice, ...).
    Equipment,
}

/// Concrete component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Reservoir,
    Tank,
    Pump,
    Valve,
    CheckValve,
    Orifice,
    Strainer,
    Tee,
    Wye,
    Reducer,
    DeadEnd,
    Discharge,
}

impl ComponentKind {
    /// Structural category this kind belongs to.
    pub fn category(self) -> ComponentCategory {
        match self {
            ComponentKind::Reservoir | ComponentKind::Tank => ComponentCategory::Source,
            ComponentKind::Pump
            | ComponentKind::Valve
            | ComponentKind::CheckValve
            | ComponentKind::Orifice
            | ComponentKind::Strainer => ComponentCategory::Equipment,
            ComponentKind::Tee
            | ComponentKind::Wye
            | ComponentKind::Reducer
            | ComponentKind::DeadEnd
            | ComponentKind::Discharge => ComponentCategory::Fitting,
        }
    }

    /// True for kinds that legitimately terminate a line (no outlet expected).
    pub fn is_terminal(self) -> bool {
        matches!(self, ComponentKind::DeadEnd | ComponentKind::Discharge)
    }
}

/// Flow direction of a port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    Inlet,
    Outlet,
    #[default]
    Bidirectional,
}

/// A named, directional attachment point on a component.
///
/// Ports have no lifecycle of their own; they live and die with the
/// component that declares them. Declaration order matters: result
/// post-processing assumes suction before discharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub direction: PortDirection,
    /// Port-specific elevation override; falls back to the component
    /// elevation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl Port {
    pub fn new(id: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            id: id.into(),
            direction,
            elevation_m: None,
        }
    }

    pub fn at_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = Some(elevation_m);
        self
    }
}

/// Legacy embedded connection reference: target component only, no port.
///
/// Older project files stored the chain as per-component downstream lists.
/// The graph reader normalizes these into ordinary edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownstreamRef {
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
}

/// A node in the component chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: ComponentKind,
    /// Reference datum for the component; single-port components have no
    /// other elevation.
    #[serde(default)]
    pub elevation_m: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    /// Fixed water surface above the datum (reservoirs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_level_m: Option<f64>,
    /// Lowest operating level above the datum (tanks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level_m: Option<f64>,
    /// Highest operating level above the datum (tanks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level_m: Option<f64>,
    /// Legacy embedded connections (see [`DownstreamRef`]).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub downstream_connections: Vec<DownstreamRef>,
}

impl Component {
    /// Create a bare component with no ports and the id doubling as name.
    pub fn new(id: impl Into<String>, kind: ComponentKind, elevation_m: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            elevation_m,
            ports: Vec::new(),
            water_level_m: None,
            min_level_m: None,
            max_level_m: None,
            downstream_connections: Vec::new(),
        }
    }

    /// Append a port, preserving declaration order.
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn category(&self) -> ComponentCategory {
        self.kind.category()
    }

    pub fn is_source(&self) -> bool {
        self.category() == ComponentCategory::Source
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// Look up a port by id.
    pub fn port(&self, port_id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    /// Effective elevation at a port: the port override when present,
    /// otherwise the component elevation. Unknown port ids also fall back
    /// to the component elevation rather than failing.
    pub fn port_elevation(&self, port_id: &str) -> f64 {
        self.port(port_id)
            .and_then(|p| p.elevation_m)
            .unwrap_or(self.elevation_m)
    }

    /// Min/max water-surface elevations for source components.
    ///
    /// Reservoirs hold a fixed surface, so both bounds coincide at
    /// `elevation + water_level`. Tanks span `elevation + min_level` to
    /// `elevation + max_level`. Other kinds have no band.
    pub fn elevation_band(&self) -> Option<(f64, f64)> {
        match self.kind {
            ComponentKind::Reservoir => {
                let surface = self.elevation_m + self.water_level_m?;
                Some((surface, surface))
            }
            ComponentKind::Tank => {
                let lo = self.min_level_m.or(self.max_level_m)?;
                let hi = self.max_level_m.or(self.min_level_m)?;
                Some((self.elevation_m + lo, self.elevation_m + hi))
            }
            _ => None,
        }
    }
}
