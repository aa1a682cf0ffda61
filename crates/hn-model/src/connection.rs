//! Connection schema: piping descriptors and fittings.

use serde::{Deserialize, Serialize};

/// Pipe wall material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    #[default]
    Steel,
    StainlessSteel,
    Pvc,
    Hdpe,
    Copper,
    CastIron,
    Concrete,
}

/// Piping descriptor carried by every explicit connection.
///
/// Length drives layout spacing and profile scaling; material and diameter
/// are passed through to the solver collaborator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piping {
    #[serde(default)]
    pub material: PipeMaterial,
    pub diameter_m: f64,
    pub length_m: f64,
}

impl Default for Piping {
    fn default() -> Self {
        Self {
            material: PipeMaterial::Steel,
            diameter_m: 0.05,
            length_m: 0.0,
        }
    }
}

/// Inline fitting kinds that add minor losses along a pipe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingKind {
    Elbow90,
    Elbow45,
    TeeThrough,
    TeeBranch,
    GateValve,
    GlobeValve,
    BallValve,
    Union,
    Entrance,
    Exit,
}

/// A fitting entry on a connection, ordered along the flow direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fitting {
    pub kind: FittingKind,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Fitting {
    pub fn new(kind: FittingKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

/// A directed edge between two ports on two different components.
///
/// `from` and `to` naming the same component is a structural error; the
/// topology validator reports it, the model does not reject it (the caller
/// may be mid-edit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub from_component: String,
    pub from_port: String,
    pub to_component: String,
    pub to_port: String,
    #[serde(default)]
    pub piping: Piping,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fittings: Vec<Fitting>,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        from_component: impl Into<String>,
        from_port: impl Into<String>,
        to_component: impl Into<String>,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_component: from_component.into(),
            from_port: from_port.into(),
            to_component: to_component.into(),
            to_port: to_port.into(),
            piping: Piping::default(),
            fittings: Vec::new(),
        }
    }

    pub fn with_length(mut self, length_m: f64) -> Self {
        self.piping.length_m = length_m;
        self
    }
}
