//! Vectors — outbound property messages, as values.
//!
//! A vector is either a **definition** (full metadata plus current values,
//! answered to discovery) or an **update** (values only, sent on change).
//! Turning a vector into bytes is the job of a wire codec adapter.

use crate::property::{PropertyDescriptor, PropertyState, SwitchState};
use crate::time::Timestamp;

/// Definition or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Definition,
    Update,
}

/// Switch vector (`defSwitchVector` / `setSwitchVector`).
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchVector {
    pub kind: VectorKind,
    pub property: &'static PropertyDescriptor,
    pub state: PropertyState,
    pub timestamp: Timestamp,
    pub switches: Vec<(&'static str, SwitchState)>,
}

/// Light vector (`defLightVector` / `setLightVector`).
#[derive(Debug, Clone, PartialEq)]
pub struct LightVector {
    pub kind: VectorKind,
    pub property: &'static PropertyDescriptor,
    pub state: Option<PropertyState>,
    pub timestamp: Timestamp,
    pub lights: Vec<(&'static str, PropertyState)>,
}

/// Number vector (`defNumberVector` / `setNumberVector`).
#[derive(Debug, Clone, PartialEq)]
pub struct NumberVector {
    pub kind: VectorKind,
    pub property: &'static PropertyDescriptor,
    pub state: Option<PropertyState>,
    pub timestamp: Timestamp,
    /// Human-readable status line.
    pub message: Option<String>,
    pub numbers: Vec<(&'static str, f64)>,
}

/// Any outbound vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Switch(SwitchVector),
    Light(LightVector),
    Number(NumberVector),
}

impl Vector {
    #[must_use]
    pub fn kind(&self) -> VectorKind {
        match self {
            Self::Switch(v) => v.kind,
            Self::Light(v) => v.kind,
            Self::Number(v) => v.kind,
        }
    }

    #[must_use]
    pub fn property(&self) -> &'static PropertyDescriptor {
        match self {
            Self::Switch(v) => v.property,
            Self::Light(v) => v.property,
            Self::Number(v) => v.property,
        }
    }

    /// Top-level element name of this vector on the wire.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match (self, self.kind()) {
            (Self::Switch(_), VectorKind::Definition) => "defSwitchVector",
            (Self::Switch(_), VectorKind::Update) => "setSwitchVector",
            (Self::Light(_), VectorKind::Definition) => "defLightVector",
            (Self::Light(_), VectorKind::Update) => "setLightVector",
            (Self::Number(_), VectorKind::Definition) => "defNumberVector",
            (Self::Number(_), VectorKind::Update) => "setNumberVector",
        }
    }

    /// Element name of each member on the wire.
    #[must_use]
    pub fn element_tag(&self) -> &'static str {
        match (self, self.kind()) {
            (Self::Switch(_), VectorKind::Definition) => "defSwitch",
            (Self::Switch(_), VectorKind::Update) => "oneSwitch",
            (Self::Light(_), VectorKind::Definition) => "defLight",
            (Self::Light(_), VectorKind::Update) => "oneLight",
            (Self::Number(_), VectorKind::Definition) => "defNumber",
            (Self::Number(_), VectorKind::Update) => "oneNumber",
        }
    }
}
