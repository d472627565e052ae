//! Commands — client requests decoded from inbound frames.

use crate::property::{PropertyDescriptor, SwitchState};

/// The only protocol version the drivers answer.
pub const PROTOCOL_VERSION: &str = "1.7";

/// A decoded client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetProperties(GetProperties),
    SetSwitch(SetSwitch),
}

/// Discovery request. Absent `device` / `name` mean "all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProperties {
    pub version: String,
    pub device: Option<String>,
    pub name: Option<String>,
}

impl GetProperties {
    /// Whether this request asks for the given property.
    ///
    /// A declared device or name must match exactly; an absent one matches
    /// everything.
    #[must_use]
    pub fn wants(&self, property: &PropertyDescriptor) -> bool {
        self.device.as_deref().is_none_or(|d| d == property.device)
            && self.name.as_deref().is_none_or(|n| n == property.name)
    }
}

/// Request to change the switches of one switch vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSwitch {
    pub device: String,
    pub name: String,
    /// Switch element names and requested values, in document order.
    pub switches: Vec<(String, SwitchState)>,
}

impl SetSwitch {
    /// Whether this request addresses exactly the given property.
    #[must_use]
    pub fn targets(&self, property: &PropertyDescriptor) -> bool {
        self.device == property.device && self.name == property.name
    }
}
