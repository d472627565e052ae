//! Property vocabulary — states, switch values and static property metadata.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidValue;

/// Overall activity state of a property vector, also the value of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyState {
    Idle,
    Ok,
    Busy,
    Alert,
}

impl PropertyState {
    /// Protocol spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Ok => "Ok",
            Self::Busy => "Busy",
            Self::Alert => "Alert",
        }
    }
}

impl fmt::Display for PropertyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single switch element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    /// Protocol spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = InvalidValue;

    /// Parses `On` / `Off`, ignoring surrounding whitespace and newlines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "On" => Ok(Self::On),
            "Off" => Ok(Self::Off),
            other => Err(InvalidValue::SwitchState(other.to_string())),
        }
    }
}

/// Client access to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ReadOnly,
    ReadWrite,
}

impl Permission {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "ro",
            Self::ReadWrite => "rw",
        }
    }
}

/// How many switches of a vector may be `On` at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRule {
    OneOfMany,
}

impl SwitchRule {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOfMany => "OneOfMany",
        }
    }
}

/// Kind-specific metadata sent only in definition vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    Switch {
        perm: Permission,
        rule: SwitchRule,
    },
    Light,
    Number {
        perm: Permission,
        /// printf-style format advertised to clients, e.g. `%.1f`.
        format: &'static str,
        /// Decimal places used when rendering values.
        decimals: usize,
        min: f64,
        max: f64,
        step: f64,
    },
}

/// Static description of one property vector of one device.
///
/// Defined once per device as a `static` and shared by every vector built
/// for that property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
    pub device: &'static str,
    pub name: &'static str,
    pub label: &'static str,
    pub group: &'static str,
    pub kind: PropertyKind,
    /// Element names, in the order they are emitted.
    pub elements: &'static [&'static str],
}
