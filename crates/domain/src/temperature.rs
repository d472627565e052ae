//! Temperature sensor — a read-only number property.

use crate::property::{Permission, PropertyDescriptor, PropertyKind};
use crate::time::Timestamp;

pub const DEVICE: &str = "Rempi01 Temperature";

pub const ELEMENT: &str = "Temperature";

pub static TEMPERATURE: PropertyDescriptor = PropertyDescriptor {
    device: DEVICE,
    name: "Temperature",
    label: "Temperature (Centigrade)",
    group: "Status",
    kind: PropertyKind::Number {
        perm: Permission::ReadOnly,
        format: "%.1f",
        decimals: 1,
        // min == max tells clients the range is unbounded
        min: -30.0,
        max: -30.0,
        step: 0.0,
    },
    elements: &[ELEMENT],
};

/// A temperature in degrees Centigrade and when it was measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub timestamp: Timestamp,
}

impl Reading {
    #[must_use]
    pub fn new(value: f64, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    /// The value as clients see it (one decimal place).
    #[must_use]
    pub fn display_value(&self) -> String {
        format!("{:.1}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_display_one_decimal_place() {
        assert_eq!(Reading::new(12.345, now()).display_value(), "12.3");
        assert_eq!(Reading::new(-3.27, now()).display_value(), "-3.3");
        assert_eq!(Reading::new(7.0, now()).display_value(), "7.0");
    }

    #[test]
    fn should_compare_value_and_timestamp() {
        let ts = now();
        assert_eq!(Reading::new(1.0, ts), Reading::new(1.0, ts));
        assert_ne!(Reading::new(1.0, ts), Reading::new(1.5, ts));
    }
}
