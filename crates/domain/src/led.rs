//! LED — a two-switch on/off property.

use crate::property::{Permission, PropertyDescriptor, PropertyKind, SwitchRule, SwitchState};

pub const DEVICE: &str = "Rempi01 LED";

pub const LED_ON: &str = "LED ON";
pub const LED_OFF: &str = "LED OFF";

pub static LED: PropertyDescriptor = PropertyDescriptor {
    device: DEVICE,
    name: "LED",
    label: "LED",
    group: "Status",
    kind: PropertyKind::Switch {
        perm: Permission::ReadWrite,
        rule: SwitchRule::OneOfMany,
    },
    elements: &[LED_ON, LED_OFF],
};

/// Switch values describing an LED that is `on`.
#[must_use]
pub fn switches(on: bool) -> [(&'static str, SwitchState); 2] {
    [
        (LED_ON, SwitchState::from(on)),
        (LED_OFF, SwitchState::from(!on)),
    ]
}

/// LED level requested by one switch element, `None` for unknown elements.
#[must_use]
pub fn requested_by(element: &str, value: SwitchState) -> Option<bool> {
    match element {
        LED_ON => Some(value.is_on()),
        LED_OFF => Some(!value.is_on()),
        _ => None,
    }
}
