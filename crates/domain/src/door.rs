//! Roll-off door — status model and the dwell-driven state machine.
//!
//! The door exposes two properties:
//!
//! | Property | Kind | Elements |
//! |----------|------|----------|
//! | `DOME_SHUTTER` | switch, `rw`, `OneOfMany` | `SHUTTER_OPEN`, `SHUTTER_CLOSE` |
//! | `DOOR_STATE` | light | `OPEN`, `OPENING`, `CLOSING`, `CLOSED` |
//!
//! Commands may only start a movement (`OPENING` / `CLOSING`). The terminal
//! states are reached when the door has been moving for longer than the
//! dwell time, evaluated whenever the status is read.

use std::fmt;
use std::time::{Duration, Instant};

use crate::property::{
    Permission, PropertyDescriptor, PropertyKind, PropertyState, SwitchRule, SwitchState,
};

pub const DEVICE: &str = "Roll off door";

pub const SHUTTER_OPEN: &str = "SHUTTER_OPEN";
pub const SHUTTER_CLOSE: &str = "SHUTTER_CLOSE";

pub static SHUTTER: PropertyDescriptor = PropertyDescriptor {
    device: DEVICE,
    name: "DOME_SHUTTER",
    label: "Roll Off door control",
    group: "Status",
    kind: PropertyKind::Switch {
        perm: Permission::ReadWrite,
        rule: SwitchRule::OneOfMany,
    },
    elements: &[SHUTTER_OPEN, SHUTTER_CLOSE],
};

pub static DOOR_STATE: PropertyDescriptor = PropertyDescriptor {
    device: DEVICE,
    name: "DOOR_STATE",
    label: "Roll Off door status",
    group: "Status",
    kind: PropertyKind::Light,
    elements: &["OPEN", "OPENING", "CLOSING", "CLOSED"],
};

/// Time a movement takes before the door reports a terminal state.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(20);

/// Door status as reported by the limit switches (or their simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoorStatus {
    Open,
    Opening,
    Closing,
    #[default]
    Closed,
}

impl DoorStatus {
    /// Every status, in `DOOR_STATE` element order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Opening, Self::Closing, Self::Closed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Opening => "OPENING",
            Self::Closing => "CLOSING",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether the door is moving.
    #[must_use]
    pub fn is_transitional(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// `DOME_SHUTTER` switch values and vector state for this status.
    ///
    /// The switch on the side the door is heading to is `On`; the vector is
    /// `Busy` while moving and `Ok` once at rest.
    #[must_use]
    pub fn shutter(self) -> ([(&'static str, SwitchState); 2], PropertyState) {
        let open = matches!(self, Self::Open | Self::Opening);
        let state = if self.is_transitional() {
            PropertyState::Busy
        } else {
            PropertyState::Ok
        };
        (
            [
                (SHUTTER_OPEN, SwitchState::from(open)),
                (SHUTTER_CLOSE, SwitchState::from(!open)),
            ],
            state,
        )
    }

    /// `DOOR_STATE` light values: `Ok` for this status, `Idle` for the rest.
    #[must_use]
    pub fn lights(self) -> [(&'static str, PropertyState); 4] {
        Self::ALL.map(|status| {
            let light = if status == self {
                PropertyState::Ok
            } else {
                PropertyState::Idle
            };
            (status.as_str(), light)
        })
    }

    /// Movement requested by one `DOME_SHUTTER` switch element.
    ///
    /// Opening the open switch or releasing the close switch both mean
    /// "open", and symmetrically for closing. Unknown elements map to nothing.
    #[must_use]
    pub fn requested_by(element: &str, value: SwitchState) -> Option<Self> {
        match (element, value) {
            (SHUTTER_OPEN, SwitchState::On) | (SHUTTER_CLOSE, SwitchState::Off) => {
                Some(Self::Opening)
            }
            (SHUTTER_OPEN, SwitchState::Off) | (SHUTTER_CLOSE, SwitchState::On) => {
                Some(Self::Closing)
            }
            _ => None,
        }
    }
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The door state machine.
///
/// Time is passed in explicitly so the model stays free of clocks.
#[derive(Debug, Clone)]
pub struct Door {
    status: DoorStatus,
    last_transition: Instant,
    dwell: Duration,
}

impl Door {
    /// A closed door, at rest since `now`.
    #[must_use]
    pub fn new(now: Instant, dwell: Duration) -> Self {
        Self {
            status: DoorStatus::Closed,
            last_transition: now,
            dwell,
        }
    }

    /// Current status, completing a movement whose dwell has elapsed.
    pub fn status(&mut self, now: Instant) -> DoorStatus {
        if self.status.is_transitional()
            && now.saturating_duration_since(self.last_transition) > self.dwell
        {
            self.status = match self.status {
                DoorStatus::Opening => DoorStatus::Open,
                _ => DoorStatus::Closed,
            };
            self.last_transition = now;
        }
        self.status
    }

    /// Start a movement.
    ///
    /// Only `Opening` / `Closing` are accepted, and only when different from
    /// the current status. Returns whether the request was accepted.
    pub fn request(&mut self, target: DoorStatus, now: Instant) -> bool {
        if !target.is_transitional() || target == self.status(now) {
            return false;
        }
        self.status = target;
        self.last_transition = now;
        true
    }
}
