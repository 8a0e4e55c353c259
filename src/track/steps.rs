use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::delivery::DeliveryStatus;

/// The three stages shown in the progress display. Earlier lifecycle states
/// (`pending`, `assigned`) have no step of their own; `cancelled` never
/// reaches this module.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    PickedUp,
    InTransit,
    Delivered,
}

impl StepKey {
    pub const DISPLAY_ORDER: [StepKey; 3] = [StepKey::PickedUp, StepKey::InTransit, StepKey::Delivered];

    /// Position of this step in the full lifecycle ordering. Kept as an
    /// explicit lookup so the mapping survives changes to the leading
    /// (non-displayed) states.
    fn canonical_index(self) -> usize {
        match self {
            StepKey::PickedUp => 2,
            StepKey::InTransit => 3,
            StepKey::Delivered => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepKey::PickedUp => "Picked up",
            StepKey::InTransit => "In transit",
            StepKey::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DisplayTime {
    At(DateTime<Utc>),
    EstimatedArrival,
    Waiting,
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTime::At(at) => write!(f, "{}", at.format("%H:%M")),
            DisplayTime::EstimatedArrival => f.write_str("estimated arrival"),
            DisplayTime::Waiting => f.write_str("waiting"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UiStep {
    pub key: StepKey,
    pub completed: bool,
    pub active: bool,
    pub display_time: DisplayTime,
}

/// Projects a delivery status onto the three-step progress display.
///
/// Pure and total: a status with no position in the lifecycle ordering
/// (`cancelled`) yields all three steps inactive and incomplete, which
/// renders as "nothing reached yet" rather than failing. Callers are
/// expected to branch on `cancelled` before projecting.
pub fn project_steps(status: DeliveryStatus, picked_up_at: Option<DateTime<Utc>>) -> [UiStep; 3] {
    let current = status.canonical_index();

    StepKey::DISPLAY_ORDER.map(|key| {
        let position = key.canonical_index();
        let completed = current.is_some_and(|index| position < index);
        let active = current.is_some_and(|index| position == index);

        let display_time = match picked_up_at {
            Some(at) if completed => DisplayTime::At(at),
            _ if active => DisplayTime::EstimatedArrival,
            _ => DisplayTime::Waiting,
        };

        UiStep {
            key,
            completed,
            active,
            display_time,
        }
    })
}
