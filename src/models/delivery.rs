use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::{Driver, GeoPoint};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    /// Position in the canonical lifecycle ordering
    /// `pending < assigned < picked_up < in_transit < delivered`.
    /// `cancelled` sits outside the ordering and has no position.
    pub fn canonical_index(self) -> Option<usize> {
        match self {
            DeliveryStatus::Pending => Some(0),
            DeliveryStatus::Assigned => Some(1),
            DeliveryStatus::PickedUp => Some(2),
            DeliveryStatus::InTransit => Some(3),
            DeliveryStatus::Delivered => Some(4),
            DeliveryStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub pickup_address: String,
    pub delivery_address: String,
    pub estimated_price: f64,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub driver: Option<Driver>,
}
