use tracing::info;

use crate::error::AppError;
use crate::models::delivery::Delivery;
use crate::models::driver::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub position: GeoPoint,
}

/// Capability set shared by all map backends. Backends only draw; nothing
/// flows back into tracking.
pub trait MapRenderer: Send + Sync {
    fn render_markers(&self, markers: &[Marker]);
    fn render_route(&self, path: &[GeoPoint]);
    fn set_zoom(&self, level: u8);
}

/// Logs markers and routes through `tracing`; the default backend for the
/// CLI, where there is no graphical surface.
pub struct TextMap;

impl MapRenderer for TextMap {
    fn render_markers(&self, markers: &[Marker]) {
        for marker in markers {
            info!(
                label = %marker.label,
                lat = marker.position.lat,
                lng = marker.position.lng,
                "map marker"
            );
        }
    }

    fn render_route(&self, path: &[GeoPoint]) {
        if let (Some(from), Some(to)) = (path.first(), path.last()) {
            info!(
                from_lat = from.lat,
                from_lng = from.lng,
                to_lat = to.lat,
                to_lng = to.lng,
                waypoints = path.len(),
                "map route"
            );
        }
    }

    fn set_zoom(&self, level: u8) {
        info!(level, "map zoom");
    }
}

/// Discards everything. Used when no map output is wanted.
pub struct NullMap;

impl MapRenderer for NullMap {
    fn render_markers(&self, _markers: &[Marker]) {}
    fn render_route(&self, _path: &[GeoPoint]) {}
    fn set_zoom(&self, _level: u8) {}
}

pub fn backend_from_name(name: &str) -> Result<Box<dyn MapRenderer>, AppError> {
    match name {
        "text" => Ok(Box::new(TextMap)),
        "null" | "none" => Ok(Box::new(NullMap)),
        other => Err(AppError::Config(format!("unknown map backend: {other}"))),
    }
}

/// Pickup and dropoff markers, plus the driver's position once one is
/// assigned.
pub fn markers_for(delivery: &Delivery) -> Vec<Marker> {
    let mut markers = vec![
        Marker {
            label: delivery.pickup_address.clone(),
            position: delivery.pickup,
        },
        Marker {
            label: delivery.delivery_address.clone(),
            position: delivery.dropoff,
        },
    ];

    if let Some(driver) = &delivery.driver {
        markers.push(Marker {
            label: driver.name.clone(),
            position: driver.location,
        });
    }

    markers
}

pub fn route_for(delivery: &Delivery) -> Vec<GeoPoint> {
    vec![delivery.pickup, delivery.dropoff]
}
