use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use parcel_track::api::client::ApiClient;
use parcel_track::config::Config;
use parcel_track::error::AppError;
use parcel_track::map::{self, MapRenderer};
use parcel_track::session::{FileRoleStore, Session};
use parcel_track::track::poller::Tracker;
use parcel_track::track::view::TrackingView;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let delivery_id = std::env::args()
        .nth(1)
        .ok_or_else(|| AppError::Config("usage: parcel-track <delivery-id>".to_string()))?
        .parse::<Uuid>()
        .map_err(|err| AppError::Config(format!("invalid delivery id: {err}")))?;

    let session = Session::load_or_default(FileRoleStore::new(&config.session_file))?;
    info!(role = ?session.role(), %delivery_id, "session loaded");

    let map = map::backend_from_name(&config.map_backend)?;
    let client = Arc::new(ApiClient::new(
        &config.base_url,
        Duration::from_millis(config.http_timeout_ms),
    )?);

    let tracker = Tracker::spawn(
        client,
        delivery_id,
        Duration::from_millis(config.poll_interval_ms),
    );
    let mut view_rx = tracker.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = view_rx.borrow_and_update().clone();
                render(&view, map.as_ref());
                if view.is_terminal() {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn render(view: &TrackingView, map: &dyn MapRenderer) {
    match view {
        TrackingView::Loading => info!("loading delivery"),
        TrackingView::NotFound => info!("delivery not found"),
        TrackingView::Cancelled => info!("delivery cancelled"),
        TrackingView::Progress { steps, delivery } => {
            for step in steps {
                info!(
                    step = step.key.label(),
                    completed = step.completed,
                    active = step.active,
                    time = %step.display_time,
                    "progress"
                );
            }
            if let Some(price) = delivery.final_price {
                info!(price, "final price");
            }
            map.render_markers(&map::markers_for(delivery));
            map.render_route(&map::route_for(delivery));
        }
    }
}
