use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::track::steps::project_steps;
use crate::track::view::{LatestView, TrackingView};

/// Read access to the delivery store. The REST client implements this; tests
/// substitute scripted in-memory stores.
pub trait DeliveryStore: Send + Sync + 'static {
    fn fetch_delivery(&self, id: Uuid) -> impl Future<Output = Result<Delivery, AppError>> + Send;
}

/// Owns the polling task for one tracked delivery. Dropping the tracker
/// aborts the task, so no response issued before teardown can touch the
/// published view afterwards.
pub struct Tracker {
    view_rx: watch::Receiver<TrackingView>,
    task: JoinHandle<()>,
}

impl Tracker {
    pub fn spawn<S: DeliveryStore>(store: Arc<S>, delivery_id: Uuid, poll_interval: Duration) -> Self {
        let (view_tx, view_rx) = watch::channel(TrackingView::Loading);
        let task = tokio::spawn(poll_loop(store, delivery_id, poll_interval, view_tx));

        Self { view_rx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackingView> {
        self.view_rx.clone()
    }

    pub fn view(&self) -> TrackingView {
        self.view_rx.borrow().clone()
    }

    /// True once a terminal view has been published and polling has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop<S: DeliveryStore>(
    store: Arc<S>,
    delivery_id: Uuid,
    poll_interval: Duration,
    view_tx: watch::Sender<TrackingView>,
) {
    let mut ticker = interval(poll_interval);
    // Delayed missed ticks keep requests for one id from piling up behind a
    // slow fetch; the first tick fires immediately.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut latest = LatestView::new();
    let mut next_seq: u64 = 0;

    info!(%delivery_id, "tracking started");

    loop {
        ticker.tick().await;
        next_seq += 1;
        let seq = next_seq;

        let view = match store.fetch_delivery(delivery_id).await {
            Ok(delivery) => view_for(delivery),
            Err(AppError::NotFound(_)) => TrackingView::NotFound,
            Err(err) => {
                // Stale-while-revalidate: a failed tick keeps the last good
                // view on screen and retries on the next tick.
                warn!(%delivery_id, error = %err, "poll tick failed");
                continue;
            }
        };

        if !latest.apply(seq, view) {
            debug!(%delivery_id, seq, "discarded stale response");
            continue;
        }

        let current = latest.view().clone();
        let terminal = current.is_terminal();

        // Unchanged data does not wake renderers.
        view_tx.send_if_modified(|published| {
            if *published == current {
                false
            } else {
                *published = current.clone();
                true
            }
        });

        if terminal {
            info!(%delivery_id, "tracking finished");
            break;
        }
    }
}

fn view_for(delivery: Delivery) -> TrackingView {
    match delivery.status {
        DeliveryStatus::Cancelled => TrackingView::Cancelled,
        status => TrackingView::Progress {
            steps: project_steps(status, delivery.picked_up_at),
            delivery,
        },
    }
}
