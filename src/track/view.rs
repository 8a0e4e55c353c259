use crate::models::delivery::Delivery;
use crate::track::steps::UiStep;

/// What the tracking screen shows for one delivery. Recomputed on every poll
/// tick from the latest fetched record; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingView {
    /// No successful fetch yet.
    Loading,
    /// The store has no record for this id. Terminal, no retry.
    NotFound,
    /// The delivery was cancelled. Terminal, rendered without progress steps.
    Cancelled,
    Progress {
        steps: [UiStep; 3],
        delivery: Delivery,
    },
}

impl TrackingView {
    pub fn is_terminal(&self) -> bool {
        match self {
            TrackingView::NotFound | TrackingView::Cancelled => true,
            TrackingView::Progress { delivery, .. } => delivery.status.is_terminal(),
            TrackingView::Loading => false,
        }
    }
}

/// Sequence-stamped view holder. Each fetch is stamped when issued; a
/// response may only be applied if no later-issued response has been applied
/// already, so a slow fetch resolving late can never roll the display back.
#[derive(Debug)]
pub struct LatestView {
    applied_seq: Option<u64>,
    view: TrackingView,
}

impl LatestView {
    pub fn new() -> Self {
        Self {
            applied_seq: None,
            view: TrackingView::Loading,
        }
    }

    /// Applies `view` if `seq` is newer than the last applied stamp.
    /// Returns false and leaves the current view untouched otherwise.
    pub fn apply(&mut self, seq: u64, view: TrackingView) -> bool {
        if self.applied_seq.is_some_and(|applied| seq <= applied) {
            return false;
        }

        self.applied_seq = Some(seq);
        self.view = view;
        true
    }

    pub fn view(&self) -> &TrackingView {
        &self.view
    }
}

impl Default for LatestView {
    fn default() -> Self {
        Self::new()
    }
}
