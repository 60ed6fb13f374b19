//! Observable wrapper around the clip's selection and playhead

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::model::ClipTimeRange;

/// Authoritative time state for one editing session.
///
/// Every mutation that changes the range is published to subscribers; a
/// mutation that clamps back to the current value publishes nothing.
pub struct TimeModel {
    tx: watch::Sender<ClipTimeRange>,
}

impl TimeModel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ClipTimeRange::default());
        Self { tx }
    }

    /// Copy of the current range
    pub fn snapshot(&self) -> ClipTimeRange {
        *self.tx.borrow()
    }

    /// Receiver that is marked changed on every published mutation
    pub fn subscribe(&self) -> watch::Receiver<ClipTimeRange> {
        self.tx.subscribe()
    }

    /// Returns false when `d` is malformed; the range is left untouched
    pub fn set_duration(&self, d: f64) -> bool {
        let mut accepted = true;
        self.apply(|range| {
            accepted = range.set_duration(d);
        });
        if !accepted {
            warn!(duration = d, "Ignoring malformed media duration");
        }
        accepted
    }

    pub fn set_start(&self, t: f64) -> bool {
        self.apply(|range| {
            range.set_start(t);
        })
    }

    pub fn set_end(&self, t: f64) -> bool {
        self.apply(|range| {
            range.set_end(t);
        })
    }

    pub fn set_playhead(&self, t: f64) -> bool {
        self.apply(|range| {
            range.set_playhead(t);
        })
    }

    /// Run a mutation and notify subscribers if it changed anything.
    /// Returns whether a change was published.
    fn apply(&self, mutate: impl FnOnce(&mut ClipTimeRange)) -> bool {
        self.tx.send_if_modified(|range| {
            let before = *range;
            mutate(range);
            let changed = *range != before;
            if changed {
                debug!(
                    start = range.start,
                    end = range.end,
                    playhead = range.playhead,
                    "Time range updated"
                );
            }
            changed
        })
    }
}

impl Default for TimeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_changes() {
        let model = TimeModel::new();
        let mut rx = model.subscribe();
        assert!(!rx.has_changed().unwrap());

        assert!(model.set_duration(120.0));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().end, 120.0);

        model.set_start(10.0);
        model.set_end(5.0);
        let range = *rx.borrow_and_update();
        assert_eq!(range.start, 10.0);
        assert!((range.end - 10.1).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_noop_is_not_published() {
        let model = TimeModel::new();
        model.set_duration(30.0);
        let mut rx = model.subscribe();
        // End is already at the clip length
        assert!(!model.set_end(45.0));
        assert!(!rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();
    }

    #[test]
    fn test_malformed_duration_leaves_state() {
        let model = TimeModel::new();
        model.set_duration(12.0);
        assert!(!model.set_duration(f64::NAN));
        assert_eq!(model.snapshot(), ClipTimeRange::with_duration(12.0));
    }

    #[test]
    fn test_repeated_duration_publishes_once() {
        let model = TimeModel::new();
        let mut rx = model.subscribe();
        assert!(model.set_duration(8.0));
        let _ = rx.borrow_and_update();
        assert!(model.set_duration(8.0));
        assert!(!rx.has_changed().unwrap());
    }
}
