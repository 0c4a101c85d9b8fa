use tracing::{debug, trace};

use super::timers::{TimerHandle, TimerId};
use super::{PlayerInput, PlayerPage};

/// Landscape flag, re-measured a short while after each viewport change so
/// the browser has settled on its new dimensions.
#[derive(Debug, Default)]
pub(super) struct OrientationTracker {
    landscape: bool,
    settle: Option<TimerHandle>,
}

impl OrientationTracker {
    pub(super) fn is_landscape(&self) -> bool {
        self.landscape
    }

    pub(super) fn cancel(&mut self) {
        self.settle = None;
    }
}

impl PlayerPage {
    pub(super) fn schedule_orientation_check(&mut self) {
        let timer = self
            .timers
            .schedule(self.config.orientation_settle(), PlayerInput::OrientationSettled);
        // Replacing an unfinished check cancels it.
        self.orientation.settle = Some(timer);
    }

    pub(super) fn on_orientation_settled(&mut self, id: TimerId) {
        if !matches!(&self.orientation.settle, Some(timer) if timer.id() == id) {
            trace!("Ignoring stale orientation check {:?}", id);
            return;
        }
        self.orientation.settle = None;

        let (width, height) = self.services.window.inner_size();
        let landscape = width > height;
        if landscape != self.orientation.landscape {
            debug!(
                "Orientation is now {}",
                if landscape { "landscape" } else { "portrait" }
            );
        }
        self.orientation.landscape = landscape;
    }
}
