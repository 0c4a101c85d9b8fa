use serde::Serialize;
use tracing::{debug, trace};

use super::timers::{TimerHandle, TimerId};
use super::{PlayerInput, PlayerPage};

/// Side panels over the video. At most one is ever visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    Settings,
    EpisodeList,
}

#[derive(Debug)]
pub(super) enum OverlayState {
    Closed,
    Open(Overlay),
    /// The other panel was just closed; `to` opens once its exit transition is over.
    Switching { to: Overlay, timer: TimerHandle },
}

impl OverlayState {
    pub(super) fn visible(&self) -> Option<Overlay> {
        match self {
            OverlayState::Open(overlay) => Some(*overlay),
            _ => None,
        }
    }

    /// Whether a panel is open or about to open.
    pub(super) fn is_any_open(&self) -> bool {
        !matches!(self, OverlayState::Closed)
    }

    fn targets(&self, overlay: Overlay) -> bool {
        match self {
            OverlayState::Open(open) => *open == overlay,
            OverlayState::Switching { to, .. } => *to == overlay,
            OverlayState::Closed => false,
        }
    }
}

impl PlayerPage {
    pub(super) fn toggle_overlay(&mut self, target: Overlay) {
        if target == Overlay::EpisodeList && self.episodes.is_empty() {
            debug!("No episodes, ignoring episode list toggle");
            return;
        }

        let current = std::mem::replace(&mut self.overlay, OverlayState::Closed);
        self.overlay = match current {
            OverlayState::Closed => OverlayState::Open(target),
            OverlayState::Open(open) if open == target => OverlayState::Closed,
            OverlayState::Open(open) => {
                debug!("Closing {:?} before opening {:?}", open, target);
                let timer = self
                    .timers
                    .schedule(self.config.overlay_switch_delay(), move |timer| {
                        PlayerInput::OpenOverlay {
                            overlay: target,
                            timer,
                        }
                    });
                OverlayState::Switching { to: target, timer }
            }
            OverlayState::Switching { to, timer } => {
                timer.cancel();
                if to == target {
                    OverlayState::Closed
                } else {
                    OverlayState::Open(target)
                }
            }
        };

        if self.overlay.is_any_open() {
            self.cancel_controls_timer();
        }
    }

    pub(super) fn on_overlay_timer(&mut self, overlay: Overlay, id: TimerId) {
        let current = matches!(
            &self.overlay,
            OverlayState::Switching { to, timer } if *to == overlay && timer.id() == id
        );
        if current {
            debug!("Opening {:?}", overlay);
            self.overlay = OverlayState::Open(overlay);
        } else {
            trace!("Ignoring stale overlay timer {:?}", id);
        }
    }

    pub(super) fn close_overlays(&mut self) {
        self.overlay = OverlayState::Closed;
    }

    pub(super) fn close_overlay(&mut self, overlay: Overlay) {
        if self.overlay.targets(overlay) {
            self.overlay = OverlayState::Closed;
        }
    }
}
