use tracing::{debug, trace};

use super::timers::{TimerHandle, TimerId};
use super::{PlayerInput, PlayerPage};

/// Control visibility state machine states
#[derive(Debug)]
pub(super) enum ControlState {
    /// Controls are hidden
    Hidden,
    /// Controls are visible, with the hide countdown running while playback is active
    Visible { timer: Option<TimerHandle> },
    /// A control widget was used; controls stay until the next surface or keyboard interaction
    Pinned,
}

impl PlayerPage {
    /// Show controls and, while playing with no panel open, restart the hide countdown.
    pub(super) fn show_controls_with_timeout(&mut self) {
        let timer = if self.should_auto_hide() {
            Some(
                self.timers
                    .schedule(self.config.controls_hide_delay(), PlayerInput::HideControls),
            )
        } else {
            None
        };

        // Replacing the state drops the previous handle, which cancels its countdown.
        self.control_state = ControlState::Visible { timer };
    }

    pub(super) fn pin_controls(&mut self) {
        self.control_state = ControlState::Pinned;
    }

    pub(super) fn toggle_controls(&mut self) {
        if self.controls_visible() {
            debug!("Hiding controls");
            self.control_state = ControlState::Hidden;
        } else {
            self.show_controls_with_timeout();
        }
    }

    pub(super) fn on_hide_timer(&mut self, id: TimerId) {
        let current = matches!(
            &self.control_state,
            ControlState::Visible { timer: Some(timer) } if timer.id() == id
        );
        if !current {
            trace!("Ignoring stale hide timer {:?}", id);
            return;
        }

        if self.overlay.is_any_open() || !self.playback.is_playing() {
            debug!("Keeping controls visible");
            self.control_state = ControlState::Visible { timer: None };
            return;
        }

        debug!("Hiding controls after inactivity");
        self.control_state = ControlState::Hidden;
    }

    /// Stop the countdown without changing visibility.
    pub(super) fn cancel_controls_timer(&mut self) {
        if let ControlState::Visible { timer } = &mut self.control_state
            && let Some(timer) = timer.take()
        {
            timer.cancel();
        }
    }

    /// Playback stopped: cancel the countdown and bring back controls it already hid.
    pub(super) fn reveal_stopped_controls(&mut self) {
        match self.control_state {
            ControlState::Hidden => {
                debug!("Playback stopped, showing controls");
                self.control_state = ControlState::Visible { timer: None };
            }
            _ => self.cancel_controls_timer(),
        }
    }

    /// Playback started: arm the countdown if controls are showing without one.
    pub(super) fn resume_controls_timer(&mut self) {
        if matches!(self.control_state, ControlState::Visible { timer: None })
            && self.should_auto_hide()
        {
            self.show_controls_with_timeout();
        }
    }

    pub(super) fn controls_visible(&self) -> bool {
        !matches!(self.control_state, ControlState::Hidden)
    }

    fn should_auto_hide(&self) -> bool {
        self.playback.is_playing() && !self.overlay.is_any_open()
    }
}
