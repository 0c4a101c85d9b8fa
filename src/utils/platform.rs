use serde::Serialize;

use crate::player::HostWindow;

/// Form factor the player adapts its fullscreen behavior to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    Desktop,
    Mobile,
}

impl Platform {
    /// Touch-capable hosts and viewports narrower than the breakpoint count as mobile.
    pub fn detect(window: &dyn HostWindow, mobile_breakpoint_px: f64) -> Self {
        let (width, _) = window.inner_size();
        if window.is_touch_capable() || width < mobile_breakpoint_px {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}
