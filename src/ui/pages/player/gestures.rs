use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Horizontal third of the video surface a tap landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClickZone {
    Left,
    Middle,
    Right,
}

impl ClickZone {
    pub fn from_position(x: f64, width: f64) -> Self {
        if width <= 0.0 || !x.is_finite() {
            return ClickZone::Middle;
        }

        let third = width / 3.0;
        if x < third {
            ClickZone::Left
        } else if x > third * 2.0 {
            ClickZone::Right
        } else {
            ClickZone::Middle
        }
    }
}

/// What a tap on the video surface means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceGesture {
    ToggleControls,
    DoubleTap(ClickZone),
}

/// Classifies surface taps. Mouse clicks always toggle the controls; a touch
/// counts as a double tap when it follows the previous touch by strictly more
/// than `min` and strictly less than `max`.
#[derive(Debug)]
pub struct TapTracker {
    min: Duration,
    max: Duration,
    last_touch: Option<Instant>,
}

impl TapTracker {
    pub fn new((min, max): (Duration, Duration)) -> Self {
        Self {
            min,
            max,
            last_touch: None,
        }
    }

    pub fn register(
        &mut self,
        pointer: PointerKind,
        x: f64,
        width: f64,
        at: Instant,
    ) -> SurfaceGesture {
        if pointer == PointerKind::Mouse {
            return SurfaceGesture::ToggleControls;
        }

        if let Some(previous) = self.last_touch {
            let gap = at.saturating_duration_since(previous);
            if gap > self.min && gap < self.max {
                // A third tap starts a new pair.
                self.last_touch = None;
                let zone = ClickZone::from_position(x, width);
                debug!("Double tap in {:?} zone after {:?}", zone, gap);
                return SurfaceGesture::DoubleTap(zone);
            }
        }

        self.last_touch = Some(at);
        SurfaceGesture::ToggleControls
    }
}
