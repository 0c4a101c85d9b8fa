// Player tuning constants - defaults for everything PlayerConfig can override
// Timing values are in milliseconds unless the name says otherwise

// === Transport ===
pub const SKIP_SECONDS: f64 = 10.0;
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Closed set of playback rates offered in the settings panel.
pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

// === Controls and gestures ===
pub const CONTROLS_HIDE_DELAY_MS: u64 = 3000;
// Taps closer than the minimum are treated as a misfire, not a double-tap
pub const DOUBLE_TAP_MIN_MS: u64 = 50;
pub const DOUBLE_TAP_MAX_MS: u64 = 300;

// === Presentation shell ===
pub const OVERLAY_SWITCH_DELAY_MS: u64 = 150;
pub const ORIENTATION_SETTLE_MS: u64 = 100;
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

// === Storage ===
pub const STORAGE_BUCKET: &str = "movies";
pub const STORAGE_OBJECT_PREFIX: &str = "movies";
pub const DEFAULT_MEDIA_EXTENSION: &str = "mp4";
pub const STORAGE_TIMEOUT_SECS: u64 = 30;
