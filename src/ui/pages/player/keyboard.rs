use serde::Serialize;

/// Document-level shortcuts understood by the player. The host suppresses the
/// browser default for every key that maps to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyCommand {
    TogglePlay,
    SkipForward,
    SkipBackward,
    ToggleFullscreen,
    ToggleMute,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value. The Arabic letter teh marbuta shares
    /// the physical M key on Arabic layouts.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(KeyCommand::TogglePlay),
            "ArrowRight" => Some(KeyCommand::SkipForward),
            "ArrowLeft" => Some(KeyCommand::SkipBackward),
            "f" | "F" => Some(KeyCommand::ToggleFullscreen),
            "m" | "M" | "\u{0629}" => Some(KeyCommand::ToggleMute),
            _ => None,
        }
    }

    /// Whether the shortcut shows the controls and restarts their countdown.
    pub fn rearms_controls(self) -> bool {
        !matches!(self, KeyCommand::ToggleFullscreen)
    }
}
