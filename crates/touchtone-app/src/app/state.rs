//! UI state snapshot
//!
//! `AppSnapshot` is the one structure the renderer reads. It is rebuilt
//! from the controller each frame rather than mutated piecemeal, so the
//! status line can never drift from the playback state.

use std::borrow::Cow;

use touchtone::audio::Status;
use touchtone::keypad::Key;

/// Snapshot of app state read by the renderer
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    /// Key currently playing, if any
    pub playing: Option<Key>,
    /// Keys with a clip mapped, out of 12
    pub mapped_keys: usize,
    pub status_text: Cow<'static, str>,
    /// True when status_text represents an error/warning state (for red UI text)
    pub is_error: bool,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        Self {
            playing: None,
            mapped_keys: 0,
            status_text: Cow::Borrowed("Ready"),
            is_error: false,
        }
    }
}

impl AppSnapshot {
    /// Build a snapshot from the controller's current status
    pub fn from_status(status: Status, mapped_keys: usize) -> Self {
        let status_text: Cow<'static, str> = match status {
            Status::Ready => "Ready".into(),
            _ => status.to_string().into(),
        };
        Self {
            playing: match status {
                Status::Playing(key) => Some(key),
                _ => None,
            },
            mapped_keys,
            status_text,
            is_error: matches!(status, Status::Blocked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_reads_ready() {
        let snap = AppSnapshot::default();
        assert_eq!(snap.status_text, "Ready");
        assert!(!snap.is_error);
        assert!(snap.playing.is_none());
    }

    #[test]
    fn playing_status_names_the_key() {
        let snap = AppSnapshot::from_status(Status::Playing(Key::D5), 12);
        assert_eq!(snap.playing, Some(Key::D5));
        assert_eq!(snap.status_text, "Playing 5");
        assert!(!snap.is_error);
    }

    #[test]
    fn blocked_status_flags_the_error_style() {
        let snap = AppSnapshot::from_status(Status::Blocked, 12);
        assert!(snap.playing.is_none());
        assert_eq!(snap.status_text, "Audio blocked — tap again");
        assert!(snap.is_error);
    }
}
