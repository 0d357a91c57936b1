//! Voice abstraction and observability seams
//!
//! `Voice` is the one audio-output handle in the system. The controller
//! owns it exclusively; nothing else reads or mutates playback position or
//! source. Status and haptic sinks are injected so the controller is
//! testable without a rendering surface.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::keypad::Key;

/// Why a play attempt did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// The platform declined to start audio (gesture policy, device
    /// unavailable). Recovery is the next user gesture; modeled as an
    /// explicit variant instead of a swallowed exception.
    #[error("playback blocked by platform")]
    Blocked,

    /// The clip could not be read or decoded
    #[error("playback failed: {0}")]
    Failed(String),
}

/// The single audio-output handle
pub trait Voice {
    /// Silence current output, keeping the loaded source
    fn pause(&mut self);

    /// Point the voice at a new clip. Loading is lazy; failures surface
    /// from [`start`](Self::start).
    fn set_source(&mut self, path: &Path);

    /// Currently loaded clip, if any
    fn source(&self) -> Option<&Path>;

    /// Reset playback position to zero
    fn rewind(&mut self);

    /// Start audible output. Blocks until the platform either begins
    /// output or refuses.
    fn start(&mut self) -> Result<(), StartError>;

    /// True once a started clip has played to its natural end
    fn is_finished(&self) -> bool;
}

/// Observable controller status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Playing(Key),
    Blocked,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Playing(key) => write!(f, "Playing {}", key),
            Status::Blocked => write!(f, "Audio blocked — tap again"),
        }
    }
}

/// Receives status updates as the controller transitions
pub trait StatusSink {
    fn update(&mut self, status: Status);
}

/// Discards status updates
#[derive(Debug, Default)]
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn update(&mut self, _status: Status) {}
}

/// Haptic feedback on press-start
pub trait Haptics {
    fn pulse(&mut self, duration: Duration);
}

/// No haptic hardware
#[derive(Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_is_human_readable() {
        assert_eq!(Status::Ready.to_string(), "Ready");
        assert_eq!(Status::Playing(Key::Star).to_string(), "Playing star");
        assert_eq!(Status::Blocked.to_string(), "Audio blocked — tap again");
    }
}
