//! Single-voice playback controller
//!
//! At most one clip is audible at any instant. A repeat press restarts the
//! clip from zero; a press for a different key supersedes whatever was
//! loaded. Playback refusals never propagate: the state reverts to idle
//! and the next gesture gets a fresh attempt.

use crate::keypad::{Key, SoundMap};

use super::voice::{NullStatus, StartError, Status, StatusSink, Voice};

/// Controller playback phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Playing,
}

/// Answer to [`VoiceController::press`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAck {
    /// Stored as the pending key (replacing any stale pending press)
    Accepted,
    /// Dropped: a switch is already in progress
    Rejected,
}

/// Result of resolving a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Audible output started
    Started,
    /// The platform refused; idle again, next gesture retries
    Blocked,
    /// No clip mapped for the key; nothing changed
    NoSound,
    /// Request dropped by the switching guard
    Rejected,
}

/// Owns the one voice and guarantees single-voice playback.
///
/// All mutation happens on one thread; the switching guard is advisory and
/// only rejects requests that arrive while a switch is being resolved.
pub struct VoiceController<V: Voice> {
    voice: V,
    sounds: SoundMap,
    current: Option<Key>,
    pending: Option<Key>,
    switching: bool,
    phase: Phase,
    status: Status,
    sink: Box<dyn StatusSink>,
}

impl<V: Voice> VoiceController<V> {
    pub fn new(voice: V, sounds: SoundMap) -> Self {
        Self {
            voice,
            sounds,
            current: None,
            pending: None,
            switching: false,
            phase: Phase::Idle,
            status: Status::Ready,
            sink: Box::new(NullStatus),
        }
    }

    /// Attach a status sink notified on every status change
    pub fn with_status(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Record a press. The pending slot holds only the most recent key:
    /// a newer press overwrites an unresolved older one, so stale requests
    /// are superseded rather than queued.
    pub fn press(&mut self, key: Key) -> PressAck {
        if self.switching {
            return PressAck::Rejected;
        }
        self.pending = Some(key);
        PressAck::Accepted
    }

    /// Resolve the pending press, if any.
    ///
    /// Pauses current output, loads the clip only when the resolved path
    /// differs from the loaded one, rewinds to zero, and starts. A key
    /// with no mapped clip is a no-op: current playback, phase, and status
    /// are untouched.
    pub fn pump(&mut self) -> Option<PlayOutcome> {
        let key = self.pending.take()?;
        let path = match self.sounds.resolve(key) {
            Some(p) => p.to_path_buf(),
            None => return Some(PlayOutcome::NoSound),
        };

        self.switching = true;
        self.phase = Phase::Loading;
        self.voice.pause();
        if self.current != Some(key) && self.voice.source() != Some(path.as_path()) {
            self.voice.set_source(&path);
        }
        self.voice.rewind();

        let outcome = match self.voice.start() {
            Ok(()) => {
                self.current = Some(key);
                self.phase = Phase::Playing;
                self.set_status(Status::Playing(key));
                PlayOutcome::Started
            }
            Err(StartError::Blocked) | Err(StartError::Failed(_)) => {
                self.phase = Phase::Idle;
                self.set_status(Status::Blocked);
                PlayOutcome::Blocked
            }
        };
        self.switching = false;
        Some(outcome)
    }

    /// Press and resolve in one step
    pub fn request_play(&mut self, key: Key) -> PlayOutcome {
        match self.press(key) {
            PressAck::Rejected => PlayOutcome::Rejected,
            PressAck::Accepted => self.pump().unwrap_or(PlayOutcome::Rejected),
        }
    }

    /// Check the voice for natural end-of-clip and transition to idle.
    /// Returns true when the transition happened.
    pub fn poll_ended(&mut self) -> bool {
        if self.phase == Phase::Playing && self.voice.is_finished() {
            self.note_ended();
            true
        } else {
            false
        }
    }

    /// The current clip reached its natural end
    pub fn note_ended(&mut self) {
        if self.phase == Phase::Playing {
            self.current = None;
            self.phase = Phase::Idle;
            self.set_status(Status::Ready);
        }
    }

    /// Explicitly stop playback
    pub fn stop(&mut self) {
        self.voice.pause();
        self.current = None;
        self.phase = Phase::Idle;
        self.set_status(Status::Ready);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Key whose clip is currently loaded and audible, if any
    pub fn current_key(&self) -> Option<Key> {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.sink.update(status);
    }
}
