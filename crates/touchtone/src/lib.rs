//! Touchtone — keypad soundboard engine
//!
//! Twelve keys, one short clip per key, at most one clip audible at a time.
//! A repeat press restarts the clip from zero. The geometry module keeps an
//! invisible 3x4 hit grid aligned to a responsively scaled keypad face.
//!
//! ## Quick start
//!
//! ```no_run
//! use touchtone::audio::{RodioVoice, VoiceController};
//! use touchtone::keypad::{Key, SoundMap};
//!
//! let sounds = SoundMap::from_dir(std::path::Path::new("audio"));
//! let voice = RodioVoice::new().expect("audio output");
//! let mut pad = VoiceController::new(voice, sounds);
//! pad.request_play(Key::D5);
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod geometry;
pub mod keypad;
pub mod sched;

pub use error::{Result, ToneError};
