//! Single-voice audio playback

pub mod controller;
pub mod sink;
pub mod voice;

pub use controller::{Phase, PlayOutcome, PressAck, VoiceController};
pub use sink::RodioVoice;
pub use voice::{Haptics, NoHaptics, NullStatus, StartError, Status, StatusSink, Voice};
