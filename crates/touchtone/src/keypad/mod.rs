//! Keypad model: key identifiers, clip lookup, and press handling

pub mod input;
pub mod key;
pub mod soundmap;

pub use input::{PressSource, PressTracker};
pub use key::{Key, ParseKeyError};
pub use soundmap::SoundMap;
