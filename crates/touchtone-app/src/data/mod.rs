//! Persistence: calibration settings over a JSON storage layer

pub mod calibration;
pub mod storage;

pub use calibration::{CalField, Calibration};
