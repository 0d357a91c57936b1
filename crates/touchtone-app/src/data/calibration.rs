//! Keypad calibration settings
//!
//! Seven fractional values aligning the hit grid to the keypad face.
//! Persisted as one JSON blob; every field carries its own serde default,
//! so a partial blob merges over the hard-coded defaults per-field.

use serde::{Deserialize, Serialize};
use touchtone::config::keypad;
use touchtone::geometry::{HitTuning, PadRatios};

use crate::data::storage;
use crate::error::Result;

/// Calibration data file name
const CALIBRATION_FILE: &str = "calibration.json";

/// Keypad calibration, all values fractions of the rendered box or cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Left/right padding as a fraction of box width
    #[serde(default = "default_pad_x")]
    pub pad_x: f64,

    /// Top/bottom padding as a fraction of box height
    #[serde(default = "default_pad_y")]
    pub pad_y: f64,

    /// Column gap as a fraction of box width
    #[serde(default = "default_gap_x")]
    pub gap_x: f64,

    /// Row gap as a fraction of box height
    #[serde(default = "default_gap_y")]
    pub gap_y: f64,

    /// Hit width as a fraction of the cell width
    #[serde(default = "default_hit")]
    pub hit_w: f64,

    /// Hit height as a fraction of the cell height
    #[serde(default = "default_hit")]
    pub hit_h: f64,

    /// Whole-grid vertical shift as a fraction of box height
    #[serde(default)]
    pub shift_y: f64,
}

fn default_pad_x() -> f64 {
    keypad::PAD_X
}

fn default_pad_y() -> f64 {
    keypad::PAD_Y
}

fn default_gap_x() -> f64 {
    keypad::GAP_X
}

fn default_gap_y() -> f64 {
    keypad::GAP_Y
}

fn default_hit() -> f64 {
    1.0
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pad_x: default_pad_x(),
            pad_y: default_pad_y(),
            gap_x: default_gap_x(),
            gap_y: default_gap_y(),
            hit_w: default_hit(),
            hit_h: default_hit(),
            shift_y: 0.0,
        }
    }
}

impl Calibration {
    /// Load from the default storage location, falling back to defaults
    /// when no blob exists
    pub fn load() -> Result<Self> {
        match storage::load::<Calibration>(CALIBRATION_FILE)? {
            Some(cal) => Ok(cal),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        match storage::load_from::<Calibration>(path)? {
            Some(cal) => Ok(cal),
            None => Ok(Self::default()),
        }
    }

    /// Save to the default storage location
    pub fn save(&self) -> Result<()> {
        storage::save(CALIBRATION_FILE, self)
    }

    /// Save to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Spacing ratios for the geometry synchronizer
    pub fn ratios(&self) -> PadRatios {
        PadRatios {
            pad_x: self.pad_x,
            pad_y: self.pad_y,
            gap_x: self.gap_x,
            gap_y: self.gap_y,
        }
    }

    /// Hit-rectangle tuning for the key grid
    pub fn tuning(&self) -> HitTuning {
        HitTuning {
            hit_w: self.hit_w,
            hit_h: self.hit_h,
            shift_y: self.shift_y,
        }
    }
}

/// One adjustable calibration field, for the calibration panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalField {
    PadX,
    PadY,
    GapX,
    GapY,
    HitW,
    HitH,
    ShiftY,
}

impl CalField {
    pub const ALL: [CalField; 7] = [
        CalField::PadX,
        CalField::PadY,
        CalField::GapX,
        CalField::GapY,
        CalField::HitW,
        CalField::HitH,
        CalField::ShiftY,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CalField::PadX => "pad x",
            CalField::PadY => "pad y",
            CalField::GapX => "gap x",
            CalField::GapY => "gap y",
            CalField::HitW => "hit w",
            CalField::HitH => "hit h",
            CalField::ShiftY => "shift y",
        }
    }

    /// Adjustment step per panel keypress
    pub fn step(&self) -> f64 {
        match self {
            CalField::HitW | CalField::HitH => 0.05,
            _ => 0.005,
        }
    }

    pub fn get(&self, cal: &Calibration) -> f64 {
        match self {
            CalField::PadX => cal.pad_x,
            CalField::PadY => cal.pad_y,
            CalField::GapX => cal.gap_x,
            CalField::GapY => cal.gap_y,
            CalField::HitW => cal.hit_w,
            CalField::HitH => cal.hit_h,
            CalField::ShiftY => cal.shift_y,
        }
    }

    /// Nudge the field by `direction` steps, clamped to its sane range
    pub fn nudge(&self, cal: &mut Calibration, direction: f64) {
        let value = self.get(cal) + direction * self.step();
        let value = match self {
            CalField::ShiftY => value.clamp(-0.25, 0.25),
            CalField::HitW | CalField::HitH => value.clamp(0.25, 2.0),
            _ => value.clamp(0.0, 0.25),
        };
        match self {
            CalField::PadX => cal.pad_x = value,
            CalField::PadY => cal.pad_y = value,
            CalField::GapX => cal.gap_x = value,
            CalField::GapY => cal.gap_y = value,
            CalField::HitW => cal.hit_w = value,
            CalField::HitH => cal.hit_h = value,
            CalField::ShiftY => cal.shift_y = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("touchtone_cal_{}_{}.json", id, name))
    }

    // --- Defaults ---

    #[test]
    fn defaults_match_the_calibrated_artwork() {
        let cal = Calibration::default();
        assert_eq!(cal.pad_x, 0.075);
        assert_eq!(cal.pad_y, 0.063);
        assert_eq!(cal.gap_x, 0.069);
        assert_eq!(cal.gap_y, 0.062);
        assert_eq!(cal.hit_w, 1.0);
        assert_eq!(cal.hit_h, 1.0);
        assert_eq!(cal.shift_y, 0.0);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = temp_path("missing");
        let cal = Calibration::load_from(&path).unwrap();
        assert_eq!(cal, Calibration::default());
    }

    // --- Round trips ---

    #[test]
    fn full_round_trip() {
        let path = temp_path("full");
        let mut cal = Calibration::default();
        cal.pad_x = 0.1;
        cal.shift_y = -0.02;

        cal.save_to(&path).unwrap();
        let loaded = Calibration::load_from(&path).unwrap();
        assert_eq!(loaded, cal);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_blob_merges_over_defaults_per_field() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "pad_x": 0.11 }"#).unwrap();

        let cal = Calibration::load_from(&path).unwrap();
        assert_eq!(cal.pad_x, 0.11);
        // All other fields at their hard-coded defaults
        assert_eq!(cal.pad_y, 0.063);
        assert_eq!(cal.gap_x, 0.069);
        assert_eq!(cal.gap_y, 0.062);
        assert_eq!(cal.hit_w, 1.0);
        assert_eq!(cal.hit_h, 1.0);
        assert_eq!(cal.shift_y, 0.0);

        let _ = fs::remove_file(&path);
    }

    // --- Mapping into the engine ---

    #[test]
    fn ratios_and_tuning_carry_the_fields() {
        let mut cal = Calibration::default();
        cal.gap_y = 0.08;
        cal.hit_h = 0.9;

        assert_eq!(cal.ratios().gap_y, 0.08);
        assert_eq!(cal.ratios().pad_x, 0.075);
        assert_eq!(cal.tuning().hit_h, 0.9);
        assert_eq!(cal.tuning().shift_y, 0.0);
    }

    // --- Panel nudging ---

    #[test]
    fn nudge_steps_and_clamps() {
        let mut cal = Calibration::default();
        CalField::PadX.nudge(&mut cal, 1.0);
        assert!((cal.pad_x - 0.08).abs() < 1e-9);

        for _ in 0..100 {
            CalField::PadX.nudge(&mut cal, 1.0);
        }
        assert_eq!(cal.pad_x, 0.25); // clamped

        for _ in 0..100 {
            CalField::ShiftY.nudge(&mut cal, -1.0);
        }
        assert_eq!(cal.shift_y, -0.25);
    }

    #[test]
    fn every_field_is_reachable_from_the_panel() {
        let mut cal = Calibration::default();
        for field in CalField::ALL {
            let before = field.get(&cal);
            field.nudge(&mut cal, 1.0);
            assert!(field.get(&cal) > before, "{:?} did not move", field);
        }
    }
}
