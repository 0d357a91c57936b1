//! Configuration constants for the touchtone app

/// Application identity
pub mod app {
    /// Name used for the config directory
    pub const NAME: &str = "touchtone";
}

/// Terminal rendering
pub mod ui {
    /// Keypad face design size, in design pixels (portrait 3:4)
    pub const DESIGN_W: f64 = 300.0;
    pub const DESIGN_H: f64 = 400.0;

    /// Terminal cells are roughly twice as tall as wide; the face's
    /// intrinsic height is scaled by this before letterboxing in cell
    /// units so the drawn keypad keeps its visual proportions.
    pub const CELL_ASPECT: f64 = 0.5;

    /// Frame cadence for the event loop
    pub const TICK_MS: u64 = 33;
}
