//! Configuration constants for the touchtone engine

/// Keypad spacing defaults, as fractions of the rendered keypad box.
///
/// Calibrated against the reference keypad photo; horizontal values apply
/// to the box width and vertical values to the box height, never cross-axis.
pub mod keypad {
    /// Left/right padding as a fraction of box width
    pub const PAD_X: f64 = 0.075;

    /// Top/bottom padding as a fraction of box height
    pub const PAD_Y: f64 = 0.063;

    /// Column gap as a fraction of box width
    pub const GAP_X: f64 = 0.069;

    /// Row gap as a fraction of box height
    pub const GAP_Y: f64 = 0.062;

    /// Default extension for clip files (`<dir>/<token>.<ext>`)
    pub const CLIP_EXT: &str = "wav";
}

/// Overlay resync scheduling
pub mod sync {
    /// Settle pass delays after a trigger, in milliseconds.
    ///
    /// Host layout can keep shifting after the event fires (address bar
    /// show/hide, late reflow), so each trigger fans out into staggered
    /// idempotent passes rather than a single recompute.
    pub const SETTLE_DELAYS_MS: [u64; 4] = [0, 50, 250, 500];

    /// Extra lead delay after an orientation change, in milliseconds
    pub const ORIENTATION_LEAD_MS: u64 = 100;

    /// Retry delay when a pass finds the frame not yet measurable
    pub const NOT_READY_RETRY_MS: u64 = 50;
}

/// Input handling
pub mod input {
    /// Window after a press ends during which press-starts from a
    /// different source are treated as duplicates of the same gesture
    /// (platforms synthesize trailing mouse events after touch input).
    pub const CROSS_SOURCE_WINDOW_MS: u64 = 400;

    /// Haptic pulse length on press-start, in milliseconds
    pub const HAPTIC_PULSE_MS: u64 = 10;
}
