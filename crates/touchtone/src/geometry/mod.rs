//! Overlay geometry
//!
//! Pure math for keeping an invisible 3x4 hit grid aligned to a
//! responsively scaled keypad face. No host or rendering dependency.

pub mod sync;

use crate::keypad::Key;

pub use sync::{Frame, OverlaySync, SyncTrigger};

/// Width and height in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Intrinsic aspect ratio (width over height)
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Axis-aligned box in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Snap every edge to whole pixels
    pub fn rounded(&self) -> Rect {
        Rect::new(
            self.left.round(),
            self.top.round(),
            self.width.round(),
            self.height.round(),
        )
    }
}

/// Keypad spacing as fractions of the rendered box.
///
/// Horizontal ratios apply to the box width and vertical ratios to the box
/// height, never cross-axis, so spacing does not skew when the box scales
/// non-uniformly between layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadRatios {
    pub pad_x: f64,
    pub pad_y: f64,
    pub gap_x: f64,
    pub gap_y: f64,
}

impl Default for PadRatios {
    fn default() -> Self {
        use crate::config::keypad;
        Self {
            pad_x: keypad::PAD_X,
            pad_y: keypad::PAD_Y,
            gap_x: keypad::GAP_X,
            gap_y: keypad::GAP_Y,
        }
    }
}

/// Per-cell hit-rectangle tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTuning {
    /// Hit width as a fraction of the cell width
    pub hit_w: f64,
    /// Hit height as a fraction of the cell height
    pub hit_h: f64,
    /// Whole-grid vertical shift as a fraction of the box height
    pub shift_y: f64,
}

impl Default for HitTuning {
    fn default() -> Self {
        Self {
            hit_w: 1.0,
            hit_h: 1.0,
            shift_y: 0.0,
        }
    }
}

/// The overlay's current on-screen box with spacing resolved to pixels.
///
/// Recomputed whole on every sync; never patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub rect: Rect,
    pub pad_x: f64,
    pub pad_y: f64,
    pub gap_x: f64,
    pub gap_y: f64,
}

impl OverlayGeometry {
    /// Resolve spacing ratios against a rendered box
    pub fn derive(rect: Rect, ratios: &PadRatios) -> Self {
        Self {
            rect,
            pad_x: ratios.pad_x * rect.width,
            pad_y: ratios.pad_y * rect.height,
            gap_x: ratios.gap_x * rect.width,
            gap_y: ratios.gap_y * rect.height,
        }
    }
}

/// How the overlay box tracks the keypad face
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitStrategy {
    /// Overlay box mirrors the face's rendered box, translated into the
    /// container's coordinate space. For faces that fill their box with
    /// no letterboxing.
    Mirror,
    /// Overlay box is the contain-fit sub-rectangle of the container,
    /// computed from the face's intrinsic ratio. Required when the face
    /// element is sized by the container, so its rendered box cannot be
    /// read back.
    Letterbox,
    /// Overlay geometry lives in a fixed design coordinate space scaled
    /// uniformly by the renderer; computed once, resync is a no-op.
    FixedGrid { design: Size },
}

/// Translate a rendered face box into container space
pub fn mirror_fit(face_box: Rect, container: Rect) -> Rect {
    Rect::new(
        face_box.left - container.left,
        face_box.top - container.top,
        face_box.width,
        face_box.height,
    )
    .rounded()
}

/// Contain-fit sub-rectangle of a `frame`-sized container for a face with
/// intrinsic size `natural`, pixel-rounded and centered on the open axis.
pub fn letterbox_fit(frame: Size, natural: Size) -> Rect {
    let ir = natural.ratio();
    if frame.ratio() > ir {
        // Height-bound: bands left and right
        let h = frame.height;
        let w = (h * ir).round();
        Rect::new(((frame.width - w) / 2.0).round(), 0.0, w, h)
    } else {
        // Width-bound: bands top and bottom
        let w = frame.width;
        let h = (w / ir).round();
        Rect::new(0.0, ((frame.height - h) / 2.0).round(), w, h)
    }
}

/// Hit rectangles for the twelve keys in grid order.
///
/// The grid is three columns by four rows inside the overlay's padding,
/// separated by the gap values. Tuning scales each cell about its center
/// and shifts the whole grid vertically.
pub fn key_rects(geo: &OverlayGeometry, tuning: &HitTuning) -> [(Key, Rect); 12] {
    let inner_w = geo.rect.width - 2.0 * geo.pad_x;
    let inner_h = geo.rect.height - 2.0 * geo.pad_y;
    let cell_w = (inner_w - 2.0 * geo.gap_x) / 3.0;
    let cell_h = (inner_h - 3.0 * geo.gap_y) / 4.0;

    let hit_w = cell_w * tuning.hit_w;
    let hit_h = cell_h * tuning.hit_h;
    let shift = tuning.shift_y * geo.rect.height;

    let mut out = [(Key::D0, Rect::default()); 12];
    for (i, key) in Key::GRID.iter().enumerate() {
        let col = (i % 3) as f64;
        let row = (i / 3) as f64;
        let cell_left = geo.rect.left + geo.pad_x + col * (cell_w + geo.gap_x);
        let cell_top = geo.rect.top + geo.pad_y + row * (cell_h + geo.gap_y) + shift;
        out[i] = (
            *key,
            Rect::new(
                cell_left + (cell_w - hit_w) / 2.0,
                cell_top + (cell_h - hit_h) / 2.0,
                hit_w,
                hit_h,
            ),
        );
    }
    out
}

/// Explicit rect-to-key mapping, built once per geometry.
///
/// Replaces per-event tree walking in the input path: a press position is
/// answered by scanning twelve precomputed rectangles.
#[derive(Debug, Clone)]
pub struct HitMap {
    entries: [(Key, Rect); 12],
}

impl HitMap {
    pub fn new(geo: &OverlayGeometry, tuning: &HitTuning) -> Self {
        Self {
            entries: key_rects(geo, tuning),
        }
    }

    /// Key under a position, if any
    pub fn key_at(&self, x: f64, y: f64) -> Option<Key> {
        self.entries
            .iter()
            .find(|(_, r)| r.contains(x, y))
            .map(|(k, _)| *k)
    }

    /// All key rectangles in grid order
    pub fn rects(&self) -> &[(Key, Rect); 12] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Letterbox fit ---

    #[test]
    fn letterbox_wide_container_is_width_bound_when_ratio_smaller() {
        // 400/300 = 1.333 < 16/9, so the face is width-bound
        let r = letterbox_fit(Size::new(400.0, 300.0), Size::new(16.0, 9.0));
        assert_eq!(r, Rect::new(0.0, 38.0, 400.0, 225.0));
    }

    #[test]
    fn letterbox_tall_container_takes_the_same_branch() {
        // 300/400 = 0.75 < 16/9: still width-bound
        let r = letterbox_fit(Size::new(300.0, 400.0), Size::new(16.0, 9.0));
        assert_eq!(r, Rect::new(0.0, 116.0, 300.0, 169.0));
    }

    #[test]
    fn letterbox_height_bound_centers_horizontally() {
        // 1000/300 = 3.33 > 16/9: height-bound, bands left and right
        let r = letterbox_fit(Size::new(1000.0, 300.0), Size::new(16.0, 9.0));
        assert_eq!(r.top, 0.0);
        assert_eq!(r.height, 300.0);
        assert_eq!(r.width, (300.0_f64 * 16.0 / 9.0).round());
        assert_eq!(r.left, ((1000.0 - r.width) / 2.0).round());
    }

    #[test]
    fn letterbox_exact_ratio_fills_the_container() {
        let r = letterbox_fit(Size::new(320.0, 180.0), Size::new(16.0, 9.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 320.0, 180.0));
    }

    // --- Mirror fit ---

    #[test]
    fn mirror_translates_into_container_space() {
        let face = Rect::new(110.0, 60.0, 300.0, 400.0);
        let container = Rect::new(100.0, 50.0, 320.0, 420.0);
        assert_eq!(
            mirror_fit(face, container),
            Rect::new(10.0, 10.0, 300.0, 400.0)
        );
    }

    #[test]
    fn mirror_rounds_to_whole_pixels() {
        let face = Rect::new(10.6, 20.4, 300.5, 399.5);
        let container = Rect::new(0.0, 0.0, 400.0, 500.0);
        let r = mirror_fit(face, container);
        assert_eq!(r, Rect::new(11.0, 20.0, 301.0, 400.0));
    }

    // --- Spacing derivation ---

    #[test]
    fn padding_and_gaps_stay_on_their_own_axis() {
        let ratios = PadRatios {
            pad_x: 0.1,
            pad_y: 0.05,
            gap_x: 0.02,
            gap_y: 0.04,
        };
        // Deliberately non-uniform box: width 200, height 1000
        let geo = OverlayGeometry::derive(Rect::new(0.0, 0.0, 200.0, 1000.0), &ratios);
        assert_eq!(geo.pad_x, 20.0); // of width
        assert_eq!(geo.pad_y, 50.0); // of height
        assert_eq!(geo.gap_x, 4.0);
        assert_eq!(geo.gap_y, 40.0);
    }

    // --- Key grid ---

    fn plain_geometry() -> OverlayGeometry {
        // 300x400 box, 10px pads, 5px gaps: cells are (300-20-10)/3 = 90
        // wide and (400-20-15)/4 = 91.25 tall
        OverlayGeometry {
            rect: Rect::new(0.0, 0.0, 300.0, 400.0),
            pad_x: 10.0,
            pad_y: 10.0,
            gap_x: 5.0,
            gap_y: 5.0,
        }
    }

    #[test]
    fn grid_has_twelve_cells_in_reading_order() {
        let rects = key_rects(&plain_geometry(), &HitTuning::default());
        let keys: Vec<Key> = rects.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, Key::GRID.to_vec());
    }

    #[test]
    fn grid_cells_stay_inside_the_padded_box() {
        let geo = plain_geometry();
        for (_, r) in key_rects(&geo, &HitTuning::default()) {
            assert!(r.left >= geo.rect.left + geo.pad_x - 1e-9);
            assert!(r.right() <= geo.rect.right() - geo.pad_x + 1e-9);
            assert!(r.top >= geo.rect.top + geo.pad_y - 1e-9);
            assert!(r.bottom() <= geo.rect.bottom() - geo.pad_y + 1e-9);
        }
    }

    #[test]
    fn hit_scaling_shrinks_cells_about_their_center() {
        let geo = plain_geometry();
        let full = key_rects(&geo, &HitTuning::default());
        let tuned = key_rects(
            &geo,
            &HitTuning {
                hit_w: 0.5,
                hit_h: 0.5,
                shift_y: 0.0,
            },
        );
        for ((_, a), (_, b)) in full.iter().zip(tuned.iter()) {
            assert!((b.width - a.width / 2.0).abs() < 1e-9);
            // Same center
            let (acx, bcx) = (a.left + a.width / 2.0, b.left + b.width / 2.0);
            assert!((acx - bcx).abs() < 1e-9);
        }
    }

    #[test]
    fn shift_moves_the_whole_grid_down() {
        let geo = plain_geometry();
        let base = key_rects(&geo, &HitTuning::default());
        let shifted = key_rects(
            &geo,
            &HitTuning {
                hit_w: 1.0,
                hit_h: 1.0,
                shift_y: 0.01,
            },
        );
        for ((_, a), (_, b)) in base.iter().zip(shifted.iter()) {
            assert!((b.top - a.top - 4.0).abs() < 1e-9); // 1% of 400
            assert_eq!(a.left, b.left);
        }
    }

    // --- Hit map ---

    #[test]
    fn hit_map_finds_the_key_under_a_cell_center() {
        let geo = plain_geometry();
        let map = HitMap::new(&geo, &HitTuning::default());
        for (key, r) in map.rects() {
            let hit = map.key_at(r.left + r.width / 2.0, r.top + r.height / 2.0);
            assert_eq!(hit, Some(*key));
        }
    }

    #[test]
    fn hit_map_misses_in_padding_and_gaps() {
        let geo = plain_geometry();
        let map = HitMap::new(&geo, &HitTuning::default());
        assert_eq!(map.key_at(1.0, 1.0), None); // padding
        assert_eq!(map.key_at(geo.rect.right() + 10.0, 50.0), None); // outside
    }
}
