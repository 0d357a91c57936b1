//! Press de-duplication across input sources
//!
//! Hosts deliver the same physical press through up to three event streams
//! (pointer events, raw touch fallback, mouse fallback). The tracker
//! collapses them so one physical press yields exactly one press-start.

use std::time::{Duration, Instant};

use crate::config::input::CROSS_SOURCE_WINDOW_MS;
use crate::sched::Clock;

/// Which event stream delivered a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Pointer,
    Touch,
    Mouse,
}

/// Collapses pointer/touch/mouse streams into single physical presses.
///
/// While a press from one source is held, press-starts from any source are
/// suppressed. After release, press-starts from a *different* source are
/// suppressed for a short window, because platforms synthesize trailing
/// mouse events after touch input.
#[derive(Debug)]
pub struct PressTracker<C: Clock> {
    clock: C,
    active: Option<PressSource>,
    released: Option<(PressSource, Instant)>,
    window: Duration,
}

impl<C: Clock> PressTracker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            active: None,
            released: None,
            window: Duration::from_millis(CROSS_SOURCE_WINDOW_MS),
        }
    }

    /// Custom duplicate-suppression window (for testing)
    pub fn with_window(clock: C, window: Duration) -> Self {
        Self {
            clock,
            active: None,
            released: None,
            window,
        }
    }

    /// Report a press-start. Returns true if this is a genuine new press
    /// that should trigger playback and haptics.
    pub fn press_start(&mut self, source: PressSource) -> bool {
        if self.active.is_some() {
            return false;
        }
        if let Some((last, at)) = self.released {
            let trailing = last != source
                && self.clock.now().saturating_duration_since(at) < self.window;
            if trailing {
                return false;
            }
        }
        self.active = Some(source);
        true
    }

    /// Report a press-end. Returns true if it released the active press.
    pub fn press_end(&mut self, source: PressSource) -> bool {
        if self.active == Some(source) {
            self.active = None;
            self.released = Some((source, self.clock.now()));
            true
        } else {
            false
        }
    }

    /// Whether a press is currently held
    pub fn is_pressed(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::ManualClock;

    fn tracker(clock: &ManualClock) -> PressTracker<ManualClock> {
        PressTracker::with_window(clock.clone(), Duration::from_millis(400))
    }

    // --- Single press ---

    #[test]
    fn first_press_start_is_genuine() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        assert!(t.press_start(PressSource::Pointer));
        assert!(t.is_pressed());
    }

    #[test]
    fn end_releases_only_the_active_source() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        t.press_start(PressSource::Pointer);
        assert!(!t.press_end(PressSource::Mouse));
        assert!(t.press_end(PressSource::Pointer));
        assert!(!t.is_pressed());
    }

    // --- Duplicate streams during a hold ---

    #[test]
    fn other_sources_are_suppressed_while_held() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        assert!(t.press_start(PressSource::Pointer));
        assert!(!t.press_start(PressSource::Touch));
        assert!(!t.press_start(PressSource::Mouse));
    }

    // --- Trailing synthetic events after release ---

    #[test]
    fn trailing_mouse_after_touch_is_a_duplicate() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        t.press_start(PressSource::Touch);
        t.press_end(PressSource::Touch);

        clock.advance(Duration::from_millis(100));
        assert!(!t.press_start(PressSource::Mouse));
    }

    #[test]
    fn same_source_repeat_press_is_genuine() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        t.press_start(PressSource::Touch);
        t.press_end(PressSource::Touch);

        clock.advance(Duration::from_millis(100));
        assert!(t.press_start(PressSource::Touch));
    }

    #[test]
    fn other_source_is_genuine_after_window_expires() {
        let clock = ManualClock::new();
        let mut t = tracker(&clock);
        t.press_start(PressSource::Touch);
        t.press_end(PressSource::Touch);

        clock.advance(Duration::from_millis(401));
        assert!(t.press_start(PressSource::Mouse));
    }

    #[test]
    fn one_physical_press_yields_one_start() {
        // pointer, touch, mouse all fire for the same tap
        let clock = ManualClock::new();
        let mut t = tracker(&clock);

        let starts = [
            t.press_start(PressSource::Pointer),
            t.press_start(PressSource::Touch),
            t.press_start(PressSource::Mouse),
        ];
        assert_eq!(starts.iter().filter(|s| **s).count(), 1);

        t.press_end(PressSource::Pointer);
        clock.advance(Duration::from_millis(10));
        assert!(!t.press_start(PressSource::Mouse)); // trailing fallback
    }
}
