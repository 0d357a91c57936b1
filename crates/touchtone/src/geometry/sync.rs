//! Geometry synchronizer
//!
//! Re-derives the overlay geometry whenever the host layout may have moved
//! the keypad face. Each trigger fans out into staggered settle passes
//! because host layout keeps shifting asynchronously after the event fires;
//! passes are idempotent, so overlapping triggers are harmless.

use std::time::Duration;

use crate::config::sync::{NOT_READY_RETRY_MS, ORIENTATION_LEAD_MS, SETTLE_DELAYS_MS};
use crate::sched::{Clock, Scheduler};

use super::{letterbox_fit, mirror_fit, FitStrategy, OverlayGeometry, PadRatios, Rect, Size};

/// Layout or lifecycle event that may have moved the keypad face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The face finished loading (its intrinsic size is now known)
    ImageLoaded,
    /// The window was resized
    Resized,
    /// The visual viewport resized or scrolled
    ViewportChanged,
    /// Device orientation changed; host chrome needs extra time to settle
    OrientationChanged,
}

/// Snapshot of the host layout, taken by the caller at tick time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Container box in host coordinates
    pub container: Rect,
    /// The face's rendered box in host coordinates (Mirror strategy)
    pub face_box: Rect,
    /// The face's intrinsic size (Letterbox strategy)
    pub natural: Size,
}

impl Frame {
    /// A frame is measurable once both the container and the face have a
    /// real area. Before that, any computed overlay would be degenerate.
    pub fn is_ready(&self) -> bool {
        self.container.size().area() > 0.0 && self.natural.area() > 0.0
    }

    /// Mirror copies `face_box` directly, so it additionally needs the
    /// rendered box to have settled to a real area.
    fn is_ready_for(&self, strategy: &FitStrategy) -> bool {
        match strategy {
            FitStrategy::Mirror => self.is_ready() && self.face_box.size().area() > 0.0,
            _ => self.is_ready(),
        }
    }
}

/// Keeps the overlay geometry aligned to the keypad face.
///
/// The caller reports triggers via [`notify`](Self::notify) and pumps
/// [`tick`](Self::tick) with a fresh [`Frame`]; due settle passes recompute
/// the geometry in full. With [`FitStrategy::FixedGrid`] the geometry is
/// computed once at construction and never changes.
#[derive(Debug)]
pub struct OverlaySync<C: Clock> {
    strategy: FitStrategy,
    ratios: PadRatios,
    geometry: Option<OverlayGeometry>,
    sched: Scheduler<C>,
}

impl<C: Clock> OverlaySync<C> {
    pub fn new(strategy: FitStrategy, ratios: PadRatios, clock: C) -> Self {
        let geometry = match strategy {
            FitStrategy::FixedGrid { design } => Some(OverlayGeometry::derive(
                Rect::new(0.0, 0.0, design.width, design.height),
                &ratios,
            )),
            _ => None,
        };
        Self {
            strategy,
            ratios,
            geometry,
            sched: Scheduler::new(clock),
        }
    }

    /// Replace the spacing ratios and force a recompute on the next tick
    pub fn set_ratios(&mut self, ratios: PadRatios) {
        self.ratios = ratios;
        match self.strategy {
            FitStrategy::FixedGrid { design } => {
                self.geometry = Some(OverlayGeometry::derive(
                    Rect::new(0.0, 0.0, design.width, design.height),
                    &ratios,
                ));
            }
            _ => {
                self.sched.schedule(Duration::ZERO);
            }
        }
    }

    /// Report a layout trigger, scheduling the settle passes
    pub fn notify(&mut self, trigger: SyncTrigger) {
        if matches!(self.strategy, FitStrategy::FixedGrid { .. }) {
            return;
        }
        let lead = match trigger {
            SyncTrigger::OrientationChanged => ORIENTATION_LEAD_MS,
            _ => 0,
        };
        for delay in SETTLE_DELAYS_MS {
            self.sched.schedule(Duration::from_millis(lead + delay));
        }
    }

    /// Run any due settle passes against the current frame.
    ///
    /// Returns the geometry after the tick. An unmeasurable frame is
    /// skipped and one retry pass rescheduled; the previous geometry is
    /// kept rather than replaced by a degenerate one.
    pub fn tick(&mut self, frame: &Frame) -> Option<&OverlayGeometry> {
        if matches!(self.strategy, FitStrategy::FixedGrid { .. }) {
            return self.geometry.as_ref();
        }
        if self.sched.take_due() == 0 {
            return self.geometry.as_ref();
        }
        if !frame.is_ready_for(&self.strategy) {
            self.sched
                .schedule(Duration::from_millis(NOT_READY_RETRY_MS));
            return self.geometry.as_ref();
        }

        let rect = match self.strategy {
            FitStrategy::Mirror => mirror_fit(frame.face_box, frame.container),
            FitStrategy::Letterbox => letterbox_fit(frame.container.size(), frame.natural),
            FitStrategy::FixedGrid { .. } => unreachable!("handled above"),
        };
        self.geometry = Some(OverlayGeometry::derive(rect, &self.ratios));
        self.geometry.as_ref()
    }

    /// Latest computed geometry, if any
    pub fn geometry(&self) -> Option<&OverlayGeometry> {
        self.geometry.as_ref()
    }

    /// Settle passes not yet run
    pub fn pending_passes(&self) -> usize {
        self.sched.pending()
    }
}
