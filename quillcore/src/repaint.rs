//! Repaint governor.
//!
//! egui redraws everything every frame; left alone, an editor that is just
//! sitting there would still repaint on a timer. The controller keeps the
//! app idle until something actually happens:
//!
//! 1. **Input** — user typed, clicked, or scrolled; egui repaints on its
//!    own for these.
//! 2. **Timed** — continuous mode is on (a critique request is in flight
//!    and the loading message rotates, or a debounced save is pending).
//!    Repaint at a governed rate.
//! 3. **Idle** — nothing happened. Don't repaint.
//!
//! Call `mark_needs_repaint()` when state changes outside an input event
//! (e.g. a worker thread delivered a result).

use std::time::Duration;

/// Interval for timed repaints while continuous mode is active.
const CONTINUOUS_INTERVAL: Duration = Duration::from_millis(200);

pub struct RepaintController {
    continuous: bool,
    needs_repaint: bool,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            needs_repaint: false,
        }
    }

    /// Keep the repaint timer running (loading spinner, pending autosave).
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Call at the start of `update()`.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
    }

    /// Call at the end of `update()`.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.continuous {
            ctx.request_repaint_after(CONTINUOUS_INTERVAL);
        } else if self.needs_repaint {
            ctx.request_repaint();
        }
        // else: egui sleeps until the next input event.
    }
}
