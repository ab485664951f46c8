//! Cancellable frame loop plumbing.
//!
//! A host scheduler (`requestAnimationFrame` in the browser, a plain counted
//! loop in the CLI) calls [`tick`] once per refresh and only reschedules
//! when it returns `true`. Owners stop the loop through the [`LoopHandle`]
//! they received at start. The handle also remembers the host's id for the
//! callback currently queued, so stopping can revoke it before the callback
//! is freed.

use std::cell::Cell;
use std::rc::Rc;

use crate::effect::{Effect, FrameStatus};
use crate::error::FxError;
use crate::prng::RandomSource;
use crate::surface::Surface;

/// Shared "still active" flag for one running loop, plus the id of its
/// queued host callback.
///
/// Clones observe the same state. Single-threaded by construction, like the
/// host event loop driving it.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    active: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Records the host id (rAF or timeout) of the next queued callback.
    pub fn scheduled(&self, id: i32) {
        self.pending.set(Some(id));
    }

    /// Marks the queued callback as running; it no longer needs revoking.
    pub fn fired(&self) {
        self.pending.set(None);
    }

    /// Cancels the loop and hands back the id still queued with the host,
    /// if any. The caller revokes it before dropping the callback.
    pub fn stop(&self) -> Option<i32> {
        self.cancel();
        self.pending.take()
    }

    /// Invalidates the loop; the next reschedule check fails.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one frame if the loop is active and reports whether to reschedule.
///
/// A `Finished` frame cancels the handle. Errors are returned before the
/// reschedule decision so the driver surfaces them once and stops.
pub fn tick(
    effect: &mut dyn Effect,
    surface: &mut dyn Surface,
    rng: &mut dyn RandomSource,
    handle: &LoopHandle,
) -> Result<bool, FxError> {
    if !handle.is_active() {
        return Ok(false);
    }
    if effect.frame(surface, rng)? == FrameStatus::Finished {
        log::debug!("effect finished, stopping frame loop");
        handle.cancel();
    }
    Ok(handle.is_active())
}

/// Offline driver: ticks up to `max_frames` times, returning the number of
/// frames actually drawn.
pub fn run_frames(
    effect: &mut dyn Effect,
    surface: &mut dyn Surface,
    rng: &mut dyn RandomSource,
    handle: &LoopHandle,
    max_frames: usize,
) -> Result<usize, FxError> {
    let mut drawn = 0;
    while drawn < max_frames && handle.is_active() {
        let again = tick(effect, surface, rng, handle)?;
        drawn += 1;
        if !again {
            break;
        }
    }
    Ok(drawn)
}
