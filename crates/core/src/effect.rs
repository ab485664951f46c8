//! The `Effect` trait every animated background implements.
//!
//! The trait is object-safe so drivers (the WASM frame loop, the CLI
//! renderer) can hold a `Box<dyn Effect>` and switch effects at runtime.

use crate::error::FxError;
use crate::prng::RandomSource;
use crate::surface::Surface;
use crate::viewport::Viewport;
use serde_json::Value;

/// Outcome of one frame, telling the driver whether to reschedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Request another frame.
    Continue,
    /// The animation reached its end state; the last frame stays on screen.
    Finished,
}

/// A frame-driven canvas animation.
///
/// `resize` and `frame` are the only mutators. Drivers call `resize` once
/// before the first frame and again on every viewport change, then `frame`
/// once per display refresh.
pub trait Effect {
    /// Adopt new viewport dimensions, rebuilding any size-derived state.
    fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) -> Result<(), FxError>;

    /// Advance one frame and draw it onto `surface`.
    fn frame(
        &mut self,
        surface: &mut dyn Surface,
        rng: &mut dyn RandomSource,
    ) -> Result<FrameStatus, FxError>;

    /// Current viewport.
    fn viewport(&self) -> Viewport;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
