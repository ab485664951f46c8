//! Drawable area dimensions in CSS pixels.

use crate::error::FxError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Width and height of the drawing surface.
///
/// Zero-area viewports are valid (effects render empty frames). Negative or
/// non-finite dimensions are rejected by [`Viewport::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Validated constructor; zero sizes are accepted.
    pub fn new(width: f64, height: f64) -> Result<Self, FxError> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(FxError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when `p` lies in the closed rectangle `[0, W] x [0, H]`.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}
