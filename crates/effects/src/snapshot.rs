//! PNG output of a recorded frame.
//!
//! Feature-gated behind `png` (default on) so WASM builds can depend on this
//! crate without pulling in `image`. The conversion itself lives in
//! [`crate::raster`].

use landing_fx_core::error::FxError;
use landing_fx_core::surface::DrawCommand;
use landing_fx_core::{Rgba, Viewport};
use std::path::Path;

use crate::raster::rasterize;

/// Pixel dimensions for a viewport, rounding fractional sizes up.
pub fn pixel_size(viewport: Viewport) -> Result<(u32, u32), FxError> {
    let to_px = |v: f64| {
        let px = v.ceil();
        if px > u32::MAX as f64 {
            Err(FxError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            })
        } else {
            Ok(px as u32)
        }
    };
    Ok((to_px(viewport.width)?, to_px(viewport.height)?))
}

/// Rasterizes `commands` over `background` and writes them as a PNG.
///
/// Returns `FxError::InvalidViewport` for zero-area or oversized viewports
/// (PNG cannot encode them), or `FxError::Io` on write failure.
pub fn write_png(
    commands: &[DrawCommand],
    viewport: Viewport,
    background: Rgba,
    path: &Path,
) -> Result<(), FxError> {
    let (w, h) = pixel_size(viewport)?;
    if w == 0 || h == 0 {
        return Err(FxError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let rgba = rasterize(commands, w as usize, h as usize, background);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FxError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FxError::Io(e.to_string()))?;
    log::info!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}
