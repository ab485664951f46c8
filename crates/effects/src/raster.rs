//! Software rasterization of recorded [`DrawCommand`]s into an RGBA8 buffer.
//!
//! Always available (no feature gate) so the PNG snapshot path and any other
//! consumer share the same conversion. Shapes are anti-aliased by pixel
//! coverage and composited source-over, like a canvas 2-D context. The
//! finished layer is then flattened onto an opaque page background. Text
//! commands are not rasterized.

use glam::DVec2;
use landing_fx_core::surface::{DrawCommand, LineCap};
use landing_fx_core::Rgba;

/// Straight-alpha float pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Px {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Px {
    fn from_rgba(c: Rgba, coverage: f64) -> Self {
        Self {
            r: c.r as f64 / 255.0,
            g: c.g as f64 / 255.0,
            b: c.b as f64 / 255.0,
            a: c.a * coverage,
        }
    }

    /// Source-over compositing of `src` onto `self`.
    fn blend(self, src: Px) -> Px {
        let a = src.a + self.a * (1.0 - src.a);
        if a <= 0.0 {
            return Px::default();
        }
        let mix = |s: f64, d: f64| (s * src.a + d * self.a * (1.0 - src.a)) / a;
        Px {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a,
        }
    }
}

struct Layer {
    width: usize,
    height: usize,
    px: Vec<Px>,
}

impl Layer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![Px::default(); width * height],
        }
    }

    /// Pixel index range covering `[min, max]` in one axis, clipped.
    fn span(min: f64, max: f64, size: usize) -> std::ops::Range<usize> {
        let lo = min.floor().max(0.0) as usize;
        let hi = (max.ceil().max(0.0) as usize).min(size);
        lo.min(hi)..hi
    }

    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64) {
        for py in Self::span(y, y + h, self.height) {
            for px in Self::span(x, x + w, self.width) {
                self.px[py * self.width + px] = Px::default();
            }
        }
    }

    /// Visits every pixel centre inside the box `[lo, hi]` with `shade`,
    /// which returns the source pixel to blend (or `None` to skip).
    fn paint<F: Fn(DVec2) -> Option<Px>>(&mut self, lo: DVec2, hi: DVec2, shade: F) {
        for py in Self::span(lo.y, hi.y, self.height) {
            for px in Self::span(lo.x, hi.x, self.width) {
                let centre = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                if let Some(src) = shade(centre) {
                    let i = py * self.width + px;
                    self.px[i] = self.px[i].blend(src);
                }
            }
        }
    }

    fn stroke(&mut self, from: DVec2, to: DVec2, width: f64, cap: LineCap, color: impl Fn(f64) -> Rgba) {
        let half = width / 2.0;
        let pad = DVec2::splat(half + 1.0);
        let seg = to - from;
        let len2 = seg.length_squared();
        if len2 == 0.0 && cap == LineCap::Butt {
            return;
        }
        self.paint(from.min(to) - pad, from.max(to) + pad, |p| {
            let raw = if len2 == 0.0 {
                0.0
            } else {
                (p - from).dot(seg) / len2
            };
            if cap == LineCap::Butt && !(0.0..=1.0).contains(&raw) {
                return None;
            }
            let t = raw.clamp(0.0, 1.0);
            let d = p.distance(from + seg * t);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0).min(width.max(0.0));
            (coverage > 0.0).then(|| Px::from_rgba(color(t), coverage))
        });
    }

    fn disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let pad = DVec2::splat(radius + 1.0);
        self.paint(center - pad, center + pad, |p| {
            let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
            (coverage > 0.0).then(|| Px::from_rgba(color, coverage))
        });
    }
}

/// Linear interpolation of channels and alpha, `t` in [0, 1].
fn lerp_rgba(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgba::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b), a.a + (b.a - a.a) * t)
}

/// Renders `commands` and flattens them onto `background`.
///
/// The buffer length is `width * height * 4` (R, G, B, 255).
pub fn rasterize(commands: &[DrawCommand], width: usize, height: usize, background: Rgba) -> Vec<u8> {
    let mut layer = Layer::new(width, height);
    for cmd in commands {
        match cmd {
            DrawCommand::Clear {
                x,
                y,
                width,
                height,
            } => layer.clear(*x, *y, *width, *height),
            DrawCommand::GradientLine {
                from,
                to,
                start,
                end,
                width,
            } => layer.stroke(*from, *to, *width, LineCap::Butt, |t| {
                lerp_rgba(*start, *end, t)
            }),
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                cap,
            } => layer.stroke(*from, *to, *width, *cap, |_| *color),
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => layer.disc(*center, *radius, *color),
            DrawCommand::Text { .. } => {}
        }
    }

    let base = Px::from_rgba(background.with_alpha(1.0), 1.0);
    let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    layer
        .px
        .iter()
        .flat_map(|&p| {
            let out = base.blend(p);
            [byte(out.r), byte(out.g), byte(out.b), 255u8]
        })
        .collect()
}
