//! `Surface` over a browser canvas 2-D context, and `Math.random` as a
//! `RandomSource`.

use glam::DVec2;
use landing_fx_core::error::FxError;
use landing_fx_core::prng::RandomSource;
use landing_fx_core::surface::{LineCap, Surface, TextAlign, TextStyle};
use landing_fx_core::Rgba;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub(crate) fn window() -> Result<Window, FxError> {
    web_sys::window().ok_or_else(|| FxError::SchedulerUnavailable("no global window".into()))
}

/// Looks up `canvas_id` and its 2-D context.
pub(crate) fn canvas_context(
    canvas_id: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), FxError> {
    let unavailable = |why: &str| FxError::SurfaceUnavailable(format!("#{canvas_id}: {why}"));
    let document = window()?
        .document()
        .ok_or_else(|| unavailable("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| unavailable("element not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| unavailable("element is not a canvas"))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|_| unavailable("getContext failed"))?
        .ok_or_else(|| unavailable("2d context not supported"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| unavailable("unexpected context type"))?;
    Ok((canvas, ctx))
}

/// Canvas drawing calls never fail for the shapes we issue; the few
/// `Result`-returning ones (`arc`, gradient stops, `fill_text`) are ignored.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn segment(&self, from: DVec2, to: DVec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

fn cap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
    }
}

fn align_name(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn gradient_line(&mut self, from: DVec2, to: DVec2, start: Rgba, end: Rgba, width: f64) {
        let grad = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
        let _ = grad.add_color_stop(0.0, &start.to_css());
        let _ = grad.add_color_stop(1.0, &end.to_css());
        self.ctx.set_stroke_style_canvas_gradient(&grad);
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap(cap_name(LineCap::Butt));
        self.segment(from, to);
    }

    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64, cap: LineCap) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap(cap_name(cap));
        self.segment(from, to);
    }

    fn disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }

    fn text(&mut self, at: DVec2, text: &str, style: &TextStyle) {
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(align_name(style.align));
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }
}

/// The host's `Math.random`.
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
