//! The 2-D drawing surface effects render into.
//!
//! [`Surface`] is the narrow slice of a canvas 2-D context the effects need.
//! The WASM binding implements it over `CanvasRenderingContext2d`; the
//! [`Recorder`] implements it by storing [`DrawCommand`]s, which the CLI
//! rasterizes and the tests inspect.

use crate::color::Rgba;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stroke end cap style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Horizontal text anchoring relative to the draw position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Font and color of a text command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Rgba,
    pub size_px: f64,
    pub family: String,
    pub align: TextAlign,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `"16px Montserrat"`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

/// Drawing operations consumed from the host.
pub trait Surface {
    /// Wipes the rectangle to fully transparent.
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Strokes a segment with a two-stop linear gradient running from `from`
    /// (color `start`) to `to` (color `end`).
    fn gradient_line(&mut self, from: DVec2, to: DVec2, start: Rgba, end: Rgba, width: f64);

    /// Strokes a segment in a solid color.
    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64, cap: LineCap);

    /// Fills a full circle.
    fn disc(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Fills a single line of text.
    fn text(&mut self, at: DVec2, text: &str, style: &TextStyle);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    GradientLine {
        from: DVec2,
        to: DVec2,
        start: Rgba,
        end: Rgba,
        width: f64,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
        cap: LineCap,
    },
    Disc {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Text {
        at: DVec2,
        text: String,
        style: TextStyle,
    },
}

/// A surface that records every call.
///
/// A `Clear` covering the origin starts a new frame: [`Recorder::last_frame`]
/// returns the commands issued since the most recent clear.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command since creation (or the last [`Recorder::reset`]).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands from the most recent `Clear` (inclusive) to the end.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Drops everything before the last frame, bounding memory for long runs.
    pub fn retain_last_frame(&mut self) {
        let start = self.commands.len() - self.last_frame().len();
        self.commands.drain(..start);
    }
}

impl Surface for Recorder {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn gradient_line(&mut self, from: DVec2, to: DVec2, start: Rgba, end: Rgba, width: f64) {
        self.commands.push(DrawCommand::GradientLine {
            from,
            to,
            start,
            end,
            width,
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64, cap: LineCap) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
            cap,
        });
    }

    fn disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, at: DVec2, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            style: style.clone(),
        });
    }
}
