#![deny(unsafe_code)]
//! Animated particle-network background.
//!
//! A fixed-size set of drifting points confined to the viewport. Every frame
//! the points move by their velocity, bounce off the viewport edges by
//! flipping the offending velocity component, and are joined by gradient
//! lines whenever two of them are closer than the link distance. Line opacity
//! fades linearly from `max_link_alpha` at distance 0 to nothing at the link
//! distance. The point count scales with viewport area and is capped.
//!
//! The whole collection is regenerated on every resize; there is no partial
//! reseed.

use glam::DVec2;
use landing_fx_core::effect::{Effect, FrameStatus};
use landing_fx_core::error::FxError;
use landing_fx_core::params::{param_color, param_f64, param_usize};
use landing_fx_core::prng::RandomSource;
use landing_fx_core::surface::Surface;
use landing_fx_core::{Rgba, Viewport};
use serde_json::{json, Value};

/// Hard cap on the number of points.
const DEFAULT_MAX_POINTS: usize = 90;
/// Square pixels of viewport per point.
const DEFAULT_AREA_PER_POINT: f64 = 18_000.0;
/// Pairs closer than this many pixels are linked.
const DEFAULT_LINK_DISTANCE: f64 = 140.0;
/// Link opacity for coincident points.
const DEFAULT_MAX_LINK_ALPHA: f64 = 0.35;
/// Velocity components are drawn from [-max_speed, max_speed] px/frame.
const DEFAULT_MAX_SPEED: f64 = 0.4;
const DEFAULT_POINT_RADIUS: f64 = 1.6;
const DEFAULT_LINE_WIDTH: f64 = 0.8;
const DEFAULT_POINT_ALPHA: f64 = 0.6;
/// Red, at the first point of a link.
const DEFAULT_LINK_START: Rgba = Rgba::rgb(235, 87, 87);
/// Blue, at the second point of a link.
const DEFAULT_LINK_END: Rgba = Rgba::rgb(47, 128, 236);
/// Yellow accent.
const DEFAULT_POINT_COLOR: Rgba = Rgba::rgb(242, 201, 77);

/// Tunable constants of the network background.
///
/// [`Default`] reproduces the landing page look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParams {
    pub max_points: usize,
    pub area_per_point: f64,
    pub link_distance: f64,
    pub max_link_alpha: f64,
    pub max_speed: f64,
    pub point_radius: f64,
    pub line_width: f64,
    pub link_start_color: Rgba,
    pub link_end_color: Rgba,
    pub point_color: Rgba,
    pub point_alpha: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            area_per_point: DEFAULT_AREA_PER_POINT,
            link_distance: DEFAULT_LINK_DISTANCE,
            max_link_alpha: DEFAULT_MAX_LINK_ALPHA,
            max_speed: DEFAULT_MAX_SPEED,
            point_radius: DEFAULT_POINT_RADIUS,
            line_width: DEFAULT_LINE_WIDTH,
            link_start_color: DEFAULT_LINK_START,
            link_end_color: DEFAULT_LINK_END,
            point_color: DEFAULT_POINT_COLOR,
            point_alpha: DEFAULT_POINT_ALPHA,
        }
    }
}

impl NetworkParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            max_points: param_usize(params, "max_points", DEFAULT_MAX_POINTS),
            area_per_point: param_f64(params, "area_per_point", DEFAULT_AREA_PER_POINT),
            link_distance: param_f64(params, "link_distance", DEFAULT_LINK_DISTANCE),
            max_link_alpha: param_f64(params, "max_link_alpha", DEFAULT_MAX_LINK_ALPHA),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            point_radius: param_f64(params, "point_radius", DEFAULT_POINT_RADIUS),
            line_width: param_f64(params, "line_width", DEFAULT_LINE_WIDTH),
            link_start_color: param_color(params, "link_start_color", DEFAULT_LINK_START),
            link_end_color: param_color(params, "link_end_color", DEFAULT_LINK_END),
            point_color: param_color(params, "point_color", DEFAULT_POINT_COLOR),
            point_alpha: param_f64(params, "point_alpha", DEFAULT_POINT_ALPHA),
        }
    }
}

/// A single particle. Velocity is a per-frame displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Point {
    /// A point at `(x, y)` moving `(vx, vy)` per frame.
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::new(vx, vy),
        }
    }
}

/// A pair of points close enough to be joined, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// Number of points for a viewport: `min(max_points, floor(area / area_per_point))`.
///
/// Zero-area viewports get zero points.
pub fn particle_count(viewport: Viewport, params: &NetworkParams) -> usize {
    let by_area = (viewport.area() / params.area_per_point).floor();
    // `as` saturates: NaN -> 0, +inf -> usize::MAX.
    (by_area as usize).min(params.max_points)
}

/// Opacity of a link between points `distance` apart.
///
/// `(1 - d / link_distance) * max_alpha` below the link distance, 0 at or
/// beyond it. Never divides by `distance`, so coincident points are fine.
pub fn link_alpha(distance: f64, link_distance: f64, max_alpha: f64) -> f64 {
    if distance < link_distance {
        (1.0 - distance / link_distance) * max_alpha
    } else {
        0.0
    }
}

/// The particle field: owns the viewport and the point collection.
///
/// [`ParticleField::reseed`] and [`ParticleField::step`] are its only mutators.
pub struct ParticleField {
    viewport: Viewport,
    points: Vec<Point>,
    params: NetworkParams,
}

impl ParticleField {
    /// An empty field; call [`ParticleField::reseed`] before the first frame.
    pub fn new(params: NetworkParams) -> Self {
        Self {
            viewport: Viewport::default(),
            points: Vec::new(),
            params,
        }
    }

    /// Builds a field from a JSON params object and seeds it for `viewport`.
    pub fn from_json(
        viewport: Viewport,
        json_params: &Value,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut field = Self::new(NetworkParams::from_json(json_params));
        field.reseed(viewport, rng);
        field
    }

    /// A field with an explicit point collection, bypassing random seeding.
    pub fn with_points(viewport: Viewport, points: Vec<Point>, params: NetworkParams) -> Self {
        Self {
            viewport,
            points,
            params,
        }
    }

    /// Current points, in seeding order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn network_params(&self) -> &NetworkParams {
        &self.params
    }

    /// Replaces the whole collection with freshly sampled points.
    ///
    /// Positions are uniform over `[0, W] x [0, H]`, velocity components
    /// uniform over `[-max_speed, max_speed]`.
    pub fn reseed(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) {
        let n = particle_count(viewport, &self.params);
        let s = self.params.max_speed;
        self.viewport = viewport;
        self.points = (0..n)
            .map(|_| {
                let x = rng.range(0.0, viewport.width);
                let y = rng.range(0.0, viewport.height);
                let vx = rng.range(-s, s);
                let vy = rng.range(-s, s);
                Point::new(x, y, vx, vy)
            })
            .collect();
        log::debug!(
            "reseeded {n} points for {}x{} viewport",
            viewport.width,
            viewport.height
        );
    }

    /// One frame: clear, integrate, reflect, draw links, draw points.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        let Viewport { width, height } = self.viewport;
        surface.clear(0.0, 0.0, width, height);

        self.advance();

        let links = self.links();
        log::trace!("frame: {} points, {} links", self.points.len(), links.len());
        for link in &links {
            let a = self.points[link.a].pos;
            let b = self.points[link.b].pos;
            surface.gradient_line(
                a,
                b,
                self.params.link_start_color.with_alpha(link.alpha),
                self.params.link_end_color.with_alpha(link.alpha),
                self.params.line_width,
            );
        }

        let dot = self.params.point_color.with_alpha(self.params.point_alpha);
        for p in &self.points {
            surface.disc(p.pos, self.params.point_radius, dot);
        }
    }

    /// Integration and edge reflection without drawing.
    ///
    /// Reflection flips a velocity component once when the coordinate is
    /// outside `[0, W]` (or `[0, H]`) after the move; positions are never
    /// clamped, so a point may overshoot by one frame's displacement.
    fn advance(&mut self) {
        let Viewport { width, height } = self.viewport;
        for p in &mut self.points {
            p.pos += p.vel;
            if p.pos.x < 0.0 || p.pos.x > width {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > height {
                p.vel.y = -p.vel.y;
            }
        }
    }

    /// All pairs currently closer than the link distance, in `(i, j)` order.
    pub fn links(&self) -> Vec<Link> {
        let max_d = self.params.link_distance;
        let mut links = Vec::new();
        for (i, a) in self.points.iter().enumerate() {
            for (j, b) in self.points.iter().enumerate().skip(i + 1) {
                let distance = a.pos.distance(b.pos);
                if distance < max_d {
                    links.push(Link {
                        a: i,
                        b: j,
                        distance,
                        alpha: link_alpha(distance, max_d, self.params.max_link_alpha),
                    });
                }
            }
        }
        links
    }
}

impl Effect for ParticleField {
    fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) -> Result<(), FxError> {
        self.reseed(viewport, rng);
        Ok(())
    }

    fn frame(
        &mut self,
        surface: &mut dyn Surface,
        _rng: &mut dyn RandomSource,
    ) -> Result<FrameStatus, FxError> {
        self.step(surface);
        Ok(FrameStatus::Continue)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn params(&self) -> Value {
        let p = &self.params;
        json!({
            "max_points": p.max_points,
            "area_per_point": p.area_per_point,
            "link_distance": p.link_distance,
            "max_link_alpha": p.max_link_alpha,
            "max_speed": p.max_speed,
            "point_radius": p.point_radius,
            "line_width": p.line_width,
            "link_start_color": p.link_start_color.to_hex(),
            "link_end_color": p.link_end_color.to_hex(),
            "point_color": p.point_color.to_hex(),
            "point_alpha": p.point_alpha,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "max_points": {
                "type": "integer",
                "default": DEFAULT_MAX_POINTS,
                "min": 0,
                "max": 500,
                "description": "Upper bound on the number of points"
            },
            "area_per_point": {
                "type": "number",
                "default": DEFAULT_AREA_PER_POINT,
                "min": 1.0,
                "max": 1_000_000.0,
                "description": "Viewport area in square pixels per point"
            },
            "link_distance": {
                "type": "number",
                "default": DEFAULT_LINK_DISTANCE,
                "min": 0.0,
                "max": 1000.0,
                "description": "Points closer than this are joined by a line"
            },
            "max_link_alpha": {
                "type": "number",
                "default": DEFAULT_MAX_LINK_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Line opacity for coincident points"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed] px/frame"
            },
            "point_radius": {
                "type": "number",
                "default": DEFAULT_POINT_RADIUS,
                "min": 0.0,
                "max": 20.0,
                "description": "Radius of each point in pixels"
            },
            "line_width": {
                "type": "number",
                "default": DEFAULT_LINE_WIDTH,
                "min": 0.0,
                "max": 10.0,
                "description": "Stroke width of link lines"
            },
            "link_start_color": {
                "type": "color",
                "default": DEFAULT_LINK_START.to_hex(),
                "description": "Gradient color at the first point of a link"
            },
            "link_end_color": {
                "type": "color",
                "default": DEFAULT_LINK_END.to_hex(),
                "description": "Gradient color at the second point of a link"
            },
            "point_color": {
                "type": "color",
                "default": DEFAULT_POINT_COLOR.to_hex(),
                "description": "Fill color of points"
            },
            "point_alpha": {
                "type": "number",
                "default": DEFAULT_POINT_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Fill opacity of points"
            }
        })
    }
}
