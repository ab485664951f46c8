#![deny(unsafe_code)]
//! Staged growth-tree animation.
//!
//! A tree grows from the bottom centre of its canvas: roots are always drawn,
//! the trunk rises until it reaches full height, then six branches sprout in
//! turn from the trunk top. Each branch first appears bare, then gains a
//! cluster of leaves, then its service label. Growth is driven by a progress
//! counter advanced by a fixed amount per frame; the animation finishes once
//! every branch has had time to show its label.

use glam::DVec2;
use landing_fx_core::effect::{Effect, FrameStatus};
use landing_fx_core::error::FxError;
use landing_fx_core::params::{param_bool, param_f64, param_string, param_strings, param_usize};
use landing_fx_core::prng::RandomSource;
use landing_fx_core::surface::{LineCap, Surface, TextAlign, TextStyle};
use landing_fx_core::{Rgba, Viewport};
use serde_json::{json, Value};
use std::f64::consts::{FRAC_PI_2, PI};

const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
const DEFAULT_TRUNK_HEIGHT: f64 = 200.0;
/// Progress units added per frame.
const DEFAULT_GROWTH_SPEED: f64 = 2.0;
/// Progress between consecutive branches starting to grow.
const DEFAULT_BRANCH_STAGGER: f64 = 40.0;
/// Progress budget per branch when deciding the animation is over.
const DEFAULT_STAGE_LENGTH: f64 = 80.0;
const DEFAULT_LEAF_COUNT: usize = 6;
const DEFAULT_FONT_FAMILY: &str = "Montserrat";
const DEFAULT_ROOT_LABEL: &str = "Strengthening Root of Business by Branding";
const DEFAULT_SERVICES: [&str; 6] = [
    "Branding & Design",
    "Web Development",
    "Mobile Apps",
    "Digital Marketing",
    "Media Production",
    "Business Strategy",
];

/// Leaves show up this much progress after their branch.
const LEAF_DELAY: f64 = 20.0;
/// Labels show up this much progress after their branch.
const LABEL_DELAY: f64 = 40.0;
const LEAF_RADIUS: f64 = 6.0;
/// Leaves scatter up to this many pixels from the branch tip on each axis.
const LEAF_JITTER: f64 = 15.0;
const LABEL_OFFSET: f64 = 14.0;

const ROOT_ANGLES: [f64; 4] = [PI * 1.1, PI * 1.25, PI * 0.85, PI * 0.75];
const ROOT_REACH_X: f64 = 120.0;
const ROOT_REACH_Y: f64 = 80.0;
const ROOT_WIDTH: f64 = 6.0;
const ROOT_LABEL_DROP: f64 = 30.0;
const TRUNK_WIDTH: f64 = 20.0;

const ROOT_COLOR: Rgba = Rgba::rgb(0x8b, 0x45, 0x13);
const WOOD_COLOR: Rgba = Rgba::rgb(0x4a, 0x2c, 0x0a);
const LEAF_LIGHT: Rgba = Rgba::rgb(0x2e, 0xcc, 0x71);
const LEAF_DARK: Rgba = Rgba::rgb(0x27, 0xae, 0x60);
const LABEL_COLOR: Rgba = Rgba::rgb(0x33, 0x33, 0x33);

/// (length, angle from +x counter-clockwise, stroke width)
const BRANCH_GEOMETRY: [(f64, f64, f64); 6] = [
    (150.0, FRAC_PI_2 - 0.3, 14.0),
    (150.0, FRAC_PI_2 + 0.3, 14.0),
    (130.0, FRAC_PI_2 - 0.6, 12.0),
    (130.0, FRAC_PI_2 + 0.6, 12.0),
    (110.0, FRAC_PI_2 - 0.45, 11.0),
    (110.0, FRAC_PI_2 + 0.45, 11.0),
];

/// A branch growing out of the trunk top.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub length: f64,
    pub angle: f64,
    pub width: f64,
    pub label: Option<String>,
}

impl Branch {
    /// Tip position for a branch rooted at `origin` (screen y grows downward).
    pub fn tip(&self, origin: DVec2) -> DVec2 {
        origin + DVec2::new(self.length * self.angle.cos(), -self.length * self.angle.sin())
    }
}

/// How far along a branch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BranchStage {
    Hidden,
    Bare,
    Leafy,
    Labelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    pub canvas_height: f64,
    pub trunk_height: f64,
    pub growth_speed: f64,
    pub branch_stagger: f64,
    pub stage_length: f64,
    pub leaf_count: usize,
    pub show_labels: bool,
    pub font_family: String,
    pub root_label: String,
    pub services: Vec<String>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            trunk_height: DEFAULT_TRUNK_HEIGHT,
            growth_speed: DEFAULT_GROWTH_SPEED,
            branch_stagger: DEFAULT_BRANCH_STAGGER,
            stage_length: DEFAULT_STAGE_LENGTH,
            leaf_count: DEFAULT_LEAF_COUNT,
            show_labels: true,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            root_label: DEFAULT_ROOT_LABEL.to_owned(),
            services: DEFAULT_SERVICES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl TreeParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            canvas_height: param_f64(params, "canvas_height", DEFAULT_CANVAS_HEIGHT),
            trunk_height: param_f64(params, "trunk_height", DEFAULT_TRUNK_HEIGHT),
            growth_speed: param_f64(params, "growth_speed", DEFAULT_GROWTH_SPEED),
            branch_stagger: param_f64(params, "branch_stagger", DEFAULT_BRANCH_STAGGER),
            stage_length: param_f64(params, "stage_length", DEFAULT_STAGE_LENGTH),
            leaf_count: param_usize(params, "leaf_count", DEFAULT_LEAF_COUNT),
            show_labels: param_bool(params, "show_labels", true),
            font_family: param_string(params, "font_family", DEFAULT_FONT_FAMILY),
            root_label: param_string(params, "root_label", DEFAULT_ROOT_LABEL),
            services: param_strings(params, "services", &DEFAULT_SERVICES),
        }
    }
}

/// The growth-tree effect.
pub struct GrowthTree {
    viewport: Viewport,
    params: TreeParams,
    branches: Vec<Branch>,
    progress: f64,
}

impl GrowthTree {
    /// Rejects a non-positive growth speed, which would never finish.
    pub fn new(params: TreeParams) -> Result<Self, FxError> {
        if params.growth_speed.is_nan() || params.growth_speed <= 0.0 {
            return Err(FxError::InvalidConfig(format!(
                "growth_speed must be positive, got {}",
                params.growth_speed
            )));
        }
        let branches = BRANCH_GEOMETRY
            .iter()
            .enumerate()
            .map(|(i, &(length, angle, width))| Branch {
                length,
                angle,
                width,
                label: params.services.get(i).cloned(),
            })
            .collect();
        Ok(Self {
            viewport: Viewport::default(),
            params,
            branches,
            progress: 0.0,
        })
    }

    /// Builds a tree from JSON params laid out for `viewport`'s width.
    pub fn from_json(viewport: Viewport, json_params: &Value) -> Result<Self, FxError> {
        let mut tree = Self::new(TreeParams::from_json(json_params))?;
        tree.layout(viewport)?;
        Ok(tree)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress at which the animation stops rescheduling.
    pub fn end_progress(&self) -> f64 {
        self.params.trunk_height + self.branches.len() as f64 * self.params.stage_length
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.end_progress()
    }

    /// Bottom centre of the canvas, where trunk and roots start.
    pub fn base(&self) -> DVec2 {
        DVec2::new(self.viewport.width / 2.0, self.viewport.height)
    }

    /// Stage of branch `index` at the current progress.
    pub fn branch_stage(&self, index: usize) -> BranchStage {
        let grown = self.progress - self.params.trunk_height;
        let start = index as f64 * self.params.branch_stagger;
        if grown <= 0.0 || grown <= start {
            BranchStage::Hidden
        } else if grown <= start + LEAF_DELAY {
            BranchStage::Bare
        } else if grown <= start + LABEL_DELAY {
            BranchStage::Leafy
        } else {
            BranchStage::Labelled
        }
    }

    /// Canvas width follows the viewport, height is fixed by params.
    /// Restarts growth.
    fn layout(&mut self, viewport: Viewport) -> Result<(), FxError> {
        self.viewport = Viewport::new(viewport.width, self.params.canvas_height)?;
        self.progress = 0.0;
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, rng: &mut dyn RandomSource) {
        let Viewport { width, height } = self.viewport;
        surface.clear(0.0, 0.0, width, height);

        let base = self.base();
        self.draw_roots(surface, base);

        let trunk = self.progress.min(self.params.trunk_height);
        let top = base - DVec2::new(0.0, trunk);
        surface.line(base, top, WOOD_COLOR, TRUNK_WIDTH, LineCap::Round);

        for (i, branch) in self.branches.iter().enumerate() {
            let stage = self.branch_stage(i);
            if stage == BranchStage::Hidden {
                continue;
            }
            let tip = branch.tip(top);
            surface.line(top, tip, WOOD_COLOR, branch.width, LineCap::Round);

            if stage >= BranchStage::Leafy {
                for j in 0..self.params.leaf_count {
                    let jitter = DVec2::new(
                        rng.range(-LEAF_JITTER, LEAF_JITTER),
                        rng.range(-LEAF_JITTER, LEAF_JITTER),
                    );
                    let color = if j % 2 == 0 { LEAF_LIGHT } else { LEAF_DARK };
                    surface.disc(tip + jitter, LEAF_RADIUS, color);
                }
            }

            if stage == BranchStage::Labelled && self.params.show_labels {
                if let Some(label) = &branch.label {
                    let style = self.label_style(16.0, TextAlign::Left);
                    surface.text(tip + DVec2::new(LABEL_OFFSET, 0.0), label, &style);
                }
            }
        }
    }

    fn draw_roots(&self, surface: &mut dyn Surface, base: DVec2) {
        for angle in ROOT_ANGLES {
            let end = base + DVec2::new(ROOT_REACH_X * angle.cos(), -ROOT_REACH_Y * angle.sin());
            surface.line(base, end, ROOT_COLOR, ROOT_WIDTH, LineCap::Round);
        }
        if self.params.show_labels {
            let style = self.label_style(18.0, TextAlign::Center);
            surface.text(
                base + DVec2::new(0.0, ROOT_LABEL_DROP),
                &self.params.root_label,
                &style,
            );
        }
    }

    fn label_style(&self, size_px: f64, align: TextAlign) -> TextStyle {
        TextStyle {
            color: LABEL_COLOR,
            size_px,
            family: self.params.font_family.clone(),
            align,
        }
    }
}

impl Effect for GrowthTree {
    fn resize(&mut self, viewport: Viewport, _rng: &mut dyn RandomSource) -> Result<(), FxError> {
        self.layout(viewport)
    }

    /// Draws the current stage, then advances progress. The frame that
    /// reaches the end is still drawn before reporting `Finished`.
    fn frame(
        &mut self,
        surface: &mut dyn Surface,
        rng: &mut dyn RandomSource,
    ) -> Result<FrameStatus, FxError> {
        self.draw(surface, rng);
        self.progress += self.params.growth_speed;
        if self.is_finished() {
            log::info!("growth tree finished at progress {}", self.progress);
            Ok(FrameStatus::Finished)
        } else {
            Ok(FrameStatus::Continue)
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn params(&self) -> Value {
        let p = &self.params;
        json!({
            "canvas_height": p.canvas_height,
            "trunk_height": p.trunk_height,
            "growth_speed": p.growth_speed,
            "branch_stagger": p.branch_stagger,
            "stage_length": p.stage_length,
            "leaf_count": p.leaf_count,
            "show_labels": p.show_labels,
            "font_family": p.font_family,
            "root_label": p.root_label,
            "services": p.services,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "canvas_height": {
                "type": "number",
                "default": DEFAULT_CANVAS_HEIGHT,
                "min": 100.0,
                "max": 2000.0,
                "description": "Canvas height in pixels; width follows the viewport"
            },
            "trunk_height": {
                "type": "number",
                "default": DEFAULT_TRUNK_HEIGHT,
                "min": 0.0,
                "max": 1000.0,
                "description": "Full trunk height in pixels"
            },
            "growth_speed": {
                "type": "number",
                "default": DEFAULT_GROWTH_SPEED,
                "min": 0.1,
                "max": 50.0,
                "description": "Progress added per frame"
            },
            "branch_stagger": {
                "type": "number",
                "default": DEFAULT_BRANCH_STAGGER,
                "min": 0.0,
                "max": 500.0,
                "description": "Progress between consecutive branches appearing"
            },
            "stage_length": {
                "type": "number",
                "default": DEFAULT_STAGE_LENGTH,
                "min": 0.0,
                "max": 500.0,
                "description": "Progress allotted per branch before the animation ends"
            },
            "leaf_count": {
                "type": "integer",
                "default": DEFAULT_LEAF_COUNT,
                "min": 0,
                "max": 50,
                "description": "Leaves drawn around each branch tip"
            },
            "show_labels": {
                "type": "boolean",
                "default": true,
                "description": "Draw the root and service labels"
            },
            "font_family": {
                "type": "string",
                "default": DEFAULT_FONT_FAMILY,
                "description": "Label font family"
            },
            "root_label": {
                "type": "string",
                "default": DEFAULT_ROOT_LABEL,
                "description": "Text drawn under the roots"
            },
            "services": {
                "type": "array",
                "default": DEFAULT_SERVICES,
                "description": "Branch labels, in branch order"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_fx_core::frame_loop::{run_frames, LoopHandle};
    use landing_fx_core::prng::{FixedSource, Xorshift64};
    use landing_fx_core::surface::{DrawCommand, Recorder};

    fn tree(width: f64) -> GrowthTree {
        GrowthTree::from_json(Viewport::new(width, 900.0).unwrap(), &json!({})).unwrap()
    }

    fn advance(tree: &mut GrowthTree, frames: usize) -> Recorder {
        let mut surface = Recorder::new();
        let mut rng = FixedSource::midpoint();
        for _ in 0..frames {
            tree.frame(&mut surface, &mut rng).unwrap();
        }
        surface
    }

    fn count<F: Fn(&DrawCommand) -> bool>(cmds: &[DrawCommand], f: F) -> usize {
        cmds.iter().filter(|c| f(c)).count()
    }

    #[test]
    fn canvas_height_is_fixed_and_width_follows_viewport() {
        let t = tree(1024.0);
        assert_eq!(t.viewport(), Viewport::new(1024.0, 600.0).unwrap());
        assert_eq!(t.base(), DVec2::new(512.0, 600.0));
    }

    #[test]
    fn zero_growth_speed_is_rejected() {
        let result = GrowthTree::from_json(
            Viewport::new(800.0, 600.0).unwrap(),
            &json!({"growth_speed": 0}),
        );
        assert!(matches!(result, Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn first_frame_draws_roots_label_and_empty_trunk() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 1);
        let cmds = surface.last_frame();
        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        let roots = count(cmds, |c| {
            matches!(c, DrawCommand::Line { color, width, .. } if *color == ROOT_COLOR && *width == ROOT_WIDTH)
        });
        assert_eq!(roots, 4);
        let trunk: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line {
                    from, to, width, ..
                } if *width == TRUNK_WIDTH => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(trunk.len(), 1);
        assert_eq!(trunk[0].0, trunk[0].1);
        assert_eq!(
            count(cmds, |c| matches!(c, DrawCommand::Text { text, .. } if text == DEFAULT_ROOT_LABEL)),
            1
        );
        assert_eq!(t.progress(), 2.0);
    }

    #[test]
    fn root_tips_follow_angles() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 1);
        let tips: Vec<DVec2> = surface
            .last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { to, color, .. } if *color == ROOT_COLOR => Some(*to),
                _ => None,
            })
            .collect();
        let expected = DVec2::new(400.0 + 120.0 * (PI * 1.1).cos(), 600.0 - 80.0 * (PI * 1.1).sin());
        assert!(tips[0].distance(expected) < 1e-9);
    }

    #[test]
    fn trunk_stops_at_full_height() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 150);
        let top = surface
            .last_frame()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { to, width, .. } if *width == TRUNK_WIDTH => Some(*to),
                _ => None,
            })
            .unwrap();
        assert_eq!(top, DVec2::new(400.0, 400.0));
    }

    #[test]
    fn branches_are_staggered() {
        let mut t = tree(800.0);
        advance(&mut t, 101);
        // progress 202: first branch just sprouted.
        assert_eq!(t.branch_stage(0), BranchStage::Bare);
        assert_eq!(t.branch_stage(1), BranchStage::Hidden);
        advance(&mut t, 20);
        // progress 242
        assert_eq!(t.branch_stage(0), BranchStage::Labelled);
        assert_eq!(t.branch_stage(1), BranchStage::Bare);
        assert_eq!(t.branch_stage(2), BranchStage::Hidden);
    }

    #[test]
    fn leaves_and_labels_appear_in_order() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 122);
        // Drawn at progress 242: branch 0 labelled, branch 1 bare.
        let frame = surface.last_frame();
        assert_eq!(count(frame, |c| matches!(c, DrawCommand::Disc { .. })), 6);
        assert_eq!(
            count(frame, |c| matches!(c, DrawCommand::Text { text, .. } if text == "Branding & Design")),
            1
        );
        assert_eq!(
            count(frame, |c| matches!(c, DrawCommand::Text { text, .. } if text == "Web Development")),
            0
        );
    }

    #[test]
    fn leaves_alternate_colors_and_stay_near_tip() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 122);
        let tip = t.branches()[0].tip(DVec2::new(400.0, 400.0));
        let leaves: Vec<(DVec2, Rgba)> = surface
            .last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Disc { center, color, .. } => Some((*center, *color)),
                _ => None,
            })
            .collect();
        for (j, (center, color)) in leaves.iter().enumerate() {
            assert!((center.x - tip.x).abs() <= LEAF_JITTER);
            assert!((center.y - tip.y).abs() <= LEAF_JITTER);
            let expected = if j % 2 == 0 { LEAF_LIGHT } else { LEAF_DARK };
            assert_eq!(*color, expected);
        }
    }

    #[test]
    fn hidden_labels_param_suppresses_text() {
        let mut t = GrowthTree::from_json(
            Viewport::new(800.0, 600.0).unwrap(),
            &json!({"show_labels": false}),
        )
        .unwrap();
        let surface = advance(&mut t, 300);
        assert_eq!(
            count(surface.commands(), |c| matches!(c, DrawCommand::Text { .. })),
            0
        );
    }

    #[test]
    fn animation_finishes_after_all_branches() {
        let mut t = tree(800.0);
        let handle = LoopHandle::new();
        let drawn = run_frames(
            &mut t,
            &mut Recorder::new(),
            &mut Xorshift64::new(4),
            &handle,
            10_000,
        )
        .unwrap();
        // Stops once progress reaches 200 + 6 * 80.
        assert_eq!(drawn, 340);
        assert!(t.is_finished());
        assert!(!handle.is_active());
    }

    #[test]
    fn final_frame_shows_every_label() {
        let mut t = tree(800.0);
        let surface = advance(&mut t, 340);
        let labels = count(surface.last_frame(), |c| matches!(c, DrawCommand::Text { .. }));
        assert_eq!(labels, 7);
    }

    #[test]
    fn resize_restarts_growth() {
        let mut t = tree(800.0);
        advance(&mut t, 50);
        t.resize(Viewport::new(1200.0, 900.0).unwrap(), &mut FixedSource::midpoint())
            .unwrap();
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.base(), DVec2::new(600.0, 600.0));
    }

    #[test]
    fn short_service_list_leaves_branches_unlabelled() {
        let t = GrowthTree::from_json(
            Viewport::new(800.0, 600.0).unwrap(),
            &json!({"services": ["Only One"]}),
        )
        .unwrap();
        assert_eq!(t.branches()[0].label.as_deref(), Some("Only One"));
        assert!(t.branches()[1].label.is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stages_never_regress(frames in 1_usize..400) {
                let mut t = tree(800.0);
                let mut previous = vec![BranchStage::Hidden; 6];
                let mut surface = Recorder::new();
                let mut rng = FixedSource::midpoint();
                for _ in 0..frames {
                    t.frame(&mut surface, &mut rng).unwrap();
                    surface.reset();
                    for (i, prev) in previous.iter_mut().enumerate() {
                        let now = t.branch_stage(i);
                        prop_assert!(now >= *prev);
                        *prev = now;
                    }
                }
            }

            #[test]
            fn later_branches_never_lead_earlier_ones(frames in 1_usize..400) {
                let mut t = tree(640.0);
                advance(&mut t, frames);
                for i in 1..6 {
                    prop_assert!(t.branch_stage(i) <= t.branch_stage(i - 1));
                }
            }
        }
    }
}
