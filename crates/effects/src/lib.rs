#![deny(unsafe_code)]
//! Effect registry: maps effect names to implementations, plus CPU-side
//! rasterization of recorded frames.
//!
//! Sits between `landing-fx-core` (which defines the `Effect` trait) and the
//! individual effect crates. Both the CLI and the WASM bindings construct
//! effects through [`EffectKind::from_name`].

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use landing_fx_core::effect::{Effect, FrameStatus};
use landing_fx_core::error::FxError;
use landing_fx_core::prng::RandomSource;
use landing_fx_core::surface::Surface;
use landing_fx_core::Viewport;
use landing_fx_network::ParticleField;
use landing_fx_tree::GrowthTree;
use serde_json::Value;

const EFFECT_NAMES: &[&str] = &["network", "tree"];

/// All available effects, each delegating the `Effect` trait.
pub enum EffectKind {
    /// Drifting particle network background.
    Network(ParticleField),
    /// Staged growth tree with service labels.
    Tree(GrowthTree),
}

impl EffectKind {
    /// Constructs an effect by name, laid out and seeded for `viewport`.
    ///
    /// Returns `FxError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        viewport: Viewport,
        params: &Value,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, FxError> {
        match name {
            "network" => Ok(EffectKind::Network(ParticleField::from_json(
                viewport, params, rng,
            ))),
            "tree" => Ok(EffectKind::Tree(GrowthTree::from_json(viewport, params)?)),
            _ => Err(FxError::UnknownEffect(name.to_string())),
        }
    }

    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Network(_) => "network",
            EffectKind::Tree(_) => "tree",
        }
    }
}

impl Effect for EffectKind {
    fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) -> Result<(), FxError> {
        match self {
            EffectKind::Network(e) => e.resize(viewport, rng),
            EffectKind::Tree(e) => e.resize(viewport, rng),
        }
    }

    fn frame(
        &mut self,
        surface: &mut dyn Surface,
        rng: &mut dyn RandomSource,
    ) -> Result<FrameStatus, FxError> {
        match self {
            EffectKind::Network(e) => e.frame(surface, rng),
            EffectKind::Tree(e) => e.frame(surface, rng),
        }
    }

    fn viewport(&self) -> Viewport {
        match self {
            EffectKind::Network(e) => e.viewport(),
            EffectKind::Tree(e) => e.viewport(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Network(e) => e.params(),
            EffectKind::Tree(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Network(e) => e.param_schema(),
            EffectKind::Tree(e) => e.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_fx_core::prng::Xorshift64;
    use landing_fx_core::surface::Recorder;
    use serde_json::json;

    fn vp() -> Viewport {
        Viewport::new(640.0, 480.0).unwrap()
    }

    fn build(name: &str, seed: u64) -> Result<EffectKind, FxError> {
        EffectKind::from_name(name, vp(), &json!({}), &mut Xorshift64::new(seed))
    }

    #[test]
    fn from_name_builds_each_listed_effect() {
        for name in EffectKind::list_effects() {
            let effect = build(name, 1).unwrap();
            assert_eq!(effect.name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        assert!(matches!(
            build("starfield", 1),
            Err(FxError::UnknownEffect(_))
        ));
    }

    #[test]
    fn from_name_propagates_config_errors() {
        let result = EffectKind::from_name(
            "tree",
            vp(),
            &json!({"growth_speed": -1.0}),
            &mut Xorshift64::new(1),
        );
        assert!(matches!(result, Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn delegation_frame_and_viewport() {
        let mut effect = build("network", 3).unwrap();
        assert_eq!(effect.viewport(), vp());
        let mut surface = Recorder::new();
        let status = effect.frame(&mut surface, &mut Xorshift64::new(3)).unwrap();
        assert_eq!(status, FrameStatus::Continue);
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn delegation_params_and_schema() {
        let tree = build("tree", 1).unwrap();
        assert!(tree.params().get("growth_speed").is_some());
        assert!(tree.param_schema().get("growth_speed").is_some());
        let network = build("network", 1).unwrap();
        assert!(network.params().get("link_distance").is_some());
    }

    #[test]
    fn delegation_resize_reseeds_network() {
        let mut effect = build("network", 1).unwrap();
        let small = Viewport::new(300.0, 300.0).unwrap();
        effect.resize(small, &mut Xorshift64::new(2)).unwrap();
        assert_eq!(effect.viewport(), small);
        match &effect {
            EffectKind::Network(field) => assert_eq!(field.points().len(), 5),
            EffectKind::Tree(_) => panic!("expected network"),
        }
    }

    #[test]
    fn determinism_same_seed() {
        let mut a = build("network", 99).unwrap();
        let mut b = build("network", 99).unwrap();
        let mut ra = Recorder::new();
        let mut rb = Recorder::new();
        for _ in 0..10 {
            a.frame(&mut ra, &mut Xorshift64::new(0)).unwrap();
            b.frame(&mut rb, &mut Xorshift64::new(0)).unwrap();
        }
        assert_eq!(ra.commands(), rb.commands());
    }

    #[test]
    fn object_safety() {
        let effect = build("tree", 1).unwrap();
        let boxed: Box<dyn Effect> = Box::new(effect);
        assert_eq!(boxed.viewport().height, 600.0);
    }
}
