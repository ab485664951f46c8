//! Reproducible description of an offline render.
//!
//! A [`Scene`] captures everything needed to redraw a frame bit-for-bit:
//! effect name, viewport, parameter overrides, PRNG seed, and frame count.

use crate::error::FxError;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub effect: String,
    pub width: f64,
    pub height: f64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with empty params and zero frames.
    pub fn new(effect: &str, width: f64, height: f64, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
        }
    }

    /// Validated viewport for this scene.
    pub fn viewport(&self) -> Result<Viewport, FxError> {
        Viewport::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_scene_with_defaults() {
        let s = Scene::new("network", 1280.0, 720.0, 42);
        assert_eq!(s.effect, "network");
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Scene::new("tree", 1024.0, 600.0, 9);
        s.params = serde_json::json!({"growth_speed": 4.0});
        s.frames = 300;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_params_and_frames_default() {
        let s: Scene =
            serde_json::from_str(r#"{"effect":"network","width":300,"height":300,"seed":1}"#)
                .unwrap();
        assert_eq!(s.frames, 0);
        assert!(s.params.as_object().unwrap().is_empty());
    }

    #[test]
    fn viewport_validates_dimensions() {
        assert!(Scene::new("network", 300.0, 300.0, 1).viewport().is_ok());
        assert!(Scene::new("network", -1.0, 300.0, 1).viewport().is_err());
    }
}
