#![deny(unsafe_code)]
//! Core types and traits for landing-fx, the landing page animation layer.
//!
//! Provides the `Effect` trait, the `Surface` drawing abstraction and its
//! `Recorder`, `Viewport`, the `Rgba` color type, injectable randomness
//! (`RandomSource`, `Xorshift64`, `FixedSource`), the cancellable frame loop
//! handle, `Scene`, and parameter helpers.

pub mod color;
pub mod effect;
pub mod error;
pub mod frame_loop;
pub mod params;
pub mod prng;
pub mod scene;
pub mod surface;
pub mod viewport;

pub use color::Rgba;
pub use effect::{Effect, FrameStatus};
pub use error::FxError;
pub use frame_loop::LoopHandle;
pub use prng::{FixedSource, RandomSource, Xorshift64};
pub use scene::Scene;
pub use surface::{DrawCommand, LineCap, Recorder, Surface, TextAlign, TextStyle};
pub use viewport::Viewport;
