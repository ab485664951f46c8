//! Error types for landing-fx.

use thiserror::Error;

/// Errors produced by effects, surfaces and their drivers.
#[derive(Debug, Error)]
pub enum FxError {
    /// The host could not provide a 2-D drawing surface.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The host could not provide a frame scheduling primitive.
    #[error("frame scheduler unavailable: {0}")]
    SchedulerUnavailable(String),

    /// Viewport dimensions were negative or not finite.
    #[error("invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An effect or page component was configured with unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested effect name is not registered.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Writing an output artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
