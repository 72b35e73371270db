use thiserror::Error;

use crate::config::ConfigError;
use crate::geometry::Axis;
use crate::keymap::KeymapError;

/// Unified result type for the deckspace crate.
pub type Result<T> = std::result::Result<T, ArrangeError>;

/// Errors surfaced by the arrangement engine and its session.
#[derive(Debug, Error)]
pub enum ArrangeError {
    #[error("operation needs {required} shapes, selection has {found}")]
    InsufficientShapes { required: usize, found: usize },
    #[error("invalid gap: {0}")]
    InvalidGap(String),
    #[error("degenerate {axis} span: computed size {value}")]
    DegenerateSpan { axis: Axis, value: f64 },
    #[error("shape `{0}` not found in selection")]
    ShapeNotFound(String),
    #[error("selection provider error: {0}")]
    Selection(String),
    #[error("keymap error: {0}")]
    Keymap(#[from] KeymapError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
