//! Shape arrangement engine for presentation slides.
//!
//! The core is [`spacing`]: six policies that resize and reposition a
//! selection so adjacent shapes sit exactly a chosen gap apart without
//! changing the overall span. Around it sit anchor-relative alignment,
//! distribution, swap, a symbol glyph table, and an [`ArrangeSession`] that
//! runs commands against a host selection with structured logging, metrics,
//! and audit hooks.

pub mod align;
pub mod commands;
pub mod config;
pub mod distribute;
pub mod error;
pub mod geometry;
pub mod keymap;
pub mod logging;
pub mod metrics;
pub mod selection;
pub mod session;
pub mod spacing;
pub mod symbols;

pub use align::{Dimension, Edge, align, match_size, primary_align, swap_positions};
pub use commands::{Command, CommandOutcome, SkipReason};
pub use config::{ArrangeSettings, ConfigError, SessionConfig};
pub use distribute::distribute;
pub use error::{ArrangeError, Result};
pub use geometry::{Axis, Rect, Shape, ShapeId, ShapeSequence, Size};
pub use keymap::{KeyChord, Keymap, KeymapError, KeymapService};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use selection::{LinePrompt, MemorySelection, ScriptedPrompt, SelectionProvider, UserPrompt};
pub use session::ArrangeSession;
pub use session::audit::{
    BufferedSessionAudit, NullSessionAudit, SessionAudit, SessionAuditEvent,
    SessionAuditEventBuilder, SessionAuditStage,
};
pub use spacing::{
    DegeneratePolicy, SpacingEngine, SpacingMode, SpacingPolicy, SpacingRequest, UnknownPolicy,
};
pub use symbols::{FallbackBox, Symbol, SymbolPlacement, TextAlign, VerticalAnchor};
