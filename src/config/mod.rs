//! Session configuration.
//!
//! [`SessionConfig`] holds the live knobs a session reads on every command,
//! including handles that cannot be serialized (logger, metrics). The
//! serializable subset lives in [`ArrangeSettings`], which hosts load from a
//! JSON file and apply on top of the defaults.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;
use crate::logging::{LogLevel, Logger};
use crate::metrics::SessionMetrics;
use crate::spacing::DegeneratePolicy;

pub const DEFAULT_GAP: f64 = 30.0;
pub const DEFAULT_GAP_PROMPT: &str = "Enter desired spacing between objects (in points):";
/// 16:9 slide in points.
pub const DEFAULT_SLIDE: Size = Size::new(960.0, 540.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration knobs for an arrangement session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Value pre-filled in the gap prompt.
    pub default_gap: f64,
    /// Text shown when asking for a gap.
    pub gap_prompt: String,
    /// Slide dimensions used when a single shape aligns against the slide.
    pub slide: Size,
    /// Handling of spacing requests that leave no room for the shapes.
    pub degenerate: DegeneratePolicy,
    /// Optional structured logger used by the session.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<SessionMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_gap: DEFAULT_GAP,
            gap_prompt: DEFAULT_GAP_PROMPT.to_string(),
            slide: DEFAULT_SLIDE,
            degenerate: DegeneratePolicy::Permit,
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(60),
            metrics_target: "deckspace::session.metrics".to_string(),
        }
    }
}

impl SessionConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SessionMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SessionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    /// Load a settings file and overlay it on this config.
    pub fn load_settings(&mut self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let settings = ArrangeSettings::load(path)?;
        self.apply_settings(&settings);
        Ok(())
    }

    /// Overlay loaded settings. The logger keeps its sink; only its level changes.
    pub fn apply_settings(&mut self, settings: &ArrangeSettings) {
        self.default_gap = settings.default_gap;
        self.gap_prompt = settings.gap_prompt.clone();
        self.slide = Size::new(settings.slide_width, settings.slide_height);
        self.degenerate = settings.degenerate;
        self.metrics_interval = Duration::from_millis(settings.metrics_interval_ms);
        if let (Some(level), Some(logger)) = (settings.log_level, self.logger.take()) {
            self.logger = Some(logger.with_min_level(level));
        }
    }
}

/// Serializable session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrangeSettings {
    pub default_gap: f64,
    pub gap_prompt: String,
    pub slide_width: f64,
    pub slide_height: f64,
    pub degenerate: DegeneratePolicy,
    pub log_level: Option<LogLevel>,
    pub metrics_interval_ms: u64,
}

impl Default for ArrangeSettings {
    fn default() -> Self {
        Self {
            default_gap: DEFAULT_GAP,
            gap_prompt: DEFAULT_GAP_PROMPT.to_string(),
            slide_width: DEFAULT_SLIDE.width,
            slide_height: DEFAULT_SLIDE.height,
            degenerate: DegeneratePolicy::Permit,
            log_level: None,
            metrics_interval_ms: 60_000,
        }
    }
}

impl ArrangeSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_gap.is_finite() {
            return Err(ConfigError::Invalid {
                field: "default_gap",
                reason: "must be a finite number".to_string(),
            });
        }
        for (field, value) in [
            ("slide_width", self.slide_width),
            ("slide_height", self.slide_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}
