//! Spacing policy vocabulary.
//!
//! The six spacing commands are a closed set: three sizing modes, each on
//! either axis. Hosts that still speak the legacy command identifiers
//! (`evenhorizontal`, `evenverticalpreservelast`, ...) can parse them through
//! [`SpacingPolicy::from_str`].

use std::fmt;
use std::str::FromStr;

use crate::error::{ArrangeError, Result};
use crate::geometry::Axis;

/// How the engine sizes shapes inside the fixed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingMode {
    /// Every shape receives the same extent.
    Even,
    /// The leading shape keeps its extent; the rest absorb the slack.
    PreserveFirst,
    /// The trailing shape keeps its extent and position; the rest absorb the slack.
    PreserveLast,
}

/// One of the six spacing commands exposed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingPolicy {
    EvenHorizontal,
    EvenHorizontalPreserveFirst,
    EvenHorizontalPreserveLast,
    EvenVertical,
    EvenVerticalPreserveFirst,
    EvenVerticalPreserveLast,
}

impl SpacingPolicy {
    pub const ALL: [SpacingPolicy; 6] = [
        SpacingPolicy::EvenHorizontal,
        SpacingPolicy::EvenHorizontalPreserveFirst,
        SpacingPolicy::EvenHorizontalPreserveLast,
        SpacingPolicy::EvenVertical,
        SpacingPolicy::EvenVerticalPreserveFirst,
        SpacingPolicy::EvenVerticalPreserveLast,
    ];

    pub fn new(axis: Axis, mode: SpacingMode) -> Self {
        match (axis, mode) {
            (Axis::Horizontal, SpacingMode::Even) => SpacingPolicy::EvenHorizontal,
            (Axis::Horizontal, SpacingMode::PreserveFirst) => {
                SpacingPolicy::EvenHorizontalPreserveFirst
            }
            (Axis::Horizontal, SpacingMode::PreserveLast) => {
                SpacingPolicy::EvenHorizontalPreserveLast
            }
            (Axis::Vertical, SpacingMode::Even) => SpacingPolicy::EvenVertical,
            (Axis::Vertical, SpacingMode::PreserveFirst) => SpacingPolicy::EvenVerticalPreserveFirst,
            (Axis::Vertical, SpacingMode::PreserveLast) => SpacingPolicy::EvenVerticalPreserveLast,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            SpacingPolicy::EvenHorizontal
            | SpacingPolicy::EvenHorizontalPreserveFirst
            | SpacingPolicy::EvenHorizontalPreserveLast => Axis::Horizontal,
            SpacingPolicy::EvenVertical
            | SpacingPolicy::EvenVerticalPreserveFirst
            | SpacingPolicy::EvenVerticalPreserveLast => Axis::Vertical,
        }
    }

    pub fn mode(&self) -> SpacingMode {
        match self {
            SpacingPolicy::EvenHorizontal | SpacingPolicy::EvenVertical => SpacingMode::Even,
            SpacingPolicy::EvenHorizontalPreserveFirst
            | SpacingPolicy::EvenVerticalPreserveFirst => SpacingMode::PreserveFirst,
            SpacingPolicy::EvenHorizontalPreserveLast | SpacingPolicy::EvenVerticalPreserveLast => {
                SpacingMode::PreserveLast
            }
        }
    }

    /// Command identifier used by ribbon and menu wiring.
    pub fn command_name(&self) -> &'static str {
        match self {
            SpacingPolicy::EvenHorizontal => "evenhorizontal",
            SpacingPolicy::EvenHorizontalPreserveFirst => "evenhorizontalpreservefirst",
            SpacingPolicy::EvenHorizontalPreserveLast => "evenhorizontalpreservelast",
            SpacingPolicy::EvenVertical => "evenvertical",
            SpacingPolicy::EvenVerticalPreserveFirst => "evenverticalpreservefirst",
            SpacingPolicy::EvenVerticalPreserveLast => "evenverticalpreservelast",
        }
    }
}

impl fmt::Display for SpacingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

/// Error returned when a command identifier names no spacing policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spacing policy `{0}`")]
pub struct UnknownPolicy(pub String);

impl FromStr for SpacingPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SpacingPolicy::ALL
            .into_iter()
            .find(|policy| policy.command_name() == needle)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

/// Fully resolved spacing request: policy plus the operator's gap in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingRequest {
    pub axis: Axis,
    pub mode: SpacingMode,
    pub gap: f64,
}

impl SpacingRequest {
    /// Build a request, rejecting NaN and infinite gaps.
    pub fn new(policy: SpacingPolicy, gap: f64) -> Result<Self> {
        if !gap.is_finite() {
            return Err(ArrangeError::InvalidGap(gap.to_string()));
        }
        Ok(Self {
            axis: policy.axis(),
            mode: policy.mode(),
            gap,
        })
    }

    pub fn policy(&self) -> SpacingPolicy {
        SpacingPolicy::new(self.axis, self.mode)
    }
}

/// Parse operator input into a gap value.
///
/// Accepts any finite decimal, including zero and negative values.
pub fn parse_gap(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ArrangeError::InvalidGap("empty input".to_string()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ArrangeError::InvalidGap(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ArrangeError::InvalidGap(trimmed.to_string()));
    }
    Ok(value)
}
