use std::fmt;

use crate::align::{Dimension, Edge};
use crate::geometry::{Axis, Shape};
use crate::spacing::SpacingPolicy;
use crate::symbols::{Symbol, SymbolPlacement};

/// Every operation an arrangement session can execute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Align against the selection bounds, or the slide for a single shape.
    Align(Edge),
    /// Equalize gaps between three or more shapes, or center a single shape.
    Distribute(Axis),
    /// Align against the first selected shape.
    PrimaryAlign(Edge),
    /// Copy the first selected shape's width or height.
    MatchSize(Dimension),
    /// Exchange the positions of exactly two shapes.
    Swap,
    /// Resize and space shapes with an operator-supplied gap.
    Space(SpacingPolicy),
    /// Plan a symbol insertion.
    InsertSymbol(Symbol),
}

impl Command {
    /// Short stable name used in logs and audit records.
    pub fn name(&self) -> String {
        match self {
            Command::Align(edge) => format!("align.{edge}"),
            Command::Distribute(axis) => format!("distribute.{axis}"),
            Command::PrimaryAlign(edge) => format!("primary_align.{edge}"),
            Command::MatchSize(Dimension::Width) => "match_size.width".to_string(),
            Command::MatchSize(Dimension::Height) => "match_size.height".to_string(),
            Command::Swap => "swap".to_string(),
            Command::Space(policy) => format!("space.{policy}"),
            Command::InsertSymbol(_) => "insert_symbol".to_string(),
        }
    }

    /// Whether the command asks the operator for a gap.
    pub fn needs_gap(&self) -> bool {
        matches!(self, Command::Space(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Why a command left the selection alone without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The selection has too few (or, for swap, too many) shapes.
    SelectionSize { required: usize, found: usize },
    /// The symbol has no glyph (Harvey ball level out of range).
    UnknownSymbol,
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// New geometry was committed to the host.
    Applied { updated: Vec<Shape> },
    /// The computed geometry matched the selection; nothing was committed.
    Unchanged,
    /// The selection did not qualify for the command.
    Skipped(SkipReason),
    /// The operator cancelled the gap prompt.
    Aborted,
    /// A symbol insertion plan for the host to carry out.
    Symbol(SymbolPlacement),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommandOutcome::Applied { .. } => "applied",
            CommandOutcome::Unchanged => "unchanged",
            CommandOutcome::Skipped(_) => "skipped",
            CommandOutcome::Aborted => "aborted",
            CommandOutcome::Symbol(_) => "symbol",
        }
    }
}
