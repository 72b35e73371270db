//! Host collaborator seams.
//!
//! The arrangement session never talks to a live editor. Host adapters
//! implement [`SelectionProvider`] to hand over the selected shapes and take
//! back the updated geometry, and [`UserPrompt`] to ask the operator for a
//! number. In-memory implementations back tests, benches, and scripted hosts.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{ArrangeError, Result};
use crate::geometry::{Shape, ShapeSequence};
use crate::spacing::parse_gap;

/// Source and sink of the operator's current selection.
pub trait SelectionProvider {
    /// Selected shapes in host selection order. May be empty.
    fn selected_shapes(&self) -> Result<ShapeSequence>;

    /// Write updated geometry back to the host. Shapes arrive in any order and
    /// are matched by id.
    fn commit(&mut self, shapes: &[Shape]) -> Result<()>;
}

/// Asks the operator for a single number.
pub trait UserPrompt {
    /// `None` when the operator cancels or enters something that is not a
    /// finite number.
    fn request_number(&mut self, prompt: &str, default: f64) -> Option<f64>;
}

/// Selection held in memory, updated in place on commit.
#[derive(Debug, Clone, Default)]
pub struct MemorySelection {
    shapes: ShapeSequence,
    commits: usize,
}

impl MemorySelection {
    pub fn new(shapes: ShapeSequence) -> Self {
        Self { shapes, commits: 0 }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id.as_str() == id)
    }

    pub fn replace(&mut self, shapes: ShapeSequence) {
        self.shapes = shapes;
    }

    /// Number of commits accepted so far.
    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

impl SelectionProvider for MemorySelection {
    fn selected_shapes(&self) -> Result<ShapeSequence> {
        Ok(self.shapes.clone())
    }

    fn commit(&mut self, shapes: &[Shape]) -> Result<()> {
        // Validate every id before touching anything so a bad commit is all-or-nothing.
        let mut targets = Vec::with_capacity(shapes.len());
        for updated in shapes {
            let idx = self
                .shapes
                .iter()
                .position(|s| s.id == updated.id)
                .ok_or_else(|| ArrangeError::ShapeNotFound(updated.id.to_string()))?;
            targets.push((idx, updated.rect));
        }
        for (idx, rect) in targets {
            self.shapes[idx].rect = rect;
        }
        self.commits += 1;
        Ok(())
    }
}

/// Prompt that replays canned operator answers.
///
/// Each answer is the raw text the operator would have typed; `None` stands
/// for a cancelled dialog. Once the script runs out every request gets the
/// standing answer, or is treated as cancelled when there is none.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    standing: Option<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            standing: None,
            asked: Vec::new(),
        }
    }

    /// Prompt that answers every request with `value`.
    pub fn always(value: f64) -> Self {
        Self {
            standing: Some(value.to_string()),
            ..Self::default()
        }
    }

    /// Prompt texts seen so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl UserPrompt for ScriptedPrompt {
    fn request_number(&mut self, prompt: &str, _default: f64) -> Option<f64> {
        self.asked.push(prompt.to_string());
        let answer = match self.answers.pop_front() {
            Some(answer) => answer?,
            None => self.standing.clone()?,
        };
        parse_gap(&answer).ok()
    }
}

/// Line-oriented prompt over any reader/writer pair, e.g. stdin/stdout.
///
/// An empty line accepts the default; end of input cancels.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> UserPrompt for LinePrompt<R, W> {
    fn request_number(&mut self, prompt: &str, default: f64) -> Option<f64> {
        write!(self.writer, "{prompt} [{default}]: ").ok()?;
        self.writer.flush().ok()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        if line.trim().is_empty() {
            return Some(default);
        }
        parse_gap(&line).ok()
    }
}
