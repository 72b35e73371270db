//! Keyboard shortcut registration.
//!
//! A [`Keymap`] maps key chords to commands. A [`KeymapService`] owns a keymap
//! on behalf of one application context and only routes key presses between
//! [`KeymapService::install`] and [`KeymapService::teardown`], so shortcuts
//! never outlive the editing session that registered them.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::json;
use thiserror::Error;

use crate::align::Edge;
use crate::commands::Command;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

const LOG_TARGET: &str = "deckspace::keymap";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("keymap for `{0}` is already installed")]
    AlreadyInstalled(String),
    #[error("keymap for `{0}` is not installed")]
    NotInstalled(String),
    #[error("{chord} is already bound to {existing}")]
    Conflict { chord: KeyChord, existing: String },
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self::new(
            KeyCode::Char(key),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        )
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, label) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(label)?;
            }
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyChord, Command>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ctrl+Shift+1 through Ctrl+Shift+6 align left, center, right, top,
    /// middle, and bottom.
    pub fn defaults() -> Self {
        let mut keymap = Self::new();
        for (key, edge) in ('1'..='6').zip(Edge::ALL) {
            keymap.bind(KeyChord::ctrl_shift(key), Command::Align(edge));
        }
        keymap
    }

    /// Bind `chord`, returning whatever it was bound to before.
    pub fn bind(&mut self, chord: KeyChord, command: Command) -> Option<Command> {
        self.bindings.insert(chord, command)
    }

    /// Bind `chord` only if it is free.
    pub fn try_bind(&mut self, chord: KeyChord, command: Command) -> Result<(), KeymapError> {
        if let Some(existing) = self.bindings.get(&chord) {
            return Err(KeymapError::Conflict {
                chord,
                existing: existing.name(),
            });
        }
        self.bindings.insert(chord, command);
        Ok(())
    }

    pub fn unbind(&mut self, chord: &KeyChord) -> Option<Command> {
        self.bindings.remove(chord)
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<&Command> {
        self.bindings.get(chord)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyChord, &Command)> {
        self.bindings.iter()
    }
}

/// Keymap scoped to one application context with an explicit lifecycle.
pub struct KeymapService {
    context: String,
    keymap: Keymap,
    installed: bool,
    logger: Option<Logger>,
}

impl KeymapService {
    pub fn new(context: impl Into<String>, keymap: Keymap) -> Self {
        Self {
            context: context.into(),
            keymap,
            installed: false,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn install(&mut self) -> Result<(), KeymapError> {
        if self.installed {
            return Err(KeymapError::AlreadyInstalled(self.context.clone()));
        }
        self.installed = true;
        self.log(
            LogLevel::Info,
            "keymap_installed",
            [json_kv("bindings", json!(self.keymap.len()))],
        );
        Ok(())
    }

    pub fn teardown(&mut self) -> Result<(), KeymapError> {
        if !self.installed {
            return Err(KeymapError::NotInstalled(self.context.clone()));
        }
        self.installed = false;
        self.log(LogLevel::Info, "keymap_removed", std::iter::empty());
        Ok(())
    }

    /// Command bound to a fresh key press. Repeats, releases, and anything
    /// arriving while the service is not installed are ignored.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<Command> {
        if !self.installed || event.kind != KeyEventKind::Press {
            return None;
        }
        let chord = KeyChord::from_event(event);
        let command = self.keymap.lookup(&chord).cloned()?;
        self.log(
            LogLevel::Debug,
            "shortcut_matched",
            [
                json_kv("chord", json!(chord.to_string())),
                json_kv("command", json!(command.name())),
            ],
        );
        Some(command)
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let mut fields: Vec<_> = fields.into_iter().collect();
            fields.push(json_kv("context", json!(self.context)));
            let _ = logger.log_event(event_with_fields(level, LOG_TARGET, message, fields));
        }
    }
}
