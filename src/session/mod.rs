//! Arrangement session: executes commands against a host selection.
//!
//! A session owns the host collaborators for one editing context. Each call
//! to [`ArrangeSession::execute`] reads the selection, asks for a gap when the
//! command needs one, computes new geometry with the pure modules
//! (`spacing`, `align`, `distribute`), and commits the result back to the host
//! only when something actually moved. Nothing carries over between commands
//! except counters and logs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use serde_json::json;

use crate::align::{align, match_size, primary_align, swap_positions};
use crate::commands::{Command, CommandOutcome, SkipReason};
use crate::config::SessionConfig;
use crate::distribute::distribute;
use crate::error::{ArrangeError, Result};
use crate::geometry::Shape;
use crate::keymap::KeymapService;
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::metrics::{MetricSnapshot, SessionMetrics};
use crate::selection::{SelectionProvider, UserPrompt};
use crate::spacing::{SpacingEngine, SpacingRequest};
use crate::symbols::SymbolPlacement;

pub mod audit;

use audit::{NullSessionAudit, SessionAudit, SessionAuditEventBuilder, SessionAuditStage};

const LOG_TARGET: &str = "deckspace::session";

pub struct ArrangeSession<P, U> {
    provider: P,
    prompt: U,
    config: SessionConfig,
    audit: Arc<dyn SessionAudit>,
    started_at: Instant,
    last_metrics_emit: Instant,
}

impl<P, U> ArrangeSession<P, U>
where
    P: SelectionProvider,
    U: UserPrompt,
{
    pub fn new(provider: P, prompt: U) -> Self {
        Self::with_config(provider, prompt, SessionConfig::default())
    }

    pub fn with_config(provider: P, prompt: U, config: SessionConfig) -> Self {
        let now = Instant::now();
        Self {
            provider,
            prompt,
            config,
            audit: Arc::new(NullSessionAudit),
            started_at: now,
            last_metrics_emit: now,
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn SessionAudit>) -> Self {
        self.audit = audit;
        self.audit
            .record(SessionAuditEventBuilder::new(SessionAuditStage::SessionConstructed).finish());
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn prompt(&self) -> &U {
        &self.prompt
    }

    pub fn into_parts(self) -> (P, U) {
        (self.provider, self.prompt)
    }

    /// Execute one command against the current selection.
    ///
    /// Selections that do not qualify and cancelled prompts are outcomes, not
    /// errors. Errors mean the host or the arithmetic refused the command;
    /// the selection is left untouched in that case.
    pub fn execute(&mut self, command: &Command) -> Result<CommandOutcome> {
        self.with_metrics(SessionMetrics::record_command);
        self.audit_stage(SessionAuditStage::CommandReceived, [("command", json!(command.name()))]);

        let result = self.run(command);
        match &result {
            Ok(outcome) => self.record_outcome(command, outcome),
            Err(err) => {
                self.with_metrics(SessionMetrics::record_rejected);
                self.audit_stage(
                    SessionAuditStage::CommandRejected,
                    [("error", json!(err.to_string()))],
                );
                self.log(
                    LogLevel::Warn,
                    "command_rejected",
                    [
                        json_kv("command", json!(command.name())),
                        json_kv("error", json!(err.to_string())),
                    ],
                );
            }
        }
        self.maybe_emit_metrics();
        result
    }

    /// Route a key event through `keymap` and execute whatever it is bound to.
    pub fn handle_key(
        &mut self,
        keymap: &KeymapService,
        event: &KeyEvent,
    ) -> Result<Option<CommandOutcome>> {
        match keymap.dispatch(event) {
            Some(command) => self.execute(&command).map(Some),
            None => Ok(None),
        }
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started_at.elapsed()))
    }

    fn run(&mut self, command: &Command) -> Result<CommandOutcome> {
        let original = self.provider.selected_shapes()?;
        self.audit_stage(SessionAuditStage::SelectionRead, [("shapes", json!(original.len()))]);

        let mut working = original.clone();
        let arranged = match command {
            Command::Space(policy) => {
                if working.len() < 2 {
                    return Ok(skip(2, working.len()));
                }
                let Some(gap) = self
                    .prompt
                    .request_number(&self.config.gap_prompt, self.config.default_gap)
                else {
                    return Ok(CommandOutcome::Aborted);
                };
                let request = SpacingRequest::new(*policy, gap)?;
                self.audit_stage(
                    SessionAuditStage::GapResolved,
                    [("gap", json!(gap)), ("policy", json!(policy.command_name()))],
                );
                SpacingEngine::new()
                    .with_degenerate_policy(self.config.degenerate)
                    .apply_in_place(&mut working, &request)
            }
            Command::Align(edge) => align(&mut working, *edge, self.config.slide),
            Command::Distribute(axis) => distribute(&mut working, *axis, self.config.slide),
            Command::PrimaryAlign(edge) => primary_align(&mut working, *edge),
            Command::MatchSize(dimension) => match_size(&mut working, *dimension),
            Command::Swap => swap_positions(&mut working),
            Command::InsertSymbol(symbol) => {
                return Ok(match SymbolPlacement::plan(symbol, self.config.slide) {
                    Some(placement) => CommandOutcome::Symbol(placement),
                    None => CommandOutcome::Skipped(SkipReason::UnknownSymbol),
                });
            }
        };

        match arranged {
            Ok(()) => {}
            Err(ArrangeError::InsufficientShapes { required, found }) => {
                return Ok(skip(required, found));
            }
            Err(err) => return Err(err),
        }

        if fingerprint(&original) == fingerprint(&working) {
            return Ok(CommandOutcome::Unchanged);
        }

        self.provider.commit(&working)?;
        Ok(CommandOutcome::Applied { updated: working })
    }

    fn record_outcome(&mut self, command: &Command, outcome: &CommandOutcome) {
        let stage = match outcome {
            CommandOutcome::Applied { updated } => {
                let count = updated.len();
                self.with_metrics(|m| m.record_applied(count));
                Some(SessionAuditStage::GeometryApplied)
            }
            CommandOutcome::Unchanged => {
                self.with_metrics(SessionMetrics::record_unchanged);
                Some(SessionAuditStage::CommitSkipped)
            }
            CommandOutcome::Skipped(_) => {
                self.with_metrics(SessionMetrics::record_skipped);
                Some(SessionAuditStage::CommandSkipped)
            }
            CommandOutcome::Aborted => {
                self.with_metrics(SessionMetrics::record_aborted);
                Some(SessionAuditStage::CommandAborted)
            }
            CommandOutcome::Symbol(_) => None,
        };
        if let Some(stage) = stage {
            self.audit_stage(stage, [("command", json!(command.name()))]);
        }

        let mut fields = vec![
            json_kv("command", json!(command.name())),
            json_kv("outcome", json!(outcome.label())),
        ];
        match outcome {
            CommandOutcome::Applied { updated } => {
                fields.push(json_kv("shapes", json!(updated.len())));
            }
            CommandOutcome::Skipped(SkipReason::SelectionSize { required, found }) => {
                fields.push(json_kv("required", json!(required)));
                fields.push(json_kv("found", json!(found)));
            }
            _ => {}
        }
        self.log(LogLevel::Debug, "command_finished", fields);
    }

    fn audit_stage<const N: usize>(
        &self,
        stage: SessionAuditStage,
        details: [(&str, serde_json::Value); N],
    ) {
        let mut builder = SessionAuditEventBuilder::new(stage);
        for (key, value) in details {
            builder = builder.detail(key, value);
        }
        self.audit.record(builder.finish());
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&mut SessionMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval == Duration::ZERO {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_metrics_emit) < self.config.metrics_interval {
            return;
        }
        self.last_metrics_emit = now;

        if let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }
}

fn skip(required: usize, found: usize) -> CommandOutcome {
    CommandOutcome::Skipped(SkipReason::SelectionSize { required, found })
}

/// Order-independent digest of shape ids and bounds.
fn fingerprint(shapes: &[Shape]) -> blake3::Hash {
    let mut ordered: Vec<&Shape> = shapes.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut hasher = blake3::Hasher::new();
    for shape in ordered {
        hasher.update(shape.id.as_str().as_bytes());
        hasher.update(&[0]);
        let rect = shape.rect;
        for value in [rect.left, rect.top, rect.width, rect.height] {
            hasher.update(&value.to_bits().to_le_bytes());
        }
    }
    hasher.finalize()
}
