//! Session audit hooks.
//!
//! Hosts that want a step-by-step trace of each command (for a debug panel
//! or a support bundle) install a [`SessionAudit`] sink. Each record names a
//! stage plus structured details; the default sink discards everything.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Checkpoints emitted while a session executes a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAuditStage {
    /// A new session was constructed.
    SessionConstructed,
    /// A command entered `execute`.
    CommandReceived,
    /// The host selection was read.
    SelectionRead,
    /// The operator supplied a gap for a spacing command.
    GapResolved,
    /// New geometry was computed and committed to the host.
    GeometryApplied,
    /// Geometry was computed but matched the selection, so nothing was committed.
    CommitSkipped,
    /// The command did nothing because the selection did not qualify.
    CommandSkipped,
    /// The operator cancelled the prompt.
    CommandAborted,
    /// The command failed with an error.
    CommandRejected,
}

#[derive(Debug, Clone)]
pub struct SessionAuditEvent {
    pub timestamp: SystemTime,
    pub stage: SessionAuditStage,
    pub details: Vec<(String, Value)>,
}

impl SessionAuditEvent {
    fn new(stage: SessionAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

pub struct SessionAuditEventBuilder {
    event: SessionAuditEvent,
}

impl SessionAuditEventBuilder {
    pub fn new(stage: SessionAuditStage) -> Self {
        Self {
            event: SessionAuditEvent::new(stage),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.details.push((key.into(), value.into()));
        self
    }

    pub fn finish(self) -> SessionAuditEvent {
        self.event
    }
}

pub trait SessionAudit: Send + Sync {
    fn record(&self, event: SessionAuditEvent);
}

#[derive(Debug, Default)]
pub struct NullSessionAudit;

impl SessionAudit for NullSessionAudit {
    fn record(&self, _event: SessionAuditEvent) {}
}

/// Buffers audit records for later inspection.
#[derive(Debug, Default)]
pub struct BufferedSessionAudit {
    events: Mutex<Vec<SessionAuditEvent>>,
}

impl BufferedSessionAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> Vec<SessionAuditStage> {
        self.events
            .lock()
            .map(|guard| guard.iter().map(|e| e.stage).collect())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<SessionAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SessionAudit for BufferedSessionAudit {
    fn record(&self, event: SessionAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_details() {
        let event = SessionAuditEventBuilder::new(SessionAuditStage::GapResolved)
            .detail("gap", 12.5)
            .detail("policy", "evenvertical")
            .finish();
        assert_eq!(event.stage, SessionAuditStage::GapResolved);
        assert_eq!(event.detail("gap"), Some(&json!(12.5)));
        assert!(event.detail("missing").is_none());
    }

    #[test]
    fn buffered_audit_keeps_order() {
        let audit = BufferedSessionAudit::new();
        audit.record(SessionAuditEventBuilder::new(SessionAuditStage::CommandReceived).finish());
        audit.record(SessionAuditEventBuilder::new(SessionAuditStage::CommandAborted).finish());
        assert_eq!(
            audit.stages(),
            vec![
                SessionAuditStage::CommandReceived,
                SessionAuditStage::CommandAborted
            ]
        );
    }
}
