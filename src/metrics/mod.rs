use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated across the commands a session executes.
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    commands: u64,
    applied: u64,
    unchanged: u64,
    skipped: u64,
    aborted: u64,
    rejected: u64,
    shapes_updated: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_command(&mut self) {
        self.commands = self.commands.saturating_add(1);
    }

    pub fn record_applied(&mut self, shape_count: usize) {
        self.applied = self.applied.saturating_add(1);
        self.shapes_updated = self.shapes_updated.saturating_add(shape_count as u64);
    }

    pub fn record_unchanged(&mut self) {
        self.unchanged = self.unchanged.saturating_add(1);
    }

    pub fn record_skipped(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }

    pub fn record_aborted(&mut self) {
        self.aborted = self.aborted.saturating_add(1);
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            commands: self.commands,
            applied: self.applied,
            unchanged: self.unchanged,
            skipped: self.skipped,
            aborted: self.aborted,
            rejected: self.rejected,
            shapes_updated: self.shapes_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub commands: u64,
    pub applied: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub aborted: u64,
    pub rejected: u64,
    pub shapes_updated: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "session_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("commands".to_string(), json!(self.commands));
        map.insert("applied".to_string(), json!(self.applied));
        map.insert("unchanged".to_string(), json!(self.unchanged));
        map.insert("skipped".to_string(), json!(self.skipped));
        map.insert("aborted".to_string(), json!(self.aborted));
        map.insert("rejected".to_string(), json!(self.rejected));
        map.insert("shapes_updated".to_string(), json!(self.shapes_updated));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_outcomes() {
        let mut metrics = SessionMetrics::new();
        metrics.record_command();
        metrics.record_applied(4);
        metrics.record_command();
        metrics.record_aborted();

        let snap = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snap.uptime_ms, 1500);
        assert_eq!(snap.commands, 2);
        assert_eq!(snap.applied, 1);
        assert_eq!(snap.aborted, 1);
        assert_eq!(snap.shapes_updated, 4);

        let event = snap.to_log_event("deckspace::session.metrics");
        assert_eq!(event.message, "session_metrics");
        assert_eq!(event.field("shapes_updated"), Some(&json!(4)));
    }
}
