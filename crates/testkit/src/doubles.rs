//! Port test doubles.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the form controller
//! - Deterministic age checks pinned to a fixed date (re-exported
//!   [`FixedClock`])
//! - Asserting which log events were emitted, and with which fields

pub use formcheck_adapters::FixedClock;
use formcheck_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use std::sync::{Arc, Mutex};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Logger that keeps every event in memory.
///
/// Children share the parent's buffer and merge their base fields into each
/// event, with event fields winning on key collisions.
#[derive(Debug, Default, Clone)]
pub struct RecordingLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base_fields: LogFields,
}

impl RecordingLogger {
    /// Build an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Recorded event names, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|event| event.event.to_string())
            .collect()
    }

    /// Recorded events at `level`.
    pub fn events_at(&self, level: LogLevel) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// Drop every recorded event.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base_fields.is_empty() {
            let mut merged = self.base_fields.clone();
            merged.extend(event.fields.take().unwrap_or_default());
            event.fields = Some(merged);
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base_fields,
        })
    }
}
