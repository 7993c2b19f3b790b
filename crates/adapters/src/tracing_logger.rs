//! `LoggerPort` adapter that forwards events to `tracing`.
//!
//! Installing a subscriber is the binary's job; without one, events are
//! dropped by `tracing` itself.

use crate::logger::redact_fields;
use formcheck_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use serde_json::Value;

/// Logger that emits each event through the `tracing` macros.
///
/// Fields are redacted and rendered as one JSON string, since `tracing`
/// field names must be known at compile time.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a tracing logger with no base fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }
        redact_fields(&mut fields);
        let fields = render_fields(&fields);
        let error = event.error.as_ref().map(Value::to_string).unwrap_or_default();
        let name = event.event.as_ref();
        let message = event.message.as_ref();

        match event.level {
            LogLevel::Debug => {
                tracing::debug!(event = name, fields = %fields, error = %error, "{message}");
            },
            LogLevel::Info => {
                tracing::info!(event = name, fields = %fields, error = %error, "{message}");
            },
            LogLevel::Warn => {
                tracing::warn!(event = name, fields = %fields, error = %error, "{message}");
            },
            LogLevel::Error => {
                tracing::error!(event = name, fields = %fields, error = %error, "{message}");
            },
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self { base_fields })
    }
}

fn render_fields(fields: &LogFields) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let map: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Value::Object(map).to_string()
}
