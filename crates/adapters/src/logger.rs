//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use formcheck_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use formcheck_shared::redaction::{REDACTED, is_secret_key};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// JSON logger emitting one line per event.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }

        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }
        redact_fields(&mut fields);

        let mut error = event.error;
        if let Some(ref mut value) = error {
            redact_value(value);
        }

        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::from(event.level.as_str()));
        payload.insert("event".to_string(), Value::String(event.event.to_string()));
        payload.insert(
            "message".to_string(),
            Value::String(event.message.to_string()),
        );
        if !fields.is_empty() {
            let fields = fields
                .into_iter()
                .map(|(key, value)| (key.into_string(), value))
                .collect();
            payload.insert("fields".to_string(), Value::Object(fields));
        }
        if let Some(error) = error {
            payload.insert("error".to_string(), error);
        }

        let line = serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            sink: Arc::clone(&self.sink),
            base_fields: merged,
            min_level: self.min_level,
        })
    }
}

/// Replace secret-keyed values (recursively) with the redaction marker.
pub fn redact_fields(fields: &mut LogFields) {
    for (key, value) in fields.iter_mut() {
        if is_secret_key(key) {
            *value = Value::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

/// Redact secret keys inside nested objects and arrays.
pub fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemoryLogSink;
    use serde_json::json;

    fn only_line(sink: &MemoryLogSink) -> Result<Value, Box<dyn std::error::Error>> {
        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let line = lines.first().ok_or("missing line")?;
        assert!(line.ends_with('\n'));
        Ok(serde_json::from_str(line.trim())?)
    }

    #[test]
    fn json_logger_redacts_sensitive_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level(LogLevel::Debug);

        let mut fields = LogFields::new();
        fields.insert("password".into(), Value::from("Abcdefg1!"));
        fields.insert("field".into(), Value::from("confirm"));

        logger.log(LogEvent {
            event: "form.submit.rejected".into(),
            level: LogLevel::Warn,
            message: "rejected".into(),
            fields: Some(fields),
            error: Some(json!({
                "token": "should-hide",
                "nested": { "confirm": "nope", "code": "mismatch" }
            })),
        });

        let payload = only_line(&sink)?;
        assert_eq!(payload["level"], "warn");
        assert_eq!(payload["event"], "form.submit.rejected");
        assert_eq!(payload["fields"]["password"], REDACTED);
        assert_eq!(payload["fields"]["field"], "confirm");
        assert_eq!(payload["error"]["token"], REDACTED);
        assert_eq!(payload["error"]["nested"]["confirm"], REDACTED);
        assert_eq!(payload["error"]["nested"]["code"], "mismatch");
        assert!(payload["timestampMs"].as_u64().is_some());
        Ok(())
    }

    #[test]
    fn events_below_min_level_are_dropped() {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level(LogLevel::Warn);

        logger.debug("form.evaluate", "skipped", None);
        logger.info("form.reset", "skipped", None);
        logger.error("form.failed", "kept", None);

        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn child_logger_merges_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let mut base = LogFields::new();
        base.insert("component".into(), Value::from("cli"));
        let logger = JsonLogger::new(sink.clone()).with_base_fields(base);

        let mut extra = LogFields::new();
        extra.insert("command".into(), Value::from("check"));
        let child = logger.child(extra);
        child.info("form.evaluate", "child log", None);

        let payload = only_line(&sink)?;
        assert_eq!(payload["fields"]["component"], "cli");
        assert_eq!(payload["fields"]["command"], "check");
        Ok(())
    }
}
