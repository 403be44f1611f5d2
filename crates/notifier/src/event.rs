//! Optional message fields carried by the trigger event.
//!
//! A field is read from the event's top level first, then from an SNS-style
//! envelope (`Records[0].Sns`). Callers fall back to configured defaults when
//! extraction fails; a missing field never stops a dispatch.

use serde_json::Value;
use thiserror::Error;

/// A message field the trigger may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Subject,
    Body,
}

impl EventField {
    fn top_level_key(self) -> &'static str {
        match self {
            EventField::Subject => "subject",
            EventField::Body => "body",
        }
    }

    fn sns_key(self) -> &'static str {
        match self {
            EventField::Subject => "Subject",
            EventField::Body => "Message",
        }
    }
}

impl std::fmt::Display for EventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.top_level_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("event has no {0} field")]
    Missing(EventField),

    #[error("event field {field} is not a string")]
    NotAString { field: EventField },
}

/// Read `field` from the event.
pub fn extract(event: &Value, field: EventField) -> Result<String, ExtractError> {
    let sns_message = event
        .get("Records")
        .and_then(|records| records.get(0))
        .and_then(|record| record.get("Sns"));

    let candidate = event
        .get(field.top_level_key())
        .filter(|v| !v.is_null())
        .or_else(|| {
            sns_message
                .and_then(|sns| sns.get(field.sns_key()))
                .filter(|v| !v.is_null())
        })
        .ok_or(ExtractError::Missing(field))?;

    candidate
        .as_str()
        .map(str::to_string)
        .ok_or(ExtractError::NotAString { field })
}

/// Read `field`, substituting `default` when it cannot be extracted.
pub fn extract_or(event: &Value, field: EventField, default: &str) -> String {
    match extract(event, field) {
        Ok(value) => value,
        Err(e @ ExtractError::Missing(_)) => {
            tracing::debug!(%field, reason = %e, "Using configured default");
            default.to_string()
        }
        Err(e) => {
            tracing::warn!(%field, error = %e, "Could not extract field from event, using configured default");
            default.to_string()
        }
    }
}
