// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Events emitted by the registration engine during an operation.
//!
//! Consumers (tests, demo drivers) subscribe to the engine's event stream
//! and receive these. The wire tags (`cancel`, `stdoutcolor`, `diag`) are
//! protocol-level identifiers and must not change.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity of a diagnostic event.
///
/// `Infoerr` is informational output that belongs on stderr rather than
/// stdout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Infoerr,
    Warning,
    Error,
}

/// How a rendered message should be colorized by the consumer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Colorization {
    #[default]
    Auto,
    Always,
    Never,
    Raw,
}

/// Payload for a `diag` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagEventPayload {
    pub severity: Severity,
    pub color: Colorization,
    pub message: String,
}

/// Payload for a `stdoutcolor` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StdoutEventPayload {
    pub color: Colorization,
    pub message: String,
}

/// An event generated by the engine during an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum EngineEvent {
    /// The engine stopped accepting work.
    Cancel,
    /// Program output destined for stdout.
    #[serde(rename = "stdoutcolor")]
    Stdout(StdoutEventPayload),
    /// A diagnostic message.
    Diag(DiagEventPayload),
}

impl EngineEvent {
    pub fn cancel() -> Self {
        EngineEvent::Cancel
    }

    pub fn stdout(message: impl Into<String>, color: Colorization) -> Self {
        EngineEvent::Stdout(StdoutEventPayload {
            color,
            message: message.into(),
        })
    }

    /// A diagnostic event with default colorization.
    pub fn diag(severity: Severity, message: impl Into<String>) -> Self {
        EngineEvent::Diag(DiagEventPayload {
            severity,
            color: Colorization::default(),
            message: message.into(),
        })
    }

    /// The diagnostic severity, if this is a `diag` event.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            EngineEvent::Diag(payload) => Some(payload.severity),
            _ => None,
        }
    }

    /// The carried message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            EngineEvent::Cancel => None,
            EngineEvent::Stdout(payload) => Some(&payload.message),
            EngineEvent::Diag(payload) => Some(&payload.message),
        }
    }
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::Cancel => write!(f, "cancel"),
            EngineEvent::Stdout(payload) => write!(f, "{}", payload.message),
            EngineEvent::Diag(payload) => {
                write!(f, "{}: {}", payload.severity, payload.message)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_event_wire_tags() {
        let cancel = serde_json::to_value(EngineEvent::cancel()).unwrap();
        assert_eq!(cancel["type"], "cancel");

        let stdout = serde_json::to_value(EngineEvent::stdout("hi", Colorization::Raw)).unwrap();
        assert_eq!(stdout["type"], "stdoutcolor");
        assert_eq!(stdout["payload"]["message"], "hi");

        let diag = serde_json::to_value(EngineEvent::diag(Severity::Infoerr, "oops")).unwrap();
        assert_eq!(diag["type"], "diag");
        assert_eq!(diag["payload"]["severity"], "infoerr");
    }

    #[test]
    fn test_severity_string_forms() {
        assert_eq!(Severity::Infoerr.to_string(), "infoerr");
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_display_rendering() {
        let event = EngineEvent::diag(Severity::Error, "boom");
        assert_eq!(event.to_string(), "error: boom");
        assert_eq!(EngineEvent::cancel().to_string(), "cancel");
    }
}
