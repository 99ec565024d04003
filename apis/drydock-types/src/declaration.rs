// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Declaration payloads submitted to the engine, and the per-declaration
//! state the engine tracks.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::token::{PackageName, TypeToken, Urn};
use crate::value::PropertyMap;

// ============================================================================
// Declarations
// ============================================================================

/// A resource declaration: "track a resource of this type, with these
/// inputs, under this name".
///
/// Typed fixture packages build these from their argument structs; tests may
/// also build them raw, which is the only way to submit a bag that omits a
/// required input (typed argument structs make that unrepresentable).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResourceDeclaration {
    /// The resource type token, e.g. `testprovider:index:Random`.
    pub type_token: TypeToken,
    /// Declaration name, unique within the engine's scope.
    pub name: String,
    /// Input property bag.
    pub inputs: PropertyMap,
    /// Pass-through options.
    #[serde(default)]
    pub options: DeclarationOptions,
}

impl ResourceDeclaration {
    /// Convenience constructor with default options.
    pub fn new(type_token: TypeToken, name: impl Into<String>, inputs: PropertyMap) -> Self {
        Self {
            type_token,
            name: name.into(),
            inputs,
            options: DeclarationOptions::default(),
        }
    }
}

/// A provider declaration: "track an instance of this package's provider
/// under this name". Provider declarations carry no inputs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProviderDeclaration {
    /// The package this provider instance belongs to, e.g. `testprovider`.
    pub package: PackageName,
    /// Declaration name, unique within the engine's scope.
    pub name: String,
    /// Pass-through options.
    #[serde(default)]
    pub options: DeclarationOptions,
}

impl ProviderDeclaration {
    /// Convenience constructor with default options.
    pub fn new(package: PackageName, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
            options: DeclarationOptions::default(),
        }
    }
}

/// Options attached to a declaration.
///
/// The engine validates the references and records the options verbatim;
/// callers that construct descriptors forward these unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeclarationOptions {
    /// URN of the declaration this one is logically nested under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Urn>,
    /// URN of the provider declaration that should serve this resource.
    /// When absent, the engine uses the installed package stub directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Urn>,
    /// URNs this declaration depends on, beyond its input wiring.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<Urn>,
    /// Marks the declaration as protected from deletion in consuming tools.
    #[serde(default)]
    pub protect: bool,
}

// ============================================================================
// Tracked state
// ============================================================================

/// Resolution status of a tracked declaration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceStatus {
    /// Declaration accepted; outputs not yet available.
    Registered,
    /// Outputs synthesized and available.
    Resolved,
    /// The package stub rejected the declaration's values.
    Failed,
}

/// The engine-side record of one declaration, observable via snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResourceState {
    /// Scope-unique identity.
    pub urn: Urn,
    /// The kind token exactly as registered: a type token for resources,
    /// a bare package name for provider declarations.
    pub kind: String,
    /// Declaration name.
    pub name: String,
    /// Whether this record is a provider declaration.
    pub is_provider: bool,
    /// Input bag exactly as registered.
    pub inputs: PropertyMap,
    /// Options exactly as registered.
    pub options: DeclarationOptions,
    /// Engine-assigned identifier, present once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Synthesized output bag, empty until resolved.
    pub outputs: PropertyMap,
    /// Resolution status.
    pub status: ResourceStatus,
    /// When the engine accepted the declaration.
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_options_serialize_compactly() {
        let options = DeclarationOptions::default();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"protect":false}"#);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ResourceStatus::Registered.to_string(), "registered");
        assert_eq!(ResourceStatus::Resolved.to_string(), "resolved");
        assert_eq!(ResourceStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_declaration_deserializes_without_options() {
        let json = r#"{
            "type_token": "testprovider:index:Random",
            "name": "r1",
            "inputs": {"length": {"type": "number", "value": 5.0}}
        }"#;
        let decl: ResourceDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.name, "r1");
        assert_eq!(decl.options, DeclarationOptions::default());
        assert_eq!(
            decl.inputs.get("length").and_then(|v| v.as_number()),
            Some(5.0)
        );
    }
}
