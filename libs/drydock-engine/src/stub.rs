// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Package stubs and the schemas they declare.
//!
//! A package stub is the in-process stand-in for a real provider plugin: it
//! names the resource types its package serves and synthesizes the output
//! properties for each registered resource. Stubs are installed into an
//! engine once and shared by every declaration that names their package.

use std::collections::BTreeMap;
use std::fmt::Debug;

use drydock_types::{PackageName, PropertyMap, TypeToken};
use rand::RngCore;

use crate::error::StubError;

// ============================================================================
// Schemas
// ============================================================================

/// Schema for one resource type served by a package.
#[derive(Debug, Clone, Default)]
pub struct ResourceSchema {
    /// Input properties a declaration must carry
    pub required_inputs: Vec<String>,
    /// Input properties the type understands but does not require
    pub optional_inputs: Vec<String>,
}

impl ResourceSchema {
    pub fn new(required: &[&str], optional: &[&str]) -> Self {
        Self {
            required_inputs: required.iter().map(|s| s.to_string()).collect(),
            optional_inputs: optional.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the schema mentions this input property at all.
    pub fn knows_input(&self, property: &str) -> bool {
        self.required_inputs.iter().any(|p| p == property)
            || self.optional_inputs.iter().any(|p| p == property)
    }
}

/// The set of resource types a package serves, declared at install time.
#[derive(Debug, Clone, Default)]
pub struct PackageSchema {
    resources: BTreeMap<TypeToken, ResourceSchema>,
}

impl PackageSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one resource type.
    pub fn with_resource(mut self, token: TypeToken, schema: ResourceSchema) -> Self {
        self.resources.insert(token, schema);
        self
    }

    /// Look up the schema for a resource type.
    pub fn resource(&self, token: &TypeToken) -> Option<&ResourceSchema> {
        self.resources.get(token)
    }

    /// Number of resource types declared.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

// ============================================================================
// Stub trait
// ============================================================================

/// In-process implementation of a package.
///
/// `outputs` runs once per registered resource, with exclusive access to the
/// engine RNG so seeded runs replay identically. The engine has already
/// validated the token against [`PackageStub::schema`] and checked the
/// required inputs for presence by the time `outputs` is called; value-level
/// validation is the stub's job.
pub trait PackageStub: Send + Sync + Debug {
    /// The package this stub serves.
    fn package(&self) -> PackageName;

    /// The resource types this stub serves.
    fn schema(&self) -> PackageSchema;

    /// Synthesize the output properties for a registered resource.
    fn outputs(
        &self,
        token: &TypeToken,
        inputs: &PropertyMap,
        rng: &mut dyn RngCore,
    ) -> Result<PropertyMap, StubError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_schema_lookup() {
        let token = TypeToken::new_unchecked("widgets:index:Badge");
        let schema = PackageSchema::new()
            .with_resource(token.clone(), ResourceSchema::new(&["label"], &["copies"]));

        assert_eq!(schema.len(), 1);
        let resource = schema.resource(&token);
        assert!(resource.is_some_and(|r| r.required_inputs == ["label"]));
        assert!(
            schema
                .resource(&TypeToken::new_unchecked("widgets:index:Gadget"))
                .is_none()
        );
    }

    #[test]
    fn test_knows_input() {
        let schema = ResourceSchema::new(&["length"], &["prefix"]);
        assert!(schema.knows_input("length"));
        assert!(schema.knows_input("prefix"));
        assert!(!schema.knows_input("entropy"));
    }
}
