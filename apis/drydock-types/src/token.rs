// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Validated identifiers: package names, resource type tokens, and URNs.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have the `package:module:type` shape.
    #[error("malformed type token '{0}' (expected package:module:type)")]
    MalformedType(String),

    /// The package name is not lowercase alphanumeric.
    #[error("malformed package name '{0}' (expected lowercase alphanumeric, may contain '-')")]
    MalformedPackage(String),
}

fn valid_package(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// ============================================================================
// PackageName
// ============================================================================

/// The name of a resource package, e.g. `testprovider`.
///
/// Provider declarations are registered under the bare package name, so this
/// is also the kind token of a provider declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Parse a package name, validating the format.
    pub fn parse(name: impl Into<String>) -> Result<Self, TokenError> {
        let name = name.into();
        if valid_package(&name) {
            Ok(Self(name))
        } else {
            Err(TokenError::MalformedPackage(name))
        }
    }

    /// Create without validation (for compile-time-known names).
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// TypeToken
// ============================================================================

/// A resource type token in `package:module:type` form,
/// e.g. `testprovider:index:Random`.
///
/// The token text is a protocol-level identifier: engines and packages match
/// on it byte-for-byte, so it is stored exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TypeToken(String);

impl TypeToken {
    /// Parse a type token, validating the three-segment format.
    pub fn parse(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        let segments: Vec<&str> = token.split(':').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::MalformedType(token));
        }
        if !valid_package(segments[0]) {
            return Err(TokenError::MalformedType(token));
        }
        Ok(Self(token))
    }

    /// Create without validation (for compile-time-known tokens).
    pub fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The package segment, e.g. `testprovider`.
    pub fn package(&self) -> PackageName {
        PackageName::new_unchecked(self.segment(0))
    }

    /// The module segment, e.g. `index`.
    pub fn module(&self) -> &str {
        self.segment(1)
    }

    /// The type segment, e.g. `Random`.
    pub fn type_name(&self) -> &str {
        self.segment(2)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segment(&self, idx: usize) -> &str {
        self.0.split(':').nth(idx).unwrap_or_default()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TypeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Urn
// ============================================================================

/// The scope-unique identity of a tracked declaration.
///
/// Format: `urn:drydock:{stack}::{project}::{kind}::{name}`, where `{kind}`
/// is the resource type token, or the package name for provider
/// declarations. URNs are minted by the engine; duplicate-name detection
/// keys on the full URN.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    /// Mint the URN for a resource declaration.
    pub fn resource(stack: &str, project: &str, token: &TypeToken, name: &str) -> Self {
        Self(format!("urn:drydock:{stack}::{project}::{token}::{name}"))
    }

    /// Mint the URN for a provider declaration.
    pub fn provider(stack: &str, project: &str, package: &PackageName, name: &str) -> Self {
        Self(format!("urn:drydock:{stack}::{project}::{package}::{name}"))
    }

    /// The declaration name (the final `::`-separated segment).
    pub fn name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_type_token_segments() {
        let token = TypeToken::parse("testprovider:index:Random").unwrap();
        assert_eq!(token.package().as_str(), "testprovider");
        assert_eq!(token.module(), "index");
        assert_eq!(token.type_name(), "Random");
        assert_eq!(token.as_str(), "testprovider:index:Random");
    }

    #[test]
    fn test_type_token_rejects_bad_shapes() {
        assert!(TypeToken::parse("testprovider").is_err());
        assert!(TypeToken::parse("a:b").is_err());
        assert!(TypeToken::parse("a:b:c:d").is_err());
        assert!(TypeToken::parse("a::c").is_err());
        assert!(TypeToken::parse("Caps:index:Random").is_err());
    }

    #[test]
    fn test_package_name_validation() {
        assert!(PackageName::parse("testprovider").is_ok());
        assert!(PackageName::parse("test-provider2").is_ok());
        assert!(PackageName::parse("").is_err());
        assert!(PackageName::parse("TestProvider").is_err());
        assert!(PackageName::parse("2fast").is_err());
    }

    #[test]
    fn test_urn_format() {
        let token = TypeToken::new_unchecked("testprovider:index:Random");
        let urn = Urn::resource("test", "drydock", &token, "r1");
        assert_eq!(
            urn.as_str(),
            "urn:drydock:test::drydock::testprovider:index:Random::r1"
        );
        assert_eq!(urn.name(), "r1");
    }

    #[test]
    fn test_provider_urn_uses_bare_package() {
        let pkg = PackageName::new_unchecked("testprovider");
        let urn = Urn::provider("test", "drydock", &pkg, "p1");
        assert_eq!(urn.as_str(), "urn:drydock:test::drydock::testprovider::p1");
    }

    #[test]
    fn test_token_serde_is_transparent() {
        let token = TypeToken::new_unchecked("testprovider:index:Random");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#""testprovider:index:Random""#);
    }
}
