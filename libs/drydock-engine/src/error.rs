// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for drydock-engine

use drydock_types::{TypeToken, Urn};
use thiserror::Error;

/// Errors returned by registration and package-install calls.
///
/// These cover everything the engine can reject up front. Failures that
/// happen later, while a resource resolves, never surface here: they land in
/// the resource's outputs as an [`OutputError`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine was cancelled and accepts no further work
    #[error("engine is cancelled")]
    Cancelled,

    /// A declaration carried an empty name
    #[error("declaration name must not be empty")]
    EmptyName,

    /// No package with this name is installed
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// The package is installed but does not serve this resource type
    #[error("package {package} does not serve resource type {token}")]
    UnknownResourceType { package: String, token: TypeToken },

    /// A declaration with this URN is already tracked
    #[error("duplicate declaration URN: {0}")]
    DuplicateUrn(Urn),

    /// A required input property was not supplied
    #[error("missing required input {property:?} for {token}")]
    MissingRequiredInput { token: TypeToken, property: String },

    /// An option referenced a URN the engine has never seen
    #[error("unknown reference: {0}")]
    UnknownReference(Urn),

    /// The provider option referenced a provider serving a different package
    #[error("provider {provider} serves package {found}, expected {expected}")]
    ProviderMismatch {
        provider: Urn,
        expected: String,
        found: String,
    },

    /// The provider option referenced an ordinary resource
    #[error("not a provider: {0}")]
    NotAProvider(Urn),

    /// A package with this name is already installed
    #[error("package already installed: {0}")]
    PackageAlreadyInstalled(String),

    /// An input could not be read from an upstream output
    #[error("failed to resolve input: {0}")]
    Input(#[from] OutputError),
}

/// Errors raised by package stubs while synthesizing outputs.
#[derive(Error, Debug)]
pub enum StubError {
    /// An input property was present but unusable
    #[error("invalid input {property:?}: {reason}")]
    InvalidInput { property: String, reason: String },

    /// The stub failed for a reason of its own
    #[error("{0}")]
    Failure(String),
}

/// Errors returned when reading a deferred output value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    /// The engine went away before the resolution landed
    #[error("output channel closed before resolution")]
    Dropped,

    /// The resource this output belongs to failed to resolve
    #[error("resource failed to resolve: {0}")]
    ResolutionFailed(String),

    /// The resolved output bag has no property under this name
    #[error("resolved outputs have no property {0:?}")]
    MissingProperty(String),

    /// The value resolved to a different kind than requested
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
