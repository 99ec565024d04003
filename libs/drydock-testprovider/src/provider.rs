// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Explicit provider instances for the `testprovider` package.

use drydock_engine::{Engine, EngineError, Output, RegisteredResource};
use drydock_types::{DeclarationOptions, PackageName, ProviderDeclaration, Urn};

use crate::PACKAGE;

/// An explicitly tracked provider instance.
///
/// Most declarations are served by the installed package stub directly;
/// registering a `TestProvider` and naming its URN in a declaration's
/// options pins that declaration to this instance.
#[derive(Debug, Clone)]
pub struct TestProvider {
    registration: RegisteredResource,
}

impl TestProvider {
    /// Register a provider declaration under `name`.
    pub async fn new(engine: &Engine, name: &str) -> Result<TestProvider, EngineError> {
        Self::with_options(engine, name, DeclarationOptions::default()).await
    }

    /// Register with explicit pass-through options.
    pub async fn with_options(
        engine: &Engine,
        name: &str,
        options: DeclarationOptions,
    ) -> Result<TestProvider, EngineError> {
        let mut decl = ProviderDeclaration::new(PackageName::new_unchecked(PACKAGE), name);
        decl.options = options;
        let registration = engine.register_provider(decl).await?;
        Ok(TestProvider { registration })
    }

    pub fn urn(&self) -> &Urn {
        self.registration.urn()
    }

    /// Deferred engine-assigned id.
    pub fn id(&self) -> Output<String> {
        self.registration.id()
    }
}
