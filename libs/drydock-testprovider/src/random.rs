// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The `testprovider:index:Random` resource.

use drydock_engine::{Engine, EngineError, Input, Output, OutputError, RegisteredResource};
use drydock_types::{
    DeclarationOptions, PropertyMap, PropertyValue, ResourceDeclaration, TypeToken, Urn,
};

use crate::RANDOM_TYPE;

/// Arguments accepted by [`Random`].
#[derive(Debug, Clone)]
pub struct RandomArgs {
    /// Length of the generated tail, in characters.
    pub length: Input<f64>,
    /// Literal prefix prepended to the generated tail.
    pub prefix: Option<Input<String>>,
}

impl RandomArgs {
    pub fn new(length: impl Into<Input<f64>>) -> Self {
        Self {
            length: length.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<Input<String>>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Render to a wire input bag, awaiting any upstream outputs.
    async fn into_inputs(self) -> Result<PropertyMap, OutputError> {
        let mut inputs = PropertyMap::new();
        inputs.insert(
            "length".to_string(),
            PropertyValue::Number(self.length.resolve().await?),
        );
        if let Some(prefix) = self.prefix {
            inputs.insert(
                "prefix".to_string(),
                PropertyValue::String(prefix.resolve().await?),
            );
        }
        Ok(inputs)
    }
}

/// A tracked random-string resource.
///
/// Registering hands the declaration to the engine; [`Random::length`] and
/// [`Random::result`] resolve once the package stub has synthesized outputs.
#[derive(Debug, Clone)]
pub struct Random {
    registration: RegisteredResource,
}

impl Random {
    /// Register a random-string declaration under `name`.
    pub async fn new(engine: &Engine, name: &str, args: RandomArgs) -> Result<Random, EngineError> {
        Self::with_options(engine, name, args, DeclarationOptions::default()).await
    }

    /// Register with explicit pass-through options.
    pub async fn with_options(
        engine: &Engine,
        name: &str,
        args: RandomArgs,
        options: DeclarationOptions,
    ) -> Result<Random, EngineError> {
        let inputs = args.into_inputs().await?;
        let mut decl = ResourceDeclaration::new(TypeToken::new_unchecked(RANDOM_TYPE), name, inputs);
        decl.options = options;
        let registration = engine.register_resource(decl).await?;
        Ok(Random { registration })
    }

    pub fn urn(&self) -> &Urn {
        self.registration.urn()
    }

    /// Deferred engine-assigned id.
    pub fn id(&self) -> Output<String> {
        self.registration.id()
    }

    /// Deferred echo of the requested length.
    pub fn length(&self) -> Output<f64> {
        self.registration.output("length")
    }

    /// Deferred generated string: the prefix, if any, plus the random tail.
    pub fn result(&self) -> Output<String> {
        self.registration.output("result")
    }
}
