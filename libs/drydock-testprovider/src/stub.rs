// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The in-process stub serving the `testprovider` package.

use std::sync::Arc;

use drydock_engine::{Engine, EngineError, PackageSchema, PackageStub, ResourceSchema, StubError};
use drydock_types::{PackageName, PropertyMap, PropertyValue, TypeToken};
use rand::distr::Alphanumeric;
use rand::{Rng, RngCore};

use crate::{PACKAGE, RANDOM_TYPE};

/// Largest accepted `length` input.
const MAX_LENGTH: f64 = 1_048_576.0;

/// Stub implementation of the `testprovider` package.
///
/// Serves `testprovider:index:Random`: the result is the optional prefix
/// followed by exactly `length` alphanumeric characters drawn from the
/// engine RNG.
#[derive(Debug, Default)]
pub struct TestProviderStub;

impl TestProviderStub {
    /// Install this package into an engine.
    pub async fn install(engine: &Engine) -> Result<(), EngineError> {
        engine.install_package(Arc::new(TestProviderStub)).await
    }
}

impl PackageStub for TestProviderStub {
    fn package(&self) -> PackageName {
        PackageName::new_unchecked(PACKAGE)
    }

    fn schema(&self) -> PackageSchema {
        PackageSchema::new().with_resource(
            TypeToken::new_unchecked(RANDOM_TYPE),
            ResourceSchema::new(&["length"], &["prefix"]),
        )
    }

    fn outputs(
        &self,
        _token: &TypeToken,
        inputs: &PropertyMap,
        rng: &mut dyn RngCore,
    ) -> Result<PropertyMap, StubError> {
        let length = inputs
            .get("length")
            .and_then(|v| v.as_number())
            .ok_or_else(|| StubError::InvalidInput {
                property: "length".to_string(),
                reason: "expected a number".to_string(),
            })?;
        if length.fract() != 0.0 || !(0.0..=MAX_LENGTH).contains(&length) {
            return Err(StubError::InvalidInput {
                property: "length".to_string(),
                reason: format!("expected an integer between 0 and {MAX_LENGTH}, got {length}"),
            });
        }

        // an explicit null prefix means the same as an absent one
        let prefix = match inputs.get("prefix") {
            None | Some(PropertyValue::Null) => "",
            Some(value) => value.as_str().ok_or_else(|| StubError::InvalidInput {
                property: "prefix".to_string(),
                reason: "expected a string".to_string(),
            })?,
        };

        let tail: String = (0..length as usize)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();

        let mut outputs = PropertyMap::new();
        outputs.insert("length".to_string(), PropertyValue::Number(length));
        outputs.insert(
            "result".to_string(),
            PropertyValue::String(format!("{prefix}{tail}")),
        );
        Ok(outputs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn run(inputs: &PropertyMap) -> Result<PropertyMap, StubError> {
        let mut rng = StdRng::seed_from_u64(1);
        TestProviderStub.outputs(&TypeToken::new_unchecked(RANDOM_TYPE), inputs, &mut rng)
    }

    #[test]
    fn test_result_has_requested_length() {
        let mut inputs = PropertyMap::new();
        inputs.insert("length".to_string(), 12.0.into());
        let outputs = run(&inputs).unwrap();

        let result = outputs.get("result").and_then(|v| v.as_str()).unwrap();
        assert_eq!(result.len(), 12);
        assert!(result.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(
            outputs.get("length").and_then(|v| v.as_number()),
            Some(12.0)
        );
    }

    #[test]
    fn test_prefix_prepended_whole() {
        let mut inputs = PropertyMap::new();
        inputs.insert("length".to_string(), 4.0.into());
        inputs.insert("prefix".to_string(), "pfx-".into());
        let outputs = run(&inputs).unwrap();

        let result = outputs.get("result").and_then(|v| v.as_str()).unwrap();
        assert!(result.starts_with("pfx-"));
        assert_eq!(result.len(), "pfx-".len() + 4);
    }

    #[test]
    fn test_null_prefix_means_absent() {
        let mut inputs = PropertyMap::new();
        inputs.insert("length".to_string(), 3.0.into());
        inputs.insert("prefix".to_string(), PropertyValue::Null);
        let outputs = run(&inputs).unwrap();

        assert_eq!(
            outputs.get("result").and_then(|v| v.as_str()).map(str::len),
            Some(3)
        );
    }

    #[test]
    fn test_unusable_lengths_rejected() {
        for bad in [3.5, -1.0, MAX_LENGTH * 2.0, f64::NAN] {
            let mut inputs = PropertyMap::new();
            inputs.insert("length".to_string(), bad.into());
            assert!(run(&inputs).is_err(), "length {bad} should be rejected");
        }
    }

    #[test]
    fn test_non_string_prefix_rejected() {
        let mut inputs = PropertyMap::new();
        inputs.insert("length".to_string(), 3.0.into());
        inputs.insert("prefix".to_string(), 9.0.into());
        let err = run(&inputs).unwrap_err();
        assert!(err.to_string().contains("prefix"), "{err}");
    }
}
