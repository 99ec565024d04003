// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! End-to-end tests for the testprovider fixture package
//!
//! These take the full path a test program takes: install the package,
//! declare resources through the typed structs, then read deferred outputs
//! and inspect engine state.

#![allow(clippy::unwrap_used)]

use drydock_engine::{Engine, EngineConfig, EngineError, OutputError};
use drydock_testprovider::{
    PACKAGE, RANDOM_TYPE, Random, RandomArgs, TestProvider, TestProviderStub,
};
use drydock_types::{
    DeclarationOptions, PropertyMap, PropertyValue, ResourceDeclaration, ResourceStatus, Severity,
    TypeToken,
};
use pretty_assertions::assert_eq;

async fn fixture_engine() -> Engine {
    let engine = Engine::new(EngineConfig::default());
    TestProviderStub::install(&engine).await.unwrap();
    engine
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_type_tokens_are_exact() {
    assert_eq!(RANDOM_TYPE, "testprovider:index:Random");
    assert_eq!(PACKAGE, "testprovider");

    let engine = fixture_engine().await;
    let random = Random::new(&engine, "r1", RandomArgs::new(4.0))
        .await
        .unwrap();
    let provider = TestProvider::new(&engine, "p1").await.unwrap();
    engine.settle().await;

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot[0].kind, "testprovider:index:Random");
    assert_eq!(snapshot[1].kind, "testprovider");
    assert!(
        random
            .urn()
            .as_str()
            .contains("::testprovider:index:Random::r1")
    );
    assert!(provider.urn().as_str().ends_with("::testprovider::p1"));

    // The declaration records exactly what was passed: a length, no prefix
    // key at all, and nothing for the provider.
    assert_eq!(snapshot[0].inputs.get("length"), Some(&PropertyValue::from(4.0)));
    assert!(!snapshot[0].inputs.contains_key("prefix"));
    assert!(snapshot[1].inputs.is_empty());
    assert!(snapshot[1].is_provider);
}

// ============================================================================
// Outputs
// ============================================================================

#[tokio::test]
async fn test_outputs_resolve() {
    let engine = fixture_engine().await;

    let plain = Random::new(&engine, "plain", RandomArgs::new(8.0))
        .await
        .unwrap();
    assert_eq!(plain.length().get().await.unwrap(), 8.0);
    let result = plain.result().get().await.unwrap();
    assert_eq!(result.len(), 8);
    assert!(result.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(!plain.id().get().await.unwrap().is_empty());

    let prefixed = Random::new(
        &engine,
        "prefixed",
        RandomArgs::new(6.0).with_prefix("pet-"),
    )
    .await
    .unwrap();
    let result = prefixed.result().get().await.unwrap();
    assert!(result.starts_with("pet-"));
    assert_eq!(result.len(), "pet-".len() + 6);

    // both inputs land in the tracked declaration
    let state = engine.resource(prefixed.urn()).await.unwrap();
    assert_eq!(
        state.inputs.get("length").and_then(|v| v.as_number()),
        Some(6.0)
    );
    assert_eq!(
        state.inputs.get("prefix").and_then(|v| v.as_str()),
        Some("pet-")
    );
}

#[tokio::test]
async fn test_zero_length_yields_prefix_only() {
    let engine = fixture_engine().await;
    let random = Random::new(&engine, "empty", RandomArgs::new(0.0).with_prefix("only-"))
        .await
        .unwrap();
    assert_eq!(random.result().get().await.unwrap(), "only-");
    assert_eq!(random.length().get().await.unwrap(), 0.0);
}

#[tokio::test]
async fn test_outputs_chain_between_resources() {
    let engine = fixture_engine().await;

    let first = Random::new(&engine, "first", RandomArgs::new(5.0))
        .await
        .unwrap();
    // the second resource takes both its length and its prefix from the
    // first one's outputs
    let second = Random::new(
        &engine,
        "second",
        RandomArgs {
            length: first.length().into(),
            prefix: Some(first.result().into()),
        },
    )
    .await
    .unwrap();

    let first_result = first.result().get().await.unwrap();
    let second_result = second.result().get().await.unwrap();
    assert!(second_result.starts_with(&first_result));
    assert_eq!(second_result.len(), first_result.len() + 5);
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_duplicate_names_rejected() {
    let engine = fixture_engine().await;
    Random::new(&engine, "dup", RandomArgs::new(3.0))
        .await
        .unwrap();
    let err = Random::new(&engine, "dup", RandomArgs::new(3.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateUrn(_)), "{err}");

    // providers occupy a different URN space than resources
    TestProvider::new(&engine, "dup").await.unwrap();
    let err = TestProvider::new(&engine, "dup").await.unwrap_err();
    assert!(matches!(err, EngineError::DuplicateUrn(_)));
}

#[tokio::test]
async fn test_missing_length_rejected_up_front() {
    let engine = fixture_engine().await;
    // typed arguments make this unrepresentable; submit a raw declaration
    let decl = ResourceDeclaration::new(
        TypeToken::new_unchecked(RANDOM_TYPE),
        "bare",
        PropertyMap::new(),
    );
    let err = engine.register_resource(decl).await.unwrap_err();
    match err {
        EngineError::MissingRequiredInput { property, .. } => assert_eq!(property, "length"),
        other => panic!("expected MissingRequiredInput, got {other}"),
    }
    assert_eq!(engine.resource_count().await, 0);
}

#[tokio::test]
async fn test_bad_length_fails_resolution_not_registration() {
    let engine = fixture_engine().await;
    let mut events = engine.subscribe();

    let random = Random::new(&engine, "frac", RandomArgs::new(2.5))
        .await
        .unwrap();
    let err = random.result().get().await.unwrap_err();
    assert!(matches!(err, OutputError::ResolutionFailed(_)), "{err}");

    engine.settle().await;
    let state = engine.resource(random.urn()).await.unwrap();
    assert_eq!(state.status, ResourceStatus::Failed);

    let mut saw_error = false;
    while let Ok(event) = events.try_recv() {
        if event.severity() == Some(Severity::Error) {
            saw_error = true;
        }
    }
    assert!(saw_error);
}

// ============================================================================
// Providers
// ============================================================================

#[tokio::test]
async fn test_explicit_provider() {
    let engine = fixture_engine().await;

    let provider = TestProvider::new(&engine, "explicit").await.unwrap();
    assert!(!provider.id().get().await.unwrap().is_empty());

    let random = Random::with_options(
        &engine,
        "served",
        RandomArgs::new(4.0),
        DeclarationOptions {
            provider: Some(provider.urn().clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(random.result().get().await.unwrap().len(), 4);

    engine.settle().await;
    let state = engine.resource(random.urn()).await.unwrap();
    assert_eq!(state.options.provider.as_ref(), Some(provider.urn()));
}

// ============================================================================
// Determinism
// ============================================================================

#[tokio::test]
async fn test_seeded_runs_replay_byte_for_byte() {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let engine = Engine::new(EngineConfig {
            seed: Some(7),
            ..Default::default()
        });
        TestProviderStub::install(&engine).await.unwrap();

        let provider = TestProvider::new(&engine, "p").await.unwrap();
        let random = Random::new(&engine, "r", RandomArgs::new(16.0).with_prefix("seed-"))
            .await
            .unwrap();
        runs.push((
            provider.id().get().await.unwrap(),
            random.id().get().await.unwrap(),
            random.result().get().await.unwrap(),
        ));
    }
    assert_eq!(runs[0], runs[1]);
}
