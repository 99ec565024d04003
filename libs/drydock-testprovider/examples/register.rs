// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Register a provider and a couple of random strings, then dump the
//! engine's view of the run.
//!
//! Usage:
//!   cargo run -p drydock-testprovider --example register
//!
//! Environment:
//!   DRYDOCK_PROJECT / DRYDOCK_STACK   URN components
//!   DRYDOCK_SEED                      seed the RNG for a reproducible run
//!   RUST_LOG                          tracing filter

use anyhow::Result;
use drydock_engine::{Engine, EngineConfig, EventBuffer};
use drydock_testprovider::{Random, RandomArgs, TestProvider, TestProviderStub};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,drydock_engine=debug".to_string()),
        ))
        .init();

    let engine = Engine::new(EngineConfig::from_env());
    let events = EventBuffer::attach(&engine);
    TestProviderStub::install(&engine).await?;

    let provider = TestProvider::new(&engine, "default").await?;
    tracing::info!(urn = %provider.urn(), "provider registered");

    let pet = Random::new(&engine, "pet", RandomArgs::new(8.0).with_prefix("pet-")).await?;
    let collar = Random::new(
        &engine,
        "collar",
        RandomArgs::new(4.0).with_prefix(pet.result()),
    )
    .await?;

    println!("pet    = {}", pet.result().get().await?);
    println!("collar = {}", collar.result().get().await?);

    engine.settle().await;
    for state in engine.snapshot().await {
        println!(
            "{:10} {} ({})",
            state.status,
            state.urn,
            state.id.unwrap_or_default()
        );
    }
    println!("{} events observed", events.collected().await.len());
    Ok(())
}
