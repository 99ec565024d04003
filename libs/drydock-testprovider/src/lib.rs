// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Typed fixture package for exercising the drydock engine.
//!
//! The `testprovider` package serves exactly one resource type,
//! [`Random`], plus explicit [`TestProvider`] instances. Test programs
//! install [`TestProviderStub`] into an engine, declare resources through
//! the typed structs here, and read back deferred outputs:
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use drydock_engine::{Engine, EngineConfig};
//! use drydock_testprovider::{Random, RandomArgs, TestProviderStub};
//!
//! let engine = Engine::new(EngineConfig::default());
//! TestProviderStub::install(&engine).await?;
//!
//! let pet = Random::new(&engine, "pet", RandomArgs::new(8.0).with_prefix("pet-")).await?;
//! println!("{}", pet.result().get().await?);
//! # Ok(())
//! # }
//! ```
//!
//! The type tokens are protocol-level identifiers shared with external
//! tooling and must not change.

pub mod provider;
pub mod random;
pub mod stub;

pub use provider::*;
pub use random::*;
pub use stub::*;

/// Package name every declaration in this crate registers under.
pub const PACKAGE: &str = "testprovider";

/// Type token of the random-string resource.
pub const RANDOM_TYPE: &str = "testprovider:index:Random";
