// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! In-process registration engine for resource declarations.
//!
//! This crate hosts the engine that typed fixture packages (such as
//! `drydock-testprovider`) register declarations with. It tracks every
//! accepted declaration, synthesizes outputs through installed
//! [`PackageStub`]s, and exposes the results as deferred [`Output`] values,
//! an [`EngineEvent`](drydock_types::EngineEvent) stream, and post-run
//! state snapshots.
//!
//! Everything runs inside the current process; there is no network, no
//! persistence, and no plugin loading.

pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod stub;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use output::*;
pub use stub::*;
