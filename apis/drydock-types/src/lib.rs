// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Shared types for the drydock resource-registration harness.
//!
//! This crate contains the vocabulary spoken between declaration producers
//! (typed fixture packages such as `drydock-testprovider`) and the
//! in-process registration engine (`drydock-engine`): dynamic property
//! values, validated type tokens and URNs, declaration payloads, tracked
//! resource state, and the engine event stream.
//!
//! Nothing in here talks to a network or holds runtime state; it is all
//! serde/schemars-friendly data.

pub mod declaration;
pub mod events;
pub mod token;
pub mod value;

pub use declaration::*;
pub use events::*;
pub use token::*;
pub use value::*;
