// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Deferred output properties.
//!
//! Registering a declaration returns immediately; the id and output
//! properties arrive later, once the engine has run the package stub. An
//! [`Output`] is a typed handle onto one such value: [`Output::get`] waits
//! for the resolution to land and converts the property into the requested
//! Rust type. Outputs stay usable after the engine's registration phase ends
//! and can be fed back into later declarations as [`Input`]s.

use std::fmt;
use std::marker::PhantomData;

use drydock_types::{PropertyMap, PropertyValue};
use tokio::sync::watch;

use crate::error::OutputError;

// ============================================================================
// Resolution slots
// ============================================================================

/// Where a declaration's resolution currently stands.
///
/// One slot is shared per declaration between the engine (sender side) and
/// any number of outputs (receiver side). A slot moves out of `Pending`
/// exactly once and never returns to it.
#[derive(Debug, Clone)]
pub enum ResolutionSlot {
    /// The stub has not produced outputs yet
    Pending,
    /// The stub produced outputs and the engine assigned an id
    Resolved { id: String, outputs: PropertyMap },
    /// The stub rejected the declaration's values
    Failed(String),
}

impl ResolutionSlot {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResolutionSlot::Pending)
    }
}

// ============================================================================
// Typed outputs
// ============================================================================

/// Which part of a resolution an output reads.
#[derive(Debug, Clone)]
enum OutputTarget {
    /// The engine-assigned id
    Id,
    /// One named output property
    Property(String),
}

/// A deferred, typed view onto one resolved value of a declaration.
///
/// Cheap to clone; clones observe the same resolution.
pub struct Output<T> {
    rx: watch::Receiver<ResolutionSlot>,
    target: OutputTarget,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Output {
            rx: self.rx.clone(),
            target: self.target.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").field("target", &self.target).finish()
    }
}

impl<T> Output<T> {
    /// An output reading the engine-assigned id.
    pub(crate) fn id(rx: watch::Receiver<ResolutionSlot>) -> Output<T> {
        Output {
            rx,
            target: OutputTarget::Id,
            _marker: PhantomData,
        }
    }

    /// An output reading one named property.
    pub(crate) fn property(rx: watch::Receiver<ResolutionSlot>, name: impl Into<String>) -> Output<T> {
        Output {
            rx,
            target: OutputTarget::Property(name.into()),
            _marker: PhantomData,
        }
    }
}

impl<T: FromPropertyValue> Output<T> {
    /// Wait for the resolution to land and read the value.
    pub async fn get(&self) -> Result<T, OutputError> {
        let mut rx = self.rx.clone();
        let slot = rx
            .wait_for(|slot| !slot.is_pending())
            .await
            .map_err(|_| OutputError::Dropped)?
            .clone();
        match slot {
            ResolutionSlot::Resolved { id, outputs } => match &self.target {
                OutputTarget::Id => T::from_property_value(&PropertyValue::String(id)),
                OutputTarget::Property(name) => match outputs.get(name) {
                    Some(value) => T::from_property_value(value),
                    None => Err(OutputError::MissingProperty(name.clone())),
                },
            },
            ResolutionSlot::Failed(reason) => Err(OutputError::ResolutionFailed(reason)),
            // wait_for's predicate only admits settled slots
            ResolutionSlot::Pending => Err(OutputError::Dropped),
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// A value a program passes into a declaration.
///
/// Inputs are either plain values or outputs of earlier declarations; typed
/// argument structs await the latter before their declaration is submitted,
/// which is how dependencies between declarations are expressed.
#[derive(Debug, Clone)]
pub enum Input<T> {
    /// A concrete value supplied by the program
    Value(T),
    /// The output of an earlier declaration
    FromOutput(Output<T>),
}

impl<T: FromPropertyValue + Clone> Input<T> {
    /// Resolve the input to a concrete value.
    pub async fn resolve(&self) -> Result<T, OutputError> {
        match self {
            Input::Value(value) => Ok(value.clone()),
            Input::FromOutput(output) => output.get().await,
        }
    }
}

impl<T> From<T> for Input<T> {
    fn from(value: T) -> Self {
        Input::Value(value)
    }
}

impl<T> From<Output<T>> for Input<T> {
    fn from(output: Output<T>) -> Self {
        Input::FromOutput(output)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Input::Value(value.to_string())
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Conversion from a wire property value into a concrete Rust type.
pub trait FromPropertyValue: Sized {
    fn from_property_value(value: &PropertyValue) -> Result<Self, OutputError>;
}

impl FromPropertyValue for PropertyValue {
    fn from_property_value(value: &PropertyValue) -> Result<Self, OutputError> {
        Ok(value.clone())
    }
}

impl FromPropertyValue for f64 {
    fn from_property_value(value: &PropertyValue) -> Result<Self, OutputError> {
        value.as_number().ok_or(OutputError::TypeMismatch {
            expected: "number",
            found: value.kind_str(),
        })
    }
}

impl FromPropertyValue for String {
    fn from_property_value(value: &PropertyValue) -> Result<Self, OutputError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or(OutputError::TypeMismatch {
                expected: "string",
                found: value.kind_str(),
            })
    }
}

impl FromPropertyValue for bool {
    fn from_property_value(value: &PropertyValue) -> Result<Self, OutputError> {
        value.as_bool().ok_or(OutputError::TypeMismatch {
            expected: "bool",
            found: value.kind_str(),
        })
    }
}
