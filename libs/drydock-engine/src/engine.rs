// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The registration engine.
//!
//! The engine plays the role an orchestrating service normally would:
//! programs install package stubs, submit resource and provider
//! declarations, and read back deferred outputs. Each declaration is
//! validated against the installed schemas, given a URN, and tracked; the
//! stub-synthesized outputs are published asynchronously. Progress is
//! observable through a broadcast event stream while running and through
//! state snapshots afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use drydock_types::{
    Colorization, DeclarationOptions, EngineEvent, PackageName, PropertyMap, ProviderDeclaration,
    ResourceDeclaration, ResourceState, ResourceStatus, Severity, Urn,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{broadcast, watch};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::output::{Output, ResolutionSlot};
use crate::stub::{PackageSchema, PackageStub};

// ============================================================================
// Engine state
// ============================================================================

/// A package stub together with the schema it declared at install time
#[derive(Debug, Clone)]
struct InstalledPackage {
    stub: Arc<dyn PackageStub>,
    schema: PackageSchema,
}

/// One tracked declaration
#[derive(Debug)]
struct TrackedResource {
    state: ResourceState,
    slot: watch::Sender<ResolutionSlot>,
}

/// Mutable engine state behind the lock
#[derive(Debug)]
struct EngineState {
    packages: BTreeMap<PackageName, InstalledPackage>,
    resources: BTreeMap<Urn, TrackedResource>,
    /// URNs in registration order
    order: Vec<Urn>,
    rng: StdRng,
    cancelled: bool,
}

#[derive(Debug)]
struct Inner {
    config: EngineConfig,
    state: tokio::sync::Mutex<EngineState>,
    events: broadcast::Sender<EngineEvent>,
}

/// The in-process registration engine.
///
/// Cheap to clone; clones share packages, tracked state, and the event
/// stream.
#[derive(Debug, Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

impl Engine {
    /// Build an engine with no packages installed.
    pub fn new(config: EngineConfig) -> Engine {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        // broadcast requires a nonzero capacity
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Engine {
            inner: Arc::new(Inner {
                config,
                state: tokio::sync::Mutex::new(EngineState {
                    packages: BTreeMap::new(),
                    resources: BTreeMap::new(),
                    order: Vec::new(),
                    rng,
                    cancelled: false,
                }),
                events,
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Subscribe to the engine's event stream.
    ///
    /// Only events sent after the call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.inner.events.subscribe()
    }

    /// Install a package stub, making its resource types registrable.
    pub async fn install_package(&self, stub: Arc<dyn PackageStub>) -> Result<(), EngineError> {
        let mut state = self.inner.state.lock().await;
        if state.cancelled {
            return Err(EngineError::Cancelled);
        }
        let package = stub.package();
        if state.packages.contains_key(&package) {
            return Err(EngineError::PackageAlreadyInstalled(package.to_string()));
        }
        let schema = stub.schema();
        tracing::info!(package = %package, types = schema.len(), "installed package");
        self.emit(EngineEvent::diag(
            Severity::Debug,
            format!("installed package {package}"),
        ));
        state.packages.insert(package, InstalledPackage { stub, schema });
        Ok(())
    }

    /// Submit a resource declaration.
    ///
    /// Validation happens up front and failures are returned to the caller:
    /// the engine must not be cancelled, the name must be non-empty, the
    /// type's package must be installed and serve the type, the minted URN
    /// must be new, required inputs must be present, and every URN named in
    /// the options must reference a tracked declaration. Once accepted, the
    /// declaration is tracked and its outputs resolve asynchronously; a stub
    /// rejection at that stage surfaces through the outputs, never here.
    pub async fn register_resource(
        &self,
        decl: ResourceDeclaration,
    ) -> Result<RegisteredResource, EngineError> {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        if state.cancelled {
            return Err(EngineError::Cancelled);
        }
        if decl.name.is_empty() {
            return Err(EngineError::EmptyName);
        }

        let package = decl.type_token.package();
        let installed = state
            .packages
            .get(&package)
            .ok_or_else(|| EngineError::UnknownPackage(package.to_string()))?;
        let schema = installed.schema.resource(&decl.type_token).ok_or_else(|| {
            EngineError::UnknownResourceType {
                package: package.to_string(),
                token: decl.type_token.clone(),
            }
        })?;

        let urn = Urn::resource(
            &self.inner.config.stack,
            &self.inner.config.project,
            &decl.type_token,
            &decl.name,
        );
        if state.resources.contains_key(&urn) {
            return Err(EngineError::DuplicateUrn(urn));
        }

        for required in &schema.required_inputs {
            if !decl.inputs.contains_key(required) {
                return Err(EngineError::MissingRequiredInput {
                    token: decl.type_token.clone(),
                    property: required.clone(),
                });
            }
        }
        for property in decl.inputs.keys() {
            if !schema.knows_input(property) {
                tracing::warn!(urn = %urn, property = %property, "ignoring unknown input");
                self.emit(EngineEvent::diag(
                    Severity::Warning,
                    format!("ignoring unknown input {property:?} on {urn}"),
                ));
            }
        }
        check_options(state, &decl.options, &package)?;

        // Synthesize under the lock so seeded runs draw from the RNG in
        // registration order.
        let synthesized = installed
            .stub
            .outputs(&decl.type_token, &decl.inputs, &mut state.rng);
        let outcome = match synthesized {
            Ok(outputs) => Ok((mint_id(&mut state.rng), outputs)),
            Err(err) => Err(err.to_string()),
        };

        let resource_state = ResourceState {
            urn: urn.clone(),
            kind: decl.type_token.to_string(),
            name: decl.name,
            is_provider: false,
            inputs: decl.inputs,
            options: decl.options,
            id: None,
            outputs: PropertyMap::new(),
            status: ResourceStatus::Registered,
            registered_at: Utc::now(),
        };
        let (tx, rx) = watch::channel(ResolutionSlot::Pending);
        state.resources.insert(
            urn.clone(),
            TrackedResource {
                state: resource_state,
                slot: tx,
            },
        );
        state.order.push(urn.clone());

        tracing::debug!(urn = %urn, "registered resource");
        self.emit(EngineEvent::diag(
            Severity::Debug,
            format!("registered {urn}"),
        ));

        let engine = self.clone();
        let target = urn.clone();
        tokio::spawn(async move {
            engine.publish(target, outcome).await;
        });

        Ok(RegisteredResource { urn, slot: rx })
    }

    /// Submit a provider declaration.
    ///
    /// Providers carry no inputs and need no stub synthesis, so they resolve
    /// before the call returns; the deferred-output API still applies.
    pub async fn register_provider(
        &self,
        decl: ProviderDeclaration,
    ) -> Result<RegisteredResource, EngineError> {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        if state.cancelled {
            return Err(EngineError::Cancelled);
        }
        if decl.name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        if !state.packages.contains_key(&decl.package) {
            return Err(EngineError::UnknownPackage(decl.package.to_string()));
        }

        let urn = Urn::provider(
            &self.inner.config.stack,
            &self.inner.config.project,
            &decl.package,
            &decl.name,
        );
        if state.resources.contains_key(&urn) {
            return Err(EngineError::DuplicateUrn(urn));
        }
        check_options(state, &decl.options, &decl.package)?;

        let id = mint_id(&mut state.rng);
        let resource_state = ResourceState {
            urn: urn.clone(),
            kind: decl.package.to_string(),
            name: decl.name,
            is_provider: true,
            inputs: PropertyMap::new(),
            options: decl.options,
            id: Some(id.clone()),
            outputs: PropertyMap::new(),
            status: ResourceStatus::Resolved,
            registered_at: Utc::now(),
        };
        let (tx, rx) = watch::channel(ResolutionSlot::Resolved {
            id,
            outputs: PropertyMap::new(),
        });
        state.resources.insert(
            urn.clone(),
            TrackedResource {
                state: resource_state,
                slot: tx,
            },
        );
        state.order.push(urn.clone());

        tracing::debug!(urn = %urn, "registered provider");
        self.emit(EngineEvent::diag(
            Severity::Debug,
            format!("registered {urn}"),
        ));

        Ok(RegisteredResource { urn, slot: rx })
    }

    /// Stop accepting declarations. Resolutions already in flight still land.
    pub async fn cancel(&self) {
        let mut state = self.inner.state.lock().await;
        if state.cancelled {
            return;
        }
        state.cancelled = true;
        tracing::info!("engine cancelled");
        self.emit(EngineEvent::cancel());
    }

    /// Whether the engine has been cancelled.
    pub async fn is_cancelled(&self) -> bool {
        self.inner.state.lock().await.cancelled
    }

    /// Forward program output onto the event stream.
    pub fn print(&self, message: impl Into<String>) {
        self.print_colored(message, Colorization::Raw);
    }

    /// Forward program output with an explicit colorization mode.
    pub fn print_colored(&self, message: impl Into<String>, color: Colorization) {
        let message = message.into();
        tracing::info!(message = %message, "program output");
        self.emit(EngineEvent::stdout(message, color));
    }

    /// Put a program diagnostic onto the event stream.
    pub fn diag(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Debug => tracing::debug!(message = %message, "program diagnostic"),
            Severity::Info | Severity::Infoerr => {
                tracing::info!(message = %message, "program diagnostic")
            }
            Severity::Warning => tracing::warn!(message = %message, "program diagnostic"),
            Severity::Error => tracing::error!(message = %message, "program diagnostic"),
        }
        self.emit(EngineEvent::diag(severity, message));
    }

    /// Wait until every tracked declaration has left the registered state.
    pub async fn settle(&self) {
        let receivers: Vec<(Urn, watch::Receiver<ResolutionSlot>)> = {
            let state = self.inner.state.lock().await;
            state
                .resources
                .iter()
                .map(|(urn, tracked)| (urn.clone(), tracked.slot.subscribe()))
                .collect()
        };
        for (urn, mut rx) in receivers {
            if rx.wait_for(|slot| !slot.is_pending()).await.is_err() {
                tracing::warn!(urn = %urn, "resolution dropped before settling");
            }
        }
    }

    /// Number of tracked declarations.
    pub async fn resource_count(&self) -> usize {
        self.inner.state.lock().await.resources.len()
    }

    /// Tracked declaration states, in registration order.
    pub async fn snapshot(&self) -> Vec<ResourceState> {
        let state = self.inner.state.lock().await;
        state
            .order
            .iter()
            .filter_map(|urn| state.resources.get(urn).map(|t| t.state.clone()))
            .collect()
    }

    /// The tracked state for one URN.
    pub async fn resource(&self, urn: &Urn) -> Option<ResourceState> {
        let state = self.inner.state.lock().await;
        state.resources.get(urn).map(|t| t.state.clone())
    }

    /// Publish a resolution outcome to the tracked state and the slot.
    async fn publish(&self, urn: Urn, outcome: Result<(String, PropertyMap), String>) {
        let mut state = self.inner.state.lock().await;
        let Some(tracked) = state.resources.get_mut(&urn) else {
            return;
        };
        let slot = match outcome {
            Ok((id, outputs)) => {
                tracked.state.status = ResourceStatus::Resolved;
                tracked.state.id = Some(id.clone());
                tracked.state.outputs = outputs.clone();
                tracing::debug!(urn = %urn, id = %id, "resolved resource");
                self.emit(EngineEvent::diag(
                    Severity::Debug,
                    format!("resolved {urn}"),
                ));
                ResolutionSlot::Resolved { id, outputs }
            }
            Err(reason) => {
                tracked.state.status = ResourceStatus::Failed;
                tracing::error!(urn = %urn, reason = %reason, "resource failed to resolve");
                self.emit(EngineEvent::diag(
                    Severity::Error,
                    format!("{urn} failed: {reason}"),
                ));
                ResolutionSlot::Failed(reason)
            }
        };
        let _ = tracked.slot.send_replace(slot);
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.inner.events.send(event);
    }
}

/// Mint a declaration id from the engine RNG so seeded runs replay.
fn mint_id(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

fn check_options(
    state: &EngineState,
    options: &DeclarationOptions,
    package: &PackageName,
) -> Result<(), EngineError> {
    if let Some(parent) = &options.parent {
        if !state.resources.contains_key(parent) {
            return Err(EngineError::UnknownReference(parent.clone()));
        }
    }
    for dep in &options.depends_on {
        if !state.resources.contains_key(dep) {
            return Err(EngineError::UnknownReference(dep.clone()));
        }
    }
    if let Some(provider) = &options.provider {
        let tracked = state
            .resources
            .get(provider)
            .ok_or_else(|| EngineError::UnknownReference(provider.clone()))?;
        if !tracked.state.is_provider {
            return Err(EngineError::NotAProvider(provider.clone()));
        }
        if tracked.state.kind != package.as_str() {
            return Err(EngineError::ProviderMismatch {
                provider: provider.clone(),
                expected: package.to_string(),
                found: tracked.state.kind.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Registration handles
// ============================================================================

/// Handle returned by a successful registration.
///
/// The URN is final at registration time; the id and output properties
/// resolve later. Handles are cheap to clone and outlive the registration
/// call.
#[derive(Debug, Clone)]
pub struct RegisteredResource {
    urn: Urn,
    slot: watch::Receiver<ResolutionSlot>,
}

impl RegisteredResource {
    pub fn urn(&self) -> &Urn {
        &self.urn
    }

    /// Deferred engine-assigned id.
    pub fn id(&self) -> Output<String> {
        Output::id(self.slot.clone())
    }

    /// Deferred view of one named output property.
    pub fn output<T>(&self, name: impl Into<String>) -> Output<T> {
        Output::property(self.slot.clone(), name)
    }
}

// ============================================================================
// Event collection
// ============================================================================

/// Collects engine events in the background for later inspection.
///
/// Attach before driving the engine; the collector task stops when the
/// buffer is dropped or the engine goes away.
#[derive(Debug)]
pub struct EventBuffer {
    events: Arc<tokio::sync::Mutex<Vec<EngineEvent>>>,
    task: tokio::task::JoinHandle<()>,
}

impl EventBuffer {
    /// Subscribe to the engine and start collecting.
    pub fn attach(engine: &Engine) -> Self {
        let mut rx = engine.subscribe();
        let events = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => sink.lock().await.push(event),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "event collector lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Self { events, task }
    }

    /// Everything collected so far, in arrival order.
    pub async fn collected(&self) -> Vec<EngineEvent> {
        self.events.lock().await.clone()
    }
}

impl Drop for EventBuffer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
