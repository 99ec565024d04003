// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Engine configuration

/// Default project name used when none is configured
const DEFAULT_PROJECT: &str = "drydock";

/// Default stack name used when none is configured
const DEFAULT_STACK: &str = "test";

/// Default capacity of the engine event channel
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Project name, embedded in every minted URN
    pub project: String,
    /// Stack name, embedded in every minted URN
    pub stack: String,
    /// Seed for the engine RNG; `None` draws entropy from the OS.
    ///
    /// Two engines built with the same seed and fed the same declarations in
    /// the same order synthesize identical ids and output values.
    pub seed: Option<u64>,
    /// Capacity of the broadcast channel carrying engine events
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            stack: DEFAULT_STACK.to_string(),
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let project =
            std::env::var("DRYDOCK_PROJECT").unwrap_or_else(|_| DEFAULT_PROJECT.to_string());

        let stack = std::env::var("DRYDOCK_STACK").unwrap_or_else(|_| DEFAULT_STACK.to_string());

        let seed = std::env::var("DRYDOCK_SEED").ok().and_then(|s| s.parse().ok());

        let event_capacity = std::env::var("DRYDOCK_EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EVENT_CAPACITY);

        Self {
            project,
            stack,
            seed,
            event_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.project, "drydock");
        assert_eq!(config.stack, "test");
        assert_eq!(config.seed, None);
        assert_eq!(config.event_capacity, 256);
    }
}
