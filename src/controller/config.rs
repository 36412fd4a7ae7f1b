// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

use std::time::Duration;

/// Settings for a [`LightController`](super::LightController).
///
/// # Examples
///
/// ```
/// use keylight_lib::controller::ControllerConfig;
/// use std::time::Duration;
///
/// let config = ControllerConfig::new()
///     .with_discovery_timeout(Duration::from_secs(3))
///     .with_event_capacity(64);
///
/// assert_eq!(config.discovery_timeout(), Duration::from_secs(3));
/// assert_eq!(config.refresh_interval(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    discovery_timeout: Duration,
    refresh_interval: Duration,
    event_capacity: usize,
    thread_name: String,
}

impl ControllerConfig {
    /// Default bound for a discovery scan.
    pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);
    /// Default period between refresh ticks while the panel is visible.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(3000);
    /// Default per-listener event buffer.
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;
    /// Default name of the worker thread.
    pub const DEFAULT_THREAD_NAME: &'static str = "light-controller";

    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            discovery_timeout: Self::DEFAULT_DISCOVERY_TIMEOUT,
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            thread_name: Self::DEFAULT_THREAD_NAME.to_string(),
        }
    }

    /// Sets the timeout used for discovery tasks the controller submits
    /// itself after a light failed.
    #[must_use]
    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    /// Sets the refresh tick period.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Sets the per-listener event buffer. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Sets the name of the worker thread.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Returns the discovery timeout.
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        self.discovery_timeout
    }

    /// Returns the refresh tick period.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the per-listener event buffer.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Returns the worker thread name.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}
