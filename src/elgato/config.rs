// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the Elgato HTTP client.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Where to look for lights and how to talk to them.
///
/// Discovery probes every candidate host: the explicit hosts first, then
/// every address of each configured `/24` subnet.
///
/// # Examples
///
/// ```
/// use keylight_lib::elgato::ElgatoConfig;
/// use std::net::Ipv4Addr;
/// use std::time::Duration;
///
/// let config = ElgatoConfig::new()
///     .with_host("192.168.1.40")
///     .with_subnet(Ipv4Addr::new(192, 168, 1, 0))
///     .with_request_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.port(), 9123);
/// assert_eq!(config.candidates().len(), 254);
/// assert_eq!(config.base_url("192.168.1.40"), "http://192.168.1.40:9123");
/// ```
#[derive(Debug, Clone)]
pub struct ElgatoConfig {
    port: u16,
    request_timeout: Duration,
    hosts: Vec<String>,
    subnets: Vec<Ipv4Addr>,
}

impl ElgatoConfig {
    /// Port the lights serve their API on.
    pub const DEFAULT_PORT: u16 = 9123;
    /// Default timeout for a single status read or write.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with no candidate hosts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            hosts: Vec::new(),
            subnets: Vec::new(),
        }
    }

    /// Adds a host to probe during discovery.
    ///
    /// A value containing `://` is used as the base URL verbatim, ignoring
    /// the configured port.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    /// Adds several hosts to probe during discovery.
    #[must_use]
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts.extend(hosts.into_iter().map(Into::into));
        self
    }

    /// Adds the `/24` subnet containing `network` to the sweep.
    #[must_use]
    pub fn with_subnet(mut self, network: Ipv4Addr) -> Self {
        self.subnets.push(network);
        self
    }

    /// Sets the API port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the timeout of a single request.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the API port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Every host discovery will probe, without duplicates.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        let swept = self.subnets.iter().flat_map(|network| {
            let [a, b, c, _] = network.octets();
            (1..=254).map(move |d| Ipv4Addr::new(a, b, c, d).to_string())
        });

        let mut candidates: Vec<String> = Vec::new();
        for host in self.hosts.iter().cloned().chain(swept) {
            if !candidates.contains(&host) {
                candidates.push(host);
            }
        }
        candidates
    }

    /// Builds the base URL for a host.
    #[must_use]
    pub fn base_url(&self, host: &str) -> String {
        if host.contains("://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{host}:{}", self.port)
        }
    }
}

impl Default for ElgatoConfig {
    fn default() -> Self {
        Self::new()
    }
}
