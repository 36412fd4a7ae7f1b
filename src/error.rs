// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `keylight_lib` library.
//!
//! The controller only has to tell three situations apart: a scan that could
//! not run ([`Error::DiscoveryFailed`]), a device that stopped answering
//! ([`Error::DeviceUnreachable`]) and a task naming a device that is no longer
//! known ([`Error::UnknownSerial`]). None of them is fatal to the controller.

use thiserror::Error;

use crate::types::Serial;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A discovery scan failed at the transport level.
    #[error("discovery failed: {0}")]
    DiscoveryFailed(#[from] DiscoveryError),

    /// A per-device call failed during a query or an adjustment.
    #[error("device {serial} is unreachable: {source}")]
    DeviceUnreachable {
        /// Serial of the device that failed.
        serial: Serial,
        /// The underlying device failure.
        #[source]
        source: DeviceError,
    },

    /// A task referenced a serial that is not in the device list.
    #[error("unknown device serial: {0}")]
    UnknownSerial(Serial),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// Failure of a single device call (status read or write).
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device did not answer.
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device answered, but the exchange failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Failure of a discovery scan as a whole.
///
/// Individual hosts that do not answer are not errors; they are simply
/// absent from the result.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The scan could not be performed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The scan could not be set up.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors related to the HTTP exchange with a light.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid host or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The device reported no light in its light list.
    #[error("device reported an empty light list")]
    EmptyLightList,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
