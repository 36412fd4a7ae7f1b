// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for Elgato Key Lights.
//!
//! Each light serves a small JSON API on port 9123:
//!
//! - `GET /elgato/accessory-info` returns the identity (serial, names)
//! - `GET /elgato/lights` returns power, brightness and temperature
//! - `PUT /elgato/lights` writes any subset of those fields
//!
//! Temperature travels as mireds on the wire and is converted to Kelvin at
//! this boundary. Lights are discovered by probing configured hosts and
//! `/24` subnets, see [`ElgatoConfig`].

mod client;
mod config;
mod light;
mod wire;

pub use client::ElgatoClient;
pub use config::ElgatoConfig;
pub use light::ElgatoLight;
