// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a task carrying a value never needs to be validated again.
//!
//! # Types
//!
//! - [`Serial`] - Stable device identity
//! - [`Brightness`] - Light output (0-100%)
//! - [`ColorTemperature`] - White point in Kelvin (2900-7000)

mod brightness;
mod serial;
mod temperature;

pub use brightness::Brightness;
pub use serial::Serial;
pub use temperature::ColorTemperature;
