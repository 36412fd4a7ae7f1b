// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state snapshots.
//!
//! [`DeviceStatus`] is what a light reports about itself (power, brightness,
//! temperature). [`DeviceView`] adds the identity fields and is the value the
//! controller hands to the presentation layer.

mod device_view;

pub use device_view::{DeviceStatus, DeviceView};
