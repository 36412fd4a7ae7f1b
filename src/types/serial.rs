// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device serial number type.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Serial number of a physical light.
///
/// The serial is the stable identity of a device: it survives address
/// changes and restarts, and keys the controller's device list. Cloning is
/// cheap because the string is shared.
///
/// # Examples
///
/// ```
/// use keylight_lib::types::Serial;
///
/// let serial = Serial::new("BW33J1A02345");
/// assert_eq!(serial.as_str(), "BW33J1A02345");
/// assert_eq!(serial, "BW33J1A02345".into());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Serial(Arc<str>);

impl Serial {
    /// Creates a serial from any string-like value.
    #[must_use]
    pub fn new(serial: impl AsRef<str>) -> Self {
        Self(Arc::from(serial.as_ref()))
    }

    /// Returns the serial as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serial({})", self.0)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Serial {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Serial {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for Serial {
    fn borrow(&self) -> &str {
        &self.0
    }
}
