// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature type for white-light control.

use std::fmt;

use crate::error::ValueError;

/// Color temperature in Kelvin (2900-7000).
///
/// Lower values are warmer (more orange), higher values are cooler (bluer).
/// The lights themselves speak mireds; [`to_mireds`](Self::to_mireds) and
/// [`from_mireds`](Self::from_mireds) convert between the two scales.
///
/// # Examples
///
/// ```
/// use keylight_lib::types::ColorTemperature;
///
/// let neutral = ColorTemperature::new(5000).unwrap();
/// assert_eq!(neutral.kelvin(), 5000);
/// assert_eq!(neutral.to_mireds(), 200);
///
/// assert!(ColorTemperature::new(2000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorTemperature(u16);

impl ColorTemperature {
    /// Warmest supported temperature in Kelvin.
    pub const MIN: u16 = 2900;

    /// Coolest supported temperature in Kelvin.
    pub const MAX: u16 = 7000;

    /// Lowest mired value accepted by the lights (coolest).
    pub const MIN_MIREDS: u16 = 143;

    /// Highest mired value accepted by the lights (warmest).
    pub const MAX_MIREDS: u16 = 344;

    /// Warm white.
    pub const WARM: Self = Self(2900);

    /// Neutral white.
    pub const NEUTRAL: Self = Self(5000);

    /// Cool daylight.
    pub const COOL: Self = Self(7000);

    /// Creates a new color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [2900, 7000].
    pub fn new(kelvin: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&kelvin) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: kelvin,
            });
        }
        Ok(Self(kelvin))
    }

    /// Creates a color temperature, clamping to the valid range.
    #[must_use]
    pub const fn clamped(kelvin: u16) -> Self {
        if kelvin < Self::MIN {
            Self(Self::MIN)
        } else if kelvin > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(kelvin)
        }
    }

    /// Returns the temperature in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }

    /// Returns the temperature on the device scale, in mireds.
    #[must_use]
    pub fn to_mireds(&self) -> u16 {
        let mireds = rounded_reciprocal(self.0);
        mireds.clamp(Self::MIN_MIREDS, Self::MAX_MIREDS)
    }

    /// Converts a device reading in mireds, clamping into the Kelvin range.
    ///
    /// ```
    /// use keylight_lib::types::ColorTemperature;
    ///
    /// assert_eq!(ColorTemperature::from_mireds(200).kelvin(), 5000);
    /// assert_eq!(ColorTemperature::from_mireds(500).kelvin(), 2900);
    /// ```
    #[must_use]
    pub fn from_mireds(mireds: u16) -> Self {
        if mireds == 0 {
            return Self(Self::MAX);
        }
        Self::clamped(rounded_reciprocal(mireds))
    }
}

/// `round(1_000_000 / value)`, saturating at `u16::MAX`.
fn rounded_reciprocal(value: u16) -> u16 {
    let value = u32::from(value);
    let result = (1_000_000 + value / 2) / value;
    u16::try_from(result).unwrap_or(u16::MAX)
}

impl Default for ColorTemperature {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl TryFrom<u16> for ColorTemperature {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_range() {
        assert!(ColorTemperature::new(2899).is_err());
        assert!(ColorTemperature::new(2900).is_ok());
        assert!(ColorTemperature::new(7000).is_ok());
        assert!(ColorTemperature::new(7001).is_err());
    }

    #[test]
    fn temperature_clamped() {
        assert_eq!(ColorTemperature::clamped(1000).kelvin(), 2900);
        assert_eq!(ColorTemperature::clamped(9000).kelvin(), 7000);
        assert_eq!(ColorTemperature::clamped(4000).kelvin(), 4000);
    }

    #[test]
    fn mired_conversion_stays_on_device_scale() {
        assert_eq!(ColorTemperature::WARM.to_mireds(), 344);
        assert_eq!(ColorTemperature::COOL.to_mireds(), 143);
        assert_eq!(ColorTemperature::new(4000).unwrap().to_mireds(), 250);
    }

    #[test]
    fn from_mireds_reads_device_extremes() {
        assert_eq!(ColorTemperature::from_mireds(143).kelvin(), 6993);
        assert_eq!(ColorTemperature::from_mireds(344).kelvin(), 2907);
        assert_eq!(ColorTemperature::from_mireds(0).kelvin(), 7000);
    }

    #[test]
    fn temperature_display() {
        assert_eq!(ColorTemperature::NEUTRAL.to_string(), "5000K");
    }
}
