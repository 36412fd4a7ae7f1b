// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light lifecycle event types.

use crate::state::DeviceView;
use crate::types::Serial;

/// Events emitted by the controller.
///
/// Listeners receive them in the order the controller processed the tasks
/// that caused them.
///
/// # Examples
///
/// ```
/// use keylight_lib::event::LightEvent;
/// use keylight_lib::types::Serial;
///
/// let gone = LightEvent::destroyed(Serial::new("BW33J1A02345"));
/// assert!(gone.is_destroyed());
/// assert_eq!(gone.serial().as_str(), "BW33J1A02345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightEvent {
    /// A light entered the known set. The listener should build a control
    /// surface initialized from `view`.
    Created {
        /// Serial of the new light.
        serial: Serial,
        /// Its initial view.
        view: DeviceView,
    },

    /// The displayed fields of a known light changed. The listener should
    /// refresh its control surface in place.
    Updated {
        /// Serial of the light.
        serial: Serial,
        /// The new view.
        view: DeviceView,
    },

    /// A light left the known set, after a discovery miss or a failed call.
    /// The listener should tear down its control surface.
    Destroyed {
        /// Serial of the light.
        serial: Serial,
    },
}

impl LightEvent {
    /// Creates a created event.
    #[must_use]
    pub fn created(view: DeviceView) -> Self {
        Self::Created {
            serial: view.serial().clone(),
            view,
        }
    }

    /// Creates an updated event.
    #[must_use]
    pub fn updated(view: DeviceView) -> Self {
        Self::Updated {
            serial: view.serial().clone(),
            view,
        }
    }

    /// Creates a destroyed event.
    #[must_use]
    pub fn destroyed(serial: Serial) -> Self {
        Self::Destroyed { serial }
    }

    /// Returns the serial this event is about.
    #[must_use]
    pub fn serial(&self) -> &Serial {
        match self {
            Self::Created { serial, .. }
            | Self::Updated { serial, .. }
            | Self::Destroyed { serial } => serial,
        }
    }

    /// Short name of the event kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Destroyed { .. } => "destroyed",
        }
    }

    /// Returns the view carried by the event, if any.
    #[must_use]
    pub fn view(&self) -> Option<&DeviceView> {
        match self {
            Self::Created { view, .. } | Self::Updated { view, .. } => Some(view),
            Self::Destroyed { .. } => None,
        }
    }

    /// Returns `true` for [`LightEvent::Created`].
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Returns `true` for [`LightEvent::Updated`].
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    /// Returns `true` for [`LightEvent::Destroyed`].
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed { .. })
    }
}
