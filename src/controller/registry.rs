// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered device list owned by the controller.

use std::collections::{HashMap, HashSet};

use crate::client::DiscoveredDevice;
use crate::event::LightEvent;
use crate::state::DeviceView;
use crate::types::Serial;

/// A known light: its handle and the latest view of it.
#[derive(Debug)]
pub struct DeviceEntry<H> {
    handle: H,
    view: DeviceView,
}

impl<H> DeviceEntry<H> {
    /// Pairs a handle with its view.
    #[must_use]
    pub fn new(handle: H, view: DeviceView) -> Self {
        Self { handle, view }
    }

    /// Returns the device handle.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Returns the latest view.
    #[must_use]
    pub fn view(&self) -> &DeviceView {
        &self.view
    }
}

/// Ordered mapping from serial to [`DeviceEntry`].
///
/// Iteration order is significant: it is the order of the panels in the
/// UI. Lookups go through the hash map; `order` holds every key exactly once.
#[derive(Debug)]
pub struct DeviceRegistry<H> {
    entries: HashMap<Serial, DeviceEntry<H>>,
    order: Vec<Serial>,
}

impl<H> DeviceRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Returns the number of known lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no light is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `serial` is known.
    #[must_use]
    pub fn contains(&self, serial: &str) -> bool {
        self.entries.contains_key(serial)
    }

    /// Looks up an entry by serial.
    #[must_use]
    pub fn get(&self, serial: &str) -> Option<&DeviceEntry<H>> {
        self.entries.get(serial)
    }

    /// Serials in display order.
    pub fn serials(&self) -> impl Iterator<Item = &Serial> {
        self.order.iter()
    }

    /// Views in display order.
    pub fn views(&self) -> impl Iterator<Item = &DeviceView> {
        self.order
            .iter()
            .filter_map(|serial| self.entries.get(serial).map(DeviceEntry::view))
    }

    /// Appends an entry, or replaces it in place if the serial is known.
    pub fn insert(&mut self, entry: DeviceEntry<H>) -> Option<DeviceEntry<H>> {
        let serial = entry.view.serial().clone();
        let previous = self.entries.insert(serial.clone(), entry);
        if previous.is_none() {
            self.order.push(serial);
        }
        previous
    }

    /// Removes an entry; the remaining entries keep their relative order.
    pub fn remove(&mut self, serial: &str) -> Option<DeviceEntry<H>> {
        let removed = self.entries.remove(serial)?;
        self.order.retain(|s| s.as_str() != serial);
        Some(removed)
    }

    /// Replaces the view of a known entry. Returns `false` if unknown.
    pub fn replace_view(&mut self, view: DeviceView) -> bool {
        let Some(entry) = self.entries.get_mut(view.serial().as_str()) else {
            return false;
        };
        entry.view = view;
        true
    }

    /// Merges a discovery snapshot into the registry.
    ///
    /// Returns the events describing the change, destroyed lights first (in
    /// their previous order) then created lights (in discovery order).
    ///
    /// - If the snapshot names exactly the known serials, nothing changes and
    ///   no event is returned.
    /// - Known lights missing from the snapshot are removed.
    /// - Known lights present in the snapshot keep their handle and view and
    ///   are reordered by their position in the snapshot.
    /// - New lights are appended after them.
    ///
    /// A serial appearing several times in the snapshot counts once; the
    /// first occurrence wins.
    pub fn reconcile(&mut self, discovered: Vec<DiscoveredDevice<H>>) -> Vec<LightEvent> {
        let mut seen = HashSet::with_capacity(discovered.len());
        let discovered: Vec<_> = discovered
            .into_iter()
            .filter(|device| seen.insert(device.serial.clone()))
            .collect();

        if seen.len() == self.entries.len() && seen.iter().all(|s| self.entries.contains_key(s)) {
            return Vec::new();
        }

        let mut events = Vec::new();
        let mut previous = std::mem::take(&mut self.entries);

        for serial in std::mem::take(&mut self.order) {
            if !seen.contains(&serial) {
                previous.remove(&serial);
                tracing::debug!(%serial, "Light no longer discovered");
                events.push(LightEvent::destroyed(serial));
            }
        }

        let mut fresh = Vec::new();
        for device in discovered {
            match previous.remove(&device.serial) {
                Some(entry) => {
                    self.order.push(device.serial.clone());
                    self.entries.insert(device.serial, entry);
                }
                None => fresh.push(device),
            }
        }

        for device in fresh {
            let view = device.to_view();
            tracing::debug!(serial = %device.serial, address = %device.address, "New light discovered");
            events.push(LightEvent::created(view.clone()));
            self.insert(DeviceEntry::new(device.handle, view));
        }

        events
    }
}

impl<H> Default for DeviceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
