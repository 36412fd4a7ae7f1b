// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered panel list with focus tracking.

use std::time::Duration;

use crate::event::LightEvent;
use crate::queue::{Adjustment, Task};
use crate::state::{DeviceStatus, DeviceView};
use crate::types::{Brightness, ColorTemperature, Serial};

/// Control surface for one light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    serial: Serial,
    view: DeviceView,
}

impl Panel {
    /// Serial of the light behind this panel.
    #[must_use]
    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    /// What the panel currently shows.
    #[must_use]
    pub fn view(&self) -> &DeviceView {
        &self.view
    }
}

/// Effect of applying an event to a [`PanelSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelChange {
    /// A panel was appended at this index.
    Added(usize),
    /// The panel at this index shows a new view.
    Refreshed(usize),
    /// The panel that was at this index is gone.
    Removed(usize),
    /// The event named a light without a panel.
    Ignored,
}

/// The panels of the tray, in the order their lights were created.
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    panels: Vec<Panel>,
    focused: Option<usize>,
}

impl PanelSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if there is no panel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// All panels in display order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Finds the panel of a light.
    #[must_use]
    pub fn get(&self, serial: &str) -> Option<&Panel> {
        self.position(serial).map(|index| &self.panels[index])
    }

    /// Index of the focused panel.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// The focused panel.
    #[must_use]
    pub fn focused(&self) -> Option<&Panel> {
        self.focused.and_then(|index| self.panels.get(index))
    }

    /// Mirrors a controller event.
    ///
    /// The first panel ever added to an empty set takes the focus. Removing
    /// the focused panel moves the focus to its neighbour.
    pub fn apply(&mut self, event: &LightEvent) -> PanelChange {
        match event {
            LightEvent::Created { serial, view } => {
                if let Some(index) = self.position(serial.as_str()) {
                    self.panels[index].view = view.clone();
                    return PanelChange::Refreshed(index);
                }
                self.panels.push(Panel {
                    serial: serial.clone(),
                    view: view.clone(),
                });
                if self.focused.is_none() {
                    self.focused = Some(0);
                }
                PanelChange::Added(self.panels.len() - 1)
            }
            LightEvent::Updated { serial, view } => {
                let Some(index) = self.position(serial.as_str()) else {
                    return PanelChange::Ignored;
                };
                self.panels[index].view = view.clone();
                PanelChange::Refreshed(index)
            }
            LightEvent::Destroyed { serial } => {
                let Some(index) = self.position(serial.as_str()) else {
                    return PanelChange::Ignored;
                };
                self.panels.remove(index);
                self.repair_focus(index);
                PanelChange::Removed(index)
            }
        }
    }

    /// Focuses a panel and asks for its current status.
    ///
    /// Returns `None` and keeps the focus if `index` is out of range.
    pub fn focus(&mut self, index: usize) -> Option<Task> {
        let panel = self.panels.get(index)?;
        self.focused = Some(index);
        Some(Task::query(panel.serial.clone()))
    }

    /// Task for the periodic refresh: query the focused light, or look for
    /// lights when there is nothing to show.
    #[must_use]
    pub fn tick(&self, discovery_timeout: Duration) -> Task {
        match self.focused() {
            Some(panel) => Task::query(panel.serial.clone()),
            None => Task::discover(discovery_timeout),
        }
    }

    /// Shows the new power state at once and returns the write for it.
    pub fn set_power(&mut self, serial: &str, on: bool) -> Option<Task> {
        self.adjust(serial, |status| status.power = on)
            .map(|adjustment| adjustment.with_power(on).into())
    }

    /// Shows the new brightness at once and returns the write for it.
    pub fn set_brightness(&mut self, serial: &str, brightness: Brightness) -> Option<Task> {
        self.adjust(serial, |status| status.brightness = brightness)
            .map(|adjustment| adjustment.with_brightness(brightness).into())
    }

    /// Shows the new temperature at once and returns the write for it.
    pub fn set_temperature(
        &mut self,
        serial: &str,
        temperature: ColorTemperature,
    ) -> Option<Task> {
        self.adjust(serial, |status| status.temperature = temperature)
            .map(|adjustment| adjustment.with_temperature(temperature).into())
    }

    fn adjust(
        &mut self,
        serial: &str,
        edit: impl FnOnce(&mut DeviceStatus),
    ) -> Option<Adjustment> {
        let index = self.position(serial)?;
        let panel = &mut self.panels[index];
        let mut status = panel.view.status();
        edit(&mut status);
        panel.view = panel.view.with_status(status);
        Some(Adjustment::new(panel.serial.clone()))
    }

    fn position(&self, serial: &str) -> Option<usize> {
        self.panels
            .iter()
            .position(|panel| panel.serial.as_str() == serial)
    }

    fn repair_focus(&mut self, removed: usize) {
        self.focused = match self.focused {
            _ if self.panels.is_empty() => None,
            Some(focused) if focused > removed => Some(focused - 1),
            Some(focused) => Some(focused.min(self.panels.len() - 1)),
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(serial: &str, brightness: u8) -> DeviceView {
        DeviceView::new(
            "10.0.0.1",
            Serial::new(serial),
            format!("Light {serial}"),
            DeviceStatus::new(true, Brightness::clamped(brightness), ColorTemperature::NEUTRAL),
        )
    }

    fn panel_set(serials: &[&str]) -> PanelSet {
        let mut panels = PanelSet::new();
        for serial in serials {
            panels.apply(&LightEvent::created(view(serial, 50)));
        }
        panels
    }

    fn serials(panels: &PanelSet) -> Vec<&str> {
        panels.panels().iter().map(|p| p.serial().as_str()).collect()
    }

    #[test]
    fn first_created_panel_takes_focus() {
        let mut panels = PanelSet::new();
        assert_eq!(panels.focused_index(), None);

        assert_eq!(
            panels.apply(&LightEvent::created(view("A", 50))),
            PanelChange::Added(0)
        );
        assert_eq!(
            panels.apply(&LightEvent::created(view("B", 50))),
            PanelChange::Added(1)
        );

        assert_eq!(panels.focused().unwrap().serial().as_str(), "A");
        assert_eq!(serials(&panels), ["A", "B"]);
    }

    #[test]
    fn duplicate_created_refreshes_in_place() {
        let mut panels = panel_set(&["A", "B"]);

        let change = panels.apply(&LightEvent::created(view("A", 90)));

        assert_eq!(change, PanelChange::Refreshed(0));
        assert_eq!(panels.len(), 2);
        assert_eq!(panels.get("A").unwrap().view().brightness().value(), 90);
    }

    #[test]
    fn updated_replaces_view_and_ignores_unknown() {
        let mut panels = panel_set(&["A"]);

        assert_eq!(
            panels.apply(&LightEvent::updated(view("A", 10))),
            PanelChange::Refreshed(0)
        );
        assert_eq!(panels.get("A").unwrap().view().brightness().value(), 10);
        assert_eq!(
            panels.apply(&LightEvent::updated(view("Z", 10))),
            PanelChange::Ignored
        );
    }

    #[test]
    fn destroying_focused_panel_moves_focus_to_neighbour() {
        let mut panels = panel_set(&["A", "B", "C"]);
        panels.focus(2);

        assert_eq!(
            panels.apply(&LightEvent::destroyed(Serial::new("C"))),
            PanelChange::Removed(2)
        );
        assert_eq!(panels.focused().unwrap().serial().as_str(), "B");
    }

    #[test]
    fn destroying_earlier_panel_keeps_focused_light() {
        let mut panels = panel_set(&["A", "B", "C"]);
        panels.focus(1);

        panels.apply(&LightEvent::destroyed(Serial::new("A")));

        assert_eq!(panels.focused_index(), Some(0));
        assert_eq!(panels.focused().unwrap().serial().as_str(), "B");
    }

    #[test]
    fn destroying_last_panel_clears_focus() {
        let mut panels = panel_set(&["A"]);

        panels.apply(&LightEvent::destroyed(Serial::new("A")));
        assert!(panels.is_empty());
        assert_eq!(panels.focused_index(), None);
        assert_eq!(
            panels.apply(&LightEvent::destroyed(Serial::new("A"))),
            PanelChange::Ignored
        );
    }

    #[test]
    fn focus_queries_the_light() {
        let mut panels = panel_set(&["A", "B"]);

        assert_eq!(panels.focus(1), Some(Task::query("B")));
        assert_eq!(panels.focused_index(), Some(1));
        assert_eq!(panels.focus(5), None);
        assert_eq!(panels.focused_index(), Some(1));
    }

    #[test]
    fn tick_queries_focus_or_discovers() {
        let timeout = Duration::from_secs(2);
        assert_eq!(PanelSet::new().tick(timeout), Task::discover(timeout));
        assert_eq!(panel_set(&["A"]).tick(timeout), Task::query("A"));
    }

    #[test]
    fn setters_update_view_and_emit_adjustments() {
        let mut panels = panel_set(&["A"]);

        let task = panels.set_power("A", false).unwrap();
        assert_eq!(task, Task::from(Adjustment::new("A").with_power(false)));
        assert!(!panels.get("A").unwrap().view().power());

        let task = panels.set_brightness("A", Brightness::clamped(30)).unwrap();
        assert_eq!(
            task,
            Task::from(Adjustment::new("A").with_brightness(Brightness::clamped(30)))
        );

        let task = panels.set_temperature("A", ColorTemperature::WARM).unwrap();
        assert_eq!(
            task,
            Task::from(Adjustment::new("A").with_temperature(ColorTemperature::WARM))
        );

        let shown = panels.get("A").unwrap().view();
        assert_eq!(shown.brightness().value(), 30);
        assert_eq!(shown.temperature(), ColorTemperature::WARM);
        assert!(panels.set_power("Z", true).is_none());
    }
}
