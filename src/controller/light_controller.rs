// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device-state controller.

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::client::{DeviceClient, DeviceHandle};
use crate::error::{DeviceError, Error, Result};
use crate::event::{EventBus, LightEvent};
use crate::queue::{Adjustment, Task, TaskReceiver, TaskSender, WeakTaskSender};
use crate::state::{DeviceStatus, DeviceView};
use crate::types::Serial;

use super::config::ControllerConfig;
use super::registry::DeviceRegistry;

/// What a successfully processed task did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A discovery changed the device list.
    Reconciled {
        /// Number of lights added.
        created: usize,
        /// Number of lights removed.
        destroyed: usize,
    },
    /// A discovery confirmed the device list as it was.
    Unchanged,
    /// A query refreshed a light's view.
    Refreshed,
    /// An adjustment was written to a light.
    Adjusted,
}

/// Single owner of the device list.
///
/// The controller takes tasks from a [`TaskReceiver`] one at a time and
/// runs each to completion before taking the next, so two operations never
/// race on the same light. It is the only caller of the [`DeviceClient`] and
/// the only code touching the device list; listeners learn about changes
/// through the [`EventBus`].
///
/// A failing light only affects itself: it is removed, a `Destroyed` event
/// is published and a discovery is queued so it can come back once it
/// answers again.
///
/// # Examples
///
/// ```no_run
/// use keylight_lib::controller::{ControllerConfig, LightController};
/// use keylight_lib::elgato::{ElgatoClient, ElgatoConfig};
/// use keylight_lib::queue::task_queue;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ElgatoClient::new(ElgatoConfig::new().with_host("192.168.1.40"))?;
/// let config = ControllerConfig::new();
/// let (tasks, receiver) = task_queue();
///
/// let controller = LightController::new(client, &tasks, config.clone());
/// let mut events = controller.subscribe();
/// let worker = controller.spawn(receiver)?;
///
/// tasks.discover(config.discovery_timeout());
/// // ... drain `events` from the UI thread with `try_recv` ...
/// # drop(tasks);
/// # let _ = worker.join();
/// # let _ = events.try_recv();
/// # Ok(())
/// # }
/// ```
pub struct LightController<C: DeviceClient> {
    client: C,
    devices: DeviceRegistry<C::Handle>,
    events: EventBus,
    follow_up: WeakTaskSender,
    config: ControllerConfig,
}

impl<C: DeviceClient + fmt::Debug> fmt::Debug for LightController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightController")
            .field("client", &self.client)
            .field("devices", &self.devices.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: DeviceClient> LightController<C> {
    /// Creates a controller.
    ///
    /// `tasks` is only used to queue follow-up discoveries; the controller
    /// does not keep the queue open by itself.
    #[must_use]
    pub fn new(client: C, tasks: &TaskSender, config: ControllerConfig) -> Self {
        Self {
            client,
            devices: DeviceRegistry::new(),
            events: EventBus::with_capacity(config.event_capacity()),
            follow_up: tasks.downgrade(),
            config,
        }
    }

    /// Subscribes to light events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LightEvent> {
        self.events.subscribe()
    }

    /// Returns the event bus, for listeners that subscribe later.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the device list.
    #[must_use]
    pub fn devices(&self) -> &DeviceRegistry<C::Handle> {
        &self.devices
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Processes tasks until the queue closes.
    ///
    /// Every task is acknowledged after it was processed, whether it
    /// succeeded or not. Task failures are logged and never end the loop.
    pub async fn run(mut self, mut tasks: TaskReceiver) {
        info!(devices = self.devices.len(), "Light controller started");

        while let Some(task) = tasks.take().await {
            let kind = task.kind();
            match self.handle(task).await {
                Ok(outcome) => debug!(kind, ?outcome, "Task processed"),
                Err(Error::DiscoveryFailed(e)) => {
                    warn!(error = %e, "Discovery failed, keeping current device list");
                }
                Err(e) => debug!(kind, error = %e, "Task failed"),
            }
            tasks.task_done();
        }

        info!("Task queue closed, light controller stopped");
    }

    /// Runs the controller on a dedicated thread with its own runtime.
    ///
    /// The thread ends once every [`TaskSender`] has been dropped and the
    /// queue is drained.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built or the thread cannot
    /// be spawned.
    pub fn spawn(self, tasks: TaskReceiver) -> std::io::Result<WorkerHandle> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let thread = thread::Builder::new()
            .name(self.config.thread_name().to_string())
            .spawn(move || runtime.block_on(self.run(tasks)))?;

        Ok(WorkerHandle { thread })
    }

    /// Processes a single task to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::DiscoveryFailed`] if a scan could not run; nothing changed.
    /// - [`Error::UnknownSerial`] if the task names a light that is not
    ///   known; a `Destroyed` event was published for it.
    /// - [`Error::DeviceUnreachable`] if a light call failed; the light was
    ///   removed and a discovery queued.
    pub async fn handle(&mut self, task: Task) -> Result<TaskOutcome> {
        match task {
            Task::Discover { timeout } => self.discover(timeout).await,
            Task::Query { serial } => self.query(serial).await,
            Task::Adjust(adjustment) => self.adjust(adjustment).await,
        }
    }

    async fn discover(&mut self, timeout: Duration) -> Result<TaskOutcome> {
        let discovered = self.client.discover(timeout).await?;
        let found = discovered.len();
        let events = self.devices.reconcile(discovered);

        if events.is_empty() {
            debug!(found, "Discovery confirmed the device list");
            return Ok(TaskOutcome::Unchanged);
        }

        let created = events.iter().filter(|e| e.is_created()).count();
        let destroyed = events.len() - created;
        for event in events {
            self.events.publish(event);
        }

        info!(
            created,
            destroyed,
            devices = self.devices.len(),
            "Device list reconciled"
        );
        Ok(TaskOutcome::Reconciled { created, destroyed })
    }

    async fn query(&mut self, serial: Serial) -> Result<TaskOutcome> {
        let Some(entry) = self.devices.get(serial.as_str()) else {
            return Err(self.forget_unknown(serial));
        };

        let read = entry.handle().read_status().await;
        match read {
            Ok(status) => {
                let view = entry.view().with_status(status);
                self.refresh(view);
                Ok(TaskOutcome::Refreshed)
            }
            Err(source) => Err(self.evict(serial, source)),
        }
    }

    async fn adjust(&mut self, adjustment: Adjustment) -> Result<TaskOutcome> {
        let Some(entry) = self.devices.get(adjustment.serial.as_str()) else {
            return Err(self.forget_unknown(adjustment.serial));
        };

        let mut status = entry.view().status();
        let written = write_adjustment(entry.handle(), &adjustment, &mut status).await;
        match written {
            Ok(()) => {
                // The requester already shows these values, so no event.
                let view = entry.view().with_status(status);
                self.devices.replace_view(view);
                debug!(serial = %adjustment.serial, "Light adjusted");
                Ok(TaskOutcome::Adjusted)
            }
            Err(source) => Err(self.evict(adjustment.serial, source)),
        }
    }

    fn refresh(&mut self, view: DeviceView) {
        self.devices.replace_view(view.clone());
        self.events.publish(LightEvent::updated(view));
    }

    /// Drops a light that failed a call and asks for a fresh scan.
    fn evict(&mut self, serial: Serial, source: DeviceError) -> Error {
        warn!(%serial, error = %source, "Light stopped responding, removing it");

        self.events.publish(LightEvent::destroyed(serial.clone()));
        self.devices.remove(serial.as_str());

        if !self
            .follow_up
            .submit(Task::discover(self.config.discovery_timeout()))
        {
            debug!(%serial, "Queue closed, skipping rediscovery");
        }

        Error::DeviceUnreachable { serial, source }
    }

    /// Tells listeners that a light named by a task is already gone.
    fn forget_unknown(&self, serial: Serial) -> Error {
        debug!(%serial, "Task targets an unknown light");
        self.events.publish(LightEvent::destroyed(serial.clone()));
        Error::UnknownSerial(serial)
    }
}

/// Applies the present fields in the order power, brightness, temperature,
/// stopping at the first failure. `status` tracks what was written.
async fn write_adjustment<H: DeviceHandle>(
    handle: &H,
    adjustment: &Adjustment,
    status: &mut DeviceStatus,
) -> std::result::Result<(), DeviceError> {
    if let Some(on) = adjustment.power {
        handle.set_power(on).await?;
        status.power = on;
    }
    if let Some(brightness) = adjustment.brightness {
        handle.set_brightness(brightness).await?;
        status.brightness = brightness;
    }
    if let Some(temperature) = adjustment.temperature {
        handle.set_temperature(temperature).await?;
        status.temperature = temperature;
    }
    Ok(())
}

/// Handle to a controller running on its own thread.
#[derive(Debug)]
pub struct WorkerHandle {
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Returns `true` once the controller loop has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the controller thread to end.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the controller thread panicked.
    pub fn join(self) -> thread::Result<()> {
        self.thread.join()
    }
}
