//! Serialized recomputation on change.
//!
//! A single worker thread owns the gearset store, the current inventory and
//! the settings. Producers send messages; the worker takes one, drains
//! everything else already queued, applies it all and runs exactly one pass.
//! Bursts of inventory events therefore cost one solve.
//!
//! # Modules
//!
//! - [`event`] - Change events and notifications
//! - [`snapshot`] - Published results and the read handle

pub mod event;
pub mod snapshot;

pub use event::{ChangeEvent, Notification};
pub use snapshot::{Snapshot, SnapshotReader};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use event::PipelineMessage;

use crate::catalog::ItemCatalog;
use crate::config::Settings;
use crate::error::{GearplanError, Result};
use crate::inventory::InventorySource;
use crate::materia::MateriaCounts;
use crate::model::{CountSelection, GearsetStore};
use crate::overlap::detect_overlaps;
use crate::solver::{AssignmentSolver, Resolution};

/// Handle returned by [`ChangePipeline::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, listener));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    fn notify(&self, notification: &Notification) {
        // Clone out so listeners may subscribe or unsubscribe re-entrantly.
        let listeners: Vec<Listener> =
            self.lock().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener(notification);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Producer handle on the recomputation worker.
pub struct ChangePipeline {
    sender: Sender<PipelineMessage>,
    reader: SnapshotReader,
    listeners: Arc<Listeners>,
    handle: Option<JoinHandle<()>>,
}

impl ChangePipeline {
    /// Run an initial pass and start the worker thread.
    pub fn spawn(
        store: GearsetStore,
        inventory: Arc<dyn InventorySource>,
        catalog: Arc<dyn ItemCatalog>,
        settings: Settings,
    ) -> Result<Self> {
        let mut worker = Worker {
            selection: CountSelection::active(&store),
            store,
            inventory,
            catalog,
            settings,
            snapshot: Snapshot::default(),
        };
        worker.store.set_priority_policy(worker.settings.priority);
        worker.store.take_changes();
        worker.snapshot = worker.full_pass(0);

        let reader = SnapshotReader::new(worker.snapshot.clone());
        let listeners = Arc::new(Listeners::default());
        let (sender, receiver) = mpsc::channel();

        let handle = {
            let reader = reader.clone();
            let listeners = Arc::clone(&listeners);
            thread::Builder::new()
                .name("gearplan-pipeline".to_string())
                .spawn(move || worker.run(receiver, reader, listeners))?
        };

        Ok(Self {
            sender,
            reader,
            listeners,
            handle: Some(handle),
        })
    }

    /// Schedule a recomputation.
    pub fn request(&self, event: ChangeEvent) {
        self.send(PipelineMessage::Request(event));
    }

    /// Replace the inventory and schedule a recomputation.
    pub fn update_inventory(&self, inventory: Arc<dyn InventorySource>) {
        self.send(PipelineMessage::ReplaceInventory(inventory));
    }

    /// Replace the settings. Only priority changes trigger a new solve.
    pub fn update_settings(&self, settings: Settings) {
        self.send(PipelineMessage::ReplaceSettings(Box::new(settings)));
    }

    /// Replace the counted gearset selection.
    pub fn update_selection(&self, selection: CountSelection) {
        self.send(PipelineMessage::ReplaceSelection(selection));
    }

    /// Mutate the store on the worker thread.
    ///
    /// Errors returned by the closure are logged; the changes it recorded
    /// still drive the next pass.
    pub fn edit<F>(&self, edit: F)
    where
        F: FnOnce(&mut GearsetStore) -> Result<()> + Send + 'static,
    {
        self.send(PipelineMessage::Edit(Box::new(edit)));
    }

    /// Block until every message sent before this call has been processed.
    /// Returns the generation of the snapshot that reflects them.
    pub fn flush(&self) -> Result<u64> {
        let (tx, rx) = mpsc::channel();
        self.sender
            .send(PipelineMessage::Flush(tx))
            .map_err(|_| stopped())?;
        rx.recv().map_err(|_| stopped())
    }

    /// Latest published resolution.
    pub fn latest(&self) -> Arc<Resolution> {
        self.reader.latest()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.reader.snapshot()
    }

    /// A read handle that outlives borrow scopes.
    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    /// Register a listener called on the worker thread after each pass.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    /// Stop the worker after it finishes queued work.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn send(&self, message: PipelineMessage) {
        if self.sender.send(message).is_err() {
            tracing::warn!("Change pipeline has stopped; message dropped");
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(PipelineMessage::Shutdown);
            if handle.join().is_err() {
                tracing::error!("Change pipeline worker exited abnormally");
            }
        }
    }
}

impl Drop for ChangePipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

fn stopped() -> GearplanError {
    GearplanError::InternalError {
        message: "change pipeline has stopped".to_string(),
    }
}

/// What a batch of messages asks the next pass to do.
#[derive(Debug, Default)]
struct Batch {
    solve: bool,
    rebuild_counts: bool,
    retune_counts: bool,
    gearsets_changed: bool,
    configuration: Option<bool>,
    flushes: Vec<Sender<u64>>,
    shutdown: bool,
}

impl Batch {
    fn has_work(&self) -> bool {
        self.solve || self.rebuild_counts || self.retune_counts
    }
}

struct Worker {
    store: GearsetStore,
    inventory: Arc<dyn InventorySource>,
    catalog: Arc<dyn ItemCatalog>,
    settings: Settings,
    selection: CountSelection,
    snapshot: Snapshot,
}

impl Worker {
    fn run(
        mut self,
        receiver: Receiver<PipelineMessage>,
        reader: SnapshotReader,
        listeners: Arc<Listeners>,
    ) {
        while let Ok(first) = receiver.recv() {
            let mut batch = Batch::default();
            self.apply(first, &mut batch);
            loop {
                match receiver.try_recv() {
                    Ok(message) => self.apply(message, &mut batch),
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            if batch.has_work() {
                let generation = self.snapshot.generation + 1;
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| self.pass(&batch, generation)));
                match outcome {
                    Ok(snapshot) => {
                        self.snapshot = snapshot;
                        reader.publish(self.snapshot.clone());
                        notify(&listeners, &batch, generation);
                    }
                    Err(_) => {
                        tracing::error!(
                            "Resolution pass {} panicked; keeping previous results",
                            generation
                        );
                    }
                }
            }

            for flush in batch.flushes.drain(..) {
                let _ = flush.send(self.snapshot.generation);
            }
            if batch.shutdown {
                break;
            }
        }
        tracing::debug!("Change pipeline worker stopped");
    }

    fn apply(&mut self, message: PipelineMessage, batch: &mut Batch) {
        match message {
            PipelineMessage::Request(event) => {
                match event {
                    ChangeEvent::Inventory => {}
                    ChangeEvent::Gearsets { .. } => batch.gearsets_changed = true,
                    ChangeEvent::Configuration {
                        effects_assignments,
                    } => mark_configuration(batch, effects_assignments),
                }
                if event.effects_assignments() {
                    batch.solve = true;
                    batch.rebuild_counts = true;
                } else {
                    batch.retune_counts = true;
                }
            }
            PipelineMessage::ReplaceInventory(inventory) => {
                self.inventory = inventory;
                batch.solve = true;
                batch.rebuild_counts = true;
            }
            PipelineMessage::ReplaceSettings(settings) => {
                let effects = self.settings.effects_assignments(&settings);
                self.settings = *settings;
                self.store.set_priority_policy(self.settings.priority);
                self.store.take_changes();
                mark_configuration(batch, effects);
                if effects {
                    batch.solve = true;
                    batch.rebuild_counts = true;
                } else {
                    batch.retune_counts = true;
                }
            }
            PipelineMessage::ReplaceSelection(selection) => {
                self.selection = selection;
                batch.rebuild_counts = true;
            }
            PipelineMessage::Edit(edit) => {
                let store = &mut self.store;
                match panic::catch_unwind(AssertUnwindSafe(|| edit(store))) {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::warn!("Gearset edit failed: {}", e),
                    Err(_) => tracing::error!("Gearset edit panicked"),
                }
                let changes = self.store.take_changes();
                if !changes.is_empty() {
                    batch.gearsets_changed = true;
                    batch.rebuild_counts = true;
                    self.selection.refresh(&self.store);
                }
                if changes.iter().any(|c| c.effects_assignments) {
                    batch.solve = true;
                }
            }
            PipelineMessage::Flush(reply) => batch.flushes.push(reply),
            PipelineMessage::Shutdown => batch.shutdown = true,
        }
    }

    fn pass(&self, batch: &Batch, generation: u64) -> Snapshot {
        if batch.solve {
            return self.full_pass(generation);
        }

        let started = Instant::now();
        let materia = if batch.rebuild_counts {
            self.build_counts()
        } else {
            let mut materia = self.snapshot.materia.clone();
            materia.set_confidence(self.settings.confidence());
            materia.set_policy(self.settings.materia_rounding);
            materia
        };
        let overlaps = if batch.rebuild_counts {
            detect_overlaps(&self.store, &self.selection)
        } else {
            self.snapshot.overlaps.clone()
        };
        tracing::debug!(
            "Pass {} reused previous assignments ({} materia rows) in {:?}",
            generation,
            materia.rows().len(),
            started.elapsed()
        );
        Snapshot {
            generation,
            resolution: Arc::clone(&self.snapshot.resolution),
            materia,
            overlaps,
        }
    }

    fn full_pass(&self, generation: u64) -> Snapshot {
        let started = Instant::now();
        let resolution = AssignmentSolver::new(self.catalog.as_ref())
            .solve(&self.store, self.inventory.as_ref());
        for item in resolution.unknown_items() {
            let err = GearplanError::InternalError {
                message: format!("item {} is not in the catalog", item),
            };
            tracing::warn!("{}", err);
        }
        let materia = self.build_counts();
        let overlaps = detect_overlaps(&self.store, &self.selection);
        tracing::debug!(
            "Pass {} resolved {} items, {} claimed units, {} overlap groups in {:?}",
            generation,
            resolution.requirements().len(),
            resolution.ledger().total_claimed(),
            overlaps.len(),
            started.elapsed()
        );
        Snapshot {
            generation,
            resolution: Arc::new(resolution),
            materia,
            overlaps,
        }
    }

    fn build_counts(&self) -> MateriaCounts {
        MateriaCounts::build(
            &self.store,
            &self.selection,
            self.catalog.as_ref(),
            self.inventory.as_ref(),
            self.settings.confidence(),
            self.settings.materia_rounding,
        )
    }
}

fn mark_configuration(batch: &mut Batch, effects_assignments: bool) {
    let previous = batch.configuration.unwrap_or(false);
    batch.configuration = Some(previous || effects_assignments);
}

fn notify(listeners: &Listeners, batch: &Batch, generation: u64) {
    if batch.gearsets_changed {
        listeners.notify(&Notification::GearsetsChanged);
    }
    if let Some(effects_assignments) = batch.configuration {
        listeners.notify(&Notification::ConfigurationChanged {
            effects_assignments,
        });
    }
    listeners.notify(&Notification::Resolved { generation });
}
