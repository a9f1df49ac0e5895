//! Cross-process "which items matter" service.
//!
//! Other tools ask for the item ids required by the active gearsets and get
//! pushed a fresh list whenever the gearsets change. The transport lives
//! behind [`IpcProvider`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::catalog::ItemId;
use crate::pipeline::{ChangePipeline, Notification, SnapshotReader, SubscriptionId};

/// Outbound messages of the item service.
pub trait IpcProvider: Send + Sync {
    /// Service became ready (`true`) or is going away (`false`).
    fn initialized(&self, ready: bool);

    /// The required item list changed.
    fn bis_items_changed(&self, items: &[ItemId]);
}

/// Answers item queries from the latest pipeline snapshot.
pub struct BisItemsService {
    reader: SnapshotReader,
    provider: Arc<dyn IpcProvider>,
    running: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
}

impl BisItemsService {
    /// Register with the pipeline and announce readiness.
    pub fn start(pipeline: &ChangePipeline, provider: Arc<dyn IpcProvider>) -> Self {
        let reader = pipeline.reader();
        let running = Arc::new(AtomicBool::new(true));

        let subscription = {
            let reader = reader.clone();
            let provider = Arc::clone(&provider);
            let running = Arc::clone(&running);
            pipeline.subscribe(move |notification| {
                if *notification == Notification::GearsetsChanged
                    && running.load(Ordering::SeqCst)
                {
                    provider.bis_items_changed(&bis_items(&reader));
                }
            })
        };

        provider.initialized(true);
        tracing::debug!("Item service started");
        Self {
            reader,
            provider,
            running,
            subscription: Some(subscription),
        }
    }

    /// Whether the service is answering queries.
    pub fn is_initialized(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Item ids required by the active gearsets, in resolution order.
    pub fn get_bis_items(&self) -> Vec<ItemId> {
        bis_items(&self.reader)
    }

    /// Unregister and announce shutdown.
    pub fn stop(mut self, pipeline: &ChangePipeline) {
        if let Some(id) = self.subscription.take() {
            pipeline.unsubscribe(id);
        }
        self.running.store(false, Ordering::SeqCst);
        self.provider.initialized(false);
        tracing::debug!("Item service stopped");
    }
}

fn bis_items(reader: &SnapshotReader) -> Vec<ItemId> {
    reader.latest().requirements().keys().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemInfo, StaticCatalog};
    use crate::config::Settings;
    use crate::inventory::InventorySnapshot;
    use crate::model::{Gearpiece, GearpieceSlot, Gearset, GearsetStore};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        initialized: Mutex<Vec<bool>>,
        changes: Mutex<Vec<Vec<ItemId>>>,
    }

    impl IpcProvider for Recorder {
        fn initialized(&self, ready: bool) {
            self.initialized.lock().unwrap().push(ready);
        }

        fn bis_items_changed(&self, items: &[ItemId]) {
            self.changes.lock().unwrap().push(items.to_vec());
        }
    }

    fn pipeline() -> ChangePipeline {
        let store = GearsetStore::from_gearsets(vec![Gearset::new(
            "A",
            vec![Gearpiece::new(GearpieceSlot::Head, 10)],
        )])
        .unwrap();
        let catalog = StaticCatalog::from_items([ItemInfo::new(10, "Head"), ItemInfo::new(20, "Body")]);
        ChangePipeline::spawn(
            store,
            Arc::new(InventorySnapshot::new()),
            Arc::new(catalog),
            Settings::default(),
        )
        .unwrap()
    }

    #[test]
    fn serves_items_and_pushes_changes() {
        let pipeline = pipeline();
        let recorder = Arc::new(Recorder::default());
        let service = BisItemsService::start(&pipeline, recorder.clone());

        assert!(service.is_initialized());
        assert_eq!(service.get_bis_items(), vec![ItemId::new(10)]);

        pipeline.edit(|store| {
            store.add_gearset(Gearset::new(
                "B",
                vec![Gearpiece::new(GearpieceSlot::Body, 20)],
            ))?;
            Ok(())
        });
        pipeline.flush().unwrap();

        let changes = recorder.changes.lock().unwrap().clone();
        assert_eq!(changes, vec![vec![ItemId::new(10), ItemId::new(20)]]);

        service.stop(&pipeline);
        assert_eq!(*recorder.initialized.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn stopped_service_pushes_nothing() {
        let pipeline = pipeline();
        let recorder = Arc::new(Recorder::default());
        let service = BisItemsService::start(&pipeline, recorder.clone());
        service.stop(&pipeline);

        pipeline.edit(|store| {
            store.add_gearset(Gearset::new(
                "B",
                vec![Gearpiece::new(GearpieceSlot::Body, 20)],
            ))?;
            Ok(())
        });
        pipeline.flush().unwrap();
        assert!(recorder.changes.lock().unwrap().is_empty());
    }
}
