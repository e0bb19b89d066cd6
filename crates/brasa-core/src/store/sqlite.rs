//! [`OrderStore`] over a SQLite file.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use log::{debug, warn};
use tokio::{sync::broadcast, task, task::JoinHandle};

use super::{ChangeEvent, ChangeKind, OrderStore, Table, CHANGE_CHANNEL_CAPACITY};
use crate::{
    db::Database,
    error::{BrasaError, Result},
    models::{
        MetricFilter, NewOrder, Order, OrderFilter, ProductionMetric, ShiftClaim, ShiftFilter,
        TimeTrack, TransitionWrite,
    },
};

/// SQLite-backed store.
///
/// Each operation opens its own connection on a blocking thread, so the store
/// is cheap to share and never holds a connection across awaits. Writes made
/// through this store are published to subscribers directly; writes from other
/// processes are only seen when [`SqliteStore::watch_external_changes`] is on.
pub struct SqliteStore {
    db_path: PathBuf,
    events: broadcast::Sender<ChangeEvent>,
    watcher: Option<JoinHandle<()>>,
}

impl SqliteStore {
    /// Opens the database at `path`, creating or upgrading the schema.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = path.into();

        let init_path = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&init_path)?;
            Ok::<(), BrasaError>(())
        })
        .await
        .map_err(BrasaError::join)??;

        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            db_path,
            events,
            watcher: None,
        })
    }

    /// Polls the file for commits made by other connections and publishes
    /// [`ChangeEvent::external`] when one is seen.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn watch_external_changes(mut self, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(BrasaError::invalid_input("poll_interval").with_reason("must be positive"));
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            BrasaError::Configuration {
                message: format!("Change polling needs a tokio runtime: {e}"),
            }
        })?;

        if let Some(previous) = self.watcher.take() {
            previous.abort();
        }
        let db_path = self.db_path.clone();
        let events = self.events.clone();
        self.watcher = Some(runtime.spawn(watch_data_version(db_path, events, interval)));
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on a blocking thread.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::open(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(BrasaError::join)?
    }

    fn publish(&self, event: ChangeEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

async fn watch_data_version(
    db_path: PathBuf,
    events: broadcast::Sender<ChangeEvent>,
    interval: Duration,
) {
    let mut db = match task::spawn_blocking({
        let db_path = db_path.clone();
        move || Database::open(&db_path)
    })
    .await
    {
        Ok(Ok(db)) => db,
        Ok(Err(e)) => {
            warn!("Change watcher could not open {}: {e}", db_path.display());
            return;
        }
        Err(e) => {
            warn!("Change watcher failed to start: {e}");
            return;
        }
    };

    let mut last_version: Option<i64> = None;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let (returned, version) = match task::spawn_blocking(move || {
            let version = db.data_version();
            (db, version)
        })
        .await
        {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Change watcher stopped: {e}");
                return;
            }
        };
        db = returned;

        match version {
            Ok(version) => {
                if last_version.is_some_and(|last| last != version) {
                    debug!("Database {} changed externally", db_path.display());
                    if events.send(ChangeEvent::external()).is_err() {
                        debug!("No change subscribers left");
                    }
                }
                last_version = Some(version);
            }
            Err(e) => warn!("Failed to poll data version: {e}"),
        }
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        let inserted = self.with_db(move |db| db.insert_order(&order)).await?;
        self.publish(ChangeEvent::order_inserted(&inserted));
        Ok(inserted)
    }

    async fn get_order(&self, id: u64) -> Result<Option<Order>> {
        self.with_db(move |db| db.get_order(id)).await
    }

    async fn query_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let filter = filter.clone();
        self.with_db(move |db| db.list_orders(&filter)).await
    }

    async fn apply_transition(&self, write: TransitionWrite) -> Result<Order> {
        let records_metric = write.metric.is_some();
        let order = self.with_db(move |db| db.apply_transition(&write)).await?;

        self.publish(ChangeEvent::order_updated(&order));
        if records_metric {
            // Metric rows are keyed by their order.
            self.publish(ChangeEvent::row(
                Table::ProductionMetrics,
                ChangeKind::Insert,
                order.id,
            ));
        }
        Ok(order)
    }

    async fn find_open_shift(&self, user_id: &str) -> Result<Option<TimeTrack>> {
        let user_id = user_id.to_string();
        self.with_db(move |db| db.find_open_shift(&user_id)).await
    }

    async fn ensure_open_shift(&self, user_id: &str, now: Timestamp) -> Result<ShiftClaim> {
        let user_id = user_id.to_string();
        let claim = self
            .with_db(move |db| db.ensure_open_shift(&user_id, now))
            .await?;
        if claim.opened {
            self.publish(ChangeEvent::row(
                Table::TimeTracks,
                ChangeKind::Insert,
                claim.shift.id,
            ));
        }
        Ok(claim)
    }

    async fn close_shift(&self, user_id: &str, now: Timestamp) -> Result<TimeTrack> {
        let user_id = user_id.to_string();
        let shift = self.with_db(move |db| db.close_shift(&user_id, now)).await?;
        self.publish(ChangeEvent::row(Table::TimeTracks, ChangeKind::Update, shift.id));
        Ok(shift)
    }

    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<TimeTrack>> {
        let filter = filter.clone();
        self.with_db(move |db| db.list_shifts(&filter)).await
    }

    async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<ProductionMetric>> {
        let filter = filter.clone();
        self.with_db(move |db| db.list_metrics(&filter)).await
    }

    async fn get_metric(&self, order_id: u64) -> Result<Option<ProductionMetric>> {
        self.with_db(move |db| db.get_metric_for_order(order_id)).await
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}
