//! Builder for creating and configuring OrderDesk instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use super::OrderDesk;
use crate::{
    engine::{CategoryPolicy, KeywordCategoryPolicy, RouteEstimator, SimulatedRouteEstimator},
    error::{BrasaError, Result},
    store::{OrderStore, SqliteStore},
};

/// Builder for creating and configuring OrderDesk instances.
#[derive(Clone)]
pub struct OrderDeskBuilder {
    database_path: Option<PathBuf>,
    estimator: Option<Arc<dyn RouteEstimator>>,
    category_policy: Option<Arc<dyn CategoryPolicy>>,
    change_poll_interval: Option<Duration>,
}

impl OrderDeskBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            estimator: None,
            category_policy: None,
            change_poll_interval: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/brasa/brasa.db` or `~/.local/share/brasa/brasa.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the simulated route estimator.
    pub fn with_estimator(mut self, estimator: impl RouteEstimator + 'static) -> Self {
        self.estimator = Some(Arc::new(estimator));
        self
    }

    /// Replaces the keyword category heuristic.
    pub fn with_category_policy(mut self, policy: impl CategoryPolicy + 'static) -> Self {
        self.category_policy = Some(Arc::new(policy));
        self
    }

    /// Watches the database file for writes from other processes.
    ///
    /// Without this, subscribers only see changes made through this desk.
    pub fn with_change_poll_interval(mut self, interval: Duration) -> Self {
        self.change_poll_interval = Some(interval);
        self
    }

    /// Builds a desk over the SQLite store.
    ///
    /// # Errors
    ///
    /// Returns `BrasaError::FileSystem` if the database directory cannot be
    /// created, `BrasaError::XdgDirectory` if no default location is
    /// available and `BrasaError::BackendUnavailable` if schema setup fails.
    pub async fn build(self) -> Result<OrderDesk<SqliteStore>> {
        let db_path = if let Some(ref path) = self.database_path {
            path.clone()
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BrasaError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut store = SqliteStore::open(db_path).await?;
        if let Some(interval) = self.change_poll_interval {
            store = store.watch_external_changes(interval)?;
        }

        Ok(self.build_with_store(store))
    }

    /// Builds a desk over any store. The database path and poll interval are
    /// ignored.
    pub fn build_with_store<S: OrderStore>(self, store: S) -> OrderDesk<S> {
        let estimator = self
            .estimator
            .unwrap_or_else(|| Arc::new(SimulatedRouteEstimator::default()));
        let category_policy = self
            .category_policy
            .unwrap_or_else(|| Arc::new(KeywordCategoryPolicy::default()));
        OrderDesk::new(Arc::new(store), estimator, category_policy)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("brasa")
            .place_data_file("brasa.db")
            .map_err(|e| BrasaError::XdgDirectory(e.to_string()))
    }
}

impl Default for OrderDeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
