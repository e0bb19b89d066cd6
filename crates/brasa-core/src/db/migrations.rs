//! Database schema initialization and migrations.

use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::OrderStatus,
};

const SELECT_DISTINCT_STATUSES_SQL: &str = "SELECT DISTINCT status FROM orders";
const UPDATE_STATUS_LABEL_SQL: &str = "UPDATE orders SET status = ?1 WHERE status = ?2";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.normalize_status_labels()?;

        Ok(())
    }

    /// Rewrites status labels left by older dashboards ("Pendente",
    /// "em preparo", ...) to their canonical form. Unknown labels are left
    /// alone and surface as conversion errors when read.
    fn normalize_status_labels(&self) -> Result<()> {
        let labels: Vec<String> = {
            let mut stmt = self
                .connection
                .prepare(SELECT_DISTINCT_STATUSES_SQL)
                .db_context("Failed to prepare status scan")?;
            let rows = stmt
                .query_map([], |row| row.get(0))
                .db_context("Failed to scan order statuses")?;
            rows.collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to read order statuses")?
        };

        for label in labels {
            let Ok(status) = label.parse::<OrderStatus>() else {
                continue;
            };
            if status.as_str() != label {
                self.connection
                    .execute(UPDATE_STATUS_LABEL_SQL, params![status.as_str(), &label])
                    .db_context("Failed to normalize order status")?;
            }
        }

        Ok(())
    }
}
