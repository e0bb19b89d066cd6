//! Production metric queries.

use rusqlite::{params, params_from_iter, OptionalExtension, Row, ToSql};

use super::utils::{id_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{MetricFilter, ProductionMetric},
};

const METRIC_COLUMNS: &str =
    "id, order_id, pizzaiolo_id, prep_seconds, started_at, finished_at, category";

impl super::Database {
    fn build_metric_from_row(row: &Row) -> rusqlite::Result<ProductionMetric> {
        Ok(ProductionMetric {
            id: id_at(row, 0)?,
            order_id: id_at(row, 1)?,
            pizzaiolo_id: row.get(2)?,
            prep_seconds: row.get(3)?,
            started_at: timestamp_at(row, 4)?,
            finished_at: timestamp_at(row, 5)?,
            category: row.get(6)?,
        })
    }

    /// The metric recorded for an order, if it has been marked ready.
    pub fn get_metric_for_order(&self, order_id: u64) -> Result<Option<ProductionMetric>> {
        self.connection
            .query_row(
                &format!("SELECT {METRIC_COLUMNS} FROM production_metrics WHERE order_id = ?1"),
                params![order_id as i64],
                Self::build_metric_from_row,
            )
            .optional()
            .db_context("Failed to get production metric")
    }

    /// Lists metrics matching the filter, oldest first.
    pub fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<ProductionMetric>> {
        let mut query = format!("SELECT {METRIC_COLUMNS} FROM production_metrics");
        let mut conditions: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref pizzaiolo_id) = filter.pizzaiolo_id {
            conditions.push("pizzaiolo_id = ?");
            params_vec.push(Box::new(pizzaiolo_id.clone()));
        }
        if let Some(after) = filter.finished_after {
            conditions.push("finished_at >= ?");
            params_vec.push(Box::new(after.to_string()));
        }
        if let Some(before) = filter.finished_before {
            conditions.push("finished_at < ?");
            params_vec.push(Box::new(before.to_string()));
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY finished_at ASC, id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare metric query")?;

        let metrics = stmt
            .query_map(
                params_from_iter(params_vec.iter().map(|p| p.as_ref())),
                Self::build_metric_from_row,
            )
            .db_context("Failed to query production metrics")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch production metrics")?;

        Ok(metrics)
    }
}
