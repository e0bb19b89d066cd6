//! Order inserts, queries and conditional status writes.

use rusqlite::{params, params_from_iter, OptionalExtension, ToSql, TransactionBehavior};

use super::utils::{build_order_from_row, status_at, ORDER_COLUMNS};
use crate::{
    error::{BrasaError, DatabaseResultExt, Result},
    models::{time, NewOrder, Order, OrderFilter, OrderSort, OrderStatus, TransitionWrite},
};

const NEXT_ORDER_NUMBER_SQL: &str = "SELECT COALESCE(MAX(number), 0) + 1 FROM orders";
const INSERT_ORDER_SQL: &str = "INSERT INTO orders (number, customer_name, customer_phone, delivery_address, notes, items, total_cents, payment_method, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const SELECT_ORDER_STATUS_SQL: &str = "SELECT status FROM orders WHERE id = ?1";
const INSERT_METRIC_SQL: &str = "INSERT INTO production_metrics (order_id, pizzaiolo_id, prep_seconds, started_at, finished_at, category) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

// Set-only columns: COALESCE keeps whatever an earlier transition wrote.
const UPDATE_ORDER_TRANSITION_SQL: &str = "UPDATE orders SET \
    status = ?1, \
    updated_at = ?2, \
    pizzaiolo_id = COALESCE(?3, pizzaiolo_id), \
    entregador_id = COALESCE(?4, entregador_id), \
    preparation_started_at = COALESCE(?5, preparation_started_at), \
    ready_at = COALESCE(?6, ready_at), \
    route_started_at = COALESCE(?7, route_started_at), \
    route_ended_at = COALESCE(?8, route_ended_at), \
    distance_km = COALESCE(?9, distance_km), \
    estimated_minutes = COALESCE(?10, estimated_minutes), \
    driver_latitude = COALESCE(?11, driver_latitude), \
    driver_longitude = COALESCE(?12, driver_longitude) \
    WHERE id = ?13 AND status = ?14";

impl super::Database {
    /// Inserts a new pending order with the next display number.
    pub fn insert_order(&mut self, order: &NewOrder) -> Result<Order> {
        if order.customer_name.trim().is_empty() {
            return Err(BrasaError::invalid_input("customer_name").with_reason("cannot be empty"));
        }
        if order.items.is_empty() {
            return Err(
                BrasaError::invalid_input("items").with_reason("an order needs at least one item")
            );
        }
        if order.total_cents < 0 {
            return Err(BrasaError::invalid_input("total").with_reason("cannot be negative"));
        }

        let items_json = serde_json::to_string(&order.items)?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let number: i64 = tx
            .query_row(NEXT_ORDER_NUMBER_SQL, [], |row| row.get(0))
            .db_context("Failed to allocate order number")?;

        let now_str = time::now().to_string();

        tx.execute(
            INSERT_ORDER_SQL,
            params![
                number,
                &order.customer_name,
                &order.customer_phone,
                order.delivery_address.as_deref(),
                order.notes.as_deref(),
                &items_json,
                order.total_cents,
                order.payment_method.as_deref(),
                OrderStatus::Pending.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert order")?;

        let id = tx.last_insert_rowid();
        let inserted = tx
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                build_order_from_row,
            )
            .db_context("Failed to read inserted order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(inserted)
    }

    /// Retrieves a single order by its ID.
    pub fn get_order(&self, id: u64) -> Result<Option<Order>> {
        self.connection
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![id as i64],
                build_order_from_row,
            )
            .optional()
            .db_context("Failed to get order")
    }

    /// Lists orders matching the filter.
    pub fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut query = format!("SELECT {ORDER_COLUMNS} FROM orders");

        let mut conditions: Vec<String> = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if !filter.statuses.is_empty() {
            let placeholders = vec!["?"; filter.statuses.len()].join(", ");
            conditions.push(format!("status IN ({placeholders})"));
            for status in &filter.statuses {
                params_vec.push(Box::new(status.as_str()));
            }
        }

        if let Some(ref pizzaiolo_id) = filter.pizzaiolo_id {
            conditions.push("pizzaiolo_id = ?".to_string());
            params_vec.push(Box::new(pizzaiolo_id.clone()));
        }

        if let Some(ref entregador_id) = filter.entregador_id {
            conditions.push("entregador_id = ?".to_string());
            params_vec.push(Box::new(entregador_id.clone()));
        }

        if let Some(after) = filter.created_after {
            conditions.push("created_at >= ?".to_string());
            params_vec.push(Box::new(after.to_string()));
        }

        if let Some(before) = filter.created_before {
            conditions.push("created_at < ?".to_string());
            params_vec.push(Box::new(before.to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(match filter.order_by {
            OrderSort::CreatedAsc => " ORDER BY created_at ASC, id ASC",
            OrderSort::CreatedDesc => " ORDER BY created_at DESC, id DESC",
            OrderSort::RouteEndedDesc => " ORDER BY route_ended_at DESC, id DESC",
        });

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params_vec.push(Box::new(i64::from(limit)));
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare order query")?;

        let orders = stmt
            .query_map(
                params_from_iter(params_vec.iter().map(|p| p.as_ref())),
                build_order_from_row,
            )
            .db_context("Failed to query orders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch orders")?;

        Ok(orders)
    }

    /// Applies a transition only if the order still has the expected status.
    ///
    /// The status write and the production metric land in one transaction.
    /// When the row has moved on, the transaction is rolled back and
    /// [`BrasaError::StaleState`] reports what the row holds now.
    pub fn apply_transition(&mut self, write: &TransitionWrite) -> Result<Order> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let patch = &write.patch;
        let route = patch.route.as_ref();
        let updated = tx
            .execute(
                UPDATE_ORDER_TRANSITION_SQL,
                params![
                    write.to.as_str(),
                    write.at.to_string(),
                    patch.pizzaiolo_id.as_deref(),
                    patch.entregador_id.as_deref(),
                    patch.preparation_started_at.map(|t| t.to_string()),
                    patch.ready_at.map(|t| t.to_string()),
                    patch.route_started_at.map(|t| t.to_string()),
                    patch.route_ended_at.map(|t| t.to_string()),
                    route.map(|r| r.distance_km),
                    route.map(|r| r.estimated_minutes),
                    route.map(|r| r.driver_position.latitude),
                    route.map(|r| r.driver_position.longitude),
                    write.order_id as i64,
                    write.from.as_str()
                ],
            )
            .db_context("Failed to update order status")?;

        if updated == 0 {
            let current = tx
                .query_row(
                    SELECT_ORDER_STATUS_SQL,
                    params![write.order_id as i64],
                    |row| status_at(row, 0),
                )
                .optional()
                .db_context("Failed to re-read order status")?;

            return Err(match current {
                None => BrasaError::OrderNotFound { id: write.order_id },
                Some(actual) => BrasaError::StaleState {
                    order_id: write.order_id,
                    expected: write.from,
                    actual,
                },
            });
        }

        if let Some(ref metric) = write.metric {
            tx.execute(
                INSERT_METRIC_SQL,
                params![
                    metric.order_id as i64,
                    &metric.pizzaiolo_id,
                    metric.prep_seconds,
                    metric.started_at.to_string(),
                    metric.finished_at.to_string(),
                    metric.category.as_deref()
                ],
            )
            .db_context("Failed to record production metric")?;
        }

        let order = tx
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![write.order_id as i64],
                build_order_from_row,
            )
            .db_context("Failed to read updated order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }
}
