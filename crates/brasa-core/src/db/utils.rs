//! Row conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

use crate::models::{Coordinates, LineItem, Order, OrderStatus};

pub(crate) const ORDER_COLUMNS: &str = "id, number, customer_name, customer_phone, delivery_address, notes, items, total_cents, payment_method, status, pizzaiolo_id, entregador_id, preparation_started_at, ready_at, route_started_at, route_ended_at, distance_km, estimated_minutes, driver_latitude, driver_longitude, created_at, updated_at";

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(idx, format!("Invalid value '{raw}': {e}")))
}

fn parse_optional_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        raw.parse::<T>()
            .map_err(|e| conversion_error(idx, format!("Invalid value '{raw}': {e}")))
    })
    .transpose()
}

pub(crate) fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    parse_column(row, idx)
}

pub(crate) fn optional_timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    parse_optional_column(row, idx)
}

pub(crate) fn date_at(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    parse_column(row, idx)
}

pub(crate) fn status_at(row: &Row, idx: usize) -> rusqlite::Result<OrderStatus> {
    parse_column(row, idx)
}

pub(crate) fn id_at(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Builds an [`Order`] from a row selected with [`ORDER_COLUMNS`].
pub(crate) fn build_order_from_row(row: &Row) -> rusqlite::Result<Order> {
    let items_json: String = row.get(6)?;
    let items: Vec<LineItem> = serde_json::from_str(&items_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    let latitude: Option<f64> = row.get(18)?;
    let longitude: Option<f64> = row.get(19)?;
    let driver_position = latitude
        .zip(longitude)
        .map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        });

    Ok(Order {
        id: id_at(row, 0)?,
        number: row.get::<_, i64>(1)? as u32,
        customer_name: row.get(2)?,
        customer_phone: row.get(3)?,
        delivery_address: row.get(4)?,
        notes: row.get(5)?,
        items,
        total_cents: row.get(7)?,
        payment_method: row.get(8)?,
        status: status_at(row, 9)?,
        pizzaiolo_id: row.get(10)?,
        entregador_id: row.get(11)?,
        preparation_started_at: optional_timestamp_at(row, 12)?,
        ready_at: optional_timestamp_at(row, 13)?,
        route_started_at: optional_timestamp_at(row, 14)?,
        route_ended_at: optional_timestamp_at(row, 15)?,
        distance_km: row.get(16)?,
        estimated_minutes: row.get(17)?,
        driver_position,
        created_at: timestamp_at(row, 20)?,
        updated_at: timestamp_at(row, 21)?,
    })
}
