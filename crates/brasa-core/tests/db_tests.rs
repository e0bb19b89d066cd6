use std::path::PathBuf;

use brasa_core::{
    models::{LineItem, NewOrder, OrderStatus, ShiftFilter},
    Database,
};
use jiff::{SignedDuration, Timestamp};
use tempfile::TempDir;

/// Helper function to create a temporary directory and database path
fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_orders.db");
    (temp_dir, db_path)
}

fn sample_order() -> NewOrder {
    NewOrder {
        customer_name: "Bruna".to_string(),
        customer_phone: "11 98888-7777".to_string(),
        items: vec![LineItem::new(1, "Margherita").with_size("large")],
        total_cents: 5990,
        payment_method: Some("pix".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_legacy_status_labels_are_normalized_on_open() {
    let (_temp_dir, db_path) = create_test_environment();

    let mut db = Database::new(&db_path).expect("Failed to create database");
    let order = db.insert_order(&sample_order()).unwrap();
    drop(db);

    let raw = rusqlite::Connection::open(&db_path).unwrap();
    raw.execute(
        "UPDATE orders SET status = 'Em rota de entrega' WHERE id = ?1",
        [order.id as i64],
    )
    .unwrap();

    // Row parsing already tolerates the legacy label.
    let db = Database::open(&db_path).unwrap();
    let stored = db.get_order(order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::OutForDelivery);
    drop(db);

    // Opening with schema setup rewrites it.
    let _db = Database::new(&db_path).unwrap();
    let status: String = raw
        .query_row("SELECT status FROM orders WHERE id = ?1", [order.id as i64], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(status, "out_for_delivery");
}

#[test]
fn test_legacy_item_json_is_readable() {
    let (_temp_dir, db_path) = create_test_environment();

    let mut db = Database::new(&db_path).unwrap();
    let order = db.insert_order(&sample_order()).unwrap();

    let raw = rusqlite::Connection::open(&db_path).unwrap();
    raw.execute(
        "UPDATE orders SET items = ?1 WHERE id = ?2",
        rusqlite::params![
            r#"[{"nome": "Pizza de Chocolate", "quantidade": 2, "tamanho": "broto"}]"#,
            order.id as i64
        ],
    )
    .unwrap();

    let stored = db.get_order(order.id).unwrap().unwrap();
    assert_eq!(
        stored.items,
        vec![LineItem::new(2, "Pizza de Chocolate").with_size("broto")]
    );
}

#[test]
fn test_open_shift_from_previous_day_is_closed() {
    let (_temp_dir, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();

    let now: Timestamp = "2024-06-02T18:00:00Z".parse().unwrap();
    let yesterday = now - SignedDuration::from_hours(24);

    let old = db.ensure_open_shift("a", yesterday).unwrap();
    assert!(old.opened);

    let fresh = db.ensure_open_shift("a", now).unwrap();
    assert!(fresh.opened);
    assert_ne!(fresh.shift.id, old.shift.id);
    assert_eq!(fresh.shift.shift_date.to_string(), "2024-06-02");

    let shifts = db
        .list_shifts(&ShiftFilter {
            user_id: Some("a".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].id, fresh.shift.id);
    assert_eq!(shifts[1].exited_at, Some(now));

    let open = db
        .list_shifts(&ShiftFilter {
            open_only: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(open.len(), 1);
}

#[test]
fn test_ensure_open_shift_rejects_empty_user() {
    let (_temp_dir, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    assert!(db.ensure_open_shift("  ", Timestamp::now()).is_err());
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let (_temp_dir, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_order(&sample_order()).unwrap();
    drop(db);

    let db = Database::new(&db_path).unwrap();
    let orders = db.list_orders(&Default::default()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].number, 1);
}
