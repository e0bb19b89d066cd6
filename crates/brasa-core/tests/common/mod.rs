#![allow(dead_code)]

use brasa_core::{
    engine::{SimulatedRouteConfig, SimulatedRouteEstimator},
    models::{LineItem, NewOrder},
    OrderDesk, OrderDeskBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test desk with a seeded route estimator
pub async fn create_test_desk() -> (TempDir, OrderDesk) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let estimator = SimulatedRouteEstimator::with_seed(SimulatedRouteConfig::default(), 42)
        .expect("Default route config is valid");
    let desk = OrderDeskBuilder::new()
        .with_database_path(Some(&db_path))
        .with_estimator(estimator)
        .build()
        .await
        .expect("Failed to create desk");
    (temp_dir, desk)
}

pub fn new_order(customer: &str, items: Vec<LineItem>) -> NewOrder {
    NewOrder {
        customer_name: customer.to_string(),
        customer_phone: "11 98888-7777".to_string(),
        delivery_address: Some("Av. Paulista, 1000".to_string()),
        items,
        total_cents: 3800,
        ..Default::default()
    }
}
