//! Tests for markdown rendering.

use jiff::Timestamp;

use super::*;
use crate::{
    desk::TransitionOutcome,
    engine::plan_transition,
    models::{
        stats::rank, Actor, DeliveryHistory, LineItem, NewProductionMetric, Order,
        OrderStatus, OrdersOverview, PerformanceRanking, ProductionStats,
    },
};

fn sample_order(status: OrderStatus) -> Order {
    let now: Timestamp = "2024-06-01T19:00:00Z".parse().unwrap();
    Order {
        id: 42,
        number: 42,
        customer_name: "Bruna".to_string(),
        customer_phone: "11 98888-7777".to_string(),
        delivery_address: Some("Av. Paulista, 1000".to_string()),
        notes: Some("Sem cebola".to_string()),
        items: vec![LineItem::new(2, "Brigadeiro").with_size("large")],
        total_cents: 5990,
        payment_method: Some("pix".to_string()),
        status,
        pizzaiolo_id: None,
        entregador_id: None,
        preparation_started_at: None,
        ready_at: None,
        route_started_at: None,
        route_ended_at: None,
        distance_km: None,
        estimated_minutes: None,
        driver_position: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_order_display() {
    let output = sample_order(OrderStatus::Pending).to_string();
    assert!(output.starts_with("### #42 Bruna (Pending)"));
    assert!(output.contains("- Total: 59.90"));
    assert!(output.contains("- 2x Brigadeiro (large)"));
    assert!(output.contains("> Sem cebola"));
    assert!(!output.contains("Pizzaiolo"));
}

#[test]
fn test_empty_orders() {
    assert_eq!(Orders(vec![]).to_string(), "No orders found.\n");
    assert_eq!(Shifts(vec![]).to_string(), "No shifts found.\n");
}

#[test]
fn test_transition_outcome_display() {
    let started: Timestamp = "2024-06-01T19:00:00Z".parse().unwrap();
    let finished: Timestamp = "2024-06-01T19:12:34Z".parse().unwrap();
    let mut before = sample_order(OrderStatus::Preparing);
    before.preparation_started_at = Some(started);

    let plan = plan_transition(&before, OrderStatus::Ready, &Actor::kitchen("ana"), finished)
        .expect("preparing -> ready is legal");
    let mut after = before.clone();
    after.status = OrderStatus::Ready;
    after.ready_at = Some(finished);

    let outcome = TransitionOutcome {
        order: after,
        plan,
        metric: Some(NewProductionMetric {
            order_id: 42,
            pizzaiolo_id: "ana".to_string(),
            prep_seconds: 754,
            started_at: started,
            finished_at: finished,
            category: Some("dessert".to_string()),
        }),
        opened_shift: None,
    };

    let output = outcome.to_string();
    assert!(output.starts_with("Order #42 moved from Preparing to Ready"));
    assert!(output.contains("- Preparation time: 12m 34s [dessert]"));
    assert!(!output.contains("Clocked in"));
}

#[test]
fn test_production_stats_without_metrics() {
    let stats = ProductionStats {
        user_id: "ana".to_string(),
        claimed: 3,
        completed: 1,
        avg_prep_seconds: None,
    };
    let output = stats.to_string();
    assert!(output.contains("- **Claimed today**: 3"));
    assert!(output.contains("- **Average preparation**: n/a"));
}

#[test]
fn test_delivery_history_display() {
    let mut order = sample_order(OrderStatus::Delivered);
    order.route_started_at = Some("2024-06-01T19:30:00Z".parse().unwrap());
    order.route_ended_at = Some("2024-06-01T19:54:00Z".parse().unwrap());
    order.distance_km = Some(6.0);

    let history = DeliveryHistory::new("bia".to_string(), vec![order]);
    let output = history.to_string();
    assert!(output.contains("- **Average route**: 24.0 min"));
    assert!(output.contains("- **Average distance**: 6.0 km"));
    assert!(output.contains("- #42 Bruna"));

    let empty = DeliveryHistory::new("bia".to_string(), vec![]);
    assert!(empty.to_string().contains("No deliveries found."));
}

#[test]
fn test_ranking_display() {
    let ranking = PerformanceRanking {
        since: "2024-05-02T19:00:00Z".parse().unwrap(),
        pizzaiolos: rank([("ana".to_string(), 600), ("ana".to_string(), 840)]),
        drivers: vec![],
    };
    let output = ranking.to_string();
    assert!(output.contains("1. **ana**: 2 orders, 12m 00s average, rating 8.0"));
    assert!(output.contains("### Delivery\n\nNo orders in this window."));
}

#[test]
fn test_overview_display() {
    let orders = vec![
        sample_order(OrderStatus::Pending),
        sample_order(OrderStatus::Pending),
        sample_order(OrderStatus::Ready),
    ];
    let overview = OrdersOverview::from_orders("2024-06-01".parse().unwrap(), &orders);
    let output = overview.to_string();
    assert!(output.starts_with("## Orders on 2024-06-01\n"));
    assert!(output.contains("- **Total**: 3"));
    assert!(output.contains(&format!("- **{}**: 2", OrderStatus::Pending.label())));
    assert!(output.contains(&format!("- **{}**: 0", OrderStatus::Delivered.label())));
}
