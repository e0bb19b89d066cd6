mod common;

use brasa_core::{
    models::{time, Actor, LineItem, OrderStatus},
    BrasaError,
};
use common::{create_test_desk, new_order};
use jiff::ToSpan;

#[tokio::test]
async fn test_production_and_delivery_stats() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let driver = Actor::driver("b");
    let today = time::utc_date(time::now());

    let first = desk
        .create_order(new_order("Ana", vec![LineItem::new(1, "Margherita")]))
        .await
        .unwrap();
    let second = desk
        .create_order(new_order("Caio", vec![LineItem::new(1, "Calabresa")]))
        .await
        .unwrap();
    desk.create_order(new_order("Dani", vec![LineItem::new(1, "Portuguesa")]))
        .await
        .unwrap();

    desk.start_preparing(first.id, &kitchen).await.unwrap();
    desk.mark_ready(first.id, &kitchen).await.unwrap();
    desk.start_preparing(second.id, &kitchen).await.unwrap();
    desk.start_route(first.id, &driver).await.unwrap();
    desk.confirm_delivery(first.id, &driver).await.unwrap();

    let production = desk.production_stats("a", today).await.unwrap();
    assert_eq!(production.claimed, 2);
    assert_eq!(production.completed, 1);
    assert!(production.avg_prep_seconds.is_some_and(|s| s >= 0.0));

    let kitchen_avg = desk.average_prep_seconds(today).await.unwrap();
    assert_eq!(kitchen_avg, production.avg_prep_seconds);

    let deliveries = desk.delivery_stats("b", today).await.unwrap();
    assert_eq!(deliveries.assigned, 1);
    assert_eq!(deliveries.delivered, 1);

    let history = desk.delivery_history("b", None).await.unwrap();
    assert_eq!(history.deliveries.len(), 1);
    assert!(history.avg_route_minutes.is_some());
    assert!(history
        .avg_distance_km
        .is_some_and(|km| (2.0..=10.0).contains(&km)));
}

#[tokio::test]
async fn test_stats_for_another_day_are_empty() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let order = desk
        .create_order(new_order("Ana", vec![LineItem::new(1, "Margherita")]))
        .await
        .unwrap();
    desk.start_preparing(order.id, &kitchen).await.unwrap();
    desk.mark_ready(order.id, &kitchen).await.unwrap();

    let yesterday = time::utc_date(time::now())
        .checked_sub(1.day())
        .expect("valid date");
    let production = desk.production_stats("a", yesterday).await.unwrap();
    assert_eq!(production.claimed, 0);
    assert_eq!(production.completed, 0);
    assert_eq!(production.avg_prep_seconds, None);
    assert_eq!(desk.average_prep_seconds(yesterday).await.unwrap(), None);
}

#[tokio::test]
async fn test_stats_for_unknown_user() {
    let (_temp_dir, desk) = create_test_desk().await;
    let today = time::utc_date(time::now());

    let deliveries = desk.delivery_stats("nobody", today).await.unwrap();
    assert_eq!(deliveries.assigned, 0);
    assert_eq!(deliveries.delivered, 0);

    let history = desk.delivery_history("nobody", Some(10)).await.unwrap();
    assert!(history.deliveries.is_empty());
    assert_eq!(history.avg_route_minutes, None);
}

#[tokio::test]
async fn test_performance_ranking() {
    let (_temp_dir, desk) = create_test_desk().await;
    let driver = Actor::driver("b");

    let mut ids = Vec::new();
    for customer in ["Ana", "Caio", "Dani"] {
        let order = desk
            .create_order(new_order(customer, vec![LineItem::new(1, "Margherita")]))
            .await
            .unwrap();
        ids.push(order.id);
    }
    for (id, cook) in ids.iter().zip(["a", "a", "c"]) {
        let kitchen = Actor::kitchen(cook);
        desk.start_preparing(*id, &kitchen).await.unwrap();
        desk.mark_ready(*id, &kitchen).await.unwrap();
    }
    desk.start_route(ids[0], &driver).await.unwrap();
    desk.confirm_delivery(ids[0], &driver).await.unwrap();
    // On the road, not yet counted
    desk.start_route(ids[1], &driver).await.unwrap();

    let ranking = desk.performance_ranking(30).await.unwrap();
    let cooks: Vec<(&str, usize)> = ranking
        .pizzaiolos
        .iter()
        .map(|p| (p.user_id.as_str(), p.orders))
        .collect();
    assert_eq!(cooks, vec![("a", 2), ("c", 1)]);
    assert!(ranking.pizzaiolos[0].rating > ranking.pizzaiolos[1].rating);

    assert_eq!(ranking.drivers.len(), 1);
    assert_eq!(ranking.drivers[0].user_id, "b");
    assert_eq!(ranking.drivers[0].orders, 1);
    assert!(ranking.drivers[0].rating <= 10.0);
    assert!(ranking.since < time::now());
}

#[tokio::test]
async fn test_ranking_needs_a_window() {
    let (_temp_dir, desk) = create_test_desk().await;
    let err = desk.performance_ranking(0).await.unwrap_err();
    assert!(matches!(err, BrasaError::InvalidInput { ref field, .. } if field == "days"));

    let empty = desk.performance_ranking(1).await.unwrap();
    assert!(empty.pizzaiolos.is_empty());
    assert!(empty.drivers.is_empty());
}

#[tokio::test]
async fn test_orders_overview() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let today = time::utc_date(time::now());

    let first = desk
        .create_order(new_order("Ana", vec![LineItem::new(1, "Margherita")]))
        .await
        .unwrap();
    for customer in ["Caio", "Dani"] {
        desk.create_order(new_order(customer, vec![LineItem::new(1, "Calabresa")]))
            .await
            .unwrap();
    }
    desk.start_preparing(first.id, &kitchen).await.unwrap();

    let overview = desk.orders_overview(today).await.unwrap();
    assert_eq!(overview.date, today);
    assert_eq!(overview.count(OrderStatus::Pending), 2);
    assert_eq!(overview.count(OrderStatus::Preparing), 1);
    assert_eq!(overview.count(OrderStatus::Delivered), 0);
    assert_eq!(overview.total(), 3);
    assert_eq!(overview.counts.len(), OrderStatus::ALL.len());

    let yesterday = today.checked_sub(1.day()).expect("valid date");
    assert_eq!(desk.orders_overview(yesterday).await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_attendance_report() {
    let (_temp_dir, desk) = create_test_desk().await;

    desk.clock_in("a").await.unwrap();
    desk.clock_out("a").await.unwrap();
    desk.clock_in("b").await.unwrap();

    let report = desk.attendance_report(None).await.unwrap();
    let users: Vec<&str> = report.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(users, vec!["b", "a"]);
    assert!(report[0].is_open());
    assert!(!report[1].is_open());

    let latest = desk.attendance_report(Some(1)).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].user_id, "b");
}

#[tokio::test]
async fn test_order_history() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");

    let mut ids = Vec::new();
    for customer in ["Ana", "Caio", "Dani"] {
        let order = desk
            .create_order(new_order(customer, vec![LineItem::new(1, "Margherita")]))
            .await
            .unwrap();
        ids.push(order.id);
    }
    desk.start_preparing(ids[0], &kitchen).await.unwrap();
    desk.start_preparing(ids[2], &kitchen).await.unwrap();

    let all: Vec<u64> = desk
        .order_history(None, None)
        .await
        .unwrap()
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(all, vec![ids[2], ids[1], ids[0]]);

    let claimed: Vec<u64> = desk
        .order_history(Some("a"), None)
        .await
        .unwrap()
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(claimed, vec![ids[2], ids[0]]);

    let latest = desk.order_history(None, Some(1)).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].id, ids[2]);

    assert!(desk.order_history(Some("z"), None).await.unwrap().is_empty());
}
