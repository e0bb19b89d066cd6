mod common;

use brasa_core::{
    models::{time, Actor, LineItem, MetricFilter, OrderStatus},
    BrasaError, OrderStore,
};
use common::{create_test_desk, new_order};

#[tokio::test]
async fn test_full_lifecycle_of_dessert_order() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let driver = Actor::driver("b");

    let order = desk
        .create_order(new_order("Bruna", vec![LineItem::new(2, "Brigadeiro")]))
        .await
        .expect("Failed to create order");

    // pending -> preparing
    let outcome = desk.start_preparing(order.id, &kitchen).await.unwrap();
    let preparing = outcome.order;
    assert_eq!(preparing.status, OrderStatus::Preparing);
    assert_eq!(preparing.pizzaiolo_id.as_deref(), Some("a"));
    let started = preparing.preparation_started_at.expect("start stamped");
    let shift = desk.open_shift("a").await.unwrap().expect("auto clock-in");
    assert_eq!(shift.shift_date, time::utc_date(started));

    // preparing -> ready
    let outcome = desk.mark_ready(order.id, &kitchen).await.unwrap();
    let ready = outcome.order;
    assert_eq!(ready.status, OrderStatus::Ready);
    assert_eq!(ready.pizzaiolo_id.as_deref(), Some("a"));
    let finished = ready.ready_at.expect("ready stamped");

    let metric = desk
        .store()
        .get_metric(order.id)
        .await
        .unwrap()
        .expect("metric recorded");
    assert_eq!(metric.pizzaiolo_id, "a");
    assert_eq!(metric.category.as_deref(), Some("dessert"));
    assert_eq!(metric.started_at, started);
    assert_eq!(metric.finished_at, finished);
    assert_eq!(
        metric.prep_seconds,
        finished.as_second() - started.as_second()
    );

    // ready -> out for delivery
    let outcome = desk.start_route(order.id, &driver).await.unwrap();
    let on_route = outcome.order;
    assert_eq!(on_route.status, OrderStatus::OutForDelivery);
    assert_eq!(on_route.entregador_id.as_deref(), Some("b"));
    assert_eq!(on_route.pizzaiolo_id.as_deref(), Some("a"));
    assert!(on_route.route_started_at.is_some());
    let distance = on_route.distance_km.expect("distance estimated");
    assert!((2.0..=10.0).contains(&distance));
    assert!(on_route.estimated_minutes.is_some());
    assert!(on_route.driver_position.is_some());

    // out for delivery -> delivered
    let outcome = desk.confirm_delivery(order.id, &driver).await.unwrap();
    let delivered = outcome.order;
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.route_ended_at.is_some());
    assert_eq!(delivered.entregador_id.as_deref(), Some("b"));
    assert_eq!(delivered.distance_km, Some(distance));
    assert!(delivered.route_minutes().is_some());

    // Delivered is terminal.
    let err = desk.confirm_delivery(order.id, &driver).await.unwrap_err();
    assert!(matches!(err, BrasaError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_invalid_moves_leave_order_untouched() {
    let (_temp_dir, desk) = create_test_desk().await;
    let order = desk
        .create_order(new_order("Caio", vec![LineItem::new(1, "Calabresa")]))
        .await
        .unwrap();

    // Skipping a stage.
    let err = desk
        .mark_ready(order.id, &Actor::kitchen("a"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BrasaError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Ready,
            ..
        }
    ));

    // Wrong role.
    let err = desk
        .start_preparing(order.id, &Actor::driver("b"))
        .await
        .unwrap_err();
    assert!(matches!(err, BrasaError::InvalidTransition { .. }));

    let stored = desk.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored, order);
    assert!(desk.open_shift("a").await.unwrap().is_none());
    assert!(desk.open_shift("b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_going_backwards_is_invalid() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let order = desk
        .create_order(new_order("Dani", vec![LineItem::new(1, "Portuguesa")]))
        .await
        .unwrap();
    desk.start_preparing(order.id, &kitchen).await.unwrap();
    let ready = desk.mark_ready(order.id, &kitchen).await.unwrap().order;

    let err = desk
        .transition(&ready, OrderStatus::Preparing, &kitchen)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BrasaError::InvalidTransition {
            from: OrderStatus::Ready,
            to: OrderStatus::Preparing,
            ..
        }
    ));
    assert_eq!(desk.get_order(order.id).await.unwrap().unwrap(), ready);
}

#[tokio::test]
async fn test_mark_ready_twice_records_one_metric() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let order = desk
        .create_order(new_order("Eva", vec![LineItem::new(1, "Margherita")]))
        .await
        .unwrap();
    let preparing = desk.start_preparing(order.id, &kitchen).await.unwrap().order;

    desk.transition(&preparing, OrderStatus::Ready, &kitchen)
        .await
        .unwrap();
    // Same stale snapshot again.
    let err = desk
        .transition(&preparing, OrderStatus::Ready, &kitchen)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BrasaError::StaleState {
            expected: OrderStatus::Preparing,
            actual: OrderStatus::Ready,
            ..
        }
    ));

    let metrics = desk
        .store()
        .list_metrics(&MetricFilter::default())
        .await
        .unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].order_id, order.id);
}

#[tokio::test]
async fn test_multi_item_order_is_combo() {
    let (_temp_dir, desk) = create_test_desk().await;
    let kitchen = Actor::kitchen("a");
    let order = desk
        .create_order(new_order(
            "Fabio",
            vec![LineItem::new(1, "Margherita"), LineItem::new(1, "Calabresa")],
        ))
        .await
        .unwrap();
    desk.start_preparing(order.id, &kitchen).await.unwrap();
    let outcome = desk.mark_ready(order.id, &kitchen).await.unwrap();

    let metric = outcome.metric.expect("metric planned");
    assert_eq!(metric.category.as_deref(), Some("combo"));
}
