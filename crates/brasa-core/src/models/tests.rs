//! Unit tests for the models module.

use jiff::{civil::date, Timestamp};

use super::*;

fn sample_order() -> Order {
    let now = Timestamp::now();
    Order {
        id: 1,
        number: 42,
        customer_name: "Ana".to_string(),
        customer_phone: "11 99999-0000".to_string(),
        delivery_address: Some("Rua Augusta, 100".to_string()),
        notes: None,
        items: vec![LineItem::new(1, "Margherita")],
        total_cents: 5990,
        payment_method: Some("pix".to_string()),
        status: OrderStatus::Pending,
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
fn test_status_parsing_normalizes_legacy_labels() {
    assert_eq!("Pendente".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
    assert_eq!("pendente".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
    assert_eq!("  Pronto ".parse::<OrderStatus>(), Ok(OrderStatus::Ready));
    assert_eq!(
        "Em rota de entrega".parse::<OrderStatus>(),
        Ok(OrderStatus::OutForDelivery)
    );
    assert_eq!("Entregue".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
    assert_eq!("Cancelado".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
    assert!("baking".parse::<OrderStatus>().is_err());
}

#[test]
fn test_status_round_trips_through_as_str() {
    for status in OrderStatus::ALL {
        assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
    }
}

#[test]
fn test_status_sequence_is_forward_only() {
    let mut status = OrderStatus::Pending;
    let mut visited = vec![status];
    while let Some(next) = status.next() {
        assert!(next.stage() > status.stage());
        status = next;
        visited.push(status);
    }
    assert_eq!(status, OrderStatus::Delivered);
    assert_eq!(visited.len(), 5);
    assert!(OrderStatus::Cancelled.is_terminal());
    assert_eq!(OrderStatus::Cancelled.stage(), None);
}

#[test]
fn test_status_serde_accepts_aliases() {
    let parsed: OrderStatus = serde_json::from_str("\"Em preparo\"").unwrap();
    assert_eq!(parsed, OrderStatus::Preparing);
    assert_eq!(
        serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
        "\"out_for_delivery\""
    );
}

#[test]
fn test_role_visibility() {
    assert!(Role::Kitchen.sees(OrderStatus::Pending));
    assert!(Role::Kitchen.sees(OrderStatus::Preparing));
    assert!(!Role::Kitchen.sees(OrderStatus::Ready));
    assert!(Role::Driver.sees(OrderStatus::OutForDelivery));
    assert!(!Role::Driver.sees(OrderStatus::Delivered));
    assert_eq!(Role::Manager.visible_statuses().len(), OrderStatus::ALL.len());
    assert_eq!("pizzaiolo".parse::<Role>(), Ok(Role::Kitchen));
    assert_eq!("Entregador".parse::<Role>(), Ok(Role::Driver));
}

#[test]
fn test_line_item_parsing() {
    let item: LineItem = "2x Margherita".parse().unwrap();
    assert_eq!(item, LineItem::new(2, "Margherita"));

    let item: LineItem = "Calabresa".parse().unwrap();
    assert_eq!(item, LineItem::new(1, "Calabresa"));

    let item: LineItem = "1x Portuguesa:large:classic".parse().unwrap();
    assert_eq!(
        item,
        LineItem::new(1, "Portuguesa")
            .with_size("large")
            .with_category("classic")
    );

    let item: LineItem = "Extra Cheese".parse().unwrap();
    assert_eq!(item.name, "Extra Cheese");
    assert_eq!(item.quantity, 1);

    assert!("0x Margherita".parse::<LineItem>().is_err());
    assert!("".parse::<LineItem>().is_err());
}

#[test]
fn test_line_item_deserializes_legacy_fields() {
    let item: LineItem =
        serde_json::from_str(r#"{"quantidade": 3, "nome": "Brigadeiro", "categoria": "doce"}"#)
            .unwrap();
    assert_eq!(item.quantity, 3);
    assert_eq!(item.name, "Brigadeiro");
    assert_eq!(item.category.as_deref(), Some("doce"));
}

#[test]
fn test_route_minutes() {
    let mut order = sample_order();
    assert_eq!(order.route_minutes(), None);

    let start: Timestamp = "2024-06-01T19:00:00Z".parse().unwrap();
    let end: Timestamp = "2024-06-01T19:27:00Z".parse().unwrap();
    order.route_started_at = Some(start);
    order.route_ended_at = Some(end);
    assert_eq!(order.route_minutes(), Some(27.0));
}

#[test]
fn test_delivery_history_averages() {
    let mut a = sample_order();
    a.distance_km = Some(4.0);
    a.route_started_at = Some("2024-06-01T19:00:00Z".parse().unwrap());
    a.route_ended_at = Some("2024-06-01T19:20:00Z".parse().unwrap());
    let mut b = sample_order();
    b.id = 2;
    b.distance_km = Some(8.0);

    let history = DeliveryHistory::new("driver-1".to_string(), vec![a, b]);
    assert_eq!(history.avg_distance_km, Some(6.0));
    assert_eq!(history.avg_route_minutes, Some(20.0));

    let empty = DeliveryHistory::new("driver-1".to_string(), vec![]);
    assert_eq!(empty.avg_distance_km, None);
}

#[test]
fn test_day_bounds_cover_one_utc_day() {
    let (start, end) = time::day_bounds(date(2024, 6, 1)).unwrap();
    assert_eq!(start.to_string(), "2024-06-01T00:00:00Z");
    assert_eq!(end.to_string(), "2024-06-02T00:00:00Z");
    assert_eq!(time::utc_date(start), date(2024, 6, 1));
}

#[test]
fn test_truncated_now_has_no_fraction() {
    let now = time::now();
    assert_eq!(now.subsec_nanosecond(), 0);
    assert!(now <= Timestamp::now());
    assert_eq!(time::elapsed_seconds(now, now), 0);
}

#[test]
fn test_filter_for_role() {
    let filter = OrderFilter::for_role(Role::Kitchen);
    assert_eq!(filter.statuses, vec![OrderStatus::Pending, OrderStatus::Preparing]);
    assert_eq!(filter.order_by, OrderSort::CreatedAsc);
    assert!(OrderFilter::for_role(Role::Manager).statuses.len() == 6);
}
