//! The order lifecycle state machine.
//!
//! [`plan_transition`] is a pure function: it decides whether a move is legal
//! for the acting role and lists the side effects the move implies. Executing
//! those effects is the coordinator's job ([`crate::desk`]).

use jiff::Timestamp;

use crate::{
    error::{BrasaError, Result},
    models::{time, Actor, Order, OrderStatus, Role},
};

/// One legal edge of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub role: Role,
}

/// Every legal move. Anything else is rejected.
pub const TRANSITIONS: [TransitionRule; 4] = [
    TransitionRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Preparing,
        role: Role::Kitchen,
    },
    TransitionRule {
        from: OrderStatus::Preparing,
        to: OrderStatus::Ready,
        role: Role::Kitchen,
    },
    TransitionRule {
        from: OrderStatus::Ready,
        to: OrderStatus::OutForDelivery,
        role: Role::Driver,
    },
    TransitionRule {
        from: OrderStatus::OutForDelivery,
        to: OrderStatus::Delivered,
        role: Role::Driver,
    },
];

/// Looks up the rule for a `(from, to)` pair.
pub fn rule_for(from: OrderStatus, to: OrderStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
}

/// Side effects bound to a transition, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Clock the user in if they have no open shift today
    OpenShift { user_id: String },
    AssignPizzaiolo { user_id: String },
    StampPreparationStarted(Timestamp),
    StampReady(Timestamp),
    RecordProductionMetric {
        started_at: Timestamp,
        finished_at: Timestamp,
        prep_seconds: i64,
    },
    AssignEntregador { user_id: String },
    StampRouteStarted(Timestamp),
    /// Attach distance, duration and driver position from the estimator
    EstimateRoute,
    StampRouteEnded(Timestamp),
}

/// A validated move and everything that has to happen with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub order_id: u64,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub actor: Actor,
    pub at: Timestamp,
    pub effects: Vec<SideEffect>,
}

impl TransitionPlan {
    pub fn has_effect(&self, predicate: impl Fn(&SideEffect) -> bool) -> bool {
        self.effects.iter().any(predicate)
    }
}

/// Validates `order.status → requested` for `actor` and plans its effects.
///
/// `order` is the caller's snapshot; the store re-checks its status when the
/// plan is written.
///
/// # Errors
///
/// [`BrasaError::InvalidTransition`] when the pair is not in [`TRANSITIONS`]
/// or the actor lacks the required role.
///
/// # Examples
///
/// ```rust
/// use brasa_core::engine::{plan_transition, SideEffect};
/// use brasa_core::models::{Actor, LineItem, Order, OrderStatus};
/// use jiff::Timestamp;
///
/// # let now = Timestamp::now();
/// # let order = Order {
/// #     id: 7, number: 7, customer_name: "Ana".into(), customer_phone: "1".into(),
/// #     delivery_address: None, notes: None, items: vec![LineItem::new(1, "Margherita")],
/// #     total_cents: 4500, payment_method: None, status: OrderStatus::Pending,
/// #     pizzaiolo_id: None, entregador_id: None, preparation_started_at: None,
/// #     ready_at: None, route_started_at: None, route_ended_at: None, distance_km: None,
/// #     estimated_minutes: None, driver_position: None, created_at: now, updated_at: now,
/// # };
/// let plan = plan_transition(&order, OrderStatus::Preparing, &Actor::kitchen("ana"), now)?;
/// assert!(plan.has_effect(|e| matches!(e, SideEffect::OpenShift { .. })));
///
/// let err = plan_transition(&order, OrderStatus::Ready, &Actor::kitchen("ana"), now);
/// assert!(err.is_err());
/// # Ok::<(), brasa_core::BrasaError>(())
/// ```
pub fn plan_transition(
    order: &Order,
    requested: OrderStatus,
    actor: &Actor,
    now: Timestamp,
) -> Result<TransitionPlan> {
    let invalid = || BrasaError::InvalidTransition {
        from: order.status,
        to: requested,
        role: actor.role,
    };

    let rule = rule_for(order.status, requested).ok_or_else(invalid)?;
    if rule.role != actor.role {
        return Err(invalid());
    }

    let user_id = actor.user_id.clone();
    let effects = match (rule.from, rule.to) {
        (OrderStatus::Pending, OrderStatus::Preparing) => vec![
            SideEffect::OpenShift {
                user_id: user_id.clone(),
            },
            SideEffect::AssignPizzaiolo { user_id },
            SideEffect::StampPreparationStarted(now),
        ],
        (OrderStatus::Preparing, OrderStatus::Ready) => {
            let mut effects = vec![SideEffect::StampReady(now)];
            if let Some(started_at) = order.preparation_started_at {
                effects.push(SideEffect::RecordProductionMetric {
                    started_at,
                    finished_at: now,
                    prep_seconds: time::elapsed_seconds(started_at, now),
                });
            }
            effects
        }
        (OrderStatus::Ready, OrderStatus::OutForDelivery) => vec![
            SideEffect::AssignEntregador { user_id },
            SideEffect::StampRouteStarted(now),
            SideEffect::EstimateRoute,
        ],
        (OrderStatus::OutForDelivery, OrderStatus::Delivered) => {
            vec![SideEffect::StampRouteEnded(now)]
        }
        _ => Vec::new(),
    };

    Ok(TransitionPlan {
        order_id: order.id,
        from: rule.from,
        to: rule.to,
        actor: actor.clone(),
        at: now,
        effects,
    })
}
