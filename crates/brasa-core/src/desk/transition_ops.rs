//! Lifecycle moves for the OrderDesk.

use log::{debug, info, warn};

use super::OrderDesk;
use crate::{
    engine::{plan_transition, SideEffect, TransitionPlan},
    error::{BrasaError, Result},
    models::{
        time, Actor, NewProductionMetric, Order, OrderPatch, OrderStatus, TimeTrack,
        TransitionWrite,
    },
    store::OrderStore,
};

/// What a successful transition did.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The order as stored after the write
    pub order: Order,
    pub plan: TransitionPlan,
    /// Production metric written with the transition
    pub metric: Option<NewProductionMetric>,
    /// Shift opened for the actor by this transition
    pub opened_shift: Option<TimeTrack>,
}

impl<S: OrderStore> OrderDesk<S> {
    /// Moves `snapshot` to `requested` on behalf of `actor`.
    ///
    /// The move is validated against the snapshot's status. The store then
    /// writes it only if the stored row still has that status, so two staff
    /// acting on the same snapshot cannot both win: the second one gets
    /// [`BrasaError::StaleState`] and the row keeps the first one's owner.
    ///
    /// An auto clock-in runs before the status write and is kept even when
    /// the write then loses a race.
    pub async fn transition(
        &self,
        snapshot: &Order,
        requested: OrderStatus,
        actor: &Actor,
    ) -> Result<TransitionOutcome> {
        let now = time::now();
        let plan = plan_transition(snapshot, requested, actor, now).map_err(|e| {
            debug!("Rejected move of order {}: {e}", snapshot.id);
            e
        })?;

        let mut patch = OrderPatch::default();
        let mut metric = None;
        let mut opened_shift = None;

        for effect in &plan.effects {
            match effect {
                SideEffect::OpenShift { user_id } => {
                    let claim = self.store.ensure_open_shift(user_id, now).await?;
                    if claim.opened {
                        info!("Clocked in {user_id} on shift {}", claim.shift.id);
                        opened_shift = Some(claim.shift);
                    }
                }
                SideEffect::AssignPizzaiolo { user_id } => {
                    patch.pizzaiolo_id = Some(user_id.clone());
                }
                SideEffect::StampPreparationStarted(at) => patch.preparation_started_at = Some(*at),
                SideEffect::StampReady(at) => patch.ready_at = Some(*at),
                SideEffect::RecordProductionMetric {
                    started_at,
                    finished_at,
                    prep_seconds,
                } => {
                    metric = Some(NewProductionMetric {
                        order_id: plan.order_id,
                        pizzaiolo_id: actor.user_id.clone(),
                        prep_seconds: *prep_seconds,
                        started_at: *started_at,
                        finished_at: *finished_at,
                        category: self.category_policy.categorize(&snapshot.items),
                    });
                }
                SideEffect::AssignEntregador { user_id } => {
                    patch.entregador_id = Some(user_id.clone());
                }
                SideEffect::StampRouteStarted(at) => patch.route_started_at = Some(*at),
                SideEffect::EstimateRoute => {
                    patch.route = Some(self.estimator.estimate(snapshot));
                }
                SideEffect::StampRouteEnded(at) => patch.route_ended_at = Some(*at),
            }
        }

        if plan.to == OrderStatus::Ready && metric.is_none() {
            warn!(
                "Order {} has no preparation start time, skipping production metric",
                plan.order_id
            );
        }

        let write = TransitionWrite {
            order_id: plan.order_id,
            from: plan.from,
            to: plan.to,
            at: now,
            patch,
            metric: metric.clone(),
        };

        let order = match self.store.apply_transition(write).await {
            Ok(order) => order,
            Err(e @ BrasaError::StaleState { .. }) => {
                warn!("{} lost the claim on order {}: {e}", actor.user_id, plan.order_id);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        info!(
            "Order {} moved {} -> {} by {} ({})",
            order.id, plan.from, plan.to, actor.user_id, actor.role
        );

        Ok(TransitionOutcome {
            order,
            plan,
            metric,
            opened_shift,
        })
    }

    /// Loads a fresh snapshot of the order, then calls [`Self::transition`].
    pub async fn transition_by_id(
        &self,
        order_id: u64,
        requested: OrderStatus,
        actor: &Actor,
    ) -> Result<TransitionOutcome> {
        let snapshot = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(BrasaError::OrderNotFound { id: order_id })?;
        self.transition(&snapshot, requested, actor).await
    }

    /// Kitchen claims a pending order.
    pub async fn start_preparing(&self, order_id: u64, actor: &Actor) -> Result<TransitionOutcome> {
        self.transition_by_id(order_id, OrderStatus::Preparing, actor)
            .await
    }

    /// Kitchen finishes an order and records its preparation time.
    pub async fn mark_ready(&self, order_id: u64, actor: &Actor) -> Result<TransitionOutcome> {
        self.transition_by_id(order_id, OrderStatus::Ready, actor).await
    }

    /// Driver takes a ready order on the road.
    pub async fn start_route(&self, order_id: u64, actor: &Actor) -> Result<TransitionOutcome> {
        self.transition_by_id(order_id, OrderStatus::OutForDelivery, actor)
            .await
    }

    pub async fn confirm_delivery(
        &self,
        order_id: u64,
        actor: &Actor,
    ) -> Result<TransitionOutcome> {
        self.transition_by_id(order_id, OrderStatus::Delivered, actor)
            .await
    }
}
