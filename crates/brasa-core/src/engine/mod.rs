//! Transition rules and the policies they lean on.
//!
//! - [`transitions`]: the pure state machine
//! - [`category`]: category labels for metrics and queue filtering
//! - [`estimator`]: route estimates for orders leaving with a driver

pub mod category;
pub mod estimator;
pub mod transitions;

pub use category::{CategoryPolicy, KeywordCategoryPolicy};
pub use estimator::{RouteEstimator, SimulatedRouteConfig, SimulatedRouteEstimator};
pub use transitions::{
    plan_transition, rule_for, SideEffect, TransitionPlan, TransitionRule, TRANSITIONS,
};
