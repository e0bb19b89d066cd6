//! Route estimates attached when a driver leaves with an order.

use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{BrasaError, Result},
    models::{Coordinates, Order, RouteEstimate},
};

/// Produces distance, duration and driver position for an order.
///
/// Implement this to plug in a real geocoding/routing service.
pub trait RouteEstimator: Send + Sync {
    fn estimate(&self, order: &Order) -> RouteEstimate;
}

/// Bounds for [`SimulatedRouteEstimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedRouteConfig {
    pub min_km: f64,
    pub max_km: f64,
    pub minutes_per_km: f64,
    /// Upper bound of the extra minutes added to every estimate
    pub jitter_minutes: f64,
    /// Where drivers start
    pub origin: Coordinates,
    /// Maximum offset from the origin, in degrees per axis
    pub position_spread_deg: f64,
}

impl Default for SimulatedRouteConfig {
    fn default() -> Self {
        Self {
            min_km: 2.0,
            max_km: 10.0,
            minutes_per_km: 3.0,
            jitter_minutes: 5.0,
            origin: Coordinates {
                latitude: -23.5505,
                longitude: -46.6333,
            },
            position_spread_deg: 0.05,
        }
    }
}

impl SimulatedRouteConfig {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("min_km", self.min_km),
            ("max_km", self.max_km),
            ("minutes_per_km", self.minutes_per_km),
            ("jitter_minutes", self.jitter_minutes),
            ("position_spread_deg", self.position_spread_deg),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(BrasaError::invalid_input(field)
                    .with_reason(format!("must be a non-negative number, got {value}")));
            }
        }
        if self.min_km > self.max_km {
            return Err(BrasaError::invalid_input("min_km").with_reason(format!(
                "{} is greater than max_km {}",
                self.min_km, self.max_km
            )));
        }
        Ok(())
    }
}

/// Random estimates inside configured bounds.
///
/// Stands in for a routing integration: distance is uniform in
/// `[min_km, max_km]`, duration is `distance * minutes_per_km` plus up to
/// `jitter_minutes`, and the driver sits near the origin.
pub struct SimulatedRouteEstimator {
    config: SimulatedRouteConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedRouteEstimator {
    pub fn new(config: SimulatedRouteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Deterministic estimator for tests and demos.
    pub fn with_seed(config: SimulatedRouteConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }

    pub fn config(&self) -> &SimulatedRouteConfig {
        &self.config
    }
}

impl Default for SimulatedRouteEstimator {
    fn default() -> Self {
        Self {
            config: SimulatedRouteConfig::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl RouteEstimator for SimulatedRouteEstimator {
    fn estimate(&self, _order: &Order) -> RouteEstimate {
        let c = &self.config;
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let distance_km = rng.gen_range(c.min_km..=c.max_km);
        let jitter = rng.gen_range(0.0..=c.jitter_minutes);
        let spread = c.position_spread_deg;
        let driver_position = Coordinates {
            latitude: c.origin.latitude + rng.gen_range(-spread..=spread),
            longitude: c.origin.longitude + rng.gen_range(-spread..=spread),
        };

        RouteEstimate {
            distance_km,
            estimated_minutes: distance_km * c.minutes_per_km + jitter,
            driver_position,
        }
    }
}
