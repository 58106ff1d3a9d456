//! Movement sampler
//!
//! Turns a stream of noisy position fixes into a simplified path. A fix
//! becomes a [`RoutePoint`] only if it lies at least `threshold_meters`
//! away from the last promoted fix. The very first fix is always
//! promoted.
//!
//! The sampler is a plain synchronous struct, owned by the single
//! consumer of the fix stream. Callers that receive fixes concurrently
//! must serialize their calls to [`MovementSampler::observe`].

#[macro_use]
pub mod macros;
pub mod haversine;

use crate::types::{InvalidFixError, PositionFix, RoutePoint};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Threshold used when none is configured, in meters.
pub const DEFAULT_THRESHOLD_METERS: f64 = 10.0;

/// The threshold is negative, NaN or infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InvalidThresholdError(pub f64);

impl Display for InvalidThresholdError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Invalid sampling threshold: {} meters.", self.0)
    }
}

impl std::error::Error for InvalidThresholdError {}

/// Stateful displacement filter over a fix stream.
#[derive(Debug, Clone)]
pub struct MovementSampler {
    threshold_meters: f64,

    /// Last promoted fix. `None` until the first fix is observed.
    previous: Option<PositionFix>,

    /// All promoted fixes, in arrival order.
    route: Vec<RoutePoint>,

    /// Number of valid fixes observed so far.
    observed: u64,
}

impl Default for MovementSampler {
    fn default() -> Self {
        MovementSampler {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            previous: None,
            route: vec![],
            observed: 0,
        }
    }
}

impl MovementSampler {
    /// Creates an empty sampler promoting fixes at least
    /// `threshold_meters` apart.
    pub fn new(threshold_meters: f64) -> Result<Self, InvalidThresholdError> {
        if !threshold_meters.is_finite() || threshold_meters < 0.0 {
            return Err(InvalidThresholdError(threshold_meters));
        }

        Ok(MovementSampler {
            threshold_meters,
            ..Default::default()
        })
    }

    /// Feeds the next fix of the stream.
    ///
    /// Returns the new [`RoutePoint`] if the fix was promoted, `None` if
    /// it was discarded as jitter. A non-finite fix is rejected and the
    /// sampler state is left untouched.
    pub fn observe(&mut self, fix: PositionFix) -> Result<Option<RoutePoint>, InvalidFixError> {
        fix.validate()?;

        let index = self.observed;
        self.observed += 1;

        if let Some(previous) = &self.previous {
            let distance = haversine::distance(previous, &fix);
            if distance < self.threshold_meters {
                sampler_debug!(
                    "(observe) discarded fix {} at {:.3}m from {}.",
                    fix,
                    distance,
                    previous
                );
                return Ok(None);
            }

            sampler_debug!(
                "(observe) promoted fix {} at {:.3}m from {}.",
                fix,
                distance,
                previous
            );
        } else {
            sampler_debug!("(observe) promoted first fix {}.", fix);
        }

        let point = RoutePoint { fix, index };
        self.previous = Some(fix);
        self.route.push(point);

        Ok(Some(point))
    }

    /// The last promoted fix.
    pub fn previous(&self) -> Option<&PositionFix> {
        self.previous.as_ref()
    }

    /// The promoted fixes so far, oldest first.
    pub fn route(&self) -> &[RoutePoint] {
        &self.route
    }

    /// Minimum displacement required for promotion, in meters.
    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    /// Number of valid fixes observed, promoted or not.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Forgets all state, as on a restart of the fix stream.
    pub fn reset(&mut self) {
        sampler_info!(
            "(reset) dropping {} route points after {} fixes.",
            self.route.len(),
            self.observed
        );
        self.previous = None;
        self.route.clear();
        self.observed = 0;
    }

    /// Consumes the sampler and returns the route.
    pub fn into_route(self) -> Vec<RoutePoint> {
        self.route
    }
}
