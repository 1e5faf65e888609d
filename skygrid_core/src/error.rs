//! Error taxonomy for simulation setup.
//!
//! Every variant is fatal and surfaces before the first time step runs;
//! nothing in the engine retries or degrades.

use thiserror::Error;

/// Rejected mission data or tunables.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A trajectory needs at least two waypoints to form a segment.
    #[error("mission '{id}' has {count} waypoint(s), need at least 2")]
    TooFewWaypoints { id: String, count: usize },

    /// A time window must be finite and run forward.
    #[error("mission '{id}' has invalid time window [{start}, {end}]")]
    InvalidWindow { id: String, start: f64, end: f64 },

    /// Spatial and temporal tunables must be positive and finite.
    #[error("{name} must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    /// The jitter magnitude cannot be negative.
    #[error("adjustment_scale must be non-negative, got {value}")]
    NegativeAdjustmentScale { value: f64 },
}
