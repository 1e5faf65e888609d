//! Engine tunables.

use crate::error::ConfigError;

/// Tunable parameters for one deconfliction run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum allowed 3D separation in meters
    pub safety_distance: f64,

    /// Cell occupancy at which swarm jitter activates
    pub density_threshold: usize,

    /// Horizontal jitter magnitude in meters (vertical is half of this)
    pub adjustment_scale: f64,

    /// Grid cell edge length in meters
    pub cell_size: f64,

    /// Sampling time step in seconds
    pub dt: f64,

    /// Seed for the jitter RNG
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            safety_distance: 5.0,
            density_threshold: 3,
            adjustment_scale: 2.0,
            cell_size: 50.0,
            dt: 0.5,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Checks that every tunable is in its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("safety_distance", self.safety_distance),
            ("cell_size", self.cell_size),
            ("dt", self.dt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveParameter { name, value });
            }
        }
        if !self.adjustment_scale.is_finite() || self.adjustment_scale < 0.0 {
            return Err(ConfigError::NegativeAdjustmentScale {
                value: self.adjustment_scale,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dt_rejected() {
        let config = EngineConfig {
            dt: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveParameter {
                name: "dt",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_negative_safety_distance_rejected() {
        let config = EngineConfig {
            safety_distance: -1.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveParameter {
                name: "safety_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_cell_size_rejected() {
        let config = EngineConfig {
            cell_size: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveParameter { name: "cell_size", .. })
        ));
    }

    #[test]
    fn test_negative_jitter_scale_rejected() {
        let config = EngineConfig {
            adjustment_scale: -0.5,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeAdjustmentScale { .. })
        ));
    }

    #[test]
    fn test_zero_jitter_scale_is_legal() {
        let config = EngineConfig {
            adjustment_scale: 0.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
