//! Density-triggered positional jitter.
//!
//! When a vehicle's own cell is crowded, its position gets a uniform
//! random nudge, a crude stand-in for the local avoidance reaction a real
//! swarm controller would produce. Crowding is judged on pre-jitter
//! positions, so one vehicle's nudge never changes another's decision
//! within the same step.

use nalgebra::Vector3;
use rand::Rng;

/// Applies uniform positional jitter above a cell-density threshold.
#[derive(Debug, Clone, Copy)]
pub struct SwarmModel {
    /// Cell occupancy at which jitter activates
    pub density_threshold: usize,

    /// Horizontal jitter magnitude in meters
    pub adjustment_scale: f64,
}

impl SwarmModel {
    /// Creates a model with the given threshold and magnitude.
    pub fn new(density_threshold: usize, adjustment_scale: f64) -> Self {
        Self {
            density_threshold,
            adjustment_scale,
        }
    }

    /// Perturbs `position` when `local_density` reaches the threshold.
    ///
    /// Draws x and y offsets uniformly in `±adjustment_scale` and z in
    /// `±adjustment_scale / 2`. Returns `None` below the threshold, where
    /// the caller keeps the original position and leaves its adjustment
    /// counter untouched.
    pub fn adjust<R: Rng>(
        &self,
        position: Vector3<f64>,
        local_density: usize,
        rng: &mut R,
    ) -> Option<Vector3<f64>> {
        if local_density < self.density_threshold {
            return None;
        }

        let s = self.adjustment_scale;
        let offset = Vector3::new(
            rng.gen_range(-s..=s),
            rng.gen_range(-s..=s),
            rng.gen_range(-s / 2.0..=s / 2.0),
        );
        Some(position + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_below_threshold_keeps_position() {
        let model = SwarmModel::new(3, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let moved = model.adjust(Vector3::new(10.0, 10.0, 20.0), 2, &mut rng);
        assert!(moved.is_none());
    }

    #[test]
    fn test_at_threshold_offsets_stay_bounded() {
        let model = SwarmModel::new(3, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let base = Vector3::new(10.0, 10.0, 20.0);

        for _ in 0..200 {
            let moved = model.adjust(base, 3, &mut rng).unwrap();
            assert!((moved.x - base.x).abs() <= 2.0);
            assert!((moved.y - base.y).abs() <= 2.0);
            assert!((moved.z - base.z).abs() <= 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_jitter() {
        let model = SwarmModel::new(3, 2.0);
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        let base = Vector3::new(5.0, -3.0, 40.0);

        let a = model.adjust(base, 5, &mut rng1);
        let b = model.adjust(base, 5, &mut rng2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_scale_is_a_noop_that_still_applies() {
        let model = SwarmModel::new(3, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let base = Vector3::new(10.0, 10.0, 20.0);

        let moved = model.adjust(base, 4, &mut rng).unwrap();
        assert_eq!(moved, base);
    }
}
