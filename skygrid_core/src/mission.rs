//! Mission definitions and trajectory interpolation.
//!
//! A mission is a vehicle id, an ordered waypoint list, and the time
//! window during which the vehicle flies it. The window divides into
//! equal-duration segments, one per consecutive waypoint pair, and the
//! vehicle traverses each segment at constant velocity.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The `[start, end]` interval during which a mission is airborne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Takeoff time in seconds
    pub start: f64,

    /// Landing time in seconds
    pub end: f64,
}

impl TimeWindow {
    /// Creates a window spanning `start..=end`.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns true if `t` falls inside the window, boundaries included.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A planned flight: waypoints traversed across a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Vehicle ID, unique within a scenario
    pub id: String,

    /// Waypoints in flight order (at least two)
    pub waypoints: Vec<Vector3<f64>>,

    /// Active time window
    pub window: TimeWindow,
}

impl Mission {
    /// Creates a new mission.
    pub fn new(id: &str, waypoints: Vec<Vector3<f64>>, window: TimeWindow) -> Self {
        Self {
            id: id.to_string(),
            waypoints,
            window,
        }
    }

    /// Checks the structural invariants: at least two waypoints and a
    /// finite, forward-running window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                id: self.id.clone(),
                count: self.waypoints.len(),
            });
        }
        // NaN bounds slip through a plain ordering check, and an infinite
        // end would keep the time loop running forever.
        if !self.window.start.is_finite()
            || !self.window.end.is_finite()
            || self.window.start >= self.window.end
        {
            return Err(ConfigError::InvalidWindow {
                id: self.id.clone(),
                start: self.window.start,
                end: self.window.end,
            });
        }
        Ok(())
    }

    /// Position at time `t`, or `None` while the mission is not airborne.
    ///
    /// The window splits into `waypoints.len() - 1` equal-duration
    /// segments and `t` interpolates linearly within its segment. The
    /// interpolation clamps at segment boundaries, so `t == start` yields
    /// the first waypoint and `t == end` the last one bit-exactly. A
    /// segment index pushed past the final segment by roundoff also
    /// resolves to the last waypoint.
    pub fn position_at(&self, t: f64) -> Option<Vector3<f64>> {
        if !self.window.contains(t) {
            return None;
        }

        let segments = self.waypoints.len() - 1;
        let segment_duration = self.window.duration() / segments as f64;
        let elapsed = t - self.window.start;

        let index = (elapsed / segment_duration).floor() as usize;
        if index >= segments {
            return Some(self.waypoints[segments]);
        }

        let t0 = index as f64 * segment_duration;
        let t1 = t0 + segment_duration;
        Some(lerp(
            self.waypoints[index],
            self.waypoints[index + 1],
            t0,
            t1,
            elapsed,
        ))
    }
}

/// Linear interpolation between `p0` at `t0` and `p1` at `t1`, clamped so
/// boundary times return the endpoints exactly.
fn lerp(p0: Vector3<f64>, p1: Vector3<f64>, t0: f64, t1: f64, t: f64) -> Vector3<f64> {
    if t <= t0 {
        return p0;
    }
    if t >= t1 {
        return p1;
    }
    let ratio = (t - t0) / (t1 - t0);
    p0 + (p1 - p0) * ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn climbing_mission() -> Mission {
        Mission::new(
            "Primary",
            vec![
                Vector3::new(0.0, 0.0, 20.0),
                Vector3::new(30.0, 15.0, 22.0),
                Vector3::new(60.0, 35.0, 25.0),
            ],
            TimeWindow::new(0.0, 50.0),
        )
    }

    #[test]
    fn test_window_start_yields_first_waypoint_exactly() {
        let mission = climbing_mission();
        let pos = mission.position_at(0.0).unwrap();
        assert_eq!(pos, Vector3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_window_end_yields_last_waypoint_exactly() {
        let mission = climbing_mission();
        let pos = mission.position_at(50.0).unwrap();
        assert_eq!(pos, Vector3::new(60.0, 35.0, 25.0));
    }

    #[test]
    fn test_segment_boundary_yields_middle_waypoint_exactly() {
        // Two segments over 50s, so t=25 sits on the shared boundary.
        let mission = climbing_mission();
        let pos = mission.position_at(25.0).unwrap();
        assert_eq!(pos, Vector3::new(30.0, 15.0, 22.0));
    }

    #[test]
    fn test_midpoint_of_first_segment_interpolates() {
        let mission = climbing_mission();
        let pos = mission.position_at(12.5).unwrap();
        assert_relative_eq!(pos.x, 15.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y, 7.5, epsilon = 1e-9);
        assert_relative_eq!(pos.z, 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_absent_outside_window_on_both_sides() {
        let mission = climbing_mission();
        assert!(mission.position_at(-0.1).is_none());
        assert!(mission.position_at(50.1).is_none());

        let late = Mission::new(
            "Drone_C",
            vec![Vector3::new(0.0, 0.0, 20.0), Vector3::new(55.0, 30.0, 25.0)],
            TimeWindow::new(60.0, 100.0),
        );
        assert!(late.position_at(50.0).is_none());
        assert!(late.position_at(60.0).is_some());
    }

    #[test]
    fn test_hovering_segment_is_stationary() {
        let hover = Mission::new(
            "Drone_H",
            vec![Vector3::new(10.0, 10.0, 20.0), Vector3::new(10.0, 10.0, 20.0)],
            TimeWindow::new(0.0, 10.0),
        );
        let pos = hover.position_at(4.2).unwrap();
        assert_eq!(pos, Vector3::new(10.0, 10.0, 20.0));
    }

    #[test]
    fn test_validate_rejects_single_waypoint() {
        let mission = Mission::new(
            "Drone_X",
            vec![Vector3::new(0.0, 0.0, 20.0)],
            TimeWindow::new(0.0, 50.0),
        );
        assert_eq!(
            mission.validate(),
            Err(ConfigError::TooFewWaypoints {
                id: "Drone_X".to_string(),
                count: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_backwards_window() {
        let mission = Mission::new(
            "Drone_X",
            vec![Vector3::new(0.0, 0.0, 20.0), Vector3::new(1.0, 0.0, 20.0)],
            TimeWindow::new(50.0, 50.0),
        );
        assert!(matches!(
            mission.validate(),
            Err(ConfigError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_window() {
        let span = vec![Vector3::new(0.0, 0.0, 20.0), Vector3::new(1.0, 0.0, 20.0)];

        let nan_start = Mission::new("Drone_X", span.clone(), TimeWindow::new(f64::NAN, 50.0));
        assert!(matches!(
            nan_start.validate(),
            Err(ConfigError::InvalidWindow { .. })
        ));

        let endless = Mission::new("Drone_Y", span, TimeWindow::new(0.0, f64::INFINITY));
        assert!(matches!(
            endless.validate(),
            Err(ConfigError::InvalidWindow { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_position_stays_within_segment_bounds(
            t in 0.0f64..=50.0,
            x0 in -100.0f64..100.0,
            y0 in -100.0f64..100.0,
            z0 in 0.0f64..120.0,
            x1 in -100.0f64..100.0,
            y1 in -100.0f64..100.0,
            z1 in 0.0f64..120.0,
        ) {
            let a = Vector3::new(x0, y0, z0);
            let b = Vector3::new(x1, y1, z1);
            let mission = Mission::new("P", vec![a, b], TimeWindow::new(0.0, 50.0));

            let pos = mission.position_at(t).unwrap();
            for axis in 0..3 {
                let lo = a[axis].min(b[axis]);
                let hi = a[axis].max(b[axis]);
                prop_assert!(pos[axis] >= lo - 1e-9);
                prop_assert!(pos[axis] <= hi + 1e-9);
            }
        }
    }
}
