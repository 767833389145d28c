//! Arcade vehicle motion model.
//!
//! One `tick` per rendered frame with a fixed step (no delta-time scaling).
//! Per tick, in order:
//!
//! 1. steering moves toward the held direction, or decays toward zero
//! 2. speed accelerates (forward, then reverse) or coasts down
//! 3. heading turns by `steering * speed * turn_gain`
//! 4. lateral drift accumulates while steering hard, and always decays
//! 5. position advances along the heading, plus drift

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::input_state::InputState;

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTuning {
    pub max_speed: f32,
    /// Most negative speed reachable in reverse.
    pub max_reverse_speed: f32,
    pub acceleration: f32,
    pub reverse_acceleration: f32,
    pub steering_rate: f32,
    pub steering_limit: f32,
    /// Steering multiplier per tick with no steering input.
    pub steering_decay: f32,
    /// Speed multiplier per tick with neither forward nor reverse held.
    pub coast_decay: f32,
    pub turn_gain: f32,
    /// `|steering|` above which drift accumulates.
    pub drift_threshold: f32,
    pub drift_gain: f32,
    pub drift_decay: f32,
    /// Whether drift contributes to position. Drift is tracked either way.
    pub apply_drift: bool,
    pub initial_heading: f32,
    /// Steering-wheel visual rotation per unit of steering.
    pub wheel_ratio: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: 0.35,
            max_reverse_speed: -0.30,
            acceleration: 0.0055,
            reverse_acceleration: 0.005,
            steering_rate: 0.002,
            steering_limit: 0.1,
            steering_decay: 0.9,
            coast_decay: 0.97,
            turn_gain: 2.0,
            drift_threshold: 0.06,
            drift_gain: 3.0,
            drift_decay: 0.9,
            apply_drift: true,
            initial_heading: PI,
            wheel_ratio: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    /// Radians about +Y. Zero faces -Z.
    pub heading: f32,
    pub speed: f32,
    pub steering: f32,
    /// Lateral drift accumulators along X (`x`) and Z (`y`).
    pub drift: Vec2,
    pub position: Vec3,
}

impl VehicleState {
    /// Unit ground-plane direction the vehicle faces.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.heading.sin(), 0.0, -self.heading.cos())
    }

    /// Unit ground-plane direction to the vehicle's right.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, -self.heading.sin())
    }
}

#[derive(Resource, Debug, Clone)]
pub struct VehicleMotionModel {
    pub tuning: VehicleTuning,
    state: VehicleState,
}

impl Default for VehicleMotionModel {
    fn default() -> Self {
        Self::new(VehicleTuning::default())
    }
}

impl VehicleMotionModel {
    pub fn new(tuning: VehicleTuning) -> Self {
        let state = VehicleState {
            heading: tuning.initial_heading,
            ..Default::default()
        };
        Self { tuning, state }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    /// Advance one frame.
    ///
    /// Left wins over right when both are held. Forward and reverse are
    /// applied in that order when both are held, so reverse's clamp is the
    /// one that sticks.
    pub fn tick(&mut self, input: InputState) -> &VehicleState {
        let t = &self.tuning;
        let s = &mut self.state;

        if input.left {
            s.steering = (s.steering + t.steering_rate).min(t.steering_limit);
        } else if input.right {
            s.steering = (s.steering - t.steering_rate).max(-t.steering_limit);
        } else {
            s.steering *= t.steering_decay;
        }

        if input.forward {
            s.speed = (s.speed + t.acceleration).min(t.max_speed);
        }
        if input.reverse {
            s.speed = (s.speed - t.reverse_acceleration).max(t.max_reverse_speed);
        }
        if !input.forward && !input.reverse {
            s.speed *= t.coast_decay;
        }

        s.heading += s.steering * s.speed * t.turn_gain;

        if s.steering.abs() > t.drift_threshold {
            let push = s.steering * s.speed * t.drift_gain;
            s.drift.x += s.heading.cos() * push;
            s.drift.y += -s.heading.sin() * push;
        }
        s.drift *= t.drift_decay;

        let mut step = Vec3::new(-s.heading.sin() * s.speed, 0.0, -s.heading.cos() * s.speed);
        if t.apply_drift {
            step.x += s.drift.x;
            step.z += s.drift.y;
        }
        s.position += step;

        &self.state
    }

    /// Speed as shown on the speedometer.
    pub fn speed_readout(&self) -> i32 {
        (self.state.speed * 100.0).round() as i32
    }

    /// Steering-wheel rotation about its axis, in radians.
    pub fn wheel_rotation(&self) -> f32 {
        self.state.steering * self.tuning.wheel_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: &mut VehicleMotionModel, input: InputState, ticks: usize) {
        for _ in 0..ticks {
            model.tick(input);
        }
    }

    #[test]
    fn test_initial_state_faces_plus_z() {
        let model = VehicleMotionModel::default();
        let state = model.state();
        assert!((state.heading - PI).abs() < f32::EPSILON);
        assert_eq!(state.speed, 0.0);
        let fwd = state.forward();
        assert!(fwd.x.abs() < 1e-6 && (fwd.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_reaches_clamp_at_tick_64() {
        let mut model = VehicleMotionModel::default();
        for tick in 1..=100 {
            let speed = model.tick(InputState::forward()).speed;
            if tick < 64 {
                assert!(speed < 0.35, "tick {tick}: {speed}");
            } else {
                assert_eq!(speed, 0.35, "tick {tick}");
            }
        }
        assert_eq!(model.speed_readout(), 35);
    }

    #[test]
    fn test_reverse_clamps_at_max_reverse() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::reverse(), 200);
        assert_eq!(model.state().speed, -0.30);
        assert_eq!(model.speed_readout(), -30);
    }

    #[test]
    fn test_forward_and_reverse_applies_both_in_order() {
        let mut model = VehicleMotionModel::default();
        let speed = model.tick(InputState::forward().with_reverse()).speed;
        assert!((speed - (0.0055 - 0.005)).abs() < 1e-7);

        // At the forward clamp, reverse still pulls speed down afterwards.
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::forward(), 80);
        let speed = model.tick(InputState::forward().with_reverse()).speed;
        assert!((speed - (0.35 - 0.005)).abs() < 1e-6);
    }

    #[test]
    fn test_steering_clamps_and_left_wins() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::IDLE.with_left(), 100);
        assert_eq!(model.state().steering, 0.1);

        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::IDLE.with_right(), 100);
        assert_eq!(model.state().steering, -0.1);

        let mut model = VehicleMotionModel::default();
        model.tick(InputState::IDLE.with_left().with_right());
        assert!(model.state().steering > 0.0);
    }

    #[test]
    fn test_steering_decays_without_reaching_zero() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::IDLE.with_left(), 50);
        let mut prev = model.state().steering;
        for _ in 0..100 {
            let s = model.tick(InputState::IDLE).steering;
            assert!(s < prev && s > 0.0);
            prev = s;
        }
    }

    #[test]
    fn test_no_turning_while_stationary() {
        let mut model = VehicleMotionModel::default();
        let before = *model.state();
        run(&mut model, InputState::IDLE.with_left(), 60);
        let after = model.state();
        assert_eq!(after.heading, before.heading);
        assert_eq!(after.position, before.position);
        assert_eq!(after.drift, Vec2::ZERO);
    }

    #[test]
    fn test_turning_direction_follows_steering_sign() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::forward(), 20);
        let h0 = model.state().heading;
        run(&mut model, InputState::forward().with_left(), 10);
        assert!(model.state().heading > h0);

        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::forward(), 20);
        let h0 = model.state().heading;
        run(&mut model, InputState::forward().with_right(), 10);
        assert!(model.state().heading < h0);
    }

    #[test]
    fn test_straight_line_motion_along_heading() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::forward(), 10);
        let p = model.state().position;
        // heading PI moves toward +Z
        assert!(p.x.abs() < 1e-5);
        assert!(p.z > 0.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_drift_only_above_threshold() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::forward(), 64);
        // 29 ticks of left: steering 0.058, still under the threshold.
        run(&mut model, InputState::forward().with_left(), 29);
        assert_eq!(model.state().drift, Vec2::ZERO);
        run(&mut model, InputState::forward().with_left(), 5);
        assert_ne!(model.state().drift, Vec2::ZERO);
    }

    #[test]
    fn test_drift_toggle_changes_path_only() {
        let script = |model: &mut VehicleMotionModel| {
            run(model, InputState::forward(), 64);
            run(model, InputState::forward().with_left(), 60);
        };
        let mut with_drift = VehicleMotionModel::default();
        let mut without = VehicleMotionModel::new(VehicleTuning {
            apply_drift: false,
            ..Default::default()
        });
        script(&mut with_drift);
        script(&mut without);
        assert_eq!(with_drift.state().heading, without.state().heading);
        assert_eq!(with_drift.state().drift, without.state().drift);
        assert_ne!(with_drift.state().position, without.state().position);
    }

    #[test]
    fn test_wheel_rotation_scales_steering() {
        let mut model = VehicleMotionModel::default();
        run(&mut model, InputState::IDLE.with_left(), 100);
        assert!((model.wheel_rotation() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_right_is_perpendicular_to_forward() {
        let state = VehicleState {
            heading: 0.7,
            ..Default::default()
        };
        assert!(state.forward().dot(state.right()).abs() < 1e-6);
        // Facing -Z, right is +X.
        let state = VehicleState::default();
        assert!((state.right().x - 1.0).abs() < 1e-6);
    }
}
