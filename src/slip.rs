use crate::{constants::SLIP_EPSILON, tire_model::ForceResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

pub fn hub_velocity(velocity_cog: Vector2, yaw_rate: f64, position: Vector2) -> Vector2 {
    Vector2 {
        x: velocity_cog.x - yaw_rate * position.y,
        y: velocity_cog.y + yaw_rate * position.x,
    }
}

/// `(w*R - vx) / max(|vx|, |w*R|)`. Positive while driving, negative while
/// braking, bounded by `[-1, 1]` when wheel and hub move the same way.
pub fn slip_ratio(hub_velocity: Vector2, angular_velocity: f64, effective_radius: f64) -> f64 {
    let tread_velocity = angular_velocity * effective_radius;
    let reference = hub_velocity.x.abs().max(tread_velocity.abs());

    if reference < SLIP_EPSILON {
        return 0.0;
    }

    finite_or_zero((tread_velocity - hub_velocity.x) / reference)
}

/// Angle between the hub velocity and the wheel heading, in radians. Zero
/// for a hub standing still.
pub fn slip_angle(hub_velocity: Vector2, wheel_angle: f64) -> f64 {
    finite_or_zero((hub_velocity.y / hub_velocity.x).atan() - wheel_angle)
}

pub fn wheel_slip(
    hub_velocity: Vector2,
    angular_velocity: f64,
    effective_radius: f64,
    wheel_angle: f64,
) -> Vector2 {
    Vector2 {
        x: slip_ratio(hub_velocity, angular_velocity, effective_radius),
        y: slip_angle(hub_velocity, wheel_angle),
    }
}

pub fn reaction_torque(force: ForceResult, effective_radius: f64) -> f64 {
    -force.fx * effective_radius
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
