#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AbsInit {
    /// Braking slip ratio (negative) below which pressure is released.
    pub desired_slip_ratio: f64,
    /// Hub speed below which the assist stays inactive, in m/s.
    pub min_velocity: f64,
}

impl AbsInit {
    pub fn build(&self) -> Abs {
        let Self {
            desired_slip_ratio,
            min_velocity,
        } = *self;

        Abs {
            is_enabled: true,
            desired_slip_ratio,
            min_velocity,
        }
    }
}

/// Anti-lock braking. Releases brake pressure while the wheel slips harder
/// than `desired_slip_ratio`, unless the vehicle is slower than
/// `min_velocity`.
#[derive(Debug, Clone)]
pub struct Abs {
    pub is_enabled: bool,
    pub desired_slip_ratio: f64,
    pub min_velocity: f64,
}

impl Abs {
    pub fn pressure(&self, pressure: f64, velocity: f64, slip_ratio: f64) -> f64 {
        let Self {
            is_enabled,
            desired_slip_ratio,
            min_velocity,
        } = *self;

        let is_locking = slip_ratio < desired_slip_ratio;
        let is_moving = velocity.abs() >= min_velocity;

        if is_enabled && is_locking && is_moving {
            trace!(slip_ratio, velocity, "abs released brake pressure");
            0.0
        } else {
            pressure
        }
    }
}
