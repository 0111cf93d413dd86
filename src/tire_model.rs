use crate::{
    calibration::TireCalibration,
    error::{Result, TireError},
};
use noisy_float::types::R64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Instantaneous state of one contact patch. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPatchState {
    pub normal_force: f64,
    pub slip_ratio: f64,
    pub slip_angle: f64,
    pub friction_coefficient: f64,
}

impl ContactPatchState {
    pub fn validate(&self) -> Result<()> {
        let Self {
            normal_force,
            slip_ratio,
            slip_angle,
            friction_coefficient,
        } = *self;

        [
            ("normal_force", normal_force),
            ("slip_ratio", slip_ratio),
            ("slip_angle", slip_angle),
            ("friction_coefficient", friction_coefficient),
        ]
        .into_iter()
        .try_for_each(|(field, value)| match R64::try_new(value) {
            Some(_) => Ok(()),
            None => Err(TireError::not_finite_input(field, value)),
        })
    }

    /// Combined load and friction scale shared by both axes. Negative load or
    /// friction produce no force.
    pub fn grip(&self) -> f64 {
        let load = self.normal_force.max(0.0) * self.friction_coefficient.max(0.0);
        load.min(f64::MAX)
    }
}

/// Contact-patch force, in the units of `normal_force * friction_coefficient`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceResult {
    pub fx: f64,
    pub fy: f64,
}

impl ForceResult {
    pub const ZERO: Self = Self { fx: 0.0, fy: 0.0 };

    pub fn magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

impl From<ForceResult> for [f64; 2] {
    fn from(force: ForceResult) -> Self {
        [force.fx, force.fy]
    }
}

impl From<ForceResult> for (f64, f64) {
    fn from(force: ForceResult) -> Self {
        (force.fx, force.fy)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TireForceModel {
    calibration: TireCalibration,
}

impl TireForceModel {
    pub fn new(calibration: TireCalibration) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> &TireCalibration {
        &self.calibration
    }

    /// Computes `(Fx, Fy)` for one contact patch.
    ///
    /// Each axis evaluates its own curve on its own normalized slip; both are
    /// then scaled by `normal_force * friction_coefficient`. Only non-finite
    /// inputs are rejected. Every finite input yields a finite force, and zero
    /// load or zero friction yields [ForceResult::ZERO].
    pub fn force(
        &self,
        normal_force: f64,
        slip_ratio: f64,
        slip_angle: f64,
        friction_coefficient: f64,
    ) -> Result<ForceResult> {
        self.force_at(&ContactPatchState {
            normal_force,
            slip_ratio,
            slip_angle,
            friction_coefficient,
        })
    }

    pub fn force_at(&self, state: &ContactPatchState) -> Result<ForceResult> {
        if let Err(err) = state.validate() {
            debug!(%err, "rejected contact patch state");
            return Err(err);
        }

        let grip = state.grip();
        if grip == 0.0 {
            return Ok(ForceResult::ZERO);
        }

        let Self { calibration } = self;
        let fx = calibration.longitudinal().curve(state.slip_ratio) * grip;
        let fy = calibration.lateral().curve(state.slip_angle) * grip;

        Ok(ForceResult {
            fx: fx.clamp(-f64::MAX, f64::MAX),
            fy: fy.clamp(-f64::MAX, f64::MAX),
        })
    }
}

impl From<TireCalibration> for TireForceModel {
    fn from(calibration: TireCalibration) -> Self {
        Self::new(calibration)
    }
}

pub fn evaluate_force(
    calibration: &TireCalibration,
    normal_force: f64,
    slip_ratio: f64,
    slip_angle: f64,
    friction_coefficient: f64,
) -> Result<ForceResult> {
    TireForceModel::new(*calibration).force(
        normal_force,
        slip_ratio,
        slip_angle,
        friction_coefficient,
    )
}
