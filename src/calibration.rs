use crate::{
    constants::{
        DEFAULT_BX, DEFAULT_BY, DEFAULT_CX, DEFAULT_CY, DEFAULT_DX, DEFAULT_DY, DEFAULT_EX,
        DEFAULT_EY, DEFAULT_PEAK_SLIP_X, DEFAULT_PEAK_SLIP_Y, DEFAULT_SHX, DEFAULT_SHY,
        DEFAULT_SVX, DEFAULT_SVY,
    },
    error::{Result, TireError},
};
use noisy_float::types::R64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reference calibration, usable as a regression fixture and as a starting
/// point for tuning.
pub const DEFAULT_CALIBRATION: TireCalibration = TireCalibration {
    longitudinal: AxisCoefficients {
        stiffness: DEFAULT_BX,
        shape: DEFAULT_CX,
        peak: DEFAULT_DX,
        curvature: DEFAULT_EX,
        vertical_shift: DEFAULT_SVX,
        horizontal_shift: DEFAULT_SHX,
        peak_slip: DEFAULT_PEAK_SLIP_X,
    },
    lateral: AxisCoefficients {
        stiffness: DEFAULT_BY,
        shape: DEFAULT_CY,
        peak: DEFAULT_DY,
        curvature: DEFAULT_EY,
        vertical_shift: DEFAULT_SVY,
        horizontal_shift: DEFAULT_SHY,
        peak_slip: DEFAULT_PEAK_SLIP_Y,
    },
};

pub fn default_calibration() -> TireCalibration {
    DEFAULT_CALIBRATION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Longitudinal,
    Lateral,
}

impl Axis {
    fn field_names(self) -> [&'static str; 7] {
        match self {
            Axis::Longitudinal => ["bx", "cx", "dx", "ex", "svx", "shx", "peak_slip_x"],
            Axis::Lateral => ["by", "cy", "dy", "ey", "svy", "shy", "peak_slip_y"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisCoefficients {
    pub stiffness: f64,
    pub shape: f64,
    pub peak: f64,
    pub curvature: f64,
    pub vertical_shift: f64,
    pub horizontal_shift: f64,
    /// Must be positive.
    pub peak_slip: f64,
}

impl AxisCoefficients {
    pub fn normalized_slip(&self, slip: f64) -> f64 {
        saturate(slip / self.peak_slip + self.horizontal_shift)
    }

    /// Evaluates `D * sin(C * atan(B*s - E*(B*s - atan(B*s)))) + SV` at the
    /// normalized slip `s`, i.e. the axis force for a unit load and friction.
    ///
    /// Finite for every finite `slip` on a validated axis: overflowing
    /// intermediates saturate at `±f64::MAX` and `atan` absorbs them.
    pub fn curve(&self, slip: f64) -> f64 {
        let Self {
            stiffness,
            shape,
            peak,
            curvature,
            vertical_shift,
            ..
        } = *self;

        let bs = saturate(stiffness * self.normalized_slip(slip));
        let phi = bs - curvature * (bs - bs.atan());
        saturate(peak * (shape * phi.atan()).sin() + vertical_shift)
    }

    fn values(&self) -> [f64; 7] {
        [
            self.stiffness,
            self.shape,
            self.peak,
            self.curvature,
            self.vertical_shift,
            self.horizontal_shift,
            self.peak_slip,
        ]
    }

    fn validate(&self, axis: Axis) -> Result<()> {
        let names = axis.field_names();

        for (field, value) in names.into_iter().zip(self.values()) {
            if R64::try_new(value).is_none() {
                return Err(TireError::not_finite_coefficient(field, value));
            }
        }

        if self.peak_slip <= 0.0 {
            return Err(TireError::non_positive_peak_slip(names[6], self.peak_slip));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TireCalibration {
    longitudinal: AxisCoefficients,
    lateral: AxisCoefficients,
}

impl TireCalibration {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bx: f64,
        by: f64,
        cx: f64,
        cy: f64,
        dx: f64,
        dy: f64,
        ex: f64,
        ey: f64,
        svx: f64,
        svy: f64,
        shx: f64,
        shy: f64,
        peak_slip_x: f64,
        peak_slip_y: f64,
    ) -> Result<Self> {
        TireCalibrationInit {
            bx,
            by,
            cx,
            cy,
            dx,
            dy,
            ex,
            ey,
            svx,
            svy,
            shx,
            shy,
            peak_slip_x,
            peak_slip_y,
        }
        .build()
    }

    pub fn from_axes(longitudinal: AxisCoefficients, lateral: AxisCoefficients) -> Result<Self> {
        let checked = longitudinal
            .validate(Axis::Longitudinal)
            .and_then(|()| lateral.validate(Axis::Lateral));

        if let Err(err) = checked {
            warn!(%err, "rejected tire calibration");
            return Err(err);
        }

        debug!(
            peak_slip_x = longitudinal.peak_slip,
            peak_slip_y = lateral.peak_slip,
            "tire calibration accepted"
        );

        Ok(Self {
            longitudinal,
            lateral,
        })
    }

    pub fn longitudinal(&self) -> &AxisCoefficients {
        &self.longitudinal
    }

    pub fn lateral(&self) -> &AxisCoefficients {
        &self.lateral
    }

    pub fn axis(&self, axis: Axis) -> &AxisCoefficients {
        match axis {
            Axis::Longitudinal => &self.longitudinal,
            Axis::Lateral => &self.lateral,
        }
    }
}

impl Default for TireCalibration {
    fn default() -> Self {
        DEFAULT_CALIBRATION
    }
}

/// Flat, unvalidated calibration parameters. `x` is longitudinal, `y` is
/// lateral. Slip angles are in radians.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TireCalibrationInit {
    pub bx: f64,
    pub by: f64,
    pub cx: f64,
    pub cy: f64,
    pub dx: f64,
    pub dy: f64,
    pub ex: f64,
    pub ey: f64,
    pub svx: f64,
    pub svy: f64,
    pub shx: f64,
    pub shy: f64,
    pub peak_slip_x: f64,
    pub peak_slip_y: f64,
}

impl TireCalibrationInit {
    pub fn build(&self) -> Result<TireCalibration> {
        let Self {
            bx,
            by,
            cx,
            cy,
            dx,
            dy,
            ex,
            ey,
            svx,
            svy,
            shx,
            shy,
            peak_slip_x,
            peak_slip_y,
        } = *self;

        TireCalibration::from_axes(
            AxisCoefficients {
                stiffness: bx,
                shape: cx,
                peak: dx,
                curvature: ex,
                vertical_shift: svx,
                horizontal_shift: shx,
                peak_slip: peak_slip_x,
            },
            AxisCoefficients {
                stiffness: by,
                shape: cy,
                peak: dy,
                curvature: ey,
                vertical_shift: svy,
                horizontal_shift: shy,
                peak_slip: peak_slip_y,
            },
        )
    }
}

impl Default for TireCalibrationInit {
    fn default() -> Self {
        Self::from(&DEFAULT_CALIBRATION)
    }
}

impl From<&TireCalibration> for TireCalibrationInit {
    fn from(calibration: &TireCalibration) -> Self {
        let TireCalibration {
            longitudinal: x,
            lateral: y,
        } = *calibration;

        Self {
            bx: x.stiffness,
            by: y.stiffness,
            cx: x.shape,
            cy: y.shape,
            dx: x.peak,
            dy: y.peak,
            ex: x.curvature,
            ey: y.curvature,
            svx: x.vertical_shift,
            svy: y.vertical_shift,
            shx: x.horizontal_shift,
            shy: y.horizontal_shift,
            peak_slip_x: x.peak_slip,
            peak_slip_y: y.peak_slip,
        }
    }
}

fn saturate(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}
