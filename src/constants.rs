use std::f64::consts::PI;

pub const DEFAULT_BX: f64 = 1.9;
pub const DEFAULT_BY: f64 = 9.0;
pub const DEFAULT_CX: f64 = 1.65;
pub const DEFAULT_CY: f64 = 1.36;
pub const DEFAULT_DX: f64 = 1.1;
pub const DEFAULT_DY: f64 = 1.0;
pub const DEFAULT_EX: f64 = -1.0;
pub const DEFAULT_EY: f64 = 0.96;
pub const DEFAULT_SVX: f64 = 0.0;
pub const DEFAULT_SVY: f64 = 0.0;
pub const DEFAULT_SHX: f64 = 0.0;
pub const DEFAULT_SHY: f64 = 0.0;

/// Slip ratio at which the reference longitudinal curve is normalized.
pub const DEFAULT_PEAK_SLIP_X: f64 = 0.4;

pub const DEFAULT_PEAK_SLIP_ANGLE_DEGREES: f64 = 20.0;

pub const DEFAULT_PEAK_SLIP_Y: f64 = DEFAULT_PEAK_SLIP_ANGLE_DEGREES * PI / 180.0;

pub const SLIP_EPSILON: f64 = f64::EPSILON;
