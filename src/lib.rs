pub mod assists;
pub mod calibration;
pub mod constants;
pub mod error;
pub mod slip;
pub mod tire_model;

pub use calibration::{
    default_calibration, Axis, AxisCoefficients, TireCalibration, TireCalibrationInit,
    DEFAULT_CALIBRATION,
};
pub use error::{Result, TireError};
pub use tire_model::{evaluate_force, ContactPatchState, ForceResult, TireForceModel};
