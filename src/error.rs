use thiserror::Error;

pub type Result<T, E = TireError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TireError {
    /// A calibration coefficient is unusable. Raised at construction time only.
    #[error("invalid calibration: {field} = {value} ({reason})")]
    InvalidCalibration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid input: {field} = {value} is not finite")]
    InvalidInput { field: &'static str, value: f64 },
}

impl TireError {
    pub const fn not_finite_coefficient(field: &'static str, value: f64) -> Self {
        Self::InvalidCalibration {
            field,
            value,
            reason: "coefficient must be finite",
        }
    }

    pub const fn non_positive_peak_slip(field: &'static str, value: f64) -> Self {
        Self::InvalidCalibration {
            field,
            value,
            reason: "peak slip must be positive",
        }
    }

    pub const fn not_finite_input(field: &'static str, value: f64) -> Self {
        Self::InvalidInput { field, value }
    }

    pub fn field(&self) -> &'static str {
        match *self {
            Self::InvalidCalibration { field, .. } | Self::InvalidInput { field, .. } => field,
        }
    }
}
