use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field}: minimum plane count {min} exceeds the maximum {max}")]
    PlaneCount { field: &'static str, min: usize, max: usize },
}

impl ConfigError {
    pub(crate) fn positive(field: &'static str, value: impl Into<f64>) -> Result<(), Self> {
        let value = value.into();
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { field, value })
        }
    }

    pub(crate) fn in_range(field: &'static str, value: impl Into<f64>, min: f64, max: f64) -> Result<(), Self> {
        let value = value.into();
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange { field, value, min, max })
        }
    }
}
