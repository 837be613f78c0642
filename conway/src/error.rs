// error.rs - Error types for the conway crate

use crate::config::ConfigError;

pub type ConwayResult<T> = Result<T, ConwayError>;

#[derive(Debug, thiserror::Error)]
pub enum ConwayError {
    /// Grid dimensions must both be at least 1.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_message_names_both_sides() {
        let err = ConwayError::InvalidDimensions { width: 0, height: 7 };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x7: both must be at least 1"
        );
    }

    #[test]
    fn config_errors_pass_through() {
        let err: ConwayError = ConfigError::invalid("zoom_step must be positive").into();
        assert!(err.to_string().contains("zoom_step must be positive"));
    }
}
