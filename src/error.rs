//! Errors raised while loading or validating locomotion configuration.
//!
//! Simulation itself never fails: unavailable charges, missing ground and
//! degenerate geometry are all policy no-ops. Only configuration is fallible.

/// Error produced by [`LocomotionConfig`](crate::config::LocomotionConfig) loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O while reading locomotion config: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_error_message_names_field() {
        let err = ConfigError::invalid("speed.walk_speed", "must be finite");
        assert_eq!(
            err.to_string(),
            "invalid value for 'speed.walk_speed': must be finite"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
