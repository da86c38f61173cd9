//! Error types for the simulation core.

use thiserror::Error;

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// A non-finite number reached the simulation state or its input.
    /// The tick that saw it is not applied.
    #[error("invalid simulation state: {field} = {value}")]
    InvalidState { field: &'static str, value: f32 },

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown theme: {name}")]
    UnknownTheme { name: String },

    #[cfg(feature = "serde_json")]
    #[error("could not parse JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SimError {
    /// Precondition violations mean the caller fed garbage; config and theme
    /// errors can be fixed by picking another value.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, SimError::InvalidState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::InvalidState {
            field: "ball.pos.x",
            value: f32::NAN,
        };
        assert_eq!(err.to_string(), "invalid simulation state: ball.pos.x = NaN");
        assert!(err.is_precondition_violation());

        let err = SimError::UnknownTheme {
            name: "neon".to_string(),
        };
        assert_eq!(err.to_string(), "unknown theme: neon");
        assert!(!err.is_precondition_violation());
    }
}
