//! Error types for tape, delay and sequencer construction.

use thiserror::Error;

/// Errors raised while building a tape, delay line or sequencer.
///
/// Everything that can go wrong *after* construction (out-of-range writes,
/// reads past the recorded history, searches that find nothing) is a
/// defined outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TapeError {
    /// No blend functions are registered for the value type and none were
    /// supplied explicitly.
    #[error("type `{type_name}` has no registered blend functions; register it or pass BlendFns explicitly")]
    TypeNotRegistered { type_name: &'static str },

    /// A construction parameter is outside its valid range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl TapeError {
    pub(crate) fn not_registered<T>() -> Self {
        TapeError::TypeNotRegistered {
            type_name: std::any::type_name::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_registered_names_the_type() {
        let err = TapeError::not_registered::<String>();
        let message = err.to_string();
        assert!(message.contains("alloc::string::String"), "{message}");
    }

    #[test]
    fn invalid_parameter_display() {
        let err = TapeError::InvalidParameter {
            name: "max_time",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "invalid max_time: -1");
    }
}
