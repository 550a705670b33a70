//! Error types surfaced by the interaction hint controller.
use std::fmt;

/// Failure reported by a single interaction listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener failed: {}", self.message)
    }
}

impl std::error::Error for ListenerError {}

/// Returned by `interact()` once cleanup has run despite listener failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractError {
    Listener { failed: usize, first: ListenerError },
}

impl InteractError {
    pub fn listener(failed: usize, first: ListenerError) -> Self {
        Self::Listener { failed, first }
    }
}

impl fmt::Display for InteractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listener { failed, first } => {
                write!(f, "{} interaction listener(s) failed; first: {}", failed, first)
            }
        }
    }
}

impl std::error::Error for InteractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listener { first, .. } => Some(first),
        }
    }
}

/// Rejected hint tunables.
#[derive(Debug, Clone, PartialEq)]
pub enum HintSettingsError {
    Negative { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
}

impl fmt::Display for HintSettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            Self::NonFinite { field } => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for HintSettingsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn interact_error_exposes_first_failure() {
        let error = InteractError::listener(2, ListenerError::new("door jammed"));
        assert!(error.to_string().contains("2 interaction listener(s)"));
        assert!(error.to_string().contains("door jammed"));

        let source = error.source().expect("listener error should be the source");
        assert_eq!(source.to_string(), "listener failed: door jammed");
    }

    #[test]
    fn settings_error_names_the_field() {
        let error = HintSettingsError::Negative {
            field: "fade_duration",
            value: -0.5,
        };
        assert!(error.to_string().starts_with("fade_duration"));
        assert!(HintSettingsError::NonFinite { field: "offset" }
            .to_string()
            .contains("finite"));
    }
}
