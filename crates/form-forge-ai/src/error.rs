use std::fmt;
use std::time::Duration;

/// Errors returned by an assistant.
///
/// None of these abort a conversion; callers turn them into a message
/// with [`AssistError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssistError {
    /// No provider credentials or an unusable client configuration.
    NotConfigured { reason: String },
    /// The provider did not answer within the configured bound.
    Timeout { after: Duration },
    /// The provider answered with an error or could not be reached.
    Provider { reason: String },
    /// The provider answered with something that is not a completion.
    InvalidResponse { reason: String },
}

impl AssistError {
    #[must_use]
    pub fn not_configured(reason: impl Into<String>) -> Self {
        Self::NotConfigured {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// A one-line message suitable for showing in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured { .. } => format!("Assistant not configured: {self}"),
            _ => format!("Assistant unavailable: {self}"),
        }
    }
}

impl fmt::Display for AssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { reason } => write!(f, "{reason}"),
            Self::Timeout { after } => {
                write!(f, "no answer within {:.1}s", after.as_secs_f64())
            }
            Self::Provider { reason } => write!(f, "provider error: {reason}"),
            Self::InvalidResponse { reason } => {
                write!(f, "unexpected provider response: {reason}")
            }
        }
    }
}

impl std::error::Error for AssistError {}
