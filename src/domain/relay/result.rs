//! The uniform result every adapter call returns.

use crate::domain::foundation::RelayError;

/// Successful provider output before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Generated text, or an image reference for image adapters.
    pub text: String,
    /// Model that produced the output.
    pub model: String,
}

impl Completion {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

/// Success or failure, independent of which provider handled the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResult {
    Success { text: String, model_used: String },
    Failure { error_message: String },
}

impl NormalizedResult {
    pub fn success(text: impl Into<String>, model_used: impl Into<String>) -> Self {
        Self::Success {
            text: text.into(),
            model_used: model_used.into(),
        }
    }

    /// Builds a failure from any relay error; the error's display text becomes the message.
    pub fn failure(error: RelayError) -> Self {
        Self::Failure {
            error_message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Generated text, if successful.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    pub fn model_used(&self) -> Option<&str> {
        match self {
            Self::Success { model_used, .. } => Some(model_used),
            Self::Failure { .. } => None,
        }
    }

    /// Error message, if failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_message } => Some(error_message),
        }
    }
}

impl From<Result<Completion, RelayError>> for NormalizedResult {
    fn from(result: Result<Completion, RelayError>) -> Self {
        match result {
            Ok(completion) => Self::success(completion.text, completion.model),
            Err(err) => Self::failure(err),
        }
    }
}

impl From<RelayError> for NormalizedResult {
    fn from(err: RelayError) -> Self {
        Self::failure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_becomes_success() {
        let result: NormalizedResult = Ok(Completion::new("hello", "gpt-4o")).into();
        assert!(result.is_success());
        assert_eq!(result.text(), Some("hello"));
        assert_eq!(result.model_used(), Some("gpt-4o"));
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn err_result_becomes_failure_with_display_text() {
        let result: NormalizedResult =
            Err::<Completion, _>(RelayError::UnknownProvider("foo".into())).into();
        assert!(!result.is_success());
        assert_eq!(result.error_message(), Some("Unknown provider: foo"));
        assert_eq!(result.text(), None);
    }
}
