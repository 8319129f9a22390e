//! Transient user-facing notices derived from store errors.

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-shot message for the user. Stores never panic through to the
/// caller; every failure becomes a notice and the caller decides how long
/// to show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        let level = match err {
            AppError::Validation(_) | AppError::NotAuthenticated => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        let message = match err {
            AppError::NotAuthenticated => "Please log in first.".to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::NotFound(message) => message.clone(),
            AppError::Remote(message) => format!("The server rejected the operation: {message}"),
            AppError::Http(err) if err.is_timeout() => {
                "The server took too long to answer.".to_string()
            }
            AppError::Http(_) => "The server could not be reached.".to_string(),
            other => other.to_string(),
        };
        Self { level, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_warnings_with_the_original_message() {
        let err = AppError::Validation("amount must be a positive amount".to_string());
        let notice = Notice::from(&err);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "amount must be a positive amount");
    }

    #[test]
    fn missing_session_reads_as_a_login_prompt() {
        let notice = Notice::from(&AppError::NotAuthenticated);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Please log in first.");
    }
}
