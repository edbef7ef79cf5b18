//! Operator-facing messages
//!
//! Every user-triggered action ends in zero or more notices which the desktop
//! surface shows as a message box.

use crate::error::ClientError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "Info"),
            NoticeLevel::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Error notice for a failed action. Precondition failures are shown
    /// as-is; field and database failures get the action prefix
    /// (`Insert failed: Field 'Name' is required.`)
    pub fn failure(prefix: &str, err: &ClientError) -> Self {
        match err.as_input() {
            Some(input) if input.is_precondition() => Self::error(input.to_string()),
            _ => Self::error(format!("{}: {}", prefix, err)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn failure_prefixes_store_errors_only() {
        let err = ClientError::Store("Cannot add or update a child row".to_string());
        let notice = Notice::failure("Insert failed", &err);
        assert!(notice.is_error());
        assert_eq!(notice.text, "Insert failed: Cannot add or update a child row");

        let err: ClientError = InputError::NoRowSelected { action: "update" }.into();
        assert_eq!(
            Notice::failure("Update failed", &err).text,
            "Select a row to update."
        );

        let err: ClientError = InputError::RequiredField {
            label: "Name".to_string(),
        }
        .into();
        assert_eq!(
            Notice::failure("Insert failed", &err).text,
            "Insert failed: Field 'Name' is required."
        );
    }
}
