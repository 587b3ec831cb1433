use thiserror::Error;

use crate::domain::Role;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("invalid {field} `{value}`")]
    InvalidArgument { field: &'static str, value: String },
    #[error("role `{role}` cannot initiate approval requests")]
    NotAuthorizedToInitiate { role: Role },
    #[error("policy integrity violation: {0}")]
    IntegrityViolation(String),
}

impl PolicyError {
    pub fn invalid_argument(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArgument { field, value: value.into() }
    }

    /// Stable snake_case class used in machine-readable command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotAuthorizedToInitiate { .. } => "not_authorized_to_initiate",
            Self::IntegrityViolation(_) => "integrity_violation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => {
                "The request named an unknown role, resource, action, category, or amount."
            }
            Self::NotAuthorizedToInitiate { .. } => {
                "This role is not allowed to start an approval request."
            }
            Self::IntegrityViolation(_) => "The permission tables failed their startup self-check.",
        }
    }
}
