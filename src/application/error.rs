use thiserror::Error;

use crate::domain::{Kind, ParseCentsError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Invalid value '{value}': {reason}")]
    InvalidValue {
        value: String,
        reason: ParseCentsError,
    },

    #[error("Value must not be zero")]
    ZeroValue,

    #[error("Value must not be negative: {0}")]
    NegativeValue(String),

    #[error("Value is too large: the {0} total would overflow")]
    TotalOverflow(Kind),

    #[error("Cannot resolve delete target: {0}")]
    UnresolvedTarget(String),
}

impl AppError {
    /// True for the errors caused by what was typed into the form.
    pub fn is_input_rejection(&self) -> bool {
        !matches!(self, AppError::UnresolvedTarget(_))
    }
}
