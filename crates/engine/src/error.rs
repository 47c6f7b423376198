//! The module contains the error the engine can throw.
//!
//! Every variant maps to one [`ErrorKind`], so callers can branch on the kind
//! of failure without matching on messages:
//!
//! - [`KeyNotFound`] an asset/user/invitation/partnership does not exist (or
//!   is not visible to the acting user).
//! - [`InvalidState`] an invitation is no longer pending or has expired.
//! - [`CapacityExceeded`] a share would push an asset past 100%.
//! - [`Validation`] malformed input.
//! - [`Consistency`] stored partnership data is already inconsistent.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidState`]: EngineError::InvalidState
//!  [`CapacityExceeded`]: EngineError::CapacityExceeded
//!  [`Validation`]: EngineError::Validation
//!  [`Consistency`]: EngineError::Consistency
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Inconsistent partnership data: {0}")]
    Consistency(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Machine-distinguishable category of an [`EngineError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidState,
    CapacityExceeded,
    Validation,
    Consistency,
    Database,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound(_) => ErrorKind::NotFound,
            Self::ExistingKey(_) => ErrorKind::Conflict,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Consistency(_) => ErrorKind::Consistency,
            Self::Database(_) => ErrorKind::Database,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::CapacityExceeded(a), Self::CapacityExceeded(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Consistency(a), Self::Consistency(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(
            EngineError::KeyNotFound("asset not exists".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EngineError::CapacityExceeded("full".to_string()).kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(
            EngineError::Database(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Database
        );
    }

    #[test]
    fn display_keeps_message() {
        let err = EngineError::InvalidState("invitation already accepted".to_string());
        assert_eq!(err.to_string(), "Invalid state: invitation already accepted");
    }
}
