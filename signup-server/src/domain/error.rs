use actix_web::{ResponseError, http::StatusCode};
use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
    #[error("Could not write to JSON file")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Messages safe to show to the person filling the form.
    pub fn messages(&self) -> Vec<String> {
        match self {
            DomainError::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            DomainError::Storage(_) => vec![self.to_string()],
            DomainError::Internal(_) => vec!["Something went wrong".to_string()],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Storage(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
