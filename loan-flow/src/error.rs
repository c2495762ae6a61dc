use thiserror::Error;

use crate::form::Field;

/// Errors raised by the loan-flow library.
///
/// Submission outcomes are never errors: transport failures and
/// service-reported failures both resolve to a [`crate::Prediction`].
#[derive(Error, Debug)]
pub enum LoanFlowError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Form is incomplete, missing: {}", format_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, LoanFlowError>;
