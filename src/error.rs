//! Error types for report generation and the AI backend client.
//!
//! Only `ReportError::MissingRequiredField` can come out of a build. PDF and
//! I/O failures belong to serialization and export, which run afterwards.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the verification code-image generator. Always recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Payload too large for code image: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Code image generation failed: {0}")]
    Generation(String),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot connect to AI backend at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Request encoding error: {0}")]
    Request(String),

    #[error("AI backend returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("AI backend reported failure: {0}")]
    Upstream(String),

    #[error("AI backend returned no data")]
    EmptyData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ReportError::MissingRequiredField {
            field: "patient.personal.name",
        };
        assert_eq!(err.to_string(), "Missing required field: patient.personal.name");
    }

    #[test]
    fn backend_status_message() {
        let err = BackendError::Status {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }
}
