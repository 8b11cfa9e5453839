use reqwest::StatusCode;
use thiserror::Error;

/// Create-export input problems, caught before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Invalid {field} time: {value}")]
    InvalidTime { field: &'static str, value: String },

    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("Unknown camera: {0}")]
    UnknownCamera(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{}", api_error_text(.status, .message))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn api_error_text(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(msg) => msg.to_string(),
        None => format!("Request failed with status code {}", status.as_u16()),
    }
}

impl AppError {
    /// `message` field of the backend error body, if it carried one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user: backend message when present, else the transport error
    pub fn user_message(&self) -> String {
        match self.backend_message() {
            Some(msg) => msg.to_string(),
            None => match self {
                AppError::Http(e) => e.to_string(),
                AppError::Validation(e) => e.to_string(),
                other => other.to_string(),
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
