//! Error types and handling for the Farecast application

use thiserror::Error;

/// Main error type for the Farecast application
#[derive(Error, Debug)]
pub enum FarecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Prediction endpoint communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl FarecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FarecastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FarecastError::Api { .. } => {
                "Failed to retrieve prediction. Please try again later.".to_string()
            }
            FarecastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            FarecastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            FarecastError::General { message } => message.clone(),
        }
    }
}
