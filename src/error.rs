//! Structured error types for store and controller operations.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    MissingRequiredField,
    InvalidFilter,

    // Not found errors
    TaskNotFound,
    IndexOutOfRange,

    // Internal errors
    DatabaseError,
    InternalError,
}

/// Structured error carried across the store/controller boundary.
#[derive(Debug, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFilter, reason)
    }

    pub fn task_not_found(task_id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {}", task_id))
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            ErrorCode::IndexOutOfRange,
            format!("Position {} out of range (list has {} tasks)", index, len),
        )
    }

    pub fn database(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }

    /// Storage-layer failures are fatal for the current session; everything
    /// else is recovered at the controller boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, ErrorCode::DatabaseError | ErrorCode::InternalError)
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::MissingRequiredField | ErrorCode::InvalidFilter
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Try to downcast to AppError first
        match err.downcast::<AppError>() {
            Ok(app_err) => app_err,
            Err(err) => match err.downcast::<rusqlite::Error>() {
                Ok(db_err) => AppError::database(db_err),
                Err(err) => AppError::internal(err),
            },
        }
    }
}

/// Result type for controller operations.
pub type AppResult<T> = std::result::Result<T, AppError>;
