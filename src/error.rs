pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create error for a state-track query starting outside the scanned text
pub fn position_out_of_range(start: usize, len: usize) -> AppError {
    AppError::bad_request(format!(
        "Start position {} is out of range for command text of length {}",
        start, len
    ))
}

/// Create error for a state-track query with no states to look for
pub fn empty_state_set() -> AppError {
    AppError::bad_request("At least one lexical state is required")
}

/// Create parameter definition error
pub fn parameter_error(name: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Invalid parameter '{}': {}", name, message.into()))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}
