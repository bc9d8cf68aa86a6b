//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures, reported through `anyhow`
#[derive(Debug)]
pub enum CliError {
    /// No input file matched
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration file could not be used
    ConfigError(String),
    /// Input is not valid UTF-8
    InvalidEncoding(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidEncoding(source) => write!(f, "Invalid UTF-8 in {source}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("test.txt".to_string()).to_string(),
            "File not found: test.txt"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("unknown field".to_string()).to_string(),
            "Configuration error: unknown field"
        );
        assert_eq!(
            CliError::InvalidEncoding("<stdin>".to_string()).to_string(),
            "Invalid UTF-8 in <stdin>"
        );
    }

    #[test]
    fn test_wraps_into_anyhow() {
        let result: CliResult<()> = Err(CliError::FileNotFound("файл.txt".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("файл.txt"));
    }
}
