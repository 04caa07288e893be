//! Error handling for SeqLab CLI

use std::path::PathBuf;
use thiserror::Error;

use seqlab_core::{AnalysisError, FastaError};

/// Main error type for SeqLab CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Analysis error in {operation}: {message}")]
    Analysis { operation: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }

    pub fn analysis<S: Into<String>>(operation: S, message: S) -> Self {
        Self::Analysis {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<FastaError> for CliError {
    fn from(err: FastaError) -> Self {
        match err {
            FastaError::Io(e) => Self::io(e.to_string()),
            other => Self::invalid_format(other.to_string()),
        }
    }
}

impl From<AnalysisError> for CliError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidArgument(message) => Self::validation(message),
            AnalysisError::EmptyInput(message) => Self::analysis("analysis".to_string(), message),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Compressed FASTA files must use the .gz extension",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • FASTA records must start with a '>' header line\n\
                 • Ensure the file is not corrupted or truncated"
            );
        }

        CliError::Analysis { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Distance and similarity need non-empty sequences\n\
                 • Check the input FASTA for records without sequence lines"
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqlab.toml configuration file\n\
                 • Use 'seqlab config' to generate a sample configuration"
            );
        }

        CliError::Database { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check that the .seqdb file is not corrupted\n\
                 • Try re-importing your FASTA data"
            );
        }

        _ => {}
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("test.fa"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }

    #[test]
    fn test_analysis_error_conversion() {
        let cli_err: CliError = AnalysisError::InvalidArgument("bad window".to_string()).into();
        assert!(matches!(cli_err, CliError::Validation { .. }));

        let cli_err: CliError = AnalysisError::EmptyInput("empty".to_string()).into();
        assert!(matches!(cli_err, CliError::Analysis { .. }));
        assert!(format_error_with_suggestions(&cli_err).contains("non-empty sequences"));
    }
}
