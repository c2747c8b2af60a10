//! Error types for de-embedding runs

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type for de-embedding operations
pub type Result<T> = std::result::Result<T, DeembedError>;

/// Errors that can occur while reading, resolving, de-embedding or writing
#[derive(Error, Debug)]
pub enum DeembedError {
    /// A dataset's frequency grid does not line up with the measured sweep
    #[error("Frequency mismatch in {context}: {reason}")]
    FrequencyMismatch { context: String, reason: String },

    /// A load argument is neither a complex literal nor a one-port dataset
    #[error("Invalid load specification '{input}': {reason}")]
    InvalidLoadSpecification { input: String, reason: String },

    /// A touchstone file could not be parsed
    #[error("{}", format_file_error(.path, .line, .message))]
    FileFormat {
        path: String,
        line: Option<usize>,
        message: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Parameter conversion hit a non-invertible matrix
    #[error("Singular matrix in {conversion} conversion at point {index} ({freq} Hz)")]
    SingularMatrix {
        conversion: &'static str,
        index: usize,
        freq: f64,
    },

    /// Load impedance of exactly zero has no admittance
    #[error("Zero load impedance on port {port} at point {index} ({freq} Hz)")]
    ZeroImpedance { port: usize, index: usize, freq: f64 },

    /// Network does not have the number of ports an operation needs
    #[error("{context}: expected {expected} port(s), found {found}")]
    PortCount {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Run configuration is incomplete or out of range
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),
}

fn format_file_error(path: &str, line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("File format error in {path} at line {line}: {message}"),
        None => format!("File format error in {path}: {message}"),
    }
}

impl DeembedError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        DeembedError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn file_format(path: &str, line: Option<usize>, message: impl Into<String>) -> Self {
        DeembedError::FileFormat {
            path: path.to_string(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_load(input: &str, reason: impl Into<String>) -> Self {
        DeembedError::InvalidLoadSpecification {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_format_message_with_line() {
        let err = DeembedError::file_format("meas.s2p", Some(7), "expected number");
        assert_eq!(
            err.to_string(),
            "File format error in meas.s2p at line 7: expected number"
        );

        let err = DeembedError::file_format("meas.s2p", None, "no data");
        assert_eq!(err.to_string(), "File format error in meas.s2p: no data");
    }

    #[test]
    fn invalid_load_message() {
        let err = DeembedError::invalid_load("abc", "not a complex number");
        assert_eq!(
            err.to_string(),
            "Invalid load specification 'abc': not a complex number"
        );
    }
}
