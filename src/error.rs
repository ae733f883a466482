//! Error types for the deployer
//!
//! Every failure the tool can report is a variant here; each variant knows the
//! process exit code it maps to.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful or purely informational run
pub const EXIT_OK: u8 = 0;
/// Exit code for generic failures
pub const EXIT_FAILED: u8 = 1;
/// Exit code for missing or nonexistent input files
pub const EXIT_INVALID_ARGS: u8 = 2;

/// Main error type for the deployer
#[derive(Error, Debug)]
pub enum DeployError {
    /// A required input file flag was not supplied
    #[error("{message}")]
    MissingFile { message: String },

    /// A supplied input file does not exist on disk
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A required positional argument was not supplied
    #[error("{message}")]
    MissingArgument { message: String },

    /// The action keyword is not one of the supported verbs
    #[error("Not supported action: {action}")]
    UnsupportedAction { action: String },

    /// A parameter has an unusable value
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The inventory file is malformed
    #[error("Inventory parsing error at {}:{line}: {message}", path.display())]
    InventoryParse {
        message: String,
        path: PathBuf,
        line: usize,
    },

    /// The operation file is not valid YAML
    #[error("Operation file parsing error in {}", path.display())]
    OperationParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No usable hostname was found in an inventory section
    #[error("Could not get a single hostname from section [{section}] of {}", path.display())]
    Extraction { section: String, path: PathBuf },

    /// File system operation errors
    #[error("File system error: {operation} failed on {}", path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process execution errors
    #[error("Process error: {command} failed")]
    Process {
        command: String,
        exit_code: Option<i32>,
        message: String,
    },
}

impl DeployError {
    /// Create a new missing file error
    pub fn missing_file(message: impl Into<String>) -> Self {
        Self::MissingFile {
            message: message.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new missing argument error
    pub fn missing_argument(message: impl Into<String>) -> Self {
        Self::MissingArgument {
            message: message.into(),
        }
    }

    /// Create a new unsupported action error
    pub fn unsupported_action(action: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new inventory parsing error
    pub fn inventory_parse<P: Into<PathBuf>>(
        message: impl Into<String>,
        path: P,
        line: usize,
    ) -> Self {
        Self::InventoryParse {
            message: message.into(),
            path: path.into(),
            line,
        }
    }

    /// Create a new operation file parsing error
    pub fn operation_parse<P: Into<PathBuf>>(path: P, source: serde_yaml::Error) -> Self {
        Self::OperationParse {
            path: path.into(),
            source,
        }
    }

    /// Create a new hostname extraction error
    pub fn extraction<P: Into<PathBuf>>(section: impl Into<String>, path: P) -> Self {
        Self::Extraction {
            section: section.into(),
            path: path.into(),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new process error
    pub fn process(
        command: impl Into<String>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Process exit code this error terminates the run with
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingFile { .. } | Self::FileNotFound { .. } => EXIT_INVALID_ARGS,
            _ => EXIT_FAILED,
        }
    }

    /// Whether the usage text should be printed along with the error
    #[must_use]
    pub const fn shows_usage(&self) -> bool {
        matches!(self, Self::MissingFile { .. } | Self::MissingArgument { .. })
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_absent_files_are_invalid_args() {
        assert_eq!(DeployError::missing_file("no files").exit_code(), EXIT_INVALID_ARGS);
        assert_eq!(
            DeployError::file_not_found("/nope/hosts").exit_code(),
            EXIT_INVALID_ARGS
        );
    }

    #[test]
    fn test_other_errors_are_generic_failures() {
        assert_eq!(DeployError::missing_argument("action").exit_code(), EXIT_FAILED);
        assert_eq!(DeployError::unsupported_action("destroy").exit_code(), EXIT_FAILED);
        assert_eq!(
            DeployError::extraction("web", "/etc/hosts.ini").exit_code(),
            EXIT_FAILED
        );
    }

    #[test]
    fn test_usage_shown_only_for_missing_input() {
        assert!(DeployError::missing_file("x").shows_usage());
        assert!(DeployError::missing_argument("x").shows_usage());
        assert!(!DeployError::unsupported_action("x").shows_usage());
        assert!(!DeployError::file_not_found("x").shows_usage());
    }

    #[test]
    fn test_display_messages() {
        let err = DeployError::unsupported_action("destroy");
        assert_eq!(err.to_string(), "Not supported action: destroy");

        let err = DeployError::inventory_parse("unterminated section header", "hosts", 3);
        assert_eq!(
            err.to_string(),
            "Inventory parsing error at hosts:3: unterminated section header"
        );
    }
}
