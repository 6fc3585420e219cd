use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sullivan operations
#[derive(Error, Diagnostic, Debug)]
pub enum SullivanError {
    #[error("IO error: {0}")]
    #[diagnostic(code(sullivan::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(sullivan::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(sullivan::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A builder received geometry it cannot work with. Fatal to the call.
    #[error("Contract violation: {message}")]
    #[diagnostic(code(sullivan::contract))]
    Contract {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(sullivan::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(sullivan::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SullivanError>;
