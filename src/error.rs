use miette::Diagnostic;
use thiserror::Error;

/// Result type for define operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by configuration loading, the transform driver and the CLI.
///
/// The substitution pass itself never fails: unmatched keys, unset
/// environment variables and unparsable values leave the tree unchanged.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(define::io_error))]
    Io(String),

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(define::config_error))]
    Config { message: String },

    #[error("Invalid define `{arg}`: expected KEY=VALUE")]
    #[diagnostic(
        code(define::invalid_define),
        help("pass definitions as -D 'process.env.NODE_ENV=\"production\"'")
    )]
    InvalidDefine { arg: String },

    #[error("Failed to parse {path}: {message}")]
    #[diagnostic(code(define::parse_error))]
    Parse { path: String, message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(define::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config {
            message: err.to_string(),
        }
    }
}
