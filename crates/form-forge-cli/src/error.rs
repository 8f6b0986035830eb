use std::path::PathBuf;

use form_forge_core::ConvertError;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments / usage error
/// - 3: input cannot be decoded as text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    EncodingError = 3,
}

/// Errors returned by CLI command handlers.
///
/// Malformed definition or metadata content is never an error here; it is
/// recovered by the parsers and reported as warnings.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file is not UTF-8 text.
    #[error("{file}: {source}")]
    Encoding {
        file: PathBuf,
        #[source]
        source: ConvertError,
    },

    /// IO errors (file not found, permission denied).
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// No definition files under the given path.
    #[error("no definition files found in {path}")]
    NoDefinitionFiles { path: PathBuf },

    /// The `--context` file could not be used as a form document.
    #[error("invalid context {path}: {message}")]
    InvalidContext { path: PathBuf, message: String },

    /// User cancelled operation.
    #[error("operation cancelled")]
    Cancelled,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Encoding { .. } => ExitCode::EncodingError,
            Self::Config { .. } | Self::NoDefinitionFiles { .. } | Self::InvalidContext { .. } => {
                ExitCode::InvalidArguments
            }
            Self::Io { .. } | Self::Cancelled | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Encoding { file, source } => {
                let mut json = serde_json::json!({
                    "error": "encoding_error",
                    "file": file.display().to_string(),
                    "message": source.to_string(),
                });
                if let ConvertError::InvalidEncoding { input, valid_up_to } = source {
                    json["input"] = input.to_string().into();
                    json["validUpTo"] = (*valid_up_to).into();
                }
                json
            }
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            Self::InvalidContext { path, message } => serde_json::json!({
                "error": "invalid_context",
                "path": path.display().to_string(),
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_forge_core::InputKind;

    fn encoding_error() -> CliError {
        CliError::Encoding {
            file: PathBuf::from("buytyp.info"),
            source: ConvertError::InvalidEncoding {
                input: InputKind::Metadata,
                valid_up_to: 7,
            },
        }
    }

    #[test]
    fn encoding_error_exit_code() {
        assert_eq!(encoding_error().exit_code(), ExitCode::EncodingError);
        assert_eq!(encoding_error().exit_code() as i32, 3);
    }

    #[test]
    fn encoding_error_json() {
        let json = encoding_error().to_json();
        assert_eq!(json["error"], "encoding_error");
        assert_eq!(json["file"], "buytyp.info");
        assert_eq!(json["input"], "metadata file");
        assert_eq!(json["validUpTo"], 7);
    }

    #[test]
    fn encoding_error_display_names_file() {
        let msg = encoding_error().to_string();
        assert!(msg.starts_with("buytyp.info: metadata file is not valid UTF-8"));
    }

    #[test]
    fn io_error_exit_code_and_json() {
        let err = CliError::Io {
            path: PathBuf::from("/missing.dfm"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
        let json = err.to_json();
        assert_eq!(json["error"], "io_error");
        assert_eq!(json["path"], "/missing.dfm");
    }

    #[test]
    fn usage_errors_exit_code() {
        let errors = [
            CliError::Config {
                message: "bad".into(),
            },
            CliError::NoDefinitionFiles {
                path: PathBuf::from("forms/"),
            },
            CliError::InvalidContext {
                path: PathBuf::from("doc.json"),
                message: "expected value".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), ExitCode::InvalidArguments);
        }
    }

    #[test]
    fn cancelled_and_other_json() {
        assert_eq!(CliError::Cancelled.exit_code(), ExitCode::GeneralError);
        let json = CliError::Other("boom".into()).to_json();
        assert_eq!(json["error"], "error");
        assert_eq!(json["message"], "boom");
    }
}
