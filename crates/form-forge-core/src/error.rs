use std::fmt;

/// Which input file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Definition,
    Metadata,
    /// A converted form document handed to the assistant as context.
    Context,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Definition => write!(f, "definition file"),
            Self::Metadata => write!(f, "metadata file"),
            Self::Context => write!(f, "context file"),
        }
    }
}

/// Errors surfaced by the conversion pipeline.
///
/// Structurally invalid input never produces an error; it is recovered
/// by the parsers. Only input that cannot be decoded as text is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    /// The input bytes are not valid UTF-8.
    InvalidEncoding { input: InputKind, valid_up_to: usize },
}

impl ConvertError {
    /// Builds an `InvalidEncoding` error from a UTF-8 decoding failure.
    pub fn invalid_encoding(input: InputKind, err: &std::str::Utf8Error) -> Self {
        Self::InvalidEncoding {
            input,
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEncoding { input, valid_up_to } => {
                write!(
                    f,
                    "{input} is not valid UTF-8 text (invalid byte after offset {valid_up_to}); \
                     re-save the file as UTF-8"
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_input() {
        let err = ConvertError::InvalidEncoding {
            input: InputKind::Metadata,
            valid_up_to: 12,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("metadata file is not valid UTF-8"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn invalid_encoding_from_utf8_error() {
        let bytes = [b'o', b'k', 0xff, 0xfe];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err = ConvertError::invalid_encoding(InputKind::Definition, &utf8_err);
        assert_eq!(
            err,
            ConvertError::InvalidEncoding {
                input: InputKind::Definition,
                valid_up_to: 2,
            }
        );
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ConvertError::InvalidEncoding {
            input: InputKind::Definition,
            valid_up_to: 0,
        });
        assert!(err.to_string().contains("definition file"));
    }
}
