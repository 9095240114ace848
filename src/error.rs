//! Error taxonomy for a single generation call.
//!
//! Every variant is terminal: nothing is retried and no partial file list is
//! ever returned alongside an error.

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    #[error("cannot generate language `{name}`; can only generate {supported}")]
    UnsupportedTargetLanguage { name: String, supported: String },

    #[error("cannot parse input format `{name}`; can only parse {supported}")]
    UnsupportedSourceFormat { name: String, supported: String },

    /// Decoder-reported parse failure.
    #[error("malformed source document at {path} (line {line}, column {column}): {message}")]
    MalformedSourceDocument {
        message: String,
        path: String,
        line: usize,
        column: usize,
    },

    #[error("root value is {kind}; expected a non-empty object or an array of objects")]
    UnsupportedRoot { kind: &'static str },

    #[error("input object was empty; there is no schema to infer")]
    EmptySchema,

    #[error("cannot infer element type of an empty array at {path}")]
    EmptyArray { path: String },

    #[error("invalid name {key:?} at {path}")]
    InvalidName { key: String, path: String },

    #[error("duplicate class file name `{file_name}`: produced by both `{first}` and `{second}`")]
    DuplicateClassName {
        file_name: String,
        first: String,
        second: String,
    },
}

impl GenError {
    /// Attach the owning key path to a naming failure.
    pub(crate) fn at(self, at: &str) -> Self {
        match self {
            GenError::InvalidName { key, .. } => GenError::InvalidName {
                key,
                path: at.to_string(),
            },
            other => other,
        }
    }
}
