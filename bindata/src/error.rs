//! Error type shared by the transcoder, the TOC registry and the build helpers.
use std::io;

/// A specialized `Result` type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while turning a file into Rust source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read source data")]
    SourceRead(#[source] io::Error),
    #[error("failed to write generated source")]
    DestinationWrite(#[source] io::Error),
    #[error("invalid {kind} name '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("compression failed")]
    Compression(#[source] io::Error),
    #[error("table of contents already has an entry for key '{0}'")]
    DuplicateKey(String),
    #[error("accessor function '{0}' is generated more than once")]
    DuplicateFunction(String),
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("Environment variable '{0}' not set by Cargo")]
    Var(&'static str),
    #[error("Path '{0}' not found (current directory is '{1}')")]
    PathNotFound(String, String),
    #[error("Path '{0}' has unsupported file type")]
    UnsupportedFileType(String),
    #[error("while processing '{path}'")]
    File {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn invalid(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            name: name.into(),
        }
    }

    /// Attaches the path of the file being processed.
    pub(crate) fn in_file(self, path: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
