use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdError {
    #[error("parsing {}: {cause}", path.display())]
    Parse { path: PathBuf, cause: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown metadata kind: {0}")]
    UnknownKind(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MdError {
    pub fn parse(path: impl Into<PathBuf>, cause: impl ToString) -> Self {
        MdError::Parse {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        MdError::NotFound(what.into())
    }

    pub fn already_exists(what: impl Into<String>) -> Self {
        MdError::AlreadyExists(what.into())
    }
}

pub type Result<T> = std::result::Result<T, MdError>;
