use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("unknown locale `{0}` (expected one of: ar, en)")]
    UnknownLocale(String),
    #[error("failed to read message catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid message catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
    #[error("message catalog root must be a JSON object")]
    CatalogShape,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<NavError> for io::Error {
    fn from(err: NavError) -> Self {
        match err {
            NavError::Io(inner) => inner,
            other => io::Error::other(other),
        }
    }
}
