use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Could not find a home directory for the collections file.")]
    HomeDirUnavailable,
    #[error("Could not create config directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read collections file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid collections file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not serialize collections: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not write collections file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No saved request named '{name}' found.")]
    NotFound { name: String },
}
