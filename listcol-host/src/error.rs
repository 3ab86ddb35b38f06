//! Error types for the listing host.

use listcol_model::ConfigError;
use listcol_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid column configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to parse {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type HostResult<T> = Result<T, HostError>;
