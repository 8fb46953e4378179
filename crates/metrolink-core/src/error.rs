use std::path::PathBuf;
use thiserror::Error;

/// Core error type for metrolink operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    WorkspaceParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid workspace pattern '{pattern}': {source}")]
    WorkspacePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid exclusion pattern: {0}")]
    ExclusionPattern(#[from] regex_lite::Error),
}
