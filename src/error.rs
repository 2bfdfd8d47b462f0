use std::path::PathBuf;
use thiserror::Error;

/// Problems found while building the runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Problems with a single image; these never abort the slideshow.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to upload texture for {path:?}: {reason}")]
    Upload { path: PathBuf, reason: String },

    #[error("loader for {path:?} panicked")]
    Worker { path: PathBuf },

    #[error("no image files found in directory {path:?}")]
    EmptyDirectory { path: PathBuf },
}
