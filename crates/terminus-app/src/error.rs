//! Application error type.

use std::path::PathBuf;

use terminus_config::ConfigError;
use terminus_layer::LayerError;
use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image size {width}x{height} has no pixels")]
    EmptyImage { width: u32, height: u32 },
}
