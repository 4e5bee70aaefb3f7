use std::path::PathBuf;

/// Failures that stop the host.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Drawing surface unavailable, reason='{0}'")]
    SurfaceUnavailable(String),

    #[error("Event loop failed, reason='{0}'")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Could not present frame, reason='{0}'")]
    Present(String),
}

/// Texture could not be loaded; callers substitute a flat tile.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Could not read asset {path}, reason='{source}'")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not decode asset {path}, reason='{source}'")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IoError, reason='{0}'")]
    Io(#[from] std::io::Error),

    #[error("JsonError, reason='{0}'")]
    Json(#[from] serde_json::Error),
}
