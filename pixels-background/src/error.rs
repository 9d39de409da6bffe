use thiserror::Error;

/// Fatal failures of the background window.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Os(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("pixel surface resize failed: {0}")]
    Texture(#[from] pixels::TextureError),

    #[error("grid error: {0}")]
    Grid(#[from] life_grid::GridError),
}
