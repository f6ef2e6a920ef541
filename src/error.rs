//! Application error type

use sdl2::render::{TextureValueError, UpdateTextureError};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

/// Errors that can stop the viewer
#[derive(Error, Debug)]
pub enum AppError {
    /// SDL reports most failures as plain strings
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Failed to create window: {0}")]
    Window(#[from] WindowBuildError),

    #[error("Failed to create renderer: {0}")]
    Renderer(#[from] IntegerOrSdlError),

    #[error("Failed to create texture: {0}")]
    Texture(#[from] TextureValueError),

    #[error("Failed to upload frame: {0}")]
    Upload(#[from] UpdateTextureError),

    #[error("Invalid window title: {0}")]
    Title(#[from] std::ffi::NulError),
}

// `String` is not an error type, so `#[from]` can't derive this one
impl From<String> for AppError {
    fn from(e: String) -> Self {
        Self::Sdl(e)
    }
}
