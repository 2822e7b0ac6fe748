//! Error types for shimmer.

use thiserror::Error;

/// The main error type for shimmer operations.
///
/// The signal dispatcher itself never fails; these variants cover the UI host
/// and configuration layers built on top of it.
#[derive(Error, Debug)]
pub enum ShimmerError {
    /// The UI host has not been initialized yet.
    #[error("ui host not initialized - graphics subsystem not ready")]
    NotInitialized,

    /// The UI host is already connected to an engine's events.
    #[error("ui host already attached to engine events")]
    AlreadyAttached,

    /// The graphics device is not initialized or has been lost.
    #[error("graphics device unavailable (not initialized or lost)")]
    DeviceUnavailable,

    /// A font atlas whose pixel data does not match its dimensions.
    #[error("invalid font atlas: expected {expected} bytes, got {actual}")]
    InvalidFontAtlas { expected: usize, actual: usize },

    /// The engine failed to create a texture.
    #[error("texture creation failed: {0}")]
    TextureCreation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for shimmer operations.
pub type Result<T> = std::result::Result<T, ShimmerError>;
