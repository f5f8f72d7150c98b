//! Error types for asset loading and atlas handling.
//!
//! Everything fails synchronously at the call site; there is no deferred
//! error channel. Atlas shape problems are their own enum so baking can be
//! tested without a store around it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from declaring or baking an atlas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtlasError {
    /// Bake was asked to run over an atlas with no lines at all.
    #[error("atlas {atlas:?} has no animation lines")]
    EmptyAtlas { atlas: String },

    /// A line carries neither a frame width nor a frame count, or its
    /// geometry divides down to zero frames.
    #[error("line {line:?} of atlas {atlas:?} has no usable frame width or frame count")]
    MissingGeometry { atlas: String, line: String },

    /// A line with this name was already declared.
    #[error("line {line:?} of atlas {atlas:?} already exists")]
    DuplicateLine { atlas: String, line: String },

    /// No line with this name exists in the atlas.
    #[error("line {line:?} of atlas {atlas:?} not found")]
    LineNotFound { atlas: String, line: String },

    /// Ping-pong playback needs at least two frames to bounce between.
    #[error("line {line:?} of atlas {atlas:?} plays in reverse but has {frames} frame(s)")]
    ReverseTooShort {
        atlas: String,
        line: String,
        frames: i32,
    },

    /// The JSON manifest could not be parsed.
    #[error("invalid atlas manifest: {0}")]
    Manifest(String),
}

/// Errors from loading or querying the asset store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The backend could not produce a texture from the file.
    #[error("failed to load {path:?}: {reason}")]
    ResourceLoad { path: PathBuf, reason: String },

    /// No texture is stored under this name.
    #[error("texture {name:?} is not loaded")]
    TextureNotFound { name: String },

    /// No atlas is registered under this name.
    #[error("atlas {name:?} is not registered")]
    AtlasNotFound { name: String },

    /// An atlas failed to bake during registration.
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}
