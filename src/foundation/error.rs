use std::{fmt, sync::Arc};

/// Convenience result type used across sourcekit.
pub type SourceResult<T> = Result<T, SourceError>;

/// Kind of backing resource a source wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Decoded media container.
    Asset,
    /// Still bitmap.
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => f.write_str("asset"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Metadata a media asset resolves lazily.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Track list.
    Tracks,
    /// Container duration.
    Duration,
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracks => f.write_str("tracks"),
            Self::Duration => f.write_str("duration"),
        }
    }
}

/// Top-level error taxonomy.
///
/// `Clone` so a failed load can be both stored in the source status and handed to the
/// completion callback.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SourceError {
    /// No backing asset/image at load time.
    #[error("resource missing: {0} is absent")]
    ResourceMissing(ResourceKind),

    /// The underlying track/duration query failed.
    #[error("metadata resolution failed for '{key}': {cause:#}")]
    MetadataResolutionFailed {
        /// Which metadata failed.
        key: MetadataKey,
        /// Underlying cause reported by the media backend.
        cause: Arc<anyhow::Error>,
    },

    /// Invalid caller-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Texture factory failure.
    #[error("texture error: {0}")]
    Texture(String),

    /// Bitmap decoding failure.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SourceError {
    /// Build a [`SourceError::ResourceMissing`] value.
    pub fn resource_missing(kind: ResourceKind) -> Self {
        Self::ResourceMissing(kind)
    }

    /// Build a [`SourceError::MetadataResolutionFailed`] value.
    pub fn metadata(key: MetadataKey, cause: anyhow::Error) -> Self {
        Self::MetadataResolutionFailed {
            key,
            cause: Arc::new(cause),
        }
    }

    /// Build a [`SourceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SourceError::Texture`] value.
    pub fn texture(msg: impl Into<String>) -> Self {
        Self::Texture(msg.into())
    }

    /// Build a [`SourceError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
