//! sourcekit normalizes heterogeneous media inputs into uniform, timed sources for a
//! video compositor.
//!
//! A [`Source`] exposes a duration, a selected time range, decodable tracks and (optionally)
//! textures. Two sources ship with the crate:
//!
//! - [`AssetSource`] wraps a decoded media container ([`MediaAsset`]). Loading resolves its
//!   track list and duration on the rayon pool and trims the duration to the first video
//!   track. It supports muting and a playback rate ([`Rateable`]).
//! - [`ImageSource`] wraps a still [`Bitmap`]. It synthesizes a fixed duration, projects the
//!   image to cover a render size through a [`ScaleTransform`], and caches one texture.
//!
//! # Loading
//!
//! [`Source::load`] reports exactly one outcome through a caller-supplied [`Dispatcher`].
//! Use [`CompletionQueue`] to receive completions on the thread that owns the sources, or
//! [`Inline`] to run them wherever resolution finishes. [`LoadStatus`] separates a finished
//! attempt ([`Source::is_loaded`]) from a usable source ([`LoadStatus::is_usable`]).
//!
//! # Bitmaps
//!
//! [`Bitmap`] carries straight-alpha RGBA8 pixels with a scale factor and an [`Orientation`].
//! Resize/crop helpers follow content-mode semantics ([`ContentMode`]); the geometry helpers
//! [`max_size_inside`] and [`min_size_covering`] compute aspect-fit and aspect-fill sizes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod media;
mod raster;
mod source;
mod texture;

pub use foundation::core::{Affine, Point, Rect, ResizeFilter, Size, SourceSettings, Vec2};
pub use foundation::error::{MetadataKey, ResourceKind, SourceError, SourceResult};
pub use foundation::time::{DEFAULT_TIMESCALE, MediaTime, TimeRange};
pub use geometry::orientation::{Orientation, orientation_transform};
pub use geometry::size::{max_size_inside, min_size_covering};
pub use media::ffprobe::FfprobeAsset;
pub use media::model::{MediaAsset, MediaType, StaticAsset, StaticAssetBuilder, Track};
pub use raster::bitmap::Bitmap;
pub use raster::resize::ContentMode;
pub use source::asset_source::AssetSource;
pub use source::contract::{LoadCompletion, LoadStatus, Source};
pub use source::dispatch::{CompletionQueue, Dispatcher, Inline, Job};
pub use source::image_source::ImageSource;
pub use source::rate::{RateControl, Rateable};
pub use source::scale::{ScaleTransform, ScaleTransformable};
pub use texture::factory::{CpuTextureFactory, Texture, TextureFactory};
