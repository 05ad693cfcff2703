//! Deterministic collage layout, per-image adjustment, and compositing.
//!
//! The engine is backend-independent and stateless: decode encoded images
//! into RGBA rasters, plan a collage layout (or adjust a single raster),
//! composite onto a fresh canvas, and encode the result. Every operation
//! is synchronous and pure over its inputs — concurrent calls are safe
//! because each call owns its output.
//!
//! # Modules
//!
//! - [`layout`] — Collage placement computation (pure geometry)
//! - [`adjust`] — Brightness/contrast remap and 90°-step rotation
//! - [`compose`] — Canvas background fill and clipped raster draws
//! - [`codec`] — PNG/JPEG/WEBP decode, PNG/JPEG encode
//! - [`render`] — Byte-level pipeline tying the above together
//! - [`geom`], [`color`], [`error`] — Shared geometry, colors, errors
//!
//! # Example
//!
//! ```
//! use montage::{CollageSettings, EncodedImage, OutputFormat, render_collage};
//!
//! # fn demo(photo_a: &[u8], photo_b: &[u8]) -> Result<(), montage::EngineError> {
//! let sources = [
//!     EncodedImage::new(photo_a, "image/jpeg"),
//!     EncodedImage::new(photo_b, "image/png"),
//! ];
//! let png = render_collage(&sources, &CollageSettings::default(), OutputFormat::Png)?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod adjust;
pub mod codec;
pub mod color;
pub mod compose;
pub mod error;
pub mod geom;
pub mod layout;
pub mod render;

// Re-exports: core types and operations
pub use adjust::{AdjustmentSettings, Rotation, adjust};
pub use codec::{OutputFormat, SourceFormat, decode, encode};
pub use color::Background;
pub use compose::composite;
pub use error::EngineError;
pub use geom::{ClipRegion, Rect, Size};
pub use layout::{CollageLayout, CollagePlan, CollageSettings, LayoutError, Placement, plan};
pub use render::{EncodedImage, collage_image, render_adjusted, render_collage};
