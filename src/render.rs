//! Byte-level rendering pipeline: decode → plan/adjust → composite → encode.
//!
//! These are the entry points a front-end calls once per render. They are
//! pure over their inputs and repeatable — debouncing and discarding of
//! superseded renders is the caller's concern, not the engine's.

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::adjust::{AdjustmentSettings, adjust};
use crate::codec::{OutputFormat, decode, encode};
use crate::compose::composite;
use crate::error::EngineError;
use crate::geom::Size;
use crate::layout::{CollagePlan, CollageSettings, LayoutError, plan};

/// An encoded input image with its declared mime type, if known.
#[derive(Copy, Clone, Debug)]
pub struct EncodedImage<'a> {
    /// Encoded bytes (PNG, JPEG, or WEBP).
    pub bytes: &'a [u8],
    /// Declared mime type; `None` sniffs the format from the bytes.
    pub mime: Option<&'a str>,
}

impl<'a> EncodedImage<'a> {
    /// Wrap encoded bytes with a declared mime type.
    pub const fn new(bytes: &'a [u8], mime: &'a str) -> Self {
        Self {
            bytes,
            mime: Some(mime),
        }
    }

    /// Wrap encoded bytes of unknown format.
    pub const fn sniffed(bytes: &'a [u8]) -> Self {
        Self { bytes, mime: None }
    }
}

/// Decode all sources, lay them out, composite, and encode the result.
///
/// The empty-input check runs before any decoding, so a caller mistake
/// fails fast with [`LayoutError::EmptyInput`].
#[instrument(skip_all, fields(count = sources.len(), layout = ?settings.layout))]
pub fn render_collage(
    sources: &[EncodedImage<'_>],
    settings: &CollageSettings,
    format: OutputFormat,
) -> Result<Vec<u8>, EngineError> {
    if sources.is_empty() {
        return Err(LayoutError::EmptyInput.into());
    }

    let images = sources
        .iter()
        .map(|s| decode(s.bytes, s.mime))
        .collect::<Result<Vec<_>, _>>()?;

    let canvas = collage_image(&images, settings)?;
    debug!(
        width = canvas.width(),
        height = canvas.height(),
        "collage composited"
    );
    encode(&canvas, format)
}

/// Plan and composite a collage from already-decoded rasters.
pub fn collage_image(
    images: &[RgbaImage],
    settings: &CollageSettings,
) -> Result<RgbaImage, EngineError> {
    let sizes: Vec<Size> = images
        .iter()
        .map(|i| Size::new(i.width(), i.height()))
        .collect();
    let CollagePlan {
        width,
        height,
        placements,
    } = plan(&sizes, settings)?;

    Ok(composite(
        width,
        height,
        &placements,
        images,
        settings.background,
        settings.corner_radius,
    ))
}

/// Decode a single image, apply adjustments, and encode the result.
#[instrument(skip_all, fields(
    brightness = settings.brightness,
    contrast = settings.contrast,
    rotation = settings.rotation.degrees(),
))]
pub fn render_adjusted(
    source: EncodedImage<'_>,
    settings: &AdjustmentSettings,
    format: OutputFormat,
) -> Result<Vec<u8>, EngineError> {
    let image = decode(source.bytes, source.mime)?;
    let adjusted = adjust(&image, settings);
    debug!(
        width = adjusted.width(),
        height = adjusted.height(),
        "adjustments applied"
    );
    encode(&adjusted, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjust::Rotation;
    use crate::color::Background;
    use crate::layout::CollageLayout;
    use image::Rgba;

    fn png_bytes(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba(color));
        encode(&img, OutputFormat::Png).unwrap()
    }

    #[test]
    fn empty_input_fails_before_decoding() {
        let err = render_collage(&[], &CollageSettings::default(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, EngineError::Layout(LayoutError::EmptyInput)));
    }

    #[test]
    fn single_image_grid_renders_to_png() {
        let bytes = png_bytes(64, 64, [0, 128, 255, 255]);
        let sources = [EncodedImage::new(&bytes, "image/png")];
        let out = render_collage(&sources, &CollageSettings::default(), OutputFormat::Png).unwrap();

        let canvas = decode(&out, Some("image/png")).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1200, 1200));
        // Spacing margin is background white; the cell interior is the image.
        assert_eq!(*canvas.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(600, 600), Rgba([0, 128, 255, 255]));
    }

    #[test]
    fn decode_failure_propagates() {
        let good = png_bytes(8, 8, [255, 0, 0, 255]);
        let sources = [
            EncodedImage::new(&good, "image/png"),
            EncodedImage::new(&[0xDE, 0xAD], "image/png"),
        ];
        let err =
            render_collage(&sources, &CollageSettings::default(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }

    #[test]
    fn horizontal_collage_dimensions() {
        let a = png_bytes(100, 100, [255, 0, 0, 255]);
        let b = png_bytes(100, 100, [0, 255, 0, 255]);
        let sources = [
            EncodedImage::new(&a, "image/png"),
            EncodedImage::new(&b, "image/png"),
        ];
        let settings = CollageSettings {
            layout: CollageLayout::Horizontal,
            spacing: 10.0,
            ..CollageSettings::default()
        };
        let out = render_collage(&sources, &settings, OutputFormat::Png).unwrap();
        let canvas = decode(&out, None).unwrap();
        // Two 600-wide cells plus three gaps; 600 + 2 gaps tall.
        assert_eq!((canvas.width(), canvas.height()), (1230, 620));
    }

    #[test]
    fn adjusted_render_swaps_dimensions() {
        let bytes = png_bytes(40, 20, [10, 20, 30, 255]);
        let settings = AdjustmentSettings {
            rotation: Rotation::Cw90,
            ..AdjustmentSettings::default()
        };
        let out = render_adjusted(
            EncodedImage::new(&bytes, "image/png"),
            &settings,
            OutputFormat::Png,
        )
        .unwrap();
        let img = decode(&out, None).unwrap();
        assert_eq!((img.width(), img.height()), (20, 40));
    }

    #[test]
    fn transparent_background_survives_png() {
        let bytes = png_bytes(32, 32, [255, 0, 0, 255]);
        let sources = [EncodedImage::new(&bytes, "image/png")];
        let settings = CollageSettings {
            background: Background::Transparent,
            ..CollageSettings::default()
        };
        let out = render_collage(&sources, &settings, OutputFormat::Png).unwrap();
        let canvas = decode(&out, None).unwrap();
        assert_eq!(canvas.get_pixel(5, 5)[3], 0);
    }
}
