//! Decoding encoded images to RGBA rasters and encoding canvases back out.
//!
//! Inputs may be PNG, JPEG, or WEBP; outputs are PNG (alpha preserved) or
//! JPEG (alpha flattened). Both directions are deterministic for a given
//! input; no compression tunables are exposed.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage, RgbaImage};

use crate::error::EngineError;

/// Fixed JPEG quality. Not caller-tunable at this layer.
const JPEG_QUALITY: u8 = 90;

/// Supported input formats (decode only; WEBP has no encode path).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Webp,
}

impl SourceFormat {
    /// Map a mime type to a source format. `image/jpg` is tolerated as an
    /// alias seen in the wild.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless, preserves alpha.
    #[default]
    Png,
    /// Lossy, flattens alpha.
    Jpeg,
}

impl OutputFormat {
    /// The mime type of encoded output.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Decode encoded bytes into an RGBA raster.
///
/// With a declared mime type the bytes are decoded strictly as that
/// format; a mime outside the supported set fails with
/// [`EngineError::UnsupportedFormat`] without touching the bytes. With
/// `None` the format is sniffed from the bytes.
pub fn decode(bytes: &[u8], declared_mime: Option<&str>) -> Result<RgbaImage, EngineError> {
    let decoded = match declared_mime {
        Some(mime) => {
            let format = SourceFormat::from_mime(mime)
                .ok_or_else(|| EngineError::UnsupportedFormat(mime.to_string()))?;
            image::load_from_memory_with_format(bytes, format.image_format())?
        }
        None => image::load_from_memory(bytes)?,
    };
    Ok(decoded.to_rgba8())
}

/// Encode a canvas to the requested format.
///
/// PNG round-trips pixel-exactly. JPEG flattens transparency against an
/// implied opaque background (weighting each channel by its alpha, the
/// same result a premultiplied canvas export produces); callers that need
/// transparency must choose PNG.
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, EngineError> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut buf)
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(EngineError::Encode)?;
        }
        OutputFormat::Jpeg => {
            let flat = flatten_alpha(image);
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .write_image(
                    flat.as_raw(),
                    flat.width(),
                    flat.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(EngineError::Encode)?;
        }
    }
    Ok(buf)
}

/// Drop the alpha channel, scaling each color channel by its alpha.
/// Fully transparent pixels become black.
fn flatten_alpha(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let a = p[3] as u16;
        image::Rgb([
            ((p[0] as u16 * a + 127) / 255) as u8,
            ((p[1] as u16 * a + 127) / 255) as u8,
            ((p[2] as u16 * a + 127) / 255) as u8,
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 128])
            }
        })
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let img = checker(17, 9);
        let bytes = encode(&img, OutputFormat::Png).unwrap();
        let back = decode(&bytes, Some("image/png")).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn jpeg_output_decodes_at_same_dimensions() {
        let img = checker(32, 24);
        let bytes = encode(&img, OutputFormat::Jpeg).unwrap();
        let back = decode(&bytes, Some("image/jpeg")).unwrap();
        assert_eq!((back.width(), back.height()), (32, 24));
        // JPEG output carries no transparency.
        assert!(back.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn flatten_weights_by_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 0]));
        let flat = flatten_alpha(&img);
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0]);

        let opaque = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 255]));
        assert_eq!(flatten_alpha(&opaque).get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn unsupported_mime_is_rejected_before_decoding() {
        let err = decode(&[1, 2, 3], Some("image/gif")).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedFormat(m) if m == "image/gif"));
    }

    #[test]
    fn declared_mime_is_honored_strictly() {
        let png = encode(&checker(4, 4), OutputFormat::Png).unwrap();
        // Valid PNG bytes declared as JPEG must fail, not silently sniff.
        assert!(matches!(
            decode(&png, Some("image/jpeg")),
            Err(EngineError::Decode(_))
        ));
    }

    #[test]
    fn sniffing_decodes_without_a_mime() {
        let png = encode(&checker(4, 4), OutputFormat::Png).unwrap();
        let back = decode(&png, None).unwrap();
        assert_eq!((back.width(), back.height()), (4, 4));
    }

    #[test]
    fn malformed_bytes_fail_with_decode_error() {
        assert!(matches!(
            decode(&[0xFF, 0xFE, 0x00, 0x01], Some("image/png")),
            Err(EngineError::Decode(_))
        ));
    }

    #[test]
    fn mime_mapping() {
        assert_eq!(SourceFormat::from_mime("image/png"), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_mime("IMAGE/JPEG"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_mime("image/jpg"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_mime("image/webp"), Some(SourceFormat::Webp));
        assert_eq!(SourceFormat::from_mime("image/gif"), None);
        assert_eq!(OutputFormat::Png.mime(), "image/png");
        assert_eq!(OutputFormat::Jpeg.mime(), "image/jpeg");
    }
}
