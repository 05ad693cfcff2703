//! Canvas compositing: background fill plus clipped, cropped, scaled draws.
//!
//! The only module that writes pixels into an output canvas. Placement
//! rectangles arrive in fractional canvas coordinates from the planner and
//! are snapped to whole pixels here; source crops are snapped into the
//! source image's bounds.

use image::{Rgba, RgbaImage, imageops};

use crate::color::Background;
use crate::geom::{ClipRegion, Rect};
use crate::layout::Placement;

/// Paint `placements` over a freshly filled canvas.
///
/// The canvas starts as transparent black or the solid background color.
/// Each placement is drawn in input order: optional center-crop of the
/// source, bilinear scale to the destination size, alpha-over composite.
/// When `corner_radius > 0`, a rounded-rectangle clip over the destination
/// gates every written pixel and is discarded before the next placement.
///
/// Planner output is trusted: rectangles are assumed in-bounds and image
/// indices valid (a plan built from the same slice can never emit an
/// out-of-range index, so such placements are skipped rather than checked).
pub fn composite(
    width: u32,
    height: u32,
    placements: &[Placement],
    images: &[RgbaImage],
    background: Background,
    corner_radius: f32,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width.max(1), height.max(1), background.to_pixel());

    for placement in placements {
        let Some(image) = images.get(placement.image) else {
            continue;
        };

        let (dx, dy, dw, dh) = placement.dest.pixel_snap();
        let scaled = match placement.source {
            Some(source) => {
                let (sx, sy, sw, sh) = snap_source(source, image.width(), image.height());
                let cropped = imageops::crop_imm(image, sx, sy, sw, sh).to_image();
                imageops::resize(&cropped, dw, dh, imageops::FilterType::Triangle)
            }
            None => imageops::resize(image, dw, dh, imageops::FilterType::Triangle),
        };

        let clip = (corner_radius > 0.0).then(|| ClipRegion::new(placement.dest, corner_radius));
        draw_over(&mut canvas, &scaled, dx, dy, clip.as_ref());
    }

    canvas
}

/// Snap a fractional source rect to whole pixels inside the image bounds.
/// Width and height stay at least 1 px.
fn snap_source(rect: Rect, image_w: u32, image_h: u32) -> (u32, u32, u32, u32) {
    let x = (rect.x.round().max(0.0) as u32).min(image_w.saturating_sub(1));
    let y = (rect.y.round().max(0.0) as u32).min(image_h.saturating_sub(1));
    let w = (rect.width.round().max(1.0) as u32).min(image_w - x);
    let h = (rect.height.round().max(1.0) as u32).min(image_h - y);
    (x, y, w.max(1), h.max(1))
}

/// Alpha-over composite `top` onto `canvas` at `(ox, oy)`, gated by an
/// optional clip region. Pixels outside the canvas are dropped.
fn draw_over(canvas: &mut RgbaImage, top: &RgbaImage, ox: i64, oy: i64, clip: Option<&ClipRegion>) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for (x, y, pixel) in top.enumerate_pixels() {
        let tx = ox + x as i64;
        let ty = oy + y as i64;
        if tx < 0 || ty < 0 || tx >= cw || ty >= ch {
            continue;
        }
        if let Some(clip) = clip
            && !clip.contains(tx as f32 + 0.5, ty as f32 + 0.5)
        {
            continue;
        }

        let (tx, ty) = (tx as u32, ty as u32);
        match pixel[3] {
            255 => canvas.put_pixel(tx, ty, *pixel),
            0 => {}
            _ => {
                let blended = blend_over(canvas.get_pixel(tx, ty), pixel);
                canvas.put_pixel(tx, ty, blended);
            }
        }
    }
}

/// Standard "over" operator for straight-alpha RGBA.
fn blend_over(bg: &Rgba<u8>, fg: &Rgba<u8>) -> Rgba<u8> {
    let fa = fg[3] as f32 / 255.0;
    let ba = bg[3] as f32 / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |f: u8, b: u8| {
        let v = (f as f32 * fa + b as f32 * ba * (1.0 - fa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(fg[0], bg[0]),
        channel(fg[1], bg[1]),
        channel(fg[2], bg[2]),
        (out_a * 255.0).round() as u8,
    ])
}
