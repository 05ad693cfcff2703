//! Collage layout planning.
//!
//! Computes canvas dimensions and per-image placement rectangles (with
//! center-crop source regions where a cell's aspect ratio differs from
//! its image) for a chosen layout policy. Pure geometry — no pixel
//! operations, no I/O.
//!
//! # Example
//!
//! ```
//! use montage::{CollageLayout, CollageSettings, Size, plan};
//!
//! let sizes = [Size::new(400, 300), Size::new(300, 400)];
//! let settings = CollageSettings {
//!     layout: CollageLayout::Grid,
//!     spacing: 20.0,
//!     ..CollageSettings::default()
//! };
//!
//! let collage = plan(&sizes, &settings).unwrap();
//! assert_eq!((collage.width, collage.height), (1200, 1200));
//! assert_eq!(collage.placements.len(), 2);
//! ```

use crate::color::Background;
use crate::geom::{Rect, Size};

/// Side of the fixed square canvas used by [`CollageLayout::Grid`].
pub const GRID_BASE_SIZE: f32 = 1200.0;

/// Fixed row height for [`CollageLayout::Horizontal`].
pub const ROW_TARGET_HEIGHT: f32 = 600.0;

/// Fixed column width for [`CollageLayout::Vertical`].
pub const COLUMN_TARGET_WIDTH: f32 = 800.0;

/// How to arrange images on the collage canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollageLayout {
    /// Single row: every image scaled to a fixed height, left to right.
    Horizontal,
    /// Single column: every image scaled to a fixed width, top to bottom.
    Vertical,
    /// Fixed square canvas with a count-dependent cell arrangement and
    /// center-crop framing.
    #[default]
    Grid,
}

impl CollageLayout {
    /// Parse a layout name (`grid`, `horizontal`, `vertical`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Collage configuration, consumed once per composite call.
///
/// `spacing` and `corner_radius` are whole pixels 0–100 at the UI surface;
/// the engine accepts any non-negative value and does not clamp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollageSettings {
    /// Arrangement policy.
    pub layout: CollageLayout,
    /// Gap before, between, and after cells, in pixels.
    pub spacing: f32,
    /// Canvas fill behind and between cells.
    pub background: Background,
    /// Rounded-corner radius applied to every cell, in pixels.
    pub corner_radius: f32,
}

impl Default for CollageSettings {
    /// Grid layout, 20 px spacing, white background, square corners.
    fn default() -> Self {
        Self {
            layout: CollageLayout::Grid,
            spacing: 20.0,
            background: Background::white(),
            corner_radius: 0.0,
        }
    }
}

/// One image placed on the canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index into the caller's image slice. Grid's fourth cell may repeat
    /// index 0 (see [`plan`]).
    pub image: usize,
    /// Destination rectangle on the canvas.
    pub dest: Rect,
    /// Sub-rectangle of the source image to draw. `None` = full image,
    /// scaled to fill `dest`. When present, its aspect ratio matches
    /// `dest` (center-crop).
    pub source: Option<Rect>,
}

/// Canvas dimensions plus ordered placements, ready for compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct CollagePlan {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Placements in draw order.
    pub placements: Vec<Placement>,
}

/// Layout planning error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// No images were supplied.
    #[error("no images to lay out")]
    EmptyInput,
    /// An image has zero width or height; scaling and crop ratios are undefined.
    #[error("image {index} has zero width or height")]
    ZeroSourceDimension {
        /// Index of the offending image in the input slice.
        index: usize,
    },
}

/// Compute placements for `sizes` under the given settings.
///
/// Deterministic and pure: the same inputs always yield the same plan.
/// Placement order follows input order, so overlapping cells (none exist
/// in the built-in policies) would draw first-to-last.
///
/// Grid quirks, kept for output compatibility:
/// - Only the first four images participate in the 2×2 arrangement;
///   extras are silently ignored.
/// - The fourth cell falls back to image 0 when index 3 is absent.
pub fn plan(sizes: &[Size], settings: &CollageSettings) -> Result<CollagePlan, LayoutError> {
    if sizes.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    if let Some(index) = sizes.iter().position(|s| s.is_empty()) {
        return Err(LayoutError::ZeroSourceDimension { index });
    }

    let spacing = settings.spacing;
    Ok(match settings.layout {
        CollageLayout::Horizontal => plan_row(sizes, spacing),
        CollageLayout::Vertical => plan_column(sizes, spacing),
        CollageLayout::Grid => plan_grid(sizes, spacing),
    })
}

/// Left-to-right row at a fixed height. Scale-to-fit, no cropping.
fn plan_row(sizes: &[Size], spacing: f32) -> CollagePlan {
    let mut placements = Vec::with_capacity(sizes.len());
    let mut cursor = spacing;

    for (i, size) in sizes.iter().enumerate() {
        let scale = ROW_TARGET_HEIGHT / size.height as f32;
        let width = size.width as f32 * scale;
        placements.push(Placement {
            image: i,
            dest: Rect::new(cursor, spacing, width, ROW_TARGET_HEIGHT),
            source: None,
        });
        cursor += width + spacing;
    }

    CollagePlan {
        width: cursor.round() as u32,
        height: (ROW_TARGET_HEIGHT + 2.0 * spacing).round() as u32,
        placements,
    }
}

/// Top-to-bottom column at a fixed width. Scale-to-fit, no cropping.
fn plan_column(sizes: &[Size], spacing: f32) -> CollagePlan {
    let mut placements = Vec::with_capacity(sizes.len());
    let mut cursor = spacing;

    for (i, size) in sizes.iter().enumerate() {
        let scale = COLUMN_TARGET_WIDTH / size.width as f32;
        let height = size.height as f32 * scale;
        placements.push(Placement {
            image: i,
            dest: Rect::new(spacing, cursor, COLUMN_TARGET_WIDTH, height),
            source: None,
        });
        cursor += height + spacing;
    }

    CollagePlan {
        width: (COLUMN_TARGET_WIDTH + 2.0 * spacing).round() as u32,
        height: cursor.round() as u32,
        placements,
    }
}

/// Fixed 1200×1200 canvas, cell arrangement keyed on image count,
/// center-crop framing in every cell.
fn plan_grid(sizes: &[Size], spacing: f32) -> CollagePlan {
    let base = GRID_BASE_SIZE;
    let full = base - 2.0 * spacing;
    let mut placements = Vec::new();

    match sizes.len() {
        1 => {
            push_cell(&mut placements, sizes, 0, Rect::new(spacing, spacing, full, full));
        }
        2 => {
            // Two equal columns, side by side.
            let w = (base - 3.0 * spacing) / 2.0;
            push_cell(&mut placements, sizes, 0, Rect::new(spacing, spacing, w, full));
            push_cell(
                &mut placements,
                sizes,
                1,
                Rect::new(spacing * 2.0 + w, spacing, w, full),
            );
        }
        3 => {
            // One large left column, two stacked right cells.
            let usable = base - 3.0 * spacing;
            let left_w = usable * 0.6;
            let right_w = usable * 0.4;
            let right_h = usable / 2.0;
            push_cell(
                &mut placements,
                sizes,
                0,
                Rect::new(spacing, spacing, left_w, full),
            );
            push_cell(
                &mut placements,
                sizes,
                1,
                Rect::new(spacing * 2.0 + left_w, spacing, right_w, right_h),
            );
            push_cell(
                &mut placements,
                sizes,
                2,
                Rect::new(
                    spacing * 2.0 + left_w,
                    spacing * 2.0 + right_h,
                    right_w,
                    right_h,
                ),
            );
        }
        _ => {
            // 2×2 grid of equal squares; first four images only.
            let w = (base - 3.0 * spacing) / 2.0;
            let fourth = if sizes.len() > 3 { 3 } else { 0 };
            push_cell(&mut placements, sizes, 0, Rect::new(spacing, spacing, w, w));
            push_cell(
                &mut placements,
                sizes,
                1,
                Rect::new(spacing * 2.0 + w, spacing, w, w),
            );
            push_cell(
                &mut placements,
                sizes,
                2,
                Rect::new(spacing, spacing * 2.0 + w, w, w),
            );
            push_cell(
                &mut placements,
                sizes,
                fourth,
                Rect::new(spacing * 2.0 + w, spacing * 2.0 + w, w, w),
            );
        }
    }

    CollagePlan {
        width: base as u32,
        height: base as u32,
        placements,
    }
}

/// Append a center-cropped placement for `sizes[image]` into `dest`.
fn push_cell(placements: &mut Vec<Placement>, sizes: &[Size], image: usize, dest: Rect) {
    let source = center_crop(sizes[image], dest.aspect_ratio());
    placements.push(Placement {
        image,
        dest,
        source: Some(source),
    });
}

/// Largest sub-rectangle of `source` with the target aspect ratio,
/// centered on the image. Crops only the longer dimension.
fn center_crop(source: Size, target_ratio: f32) -> Rect {
    let (w, h) = (source.width as f32, source.height as f32);
    if source.aspect_ratio() > target_ratio {
        // Image is wider than the cell — crop width.
        let crop_w = h * target_ratio;
        Rect::new((w - crop_w) / 2.0, 0.0, crop_w, h)
    } else {
        // Image is taller than the cell — crop height.
        let crop_h = w / target_ratio;
        Rect::new(0.0, (h - crop_h) / 2.0, w, crop_h)
    }
}
