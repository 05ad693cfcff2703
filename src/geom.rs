//! Sizes, rectangles, and the rounded-rectangle clip region.
//!
//! Layout math runs in fractional canvas coordinates (top-left origin,
//! y-down) and only snaps to whole pixels when the compositor rasterizes.

/// Width × height dimensions in whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height. Callers must reject empty sizes first.
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Axis-aligned rectangle in canvas coordinates.
///
/// Fractional coordinates are legal — grid cells like "60% of the usable
/// width" do not land on pixel boundaries. [`pixel_snap`](Self::pixel_snap)
/// rounds to the whole-pixel rect used for drawing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Width divided by height. Degenerate rects must be rejected upstream.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Round to a whole-pixel origin and extent.
    ///
    /// The origin may be negative (a placement can start left of or above
    /// the canvas); width and height are rounded and floored at 1 px so a
    /// nonzero rect never collapses to nothing.
    pub fn pixel_snap(&self) -> (i64, i64, u32, u32) {
        let x = self.x.round() as i64;
        let y = self.y.round() as i64;
        let w = self.width.round().max(1.0) as u32;
        let h = self.height.round().max(1.0) as u32;
        (x, y, w, h)
    }
}

/// Rounded-rectangle clip region for a single draw.
///
/// The compositor creates one of these around a placement's dest rect,
/// gates every written pixel through [`contains`](Self::contains), and
/// drops it before the next placement — clipping is per-draw state, never
/// retained.
#[derive(Copy, Clone, Debug)]
pub struct ClipRegion {
    rect: Rect,
    radius: f32,
}

impl ClipRegion {
    /// Create a clip over `rect` with the given corner radius.
    ///
    /// The radius is clamped to half the shorter side, matching what
    /// browser canvas `roundRect` does for oversized radii.
    pub fn new(rect: Rect, radius: f32) -> Self {
        let max_radius = rect.width.min(rect.height) / 2.0;
        Self {
            rect,
            radius: radius.clamp(0.0, max_radius.max(0.0)),
        }
    }

    /// Whether the point is inside the rounded rectangle.
    ///
    /// Callers pass pixel centers (`px + 0.5`, `py + 0.5`).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let r = &self.rect;
        if x < r.x || y < r.y || x >= r.right() || y >= r.bottom() {
            return false;
        }
        if self.radius <= 0.0 {
            return true;
        }

        // Distance test only applies inside the four corner squares.
        let cx = if x < r.x + self.radius {
            r.x + self.radius
        } else if x > r.right() - self.radius {
            r.right() - self.radius
        } else {
            return true;
        };
        let cy = if y < r.y + self.radius {
            r.y + self.radius
        } else if y > r.bottom() - self.radius {
            r.bottom() - self.radius
        } else {
            return true;
        };

        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}
