//! Canvas background colors: hex (#RGB, #RRGGBB) and the `transparent` literal.

use image::Rgba;

/// Canvas background fill.
///
/// `Transparent` clears the canvas to transparent black `[0, 0, 0, 0]`;
/// `Srgb` fills with a fully opaque color. Collage output has no
/// translucent backgrounds — callers wanting one can composite the PNG
/// themselves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    /// Transparent black. Only survives PNG output; JPEG flattens it.
    Transparent,
    /// Opaque sRGB color (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8 },
}

impl Default for Background {
    /// Opaque white.
    fn default() -> Self {
        Self::white()
    }
}

impl Background {
    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::Srgb {
            r: 255,
            g: 255,
            b: 255,
        }
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::Srgb { r: 0, g: 0, b: 0 }
    }

    /// Parse a background string.
    ///
    /// Accepts:
    /// - `#RGB` / `RGB` — 3-digit hex
    /// - `#RRGGBB` / `RRGGBB` — 6-digit hex
    /// - the literal `transparent` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Self::Transparent);
        }

        // Strip optional leading '#'
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                // RGB → RRGGBB
                let r = expand_nibble(hex.as_bytes()[0])?;
                let g = expand_nibble(hex.as_bytes()[1])?;
                let b = expand_nibble(hex.as_bytes()[2])?;
                Some(Self::Srgb { r, g, b })
            }
            6 => {
                let r = parse_byte(&hex[0..2])?;
                let g = parse_byte(&hex[2..4])?;
                let b = parse_byte(&hex[4..6])?;
                Some(Self::Srgb { r, g, b })
            }
            _ => None,
        }
    }

    /// The RGBA pixel this background fills the canvas with.
    pub fn to_pixel(self) -> Rgba<u8> {
        match self {
            Self::Transparent => Rgba([0, 0, 0, 0]),
            Self::Srgb { r, g, b } => Rgba([r, g, b, 255]),
        }
    }
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(s: &str) -> Option<u8> {
    let hi = hex_val(s.as_bytes()[0])?;
    let lo = hex_val(s.as_bytes()[1])?;
    Some(hi << 4 | lo)
}
