/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as f64 / 255.0,
            ((rgb >> 8) & 0xFF) as f64 / 255.0,
            (rgb & 0xFF) as f64 / 255.0,
        )
    }

    /// Scales the color channels, alpha untouched.
    pub fn brightness(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_pixel(&self) -> u32 {
        pack_rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Source-over composite of this color onto a packed pixel.
    pub fn blend_over(&self, dst: u32) -> u32 {
        let a = self.a.clamp(0.0, 1.0);
        if a >= 1.0 {
            return self.to_pixel();
        }
        if a <= 0.0 {
            return dst;
        }
        let (dr, dg, db) = unpack_rgb(dst);
        let mix = |src: f64, dst: u8| -> u8 {
            (src.clamp(0.0, 1.0) * 255.0 * a + dst as f64 * (1.0 - a)).round() as u8
        };
        pack_rgb(mix(self.r, dr), mix(self.g, dg), mix(self.b, db))
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
pub fn unpack_rgb(pixel: u32) -> (u8, u8, u8) {
    (
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    )
}
