//! Drawing surface abstraction and its software implementation.

use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

use crate::color::Color;
use crate::scene::Texture;
use crate::vector::Vector2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Scale followed by translation, the only affine maps the passes need.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            sx: 1.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl Transform {
    #[inline]
    pub fn apply(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x * self.sx + self.tx, p.y * self.sy + self.ty)
    }

    /// Converts a length drawn in user space to pixels.
    #[inline]
    pub fn apply_len(&self, len: f64) -> f64 {
        len * 0.5 * (self.sx.abs() + self.sy.abs())
    }
}

/// What the render passes draw on. Coordinates go through the current
/// transform; `width`/`height` report raw pixel dimensions.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vector2, radius: f64, color: Color);
    fn stroke_line(&mut self, p1: Vector2, p2: Vector2, width: f64, color: Color);
    /// Copies `src` (texture pixels) into `dst`, nearest-neighbor stretched.
    fn draw_image(&mut self, texture: &Texture, src: Rect, dst: Rect);

    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn save(&mut self);
    fn restore(&mut self);
}

/// CPU framebuffer in the packed format softbuffer presents.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            transform: Transform::default(),
            stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height];
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Resets the transform stack and fills the whole frame.
    pub fn clear(&mut self, color: Color) {
        self.transform = Transform::default();
        self.stack.clear();
        if self.width == 0 {
            return;
        }
        let px = color.to_pixel();
        self.pixels
            .par_chunks_mut(self.width)
            .for_each(|row| row.fill(px));
    }

    // Pixel span whose centers fall inside [a, b), clamped to [0, max).
    fn span(a: f64, b: f64, max: usize) -> (usize, usize) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = (lo - 0.5).ceil().max(0.0);
        let hi = (hi - 0.5).ceil().clamp(0.0, max as f64);
        (lo as usize, (hi as usize).max(lo as usize))
    }

    #[inline]
    fn blend(&mut self, x: usize, y: usize, color: &Color) {
        let idx = y * self.width + x;
        self.pixels[idx] = color.blend_over(self.pixels[idx]);
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let p0 = self.transform.apply(Vector2::new(rect.x, rect.y));
        let p1 = self
            .transform
            .apply(Vector2::new(rect.x + rect.w, rect.y + rect.h));
        let (x0, x1) = Self::span(p0.x, p1.x, self.width);
        let (y0, y1) = Self::span(p0.y, p1.y, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, &color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vector2, radius: f64, color: Color) {
        let c = self.transform.apply(center);
        let r = self.transform.apply_len(radius);
        let (x0, x1) = Self::span(c.x - r, c.x + r, self.width);
        let (y0, y1) = Self::span(c.y - r, c.y + r, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);
                if p.sqr_distance_to(c) <= r * r {
                    self.blend(x, y, &color);
                }
            }
        }
    }

    fn stroke_line(&mut self, p1: Vector2, p2: Vector2, width: f64, color: Color) {
        let a = self.transform.apply(p1);
        let b = self.transform.apply(p2);
        // hairlines still cover one pixel
        let half = (self.transform.apply_len(width) * 0.5).max(0.5);
        let (x0, x1) = Self::span(a.x.min(b.x) - half, a.x.max(b.x) + half, self.width);
        let (y0, y1) = Self::span(a.y.min(b.y) - half, a.y.max(b.y) + half, self.height);
        let ab = b - a;
        let len2 = ab.sqr_length();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len2 == 0.0 {
                    0.0
                } else {
                    ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
                };
                if p.sqr_distance_to(a + ab * t) <= half * half {
                    self.blend(x, y, &color);
                }
            }
        }
    }

    fn draw_image(&mut self, texture: &Texture, src: Rect, dst: Rect) {
        if texture.width == 0 || texture.height == 0 {
            return;
        }
        let p0 = self.transform.apply(Vector2::new(dst.x, dst.y));
        let p1 = self
            .transform
            .apply(Vector2::new(dst.x + dst.w, dst.y + dst.h));
        let (dw, dh) = (p1.x - p0.x, p1.y - p0.y);
        if dw == 0.0 || dh == 0.0 {
            return;
        }
        let (x0, x1) = Self::span(p0.x, p1.x, self.width);
        let (y0, y1) = Self::span(p0.y, p1.y, self.height);
        let max_u = (texture.width - 1) as f64;
        let max_v = (texture.height - 1) as f64;
        for y in y0..y1 {
            let fy = (y as f64 + 0.5 - p0.y) / dh;
            let v = (src.y + fy * src.h).floor().clamp(0.0, max_v) as usize;
            let row = y * self.width;
            for x in x0..x1 {
                let fx = (x as f64 + 0.5 - p0.x) / dw;
                let u = (src.x + fx * src.w).floor().clamp(0.0, max_u) as usize;
                self.pixels[row + x] = texture.pixel(u, v);
            }
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.tx += self.transform.sx * dx;
        self.transform.ty += self.transform.sy * dy;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.sx *= sx;
        self.transform.sy *= sy;
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }
}
