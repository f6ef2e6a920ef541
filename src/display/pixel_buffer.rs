use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::color::Rgba;

// ============================================================================
// Utility Functions
// ============================================================================

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Blend `color` over an ABGR pixel slice (RGBA8888 little-endian byte order)
#[inline]
fn blend_into(dest: &mut [u8], color: Rgba) {
    let alpha = color.a as u16;
    dest[0] = 255; // A - always opaque
    dest[1] = blend_channel(color.b, dest[1], alpha);
    dest[2] = blend_channel(color.g, dest[2], alpha);
    dest[3] = blend_channel(color.r, dest[3], alpha);
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering
/// The frame is drawn here, then uploaded to the window texture
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (1200x800)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a new pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Clear to a solid opaque color
    pub fn clear(&mut self, color: Rgba) {
        let pixel = [255, color.b, color.g, color.r];
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[cfg(test)]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(Rgba::new(
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
                self.pixels[idx],     // A
            ))
        } else {
            None
        }
    }

    /// Set pixel with alpha blending (bounds checked)
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            blend_into(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Draw a horizontal line with alpha blending
    /// Computes the starting index once, then steps by 4 bytes
    pub fn hline_blend(&mut self, x1: i32, x2: i32, y: i32, color: Rgba) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let start_idx = self.pixel_index(start as u32, y as u32);
        let end_idx = self.pixel_index(end as u32, y as u32) + 4;
        for chunk in self.pixels[start_idx..end_idx].chunks_exact_mut(4) {
            blend_into(chunk, color);
        }
    }

    /// Fill a rectangle with alpha blending
    pub fn fill_rect_blend(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        if w == 0 {
            return;
        }
        for row in 0..h as i32 {
            self.hline_blend(x, x + w as i32 - 1, y + row, color);
        }
    }

    /// Draw a rectangle border `thickness` pixels wide, growing outwards
    pub fn stroke_rect_blend(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        thickness: u32,
        color: Rgba,
    ) {
        let t = thickness as i32;
        let outer_w = w + 2 * thickness;
        // Top and bottom bands span the corners
        self.fill_rect_blend(x - t, y - t, outer_w, thickness, color);
        self.fill_rect_blend(x - t, y + h as i32, outer_w, thickness, color);
        // Left and right bands
        self.fill_rect_blend(x - t, y, thickness, h, color);
        self.fill_rect_blend(x + w as i32, y, thickness, h, color);
    }

    /// Fill a circle with alpha blending using horizontal spans
    pub fn fill_circle_blend(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            if radius == 0 {
                self.blend_pixel(cx, cy, color);
            }
            return;
        }

        // Midpoint circle algorithm with span filling
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            // Fill spans for 4 quadrants, avoiding duplicates so nothing is blended twice
            self.hline_blend(cx - x, cx + x, cy + y, color);
            if y != 0 {
                self.hline_blend(cx - x, cx + x, cy - y, color);
            }
            // Rows at +-x only once x is about to step, when their span is widest
            if x != y && err >= 0 {
                self.hline_blend(cx - y, cx + y, cy + x, color);
                self.hline_blend(cx - y, cx + y, cy - x, color);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draw a 1px circle outline with alpha blending
    pub fn draw_circle_blend(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            self.blend_pixel(cx, cy, color);
            return;
        }

        // Midpoint circle algorithm
        let mut x = radius;
        let mut y = 0;
        let mut err = 0;

        while x >= y {
            self.blend_pixel(cx + x, cy + y, color);
            self.blend_pixel(cx + y, cy + x, color);
            self.blend_pixel(cx - y, cy + x, color);
            self.blend_pixel(cx - x, cy + y, color);
            self.blend_pixel(cx - x, cy - y, color);
            self.blend_pixel(cx - y, cy - x, color);
            self.blend_pixel(cx + y, cy - x, color);
            self.blend_pixel(cx + x, cy - y, color);

            y += 1;
            err += 1 + 2 * y;
            if 2 * (err - x) + 1 > 0 {
                x -= 1;
                err += 1 - 2 * x;
            }
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}
