//! CPU raster surface the signature is drawn onto

use image::RgbaImage;

/// An RGBA f32 raster surface
///
/// Pixels are stored premultiplied, as `[r, g, b, a]` in row-major order,
/// starting fully transparent.
pub struct CpuSurface {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Create a transparent surface with the given backing-store dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
        }
    }

    /// Clear the surface to a solid (premultiplied) color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Composite a straight-alpha color over a pixel (source-over)
    ///
    /// `coverage` scales the color's alpha. Out-of-bounds writes are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        let dst = self.pixels[index];

        let src_alpha = (color[3] * coverage).clamp(0.0, 1.0);
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// True when no pixel has any alpha
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] <= 0.0)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Convert to an 8-bit straight-alpha image for encoding
    pub fn to_rgba8(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (dst, src) in image.pixels_mut().zip(&self.pixels) {
            let alpha = src[3].clamp(0.0, 1.0);
            let unpremultiply = |c: f32| {
                if alpha > 0.0 {
                    to_u8(c / alpha)
                } else {
                    0
                }
            };
            dst.0 = [
                unpremultiply(src[0]),
                unpremultiply(src[1]),
                unpremultiply(src[2]),
                to_u8(alpha),
            ];
        }
        image
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface() {
        let surface = CpuSurface::new(100, 40);
        assert_eq!(surface.width, 100);
        assert_eq!(surface.height, 40);
        assert_eq!(surface.pixel_count(), 4000);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut surface = CpuSurface::new(10, 10);
        assert_eq!(surface.get_pixel(10, 0), None);
        surface.blend_pixel(10, 10, [1.0, 0.0, 0.0, 1.0], 1.0);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_blend_pixel_over_transparent() {
        let mut surface = CpuSurface::new(10, 10);
        surface.blend_pixel(5, 5, [1.0, 0.0, 0.0, 1.0], 0.5);

        let result = surface.get_pixel(5, 5).unwrap();
        // Premultiplied half-transparent red
        assert!((result[0] - 0.5).abs() < 1e-6);
        assert!((result[3] - 0.5).abs() < 1e-6);
        assert!(!surface.is_blank());
    }

    #[test]
    fn test_clear() {
        let mut surface = CpuSurface::new(4, 4);
        surface.blend_pixel(1, 1, [0.0, 0.0, 0.0, 1.0], 1.0);
        surface.clear([0.0; 4]);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_to_rgba8_unpremultiplies() {
        let mut surface = CpuSurface::new(2, 1);
        surface.blend_pixel(0, 0, [0.0, 0.0, 1.0, 1.0], 0.5);

        let image = surface.to_rgba8();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 128]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }
}
