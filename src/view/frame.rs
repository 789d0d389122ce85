//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout the painter.

use slide_sheet::geometry::Rect;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color
/// with full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let alpha = alpha.clamp(0.0, 1.0);
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Scale the alpha byte of an ARGB color by `factor`
#[inline]
pub fn with_alpha_scaled(color: u32, factor: f32) -> u32 {
    let a = ((color >> 24) & 0xFF) as f32 * factor.clamp(0.0, 1.0);
    ((a.round() as u32) << 24) | (color & 0x00FF_FFFF)
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced to
    /// fit the buffer.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    /// Constrain subsequent drawing to `rect`, intersected with any
    /// clip already set
    pub fn set_clip(&mut self, rect: Rect) {
        let mut x0 = (rect.x.max(0.0) as usize).min(self.width);
        let mut y0 = (rect.y.max(0.0) as usize).min(self.height);
        let mut x1 = ((rect.x + rect.width).max(0.0) as usize).min(self.width);
        let mut y1 = ((rect.y + rect.height).max(0.0) as usize).min(self.height);
        if let Some(c) = self.clip {
            x0 = x0.max(c.x0);
            y0 = y0.max(c.y0);
            x1 = x1.min(c.x1);
            y1 = y1.min(c.y1);
        }
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Pixel span of `rect` after clipping: (x0, y0, x1, y1)
    fn span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let (min_x, min_y, max_x, max_y) = self
            .clip
            .map_or((0, 0, self.width, self.height), |c| (c.x0, c.y0, c.x1, c.y1));
        let x0 = (rect.x.max(0.0) as usize).max(min_x);
        let y0 = (rect.y.max(0.0) as usize).max(min_y);
        let x1 = ((rect.x + rect.width).max(0.0) as usize).min(max_x);
        let y1 = ((rect.y + rect.height).max(0.0) as usize).min(max_y);
        (x0, y0, x1, y1)
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            if x0 < x1 {
                self.buffer[row_start + x0..row_start + x1].fill(color);
            }
        }
    }

    /// Fill a rectangle with alpha blending (color is ARGB format)
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);

        frame.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(15, 15), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(30, 30), 0);
    }

    #[test]
    fn test_fill_rect_partly_off_screen() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // A sheet hanging below the window edge
        frame.fill_rect(Rect::new(-5.0, 6.0, 50.0, 100.0), 0xFF00FF00);

        assert_eq!(frame.get_pixel(0, 9), 0xFF00FF00);
        assert_eq!(frame.get_pixel(9, 6), 0xFF00FF00);
        assert_eq!(frame.get_pixel(0, 5), 0);
    }

    #[test]
    fn test_blended_fill_darkens() {
        let mut buffer = vec![0xFFFFFFFF_u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        frame.fill_rect_blended(Rect::new(0.0, 0.0, 10.0, 10.0), 0x80000000);

        let r = (frame.get_pixel(5, 5) >> 16) & 0xFF;
        assert!(r > 100 && r < 160, "R channel: {}", r);
    }

    #[test]
    fn test_transparent_fill_is_noop() {
        let mut buffer = vec![0xFF123456_u32; 4 * 4];
        let mut frame = Frame::new(&mut buffer, 4, 4);
        frame.fill_rect_blended(Rect::new(0.0, 0.0, 4.0, 4.0), with_alpha_scaled(0x60000000, 0.0));
        assert_eq!(frame.get_pixel(1, 1), 0xFF123456);
    }

    #[test]
    fn test_nested_clip_intersects() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);
        frame.set_clip(Rect::new(10.0, 10.0, 30.0, 30.0));
        frame.set_clip(Rect::new(20.0, 0.0, 100.0, 100.0));

        frame.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(25, 25), 0xFFFF0000);
        assert_eq!(frame.get_pixel(15, 15), 0);
        assert_eq!(frame.get_pixel(50, 50), 0);

        frame.clear_clip();
        frame.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0xFF0000FF);
        assert_eq!(frame.get_pixel(0, 0), 0xFF0000FF);
    }

    #[test]
    fn test_short_buffer_shrinks_height() {
        let mut buffer = vec![0u32; 10 * 5];
        let mut frame = Frame::new(&mut buffer, 10, 10);
        frame.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(9, 4), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(9, 5), 0);
    }

    #[test]
    fn test_alpha_scaling() {
        assert_eq!(with_alpha_scaled(0x60000000, 0.5), 0x30000000);
        assert_eq!(with_alpha_scaled(0xFF112233, 1.0), 0xFF112233);
    }
}
