//! Software line drawing.
//!
//! Provides the [`Canvas`] struct which owns an ARGB8888 color buffer and
//! draws [`ScreenLine`]s into it.

use crate::colors;
use crate::viewport::ScreenLine;

/// Pixel count, widened before multiplying so large sizes cannot wrap.
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = buffer_len(width, height);
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = buffer_len(width, height);
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.color_buffer[index])
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Stamps a `size` x `size` square centred on (x, y).
    #[inline]
    fn stamp(&mut self, x: i32, y: i32, size: i32, color: u32) {
        let half = size / 2;
        for dy in 0..size {
            for dx in 0..size {
                self.set_pixel(x - half + dx, y - half + dy, color);
            }
        }
    }

    /// Draws a line with Bresenham's algorithm, stamping a square brush of
    /// `width` pixels at every step.
    ///
    /// The error term tracks the distance between the ideal line and the
    /// current pixel; once it crosses half a pixel the minor axis steps too.
    pub fn draw_line_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };
        let brush = width.max(1);

        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.stamp(x, y, brush, color);
            if x == x1 && y == y1 {
                break;
            }

            // Both may fire, which is a diagonal step.
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    pub fn draw_screen_line(&mut self, line: &ScreenLine) {
        let (x0, y0) = line.start.to_pixel();
        let (x1, y1) = line.end.to_pixel();
        let width = line.style.line_width.round() as i32;
        self.draw_line_bresenham(x0, y0, x1, y1, width, line.style.color);
    }

    pub fn draw_screen_lines(&mut self, lines: &[ScreenLine]) {
        for line in lines {
            self.draw_screen_line(line);
        }
    }

    /// The buffer as bytes, in the native-endian ARGB8888 layout SDL
    /// textures expect.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // byte slice covers exactly the buffer's memory for its lifetime.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::shape::Style;

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_pixel(-1, 0, colors::RED);
        canvas.set_pixel(4, 0, colors::RED);
        canvas.set_pixel(3, 3, colors::RED);
        assert_eq!(canvas.pixel(3, 3), Some(colors::RED));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.color_buffer.iter().filter(|&&c| c == colors::RED).count(), 1);
    }

    #[test]
    fn bresenham_hits_both_endpoints() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_line_bresenham(1, 2, 13, 9, 1, colors::GREEN);
        assert_eq!(canvas.pixel(1, 2), Some(colors::GREEN));
        assert_eq!(canvas.pixel(13, 9), Some(colors::GREEN));
        // One pixel per step along the major axis.
        assert_eq!(canvas.color_buffer.iter().filter(|&&c| c == colors::GREEN).count(), 13);
    }

    #[test]
    fn wide_lines_cover_more_pixels() {
        let mut canvas = Canvas::new(16, 16);
        let line = ScreenLine {
            start: Vec2::new(2.0, 8.0),
            end: Vec2::new(12.0, 8.0),
            style: Style {
                color: colors::CYAN,
                line_width: 3.0,
                fill: false,
            },
        };
        canvas.draw_screen_line(&line);
        assert_eq!(canvas.pixel(7, 7), Some(colors::CYAN));
        assert_eq!(canvas.pixel(7, 9), Some(colors::CYAN));
        assert_eq!(canvas.pixel(7, 10), Some(colors::BACKGROUND));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn buffer_len_does_not_wrap_in_u32() {
        // 65536 * 65536 is 0 in u32 arithmetic.
        assert_eq!(buffer_len(65_536, 65_536), 1usize << 32);
        assert_eq!(buffer_len(u32::MAX, 2), u32::MAX as usize * 2);
    }

    #[test]
    fn wide_canvas_indexes_past_u16_range() {
        let mut canvas = Canvas::new(70_000, 2);
        canvas.set_pixel(69_999, 1, colors::RED);
        assert_eq!(canvas.color_buffer[139_999], colors::RED);
        assert_eq!(canvas.pixel(69_999, 1), Some(colors::RED));
    }

    #[test]
    fn byte_view_covers_the_buffer() {
        let canvas = Canvas::new(3, 2);
        assert_eq!(canvas.as_bytes().len(), 24);
    }
}
