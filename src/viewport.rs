//! Camera control and world-to-screen mapping.
//!
//! The [`Viewport`] owns the editor window and the clipper. Each frame it
//! runs the geometry pass over the scene, clips every shape against the
//! window and maps what survives to pixel coordinates.

use crate::clipper::{Clipper, LineClipMethod, Segment};
use crate::config::EditorConfig;
use crate::error::GeometryError;
use crate::frame::FrameGenerator;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::shape::{Shape, Style};
use crate::window::Window;

/// A clipped segment in pixel coordinates, ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLine {
    pub start: Vec2,
    pub end: Vec2,
    pub style: Style,
}

pub struct Viewport {
    window: Window,
    clipper: Clipper,
    padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            window: Window::new(config.window_origin, config.window_extension, config.cop),
            clipper: Clipper::new(config.clip_method),
            padding: config.padding,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn clip_method(&self) -> LineClipMethod {
        self.clipper.method()
    }

    pub fn set_clip_method(&mut self, method: LineClipMethod) {
        self.clipper.set_method(method);
    }

    pub fn toggle_clip_method(&mut self) -> LineClipMethod {
        self.clipper.toggle_method()
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Normalized window bounds grown by the padding on every side. This is
    /// the rectangle that fills the screen.
    fn screen_bounds(&self) -> (Vec3, Vec3) {
        let pad = Vec3::planar(self.padding, self.padding);
        (
            self.window.normalized_origin() - pad,
            self.window.normalized_extension() + pad,
        )
    }

    /// Maps a normalized point to pixels. Screen y grows downwards.
    pub fn world_to_screen(&self, point: Vec3, width: u32, height: u32) -> Vec2 {
        let (origin, extension) = self.screen_bounds();
        let x = (point.x - origin.x) / (extension.x - origin.x);
        let y = (point.y - origin.y) / (extension.y - origin.y);
        Vec2::new(x * width as f64, (1.0 - y) * height as f64)
    }

    /// Inverse of [`Viewport::world_to_screen`]. The result lies on the
    /// normalized window plane, `z = 0`.
    pub fn screen_to_world(&self, pixel: Vec2, width: u32, height: u32) -> Vec3 {
        let (origin, extension) = self.screen_bounds();
        let x = pixel.x / width as f64;
        let y = 1.0 - pixel.y / height as f64;
        Vec3::planar(
            origin.x + x * (extension.x - origin.x),
            origin.y + y * (extension.y - origin.y),
        )
    }

    pub fn move_window(&mut self, direction: Vec3) {
        self.window.translate(direction);
        log::info!("window moved to {}", self.window.position());
    }

    /// Rotates the window about its own centre, in degrees.
    pub fn rotate_window(&mut self, delta: Vec3) {
        self.window.rotate(delta, None);
        log::info!("window rotation is now {}", self.window.rotation());
    }

    pub fn rescale_window(&mut self, factor: Vec3) {
        self.window.rescale(factor);
        log::info!("window scale is now {}", self.window.scale());
    }

    /// Sets the window's absolute scale instead of multiplying it.
    pub fn resize_window(&mut self, extension: Vec3) {
        self.window.resize(extension);
        log::info!("window scale set to {}", self.window.scale());
    }

    pub fn reset_window_position(&mut self) {
        self.window.reset_position();
        log::info!("window position reset to {}", self.window.position());
    }

    pub fn reset_window_rotation(&mut self) {
        self.window.reset_rotation();
        log::info!("window rotation reset");
    }

    pub fn reset_window_scale(&mut self) {
        self.window.reset_scale();
        log::info!("window scale reset");
    }

    /// Clips an already generated frame and maps it to the screen.
    pub fn screen_lines(&self, shapes: &[Shape], width: u32, height: u32) -> Vec<ScreenLine> {
        let to_screen = |segment: Segment| ScreenLine {
            start: self.world_to_screen(segment.start, width, height),
            end: self.world_to_screen(segment.end, width, height),
            style: segment.style,
        };

        let frame = self.window.frame();
        let frame_style = frame.style();
        let outline = frame.vector_lines().iter().map(|&(start, end)| Segment {
            start,
            end,
            style: frame_style,
        });

        shapes
            .iter()
            .flat_map(|shape| self.clipper.clip(&self.window, shape))
            .chain(outline)
            .map(to_screen)
            .collect()
    }

    /// Generates a frame for `shapes` and returns everything to draw, the
    /// window outline last.
    pub fn render(&mut self, shapes: &mut [Shape], width: u32, height: u32) -> Result<Vec<ScreenLine>, GeometryError> {
        FrameGenerator::generate_frame(&mut self.window, shapes)?;
        Ok(self.screen_lines(shapes, width, height))
    }
}
