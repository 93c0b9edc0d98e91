//! Geometry core of a 2D/3D wireframe editor.
//!
//! Shapes live in world space. Every frame the camera [`Window`] projects
//! them through its centre of projection, re-expresses them in its own
//! frame, clips them against its rectangle and maps what is left to screen
//! pixels. Rasterization is limited to the small software [`Canvas`] used
//! by the optional viewer.
//!
//! # Quick Start
//!
//! ```ignore
//! use wireframe::prelude::*;
//!
//! let mut viewport = Viewport::default();
//! let mut shapes = vec![Shape::line(Vec3::new(-900.0, 0.0, 0.0), Vec3::ZERO)?];
//! let lines = viewport.render(&mut shapes, 800, 600)?;
//! ```

// Public API - exposed to library consumers
pub mod canvas;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod math;
pub mod scene;
pub mod shape;
pub mod transform;
pub mod viewport;
pub mod window;

#[cfg(feature = "viewer")]
pub mod display;

// Re-export commonly needed types at crate root for convenience
pub use canvas::Canvas;
pub use clipper::{Clipper, LineClipMethod, Segment};
pub use config::EditorConfig;
pub use error::GeometryError;
pub use frame::FrameGenerator;
pub use shape::{ObjectType, Shape, ShapeKind, SplineStrategy, Style};
pub use transform::Transform;
pub use viewport::{ScreenLine, Viewport};
pub use window::Window;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use wireframe::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::shape::{ObjectType, Shape, ShapeKind, SplineStrategy, Style};
    pub use crate::transform::Transform;

    // Camera
    pub use crate::controller::{Key, WindowCommand, WindowController};
    pub use crate::viewport::{ScreenLine, Viewport};
    pub use crate::window::Window;

    // Pipeline
    pub use crate::clipper::{ClipBounds, Clipper, LineClipMethod, Segment};
    pub use crate::config::EditorConfig;
    pub use crate::error::GeometryError;
    pub use crate::frame::FrameGenerator;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Drawing
    pub use crate::canvas::Canvas;
}
