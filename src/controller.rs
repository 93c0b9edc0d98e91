//! Keyboard control of the camera window.
//!
//! Keys are backend-independent; the viewer translates SDL keycodes into
//! [`Key`] and hands them to a [`WindowController`].

use crate::clipper::LineClipMethod;
use crate::config::EditorConfig;
use crate::math::vec3::Vec3;
use crate::viewport::Viewport;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    F,
    G,
    Q,
    E,
    H,
    J,
    K,
    L,
    Z,
    C,
    R,
    T,
    Y,
    V,
}

/// One change to the camera window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    Move(Vec3),
    /// Euler delta in degrees.
    Rotate(Vec3),
    Rescale(Vec3),
    ResetPosition,
    ResetRotation,
    ResetScale,
    ToggleClipMethod,
}

/// Maps keys to window commands.
///
/// # Input Mapping
/// - W/S: Move up/down, A/D: Move left/right
/// - F/G: Move forward/back along z
/// - Q/E: Roll, H/J: Pitch, K/L: Yaw
/// - Z/C: Grow/shrink the window
/// - R/T/Y: Reset position/rotation/scale
/// - V: Switch line clipping algorithm
///
/// Holding shift multiplies move and rotate steps.
#[derive(Debug, Clone, Default)]
pub struct WindowController {
    config: EditorConfig,
}

impl WindowController {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn command_for(&self, key: Key, fast: bool) -> WindowCommand {
        let step = self.config.move_amount(fast);
        let angle = self.config.rotate_amount(fast);
        let grow = self.config.scale_up;
        let shrink = self.config.scale_down;

        match key {
            Key::W => WindowCommand::Move(Vec3::new(0.0, step, 0.0)),
            Key::A => WindowCommand::Move(Vec3::new(-step, 0.0, 0.0)),
            Key::S => WindowCommand::Move(Vec3::new(0.0, -step, 0.0)),
            Key::D => WindowCommand::Move(Vec3::new(step, 0.0, 0.0)),
            Key::F => WindowCommand::Move(Vec3::new(0.0, 0.0, step)),
            Key::G => WindowCommand::Move(Vec3::new(0.0, 0.0, -step)),
            Key::Q => WindowCommand::Rotate(Vec3::new(0.0, 0.0, -angle)),
            Key::E => WindowCommand::Rotate(Vec3::new(0.0, 0.0, angle)),
            Key::H => WindowCommand::Rotate(Vec3::new(-angle, 0.0, 0.0)),
            Key::J => WindowCommand::Rotate(Vec3::new(angle, 0.0, 0.0)),
            Key::K => WindowCommand::Rotate(Vec3::new(0.0, -angle, 0.0)),
            Key::L => WindowCommand::Rotate(Vec3::new(0.0, angle, 0.0)),
            Key::Z => WindowCommand::Rescale(Vec3::new(grow, grow, 1.0)),
            Key::C => WindowCommand::Rescale(Vec3::new(shrink, shrink, 1.0)),
            Key::R => WindowCommand::ResetPosition,
            Key::T => WindowCommand::ResetRotation,
            Key::Y => WindowCommand::ResetScale,
            Key::V => WindowCommand::ToggleClipMethod,
        }
    }

    /// Applies `command`. Returns the new clip method when it changed.
    pub fn apply(&self, viewport: &mut Viewport, command: WindowCommand) -> Option<LineClipMethod> {
        match command {
            WindowCommand::Move(direction) => viewport.move_window(direction),
            WindowCommand::Rotate(delta) => viewport.rotate_window(delta),
            WindowCommand::Rescale(factor) => viewport.rescale_window(factor),
            WindowCommand::ResetPosition => viewport.reset_window_position(),
            WindowCommand::ResetRotation => viewport.reset_window_rotation(),
            WindowCommand::ResetScale => viewport.reset_window_scale(),
            WindowCommand::ToggleClipMethod => return Some(viewport.toggle_clip_method()),
        }
        None
    }

    pub fn handle_key(&self, viewport: &mut Viewport, key: Key, fast: bool) -> Option<LineClipMethod> {
        self.apply(viewport, self.command_for(key, fast))
    }
}
