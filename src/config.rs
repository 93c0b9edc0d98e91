//! Editor settings.

use crate::clipper::LineClipMethod;
use crate::math::vec3::Vec3;
use crate::shape::SplineStrategy;
use crate::window::{DEFAULT_COP, DEFAULT_EXTENSION, DEFAULT_ORIGIN};

/// Camera placement, control step sizes and tessellation defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub window_origin: Vec3,
    pub window_extension: Vec3,
    pub cop: Vec3,
    /// Inset, in normalized window units, between the clip rectangle and the
    /// edge of the screen.
    pub padding: f64,
    /// World units per move.
    pub move_step: f64,
    /// Degrees per rotation.
    pub rotate_step: f64,
    /// In-plane factor for growing the window, which shows more of the
    /// scene.
    pub scale_up: f64,
    /// In-plane factor for shrinking the window.
    pub scale_down: f64,
    /// Step multiplier while shift is held.
    pub fast_multiplier: f64,
    pub curve_steps: usize,
    pub spline_strategy: SplineStrategy,
    pub clip_method: LineClipMethod,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_origin: DEFAULT_ORIGIN,
            window_extension: DEFAULT_EXTENSION,
            cop: DEFAULT_COP,
            padding: 20.0,
            move_step: 10.0,
            rotate_step: 5.0,
            scale_up: 1.1,
            scale_down: 0.9,
            fast_multiplier: 5.0,
            curve_steps: 20,
            spline_strategy: SplineStrategy::ForwardDifferences,
            clip_method: LineClipMethod::LiangBarsky,
        }
    }
}

impl EditorConfig {
    pub fn with_window(mut self, origin: Vec3, extension: Vec3, cop: Vec3) -> Self {
        self.window_origin = origin;
        self.window_extension = extension;
        self.cop = cop;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_move_step(mut self, step: f64) -> Self {
        self.move_step = step;
        self
    }

    pub fn with_rotate_step(mut self, degrees: f64) -> Self {
        self.rotate_step = degrees;
        self
    }

    pub fn with_scale_factors(mut self, scale_up: f64, scale_down: f64) -> Self {
        self.scale_up = scale_up;
        self.scale_down = scale_down;
        self
    }

    pub fn with_fast_multiplier(mut self, multiplier: f64) -> Self {
        self.fast_multiplier = multiplier;
        self
    }

    pub fn with_curve_steps(mut self, steps: usize) -> Self {
        self.curve_steps = steps;
        self
    }

    pub fn with_spline_strategy(mut self, strategy: SplineStrategy) -> Self {
        self.spline_strategy = strategy;
        self
    }

    pub fn with_clip_method(mut self, method: LineClipMethod) -> Self {
        self.clip_method = method;
        self
    }

    /// Movement step, multiplied while `fast` is set.
    pub fn move_amount(&self, fast: bool) -> f64 {
        self.move_step * self.multiplier(fast)
    }

    pub fn rotate_amount(&self, fast: bool) -> f64 {
        self.rotate_step * self.multiplier(fast)
    }

    fn multiplier(&self, fast: bool) -> f64 {
        if fast {
            self.fast_multiplier
        } else {
            1.0
        }
    }
}
