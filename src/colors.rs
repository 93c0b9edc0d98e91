//! Colours in ARGB8888 format.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const GRID: u32 = 0xFF333333;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const RED: u32 = 0xFFFF4040;
pub const GREEN: u32 = 0xFF40FF40;
pub const BLUE: u32 = 0xFF4080FF;
pub const YELLOW: u32 = 0xFFFFFF00;
pub const CYAN: u32 = 0xFF00FFFF;
pub const MAGENTA: u32 = 0xFFFF00FF;
pub const ORANGE: u32 = 0xFFFFA500;

/// Outline of the camera window.
pub const WINDOW_FRAME: u32 = 0xFFCC3333;

/// Default colour for newly created shapes.
pub const SHAPE: u32 = WHITE;
