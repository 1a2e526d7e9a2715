// Rotrs Rotation Transform
// Fixed-point 2D rotation and the per-sensor axis state it runs against

use crate::trig::{lookup_sin_cos, SinCos, FIXED_POINT_SCALE};

/// Immutable rotation settings for one configured sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    /// Rotation in degrees. Any value is accepted and normalized on lookup.
    pub rotation_angle: i32,
}

impl RotationConfig {
    pub fn new(rotation_angle: i32) -> Self {
        Self { rotation_angle }
    }
}

/// Rotate `(x, y)` by the fixed-point coefficients.
///
/// ```text
/// [x']   [cos  -sin] [x]
/// [y'] = [sin   cos] [y]   / 1000
/// ```
///
/// Products are formed in `i64` and divided with truncation toward zero, so
/// rotating by θ and then by -θ is lossy by a unit or two. Results that do
/// not fit in `i32` wrap; callers feeding extreme deltas own that range.
pub fn apply_rotation(x: i32, y: i32, sin_val: i16, cos_val: i16) -> (i32, i32) {
    let (x, y) = (x as i64, y as i64);
    let (s, c) = (sin_val as i64, cos_val as i64);
    let scale = FIXED_POINT_SCALE as i64;

    let new_x = (x * c - y * s) / scale;
    let new_y = (x * s + y * c) / scale;

    (new_x as i32, new_y as i32)
}

/// Axis state of one rotation transform.
///
/// `x` and `y` always hold the last *raw* sample seen on each axis. They are
/// the partner values for the next opposite-axis event, never rotated output.
/// Construction is the only initialization; the coefficients never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    x: i32,
    y: i32,
    coefficients: SinCos,
}

impl RotationState {
    /// Precompute the coefficients for `config` and zero both axes.
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            x: 0,
            y: 0,
            coefficients: lookup_sin_cos(config.rotation_angle),
        }
    }

    /// Combine a new raw X with the stored Y, remember the raw X and return the
    /// rotated X component.
    pub fn rotate_x(&mut self, value: i32) -> i32 {
        let (new_x, _) = apply_rotation(value, self.y, self.sin_val(), self.cos_val());
        self.x = value;
        new_x
    }

    /// Combine the stored X with a new raw Y, remember the raw Y and return the
    /// rotated Y component.
    pub fn rotate_y(&mut self, value: i32) -> i32 {
        let (_, new_y) = apply_rotation(self.x, value, self.sin_val(), self.cos_val());
        self.y = value;
        new_y
    }

    /// Last raw X sample
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Last raw Y sample
    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn sin_val(&self) -> i16 {
        self.coefficients.sin
    }

    pub fn cos_val(&self) -> i16 {
        self.coefficients.cos
    }

    pub fn coefficients(&self) -> SinCos {
        self.coefficients
    }
}
