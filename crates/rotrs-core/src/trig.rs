// Rotrs Trig Lookup
// Fixed-point sine/cosine from a quarter-wave table with quadrant folding

use std::fmt;

/// Scale factor of every fixed-point coefficient (1.0 == 1000).
pub const FIXED_POINT_SCALE: i32 = 1000;

/// Table resolution in degrees.
pub const ANGLE_STEP_DEG: i32 = 5;

/// Maximum allowed deviation of `sin² + cos²` from `FIXED_POINT_SCALE²`.
///
/// The rounded table peaks at 564 (20° and 70°); anything above this bound
/// means a table entry is wrong.
pub const SIN_COS_NORM_TOLERANCE: i32 = 1000;

const TABLE_LEN: usize = 19;

/// sin(0°..=90°) in 5° steps, scaled by 1000
const SIN_TABLE: [i16; TABLE_LEN] = [
    0, 87, 174, 259, 342, 423, 500, 574, 643, 707, // 0° to 45°
    766, 819, 866, 906, 940, 966, 985, 996, 1000, // 50° to 90°
];

/// cos(0°..=90°) in 5° steps, scaled by 1000
const COS_TABLE: [i16; TABLE_LEN] = [
    1000, 996, 985, 966, 940, 906, 866, 819, 766, 707, // 0° to 45°
    643, 574, 500, 423, 342, 259, 174, 87, 0, // 50° to 90°
];

/// Fixed-point sine/cosine pair, both scaled by [`FIXED_POINT_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinCos {
    pub sin: i16,
    pub cos: i16,
}

impl SinCos {
    /// Coefficients of the identity rotation.
    pub const IDENTITY: SinCos = SinCos { sin: 0, cos: 1000 };

    /// `sin² + cos²`, which should sit near `1000²`.
    pub const fn norm_squared(self) -> i32 {
        let (s, c) = (self.sin as i32, self.cos as i32);
        s * s + c * c
    }

    /// Signed distance of [`norm_squared`](Self::norm_squared) from `1000²`.
    pub const fn norm_error(self) -> i32 {
        self.norm_squared() - FIXED_POINT_SCALE * FIXED_POINT_SCALE
    }
}

impl From<SinCos> for (i16, i16) {
    fn from(value: SinCos) -> Self {
        (value.sin, value.cos)
    }
}

impl fmt::Display for SinCos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sin {}, cos {}", self.sin, self.cos)
    }
}

/// 90° segment of a normalized angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// 0° to 90°
    First,
    /// 90° to 180°
    Second,
    /// 180° to 270°
    Third,
    /// 270° to 360°
    Fourth,
}

impl Quadrant {
    /// Quadrant of an angle already normalized to `[0, 360)`.
    pub const fn of(normalized: i32) -> Self {
        match normalized / 90 {
            0 => Quadrant::First,
            1 => Quadrant::Second,
            2 => Quadrant::Third,
            _ => Quadrant::Fourth,
        }
    }

    /// Apply the sign/swap identities to base values taken from the 0°-90° table.
    pub const fn fold(self, sin_base: i16, cos_base: i16) -> SinCos {
        match self {
            Quadrant::First => SinCos {
                sin: sin_base,
                cos: cos_base,
            },
            Quadrant::Second => SinCos {
                sin: cos_base,
                cos: -sin_base,
            },
            Quadrant::Third => SinCos {
                sin: -sin_base,
                cos: -cos_base,
            },
            Quadrant::Fourth => SinCos {
                sin: -cos_base,
                cos: sin_base,
            },
        }
    }
}

/// Reduce any angle to `[0, 360)` with floored modulo.
pub const fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Look up fixed-point sine and cosine for an angle in degrees.
///
/// Total over all `i32` inputs. Angles that are not a multiple of
/// [`ANGLE_STEP_DEG`] are rounded down to the nearest 5° bucket of their
/// normalized value, so 47° uses the 45° entry and -47° (313°) uses 310°.
pub const fn lookup_sin_cos(angle: i32) -> SinCos {
    let normalized = normalize_angle(angle);
    let index = ((normalized % 90) / ANGLE_STEP_DEG) as usize;

    Quadrant::of(normalized).fold(SIN_TABLE[index], COS_TABLE[index])
}
