use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// An angle, stored in radians.
///
/// Keeps degrees and radians from being mixed up at call sites; construct
/// with [`deg`] or [`rad`] and read back with [`Angle::degrees`] or
/// [`Angle::radians`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f32);

/// Create an angle from degrees.
#[inline]
pub const fn deg(degrees: f32) -> Angle {
    Angle(degrees * std::f32::consts::PI / 180.0)
}

/// Create an angle from radians.
#[inline]
pub const fn rad(radians: f32) -> Angle {
    Angle(radians)
}

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// The angle in radians.
    #[inline]
    pub const fn radians(self) -> f32 {
        self.0
    }

    /// The angle in degrees.
    #[inline]
    pub fn degrees(self) -> f32 {
        self.0 * 180.0 / std::f32::consts::PI
    }

    #[inline]
    pub fn sin(self) -> f32 {
        self.0.sin()
    }

    #[inline]
    pub fn cos(self) -> f32 {
        self.0.cos()
    }

    #[inline]
    pub fn tan(self) -> f32 {
        self.0.tan()
    }

    /// Sine and cosine in one call.
    #[inline]
    pub fn sin_cos(self) -> (f32, f32) {
        self.0.sin_cos()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f32) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f32> for Angle {
    type Output = Angle;

    fn div(self, rhs: f32) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        self.0 -= rhs.0;
    }
}
