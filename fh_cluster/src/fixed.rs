use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Serialize, Serializer};

/// Integer stored on disk as `value × S` (gravity ×100, mining base ×10, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Fixed<const S: i32>(i32);

/// Hundredths: gravity, mining difficulty, fleet maintenance percent.
pub type Centi = Fixed<100>;

/// Tenths: colony mining and manufacturing base.
pub type Deci = Fixed<10>;

impl<const S: i32> Fixed<S> {
    pub const SCALE: i32 = S;

    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub fn from_whole(value: i32) -> Self {
        Self(value * S)
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Whole part, truncated toward zero.
    pub fn whole(self) -> i32 {
        self.0 / S
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(S)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    fn decimals() -> usize {
        let mut scale = S;
        let mut width = 0;
        while scale > 1 {
            scale /= 10;
            width += 1;
        }
        width
    }
}

impl<const S: i32> Add for Fixed<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<const S: i32> AddAssign for Fixed<S> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl<const S: i32> Sub for Fixed<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<const S: i32> SubAssign for Fixed<S> {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl<const S: i32> Neg for Fixed<S> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<const S: i32> fmt::Debug for Fixed<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const S: i32> fmt::Display for Fixed<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = i64::from(self.0).abs();
        let scale = i64::from(S);
        let width = Self::decimals();
        if width == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / scale,
            magnitude % scale,
            width = width
        )
    }
}

impl<const S: i32> Serialize for Fixed<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_scale_digits() {
        assert_eq!(Centi::from_raw(125).to_string(), "1.25");
        assert_eq!(Centi::from_raw(7).to_string(), "0.07");
        assert_eq!(Deci::from_raw(305).to_string(), "30.5");
        assert_eq!(Centi::from_raw(-150).to_string(), "-1.50");
        assert_eq!(Centi::from_raw(-5).to_string(), "-0.05");
    }

    #[test]
    fn whole_truncates_toward_zero() {
        assert_eq!(Deci::from_raw(39).whole(), 3);
        assert_eq!(Deci::from_raw(-39).whole(), -3);
        assert_eq!(Centi::from_whole(4).raw(), 400);
    }

    #[test]
    fn arithmetic_works_on_raw_values() {
        let mut total = Deci::zero();
        total += Deci::from_raw(15);
        total += Deci::from_raw(25);
        assert_eq!(total, Deci::from_whole(4));
        assert_eq!((total - Deci::from_raw(50)).abs(), Deci::from_raw(10));
        assert!((Centi::from_raw(101).to_f64() - 1.01).abs() < 1e-9);
    }
}
