use num_traits::{Num, NumAssignOps, NumCast, ToPrimitive};
use std::fmt;

use crate::source::{MatrixSource, SourceError};

/// Numeric element of a [`crate::DenseMatrix`]
///
/// Implemented for the primitive integer and floating-point types. Integer types divide with
/// truncation during elimination, so they only give meaningful solutions for systems whose
/// elimination is exact.
///
/// All arithmetic in the matrix operators and the solvers goes through the `checked_*` methods,
/// so an integer result that does not fit in `Self` is reported as
/// [`crate::MatrixError::Overflow`] rather than panicking or wrapping. Floating-point types
/// never report overflow; they follow IEEE 754 and saturate to infinity.
pub trait Scalar:
    Num + NumAssignOps + Copy + PartialOrd + ToPrimitive + fmt::Debug + fmt::Display
{
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// `None` on overflow, and on division by zero for integer types
    fn checked_div(self, rhs: Self) -> Option<Self>;
}

macro_rules! integer_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> {
                <$t>::checked_mul(self, rhs)
            }

            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> {
                <$t>::checked_div(self, rhs)
            }
        }
    )*};
}

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }

            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                Some(self - rhs)
            }

            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> {
                Some(self * rhs)
            }

            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> {
                Some(self / rhs)
            }
        }
    )*};
}

integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_scalar!(f32, f64);

/// A [`Scalar`] that knows which grid of a [`MatrixSource`] it is read from
pub trait GridElement: Scalar {
    fn read_grid(source: &mut impl MatrixSource) -> Result<Vec<Vec<Self>>, SourceError>;
}

fn narrow<S: ToPrimitive + Copy + fmt::Display, T: NumCast>(
    grid: Vec<Vec<S>>,
) -> Result<Vec<Vec<T>>, SourceError> {
    grid.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| {
                    <T as NumCast>::from(v).ok_or_else(|| SourceError::OutOfRange {
                        value: v.to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

impl GridElement for i64 {
    #[inline]
    fn read_grid(source: &mut impl MatrixSource) -> Result<Vec<Vec<Self>>, SourceError> {
        source.read_integer_grid()
    }
}

impl GridElement for i32 {
    fn read_grid(source: &mut impl MatrixSource) -> Result<Vec<Vec<Self>>, SourceError> {
        narrow(source.read_integer_grid()?)
    }
}

impl GridElement for f64 {
    #[inline]
    fn read_grid(source: &mut impl MatrixSource) -> Result<Vec<Vec<Self>>, SourceError> {
        source.read_real_grid()
    }
}

impl GridElement for f32 {
    fn read_grid(source: &mut impl MatrixSource) -> Result<Vec<Vec<Self>>, SourceError> {
        narrow(source.read_real_grid()?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::TextGrid;

    #[test]
    fn integer_narrowing() {
        let mut src = TextGrid::new("1 2\n3 4");
        assert_eq!(i32::read_grid(&mut src).unwrap(), vec![vec![1, 2], vec![3, 4]]);

        let mut src = TextGrid::new("1 99999999999");
        assert!(matches!(
            i32::read_grid(&mut src),
            Err(SourceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(Scalar::checked_div(i32::MIN, -1), None);
        assert_eq!(Scalar::checked_div(7i32, 0), None);
        assert_eq!(Scalar::checked_div(-7i32, 2), Some(-3));
        assert_eq!(Scalar::checked_add(i32::MAX, 1), None);
        assert_eq!(Scalar::checked_sub(0u8, 1), None);
        assert_eq!(Scalar::checked_mul(i64::MAX, 2), None);
        assert_eq!(Scalar::checked_mul(f64::MAX, 2.0), Some(f64::INFINITY));
    }

    #[test]
    fn real_grid() {
        let mut src = TextGrid::new("1.5 -2\n0 4.25");
        assert_eq!(
            f32::read_grid(&mut src).unwrap(),
            vec![vec![1.5, -2.0], vec![0.0, 4.25]]
        );
    }
}
