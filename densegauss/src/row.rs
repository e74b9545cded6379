use ref_cast::RefCast;
use std::fmt;
use std::ops::{Index, IndexMut, Range, RangeFrom};

use crate::scalar::Scalar;

/// A borrowed row of a [`crate::DenseMatrix`], or any other contiguous run of elements
///
/// This is a transparent wrapper around `[T]` that carries the row-level arithmetic used by
/// multiplication, elimination and back substitution.
#[derive(RefCast, PartialEq, Debug)]
#[repr(transparent)]
pub struct Row<T>([T]);

impl<T: Scalar> Row<T> {
    #[inline]
    pub fn new(elements: &[T]) -> &Self {
        Row::ref_cast(elements)
    }

    #[inline]
    pub fn new_mut(elements: &mut [T]) -> &mut Self {
        Row::ref_cast_mut(elements)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().copied()
    }

    /// Dot product with `other`, which must have the same length
    ///
    /// `None` if any product or partial sum overflows `T`.
    #[inline]
    pub fn dot(&self, other: &[T]) -> Option<T> {
        self.0
            .iter()
            .zip(other.iter())
            .try_fold(T::zero(), |acc, (&a, &b)| acc.checked_add(a.checked_mul(b)?))
    }

    /// Adds `factor * other` to this row, elementwise
    ///
    /// On overflow this returns `None`, with the entries before the overflowing one already
    /// updated.
    #[inline]
    pub fn add_scaled(&mut self, other: &Row<T>, factor: T) -> Option<()> {
        for (a, &b) in self.0.iter_mut().zip(other.0.iter()) {
            *a = a.checked_add(b.checked_mul(factor)?)?;
        }
        Some(())
    }

    /// Subtracts `factor * other` from this row, elementwise
    ///
    /// Overflow is handled as in [`Row::add_scaled`].
    #[inline]
    pub fn sub_scaled(&mut self, other: &Row<T>, factor: T) -> Option<()> {
        for (a, &b) in self.0.iter_mut().zip(other.0.iter()) {
            *a = a.checked_sub(b.checked_mul(factor)?)?;
        }
        Some(())
    }

    #[inline]
    pub fn swap_with(&mut self, other: &mut Row<T>) {
        self.0.swap_with_slice(&mut other.0);
    }
}

impl<T> Index<usize> for Row<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for Row<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<T> Index<Range<usize>> for Row<T> {
    type Output = Row<T>;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        Row::ref_cast(&self.0[index])
    }
}

impl<T> Index<RangeFrom<usize>> for Row<T> {
    type Output = Row<T>;

    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        Row::ref_cast(&self.0[index])
    }
}

impl<T> IndexMut<Range<usize>> for Row<T> {
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        Row::ref_cast_mut(&mut self.0[index])
    }
}

impl<T> IndexMut<RangeFrom<usize>> for Row<T> {
    fn index_mut(&mut self, index: RangeFrom<usize>) -> &mut Self::Output {
        Row::ref_cast_mut(&mut self.0[index])
    }
}

/// Formats each element with 3 decimals, right-aligned to `f.width()` if one is given, in the
/// pipe-delimited layout used by [`crate::DenseMatrix::render`]
impl<T: Scalar> fmt::Display for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = f.width().unwrap_or(0);
        write!(f, "| ")?;
        for (j, x) in self.0.iter().enumerate() {
            if j != 0 {
                write!(f, "| ")?;
            }
            write!(f, "{:>width$}", render_cell(x), width = width)?;
        }
        write!(f, "|")
    }
}

/// Integers have no precision in `fmt`, so every element goes through `f64` when it can
pub(crate) fn render_cell<T: Scalar>(x: &T) -> String {
    match x.to_f64() {
        Some(v) => format!("{:.3}", v),
        None => format!("{}", x),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dot_and_sub_scaled() {
        let a = [1.0, 2.0, 3.0];
        let mut b = [4.0, 5.0, 6.0];
        assert_eq!(Row::new(&a).dot(&b), Some(32.0));

        Row::new_mut(&mut b).sub_scaled(Row::new(&a), 2.0).unwrap();
        assert_eq!(b, [2.0, 1.0, 0.0]);

        Row::new_mut(&mut b).add_scaled(Row::new(&a), 1.0).unwrap();
        assert_eq!(b, [3.0, 3.0, 3.0]);

        let mut c = [7, 7, 7];
        Row::new_mut(&mut c)[1..]
            .sub_scaled(&Row::new(&[1, 2, 3])[1..], 3)
            .unwrap();
        assert_eq!(c, [7, 1, -2]);
    }

    #[test]
    fn overflowing_row_ops() {
        let big = [i32::MAX, 1];
        assert_eq!(Row::new(&big).dot(&[1, 1]), None);
        assert_eq!(Row::new(&big).dot(&[2, 0]), None);
        assert_eq!(Row::new(&big).dot(&[1, 0]), Some(i32::MAX));

        let mut c = [1, i32::MIN];
        assert_eq!(Row::new_mut(&mut c).sub_scaled(Row::new(&[1, 1]), 1), None);
        assert_eq!(c, [0, i32::MIN]);

        let mut d = [0u8, 0];
        assert_eq!(Row::new_mut(&mut d).add_scaled(Row::new(&[100, 1]), 3), None);
    }

    #[test]
    fn swap() {
        let mut a = [1, 2];
        let mut b = [3, 4];
        Row::new_mut(&mut a).swap_with(Row::new_mut(&mut b));
        assert_eq!(a, [3, 4]);
        assert_eq!(b, [1, 2]);
    }

    #[test]
    fn display() {
        assert_eq!(Row::new(&[1, -2, 30]).to_string(), "| 1.000| -2.000| 30.000|");
        assert_eq!(
            format!("{:7}", Row::new(&[0.5, -12.25])),
            "|   0.500| -12.250|"
        );
    }
}
