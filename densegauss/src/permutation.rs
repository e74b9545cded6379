use std::fmt;

/// Tracks which unknown occupies each column while full pivoting swaps columns
///
/// Entry `i` holds the original 1-based number of the unknown now sitting in column `i`. The
/// table starts as the identity `[1, 2, ..., n]` and is only ever changed by swapping two entries,
/// so it is always a permutation of `1..=n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable(Vec<usize>);

impl PermutationTable {
    pub fn identity(size: usize) -> Self {
        PermutationTable((1..=size).collect())
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
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| v == i + 1)
    }

    /// Checks that the table holds each of `1..=len` exactly once
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.len()];
        for &v in &self.0 {
            if v == 0 || v > self.len() || seen[v - 1] {
                return false;
            }
            seen[v - 1] = true;
        }
        true
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// Index of the entry holding `value`, if any
    pub fn position_of(&self, value: usize) -> Option<usize> {
        self.0.iter().position(|&v| v == value)
    }

    /// Puts a solution computed in permuted column order back into the original order of the
    /// unknowns
    ///
    /// Walks the positions in order. Wherever position `i` does not yet hold unknown `i + 1`, the
    /// entry that does is found and swapped in, in both the table and `x`. Afterwards the table is
    /// the identity.
    pub fn restore_order<T>(&mut self, x: &mut [T]) {
        debug_assert_eq!(x.len(), self.len());
        for i in 0..self.len() {
            if self.0[i] == i + 1 {
                continue;
            }
            // every value in 1..=n is present, and the ones below i + 1 are already placed
            if let Some(j) = self.position_of(i + 1) {
                self.0.swap(i, j);
                x.swap(i, j);
            }
        }
    }
}

impl fmt::Display for PermutationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn search() {
        let t = PermutationTable(vec![4, 3, 2, 5, 1]);
        assert_eq!(t.position_of(3), Some(1));
        assert_eq!(t.position_of(6), None);
        assert!(t.is_permutation());
        assert!(!PermutationTable(vec![1, 1, 3]).is_permutation());
        assert!(!PermutationTable(vec![0, 1]).is_permutation());
    }

    #[test]
    fn restore() {
        // column 0 holds unknown 3, column 1 holds unknown 1, column 2 holds unknown 2
        let mut t = PermutationTable(vec![3, 1, 2]);
        let mut x = vec!["c", "a", "b"];
        t.restore_order(&mut x);
        assert_eq!(x, vec!["a", "b", "c"]);
        assert!(t.is_identity());
    }

    #[test]
    fn random_swaps_stay_permutation() {
        let mut rng = SmallRng::seed_from_u64(1);
        let n = 20;
        let mut t = PermutationTable::identity(n);
        for _ in 0..500 {
            t.swap(rng.random_range(0..n), rng.random_range(0..n));
            assert!(t.is_permutation());
        }

        // x[i] names the unknown in column i, so restoring must sort it
        let mut x = t.as_slice().to_vec();
        t.restore_order(&mut x);
        assert_eq!(x, (1..=n).collect::<Vec<_>>());
        assert!(t.is_identity());
    }

    #[test]
    fn display() {
        assert_eq!(PermutationTable::identity(3).to_string(), "[1, 2, 3]");
    }
}
