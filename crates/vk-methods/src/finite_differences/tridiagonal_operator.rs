//! Tridiagonal matrix operator.

use nalgebra::DMatrix;
use std::ops::{Mul, Neg};
use vk_core::{ensure, Real, Result, Size};

/// An `n × n` tridiagonal matrix.
///
/// Row `i` holds `lower[i−1]` at column `i−1`, `diag[i]` at column `i` and
/// `upper[i]` at column `i+1`.  The size is fixed at construction; the
/// arithmetic operators keep the tridiagonal structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalOperator {
    lower: Vec<Real>,
    diag: Vec<Real>,
    upper: Vec<Real>,
}

impl TridiagonalOperator {
    /// Smallest supported size.
    pub const MIN_SIZE: Size = 3;

    /// A zero operator of size `n`.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if `n < 3`.
    pub fn new(n: Size) -> Result<Self> {
        ensure!(
            n >= Self::MIN_SIZE,
            "invalid size ({n}) for tridiagonal operator (must be >= {})",
            Self::MIN_SIZE
        );
        Ok(Self {
            lower: vec![0.0; n - 1],
            diag: vec![0.0; n],
            upper: vec![0.0; n - 1],
        })
    }

    /// The identity operator of size `n`.
    pub fn identity(n: Size) -> Result<Self> {
        let mut op = Self::new(n)?;
        op.diag.fill(1.0);
        Ok(op)
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> Size {
        self.diag.len()
    }

    /// Sub-diagonal, length `n − 1`.
    pub fn lower_diagonal(&self) -> &[Real] {
        &self.lower
    }

    /// Main diagonal, length `n`.
    pub fn diagonal(&self) -> &[Real] {
        &self.diag
    }

    /// Super-diagonal, length `n − 1`.
    pub fn upper_diagonal(&self) -> &[Real] {
        &self.upper
    }

    /// Set row 0 to `(b, c)` at columns `(0, 1)`.
    pub fn set_first_row(&mut self, b: Real, c: Real) {
        self.diag[0] = b;
        self.upper[0] = c;
    }

    /// Set row `i` to `(a, b, c)` at columns `(i−1, i, i+1)`.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) unless
    /// `1 <= i <= n−2`.
    pub fn set_mid_row(&mut self, i: Size, a: Real, b: Real, c: Real) -> Result<()> {
        let n = self.size();
        ensure!(
            i >= 1 && i + 1 < n,
            "out of range in set_mid_row: {i} not in [1, {}]",
            n - 2
        );
        self.lower[i - 1] = a;
        self.diag[i] = b;
        self.upper[i] = c;
        Ok(())
    }

    /// Set every interior row to the stencil `(a, b, c)`.
    pub fn set_mid_rows(&mut self, a: Real, b: Real, c: Real) {
        let n = self.size();
        for i in 1..n - 1 {
            self.lower[i - 1] = a;
            self.diag[i] = b;
            self.upper[i] = c;
        }
    }

    /// Set row `n−1` to `(a, b)` at columns `(n−2, n−1)`.
    pub fn set_last_row(&mut self, a: Real, b: Real) {
        let n = self.size();
        self.lower[n - 2] = a;
        self.diag[n - 1] = b;
    }

    /// `y = A · v`.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) on a size
    /// mismatch.
    pub fn apply(&self, v: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        ensure!(
            v.len() == n,
            "vector of the wrong size ({}) instead of {n}",
            v.len()
        );
        let mut y = Vec::with_capacity(n);
        y.push(self.diag[0] * v[0] + self.upper[0] * v[1]);
        for i in 1..n - 1 {
            y.push(self.lower[i - 1] * v[i - 1] + self.diag[i] * v[i] + self.upper[i] * v[i + 1]);
        }
        y.push(self.lower[n - 2] * v[n - 2] + self.diag[n - 1] * v[n - 1]);
        Ok(y)
    }

    /// Solve `A · x = rhs` with the Thomas algorithm.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) on a size
    /// mismatch or a zero pivot.
    pub fn solve_for(&self, rhs: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        ensure!(
            rhs.len() == n,
            "rhs vector of the wrong size ({}) instead of {n}",
            rhs.len()
        );
        ensure!(self.diag[0] != 0.0, "division by zero in solve_for (row 0)");

        let mut gamma = vec![0.0; n];
        let mut x = vec![0.0; n];
        let mut bet = self.diag[0];
        x[0] = rhs[0] / bet;
        for j in 1..n {
            gamma[j] = self.upper[j - 1] / bet;
            bet = self.diag[j] - self.lower[j - 1] * gamma[j];
            ensure!(bet != 0.0, "division by zero in solve_for (row {j})");
            x[j] = (rhs[j] - self.lower[j - 1] * x[j - 1]) / bet;
        }
        for j in (0..n - 1).rev() {
            x[j] -= gamma[j + 1] * x[j + 1];
        }
        Ok(x)
    }

    /// `A + B`, for operators of equal size.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// `A − B`, for operators of equal size.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// The dense equivalent.
    pub fn to_dense(&self) -> DMatrix<Real> {
        let n = self.size();
        DMatrix::from_fn(n, n, |i, j| match j as isize - i as isize {
            0 => self.diag[i],
            -1 => self.lower[j],
            1 => self.upper[i],
            _ => 0.0,
        })
    }

    fn zip_with(&self, other: &Self, f: impl Fn(Real, Real) -> Real) -> Result<Self> {
        ensure!(
            self.size() == other.size(),
            "operators with different sizes ({}, {}) cannot be combined",
            self.size(),
            other.size()
        );
        let zip = |a: &[Real], b: &[Real]| -> Vec<Real> {
            a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
        };
        Ok(Self {
            lower: zip(&self.lower, &other.lower),
            diag: zip(&self.diag, &other.diag),
            upper: zip(&self.upper, &other.upper),
        })
    }

    fn map(mut self, f: impl Fn(Real) -> Real) -> Self {
        for v in self
            .lower
            .iter_mut()
            .chain(self.diag.iter_mut())
            .chain(self.upper.iter_mut())
        {
            *v = f(*v);
        }
        self
    }
}

impl Neg for TridiagonalOperator {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl Mul<Real> for TridiagonalOperator {
    type Output = Self;
    fn mul(self, factor: Real) -> Self {
        self.map(|v| v * factor)
    }
}

impl Mul<TridiagonalOperator> for Real {
    type Output = TridiagonalOperator;
    fn mul(self, op: TridiagonalOperator) -> TridiagonalOperator {
        op * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> TridiagonalOperator {
        let mut op = TridiagonalOperator::new(4).unwrap();
        op.set_first_row(2.0, -1.0);
        op.set_mid_rows(-1.0, 2.0, -1.0);
        op.set_last_row(-1.0, 2.0);
        op
    }

    #[test]
    fn rejects_small_sizes() {
        assert!(TridiagonalOperator::new(2).is_err());
        assert!(TridiagonalOperator::new(3).is_ok());
    }

    #[test]
    fn band_lengths() {
        let op = TridiagonalOperator::new(5).unwrap();
        assert_eq!(op.lower_diagonal().len(), 4);
        assert_eq!(op.diagonal().len(), 5);
        assert_eq!(op.upper_diagonal().len(), 4);
    }

    #[test]
    fn apply_matches_dense_product() {
        let op = sample();
        let v = [1.0, -2.0, 0.5, 3.0];
        let y = op.apply(&v).unwrap();
        let dense = op.to_dense() * nalgebra::DVector::from_column_slice(&v);
        for i in 0..4 {
            assert_abs_diff_eq!(y[i], dense[i], epsilon = 1e-15);
        }
    }

    #[test]
    fn solve_inverts_apply() {
        let op = sample();
        let x = [0.3, 1.7, -0.4, 2.2];
        let rhs = op.apply(&x).unwrap();
        let solved = op.solve_for(&rhs).unwrap();
        for i in 0..4 {
            assert_abs_diff_eq!(solved[i], x[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let op = sample();
        assert!(op.apply(&[1.0, 2.0]).unwrap_err().is_precondition());
        assert!(op.solve_for(&[1.0; 5]).is_err());
        let other = TridiagonalOperator::identity(5).unwrap();
        assert!(op.try_add(&other).is_err());
    }

    #[test]
    fn mid_row_bounds() {
        let mut op = sample();
        assert!(op.set_mid_row(0, 1.0, 1.0, 1.0).is_err());
        assert!(op.set_mid_row(3, 1.0, 1.0, 1.0).is_err());
        op.set_mid_row(2, 7.0, 8.0, 9.0).unwrap();
        let d = op.to_dense();
        assert_eq!((d[(2, 1)], d[(2, 2)], d[(2, 3)]), (7.0, 8.0, 9.0));
    }

    #[test]
    fn arithmetic_keeps_structure() {
        let op = sample();
        let id = TridiagonalOperator::identity(4).unwrap();
        let sum = op.try_add(&id).unwrap();
        assert_eq!(sum.diagonal(), &[3.0, 3.0, 3.0, 3.0]);
        let diff = sum.try_sub(&op).unwrap();
        assert_eq!(diff, id);
        let scaled = 0.5 * -op.clone();
        assert_eq!(scaled.upper_diagonal(), &[0.5, 0.5, 0.5]);
        assert_eq!(scaled.to_dense(), op.to_dense() * -0.5);
    }

    #[test]
    fn zero_pivot_is_reported() {
        let op = TridiagonalOperator::new(3).unwrap();
        assert!(op.solve_for(&[1.0, 1.0, 1.0]).is_err());
    }
}
