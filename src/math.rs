use ndarray::prelude::*;
use num::complex::Complex64;
use num::{One, Zero};
use std::fmt;

/// Pivot magnitude, relative to the largest entry, below which a matrix is treated as singular
pub const SINGULAR_REL_TOL: f64 = 1e-12;

/// Error types for matrix inversion
#[derive(Debug, PartialEq)]
pub enum InversionError {
    NotSquare(String),
    Singular(String),
}

impl fmt::Display for InversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InversionError::NotSquare(msg) => write!(f, "Matrix is not square: {}", msg),
            InversionError::Singular(msg) => write!(f, "Matrix is singular: {}", msg),
        }
    }
}

impl std::error::Error for InversionError {}

/// Compute the inverse of a square complex matrix by Gauss-Jordan elimination
/// with partial pivoting.
///
/// A matrix whose best pivot falls below [`SINGULAR_REL_TOL`] times its largest
/// entry, or that contains non-finite values, is reported as singular.
pub fn inverse(matrix: &ArrayView2<Complex64>) -> Result<Array2<Complex64>, InversionError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(InversionError::NotSquare(format!(
            "Matrix dimensions are {}x{}, expected square matrix",
            rows, cols
        )));
    }
    let n = rows;

    if matrix.iter().any(|x| !x.is_finite()) {
        return Err(InversionError::Singular("matrix has non-finite entries".to_string()));
    }
    let scale = matrix.iter().fold(0.0_f64, |acc, x| acc.max(x.norm()));
    if n > 0 && scale == 0.0 {
        return Err(InversionError::Singular("matrix is all zero".to_string()));
    }
    let threshold = scale * SINGULAR_REL_TOL;

    // Augmented matrix [A | I]
    let mut augmented = Array2::<Complex64>::zeros((n, 2 * n));
    augmented.slice_mut(s![.., ..n]).assign(matrix);
    for i in 0..n {
        augmented[[i, i + n]] = Complex64::one();
    }

    for i in 0..n {
        let mut pivot_row = i;
        let mut max_abs = augmented[[i, i]].norm();
        for k in (i + 1)..n {
            let abs_val = augmented[[k, i]].norm();
            if abs_val > max_abs {
                max_abs = abs_val;
                pivot_row = k;
            }
        }

        if max_abs <= threshold {
            return Err(InversionError::Singular(format!(
                "pivot {} is {:e} against a largest entry of {:e}",
                i, max_abs, scale
            )));
        }

        if pivot_row != i {
            for j in 0..(2 * n) {
                augmented.swap([i, j], [pivot_row, j]);
            }
        }

        let pivot = augmented[[i, i]];
        for j in 0..(2 * n) {
            augmented[[i, j]] /= pivot;
        }

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = augmented[[k, i]];
            if factor.is_zero() {
                continue;
            }
            for j in 0..(2 * n) {
                let delta = augmented[[i, j]] * factor;
                augmented[[k, j]] -= delta;
            }
        }
    }

    Ok(augmented.slice(s![.., n..]).to_owned())
}

/// Diagonal matrix of per-port reference impedances
pub fn diag(z0: &Array1<Complex64>) -> Array2<Complex64> {
    Array2::from_diag(z0)
}

/// Per-port power-wave normalization factors `sqrt(Re(z0))`
pub fn sqrt_re(z0: &Array1<Complex64>) -> Array1<f64> {
    z0.mapv(|z| z.re.sqrt())
}
