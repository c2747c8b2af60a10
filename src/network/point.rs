use crate::math::{diag, inverse, sqrt_re};
use float_cmp::{approx_eq, F64Margin};
use ndarray::prelude::*;
use num::complex::Complex64;

/// Network parameters at a single frequency
pub type Point = Array2<Complex64>;

/// Conversions between parameter sets of one frequency point.
///
/// S-parameters use the power-wave definition with a (possibly complex)
/// reference impedance per port. For purely real `z0` this is the same as
/// the pseudo-wave definition. Every conversion returns `None` when the
/// matrix it has to invert is singular.
pub trait NetworkPoint {
    fn is_reciprocal(&self, margin: F64Margin) -> bool;

    fn is_symmetric(&self, margin: F64Margin) -> bool;

    fn s_to_y(&self, z0: &Array1<Complex64>) -> Option<Self>
    where
        Self: Sized;

    fn s_to_z(&self, z0: &Array1<Complex64>) -> Option<Self>
    where
        Self: Sized;

    fn y_to_s(&self, z0: &Array1<Complex64>) -> Option<Self>
    where
        Self: Sized;

    fn y_to_z(&self) -> Option<Self>
    where
        Self: Sized;

    fn z_to_s(&self, z0: &Array1<Complex64>) -> Option<Self>
    where
        Self: Sized;

    fn z_to_y(&self) -> Option<Self>
    where
        Self: Sized;
}

fn c64_approx_eq(a: Complex64, b: Complex64, margin: F64Margin) -> bool {
    approx_eq!(f64, a.re, b.re, margin) && approx_eq!(f64, a.im, b.im, margin)
}

// F^-1 M F with F = diag(1 / (2 sqrt(Re z0)))
fn denormalize(m: Point, z0: &Array1<Complex64>) -> Point {
    let r = sqrt_re(z0);
    Array2::from_shape_fn(m.dim(), |(i, j)| m[[i, j]] * (r[i] / r[j]))
}

// F M F^-1 with F = diag(1 / (2 sqrt(Re z0)))
fn normalize(m: Point, z0: &Array1<Complex64>) -> Point {
    let r = sqrt_re(z0);
    Array2::from_shape_fn(m.dim(), |(i, j)| m[[i, j]] * (r[j] / r[i]))
}

impl NetworkPoint for Point {
    fn is_reciprocal(&self, margin: F64Margin) -> bool {
        let n = self.nrows();
        (0..n).all(|i| ((i + 1)..n).all(|j| c64_approx_eq(self[[i, j]], self[[j, i]], margin)))
    }

    fn is_symmetric(&self, margin: F64Margin) -> bool {
        let n = self.nrows();
        self.is_reciprocal(margin)
            && (0..n / 2).all(|i| {
                c64_approx_eq(self[[i, i]], self[[n - 1 - i, n - 1 - i]], margin)
            })
    }

    // Y = F^-1 (S G + G*)^-1 (I - S) F
    fn s_to_y(&self, z0: &Array1<Complex64>) -> Option<Self> {
        if !self.is_square() || self.nrows() != z0.len() {
            return None;
        }
        let id = Point::eye(self.nrows());
        let sum = self.dot(&diag(z0)) + diag(&z0.mapv(|z| z.conj()));
        let m = inverse(&sum.view()).ok()?.dot(&(&id - self));
        Some(denormalize(m, z0))
    }

    // Z = F^-1 (I - S)^-1 (S G + G*) F
    fn s_to_z(&self, z0: &Array1<Complex64>) -> Option<Self> {
        if !self.is_square() || self.nrows() != z0.len() {
            return None;
        }
        let id = Point::eye(self.nrows());
        let sum = self.dot(&diag(z0)) + diag(&z0.mapv(|z| z.conj()));
        let m = inverse(&(&id - self).view()).ok()?.dot(&sum);
        Some(denormalize(m, z0))
    }

    // S = F (I - G* Y) (I + G Y)^-1 F^-1
    fn y_to_s(&self, z0: &Array1<Complex64>) -> Option<Self> {
        if !self.is_square() || self.nrows() != z0.len() {
            return None;
        }
        let id = Point::eye(self.nrows());
        let diff = &id - &diag(&z0.mapv(|z| z.conj())).dot(self);
        let sum = &id + &diag(z0).dot(self);
        let m = diff.dot(&inverse(&sum.view()).ok()?);
        Some(normalize(m, z0))
    }

    fn y_to_z(&self) -> Option<Self> {
        inverse(&self.view()).ok()
    }

    // S = F (Z - G*) (Z + G)^-1 F^-1
    fn z_to_s(&self, z0: &Array1<Complex64>) -> Option<Self> {
        if !self.is_square() || self.nrows() != z0.len() {
            return None;
        }
        let diff = self - &diag(&z0.mapv(|z| z.conj()));
        let sum = self + &diag(z0);
        let m = diff.dot(&inverse(&sum.view()).ok()?);
        Some(normalize(m, z0))
    }

    fn z_to_y(&self) -> Option<Self> {
        inverse(&self.view()).ok()
    }
}
