use crate::error::{DeembedError, Result};
use crate::frequency::Frequency;
use float_cmp::F64Margin;
use ndarray::prelude::*;
use num::complex::Complex64;

pub mod builder;
pub mod point;

pub use self::builder::NetworkBuilder;
pub use self::point::{NetworkPoint, Point};

/// Network parameters over a sweep, indexed `[point, row, col]`
pub type Points = Array3<Complex64>;
/// One value per frequency point
pub type PortPoints = Array1<Complex64>;

/// An n-port network described by its S-parameters over a frequency sweep.
///
/// `z0` holds the reference impedance of each port and applies to every
/// frequency point. Derived representations are computed on demand.
///
/// ## Example
/// ```
/// use deembed::prelude::*;
/// use ndarray::prelude::*;
/// use num::complex::c64;
///
/// let net = NetworkBuilder::new()
///     .freq(Frequency::from_vec(vec![1.0], Unit::Giga))
///     .z0_scalar(c64(50.0, 0.0))
///     .s(array![[[c64(0.5, 0.0), c64(0.0, 0.0)], [c64(0.0, 0.0), c64(0.5, 0.0)]]])
///     .name("dut")
///     .build()
///     .unwrap();
/// assert_eq!(net.nports(), 2);
/// assert_eq!(net.npts(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Network {
    name: String,
    comments: String,
    freq: Frequency,
    z0: PortPoints,
    s: Points,
}

impl Network {
    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn freq(&self) -> &Frequency {
        &self.freq
    }

    pub fn is_reciprocal(&self, margin: F64Margin) -> bool {
        self.s
            .outer_iter()
            .all(|pt| pt.to_owned().is_reciprocal(margin))
    }

    pub fn is_symmetric(&self, margin: F64Margin) -> bool {
        self.s
            .outer_iter()
            .all(|pt| pt.to_owned().is_symmetric(margin))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nports(&self) -> usize {
        self.s.len_of(Axis(1))
    }

    pub fn npts(&self) -> usize {
        self.s.len_of(Axis(0))
    }

    pub fn s(&self) -> &Points {
        &self.s
    }

    pub fn s_at(&self, idx: usize) -> ArrayView2<Complex64> {
        self.s.index_axis(Axis(0), idx)
    }

    /// Admittance parameters at every point
    pub fn y(&self) -> Result<Points> {
        self.convert("S to Y", |pt, z0| pt.s_to_y(z0))
    }

    /// Impedance parameters at every point
    pub fn z(&self) -> Result<Points> {
        self.convert("S to Z", |pt, z0| pt.s_to_z(z0))
    }

    pub fn z0(&self) -> &PortPoints {
        &self.z0
    }

    fn convert<F>(&self, conversion: &'static str, f: F) -> Result<Points>
    where
        F: Fn(&Point, &PortPoints) -> Option<Point>,
    {
        map_points(&self.s, &self.z0, &self.freq, conversion, f)
    }
}

/// Apply a per-point conversion across a sweep, failing on the first point it cannot convert
pub(crate) fn map_points<F>(
    net: &Points,
    z0: &PortPoints,
    freq: &Frequency,
    conversion: &'static str,
    f: F,
) -> Result<Points>
where
    F: Fn(&Point, &PortPoints) -> Option<Point>,
{
    let mut out = Points::zeros(net.dim());
    for (idx, pt) in net.outer_iter().enumerate() {
        let converted = f(&pt.to_owned(), z0).ok_or(DeembedError::SingularMatrix {
            conversion,
            index: idx,
            freq: freq.freq_at(idx),
        })?;
        out.index_axis_mut(Axis(0), idx).assign(&converted);
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::enums::Unit;
    use crate::util::comp_c64;
    use num::complex::c64;

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    };

    fn one_port(s11: Vec<Complex64>) -> Network {
        let npts = s11.len();
        let freqs = (1..=npts).map(|f| f as f64).collect();
        NetworkBuilder::new()
            .freq(Frequency::from_vec(freqs, Unit::Giga))
            .z0_scalar(c64(50.0, 0.0))
            .s(Array3::from_shape_vec((npts, 1, 1), s11).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn network_dimensions() {
        let net = one_port(vec![c64(0.0, 0.0), c64(0.5, 0.0), c64(-0.5, 0.0)]);
        assert_eq!(net.nports(), 1);
        assert_eq!(net.npts(), 3);
        assert_eq!(net.s_at(1)[[0, 0]], c64(0.5, 0.0));
    }

    #[test]
    fn network_z_of_short_fails() {
        let net = one_port(vec![c64(0.0, 0.0), c64(1.0, 0.0)]);
        match net.z() {
            Err(DeembedError::SingularMatrix { index, freq, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(freq, 2.0e9);
            }
            other => panic!("expected singular matrix, got {:?}", other),
        }
    }

    #[test]
    fn network_y_matches_point_conversion() {
        let s = array![
            [[c64(0.1, 0.1), c64(0.6, 0.0)], [c64(0.6, 0.0), c64(0.1, 0.1)]],
            [[c64(0.2, -0.3), c64(0.5, 0.2)], [c64(0.5, 0.2), c64(0.2, -0.3)]]
        ];
        let net = NetworkBuilder::new()
            .freq(Frequency::from_vec(vec![1.0, 2.0], Unit::Giga))
            .z0_scalar(c64(50.0, 0.0))
            .s(s.clone())
            .build()
            .unwrap();
        let y = net.y().unwrap();
        let z0 = net.z0().clone();
        for i in 0..2 {
            let exemplar = s.index_axis(Axis(0), i).to_owned().s_to_y(&z0).unwrap();
            assert_eq!(exemplar, y.index_axis(Axis(0), i));
        }
        assert!(net.is_reciprocal(MARGIN));
        assert!(net.is_symmetric(MARGIN));
    }
}
