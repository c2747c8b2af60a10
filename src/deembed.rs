//! Removal of shunt port loads from measured two-port S-parameters
//!
//! At each frequency the measured S matrix is taken to Y at the measured
//! reference impedance, the load admittance of each port is subtracted from
//! its self-admittance and the result is taken back to S at the output
//! reference impedance. Transfer admittances are left untouched.

use crate::error::{DeembedError, Result};
use crate::network::{Network, NetworkBuilder, NetworkPoint, Point, Points, PortPoints};
use ndarray::prelude::*;
use num::complex::Complex64;
use num::Zero;
use tracing::{debug, trace};

/// Admittance of a load impedance.
///
/// An infinite impedance (open circuit) has zero admittance. A zero
/// impedance has none and gives `None`.
pub fn admittance(z: Complex64) -> Option<Complex64> {
    if z.is_zero() {
        None
    } else if z.is_infinite() {
        Some(Complex64::zero())
    } else {
        Some(z.inv())
    }
}

/// De-embed one frequency point.
///
/// `y_loads` holds the load admittance of port 1 and port 2. On failure the
/// name of the conversion that met a singular matrix is returned.
pub fn deembed_point(
    s: &ArrayView2<Complex64>,
    z0_meas: &PortPoints,
    y_loads: [Complex64; 2],
    z0_out: &PortPoints,
) -> std::result::Result<Point, &'static str> {
    let mut y = s.to_owned().s_to_y(z0_meas).ok_or("S to Y")?;
    y[[0, 0]] -= y_loads[0];
    y[[1, 1]] -= y_loads[1];
    y.y_to_s(z0_out).ok_or("Y to S")
}

/// Remove the port loads `z_load1` and `z_load2` (ohm, one value per point)
/// from a measured two-port.
///
/// The result shares the measured sweep. Its reference impedance is `z0` on
/// both ports when given, otherwise the measured network's own.
pub fn deembed(
    measured: &Network,
    z_load1: &PortPoints,
    z_load2: &PortPoints,
    z0: Option<Complex64>,
) -> Result<Network> {
    if measured.nports() != 2 {
        return Err(DeembedError::PortCount {
            context: format!("measured network '{}'", measured.name()),
            expected: 2,
            found: measured.nports(),
        });
    }

    let npts = measured.npts();
    for (port, loads) in [(1, z_load1), (2, z_load2)] {
        if loads.len() != npts {
            return Err(DeembedError::FrequencyMismatch {
                context: format!("port {} load", port),
                reason: format!(
                    "{} impedance value(s) for {} measured point(s)",
                    loads.len(),
                    npts
                ),
            });
        }
    }

    let z0_out = match z0 {
        Some(z) if !(z.re > 0.0 && z.is_finite()) => {
            return Err(DeembedError::InvalidConfiguration(format!(
                "reference impedance {} needs a finite, positive real part",
                z
            )))
        }
        Some(z) => PortPoints::from_elem(2, z),
        None => measured.z0().clone(),
    };
    debug!(
        npts,
        z0_meas = ?measured.z0().to_vec(),
        z0_out = ?z0_out.to_vec(),
        "de-embedding port loads"
    );

    let mut s = Points::zeros((npts, 2, 2));
    for idx in 0..npts {
        let freq = measured.freq().freq_at(idx);
        let mut y_loads = [Complex64::zero(); 2];
        for (port, (y, z)) in y_loads.iter_mut().zip([z_load1[idx], z_load2[idx]]).enumerate() {
            *y = admittance(z).ok_or(DeembedError::ZeroImpedance {
                port: port + 1,
                index: idx,
                freq,
            })?;
        }

        let pt = deembed_point(&measured.s_at(idx), measured.z0(), y_loads, &z0_out).map_err(
            |conversion| DeembedError::SingularMatrix {
                conversion,
                index: idx,
                freq,
            },
        )?;
        trace!(idx, freq, y1 = %y_loads[0], y2 = %y_loads[1], "point de-embedded");
        s.index_axis_mut(Axis(0), idx).assign(&pt);
    }

    NetworkBuilder::new()
        .name(&format!("{}_intrinsic", measured.name()))
        .comments(measured.comments())
        .freq(measured.freq().clone())
        .z0(z0_out)
        .s(s)
        .build()
}
