use crate::config::DeembedConfig;
use crate::deembed::deembed;
use crate::error::Result;
use crate::file::{read_touchstone, write_touchstone};
use crate::load::resolve;
use crate::network::Network;
use num::complex::c64;
use tracing::info;

/// Read the measured file, resolve both loads, de-embed and write the result.
///
/// Nothing is written unless every step before it succeeded. The
/// intrinsic network is returned as well.
pub fn run(config: &DeembedConfig) -> Result<Network> {
    let measured = read_touchstone(config.measured())?;
    info!(
        path = %config.measured().display(),
        nports = measured.nports(),
        npts = measured.npts(),
        "measured network loaded"
    );

    let freq = measured.freq();
    let z_load1 = resolve(config.port1(), freq, config.grid_check())?;
    let z_load2 = resolve(config.port2(), freq, config.grid_check())?;
    info!(port1 = %config.port1(), port2 = %config.port2(), "loads resolved");

    let intrinsic = deembed(&measured, &z_load1, &z_load2, config.z0().map(|z| c64(z, 0.0)))?;

    write_touchstone(&intrinsic, config.output(), config.format())?;
    info!(path = %config.output().display(), "intrinsic network written");
    Ok(intrinsic)
}
