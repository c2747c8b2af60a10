//! Port load resolution
//!
//! A load is either one complex impedance used at every frequency or a
//! one-port touchstone file whose input impedance varies over the sweep.

use crate::error::{DeembedError, Result};
use crate::file::read_touchstone;
use crate::frequency::{Frequency, FrequencyCheck};
use crate::network::{Network, NetworkPoint, PortPoints};
use num::complex::{c64, Complex64};
use num::One;
use regex::Regex;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const RE_NUM: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

/// Load attached to one port of the measured network
#[derive(Clone, Debug, PartialEq)]
pub enum LoadSpec {
    /// One impedance, in ohm, at every frequency
    Fixed(Complex64),
    /// One-port touchstone file giving the impedance at each frequency
    Swept(PathBuf),
}

impl LoadSpec {
    /// Classify a command line load argument.
    ///
    /// Anything named like a touchstone file is taken as a dataset and
    /// must be one-port; everything else has to be a complex literal.
    pub fn from_arg(arg: &str) -> Result<LoadSpec> {
        let re_ext = Regex::new(r"(?i)^s(\d+)p$").expect("Invalid regex!");
        let path = Path::new(arg);
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if let Some(caps) = re_ext.captures(ext) {
            return match &caps[1] {
                "1" => Ok(LoadSpec::Swept(path.to_path_buf())),
                n => Err(DeembedError::invalid_load(
                    arg,
                    format!("'.{}' is a {}-port dataset, loads must be one-port", ext, n),
                )),
            };
        }

        let z = parse_complex(arg).map_err(|e| {
            DeembedError::invalid_load(arg, format!("not a complex impedance or .s1p file ({})", e))
        })?;
        Ok(LoadSpec::Fixed(z))
    }
}

impl FromStr for LoadSpec {
    type Err = DeembedError;

    fn from_str(val: &str) -> Result<Self> {
        LoadSpec::from_arg(val)
    }
}

impl fmt::Display for LoadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSpec::Fixed(z) if z.im < 0.0 => write!(f, "{}-{}j", z.re, -z.im),
            LoadSpec::Fixed(z) => write!(f, "{}+{}j", z.re, z.im),
            LoadSpec::Swept(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parse a complex literal such as `75+10j`, `50-5j`, `80`, `-j` or `(1e3+2j)`.
///
/// Whitespace is ignored and one pair of enclosing parentheses is allowed.
/// `inf` and `open` give an infinite (open circuit) impedance.
pub fn parse_complex(val: &str) -> std::result::Result<Complex64, SimpleError> {
    let compact: String = val.chars().filter(|c| !c.is_whitespace()).collect();
    let body = compact
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(&compact);
    if body.is_empty() {
        bail!("empty value");
    }

    match body.to_lowercase().as_str() {
        "inf" | "+inf" | "open" => return Ok(c64(f64::INFINITY, 0.0)),
        _ => {}
    }

    let re_real = Regex::new(&format!(r"^([+-]?{RE_NUM})$")).expect("Invalid regex!");
    let re_imag = Regex::new(&format!(r"^([+-]?)({RE_NUM})?[jJ]$")).expect("Invalid regex!");
    let re_complex =
        Regex::new(&format!(r"^([+-]?{RE_NUM})([+-])({RE_NUM})?[jJ]$")).expect("Invalid regex!");

    let number = |s: &str| -> std::result::Result<f64, SimpleError> {
        s.parse::<f64>()
            .map_err(|e| SimpleError::new(format!("'{}': {}", s, e)))
    };
    let imag = |sign: &str, mag: Option<&str>| -> std::result::Result<f64, SimpleError> {
        let mag = match mag {
            Some(m) => number(m)?,
            None => 1.0,
        };
        Ok(if sign == "-" { -mag } else { mag })
    };

    if let Some(caps) = re_real.captures(body) {
        Ok(c64(number(&caps[1])?, 0.0))
    } else if let Some(caps) = re_imag.captures(body) {
        Ok(c64(0.0, imag(&caps[1], caps.get(2).map(|m| m.as_str()))?))
    } else if let Some(caps) = re_complex.captures(body) {
        let re = number(&caps[1])?;
        Ok(c64(re, imag(&caps[2], caps.get(3).map(|m| m.as_str()))?))
    } else {
        bail!("'{}' is not a complex number", val)
    }
}

/// Impedance of a load at every point of `freq`.
///
/// Swept loads are read from disk, must be one-port and must share the
/// measured sweep under `check`. Their impedance is Z11 of the file; a
/// reflection of exactly +1 is an open circuit and gives infinite impedance.
pub fn resolve(spec: &LoadSpec, freq: &Frequency, check: FrequencyCheck) -> Result<PortPoints> {
    match spec {
        LoadSpec::Fixed(z) => {
            debug!(load = %spec, npts = freq.npts(), "fixed load");
            Ok(PortPoints::from_elem(freq.npts(), *z))
        }
        LoadSpec::Swept(path) => {
            let net = read_touchstone(path)?;
            if net.nports() != 1 {
                return Err(DeembedError::invalid_load(
                    &path.display().to_string(),
                    format!("dataset has {} ports, loads must be one-port", net.nports()),
                ));
            }
            check.validate(freq, net.freq(), &format!("load '{}'", path.display()))?;
            debug!(load = %spec, npts = net.npts(), ?check, "swept load");
            one_port_impedance(&net)
        }
    }
}

fn one_port_impedance(net: &Network) -> Result<PortPoints> {
    let mut z = PortPoints::zeros(net.npts());
    for (idx, pt) in net.s().outer_iter().enumerate() {
        z[idx] = if pt[[0, 0]] == Complex64::one() {
            c64(f64::INFINITY, 0.0)
        } else {
            let zp = pt.to_owned().s_to_z(net.z0()).ok_or(DeembedError::SingularMatrix {
                conversion: "S to Z",
                index: idx,
                freq: net.freq().freq_at(idx),
            })?;
            zp[[0, 0]]
        };
    }
    Ok(z)
}
