use crate::enums::Unit;
use crate::error::{DeembedError, Result};
use ndarray::prelude::*;

/// Relative tolerance used when comparing two sweeps point by point
pub const FREQ_REL_TOL: f64 = 1e-9;

// Frequency stores values in Hz
#[derive(Clone, Debug, PartialEq)]
pub struct Frequency {
    pts: Array1<f64>,
    unit: Unit,
}

impl Frequency {
    pub fn new(pts: Array1<f64>) -> Frequency {
        Frequency {
            pts,
            unit: Unit::Base,
        }
    }

    /// Values are given in `unit` and kept as the preferred display unit
    pub fn from_vec(f: Vec<f64>, unit: Unit) -> Frequency {
        Frequency {
            pts: Array1::from_vec(f) * unit.scale(),
            unit,
        }
    }

    pub fn freq(&self) -> &Array1<f64> {
        &self.pts
    }

    pub fn freq_at(&self, pt: usize) -> f64 {
        self.pts[pt]
    }

    pub fn freq_scaled(&self, unit: Unit) -> Array1<f64> {
        &self.pts / unit.scale()
    }

    pub fn freq_scaled_at(&self, pt: usize, unit: Unit) -> f64 {
        self.pts[pt] / unit.scale()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn is_increasing(&self) -> bool {
        self.pts.windows(2).into_iter().all(|w| w[1] > w[0])
    }

    pub fn npts(&self) -> usize {
        self.pts.len()
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn with_unit(mut self, unit: Unit) -> Frequency {
        self.unit = unit;
        self
    }
}

/// How strictly another sweep must line up with the reference sweep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrequencyCheck {
    /// Only the number of points has to agree
    Length,
    /// Point count and every frequency value (within [`FREQ_REL_TOL`]) have to agree
    #[default]
    Values,
}

impl FrequencyCheck {
    /// Check `other` against `reference`; `context` names the dataset being checked
    pub fn validate(&self, reference: &Frequency, other: &Frequency, context: &str) -> Result<()> {
        if reference.npts() != other.npts() {
            return Err(DeembedError::FrequencyMismatch {
                context: context.to_string(),
                reason: format!(
                    "{} point(s) where the measured sweep has {}",
                    other.npts(),
                    reference.npts()
                ),
            });
        }
        if *self == FrequencyCheck::Length {
            return Ok(());
        }
        for (i, (a, b)) in reference.freq().iter().zip(other.freq().iter()).enumerate() {
            if (a - b).abs() > FREQ_REL_TOL * a.abs().max(b.abs()) {
                return Err(DeembedError::FrequencyMismatch {
                    context: context.to_string(),
                    reason: format!("point {} is {} Hz where the measured sweep has {} Hz", i, b, a),
                });
            }
        }
        Ok(())
    }
}
