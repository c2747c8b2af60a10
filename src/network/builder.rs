use crate::enums::RFParameter;
use crate::error::{DeembedError, Result};
use crate::frequency::Frequency;
use crate::network::{map_points, Network, NetworkPoint, Points, PortPoints};
use ndarray::prelude::*;
use num::complex::{c64, Complex64};

#[derive(Clone, Debug)]
enum RefImpedance {
    Scalar(Complex64),
    PerPort(PortPoints),
}

/// Builder design pattern for Network
///
/// Parameters given as Y or Z are converted to S at the reference
/// impedance when the network is built. Ports default to 50 ohm.
#[derive(Clone, Debug, Default)]
pub struct NetworkBuilder {
    name: String,
    comments: String,
    freq: Option<Frequency>,
    z0: Option<RefImpedance>,
    net: Option<(Points, RFParameter)>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        NetworkBuilder::default()
    }

    /// Provide name of Network
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Provide comments for Network
    pub fn comments(mut self, comments: &str) -> Self {
        self.comments = comments.to_string();
        self
    }

    /// Provide Frequency for Network
    pub fn freq(mut self, freq: Frequency) -> Self {
        self.freq = Some(freq);
        self
    }

    /// Provide Z0 of each port for Network
    pub fn z0(mut self, z0: PortPoints) -> Self {
        self.z0 = Some(RefImpedance::PerPort(z0));
        self
    }

    /// Provide one Z0 shared by every port
    pub fn z0_scalar(mut self, z0: Complex64) -> Self {
        self.z0 = Some(RefImpedance::Scalar(z0));
        self
    }

    /// Provide the network data and the parameter type it is expressed in
    pub fn params(mut self, net: Points, param: RFParameter) -> Self {
        self.net = Some((net, param));
        self
    }

    /// Provide scattering parameters representation of Network
    pub fn s(self, net: Points) -> Self {
        self.params(net, RFParameter::S)
    }

    /// Provide admittance parameters representation of Network
    pub fn y(self, net: Points) -> Self {
        self.params(net, RFParameter::Y)
    }

    /// Provide impedance parameters representation of Network
    pub fn z(self, net: Points) -> Self {
        self.params(net, RFParameter::Z)
    }

    pub fn build(self) -> Result<Network> {
        let freq = self.freq.ok_or_else(|| {
            DeembedError::InvalidConfiguration("network needs a frequency sweep".to_string())
        })?;
        let (net, param) = self.net.ok_or_else(|| {
            DeembedError::InvalidConfiguration("network needs parameter data".to_string())
        })?;

        if !freq.is_increasing() {
            return Err(DeembedError::InvalidConfiguration(format!(
                "network '{}' frequencies must be strictly increasing",
                self.name
            )));
        }

        let (npts, nrows, ncols) = net.dim();
        if nrows != ncols {
            return Err(DeembedError::PortCount {
                context: format!("network '{}' data is {}x{}", self.name, nrows, ncols),
                expected: nrows,
                found: ncols,
            });
        }
        if npts != freq.npts() {
            return Err(DeembedError::FrequencyMismatch {
                context: format!("network '{}'", self.name),
                reason: format!(
                    "{} data point(s) for {} frequencies",
                    npts,
                    freq.npts()
                ),
            });
        }

        let z0 = match self.z0 {
            Some(RefImpedance::PerPort(z0)) => z0,
            Some(RefImpedance::Scalar(z0)) => Array1::from_elem(nrows, z0),
            None => Array1::from_elem(nrows, c64(50.0, 0.0)),
        };
        if z0.len() != nrows {
            return Err(DeembedError::PortCount {
                context: format!("reference impedances of network '{}'", self.name),
                expected: nrows,
                found: z0.len(),
            });
        }

        let s = match param {
            RFParameter::S => net,
            RFParameter::Y => map_points(&net, &z0, &freq, "Y to S", |pt, z0| pt.y_to_s(z0))?,
            RFParameter::Z => map_points(&net, &z0, &freq, "Z to S", |pt, z0| pt.z_to_s(z0))?,
        };

        Ok(Network {
            name: self.name,
            comments: self.comments,
            freq,
            z0,
            s,
        })
    }
}
