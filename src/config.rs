use crate::enums::RFDataFormat;
use crate::error::{DeembedError, Result};
use crate::frequency::FrequencyCheck;
use crate::load::LoadSpec;
use std::path::{Path, PathBuf};

/// Everything a single de-embedding run needs
#[derive(Clone, Debug, PartialEq)]
pub struct DeembedConfig {
    measured: PathBuf,
    port1: LoadSpec,
    port2: LoadSpec,
    output: PathBuf,
    z0: Option<f64>,
    grid_check: FrequencyCheck,
    format: RFDataFormat,
}

impl DeembedConfig {
    pub fn builder() -> DeembedConfigBuilder {
        DeembedConfigBuilder::new()
    }

    pub fn format(&self) -> RFDataFormat {
        self.format
    }

    pub fn grid_check(&self) -> FrequencyCheck {
        self.grid_check
    }

    pub fn measured(&self) -> &Path {
        &self.measured
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn port1(&self) -> &LoadSpec {
        &self.port1
    }

    pub fn port2(&self) -> &LoadSpec {
        &self.port2
    }

    /// Output reference impedance override
    pub fn z0(&self) -> Option<f64> {
        self.z0
    }
}

/// Builder design pattern for DeembedConfig
#[derive(Clone, Debug, Default)]
pub struct DeembedConfigBuilder {
    measured: Option<PathBuf>,
    port1: Option<LoadSpec>,
    port2: Option<LoadSpec>,
    output: Option<PathBuf>,
    z0: Option<f64>,
    grid_check: FrequencyCheck,
    format: RFDataFormat,
}

impl DeembedConfigBuilder {
    pub fn new() -> Self {
        DeembedConfigBuilder::default()
    }

    /// Measured two-port touchstone file
    pub fn measured<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.measured = Some(path.into());
        self
    }

    pub fn port1(mut self, load: LoadSpec) -> Self {
        self.port1 = Some(load);
        self
    }

    pub fn port2(mut self, load: LoadSpec) -> Self {
        self.port2 = Some(load);
        self
    }

    /// Use the same load on both ports
    pub fn loads(self, load: LoadSpec) -> Self {
        self.port1(load.clone()).port2(load)
    }

    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn z0(mut self, z0: Option<f64>) -> Self {
        self.z0 = z0;
        self
    }

    pub fn grid_check(mut self, check: FrequencyCheck) -> Self {
        self.grid_check = check;
        self
    }

    pub fn format(mut self, format: RFDataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> Result<DeembedConfig> {
        let missing = |field: &str| DeembedError::InvalidConfiguration(format!("{} is required", field));

        if let Some(z0) = self.z0 {
            if !(z0.is_finite() && z0 > 0.0) {
                return Err(DeembedError::InvalidConfiguration(format!(
                    "z0 must be a finite, positive impedance, got {}",
                    z0
                )));
            }
        }

        Ok(DeembedConfig {
            measured: self.measured.ok_or_else(|| missing("measured file"))?,
            port1: self.port1.ok_or_else(|| missing("port 1 load"))?,
            port2: self.port2.ok_or_else(|| missing("port 2 load"))?,
            output: self.output.ok_or_else(|| missing("output file"))?,
            z0: self.z0,
            grid_check: self.grid_check,
            format: self.format,
        })
    }
}
