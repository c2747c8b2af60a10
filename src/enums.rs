use num::complex::Complex64;
use simple_error::{bail, SimpleError};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Frequency scale used by touchstone option lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    Base,
    Kilo,
    Mega,
    #[default]
    Giga,
    Tera,
}

impl Unit {
    /// Convert a touchstone frequency token (`hz`, `khz`, `mhz`, `ghz`, `thz`)
    pub fn from_option_str(val: &str) -> Result<Unit, SimpleError> {
        match val.to_lowercase().as_str() {
            "hz" => Ok(Unit::Base),
            "khz" => Ok(Unit::Kilo),
            "mhz" => Ok(Unit::Mega),
            "ghz" => Ok(Unit::Giga),
            "thz" => Ok(Unit::Tera),
            _ => bail!("frequency unit '{}' not recognized", val),
        }
    }

    pub fn to_option_str(&self) -> &str {
        match self {
            Unit::Base => "Hz",
            Unit::Kilo => "kHz",
            Unit::Mega => "MHz",
            Unit::Giga => "GHz",
            Unit::Tera => "THz",
        }
    }

    pub fn scale(&self) -> f64 {
        match self {
            Unit::Base => 1.0,
            Unit::Kilo => 1e3,
            Unit::Mega => 1e6,
            Unit::Giga => 1e9,
            Unit::Tera => 1e12,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_option_str())
    }
}

/// Network parameter type carried by a touchstone file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RFParameter {
    #[default]
    S,
    Y,
    Z,
}

impl RFParameter {
    // Convert text from a touchstone option line string into RFParameter type
    pub fn from_option_str(val: &str) -> Result<RFParameter, SimpleError> {
        match val.to_lowercase().as_str() {
            "s" => Ok(RFParameter::S),
            "y" => Ok(RFParameter::Y),
            "z" => Ok(RFParameter::Z),
            "g" | "h" => bail!("{} parameters are not supported", val.to_uppercase()),
            _ => bail!("string not a valid option line type"),
        }
    }

    pub fn to_option_str(&self) -> &str {
        match self {
            RFParameter::S => "S",
            RFParameter::Y => "Y",
            RFParameter::Z => "Z",
        }
    }
}

impl fmt::Display for RFParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_option_str())
    }
}

/// Pair encoding of one complex value in a touchstone record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RFDataFormat {
    #[default]
    RI,
    MA,
    DB,
}

impl RFDataFormat {
    pub fn to_str(&self) -> &str {
        match self {
            RFDataFormat::RI => "RI",
            RFDataFormat::MA => "MA",
            RFDataFormat::DB => "DB",
        }
    }

    /// Build a complex value from the two numbers of a record
    pub fn parse(&self, x: f64, y: f64) -> Complex64 {
        match self {
            RFDataFormat::RI => Complex64::new(x, y),
            RFDataFormat::MA => Complex64::from_polar(x, y.to_radians()),
            RFDataFormat::DB => Complex64::from_polar(10_f64.powf(x / 20.0), y.to_radians()),
        }
    }

    /// Split a complex value into the two numbers of a record
    pub fn split(&self, c: Complex64) -> (f64, f64) {
        match self {
            RFDataFormat::RI => (c.re, c.im),
            RFDataFormat::MA => (c.norm(), c.arg() * 180.0 / PI),
            RFDataFormat::DB => (20.0 * c.norm().log10(), c.arg() * 180.0 / PI),
        }
    }
}

impl FromStr for RFDataFormat {
    type Err = SimpleError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val.to_lowercase().as_str() {
            "ri" => Ok(RFDataFormat::RI),
            "ma" => Ok(RFDataFormat::MA),
            "db" => Ok(RFDataFormat::DB),
            _ => bail!("data format '{}' not recognized", val),
        }
    }
}

impl fmt::Display for RFDataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
