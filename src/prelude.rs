pub use crate::config::{DeembedConfig, DeembedConfigBuilder};
pub use crate::deembed::{admittance, deembed, deembed_point};
pub use crate::enums::{RFDataFormat, RFParameter, Unit};
pub use crate::error::DeembedError;
pub use crate::file::{read_touchstone, write_touchstone, write_touchstone_to};
pub use crate::frequency::{Frequency, FrequencyCheck};
pub use crate::load::{parse_complex, resolve, LoadSpec};
pub use crate::network::{Network, NetworkBuilder, NetworkPoint, Point, Points, PortPoints};
pub use crate::pipeline::run;
