pub mod config;
pub mod deembed;
pub mod enums;
pub mod error;
pub mod file;
pub mod frequency;
pub mod load;
pub mod math;
pub mod network;
pub mod pipeline;
pub mod prelude;
pub mod util;

pub use ndarray;

/// Create a **[`Point`](crate::network::Point)**, one square matrix of network parameters.
///
/// ```
/// use deembed::point;
/// use num::complex::c64;
///
/// let pt = point![[c64(0.5, 0.0), c64(0.0, 0.0)],
///                 [c64(0.0, 0.0), c64(0.5, 0.0)]];
///
/// assert_eq!(pt.shape(), &[2, 2]);
/// ```
///
/// This macro uses `vec![]`, and has the same ownership semantics;
/// elements are moved into the resulting `Array`.
///
#[macro_export]
macro_rules! point {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::ndarray::Array2::from(vec![$([$($x,)*],)*])
    }};
}
