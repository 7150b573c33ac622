//! CLI command implementations.

pub mod calibrate;
pub mod convert;
pub mod cs01;
pub mod curve;

pub use calibrate::CalibrateArgs;
pub use convert::ConvertArgs;
pub use cs01::Cs01Args;
pub use curve::CurveArgs;
