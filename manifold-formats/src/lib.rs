//! Format detection and conversion: turn a manifest of any registered format into any other.
//!
//! Every conversion goes through the canonical base format (`w3c`). This crate owns the
//! [`Transformation`] seam, the immutable [`FormatRegistry`] built at startup, the detector and the
//! [`Converter`]. It never performs network I/O; the only local read is an optional template
//! override for the Windows 10 format.

mod convert;
mod detect;
mod error;
mod formats;
mod registry;
mod transformation;

pub use convert::Converter;
pub use detect::detect;
pub use error::{ConvertError, RegistryError};
pub use formats::{ChromeOs, Firefox, W3c, Windows10};
pub use registry::{FormatRegistry, FormatRegistryBuilder, FormatSummary};
pub use transformation::{Direction, Transformation};
