//! Input and output around the engine.
//!
//! - [`elements`] – The JSON element reference table (and the embedded default).
//! - [`scenario`] – Initial atom layouts from TOML, plus built-in presets.
//! - [`xyz`] – Multi-frame XYZ trajectories.
//! - [`sdf`] – SDF snapshots of the live bond graph.

use std::fmt;

pub mod elements;
pub mod error;
pub mod scenario;
pub mod sdf;
pub mod xyz;

pub use elements::{default_table, parse_element_table, read_element_table};
pub use error::Error;
pub use scenario::{PRESET_NAMES, Scenario, parse_scenario, preset, read_scenario};

/// Output formats the writers support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xyz,
    Sdf,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Xyz => "xyz",
            Format::Sdf => "sdf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xyz => write!(f, "XYZ"),
            Format::Sdf => write!(f, "SDF"),
        }
    }
}
