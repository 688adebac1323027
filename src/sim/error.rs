//! Error types for the simulation engine.
//!
//! Physical edge cases (coincident atoms, empty electron shells, declined bonds) are
//! handled in place and never surface here. These variants cover configuration and
//! caller mistakes only.

use thiserror::Error;

/// Errors raised while configuring or driving a [`Simulation`](super::Simulation).
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse simulation parameters TOML.
    #[error("failed to parse simulation parameters: {0}")]
    ParameterParse(#[from] toml::de::Error),

    /// A parameter is outside its meaningful range.
    #[error("invalid parameter '{name}': {detail}")]
    InvalidParameter {
        /// Dotted parameter path, e.g. `force_field.cutoff`.
        name: String,
        /// Description of the problem.
        detail: String,
    },

    /// Spawn was asked for an atomic number the element table does not know.
    #[error("element with atomic number {0} is not present in the element table")]
    UnknownElement(u8),

    /// The timestep passed to `step` is zero, negative or not finite.
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
}

impl Error {
    /// Creates an [`InvalidParameter`](Error::InvalidParameter) error.
    ///
    /// # Arguments
    ///
    /// * `name` - Dotted parameter path
    /// * `detail` - Description of the problem
    pub fn invalid_parameter(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            detail: detail.into(),
        }
    }
}
