use crate::sim::Error as SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse element table: {0}")]
    ElementTable(#[from] serde_json::Error),

    #[error("failed to parse scenario: {0}")]
    Scenario(#[from] toml::de::Error),

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("unknown preset '{name}' (available: {available})")]
    UnknownPreset { name: String, available: String },

    #[error("scenario atom #{index} is invalid: {detail}")]
    InvalidAtom { index: usize, detail: String },

    #[error("simulation rejected scenario: {0}")]
    Simulation(#[from] SimError),
}

impl Error {
    pub fn invalid_atom(index: usize, detail: impl Into<String>) -> Self {
        Self::InvalidAtom {
            index,
            detail: detail.into(),
        }
    }
}
