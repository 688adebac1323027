//! The simulation engine.
//!
//! A [`Simulation`] owns the atom collection and advances it with velocity Verlet.
//! Each step the [`ForceField`] rebuilds every atom's force. Every
//! `bonding_interval` steps the [`BondingEngine`] breaks and forms bonds, and the
//! [`MoleculeTracker`] re-derives molecules when the bond graph changed.
//!
//! - [`config`] – Tunable constants, loadable from TOML.
//! - [`units`] – Physical constants of the eV/Å/amu/fs unit system.
//! - [`forces`] – Morse, Lennard-Jones, Coulomb and VSEPR angle terms.
//! - [`bonding`] – Ionic and covalent formation, breaking, and the reaction log.
//! - [`tracker`] – Connected components and formulas.

mod error;
mod simulation;
mod spatial;

pub mod bonding;
pub mod config;
pub mod forces;
pub mod tracker;
pub mod units;

pub use bonding::{BondingEngine, BondingOutcome, ReactionEvent, ReactionKind};
pub use config::{
    BondingParams, ForceFieldParams, IntegratorParams, SimulationParams, get_default_parameters,
    load_parameters,
};
pub use error::Error;
pub use forces::{ForceField, PotentialEnergy};
pub use simulation::{EnergyReport, Simulation};
pub use tracker::MoleculeTracker;
