//! Core data structures of the simulated world.
//!
//! - [`element`] – Immutable per-element constants and the [`PeriodicTable`] lookup.
//! - [`electron`] – Quantum numbers, Aufbau filling and Slater effective charges.
//! - [`types`] – Vector alias plus bond kind and bond order classifications.
//! - [`bond`] – One half of a mirrored bond, with its Morse well.
//! - [`atom`] – An atom's identity, kinematics, electrons and bonds.
//! - [`molecule`] – Connected components of the bond graph and Hill formulas.
//!
//! Atoms refer to each other only by index into the simulation's atom collection,
//! so the model contains no reference cycles.
//!
//! [`PeriodicTable`]: element::PeriodicTable

pub mod atom;
pub mod bond;
pub mod electron;
pub mod element;
pub mod molecule;
pub mod types;
