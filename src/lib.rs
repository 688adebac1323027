//! An emergent-chemistry sandbox: atoms carrying explicit electrons move under classical
//! forces, and bonds form and break on the fly from each element's electronegativity,
//! ionization energy and electron affinity. Molecules are never declared; they are read
//! off the bond graph as it evolves.
//!
//! # Features
//!
//! - **Electron shells** — Aufbau filling with Slater effective charges; ions are atoms
//!   that gained or lost electrons
//! - **Force field** — Morse bonds, Lennard-Jones and Coulomb non-bonded terms with a
//!   smooth cutoff, and VSEPR-style angle restoring forces
//! - **Bonding** — Born–Haber ionic transfer and covalent sharing gated by a Boltzmann
//!   check, with bond breaking on dissociation, overstretch or thermal escape
//! - **Integration** — Velocity Verlet with a Berendsen thermostat and a reflective box
//! - **I/O** — JSON element tables, TOML scenarios, XYZ trajectories and SDF snapshots
//!
//! # Quick Start
//!
//! ```
//! use emergent_chem::{Simulation, get_default_parameters};
//! use emergent_chem::io::{default_table, preset};
//!
//! let mut sim = Simulation::new(default_table(), get_default_parameters().clone())?;
//!
//! // One oxygen and two hydrogens within bonding range, at 10 K.
//! preset("water")?.apply(&mut sim)?;
//!
//! for _ in 0..200 {
//!     sim.step(1.0)?;
//! }
//!
//! assert_eq!(sim.bond_count(), 2);
//! assert_eq!(sim.molecules().len(), 1);
//! assert_eq!(sim.molecules()[0].formula, "H2O");
//!
//! let energies = sim.energies();
//! assert!(energies.total().is_finite());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — Elements, electrons, atoms, bonds and molecules
//! - [`sim`] — Parameters, force field, bonding engine, molecule tracker and the
//!   [`Simulation`] container
//! - [`io`] — Element tables, scenarios, and trajectory/snapshot writers
//!
//! # Units
//!
//! Energies in eV, lengths in Å, masses in amu, time in fs, charges in e and
//! temperatures in K. Conversion constants live in [`sim::units`].

pub mod io;
pub mod model;
pub mod sim;

pub use model::atom::Atom;
pub use model::bond::Bond;
pub use model::electron::{Electron, QuantumNumbers, Spin};
pub use model::element::{ElementCategory, ElementData, PeriodicTable};
pub use model::molecule::Molecule;
pub use model::types::{BondKind, BondOrder, ParseBondKindError, ParseBondOrderError, Vec3};

pub use sim::{
    BondingParams, EnergyReport, ForceFieldParams, IntegratorParams, ReactionEvent, ReactionKind,
    Simulation, SimulationParams, get_default_parameters, load_parameters,
};

pub use io::Error as IoError;
pub use sim::Error as SimError;
