//! Energetically driven bond formation and breaking.
//!
//! One evaluation cycle first collects every bond that should break, removes them,
//! and only then sweeps nearby pairs for new bonds in ascending `(i, j)` order. An atom
//! freed by a break can therefore bond again within the same cycle. Every decision is
//! a deterministic function of the current atoms, the temperature and the
//! [`BondingParams`]; declined attempts leave no trace.

use super::config::BondingParams;
use super::spatial::SpatialGrid;
use super::units::BOLTZMANN;
use crate::model::atom::Atom;
use crate::model::bond::Bond;
use crate::model::types::{BondKind, BondOrder, Vec3};
use log::debug;
use std::fmt;

/// Electronegativities below this are treated as unknown.
const MIN_ELECTRONEGATIVITY: f64 = 0.01;

/// What happened in one reaction-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    IonicFormed,
    CovalentFormed,
    Broken,
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionKind::IonicFormed => write!(f, "ionic"),
            ReactionKind::CovalentFormed => write!(f, "covalent"),
            ReactionKind::Broken => write!(f, "broken"),
        }
    }
}

/// One entry of the append-only reaction log.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEvent {
    /// Simulation time in fs.
    pub time: f64,
    pub kind: ReactionKind,
    /// The two atoms involved; for ionic formation the donor comes first.
    pub atoms: (usize, usize),
    pub description: String,
}

/// Bond count changes produced by one evaluation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondingOutcome {
    /// Ionic and covalent bonds created in the formation pass.
    pub formed: usize,
    /// Bonds removed in the breaking pass.
    pub broken: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakCause {
    Dissociated,
    Overstretched,
    Thermal,
}

impl fmt::Display for BreakCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakCause::Dissociated => write!(f, "dissociated"),
            BreakCause::Overstretched => write!(f, "overstretched"),
            BreakCause::Thermal => write!(f, "thermally unstable"),
        }
    }
}

/// True when `energy` clears `factor·kT`. Equality is rejected.
///
/// The gate only ever rejects: for a fixed energy, raising `kt` can turn a pass into
/// a rejection but never the reverse.
///
/// # Arguments
///
/// * `energy` - Bond energy the candidate would gain, in eV.
/// * `kt` - Thermal energy `kB·T` in eV.
/// * `factor` - Multiple of `kt` the energy has to exceed.
#[inline]
pub fn passes_thermal_gate(energy: f64, kt: f64, factor: f64) -> bool {
    energy > factor * kt
}

/// Born–Haber balance `IE − EA − k/r` of moving one electron across a pair.
///
/// # Arguments
///
/// * `ionization` - Ionization energy the donor pays, in eV.
/// * `affinity` - Electron affinity of the acceptor, in eV.
/// * `coulomb_k` - Coulomb constant in eV·Å/e².
/// * `r` - Donor–acceptor separation in Å.
///
/// # Returns
///
/// The energy change in eV; negative values are exothermic.
#[inline]
pub fn ionic_balance(ionization: f64, affinity: f64, coulomb_k: f64, r: f64) -> f64 {
    ionization - affinity - coulomb_k / r
}

/// Overlap-weighted covalent bond energy at separation `r`.
///
/// The baseline `scale·(√(IE_a·IE_b) + √(EA_a⁺·EA_b⁺))·order` is multiplied by a
/// Gaussian in `r − re` of width `re/2`. Negative affinities count as zero.
///
/// # Arguments
///
/// * `ionization` - Ionization energies of both atoms, in eV.
/// * `affinity` - Electron affinities of both atoms, in eV.
/// * `order` - Bond order (1–3).
/// * `r` - Current separation in Å.
/// * `equilibrium` - Equilibrium separation `re` in Å.
/// * `scale` - Scale applied to the baseline estimate.
///
/// # Returns
///
/// The bond energy in eV, or zero when `equilibrium` is not positive.
pub fn covalent_energy(
    ionization: (f64, f64),
    affinity: (f64, f64),
    order: u32,
    r: f64,
    equilibrium: f64,
    scale: f64,
) -> f64 {
    let ie_mean = (ionization.0 * ionization.1).max(0.0).sqrt();
    let ea_mean = (affinity.0.max(0.0) * affinity.1.max(0.0)).sqrt();
    let baseline = scale * (ie_mean + ea_mean) * order as f64;

    let width = equilibrium / 2.0;
    if width <= 0.0 {
        return 0.0;
    }
    let x = r - equilibrium;
    baseline * (-(x * x) / (2.0 * width * width)).exp()
}

fn equilibrium_distance(a: &Atom, b: &Atom) -> f64 {
    a.element.covalent_radius_angstrom() + b.element.covalent_radius_angstrom()
}

fn distance(a: &Atom, b: &Atom) -> f64 {
    (a.position - b.position).norm()
}

/// Applies the bond formation and breaking rules to a set of atoms.
#[derive(Debug, Clone)]
pub struct BondingEngine {
    params: BondingParams,
    coulomb_k: f64,
    min_distance: f64,
}

impl BondingEngine {
    /// Creates an engine. `coulomb_k` and `min_distance` must match the force field
    /// so that the ionic balance agrees with the electrostatics the atoms feel.
    pub fn new(params: BondingParams, coulomb_k: f64, min_distance: f64) -> Self {
        Self {
            params,
            coulomb_k,
            min_distance,
        }
    }

    pub fn params(&self) -> &BondingParams {
        &self.params
    }

    /// Runs one break-then-form cycle, appending every change to `log`.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The full atom collection; bond partners index into it.
    /// * `temperature` - Thermostat setpoint in K, used for the thermal checks.
    /// * `time` - Simulation time in fs stamped on every new log entry.
    /// * `log` - The reaction log to append to.
    ///
    /// # Returns
    ///
    /// How many bonds were broken and formed.
    pub fn update(
        &self,
        atoms: &mut [Atom],
        temperature: f64,
        time: f64,
        log: &mut Vec<ReactionEvent>,
    ) -> BondingOutcome {
        let kt = BOLTZMANN * temperature.max(0.0);
        let broken = self.break_bonds(atoms, kt, temperature, time, log);
        let formed = self.form_bonds(atoms, kt, time, log);
        BondingOutcome { formed, broken }
    }

    /// Why `bond` should break at separation `r`, if it should.
    fn break_cause(&self, bond: &Bond, r: f64, kt: f64) -> Option<BreakCause> {
        let re = bond.equilibrium_distance;
        if r > re && bond.morse_energy(r) > self.params.break_energy_fraction * bond.strength {
            return Some(BreakCause::Dissociated);
        }
        if r > self.params.break_stretch_factor * re {
            return Some(BreakCause::Overstretched);
        }
        if kt > 0.0 {
            let escape = (-bond.strength / kt).exp();
            if escape > self.params.thermal_break_probability {
                return Some(BreakCause::Thermal);
            }
        }
        None
    }

    fn break_bonds(
        &self,
        atoms: &mut [Atom],
        kt: f64,
        temperature: f64,
        time: f64,
        log: &mut Vec<ReactionEvent>,
    ) -> usize {
        let n = atoms.len();
        let mut doomed = Vec::new();
        for (i, atom) in atoms.iter().enumerate() {
            for bond in atom.bonds() {
                let j = bond.partner;
                if j <= i || j >= n {
                    continue;
                }
                let r = distance(atom, &atoms[j]);
                if let Some(cause) = self.break_cause(bond, r, kt) {
                    doomed.push((i, j, bond.kind, cause));
                }
            }
        }

        for &(i, j, kind, cause) in &doomed {
            atoms[i].remove_bond_to(j);
            atoms[j].remove_bond_to(i);

            if kind == BondKind::Ionic {
                let (cation, anion) = if atoms[i].charge() >= atoms[j].charge() {
                    (i, j)
                } else {
                    (j, i)
                };
                if atoms[cation].charge() > 0 {
                    if let Some(electron) = atoms[anion].remove_outer_electron() {
                        atoms[cation].add_electron(electron);
                    }
                }
            }
            atoms[i].refresh_shared_electrons();
            atoms[j].refresh_shared_electrons();

            let description = format!(
                "{kind} bond {}-{} broke ({cause}) at {temperature:.1} K",
                atoms[i].symbol(),
                atoms[j].symbol(),
            );
            debug!("{description}");
            log.push(ReactionEvent {
                time,
                kind: ReactionKind::Broken,
                atoms: (i, j),
                description,
            });
        }

        doomed.len()
    }

    /// True when a freshly made `bond` would survive the next breaking pass.
    fn holds_at(&self, bond: &Bond, r: f64, kt: f64) -> bool {
        self.break_cause(bond, r, kt).is_none()
    }

    fn is_candidate(atom: &Atom) -> bool {
        !atom.element.is_noble_gas() && atom.element.electronegativity >= MIN_ELECTRONEGATIVITY
    }

    fn form_bonds(&self, atoms: &mut [Atom], kt: f64, time: f64, log: &mut Vec<ReactionEvent>) -> usize {
        let positions: Vec<Vec3> = atoms.iter().map(|a| a.position).collect();
        let range = self.params.bonding_range;
        let grid = SpatialGrid::from_positions(&positions, range);
        let mut formed = 0;

        for (i, j) in grid.pairs_within(&positions, range) {
            if atoms[i].is_bonded_to(j) || !Self::is_candidate(&atoms[i]) || !Self::is_candidate(&atoms[j]) {
                continue;
            }
            let delta_chi = (atoms[i].element.electronegativity - atoms[j].element.electronegativity).abs();
            let event = if delta_chi > self.params.ionic_threshold {
                self.try_ionic(atoms, i, j, kt)
            } else {
                self.try_covalent(atoms, i, j, kt)
            };
            if let Some(mut event) = event {
                event.time = time;
                debug!("{}", event.description);
                log.push(event);
                formed += 1;
            }
        }

        formed
    }

    /// Ionization energy the donor would pay for its next electron, if it may give one.
    fn donor_ionization(&self, donor: &Atom) -> Option<f64> {
        let element = &donor.element;
        if element.ionization_energy >= self.params.donor_max_ionization
            || element.valence_electrons > self.params.donor_max_valence
            || donor.electrons().is_empty()
        {
            return None;
        }
        match donor.charge() {
            c if c <= 0 => Some(element.ionization_energy),
            1 if element.second_ionization_energy > 0.0 => Some(element.second_ionization_energy),
            _ => None,
        }
    }

    fn accepts_electron(&self, acceptor: &Atom) -> bool {
        let element = &acceptor.element;
        element.electron_affinity > self.params.acceptor_min_affinity
            && element.valence_electrons <= self.params.acceptor_max_valence
            && acceptor.charge() >= 0
    }

    /// Attempts electron transfer from the less to the more electronegative atom.
    ///
    /// The transfer is declined when the resulting bond would already be too
    /// stretched to survive the next breaking pass.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The full atom collection.
    /// * `i`, `j` - The candidate pair; either order is accepted.
    /// * `kt` - Thermal energy `kB·T` in eV.
    ///
    /// # Returns
    ///
    /// The reaction event with a zero time stamp, or `None` if nothing changed.
    pub fn try_ionic(&self, atoms: &mut [Atom], i: usize, j: usize, kt: f64) -> Option<ReactionEvent> {
        let (donor, acceptor) = if atoms[i].element.electronegativity < atoms[j].element.electronegativity {
            (i, j)
        } else {
            (j, i)
        };

        let ionization = self.donor_ionization(&atoms[donor])?;
        if !self.accepts_electron(&atoms[acceptor]) {
            return None;
        }

        let r = distance(&atoms[donor], &atoms[acceptor]);
        let delta_e = ionic_balance(
            ionization,
            atoms[acceptor].element.electron_affinity,
            self.coulomb_k,
            r.max(self.min_distance),
        );
        if delta_e > 0.0 || !passes_thermal_gate(-delta_e, kt, self.params.ionic_thermal_factor) {
            return None;
        }

        let re = equilibrium_distance(&atoms[donor], &atoms[acceptor]);
        let half = Bond::new(
            acceptor,
            BondKind::Ionic,
            BondOrder::Single,
            -delta_e,
            re,
            self.params.morse_stiffness,
        );
        if !self.holds_at(&half, r, kt) {
            return None;
        }

        let electron = atoms[donor].remove_outer_electron()?;
        atoms[acceptor].add_electron(electron);
        atoms[acceptor].push_bond(half.mirrored(donor));
        atoms[donor].push_bond(half);
        atoms[donor].refresh_shared_electrons();
        atoms[acceptor].refresh_shared_electrons();

        Some(ReactionEvent {
            time: 0.0,
            kind: ReactionKind::IonicFormed,
            atoms: (donor, acceptor),
            description: format!(
                "ionic bond {}-{} formed, electron transferred (ΔE = {delta_e:.2} eV)",
                atoms[donor].symbol(),
                atoms[acceptor].symbol(),
            ),
        })
    }

    /// Attempts to share valence electrons between two atoms.
    ///
    /// The bond keeps the overlap energy of the separation it formed at as its
    /// strength. Pairs too far apart for that bond to survive the next breaking pass
    /// are left alone.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The full atom collection.
    /// * `i`, `j` - The candidate pair; `i` is recorded first in the event.
    /// * `kt` - Thermal energy `kB·T` in eV.
    ///
    /// # Returns
    ///
    /// The reaction event with a zero time stamp, or `None` if nothing changed.
    pub fn try_covalent(&self, atoms: &mut [Atom], i: usize, j: usize, kt: f64) -> Option<ReactionEvent> {
        let count = atoms[i]
            .available_valence_electrons()
            .min(atoms[j].available_valence_electrons())
            .min(3);
        let order = BondOrder::from_count(count)?;

        let (a, b) = (&atoms[i], &atoms[j]);
        let re = equilibrium_distance(a, b);
        let r = distance(a, b);
        let energy = covalent_energy(
            (a.element.ionization_energy, b.element.ionization_energy),
            (a.element.electron_affinity, b.element.electron_affinity),
            order.value(),
            r,
            re,
            self.params.covalent_energy_scale,
        );
        if !passes_thermal_gate(energy, kt, self.params.covalent_thermal_factor) {
            return None;
        }

        let half = Bond::new(
            j,
            BondKind::Covalent,
            order,
            energy,
            re,
            self.params.morse_stiffness,
        );
        if !self.holds_at(&half, r, kt) {
            return None;
        }
        atoms[j].push_bond(half.mirrored(i));
        atoms[i].push_bond(half);
        atoms[i].refresh_shared_electrons();
        atoms[j].refresh_shared_electrons();

        Some(ReactionEvent {
            time: 0.0,
            kind: ReactionKind::CovalentFormed,
            atoms: (i, j),
            description: format!(
                "covalent bond {}-{} formed ({}, E = {energy:.2} eV)",
                atoms[i].symbol(),
                atoms[j].symbol(),
                order.to_string().to_lowercase(),
            ),
        })
    }
}
