use super::bond::Bond;
use super::electron::{Electron, fill_electron_shells};
use super::element::ElementData;
use super::types::Vec3;
use std::sync::Arc;

/// Smallest radius handed to renderers, in Å.
const MIN_VISUAL_RADIUS: f64 = 0.5;

/// A simulated atom: identity, kinematic state, electrons, and its half of each bond.
///
/// The electron list and bond list are only mutated through methods that keep the
/// cached effective valence in sync, so `effective_valence()` always equals
/// `max(0, valence − Σ bond order)` and `charge()` always equals
/// `Z − electron count`.
#[derive(Debug, Clone)]
pub struct Atom {
    pub atomic_number: u8,
    pub element: Arc<ElementData>,
    pub position: Vec3,
    /// Velocity in Å/fs.
    pub velocity: Vec3,
    /// Force accumulator in eV/Å, rebuilt by every force evaluation.
    pub force: Vec3,
    /// Mass in amu.
    pub mass: f64,
    /// Kinetic energy in eV as of the last force evaluation.
    pub kinetic_energy: f64,
    /// Connected component index from the last molecule refresh.
    pub molecule_id: Option<usize>,
    pub visual_radius: f64,
    electrons: Vec<Electron>,
    bonds: Vec<Bond>,
    effective_valence: u32,
}

impl Atom {
    /// Creates a neutral ground-state atom at rest at `position`.
    pub fn new(atomic_number: u8, element: Arc<ElementData>, position: Vec3) -> Self {
        let visual_radius = (element.atomic_radius / 100.0).max(MIN_VISUAL_RADIUS);
        let mut atom = Self {
            atomic_number,
            mass: element.atomic_mass,
            element,
            position,
            velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            kinetic_energy: 0.0,
            molecule_id: None,
            visual_radius,
            electrons: fill_electron_shells(atomic_number as u32),
            bonds: Vec::new(),
            effective_valence: 0,
        };
        atom.refresh_valence();
        atom
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.element.symbol
    }

    #[inline]
    pub fn electrons(&self) -> &[Electron] {
        &self.electrons
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Net charge in units of e.
    #[inline]
    pub fn charge(&self) -> i32 {
        self.atomic_number as i32 - self.electrons.len() as i32
    }

    /// Unpaired valence electrons not yet committed to bonds.
    #[inline]
    pub fn effective_valence(&self) -> u32 {
        self.effective_valence
    }

    pub fn total_bond_order(&self) -> u32 {
        self.bonds.iter().map(|b| b.order.value()).sum()
    }

    /// `max(0, valence − Σ bond order)`, computed from the current bond list.
    pub fn available_valence_electrons(&self) -> u32 {
        self.element
            .valence_electrons
            .saturating_sub(self.total_bond_order())
    }

    /// Non-bonding electron pairs, `(valence − Σ bond order) / 2`.
    pub fn lone_pairs(&self) -> u32 {
        self.available_valence_electrons() / 2
    }

    pub fn is_bonded_to(&self, other: usize) -> bool {
        self.bonds.iter().any(|b| b.partner == other)
    }

    pub fn bond_to(&self, other: usize) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.partner == other)
    }

    /// Pops the outermost electron, raising the charge by one.
    ///
    /// Returns `None` and leaves the atom untouched when it has no electrons.
    pub fn remove_outer_electron(&mut self) -> Option<Electron> {
        let electron = self.electrons.pop()?;
        self.refresh_valence();
        Some(electron)
    }

    /// Appends an electron as the new outermost one, lowering the charge by one.
    pub fn add_electron(&mut self, electron: Electron) {
        self.electrons.push(electron);
        self.refresh_valence();
    }

    pub(crate) fn push_bond(&mut self, bond: Bond) {
        self.bonds.push(bond);
        self.refresh_valence();
    }

    /// Removes every bond half pointing at `partner`, returning the first one.
    pub(crate) fn remove_bond_to(&mut self, partner: usize) -> Option<Bond> {
        let position = self.bonds.iter().position(|b| b.partner == partner)?;
        let removed = self.bonds.remove(position);
        self.bonds.retain(|b| b.partner != partner);
        self.refresh_valence();
        Some(removed)
    }

    /// Re-derives the display-only shared flags: one outer electron per unit of bond
    /// order is marked as shared with that bond's partner.
    pub(crate) fn refresh_shared_electrons(&mut self) {
        for electron in &mut self.electrons {
            electron.shared = false;
            electron.shared_with = None;
        }
        let mut outer = self.electrons.iter_mut().rev();
        for bond in &self.bonds {
            for _ in 0..bond.order.value() {
                if let Some(electron) = outer.next() {
                    electron.shared = true;
                    electron.shared_with = Some(bond.partner);
                }
            }
        }
    }

    fn refresh_valence(&mut self) {
        self.effective_valence = self.available_valence_electrons();
    }
}
