//! Static per-element reference data and the read-only table that serves it.
//!
//! [`ElementData`] records are immutable once loaded. The [`PeriodicTable`] is an
//! explicitly constructed value handed to the simulation; nothing in the crate keeps a
//! global instance. Lookups of atomic numbers that are not present return a shared
//! zero-valued sentinel record rather than failing.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Coarse periodic-table classification of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    ReactiveNonmetal,
    Halogen,
    NobleGas,
    Lanthanide,
    Actinide,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementCategory::AlkaliMetal => "alkali metal",
            ElementCategory::AlkalineEarthMetal => "alkaline earth metal",
            ElementCategory::TransitionMetal => "transition metal",
            ElementCategory::PostTransitionMetal => "post-transition metal",
            ElementCategory::Metalloid => "metalloid",
            ElementCategory::ReactiveNonmetal => "reactive nonmetal",
            ElementCategory::Halogen => "halogen",
            ElementCategory::NobleGas => "noble gas",
            ElementCategory::Lanthanide => "lanthanide",
            ElementCategory::Actinide => "actinide",
            ElementCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Physical and chemical constants of one element.
///
/// Energies are in eV, radii in picometres, mass in amu. The record returned for an
/// atomic number that is absent from the table has every numeric field set to zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    pub atomic_number: u8,
    pub symbol: String,
    pub name: String,
    pub atomic_mass: f64,
    /// Pauling electronegativity; zero when unknown.
    pub electronegativity: f64,
    pub ionization_energy: f64,
    pub second_ionization_energy: f64,
    pub electron_affinity: f64,
    pub atomic_radius: f64,
    pub covalent_radius: f64,
    pub vdw_radius: f64,
    pub valence_electrons: u32,
    pub period: u32,
    pub group: u32,
    pub category: ElementCategory,
    /// Electrons per shell, innermost first (e.g. `[2, 8, 1]`).
    pub shell_occupancy: Vec<u32>,
    /// Display color, each channel in `[0, 1]`.
    pub color: [f32; 3],
}

impl ElementData {
    #[inline]
    pub fn is_noble_gas(&self) -> bool {
        self.category == ElementCategory::NobleGas
    }

    /// Covalent radius converted to ångströms.
    #[inline]
    pub fn covalent_radius_angstrom(&self) -> f64 {
        self.covalent_radius / 100.0
    }

    /// Van der Waals radius converted to ångströms.
    #[inline]
    pub fn vdw_radius_angstrom(&self) -> f64 {
        self.vdw_radius / 100.0
    }
}

static SENTINEL: LazyLock<Arc<ElementData>> = LazyLock::new(|| Arc::new(ElementData::default()));

/// Read-only lookup of [`ElementData`] by atomic number.
#[derive(Debug, Clone, Default)]
pub struct PeriodicTable {
    elements: HashMap<u8, Arc<ElementData>>,
}

impl PeriodicTable {
    /// Builds a table from element records. Later records win on duplicate numbers.
    pub fn from_records(records: impl IntoIterator<Item = ElementData>) -> Self {
        let elements = records
            .into_iter()
            .map(|record| (record.atomic_number, Arc::new(record)))
            .collect();
        Self { elements }
    }

    /// Returns the record for `atomic_number`, or the zero-valued sentinel.
    pub fn get(&self, atomic_number: u8) -> Arc<ElementData> {
        self.elements
            .get(&atomic_number)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&SENTINEL))
    }

    #[inline]
    pub fn has(&self, atomic_number: u8) -> bool {
        self.elements.contains_key(&atomic_number)
    }

    /// Finds the atomic number carrying `symbol` (case-sensitive, e.g. `"Cl"`).
    pub fn find_symbol(&self, symbol: &str) -> Option<u8> {
        self.elements
            .values()
            .find(|e| e.symbol == symbol)
            .map(|e| e.atomic_number)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over all records in ascending atomic-number order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementData> {
        let mut numbers: Vec<u8> = self.elements.keys().copied().collect();
        numbers.sort_unstable();
        numbers.into_iter().map(move |z| self.elements[&z].as_ref())
    }
}
