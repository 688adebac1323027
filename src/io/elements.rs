//! Element reference table loading from JSON.
//!
//! The document is an object keyed by element symbol, each value holding one record.
//! Every field may be missing or `null`; absent values take neutral defaults so a
//! sparse table still yields usable (if uninteresting) atoms.

use super::error::Error;
use crate::model::element::{ElementCategory, ElementData, PeriodicTable};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const EMBEDDED_ELEMENTS_JSON: &str = include_str!("../../resources/elements.json");

static DEFAULT_TABLE: OnceLock<Arc<PeriodicTable>> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct RawElement {
    atomic_number: Option<u8>,
    symbol: Option<String>,
    name: Option<String>,
    atomic_mass: Option<f64>,
    electronegativity: Option<f64>,
    #[serde(rename = "ionization_energy_eV")]
    ionization_energy: Option<f64>,
    #[serde(rename = "second_ionization_energy_eV")]
    second_ionization_energy: Option<f64>,
    #[serde(rename = "electron_affinity_eV")]
    electron_affinity: Option<f64>,
    #[serde(rename = "atomic_radius_pm")]
    atomic_radius: Option<f64>,
    #[serde(rename = "covalent_radius_pm")]
    covalent_radius: Option<f64>,
    #[serde(rename = "vdw_radius_pm")]
    vdw_radius: Option<f64>,
    valence_electrons: Option<u32>,
    period: Option<u32>,
    group: Option<u32>,
    category: Option<ElementCategory>,
    electron_config: Option<Vec<u32>>,
    color_rgb: Option<[f32; 3]>,
}

impl RawElement {
    fn into_element(self, key: &str) -> ElementData {
        ElementData {
            atomic_number: self.atomic_number.unwrap_or(0),
            symbol: self.symbol.unwrap_or_else(|| key.to_string()),
            name: self.name.unwrap_or_else(|| "Unknown".to_string()),
            atomic_mass: self.atomic_mass.unwrap_or(1.0),
            electronegativity: self.electronegativity.unwrap_or(0.0),
            ionization_energy: self.ionization_energy.unwrap_or(0.0),
            second_ionization_energy: self.second_ionization_energy.unwrap_or(0.0),
            electron_affinity: self.electron_affinity.unwrap_or(0.0),
            atomic_radius: self.atomic_radius.unwrap_or(100.0),
            covalent_radius: self.covalent_radius.unwrap_or(100.0),
            vdw_radius: self.vdw_radius.unwrap_or(150.0),
            valence_electrons: self.valence_electrons.unwrap_or(0),
            period: self.period.unwrap_or(0),
            group: self.group.unwrap_or(0),
            category: self.category.unwrap_or_default(),
            shell_occupancy: self.electron_config.unwrap_or_default(),
            color: self
                .color_rgb
                .map(|[r, g, b]| [r / 255.0, g / 255.0, b / 255.0])
                .unwrap_or([1.0, 1.0, 1.0]),
        }
    }
}

/// Parses a JSON element table.
///
/// Records without an atomic number are skipped.
///
/// # Errors
///
/// Returns [`Error::ElementTable`] if the document is not an object of records.
pub fn parse_element_table(json: &str) -> Result<PeriodicTable, Error> {
    let raw: BTreeMap<String, RawElement> = serde_json::from_str(json)?;
    let records = raw
        .into_iter()
        .map(|(key, record)| record.into_element(&key))
        .filter(|e| e.atomic_number != 0);
    Ok(PeriodicTable::from_records(records))
}

/// Reads and parses a JSON element table from disk.
///
/// # Arguments
///
/// * `path` - Path to a JSON object keyed by element symbol.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::ElementTable`]
/// if it is not a valid table.
pub fn read_element_table(path: impl AsRef<Path>) -> Result<PeriodicTable, Error> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let table = parse_element_table(&json)?;
    info!("Loaded {} elements from {}", table.len(), path.display());
    Ok(table)
}

/// The element table shipped with the crate, parsed once.
pub fn default_table() -> Arc<PeriodicTable> {
    Arc::clone(DEFAULT_TABLE.get_or_init(|| {
        Arc::new(
            parse_element_table(EMBEDDED_ELEMENTS_JSON)
                .expect("Failed to parse embedded element table. This is a library bug."),
        )
    }))
}
