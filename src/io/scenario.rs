//! Initial atom layouts, read from TOML or taken from the built-in presets.
//!
//! ```toml
//! name = "water"
//! temperature = 10.0
//!
//! [[atom]]
//! element = "O"
//! position = [0.0, 0.0, 0.0]
//!
//! [[atom]]
//! element = 1
//! position = [1.5, 1.0, 0.0]
//! ```

use super::error::Error;
use crate::model::element::PeriodicTable;
use crate::model::types::Vec3;
use crate::sim::Simulation;
use log::info;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// An element given either by symbol or by atomic number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ElementRef {
    Number(u8),
    Symbol(String),
}

impl ElementRef {
    pub fn resolve(&self, table: &PeriodicTable) -> Option<u8> {
        match self {
            Self::Number(z) => table.has(*z).then_some(*z),
            Self::Symbol(symbol) => table.find_symbol(symbol.trim()),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(z) => write!(f, "Z={}", z),
            Self::Symbol(symbol) => f.write_str(symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioAtom {
    pub element: ElementRef,
    /// Position in Å.
    pub position: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Thermostat setpoint in K; the simulation keeps its own when absent.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default, rename = "atom")]
    pub atoms: Vec<ScenarioAtom>,
}

impl Scenario {
    fn from_layout(name: &str, temperature: f64, layout: &[(u8, [f64; 3])]) -> Self {
        Self {
            name: Some(name.to_string()),
            temperature: Some(temperature),
            atoms: layout
                .iter()
                .map(|&(z, position)| ScenarioAtom {
                    element: ElementRef::Number(z),
                    position,
                })
                .collect(),
        }
    }

    /// Resolves every atom against `table`.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown element or non-finite coordinate, before
    /// anything has been spawned.
    pub fn resolve(&self, table: &PeriodicTable) -> Result<Vec<(u8, Vec3)>, Error> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                let z = atom
                    .element
                    .resolve(table)
                    .ok_or_else(|| Error::UnknownElement(atom.element.to_string()))?;
                if atom.position.iter().any(|c| !c.is_finite()) {
                    return Err(Error::invalid_atom(index, "position must be finite"));
                }
                let [x, y, z_coord] = atom.position;
                Ok((z, Vec3::new(x, y, z_coord)))
            })
            .collect()
    }

    /// Spawns all atoms into `sim` in order and applies the temperature, if any.
    ///
    /// The temperature is set first, so spawn velocities are drawn at it.
    ///
    /// # Arguments
    ///
    /// * `sim` - The simulation to populate; existing atoms are kept.
    ///
    /// # Returns
    ///
    /// The indices of the spawned atoms, in scenario order.
    ///
    /// # Errors
    ///
    /// Returns the [`resolve`](Self::resolve) error before spawning anything, or
    /// [`Error::Simulation`] if a spawn is rejected.
    pub fn apply(&self, sim: &mut Simulation) -> Result<Vec<usize>, Error> {
        let resolved = self.resolve(sim.table())?;
        if let Some(temperature) = self.temperature {
            sim.set_temperature(temperature);
        }
        let mut indices = Vec::with_capacity(resolved.len());
        for (z, position) in resolved {
            indices.push(sim.spawn(z, position)?);
        }
        info!(
            "Applied scenario '{}' ({} atoms)",
            self.name.as_deref().unwrap_or("unnamed"),
            indices.len()
        );
        Ok(indices)
    }
}

/// Parses a scenario from a TOML document.
///
/// # Errors
///
/// Returns [`Error::Scenario`] for malformed TOML or unexpected fields.
pub fn parse_scenario(toml_str: &str) -> Result<Scenario, Error> {
    Ok(toml::from_str(toml_str)?)
}

/// Reads and parses a scenario file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Scenario`] if it
/// does not parse.
pub fn read_scenario(path: impl AsRef<Path>) -> Result<Scenario, Error> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scenario = parse_scenario(&contents)?;
    info!(
        "Read scenario with {} atoms from {}",
        scenario.atoms.len(),
        path.display()
    );
    Ok(scenario)
}

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 4] = ["water", "salt", "demo", "methane"];

const WATER: [(u8, [f64; 3]); 3] = [
    (8, [0.0, 0.0, 0.0]),
    (1, [1.5, 1.0, 0.0]),
    (1, [-1.5, 1.0, 0.0]),
];

const SALT: [(u8, [f64; 3]); 2] = [(11, [5.0, -5.0, 0.0]), (17, [6.0, -5.0, 0.0])];

// Tetrahedral hydrogens at 1.2 Å from the carbon.
const METHANE: [(u8, [f64; 3]); 5] = [
    (6, [0.0, 0.0, 0.0]),
    (1, [0.6928, 0.6928, 0.6928]),
    (1, [-0.6928, -0.6928, 0.6928]),
    (1, [-0.6928, 0.6928, -0.6928]),
    (1, [0.6928, -0.6928, -0.6928]),
];

/// Looks up a built-in scenario by name (case-insensitive).
///
/// # Arguments
///
/// * `name` - One of [`PRESET_NAMES`]; surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`Error::UnknownPreset`] listing the available names.
pub fn preset(name: &str) -> Result<Scenario, Error> {
    let key = name.trim().to_ascii_lowercase();
    let scenario = match key.as_str() {
        "water" => Scenario::from_layout("water", 10.0, &WATER),
        "salt" => Scenario::from_layout("salt", 10.0, &SALT),
        "demo" => {
            let layout: Vec<_> = WATER.iter().chain(SALT.iter()).copied().collect();
            Scenario::from_layout("demo", 300.0, &layout)
        }
        "methane" => Scenario::from_layout("methane", 10.0, &METHANE),
        _ => {
            return Err(Error::UnknownPreset {
                name: name.to_string(),
                available: PRESET_NAMES.join(", "),
            });
        }
    };
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::elements::default_table;
    use crate::sim::get_default_parameters;

    fn simulation() -> Simulation {
        Simulation::new(default_table(), get_default_parameters().clone()).unwrap()
    }

    #[test]
    fn parses_symbols_and_numbers() {
        let scenario = parse_scenario(
            r#"
            name = "mixed"
            temperature = 25.0

            [[atom]]
            element = "Na"
            position = [0.0, 0.0, 0.0]

            [[atom]]
            element = 17
            position = [3.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(scenario.name.as_deref(), Some("mixed"));
        assert_eq!(scenario.temperature, Some(25.0));
        assert_eq!(scenario.atoms.len(), 2);
        assert_eq!(scenario.atoms[0].element, ElementRef::Symbol("Na".into()));
        assert_eq!(scenario.atoms[1].element, ElementRef::Number(17));

        let resolved = scenario.resolve(&default_table()).unwrap();
        assert_eq!(resolved[0].0, 11);
        assert_eq!(resolved[1], (17, Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn empty_document_is_an_empty_scenario() {
        let scenario = parse_scenario("").unwrap();
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            parse_scenario("[[atom]]\nposition = \"here\""),
            Err(Error::Scenario(_))
        ));
    }

    #[test]
    fn unknown_elements_spawn_nothing() {
        let scenario = parse_scenario(
            r#"
            [[atom]]
            element = "O"
            position = [0.0, 0.0, 0.0]

            [[atom]]
            element = "Zz"
            position = [1.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        let mut sim = simulation();
        let err = scenario.apply(&mut sim).unwrap_err();
        assert!(matches!(err, Error::UnknownElement(ref s) if s == "Zz"));
        assert!(sim.atoms().is_empty());
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut scenario = Scenario::default();
        scenario.atoms.push(ScenarioAtom {
            element: ElementRef::Number(1),
            position: [0.0, f64::NAN, 0.0],
        });
        assert!(matches!(
            scenario.resolve(&default_table()),
            Err(Error::InvalidAtom { index: 0, .. })
        ));
    }

    #[test]
    fn presets_resolve_against_the_embedded_table() {
        let table = default_table();
        for name in PRESET_NAMES {
            let scenario = preset(name).unwrap();
            assert!(!scenario.atoms.is_empty());
            scenario.resolve(&table).unwrap();
        }
        assert_eq!(preset("DEMO").unwrap().atoms.len(), 5);
        assert!(matches!(preset("benzene"), Err(Error::UnknownPreset { .. })));
    }

    #[test]
    fn apply_spawns_in_order_and_sets_temperature() {
        let mut sim = simulation();
        let indices = preset("salt").unwrap().apply(&mut sim).unwrap();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(sim.atoms()[0].atomic_number, 11);
        assert_eq!(sim.atoms()[1].atomic_number, 17);
        assert_eq!(sim.temperature(), 10.0);
    }
}
