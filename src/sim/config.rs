use super::error::Error;
use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_PARAMS_TOML: &str = include_str!("../../resources/default.params.toml");

static DEFAULT_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

/// Every tunable constant of the engine, grouped by the component that reads it.
///
/// Units follow [`units`](super::units): eV, Å, amu, fs, e and K. Each field falls
/// back to its built-in default when omitted from a TOML document, so partial files
/// only need to name what they change.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SimulationParams {
    #[serde(default)]
    pub force_field: ForceFieldParams,
    #[serde(default)]
    pub bonding: BondingParams,
    #[serde(default)]
    pub integrator: IntegratorParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForceFieldParams {
    /// Coulomb constant in eV·Å/e².
    #[serde(default = "default_coulomb_k")]
    pub coulomb_k: f64,
    /// Lennard-Jones well depth in eV.
    #[serde(default = "default_lj_epsilon")]
    pub lj_epsilon: f64,
    /// Distance where the non-bonded switching function starts.
    #[serde(default = "default_switch_radius")]
    pub switch_radius: f64,
    /// Distance beyond which non-bonded terms vanish.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    /// Separation floor used in non-bonded magnitudes.
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    /// Harmonic angle constant per eV of bond strength, in 1/rad².
    ///
    /// Each angle uses `angle_k` times the weaker of its two bonds' strengths.
    #[serde(default = "default_angle_k")]
    pub angle_k: f64,
}

fn default_coulomb_k() -> f64 {
    14.3996
}
fn default_lj_epsilon() -> f64 {
    0.01
}
fn default_switch_radius() -> f64 {
    8.0
}
fn default_cutoff() -> f64 {
    10.0
}
fn default_min_distance() -> f64 {
    0.5
}
fn default_angle_k() -> f64 {
    0.1
}

impl Default for ForceFieldParams {
    fn default() -> Self {
        Self {
            coulomb_k: default_coulomb_k(),
            lj_epsilon: default_lj_epsilon(),
            switch_radius: default_switch_radius(),
            cutoff: default_cutoff(),
            min_distance: default_min_distance(),
            angle_k: default_angle_k(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BondingParams {
    /// Pairs farther apart than this are never considered for new bonds.
    #[serde(default = "default_bonding_range")]
    pub bonding_range: f64,
    /// Electronegativity difference above which a pair goes ionic.
    #[serde(default = "default_ionic_threshold")]
    pub ionic_threshold: f64,
    /// Donors must have a first ionization energy below this, in eV.
    #[serde(default = "default_donor_max_ionization")]
    pub donor_max_ionization: f64,
    /// Donors may have at most this many valence electrons.
    #[serde(default = "default_donor_max_valence")]
    pub donor_max_valence: u32,
    /// Acceptors must have an electron affinity above this, in eV.
    #[serde(default = "default_acceptor_min_affinity")]
    pub acceptor_min_affinity: f64,
    /// Acceptors may have at most this many valence electrons.
    #[serde(default = "default_acceptor_max_valence")]
    pub acceptor_max_valence: u32,
    /// Ionic bonds need `|ΔE| > factor·kB·T`.
    #[serde(default = "default_ionic_thermal_factor")]
    pub ionic_thermal_factor: f64,
    /// Covalent bonds need `E > factor·kB·T`.
    #[serde(default = "default_covalent_thermal_factor")]
    pub covalent_thermal_factor: f64,
    /// Scale on the geometric-mean baseline of covalent bond energies.
    #[serde(default = "default_covalent_energy_scale")]
    pub covalent_energy_scale: f64,
    /// Curvature numerator in `α = sqrt(stiffness / (2·De))`.
    #[serde(default = "default_morse_stiffness")]
    pub morse_stiffness: f64,
    /// Stretched bonds whose Morse energy exceeds this fraction of `De` break.
    #[serde(default = "default_break_energy_fraction")]
    pub break_energy_fraction: f64,
    /// Bonds stretched beyond this multiple of `re` break.
    #[serde(default = "default_break_stretch_factor")]
    pub break_stretch_factor: f64,
    /// Bonds break when `exp(−De / kB·T)` exceeds this value.
    #[serde(default = "default_thermal_break_probability")]
    pub thermal_break_probability: f64,
}

fn default_bonding_range() -> f64 {
    5.0
}
fn default_ionic_threshold() -> f64 {
    1.7
}
fn default_donor_max_ionization() -> f64 {
    8.0
}
fn default_donor_max_valence() -> u32 {
    2
}
fn default_acceptor_min_affinity() -> f64 {
    0.3
}
fn default_acceptor_max_valence() -> u32 {
    7
}
fn default_ionic_thermal_factor() -> f64 {
    2.0
}
fn default_covalent_thermal_factor() -> f64 {
    3.0
}
fn default_covalent_energy_scale() -> f64 {
    0.3
}
fn default_morse_stiffness() -> f64 {
    5.0
}
fn default_break_energy_fraction() -> f64 {
    0.9
}
fn default_break_stretch_factor() -> f64 {
    2.5
}
fn default_thermal_break_probability() -> f64 {
    (-2.0f64).exp()
}

impl Default for BondingParams {
    fn default() -> Self {
        Self {
            bonding_range: default_bonding_range(),
            ionic_threshold: default_ionic_threshold(),
            donor_max_ionization: default_donor_max_ionization(),
            donor_max_valence: default_donor_max_valence(),
            acceptor_min_affinity: default_acceptor_min_affinity(),
            acceptor_max_valence: default_acceptor_max_valence(),
            ionic_thermal_factor: default_ionic_thermal_factor(),
            covalent_thermal_factor: default_covalent_thermal_factor(),
            covalent_energy_scale: default_covalent_energy_scale(),
            morse_stiffness: default_morse_stiffness(),
            break_energy_fraction: default_break_energy_fraction(),
            break_stretch_factor: default_break_stretch_factor(),
            thermal_break_probability: default_thermal_break_probability(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntegratorParams {
    /// Thermostat setpoint in K.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Apply the Berendsen thermostat after every step.
    #[serde(default = "default_true")]
    pub thermostat: bool,
    /// Berendsen relaxation time in fs.
    #[serde(default = "default_thermostat_tau")]
    pub thermostat_tau: f64,
    /// Maximum relative velocity rescale per step.
    #[serde(default = "default_thermostat_band")]
    pub thermostat_band: f64,
    /// Half the edge of the cubic domain, centred on the origin.
    #[serde(default = "default_box_half_width")]
    pub box_half_width: f64,
    /// Reflect atoms off the box faces; when off, atoms leave freely.
    #[serde(default = "default_true")]
    pub reflective_boundary: bool,
    /// Fraction of normal speed kept after a wall bounce.
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    /// Steps between bonding evaluations.
    #[serde(default = "default_bonding_interval")]
    pub bonding_interval: u64,
    /// Run the bonding engine at all.
    #[serde(default = "default_true")]
    pub bonding_enabled: bool,
    /// Seed for spawn velocities.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_temperature() -> f64 {
    300.0
}
fn default_true() -> bool {
    true
}
fn default_thermostat_tau() -> f64 {
    100.0
}
fn default_thermostat_band() -> f64 {
    0.1
}
fn default_box_half_width() -> f64 {
    50.0
}
fn default_restitution() -> f64 {
    0.5
}
fn default_bonding_interval() -> u64 {
    10
}
fn default_seed() -> u64 {
    42
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            thermostat: true,
            thermostat_tau: default_thermostat_tau(),
            thermostat_band: default_thermostat_band(),
            box_half_width: default_box_half_width(),
            reflective_boundary: true,
            restitution: default_restitution(),
            bonding_interval: default_bonding_interval(),
            bonding_enabled: true,
            seed: default_seed(),
        }
    }
}

fn require(ok: bool, name: &str, detail: &str) -> Result<(), Error> {
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, detail))
    }
}

impl SimulationParams {
    /// Checks that every parameter lies in its meaningful range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let ff = &self.force_field;
        require(ff.coulomb_k >= 0.0, "force_field.coulomb_k", "must be non-negative")?;
        require(ff.lj_epsilon >= 0.0, "force_field.lj_epsilon", "must be non-negative")?;
        require(ff.switch_radius > 0.0, "force_field.switch_radius", "must be positive")?;
        require(
            ff.cutoff > ff.switch_radius,
            "force_field.cutoff",
            "must exceed switch_radius",
        )?;
        require(ff.min_distance > 0.0, "force_field.min_distance", "must be positive")?;
        require(ff.angle_k >= 0.0, "force_field.angle_k", "must be non-negative")?;

        let b = &self.bonding;
        require(b.bonding_range > 0.0, "bonding.bonding_range", "must be positive")?;
        require(b.ionic_threshold >= 0.0, "bonding.ionic_threshold", "must be non-negative")?;
        require(b.morse_stiffness > 0.0, "bonding.morse_stiffness", "must be positive")?;
        require(
            b.break_energy_fraction > 0.0 && b.break_energy_fraction <= 1.0,
            "bonding.break_energy_fraction",
            "must lie in (0, 1]",
        )?;
        require(
            b.break_stretch_factor > 1.0,
            "bonding.break_stretch_factor",
            "must exceed 1",
        )?;
        require(
            (0.0..=1.0).contains(&b.thermal_break_probability),
            "bonding.thermal_break_probability",
            "must lie in [0, 1]",
        )?;
        require(
            b.ionic_thermal_factor >= 0.0 && b.covalent_thermal_factor >= 0.0,
            "bonding.thermal_factor",
            "must be non-negative",
        )?;

        let i = &self.integrator;
        require(
            (0.0..=super::units::MAX_TEMPERATURE).contains(&i.temperature),
            "integrator.temperature",
            "must lie in [0, 10000] K",
        )?;
        require(i.thermostat_tau > 0.0, "integrator.thermostat_tau", "must be positive")?;
        require(
            i.thermostat_band >= 0.0 && i.thermostat_band < 1.0,
            "integrator.thermostat_band",
            "must lie in [0, 1)",
        )?;
        require(i.box_half_width > 0.0, "integrator.box_half_width", "must be positive")?;
        require(
            (0.0..=1.0).contains(&i.restitution),
            "integrator.restitution",
            "must lie in [0, 1]",
        )?;
        require(
            i.bonding_interval > 0,
            "integrator.bonding_interval",
            "must be at least 1",
        )?;
        Ok(())
    }
}

/// Parses parameters from TOML, or returns the built-in defaults for `None`.
///
/// # Errors
///
/// Returns [`Error::ParameterParse`] for malformed TOML and
/// [`Error::InvalidParameter`] when a value fails [`SimulationParams::validate`].
pub fn load_parameters(custom_toml: Option<&str>) -> Result<SimulationParams, Error> {
    match custom_toml {
        Some(toml) => {
            let params: SimulationParams = toml::from_str(toml)?;
            params.validate()?;
            Ok(params)
        }
        None => Ok(get_default_parameters().clone()),
    }
}

pub fn get_default_parameters() -> &'static SimulationParams {
    DEFAULT_PARAMS.get_or_init(|| {
        toml::from_str(DEFAULT_PARAMS_TOML)
            .expect("Failed to parse embedded default parameters. This is a library bug.")
    })
}
