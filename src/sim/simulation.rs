use super::bonding::{BondingEngine, BondingOutcome, ReactionEvent};
use super::config::SimulationParams;
use super::error::Error;
use super::forces::{ForceField, PotentialEnergy};
use super::tracker::MoleculeTracker;
use super::units::{self, ACCELERATION_FACTOR, MAX_TEMPERATURE};
use crate::model::atom::Atom;
use crate::model::element::PeriodicTable;
use crate::model::molecule::Molecule;
use crate::model::types::Vec3;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Setpoints below this switch the thermostat off.
const MIN_THERMOSTAT_TEMPERATURE: f64 = 1.0;

/// Aggregate energetics of the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyReport {
    /// Total kinetic energy in eV.
    pub kinetic: f64,
    /// Non-bonded (Lennard-Jones, Coulomb) plus angular energy in eV.
    pub potential: f64,
    /// Morse energy of all bonds in eV.
    pub bond: f64,
    /// Instantaneous equipartition temperature in K.
    pub temperature: f64,
    /// Total linear momentum in amu·Å/fs.
    pub momentum: Vec3,
}

impl EnergyReport {
    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential + self.bond
    }
}

/// The atom collection together with everything that advances it in time.
///
/// Atoms are addressed by their index, which stays valid until [`clear`](Self::clear);
/// there is no individual removal.
#[derive(Debug)]
pub struct Simulation {
    table: Arc<PeriodicTable>,
    params: SimulationParams,
    force_field: ForceField,
    bonding: BondingEngine,
    tracker: MoleculeTracker,
    atoms: Vec<Atom>,
    reaction_log: Vec<ReactionEvent>,
    potential: PotentialEnergy,
    temperature: f64,
    time: f64,
    step_count: u64,
    bonds_formed: usize,
    bonds_broken: usize,
    rng: StdRng,
}

impl Simulation {
    /// Creates an empty simulation over `table`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` fails validation.
    pub fn new(table: Arc<PeriodicTable>, params: SimulationParams) -> Result<Self, Error> {
        params.validate()?;
        let ff = params.force_field.clone();
        Ok(Self {
            table,
            force_field: ForceField::new(ff.clone()),
            bonding: BondingEngine::new(params.bonding.clone(), ff.coulomb_k, ff.min_distance),
            tracker: MoleculeTracker::new(),
            atoms: Vec::new(),
            reaction_log: Vec::new(),
            potential: PotentialEnergy::default(),
            temperature: params.integrator.temperature,
            time: 0.0,
            step_count: 0,
            bonds_formed: 0,
            bonds_broken: 0,
            rng: StdRng::seed_from_u64(params.integrator.seed),
            params,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn table(&self) -> &Arc<PeriodicTable> {
        &self.table
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Molecules as of the last tracker refresh.
    pub fn molecules(&self) -> &[Molecule] {
        self.tracker.molecules()
    }

    pub fn reaction_log(&self) -> &[ReactionEvent] {
        &self.reaction_log
    }

    /// Elapsed simulated time in fs.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Thermostat setpoint in K.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Changes the thermostat setpoint, clamped to `[0, 10000]` K.
    pub fn set_temperature(&mut self, temperature: f64) {
        let clamped = if temperature.is_nan() {
            0.0
        } else {
            temperature.clamp(0.0, MAX_TEMPERATURE)
        };
        debug!("Temperature setpoint {:.1} K -> {clamped:.1} K", self.temperature);
        self.temperature = clamped;
    }

    /// Total bonds formed since the last clear.
    pub fn bonds_formed(&self) -> usize {
        self.bonds_formed
    }

    /// Total bonds broken since the last clear.
    pub fn bonds_broken(&self) -> usize {
        self.bonds_broken
    }

    /// Number of bonds currently present, each mirrored pair counted once.
    pub fn bond_count(&self) -> usize {
        self.atoms.iter().map(|a| a.bonds().len()).sum::<usize>() / 2
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.atoms
            .iter()
            .map(|a| units::kinetic_energy(a.mass, &a.velocity))
            .sum()
    }

    /// Equipartition temperature of the current velocities.
    pub fn instantaneous_temperature(&self) -> f64 {
        units::temperature_from_kinetic(self.kinetic_energy(), self.atoms.len())
    }

    /// Total linear momentum in amu·Å/fs.
    pub fn momentum(&self) -> Vec3 {
        self.atoms.iter().map(|a| a.velocity * a.mass).sum()
    }

    pub fn energies(&self) -> EnergyReport {
        EnergyReport {
            kinetic: self.kinetic_energy(),
            potential: self.potential.non_bonded + self.potential.angular,
            bond: self.potential.bonded,
            temperature: self.instantaneous_temperature(),
            momentum: self.momentum(),
        }
    }

    /// Adds a ground-state atom with a thermal velocity drawn at the current setpoint.
    ///
    /// The new atom immediately takes part in a bonding pass and a molecule refresh.
    /// Returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] if `atomic_number` is not in the table.
    pub fn spawn(&mut self, atomic_number: u8, position: Vec3) -> Result<usize, Error> {
        if !self.table.has(atomic_number) {
            return Err(Error::UnknownElement(atomic_number));
        }
        let mut atom = Atom::new(atomic_number, self.table.get(atomic_number), position);

        let speed = units::thermal_speed(self.temperature, atom.mass);
        if speed > 0.0 {
            atom.velocity = Vec3::new(
                self.rng.random_range(-speed..=speed),
                self.rng.random_range(-speed..=speed),
                self.rng.random_range(-speed..=speed),
            );
        }

        let index = self.atoms.len();
        debug!(
            "Spawned {} #{index} at ({:.2}, {:.2}, {:.2})",
            atom.symbol(),
            position.x,
            position.y,
            position.z
        );
        self.atoms.push(atom);

        if self.params.integrator.bonding_enabled {
            self.run_bonding();
        }
        self.refresh_molecules();
        self.potential = self.force_field.compute(&mut self.atoms);
        Ok(index)
    }

    /// Removes every atom and resets time, counters and the reaction log.
    pub fn clear(&mut self) {
        info!("Clearing {} atoms at t = {:.1} fs", self.atoms.len(), self.time);
        self.atoms.clear();
        self.reaction_log.clear();
        self.tracker.clear();
        self.potential = PotentialEnergy::default();
        self.time = 0.0;
        self.step_count = 0;
        self.bonds_formed = 0;
        self.bonds_broken = 0;
    }

    /// Advances the system by `dt` femtoseconds with velocity Verlet.
    ///
    /// An empty simulation does not advance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestep`] unless `dt` is positive and finite.
    pub fn step(&mut self, dt: f64) -> Result<(), Error> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidTimestep(dt));
        }
        if self.atoms.is_empty() {
            return Ok(());
        }

        self.half_kick(dt);
        self.drift(dt);
        self.potential = self.force_field.compute(&mut self.atoms);
        self.half_kick(dt);

        if self.params.integrator.thermostat {
            self.apply_thermostat(dt);
        }

        let integrator = &self.params.integrator;
        if integrator.bonding_enabled && self.step_count % integrator.bonding_interval == 0 {
            let outcome = self.run_bonding();
            let changed = outcome != BondingOutcome::default();
            if changed || self.step_count == 0 {
                self.refresh_molecules();
            }
            if changed {
                self.potential = self.force_field.compute(&mut self.atoms);
            }
        }

        self.time += dt;
        self.step_count += 1;
        Ok(())
    }

    fn half_kick(&mut self, dt: f64) {
        for atom in &mut self.atoms {
            if atom.mass > 0.0 {
                atom.velocity += atom.force * (0.5 * dt * ACCELERATION_FACTOR / atom.mass);
            }
        }
    }

    fn drift(&mut self, dt: f64) {
        let integrator = &self.params.integrator;
        let half_width = integrator.box_half_width;
        let restitution = integrator.restitution;
        let reflective = integrator.reflective_boundary;

        for atom in &mut self.atoms {
            atom.position += atom.velocity * dt;
            if !reflective {
                continue;
            }
            for axis in 0..3 {
                if atom.position[axis] > half_width {
                    atom.position[axis] = half_width;
                    atom.velocity[axis] *= -restitution;
                } else if atom.position[axis] < -half_width {
                    atom.position[axis] = -half_width;
                    atom.velocity[axis] *= -restitution;
                }
            }
        }
    }

    /// Berendsen rescale towards the setpoint, limited to the configured band.
    fn apply_thermostat(&mut self, dt: f64) {
        let target = self.temperature;
        if self.atoms.is_empty() || target < MIN_THERMOSTAT_TEMPERATURE {
            return;
        }
        let integrator = &self.params.integrator;
        let current = self
            .instantaneous_temperature()
            .max(MIN_THERMOSTAT_TEMPERATURE);
        let band = integrator.thermostat_band;
        let lambda = (1.0 + dt / integrator.thermostat_tau * (target / current - 1.0))
            .max(0.0)
            .sqrt()
            .clamp(1.0 - band, 1.0 + band);
        trace!("Thermostat: T = {current:.2} K, target {target:.2} K, lambda = {lambda:.5}");

        for atom in &mut self.atoms {
            atom.velocity *= lambda;
        }
    }

    fn run_bonding(&mut self) -> BondingOutcome {
        let outcome = self.bonding.update(
            &mut self.atoms,
            self.temperature,
            self.time,
            &mut self.reaction_log,
        );
        self.bonds_formed += outcome.formed;
        self.bonds_broken += outcome.broken;
        outcome
    }

    fn refresh_molecules(&mut self) {
        self.tracker.refresh(&mut self.atoms);
        debug!(
            "Molecule refresh: {} molecules over {} atoms",
            self.tracker.molecules().len(),
            self.atoms.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::elements::default_table;
    use crate::model::types::BondKind;
    use crate::sim::bonding::ReactionKind;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn params_at(temperature: f64) -> SimulationParams {
        let mut params = SimulationParams::default();
        params.integrator.temperature = temperature;
        params
    }

    fn simulation(params: SimulationParams) -> Simulation {
        Simulation::new(default_table(), params).unwrap()
    }

    fn argon_gas(sim: &mut Simulation) {
        for x in 0..3 {
            for y in 0..3 {
                sim.spawn(18, Vec3::new(x as f64 * 3.8, y as f64 * 3.6, (x + y) as f64 * 0.4))
                    .unwrap();
            }
        }
    }

    #[test]
    fn rejects_invalid_parameters_and_timesteps() {
        let mut params = SimulationParams::default();
        params.force_field.cutoff = 1.0;
        assert!(matches!(
            Simulation::new(default_table(), params),
            Err(Error::InvalidParameter { .. })
        ));

        let mut sim = simulation(SimulationParams::default());
        sim.spawn(1, Vec3::zeros()).unwrap();
        assert!(matches!(sim.step(0.0), Err(Error::InvalidTimestep(_))));
        assert!(matches!(sim.step(f64::NAN), Err(Error::InvalidTimestep(_))));
        assert!(matches!(sim.step(-1.0), Err(Error::InvalidTimestep(_))));
        assert_eq!(sim.step_count(), 0);
    }

    #[test]
    fn spawn_rejects_unknown_elements() {
        let mut sim = simulation(SimulationParams::default());
        assert!(matches!(
            sim.spawn(0, Vec3::zeros()),
            Err(Error::UnknownElement(0))
        ));
        assert!(matches!(
            sim.spawn(118, Vec3::zeros()),
            Err(Error::UnknownElement(118))
        ));
        assert!(sim.atoms().is_empty());
    }

    #[test]
    fn spawn_draws_reproducible_thermal_velocities() {
        let mut first = simulation(params_at(300.0));
        let mut second = simulation(params_at(300.0));
        let a = first.spawn(18, Vec3::zeros()).unwrap();
        second.spawn(18, Vec3::zeros()).unwrap();

        let velocity = first.atoms()[a].velocity;
        assert_eq!(velocity, second.atoms()[a].velocity);
        let bound = units::thermal_speed(300.0, first.atoms()[a].mass);
        assert!(velocity.iter().all(|c| c.abs() <= bound));
        assert!(velocity.norm() > 0.0);

        let mut cold = simulation(params_at(0.0));
        cold.spawn(18, Vec3::zeros()).unwrap();
        assert_eq!(cold.atoms()[0].velocity, Vec3::zeros());
    }

    #[test]
    fn spawn_refreshes_molecules() {
        let mut sim = simulation(params_at(10.0));
        sim.spawn(18, Vec3::zeros()).unwrap();
        sim.spawn(18, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert_eq!(sim.molecules().len(), 2);
        assert_eq!(sim.atoms()[1].molecule_id, Some(1));
    }

    #[test]
    fn momentum_is_conserved_without_thermostat_or_walls() {
        let mut params = params_at(300.0);
        params.integrator.thermostat = false;
        params.integrator.reflective_boundary = false;
        params.integrator.bonding_enabled = false;
        let mut sim = simulation(params);
        argon_gas(&mut sim);

        let initial = sim.momentum();
        for _ in 0..300 {
            sim.step(1.0).unwrap();
            let net: Vec3 = sim.atoms().iter().map(|a| a.force).sum();
            assert!(net.norm() < 1e-10);
        }
        assert!((sim.momentum() - initial).norm() < 1e-10);
        assert!(sim.energies().potential < 0.0);
        assert_eq!(sim.bond_count(), 0);
    }

    #[test]
    fn energy_is_nearly_conserved_without_thermostat() {
        let mut params = params_at(100.0);
        params.integrator.thermostat = false;
        params.integrator.bonding_enabled = false;
        let mut sim = simulation(params);
        argon_gas(&mut sim);

        let start = sim.energies().total();
        for _ in 0..500 {
            sim.step(1.0).unwrap();
        }
        let drift = (sim.energies().total() - start).abs();
        assert!(drift < 1e-3, "energy drift {drift} eV");
    }

    #[test]
    fn thermostat_relaxes_towards_setpoint() {
        let mut sim = simulation(params_at(300.0));
        for k in 0..8 {
            sim.spawn(18, Vec3::new(k as f64 * 12.0 - 42.0, 0.0, 0.0)).unwrap();
        }
        sim.set_temperature(100.0);
        for _ in 0..800 {
            sim.step(1.0).unwrap();
        }
        assert!(approx_eq(sim.instantaneous_temperature(), 100.0, 1.0));
    }

    #[test]
    fn thermostat_is_idle_below_one_kelvin() {
        let mut params = params_at(300.0);
        params.integrator.bonding_enabled = false;
        let mut sim = simulation(params);
        for k in 0..4 {
            sim.spawn(18, Vec3::new(k as f64 * 12.0, 0.0, 0.0)).unwrap();
        }
        sim.set_temperature(0.5);
        let before = sim.kinetic_energy();
        sim.step(1.0).unwrap();
        assert!(approx_eq(sim.kinetic_energy(), before, 1e-12));
    }

    #[test]
    fn setpoint_is_clamped() {
        let mut sim = simulation(SimulationParams::default());
        sim.set_temperature(-5.0);
        assert_eq!(sim.temperature(), 0.0);
        sim.set_temperature(1e6);
        assert_eq!(sim.temperature(), MAX_TEMPERATURE);
        sim.set_temperature(450.0);
        assert_eq!(sim.temperature(), 450.0);
    }

    #[test]
    fn walls_reflect_and_damp() {
        let mut sim = simulation(params_at(0.0));
        sim.spawn(18, Vec3::new(49.95, 0.0, 0.0)).unwrap();
        sim.atoms[0].velocity = Vec3::new(0.2, 0.0, -0.1);
        sim.step(1.0).unwrap();

        let atom = &sim.atoms()[0];
        assert_eq!(atom.position.x, 50.0);
        assert!(approx_eq(atom.velocity.x, -0.1, 1e-12));
        assert!(approx_eq(atom.velocity.z, -0.1, 1e-12));
    }

    #[test]
    fn empty_simulation_does_not_advance() {
        let mut sim = simulation(SimulationParams::default());
        sim.step(1.0).unwrap();
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.step_count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut sim = simulation(params_at(10.0));
        sim.spawn(11, Vec3::new(5.0, -5.0, 0.0)).unwrap();
        sim.spawn(17, Vec3::new(6.0, -5.0, 0.0)).unwrap();
        for _ in 0..5 {
            sim.step(1.0).unwrap();
        }
        assert!(!sim.reaction_log().is_empty());

        sim.clear();
        assert!(sim.atoms().is_empty());
        assert!(sim.molecules().is_empty());
        assert!(sim.reaction_log().is_empty());
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.step_count(), 0);
        assert_eq!(sim.bonds_formed(), 0);
    }

    #[test]
    fn water_assembles_from_oxygen_and_two_hydrogens() {
        let mut sim = simulation(params_at(10.0));
        let o = sim.spawn(8, Vec3::zeros()).unwrap();
        let h1 = sim.spawn(1, Vec3::new(1.5, 1.0, 0.0)).unwrap();
        let h2 = sim.spawn(1, Vec3::new(-1.5, 1.0, 0.0)).unwrap();
        for _ in 0..200 {
            sim.step(1.0).unwrap();
        }

        let oxygen = &sim.atoms()[o];
        assert_eq!(oxygen.bonds().len(), 2);
        for h in [h1, h2] {
            let bond = oxygen.bond_to(h).unwrap();
            assert_eq!(bond.kind, BondKind::Covalent);
            assert!(sim.atoms()[h].is_bonded_to(o));
        }
        assert!(!sim.atoms()[h1].is_bonded_to(h2));
        assert_eq!(sim.bond_count(), 2);

        let molecules = sim.molecules();
        assert_eq!(molecules.len(), 1);
        assert_eq!(molecules[0].formula, "H2O");
        assert!(sim.atoms().iter().all(|a| a.charge() == 0));
    }

    /// Hydrogen positions `r` from an oxygen at the origin, `angle` degrees apart.
    fn hydrogen_pair(r: f64, angle: f64) -> [Vec3; 2] {
        let half = (angle / 2.0).to_radians();
        [
            Vec3::new(r * half.sin(), r * half.cos(), 0.0),
            Vec3::new(-r * half.sin(), r * half.cos(), 0.0),
        ]
    }

    fn assemble_water(r: f64, angle: f64, at_rest: bool) -> Simulation {
        let mut sim = simulation(params_at(10.0));
        sim.spawn(8, Vec3::zeros()).unwrap();
        for position in hydrogen_pair(r, angle) {
            sim.spawn(1, position).unwrap();
        }
        if at_rest {
            for atom in &mut sim.atoms {
                atom.velocity = Vec3::zeros();
            }
        }
        for _ in 0..1500 {
            sim.step(1.0).unwrap();
        }
        sim
    }

    #[test]
    fn water_assembles_from_linear_and_bent_starts() {
        // Close enough to bond on spawn, with thermal velocities.
        let bonded_on_spawn = [(1.6, 180.0), (2.0, 180.0), (1.6, 104.5), (2.0, 104.5)];
        // Too far to bond at once; Lennard-Jones draws the hydrogens in from rest.
        let drawn_in = [(2.5, 180.0), (3.0, 180.0), (2.5, 104.5), (3.0, 104.5)];
        let cases = bonded_on_spawn
            .iter()
            .map(|&(r, angle)| (r, angle, false))
            .chain(drawn_in.iter().map(|&(r, angle)| (r, angle, true)));

        for (r, angle, at_rest) in cases {
            let sim = assemble_water(r, angle, at_rest);
            let label = format!("r = {r} Å, angle = {angle}°");
            let oxygen = &sim.atoms()[0];
            assert_eq!(oxygen.bonds().len(), 2, "{label}: {:?}", sim.reaction_log());
            assert!(oxygen.bonds().iter().all(|b| b.kind == BondKind::Covalent), "{label}");
            assert!(!sim.atoms()[1].is_bonded_to(2), "{label}");
            assert_eq!(sim.molecules().len(), 1, "{label}");
            assert_eq!(sim.molecules()[0].formula, "H2O", "{label}");
            assert_eq!(sim.bonds_broken(), 0, "{label}: {:?}", sim.reaction_log());
        }
    }

    #[test]
    fn salt_forms_an_ion_pair() {
        let mut sim = simulation(params_at(10.0));
        let na = sim.spawn(11, Vec3::new(5.0, -5.0, 0.0)).unwrap();
        let cl = sim.spawn(17, Vec3::new(6.0, -5.0, 0.0)).unwrap();
        for _ in 0..200 {
            sim.step(1.0).unwrap();
        }

        let sodium = &sim.atoms()[na];
        let chlorine = &sim.atoms()[cl];
        assert_eq!(sodium.bonds().len(), 1);
        assert_eq!(sodium.bond_to(cl).unwrap().kind, BondKind::Ionic);
        assert_eq!(chlorine.bond_to(na).unwrap().kind, BondKind::Ionic);
        assert_eq!(sodium.charge(), 1);
        assert_eq!(chlorine.charge(), -1);
        assert_eq!(sodium.electrons().len(), 10);
        assert_eq!(chlorine.electrons().len(), 18);

        assert_eq!(sim.molecules().len(), 1);
        assert_eq!(sim.molecules()[0].formula, "ClNa");
        let ionic: Vec<_> = sim
            .reaction_log()
            .iter()
            .filter(|e| e.kind == ReactionKind::IonicFormed)
            .collect();
        assert_eq!(ionic.len(), 1);
        assert_eq!(ionic[0].atoms, (na, cl));
        assert_eq!(sim.bonds_broken(), 0);
    }

    #[test]
    fn valence_invariant_holds_throughout_a_run() {
        let mut sim = simulation(params_at(300.0));
        let layout = [
            (6, [0.0, 0.0, 0.0]),
            (1, [1.2, 0.3, 0.0]),
            (1, [-1.1, 0.5, 0.2]),
            (8, [2.5, 2.5, 0.0]),
            (1, [3.4, 2.0, 0.1]),
            (11, [-4.0, -3.0, 0.0]),
            (17, [-3.0, -3.2, 0.5]),
            (7, [0.5, -2.5, 1.0]),
        ];
        for (z, p) in layout {
            sim.spawn(z, Vec3::new(p[0], p[1], p[2])).unwrap();
        }
        for _ in 0..20 {
            for _ in 0..10 {
                sim.step(0.5).unwrap();
            }
            for (i, atom) in sim.atoms().iter().enumerate() {
                let expected = atom
                    .element
                    .valence_electrons
                    .saturating_sub(atom.total_bond_order());
                assert_eq!(atom.effective_valence(), expected);
                assert_eq!(
                    atom.charge(),
                    atom.atomic_number as i32 - atom.electrons().len() as i32
                );
                for bond in atom.bonds() {
                    let twin = sim.atoms()[bond.partner].bond_to(i).unwrap();
                    assert_eq!(twin.strength, bond.strength);
                    assert_eq!(twin.equilibrium_distance, bond.equilibrium_distance);
                    assert_eq!(twin.kind, bond.kind);
                }
            }
        }
        let formed = sim.bonds_formed() - sim.bonds_broken();
        assert_eq!(formed, sim.bond_count());
    }

    #[test]
    fn molecule_refresh_is_idempotent() {
        let mut sim = simulation(params_at(10.0));
        sim.spawn(8, Vec3::zeros()).unwrap();
        sim.spawn(1, Vec3::new(1.5, 1.0, 0.0)).unwrap();
        sim.spawn(18, Vec3::new(8.0, 0.0, 0.0)).unwrap();
        let before = sim.molecules().to_vec();
        sim.refresh_molecules();
        assert_eq!(before, sim.molecules());
    }
}
