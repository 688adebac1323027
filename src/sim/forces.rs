//! Pairwise and angular forces.
//!
//! Bonded pairs feel a Morse well whatever their separation. Every pair within the
//! cutoff feels Coulomb when both carry charge, and non-bonded pairs additionally feel
//! Lennard-Jones; these non-bonded terms are smoothly switched off between the switch
//! radius and the cutoff. Centres with two or more bonds get a harmonic pull towards
//! their VSEPR angle, stiffened in proportion to the weaker of the two bonds. Every contribution is applied in equal and opposite pairs (or
//! triples for angles), so internal forces always sum to zero.

use super::config::ForceFieldParams;
use super::spatial::SpatialGrid;
use super::units;
use crate::model::atom::Atom;
use crate::model::types::Vec3;

/// Pairs closer than this are treated as coincident and skipped.
const COINCIDENT: f64 = 1e-6;

/// Floor on `sin θ` in the angle force.
const MIN_SIN: f64 = 1e-4;

const TETRAHEDRAL_DEG: f64 = 109.47;

/// Potential energy totals from one force evaluation, in eV.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PotentialEnergy {
    /// Switched Lennard-Jones plus Coulomb.
    pub non_bonded: f64,
    /// Morse wells of all bonds.
    pub bonded: f64,
    /// Harmonic VSEPR angle terms.
    pub angular: f64,
}

impl PotentialEnergy {
    #[inline]
    pub fn total(&self) -> f64 {
        self.non_bonded + self.bonded + self.angular
    }
}

/// Ideal bond angle in radians for a steric number (bonds plus lone pairs).
///
/// Two or fewer groups are linear, three trigonal, four tetrahedral and anything
/// larger is treated as 90°.
pub fn ideal_angle(steric_number: u32) -> f64 {
    let degrees = match steric_number {
        0..=2 => 180.0,
        3 => 120.0,
        4 => TETRAHEDRAL_DEG,
        _ => 90.0,
    };
    f64::to_radians(degrees)
}

/// Cubic switch `S(r)` and its derivative `dS/dr`.
///
/// `S = 1` up to `switch_radius`, `S = 0` from `cutoff` on, and
/// `S = 1 − 3t² + 2t³` with `t = (r − r_s)/(r_c − r_s)` in between.
///
/// # Arguments
///
/// * `r` - Pair separation in Å.
/// * `switch_radius` - Where the switch starts to fall off.
/// * `cutoff` - Where it reaches zero.
///
/// # Returns
///
/// The pair `(S, dS/dr)`.
pub fn switching(r: f64, switch_radius: f64, cutoff: f64) -> (f64, f64) {
    if r <= switch_radius {
        return (1.0, 0.0);
    }
    if r >= cutoff {
        return (0.0, 0.0);
    }
    let width = cutoff - switch_radius;
    let t = (r - switch_radius) / width;
    let s = 1.0 - 3.0 * t * t + 2.0 * t * t * t;
    let ds = (6.0 * t * t - 6.0 * t) / width;
    (s, ds)
}

struct AngleTerm {
    energy: f64,
    on_first: Vec3,
    on_third: Vec3,
}

/// Harmonic angle `½k(θ − θ₀)²` for the angle `a–b–c` with `b` at the vertex.
fn angle_term(a: &Vec3, b: &Vec3, c: &Vec3, theta0: f64, k: f64) -> Option<AngleTerm> {
    let u = a - b;
    let v = c - b;
    let nu = u.norm();
    let nv = v.norm();
    if nu < COINCIDENT || nv < COINCIDENT {
        return None;
    }

    let cos = (u.dot(&v) / (nu * nv)).clamp(-1.0, 1.0);
    let theta = cos.acos();
    let sin = (1.0 - cos * cos).sqrt().max(MIN_SIN);
    let delta = theta - theta0;

    let dcos_da = v / (nu * nv) - u * (cos / (nu * nu));
    let dcos_dc = u / (nu * nv) - v * (cos / (nv * nv));
    let coefficient = k * delta / sin;

    Some(AngleTerm {
        energy: 0.5 * k * delta * delta,
        on_first: dcos_da * coefficient,
        on_third: dcos_dc * coefficient,
    })
}

/// Evaluates forces and potential energy for a set of atoms.
#[derive(Debug, Clone)]
pub struct ForceField {
    params: ForceFieldParams,
}

impl ForceField {
    pub fn new(params: ForceFieldParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForceFieldParams {
        &self.params
    }

    /// Rebuilds every atom's force accumulator and kinetic energy.
    ///
    /// Bond partners that point outside `atoms` are ignored.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The atom collection; positions and bonds are read, `force` and
    ///   `kinetic_energy` are overwritten.
    ///
    /// # Returns
    ///
    /// The potential energy of the configuration, split by term.
    pub fn compute(&self, atoms: &mut [Atom]) -> PotentialEnergy {
        let positions: Vec<Vec3> = atoms.iter().map(|a| a.position).collect();
        let mut forces = vec![Vec3::zeros(); atoms.len()];
        let mut energy = PotentialEnergy::default();

        energy.bonded = self.accumulate_bonded(atoms, &positions, &mut forces);
        energy.non_bonded = self.accumulate_non_bonded(atoms, &positions, &mut forces);
        energy.angular = self.accumulate_angular(atoms, &positions, &mut forces);

        for (atom, force) in atoms.iter_mut().zip(forces) {
            atom.force = force;
            atom.kinetic_energy = units::kinetic_energy(atom.mass, &atom.velocity);
        }
        energy
    }

    fn accumulate_bonded(&self, atoms: &[Atom], positions: &[Vec3], forces: &mut [Vec3]) -> f64 {
        let mut energy = 0.0;
        for (i, atom) in atoms.iter().enumerate() {
            for bond in atom.bonds() {
                let j = bond.partner;
                if j <= i || j >= atoms.len() {
                    continue;
                }
                let diff = positions[i] - positions[j];
                let r = diff.norm();
                if r < COINCIDENT {
                    continue;
                }
                energy += bond.morse_energy(r);
                let f = diff * (-bond.morse_derivative(r) / r);
                forces[i] += f;
                forces[j] -= f;
            }
        }
        energy
    }

    /// Unswitched non-bonded energy and its radial derivative at separation `r`.
    fn pair_terms(&self, a: &Atom, b: &Atom, r: f64, bonded: bool) -> (f64, f64) {
        let mut u = 0.0;
        let mut du = 0.0;

        if !bonded {
            let sigma = 0.5 * (a.element.vdw_radius_angstrom() + b.element.vdw_radius_angstrom());
            let sr6 = (sigma / r).powi(6);
            let sr12 = sr6 * sr6;
            let eps = self.params.lj_epsilon;
            u += 4.0 * eps * (sr12 - sr6);
            du -= 24.0 * eps * (2.0 * sr12 - sr6) / r;
        }

        let qq = (a.charge() * b.charge()) as f64;
        if qq != 0.0 {
            let k = self.params.coulomb_k;
            u += k * qq / r;
            du -= k * qq / (r * r);
        }

        (u, du)
    }

    fn accumulate_non_bonded(
        &self,
        atoms: &[Atom],
        positions: &[Vec3],
        forces: &mut [Vec3],
    ) -> f64 {
        let cutoff = self.params.cutoff;
        let grid = SpatialGrid::from_positions(positions, cutoff);
        let mut energy = 0.0;

        for (i, j) in grid.pairs_within(positions, cutoff) {
            let diff = positions[i] - positions[j];
            let r = diff.norm();
            if r < COINCIDENT {
                continue;
            }
            let dir = diff / r;
            let r_eff = r.max(self.params.min_distance);

            let bonded = atoms[i].is_bonded_to(j);
            let (u, du) = self.pair_terms(&atoms[i], &atoms[j], r_eff, bonded);
            if u == 0.0 && du == 0.0 {
                continue;
            }
            let (s, ds) = switching(r_eff, self.params.switch_radius, cutoff);

            energy += s * u;
            let f = dir * -(ds * u + s * du);
            forces[i] += f;
            forces[j] -= f;
        }
        energy
    }

    fn accumulate_angular(&self, atoms: &[Atom], positions: &[Vec3], forces: &mut [Vec3]) -> f64 {
        let angle_k = self.params.angle_k;
        if angle_k == 0.0 {
            return 0.0;
        }
        let n = atoms.len();
        let mut energy = 0.0;

        for (b, center) in atoms.iter().enumerate() {
            let bonds = center.bonds();
            if bonds.len() < 2 {
                continue;
            }
            let theta0 = ideal_angle(bonds.len() as u32 + center.lone_pairs());

            for (x, first) in bonds.iter().enumerate() {
                for second in &bonds[x + 1..] {
                    let (a, c) = (first.partner, second.partner);
                    if a == c || a >= n || c >= n {
                        continue;
                    }
                    let k = angle_k * first.strength.min(second.strength);
                    let Some(term) = angle_term(&positions[a], &positions[b], &positions[c], theta0, k)
                    else {
                        continue;
                    };
                    energy += term.energy;
                    forces[a] += term.on_first;
                    forces[c] += term.on_third;
                    forces[b] -= term.on_first + term.on_third;
                }
            }
        }
        energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::elements::default_table;
    use crate::model::bond::Bond;
    use crate::model::types::{BondKind, BondOrder};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn atom(z: u8, pos: [f64; 3]) -> Atom {
        let table = default_table();
        Atom::new(z, table.get(z), Vec3::new(pos[0], pos[1], pos[2]))
    }

    fn bond(atoms: &mut [Atom], i: usize, j: usize, strength: f64, re: f64) {
        let half = Bond::new(j, BondKind::Covalent, BondOrder::Single, strength, re, 5.0);
        atoms[j].push_bond(half.mirrored(i));
        atoms[i].push_bond(half);
    }

    fn net_force(atoms: &[Atom]) -> Vec3 {
        atoms.iter().map(|a| a.force).sum()
    }

    fn total_energy(field: &ForceField, atoms: &[Atom]) -> f64 {
        let mut copy = atoms.to_vec();
        field.compute(&mut copy).total()
    }

    /// Water-like fragment plus a charged ion pair, all within the switching shell.
    fn mixed_system() -> Vec<Atom> {
        let mut atoms = vec![
            atom(8, [0.0, 0.0, 0.0]),
            atom(1, [0.95, 0.1, 0.05]),
            atom(1, [-0.3, 0.92, -0.1]),
            atom(11, [3.1, -0.4, 0.7]),
            atom(17, [5.2, 0.3, -1.1]),
            atom(18, [-2.5, -8.6, 0.4]),
        ];
        bond(&mut atoms, 0, 1, 4.0, 0.97);
        bond(&mut atoms, 0, 2, 4.0, 0.97);
        let electron = atoms[3].remove_outer_electron().unwrap();
        atoms[4].add_electron(electron);
        atoms
    }

    #[test]
    fn switching_is_smooth_at_both_ends() {
        let (s, ds) = switching(8.0, 8.0, 10.0);
        assert_eq!((s, ds), (1.0, 0.0));
        let (s, ds) = switching(10.0, 8.0, 10.0);
        assert_eq!((s, ds), (0.0, 0.0));
        let (s, ds) = switching(9.0, 8.0, 10.0);
        assert!(approx_eq(s, 0.5, 1e-12));
        assert!(approx_eq(ds, -0.75, 1e-12));
        let (near_start, d_start) = switching(8.0 + 1e-7, 8.0, 10.0);
        assert!(approx_eq(near_start, 1.0, 1e-10));
        assert!(approx_eq(d_start, 0.0, 1e-5));
    }

    #[test]
    fn ideal_angles_follow_steric_number() {
        assert!(approx_eq(ideal_angle(2), std::f64::consts::PI, 1e-12));
        assert!(approx_eq(ideal_angle(3).to_degrees(), 120.0, 1e-9));
        assert!(approx_eq(ideal_angle(4).to_degrees(), 109.47, 1e-9));
        assert!(approx_eq(ideal_angle(6).to_degrees(), 90.0, 1e-9));
    }

    #[test]
    fn internal_forces_sum_to_zero() {
        let field = ForceField::new(ForceFieldParams::default());
        let mut atoms = mixed_system();
        let energy = field.compute(&mut atoms);
        let total = net_force(&atoms);
        assert!(total.norm() < 1e-10, "net force {total:?}");
        assert!(energy.bonded > 0.0);
        assert!(energy.angular > 0.0);
        assert!(energy.non_bonded < 0.0);
    }

    #[test]
    fn forces_are_the_negative_energy_gradient() {
        let field = ForceField::new(ForceFieldParams::default());
        let mut atoms = mixed_system();
        field.compute(&mut atoms);
        let h = 1e-5;

        for idx in 0..atoms.len() {
            for axis in 0..3 {
                let mut plus = atoms.clone();
                plus[idx].position[axis] += h;
                let mut minus = atoms.clone();
                minus[idx].position[axis] -= h;
                let numeric = -(total_energy(&field, &plus) - total_energy(&field, &minus)) / (2.0 * h);
                let analytic = atoms[idx].force[axis];
                assert!(
                    approx_eq(numeric, analytic, 1e-4 * analytic.abs().max(1.0)),
                    "atom {idx} axis {axis}: numeric {numeric} analytic {analytic}"
                );
            }
        }
    }

    #[test]
    fn angle_forces_obey_third_law_and_restore_geometry() {
        let field = ForceField::new(ForceFieldParams {
            lj_epsilon: 0.0,
            ..ForceFieldParams::default()
        });
        // Carbon with two bonds and two free valence electrons: steric number 3.
        let mut atoms = vec![
            atom(6, [0.0, 0.0, 0.0]),
            atom(1, [1.09, 0.0, 0.0]),
            atom(1, [0.0, 1.09, 0.0]),
        ];
        bond(&mut atoms, 0, 1, 4.0, 1.09);
        bond(&mut atoms, 0, 2, 4.0, 1.09);
        let energy = field.compute(&mut atoms);

        assert!(approx_eq(energy.bonded, 0.0, 1e-12));
        let delta = 90f64.to_radians() - 120f64.to_radians();
        let k = 0.1 * 4.0;
        assert!(approx_eq(energy.angular, 0.5 * k * delta * delta, 1e-12));
        assert!(net_force(&atoms).norm() < 1e-12);
        // 90° is tighter than 120°, so the hydrogens are pushed apart.
        assert!(atoms[1].force.y < 0.0);
        assert!(atoms[2].force.x < 0.0);
    }

    #[test]
    fn neutral_bonded_pair_feels_only_morse() {
        let field = ForceField::new(ForceFieldParams::default());
        let mut atoms = vec![atom(1, [0.0, 0.0, 0.0]), atom(1, [1.2, 0.0, 0.0])];
        bond(&mut atoms, 0, 1, 4.5, 0.74);
        let energy = field.compute(&mut atoms);
        assert_eq!(energy.non_bonded, 0.0);
        let expected = atoms[0].bonds()[0].morse_derivative(1.2);
        assert!(approx_eq(atoms[0].force.x, expected, 1e-12));
        assert!(atoms[0].force.x > 0.0);
    }

    #[test]
    fn pairs_beyond_cutoff_do_not_interact() {
        let field = ForceField::new(ForceFieldParams::default());
        let mut atoms = vec![atom(18, [0.0, 0.0, 0.0]), atom(18, [10.5, 0.0, 0.0])];
        let energy = field.compute(&mut atoms);
        assert_eq!(energy.total(), 0.0);
        assert_eq!(atoms[0].force, Vec3::zeros());
    }

    #[test]
    fn coincident_atoms_stay_finite() {
        let field = ForceField::new(ForceFieldParams::default());
        let mut atoms = vec![
            atom(18, [1.0, 1.0, 1.0]),
            atom(18, [1.0, 1.0, 1.0]),
            atom(18, [1.0, 1.0, 1.2]),
        ];
        let energy = field.compute(&mut atoms);
        assert!(energy.total().is_finite());
        assert!(atoms.iter().all(|a| a.force.iter().all(|c| c.is_finite())));
    }
}
