//! Connected components of the bond graph.

use crate::model::atom::Atom;
use crate::model::molecule::{Molecule, hill_formula};
use crate::model::types::Vec3;
use std::collections::VecDeque;

/// Rebuilds the molecule list from scratch on every refresh.
#[derive(Debug, Clone, Default)]
pub struct MoleculeTracker {
    molecules: Vec<Molecule>,
}

impl MoleculeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn clear(&mut self) {
        self.molecules.clear();
    }

    /// Recomputes all molecules and stamps each atom's `molecule_id`.
    ///
    /// Nothing from the previous refresh is carried over; ids are reassigned.
    pub fn refresh(&mut self, atoms: &mut [Atom]) {
        self.molecules = find_molecules(atoms);
        for molecule in &self.molecules {
            for &idx in &molecule.atom_indices {
                atoms[idx].molecule_id = Some(molecule.id);
            }
        }
    }
}

/// Breadth-first search over the bond graph, one molecule per component.
///
/// Components are numbered in order of their lowest atom index.
///
/// # Arguments
///
/// * `atoms` - The atom collection; bond partners outside it are ignored.
///
/// # Returns
///
/// One [`Molecule`] per connected component, unbonded atoms included, with
/// formula, mass, centre of mass and the summed strength of its distinct bonds.
pub fn find_molecules(atoms: &[Atom]) -> Vec<Molecule> {
    let n = atoms.len();
    let mut visited = vec![false; n];
    let mut molecules = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut members = Vec::new();

        while let Some(current) = queue.pop_front() {
            members.push(current);
            for bond in atoms[current].bonds() {
                let next = bond.partner;
                if next < n && !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        molecules.push(summarize(molecules.len(), members, atoms));
    }

    molecules
}

fn summarize(id: usize, atom_indices: Vec<usize>, atoms: &[Atom]) -> Molecule {
    let mut total_mass = 0.0;
    let mut weighted = Vec3::zeros();
    let mut total_bond_energy = 0.0;

    for &idx in &atom_indices {
        let atom = &atoms[idx];
        total_mass += atom.mass;
        weighted += atom.position * atom.mass;
        total_bond_energy += atom
            .bonds()
            .iter()
            .filter(|b| b.partner > idx)
            .map(|b| b.strength)
            .sum::<f64>();
    }

    let center_of_mass = if total_mass > 0.0 {
        weighted / total_mass
    } else {
        Vec3::zeros()
    };
    let formula = hill_formula(atom_indices.iter().map(|&idx| atoms[idx].symbol()));

    Molecule {
        id,
        atom_indices,
        formula,
        total_mass,
        center_of_mass,
        total_bond_energy,
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
        Atom::new(z, default_table().get(z), Vec3::new(pos[0], pos[1], pos[2]))
    }

    fn bond(atoms: &mut [Atom], i: usize, j: usize, strength: f64) {
        let half = Bond::new(j, BondKind::Covalent, BondOrder::Single, strength, 1.0, 5.0);
        atoms[j].push_bond(half.mirrored(i));
        atoms[i].push_bond(half);
    }

    fn propane() -> Vec<Atom> {
        let mut atoms: Vec<Atom> = (0..3).map(|k| atom(6, [k as f64 * 1.5, 0.0, 0.0])).collect();
        bond(&mut atoms, 0, 1, 3.6);
        bond(&mut atoms, 1, 2, 3.6);
        let hydrogens_per_carbon = [3, 2, 3];
        for (carbon, &count) in hydrogens_per_carbon.iter().enumerate() {
            for h in 0..count {
                atoms.push(atom(1, [carbon as f64 * 1.5, 1.0, h as f64]));
                let idx = atoms.len() - 1;
                bond(&mut atoms, carbon, idx, 4.3);
            }
        }
        atoms
    }

    #[test]
    fn propane_is_one_molecule() {
        let atoms = propane();
        let molecules = find_molecules(&atoms);
        assert_eq!(molecules.len(), 1);
        let molecule = &molecules[0];
        assert_eq!(molecule.formula, "C3H8");
        assert_eq!(molecule.atom_count(), 11);
        assert!(approx_eq(molecule.total_bond_energy, 2.0 * 3.6 + 8.0 * 4.3, 1e-9));
        assert!(approx_eq(molecule.total_mass, 3.0 * 12.011 + 8.0 * 1.008, 1e-9));
    }

    #[test]
    fn unbonded_atoms_are_single_atom_molecules() {
        let atoms = vec![atom(18, [0.0, 0.0, 0.0]), atom(18, [4.0, 0.0, 0.0])];
        let molecules = find_molecules(&atoms);
        assert_eq!(molecules.len(), 2);
        assert!(molecules.iter().all(|m| m.is_single_atom() && m.formula == "Ar"));
        assert_eq!(molecules[0].total_bond_energy, 0.0);
        assert_eq!(molecules[1].center_of_mass, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn center_of_mass_is_mass_weighted() {
        let mut atoms = vec![atom(8, [0.0, 0.0, 0.0]), atom(1, [1.0, 0.0, 0.0]), atom(1, [0.0, 1.0, 0.0])];
        bond(&mut atoms, 0, 1, 4.0);
        bond(&mut atoms, 0, 2, 4.0);
        let molecules = find_molecules(&atoms);
        assert_eq!(molecules.len(), 1);
        assert_eq!(molecules[0].formula, "H2O");
        let total = 15.999 + 2.0 * 1.008;
        let com = molecules[0].center_of_mass;
        assert!(approx_eq(com.x, 1.008 / total, 1e-12));
        assert!(approx_eq(com.y, 1.008 / total, 1e-12));
    }

    #[test]
    fn refresh_is_idempotent_and_stamps_atoms() {
        let mut atoms = propane();
        atoms.push(atom(11, [20.0, 0.0, 0.0]));
        atoms.push(atom(17, [22.0, 0.0, 0.0]));
        let half = Bond::new(12, BondKind::Ionic, BondOrder::Single, 5.0, 2.68, 5.0);
        atoms[12].push_bond(half.mirrored(11));
        atoms[11].push_bond(half);

        let mut tracker = MoleculeTracker::new();
        tracker.refresh(&mut atoms);
        let first = tracker.molecules().to_vec();
        tracker.refresh(&mut atoms);
        assert_eq!(first, tracker.molecules());

        let formulas: Vec<&str> = first.iter().map(|m| m.formula.as_str()).collect();
        assert_eq!(formulas, vec!["C3H8", "ClNa"]);
        assert_eq!(atoms[0].molecule_id, Some(0));
        assert_eq!(atoms[12].molecule_id, Some(1));
    }

    #[test]
    fn empty_input_gives_no_molecules() {
        let mut tracker = MoleculeTracker::new();
        tracker.refresh(&mut []);
        assert!(tracker.molecules().is_empty());
    }
}
