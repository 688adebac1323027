use super::error::Error;
use crate::model::atom::Atom;
use crate::model::types::BondKind;
use std::io::Write;

const CHARGES_PER_LINE: usize = 8;

/// CTfile bond type for "any", used for interactions with no dedicated code.
const CTFILE_ANY: u32 = 8;

/// CTfile bond type; ionic pairs have no CTfile equivalent and are written as single bonds.
fn ctfile_bond_type(kind: BondKind, order: u32) -> u32 {
    match kind {
        BondKind::Ionic => 1,
        BondKind::Covalent => order.clamp(1, 3),
        BondKind::Metallic | BondKind::Hydrogen | BondKind::VanDerWaals => CTFILE_ANY,
    }
}

/// Writes the current atoms and bond graph as a single V2000 SDF record.
///
/// Each bond is listed once. Formal charges go into `M  CHG` property lines.
///
/// # Arguments
///
/// * `writer` - Destination for the record.
/// * `atoms` - The atom collection; bond partners index into it.
/// * `title` - Header line; only its first line is written.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write<W: Write>(mut writer: W, atoms: &[Atom], title: &str) -> Result<(), Error> {
    let bonds: Vec<(usize, usize, u32)> = atoms
        .iter()
        .enumerate()
        .flat_map(|(i, atom)| {
            atom.bonds()
                .iter()
                .filter(move |b| b.partner > i)
                .map(move |b| (i, b.partner, ctfile_bond_type(b.kind, b.order.value())))
        })
        .collect();

    writeln!(writer, "{}", title.lines().next().unwrap_or(""))?;
    writeln!(writer, "emergent-chem")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        atoms.len(),
        bonds.len()
    )?;

    for atom in atoms {
        writeln!(
            writer,
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
            atom.position.x,
            atom.position.y,
            atom.position.z,
            atom.symbol()
        )?;
    }

    for &(i, j, kind) in &bonds {
        writeln!(writer, "{:>3}{:>3}{:>3}  0  0  0  0", i + 1, j + 1, kind)?;
    }

    let charged: Vec<(usize, i32)> = atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.charge() != 0)
        .map(|(i, a)| (i + 1, a.charge()))
        .collect();
    for chunk in charged.chunks(CHARGES_PER_LINE) {
        write!(writer, "M  CHG{:>3}", chunk.len())?;
        for &(idx, charge) in chunk {
            write!(writer, " {:>3} {:>3}", idx, charge)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "M  END")?;
    writeln!(writer, "$$$$")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::elements::default_table;
    use crate::model::bond::Bond;
    use crate::model::types::{BondOrder, Vec3};

    fn atom(z: u8, x: f64) -> Atom {
        Atom::new(z, default_table().get(z), Vec3::new(x, 0.0, 0.0))
    }

    fn link(atoms: &mut [Atom], i: usize, j: usize, kind: BondKind, order: BondOrder) {
        let half = Bond::new(j, kind, order, 4.0, 1.2, 5.0);
        atoms[j].push_bond(half.mirrored(i));
        atoms[i].push_bond(half);
    }

    fn render(atoms: &[Atom]) -> Vec<String> {
        let mut buf = Vec::new();
        write(&mut buf, atoms, "snapshot").unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn bonds_are_listed_once_with_their_order() {
        let mut atoms = vec![atom(6, 0.0), atom(8, 1.2), atom(8, -1.2)];
        link(&mut atoms, 0, 1, BondKind::Covalent, BondOrder::Double);
        link(&mut atoms, 0, 2, BondKind::Covalent, BondOrder::Double);
        let lines = render(&atoms);

        assert_eq!(lines[0], "snapshot");
        assert!(lines[3].starts_with("  3  2"));
        assert!(lines[3].ends_with("V2000"));
        assert!(lines[4].contains(" C "));
        assert_eq!(lines[7], "  1  2  2  0  0  0  0");
        assert_eq!(lines[8], "  1  3  2  0  0  0  0");
        assert_eq!(lines[9], "M  END");
        assert_eq!(lines[10], "$$$$");
    }

    #[test]
    fn ionic_bonds_become_single_bonds_with_charges() {
        let mut atoms = vec![atom(11, 0.0), atom(17, 2.68)];
        let electron = atoms[0].remove_outer_electron().unwrap();
        atoms[1].add_electron(electron);
        link(&mut atoms, 0, 1, BondKind::Ionic, BondOrder::Single);
        let lines = render(&atoms);

        assert_eq!(lines[6], "  1  2  1  0  0  0  0");
        assert_eq!(lines[7], "M  CHG  2   1   1   2  -1");
        assert_eq!(lines[8], "M  END");
    }

    #[test]
    fn other_bond_kinds_are_written_as_any() {
        let mut atoms = vec![atom(8, 0.0), atom(1, 1.8), atom(26, 5.0), atom(26, 7.5)];
        link(&mut atoms, 0, 1, BondKind::Hydrogen, BondOrder::Single);
        link(&mut atoms, 2, 3, BondKind::Metallic, BondOrder::Single);
        let lines = render(&atoms);

        assert!(lines[3].starts_with("  4  2"));
        assert_eq!(lines[8], "  1  2  8  0  0  0  0");
        assert_eq!(lines[9], "  3  4  8  0  0  0  0");
        assert_eq!(lines[10], "M  END");
        assert_eq!(ctfile_bond_type(BondKind::VanDerWaals, 1), CTFILE_ANY);
    }

    #[test]
    fn empty_snapshot_is_a_valid_record() {
        let lines = render(&[]);
        assert!(lines[3].starts_with("  0  0"));
        assert_eq!(lines[4], "M  END");
        assert_eq!(lines[5], "$$$$");
    }
}
