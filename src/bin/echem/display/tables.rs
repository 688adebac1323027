use std::collections::BTreeMap;
use std::io::{self, Write};

use emergent_chem::{PeriodicTable, ReactionEvent, Simulation};

use super::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();
const DESCRIPTION_WIDTH: usize = 28;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

pub fn print_energy_report(sim: &Simulation) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let energies = sim.energies();

    let rows = vec![
        ("Atoms", format!("{}", sim.atoms().len())),
        ("Bonds", format!("{}", sim.bond_count())),
        ("Molecules", format!("{}", sim.molecules().len())),
        ("Time", format!("{:.1} fs ({} steps)", sim.time(), sim.step_count())),
        (
            "Temperature",
            format!("{:.1} K (setpoint {:.1} K)", energies.temperature, sim.temperature()),
        ),
        ("Kinetic", format!("{:.4} eV", energies.kinetic)),
        ("Potential", format!("{:.4} eV", energies.potential)),
        ("Bond (Morse)", format!("{:.4} eV", energies.bond)),
        ("Total", format!("{:.4} eV", energies.total())),
        ("|Momentum|", format!("{:.3e} amu·Å/fs", energies.momentum.norm())),
        (
            "Formed / Broken",
            format!("{} / {}", sim.bonds_formed(), sim.bonds_broken()),
        ),
    ];

    print_kv_table(&mut out, "Final State", &rows);
}

pub fn print_molecules(sim: &Simulation) {
    let mut by_formula: BTreeMap<&str, (usize, usize, f64)> = BTreeMap::new();
    for molecule in sim.molecules() {
        let entry = by_formula.entry(molecule.formula.as_str()).or_default();
        entry.0 += 1;
        entry.1 += molecule.atom_count();
        entry.2 += molecule.total_bond_energy;
    }
    if by_formula.is_empty() {
        return;
    }

    let mut rows: Vec<_> = by_formula.into_iter().collect();
    rows.sort_by(|a, b| b.1.1.cmp(&a.1.1).then(a.0.cmp(b.0)));
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|(formula, (count, atoms, energy))| {
            vec![
                truncate(formula, 16),
                count.to_string(),
                atoms.to_string(),
                format!("{:.3}", energy),
            ]
        })
        .collect();

    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_grid(
        &mut out,
        "Molecules",
        &[
            ("Formula", Align::Left),
            ("Count", Align::Right),
            ("Atoms", Align::Right),
            ("De sum (eV)", Align::Right),
        ],
        &rows,
    );
}

pub fn print_reactions(log: &[ReactionEvent], limit: usize) {
    if log.is_empty() {
        return;
    }
    let skipped = log.len().saturating_sub(limit);
    let rows: Vec<Vec<String>> = log[skipped..]
        .iter()
        .map(|event| {
            vec![
                format!("{:.1}", event.time),
                event.kind.to_string(),
                format!("{}-{}", event.atoms.0, event.atoms.1),
                truncate(&event.description, DESCRIPTION_WIDTH),
            ]
        })
        .collect();

    let title = if skipped > 0 {
        format!("Reactions (last {} of {})", rows.len(), log.len())
    } else {
        format!("Reactions ({})", log.len())
    };

    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_grid(
        &mut out,
        &title,
        &[
            ("t (fs)", Align::Right),
            ("Event", Align::Left),
            ("Pair", Align::Left),
            ("Description", Align::Left),
        ],
        &rows,
    );
}

/// Plain-text summary for non-interactive runs.
pub fn print_run_summary(out: &mut impl Write, sim: &Simulation) -> io::Result<()> {
    let energies = sim.energies();
    writeln!(
        out,
        "steps={} time_fs={:.3} atoms={} bonds={} formed={} broken={}",
        sim.step_count(),
        sim.time(),
        sim.atoms().len(),
        sim.bond_count(),
        sim.bonds_formed(),
        sim.bonds_broken()
    )?;
    writeln!(
        out,
        "temperature_K={:.3} kinetic_eV={:.6} potential_eV={:.6} bond_eV={:.6} total_eV={:.6}",
        energies.temperature,
        energies.kinetic,
        energies.potential,
        energies.bond,
        energies.total()
    )?;
    let formulas: Vec<&str> = sim.molecules().iter().map(|m| m.formula.as_str()).collect();
    writeln!(out, "molecules={}", formulas.join(","))?;
    Ok(())
}

pub fn print_element_table(out: &mut impl Write, table: &PeriodicTable) -> io::Result<()> {
    let columns = [
        ("Z", Align::Right),
        ("Symbol", Align::Left),
        ("Name", Align::Left),
        ("Mass", Align::Right),
        ("χ", Align::Right),
        ("IE (eV)", Align::Right),
        ("EA (eV)", Align::Right),
        ("Val", Align::Right),
        ("Category", Align::Left),
    ];
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|e| {
            vec![
                e.atomic_number.to_string(),
                e.symbol.clone(),
                truncate(&e.name, 12),
                format!("{:.3}", e.atomic_mass),
                format!("{:.2}", e.electronegativity),
                format!("{:.3}", e.ionization_energy),
                format!("{:.3}", e.electron_affinity),
                e.valence_electrons.to_string(),
                e.category.to_string(),
            ]
        })
        .collect();

    let widths = column_widths(&columns, &rows);
    let header: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    writeln!(out, "{}", format_row(&header, &columns, &widths, "  "))?;
    writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)))?;
    for row in &rows {
        writeln!(out, "{}", format_row(row, &columns, &widths, "  "))?;
    }
    writeln!(out, "{} elements", table.len())?;
    Ok(())
}

fn column_widths(columns: &[(&str, Align)], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}

fn format_row(row: &[String], columns: &[(&str, Align)], widths: &[usize], sep: &str) -> String {
    row.iter()
        .zip(columns)
        .zip(widths)
        .map(|((cell, (_, align)), &width)| pad(cell, width, *align))
        .collect::<Vec<_>>()
        .join(sep)
}

fn rule(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{INDENT}{left}{}{right}", segments.join(mid))
}

fn print_grid(out: &mut impl Write, title: &str, columns: &[(&str, Align)], rows: &[Vec<String>]) {
    let widths = column_widths(columns, rows);
    let header: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule(&widths, "┌", "┬", "┐"));
    let _ = writeln!(out, "{INDENT}│ {} │", format_row(&header, columns, &widths, " │ "));
    let _ = writeln!(out, "{}", rule(&widths, "├", "┼", "┤"));
    for row in rows {
        let _ = writeln!(out, "{INDENT}│ {} │", format_row(row, columns, &widths, " │ "));
    }
    let _ = writeln!(out, "{}", rule(&widths, "└", "┴", "┘"));
    let _ = writeln!(out);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + 7);

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule(&[key_w, val_w], "┌", "┬", "┐"));
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {} │ {} │",
            pad(key, key_w, Align::Left),
            pad(&truncate(value, val_w), val_w, Align::Right)
        );
    }
    let _ = writeln!(out, "{}", rule(&[key_w, val_w], "└", "┴", "┘"));
    let _ = writeln!(out);
}
