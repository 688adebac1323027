use super::types::Vec3;
use std::collections::BTreeMap;

/// One connected component of the bond graph, as of the last tracker refresh.
///
/// Molecules carry no identity across refreshes; `id` is only the component's
/// position in the refreshed list.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub id: usize,
    /// Member atom indices in breadth-first discovery order.
    pub atom_indices: Vec<usize>,
    /// Hill-system formula, e.g. `"H2O"`.
    pub formula: String,
    /// Total mass in amu.
    pub total_mass: f64,
    pub center_of_mass: Vec3,
    /// Sum of distinct bond strengths inside the component, in eV.
    pub total_bond_energy: f64,
}

impl Molecule {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_indices.len()
    }

    #[inline]
    pub fn is_single_atom(&self) -> bool {
        self.atom_indices.len() == 1
    }
}

/// Canonical Hill formula for a multiset of element symbols.
///
/// Carbon comes first and hydrogen second when present, the rest follow in
/// alphabetical order. A count of one is omitted.
///
/// # Examples
///
/// ```
/// use emergent_chem::model::molecule::hill_formula;
///
/// assert_eq!(hill_formula(["O", "H", "H"]), "H2O");
/// assert_eq!(hill_formula(["Na", "Cl"]), "ClNa");
/// ```
pub fn hill_formula<'a>(symbols: impl IntoIterator<Item = &'a str>) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for symbol in symbols {
        *counts.entry(symbol).or_default() += 1;
    }

    let mut formula = String::new();
    let mut append = |symbol: &str, count: usize| {
        formula.push_str(symbol);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    };

    for lead in ["C", "H"] {
        if let Some(count) = counts.remove(lead) {
            append(lead, count);
        }
    }
    for (symbol, count) in counts {
        append(symbol, count);
    }
    formula
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hill_puts_carbon_then_hydrogen_first() {
        let propane = ["H", "C", "H", "H", "C", "H", "H", "H", "C", "H", "H"];
        assert_eq!(hill_formula(propane), "C3H8");
    }

    #[test]
    fn hill_without_carbon_keeps_hydrogen_first() {
        assert_eq!(hill_formula(["O", "H", "H"]), "H2O");
        assert_eq!(hill_formula(["S", "O", "H", "O", "H", "O", "O"]), "H2O4S");
    }

    #[test]
    fn hill_without_carbon_or_hydrogen_is_alphabetical() {
        assert_eq!(hill_formula(["Na", "Cl"]), "ClNa");
        assert_eq!(hill_formula(["O", "Mg"]), "MgO");
    }

    #[test]
    fn hill_single_atom_is_its_symbol() {
        assert_eq!(hill_formula(["Ar"]), "Ar");
        assert_eq!(hill_formula(std::iter::empty()), "");
    }

    #[test]
    fn hill_distinguishes_two_letter_symbols() {
        assert_eq!(hill_formula(["Ca", "C", "O", "O", "O"]), "CCaO3");
        assert_eq!(hill_formula(["Cl", "C", "Cl", "Cl", "Cl"]), "CCl4");
    }
}
