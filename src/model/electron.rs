//! Electron quantum states and ground-state configuration by Aufbau filling.

/// Aufbau subshell sequence as `(n, l)` pairs, ordered by `n + l` then `n`.
const FILL_ORDER: [(u32, u32); 20] = [
    (1, 0),
    (2, 0),
    (2, 1),
    (3, 0),
    (3, 1),
    (4, 0),
    (3, 2),
    (4, 1),
    (5, 0),
    (4, 2),
    (5, 1),
    (6, 0),
    (4, 3),
    (5, 2),
    (6, 1),
    (7, 0),
    (5, 3),
    (6, 2),
    (7, 1),
    (6, 3),
];

/// Spin projection, `+1/2` or `-1/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// Spin as the signed integer used in quantum-number tuples (`+1` / `-1`).
    pub fn sign(&self) -> i32 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantumNumbers {
    /// Principal quantum number.
    pub n: u32,
    /// Angular momentum quantum number.
    pub l: u32,
    /// Magnetic quantum number, `-l..=l`.
    pub m: i32,
    pub s: Spin,
}

/// A single electron.
///
/// `shared` and `shared_with` are visualization bookkeeping only; the dynamics never
/// read them.
#[derive(Debug, Clone, PartialEq)]
pub struct Electron {
    pub qn: QuantumNumbers,
    /// Slater effective nuclear charge, cached for orbital sampling.
    pub z_eff: f64,
    pub shared: bool,
    pub shared_with: Option<usize>,
}

impl Electron {
    pub fn new(qn: QuantumNumbers) -> Self {
        Self {
            qn,
            z_eff: 1.0,
            shared: false,
            shared_with: None,
        }
    }
}

#[inline]
fn subshell_capacity(l: u32) -> u32 {
    2 * (2 * l + 1)
}

/// Ground-state electron list for atomic number `z`, in fill order.
///
/// The last element is the outermost electron. Each orbital of a subshell takes spin
/// up then spin down before moving to the next magnetic number. Effective charges are
/// filled in with Slater's rules. `z == 0` yields an empty configuration.
pub fn fill_electron_shells(z: u32) -> Vec<Electron> {
    let mut electrons = Vec::with_capacity(z as usize);
    let mut remaining = z;

    for &(n, l) in FILL_ORDER.iter() {
        if remaining == 0 {
            break;
        }
        let mut to_fill = remaining.min(subshell_capacity(l));
        let l_signed = l as i32;

        'orbitals: for m in -l_signed..=l_signed {
            for s in [Spin::Up, Spin::Down] {
                if to_fill == 0 {
                    break 'orbitals;
                }
                electrons.push(Electron::new(QuantumNumbers { n, l, m, s }));
                to_fill -= 1;
                remaining -= 1;
            }
        }
    }

    let occupied: Vec<(u32, u32)> = electrons.iter().map(|e| (e.qn.n, e.qn.l)).collect();
    for electron in &mut electrons {
        electron.z_eff = slater_effective_charge(z, electron.qn.n, electron.qn.l, &occupied);
    }

    electrons
}

/// Highest occupied principal quantum number, or 0 for an empty configuration.
pub fn outermost_shell(electrons: &[Electron]) -> u32 {
    electrons.iter().map(|e| e.qn.n).max().unwrap_or(0)
}

/// Number of electrons in the outermost occupied shell.
pub fn count_valence_electrons(electrons: &[Electron]) -> u32 {
    let outer = outermost_shell(electrons);
    if outer == 0 {
        return 0;
    }
    electrons.iter().filter(|e| e.qn.n == outer).count() as u32
}

fn slater_group(n: u32, l: u32) -> u32 {
    if l >= 2 { n * 10 + l } else { n * 10 }
}

/// Effective nuclear charge seen by an `(n, l)` electron under Slater's rules.
///
/// # Arguments
///
/// * `z` - Atomic number.
/// * `n`, `l` - Principal and azimuthal quantum numbers of the target electron.
/// * `occupied` - The `(n, l)` of every electron in the atom, the target included.
///
/// # Returns
///
/// `Z − σ`, floored at 1.
pub fn slater_effective_charge(z: u32, n: u32, l: u32, occupied: &[(u32, u32)]) -> f64 {
    let target = slater_group(n, l);
    let same_group = if n == 1 { 0.30 } else { 0.35 };
    let inner_sp = (n.saturating_sub(1)) * 10;
    let mut sigma = 0.0;

    for &(en, el) in occupied {
        let group = slater_group(en, el);
        if group == target {
            sigma += same_group;
        } else if group < target {
            sigma += if l >= 2 {
                1.00
            } else if group >= inner_sp {
                0.85
            } else {
                1.00
            };
        }
    }
    sigma -= same_group;

    (z as f64 - sigma).max(1.0)
}
