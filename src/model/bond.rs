use super::types::{BondKind, BondOrder};

/// One directed half of a bond, stored on the atom that owns it.
///
/// Every bond exists as a mirrored pair: the entry on atom `a` pointing at `b` has an
/// identical twin on `b` pointing at `a`. Use [`Bond::mirrored`] to build the twin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Index of the partner atom in the simulation's atom collection.
    pub partner: usize,
    pub kind: BondKind,
    pub order: BondOrder,
    /// Dissociation energy `De` in eV.
    pub strength: f64,
    /// Equilibrium separation `re` in Å.
    pub equilibrium_distance: f64,
    /// Morse width `α` in 1/Å.
    pub morse_alpha: f64,
}

impl Bond {
    /// Creates a bond half with `α = sqrt(stiffness / (2·De))`.
    pub fn new(
        partner: usize,
        kind: BondKind,
        order: BondOrder,
        strength: f64,
        equilibrium_distance: f64,
        stiffness: f64,
    ) -> Self {
        Self {
            partner,
            kind,
            order,
            strength,
            equilibrium_distance,
            morse_alpha: morse_width(strength, stiffness),
        }
    }

    /// The twin entry stored on the partner, pointing back at `owner`.
    pub fn mirrored(&self, owner: usize) -> Self {
        Self {
            partner: owner,
            ..self.clone()
        }
    }

    /// Morse potential `De·(1 − e^{−α(r−re)})²` at separation `r`.
    pub fn morse_energy(&self, r: f64) -> f64 {
        let decay = (-self.morse_alpha * (r - self.equilibrium_distance)).exp();
        self.strength * (1.0 - decay).powi(2)
    }

    /// Radial derivative `dU/dr` of the Morse potential at `r`.
    ///
    /// Positive when stretched (the bond pulls the atoms together), negative when
    /// compressed.
    pub fn morse_derivative(&self, r: f64) -> f64 {
        let decay = (-self.morse_alpha * (r - self.equilibrium_distance)).exp();
        2.0 * self.strength * self.morse_alpha * (1.0 - decay) * decay
    }
}

/// Morse width parameter for a well of depth `strength`.
///
/// Non-positive strengths give a zero width, which makes the potential flat.
pub fn morse_width(strength: f64, stiffness: f64) -> f64 {
    if strength > 0.0 {
        (stiffness / (2.0 * strength)).sqrt()
    } else {
        0.0
    }
}
