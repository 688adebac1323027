use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cartesian vector in ångströms (positions), Å/fs (velocities) or eV/Å (forces).
pub type Vec3 = nalgebra::Vector3<f64>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond kind string: '{0}'")]
pub struct ParseBondKindError(String);

/// Chemical character of a bond.
///
/// Only [`Ionic`](BondKind::Ionic) and [`Covalent`](BondKind::Covalent) bonds are
/// produced by the bonding engine; the remaining kinds exist so that consumers can
/// classify bonds coming from other sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondKind {
    Ionic,
    Covalent,
    Metallic,
    Hydrogen,
    VanDerWaals,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondKind::Ionic => write!(f, "ionic"),
            BondKind::Covalent => write!(f, "covalent"),
            BondKind::Metallic => write!(f, "metallic"),
            BondKind::Hydrogen => write!(f, "hydrogen"),
            BondKind::VanDerWaals => write!(f, "van der Waals"),
        }
    }
}

impl FromStr for BondKind {
    type Err = ParseBondKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ionic" => Ok(BondKind::Ionic),
            "covalent" => Ok(BondKind::Covalent),
            "metallic" => Ok(BondKind::Metallic),
            "hydrogen" | "h-bond" => Ok(BondKind::Hydrogen),
            "vdw" | "van der waals" | "van-der-waals" => Ok(BondKind::VanDerWaals),
            _ => Err(ParseBondKindError(s.to_string())),
        }
    }
}

/// Integer bond order, single through triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Number of electron pairs shared by the bond.
    pub fn value(&self) -> u32 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    /// Maps a shared-pair count onto an order, capping at triple.
    ///
    /// Returns `None` for zero.
    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            _ => Some(BondOrder::Triple),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(BondOrder::Single),
            "double" | "2" => Ok(BondOrder::Double),
            "triple" | "3" => Ok(BondOrder::Triple),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}
