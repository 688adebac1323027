//! Physical constants for the eV / Å / amu / fs / e / K unit system.

use crate::model::types::Vec3;

/// Boltzmann constant in eV/K.
pub const BOLTZMANN: f64 = 8.617_333_262e-5;

/// Converts a force-per-mass in eV/(Å·amu) into an acceleration in Å/fs².
pub const ACCELERATION_FACTOR: f64 = 9.648_533e-3;

/// Highest temperature setpoint accepted, in K.
pub const MAX_TEMPERATURE: f64 = 10_000.0;

/// Kinetic energy in eV of a mass (amu) moving at `velocity` (Å/fs).
#[inline]
pub fn kinetic_energy(mass: f64, velocity: &Vec3) -> f64 {
    0.5 * mass * velocity.norm_squared() / ACCELERATION_FACTOR
}

/// Equipartition temperature of `count` point masses holding `kinetic` eV in total.
#[inline]
pub fn temperature_from_kinetic(kinetic: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    2.0 * kinetic / (3.0 * count as f64 * BOLTZMANN)
}

/// Per-axis speed scale `sqrt(3·kB·T / m)` in Å/fs.
#[inline]
pub fn thermal_speed(temperature: f64, mass: f64) -> f64 {
    if mass <= 0.0 || temperature <= 0.0 {
        return 0.0;
    }
    (3.0 * BOLTZMANN * temperature * ACCELERATION_FACTOR / mass).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn kinetic_energy_conversion() {
        // 1 amu at 1 Å/fs carries about 51.8 eV
        let ke = kinetic_energy(1.0, &Vec3::new(1.0, 0.0, 0.0));
        assert!(approx_eq(ke, 51.8213, 1e-4));
    }

    #[test]
    fn temperature_inverts_equipartition() {
        let kinetic = 1.5 * 4.0 * BOLTZMANN * 300.0;
        assert!(approx_eq(temperature_from_kinetic(kinetic, 4), 300.0, 1e-12));
        assert_eq!(temperature_from_kinetic(1.0, 0), 0.0);
    }

    #[test]
    fn thermal_speed_gives_three_kt_per_axis() {
        let mass = 39.948;
        let v = thermal_speed(300.0, mass);
        let ke = kinetic_energy(mass, &Vec3::new(v, 0.0, 0.0));
        assert!(approx_eq(ke, 1.5 * BOLTZMANN * 300.0, 1e-9));
        assert_eq!(thermal_speed(0.0, mass), 0.0);
        assert_eq!(thermal_speed(300.0, 0.0), 0.0);
    }
}
