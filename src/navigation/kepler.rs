//! Keplerian orbit determination from broadcast parameters
use nalgebra::{Rotation3, Vector3};

use crate::{constants::Constants, prelude::Constellation};

/// [Kepler] stores all keplerian parameters
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Kepler {
    /// semi major axis (m)
    pub a: f64,
    /// Eccentricity (n.a)
    pub e: f64,
    /// Inclination angle at reference time (rad)
    pub i_0: f64,
    /// Longitude of ascending node at reference time (rad)
    pub omega_0: f64,
    /// Mean anomaly at reference time (rad)
    pub m_0: f64,
    /// argument of perigee (rad)
    pub omega: f64,
    /// Time of ephemeris, in seconds of week
    pub toe: f64,
}

/// Orbit [Perturbations]
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Perturbations {
    /// Mean motion difference from computed value [rad.s⁻¹]
    pub dn: f64,
    /// Inclination rate of change [rad.s⁻¹]
    pub i_dot: f64,
    /// Right ascension rate of change [rad.s⁻¹]
    pub omega_dot: f64,
    /// Amplitude of sine harmonic correction term of the argument
    /// of latitude [rad]
    pub cus: f64,
    /// Amplitude of cosine harmonic correction term of the argument
    /// of latitude [rad]
    pub cuc: f64,
    /// Amplitude of sine harmonic correction term of the angle of inclination [rad]
    pub cis: f64,
    /// Amplitude of cosine harmonic correction term of the angle of inclination [rad]
    pub cic: f64,
    /// Amplitude of sine harmonic correction term of the orbit radius [m]
    pub crs: f64,
    /// Amplitude of cosine harmonic correction term of the orbit radius [m]
    pub crc: f64,
}

impl Kepler {
    pub(crate) fn is_valid(&self) -> bool {
        [
            self.a,
            self.e,
            self.i_0,
            self.omega_0,
            self.m_0,
            self.omega,
            self.toe,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.a > 0.0
            && (0.0..1.0).contains(&self.e)
    }
}

impl Perturbations {
    pub(crate) fn is_valid(&self) -> bool {
        [
            self.dn,
            self.i_dot,
            self.omega_dot,
            self.cus,
            self.cuc,
            self.cis,
            self.cic,
            self.crs,
            self.crc,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Wraps time difference into [-half week; +half week]
pub(crate) fn week_crossover(t_k: f64) -> f64 {
    if t_k > Constants::HALF_WEEK_SECONDS {
        t_k - 2.0 * Constants::HALF_WEEK_SECONDS
    } else if t_k < -Constants::HALF_WEEK_SECONDS {
        t_k + 2.0 * Constants::HALF_WEEK_SECONDS
    } else {
        t_k
    }
}

/// Solves Kepler's equation M = E - e sin(E) iteratively.
/// Returns None when the iteration does not converge.
pub(crate) fn eccentric_anomaly(m_k: f64, e: f64) -> Option<f64> {
    let mut e_k = m_k;
    for _ in 0..Constants::MAX_KEPLER_ITER {
        let next = m_k + e * e_k.sin();
        if (next - e_k).abs() < Constants::KEPLER_TOLERANCE {
            return Some(next);
        }
        e_k = next;
    }
    None
}

/// ECEF position (m) at `t_k` seconds from time of ephemeris.
/// `beidou_geo` selects the BeiDou GEO specific frame rotation.
pub(crate) fn ecef_position(
    kepler: &Kepler,
    perturbations: &Perturbations,
    constellation: Constellation,
    beidou_geo: bool,
    t_k: f64,
) -> Option<Vector3<f64>> {
    let gm = Constants::gm(constellation);
    let omega_e = Constants::omega(constellation);

    let n0 = (gm / kepler.a.powi(3)).sqrt(); // average angular velocity
    let n = n0 + perturbations.dn; // corrected mean angular velocity
    let m_k = kepler.m_0 + n * t_k; // average anomaly

    let e_k = match eccentric_anomaly(m_k, kepler.e) {
        Some(e_k) => e_k,
        None => {
            log::error!("kepler iteration overflow (M={}, e={})", m_k, kepler.e);
            return None;
        },
    };

    // true anomaly
    let (sin_e_k, cos_e_k) = e_k.sin_cos();
    let v_k = ((1.0 - kepler.e.powi(2)).sqrt() * sin_e_k).atan2(cos_e_k - kepler.e);

    let phi_k = v_k + kepler.omega; // latitude argument
    let (x2_sin_phi_k, x2_cos_phi_k) = (2.0 * phi_k).sin_cos();

    // latitude argument correction
    let du_k = perturbations.cus * x2_sin_phi_k + perturbations.cuc * x2_cos_phi_k;
    let u_k = phi_k + du_k;

    // orbital radius correction
    let dr_k = perturbations.crs * x2_sin_phi_k + perturbations.crc * x2_cos_phi_k;
    let r_k = kepler.a * (1.0 - kepler.e * cos_e_k) + dr_k;

    // inclination angle correction
    let di_k = perturbations.cis * x2_sin_phi_k + perturbations.cic * x2_cos_phi_k;
    let i_k = kepler.i_0 + di_k + perturbations.i_dot * t_k;

    // position in orbital plane
    let orbit_xyz = Vector3::new(r_k * u_k.cos(), r_k * u_k.sin(), 0.0);

    // ascending node longitude
    let omega_k = if beidou_geo {
        kepler.omega_0 + perturbations.omega_dot * t_k - omega_e * kepler.toe
    } else {
        kepler.omega_0 + (perturbations.omega_dot - omega_e) * t_k - omega_e * kepler.toe
    };

    // positive angles mean counterclockwise rotation
    let rotation_x = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
    let rotation_z = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
    let ecef = rotation_z * rotation_x * orbit_xyz;

    if beidou_geo {
        let geo_x = Rotation3::from_axis_angle(&Vector3::x_axis(), 5.0_f64.to_radians());
        let geo_z = Rotation3::from_axis_angle(&Vector3::z_axis(), -omega_e * t_k);
        Some(geo_z * geo_x * ecef)
    } else {
        Some(ecef)
    }
}
