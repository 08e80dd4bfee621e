//! Broadcast ephemeris frame and satellite state determination
use crate::{
    constants::{Constants, SECONDS_PER_WEEK},
    constellation::constellation_from_id,
    epoch::parse_epoch,
    navigation::{
        kepler::{ecef_position, week_crossover, Kepler, Perturbations},
        SatelliteState,
    },
    prelude::{Constellation, Epoch, SV},
    timescale::{gps_week_sow, TimeSystem},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One broadcast navigation message
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ephemeris {
    /// Time of clock, canonical format, in the satellite system time
    pub epoch: String,
    /// Satellite identifier, like "G01"
    pub satellite: String,
    /// SV clock bias (s)
    pub clock_bias: f64,
    /// SV clock drift (s.s⁻¹)
    pub clock_drift: f64,
    /// SV clock drift rate (s.s⁻²)
    pub clock_drift_rate: f64,
    /// Broadcast orbits, in message order (4 per line)
    pub data: Vec<f64>,
}

impl Ephemeris {
    /// Satellite as [SV]
    pub fn sv(&self) -> Option<SV> {
        let constellation = constellation_from_id(&self.satellite)?;
        let prn = self
            .satellite
            .get(1..)?
            .trim()
            .parse::<u8>()
            .ok()?;
        Some(SV::new(constellation, prn))
    }
    /// Time of clock, as [Epoch]. The UTC label carries the system time.
    pub fn toc(&self) -> Option<Epoch> {
        parse_epoch(&self.epoch)
    }
    fn orbit(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied().filter(|v| v.is_finite())
    }
    /// Keplerian parameters. Only applies to GPS, Galileo, BeiDou, QZSS and IRNSS.
    pub fn kepler(&self) -> Option<Kepler> {
        let kepler = Kepler {
            a: self.orbit(7)?.powi(2),
            e: self.orbit(5)?,
            i_0: self.orbit(12)?,
            omega_0: self.orbit(10)?,
            m_0: self.orbit(3)?,
            omega: self.orbit(14)?,
            toe: self.orbit(8)?,
        };
        if kepler.is_valid() {
            Some(kepler)
        } else {
            None
        }
    }
    /// Orbit [Perturbations]
    pub fn perturbations(&self) -> Option<Perturbations> {
        Some(Perturbations {
            crs: self.orbit(1)?,
            dn: self.orbit(2)?,
            cuc: self.orbit(4)?,
            cus: self.orbit(6)?,
            cic: self.orbit(9)?,
            cis: self.orbit(11)?,
            crc: self.orbit(13)?,
            omega_dot: self.orbit(15)?,
            i_dot: self.orbit(16)?,
        })
    }
    /// Seconds from time of clock to `t`, both expressed in GPST
    fn clock_dt(&self, t: Epoch, constellation: Constellation) -> Option<f64> {
        let toc = self.toc()?;
        let dt = t.to_unix_seconds() - toc.to_unix_seconds();
        let dt = match constellation {
            Constellation::BeiDou => dt - Constants::BDT_GPST_OFFSET_SECONDS,
            Constellation::Glonass => dt - Constants::GPST_UTC_LEAP_SECONDS,
            _ => dt,
        };
        Some(week_crossover(dt))
    }
    /// SV clock offset (ns) `dt` seconds after time of clock
    fn clock_offset(&self, dt: f64) -> f64 {
        (self.clock_bias + self.clock_drift * dt + self.clock_drift_rate * dt.powi(2)) * 1.0E9
    }
    /// Satellite position and clock offset at `t` (GPST).
    /// Returns None when this ephemeris cannot be propagated.
    pub fn position_clock(&self, t: Epoch) -> Option<SatelliteState> {
        let sv = self.sv()?;
        match sv.constellation {
            Constellation::Glonass | Constellation::SBAS => self.state_vector_solver(t, sv),
            Constellation::GPS
            | Constellation::Galileo
            | Constellation::BeiDou
            | Constellation::QZSS
            | Constellation::IRNSS => self.kepler_solver(t, sv),
            _ => None,
        }
    }
    fn kepler_solver(&self, t: Epoch, sv: SV) -> Option<SatelliteState> {
        let kepler = self.kepler()?;
        let perturbations = self.perturbations()?;
        if !perturbations.is_valid() {
            return None;
        }

        // seconds of week in satellite system time
        let sow = if sv.constellation == Constellation::BeiDou {
            let elapsed = t.to_unix_seconds()
                - Constants::BDT_GPST_OFFSET_SECONDS
                - TimeSystem::BeiDou.epoch().to_unix_seconds();
            elapsed.rem_euclid(SECONDS_PER_WEEK as f64)
        } else {
            gps_week_sow(t).1
        };

        let t_k = week_crossover(sow - kepler.toe);
        let beidou_geo = sv.constellation == Constellation::BeiDou && (sv.prn <= 5 || sv.prn >= 59);

        let ecef = ecef_position(&kepler, &perturbations, sv.constellation, beidou_geo, t_k)?;
        let dt = self.clock_dt(t, sv.constellation)?;

        Some(SatelliteState {
            x: ecef[0],
            y: ecef[1],
            z: ecef[2],
            clock: self.clock_offset(dt),
        })
    }
    /// Second order extrapolation of the broadcast state vector
    /// (position, velocity, acceleration in km, km/s, km/s²).
    /// Third clock term is the message frame time, not a drift rate.
    fn state_vector_solver(&self, t: Epoch, sv: SV) -> Option<SatelliteState> {
        let dt = self.clock_dt(t, sv.constellation)?;
        let extrapolate = |offset: usize| -> Option<f64> {
            let (p, v, a) = (
                self.orbit(offset)?,
                self.orbit(offset + 1)?,
                self.orbit(offset + 2)?,
            );
            Some((p + v * dt + 0.5 * a * dt.powi(2)) * 1.0E3)
        };
        Some(SatelliteState {
            x: extrapolate(0)?,
            y: extrapolate(4)?,
            z: extrapolate(8)?,
            clock: (self.clock_bias + self.clock_drift * dt) * 1.0E9,
        })
    }
}
