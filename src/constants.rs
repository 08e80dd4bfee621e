//! Physical and format constants

use crate::prelude::Constellation;

/// Earth gravitational constant (m³.s⁻²) as used by each system ICD
pub(crate) struct GM;

impl GM {
    pub const GPS: f64 = 3.986005E14;
    pub const BDS: f64 = 3.986004418E14;
    pub const GLO: f64 = 3.9860044E14;
    pub const GAL: f64 = 3.986004418E14;
}

/// Earth rotation rate (rad.s⁻¹)
pub(crate) struct Omega;

impl Omega {
    pub const GPS: f64 = 7.2921151467E-5;
    pub const BDS: f64 = 7.292115E-5;
    pub const GLO: f64 = 7.292115E-5;
    pub const GAL: f64 = 7.2921151467E-5;
}

/// Const values used by the orbit solver
pub(crate) struct Constants;

impl Constants {
    /// Maximal iteration in the iterative Kepler solver
    pub const MAX_KEPLER_ITER: u8 = 30;

    /// Eccentric anomaly convergence criteria (rad)
    pub const KEPLER_TOLERANCE: f64 = 1.0E-12;

    /// Half a week: GPS week crossover threshold
    pub const HALF_WEEK_SECONDS: f64 = 302_400.0;

    /// BDT lags GPST by this amount of seconds
    pub const BDT_GPST_OFFSET_SECONDS: f64 = 14.0;

    /// UTC lags GPST by this amount of seconds
    pub const GPST_UTC_LEAP_SECONDS: f64 = 18.0;

    /// Earth gravitation.
    pub const fn gm(constellation: Constellation) -> f64 {
        match constellation {
            Constellation::BeiDou => GM::BDS,
            Constellation::Galileo => GM::GAL,
            Constellation::Glonass => GM::GLO,
            _ => GM::GPS,
        }
    }

    /// Earth rotation rate
    pub const fn omega(constellation: Constellation) -> f64 {
        match constellation {
            Constellation::BeiDou => Omega::BDS,
            Constellation::Galileo => Omega::GAL,
            Constellation::Glonass => Omega::GLO,
            _ => Omega::GPS,
        }
    }
}

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// MJD of 1970-01-01 (unix reference)
pub(crate) const MJD_UNIX_REF: f64 = 40_587.0;

/// SP3 fixed column layout
pub(crate) struct Sp3Format;

impl Sp3Format {
    /// Every SP3 line is exactly this wide
    pub const LINE_WIDTH: usize = 60;

    /// Satellite identifiers per "+" line
    pub const SATS_PER_LINE: usize = 17;

    /// "+" and "++" lines share this many lines
    pub const MAX_SAT_LINES: usize = 10;

    /// Satellite table starts at this column
    pub const SAT_TABLE_OFFSET: usize = 9;

    /// Width of one satellite slot
    pub const SAT_SLOT_WIDTH: usize = 3;

    /// Width of one P record field
    pub const FIELD_WIDTH: usize = 14;

    /// Fallback epoch interval (s)
    pub const DEFAULT_INTERVAL_SECONDS: f64 = 900.0;

    /// Default accuracy exponent written in "++" lines
    pub const DEFAULT_ACCURACY: u32 = 5;

    /// Largest epoch count line 1 can describe (7 digits)
    pub const MAX_EPOCHS: u32 = 9_999_999;
}

/// Recommended conversion sampling range (s)
pub(crate) const RECOMMENDED_INTERVAL_SECONDS: (f64, f64) = (60.0, 3600.0);
