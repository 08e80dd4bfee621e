//! RINEX broadcast navigation: data model, parser and orbit propagation.
use std::path::Path;

use crate::{prelude::Error, reader};

mod ephemeris;
mod kepler;
mod parsing;

pub use ephemeris::Ephemeris;
pub use kepler::{Kepler, Perturbations};
pub use parsing::parse_rinex_nav;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RINEX navigation header
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavHeader {
    /// Revision, like "3.04"
    pub version: String,
    /// File type letter ("N")
    pub file_type: String,
    /// Satellite system letter ("G", "M"..)
    pub satellite_system: String,
    /// Program that generated this file
    pub program: String,
    /// Agency that ran the program
    pub agency: String,
    /// File creation date, as written
    pub date: String,
    /// Leap seconds, 0 when not specified
    pub leap_seconds: i32,
}

impl NavHeader {
    /// Major revision number, 0 when unknown
    pub fn version_major(&self) -> u8 {
        self.version
            .trim()
            .split('.')
            .next()
            .and_then(|major| major.parse::<u8>().ok())
            .unwrap_or(0)
    }
}

/// Parsed RINEX navigation content
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RinexNavigationDocument {
    pub header: NavHeader,
    /// Ephemerides, in file order
    pub ephemerides: Vec<Ephemeris>,
}

impl RinexNavigationDocument {
    /// Parses local RINEX navigation file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = reader::read_file(path)?;
        Ok(parse_rinex_nav(&content))
    }
    /// Parses local gzip compressed RINEX navigation file
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = reader::read_gzip_file(path)?;
        Ok(parse_rinex_nav(&content))
    }
    /// Returns true if no ephemeris was found
    pub fn is_empty(&self) -> bool {
        self.ephemerides.is_empty()
    }
}

/// Satellite position (ECEF, m) and clock offset (ns) at a given instant
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub clock: f64,
}
