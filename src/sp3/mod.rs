//! SP3 precise orbit products: data model, parser and formatter.
use std::path::Path;

use crate::{prelude::Error, reader};

mod formatting;
mod parsing;

pub use formatting::{generate_sp3_content, write_sp3_file};
pub use parsing::parse_sp3_file;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SP3 header
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Revision letter ("a" to "d")
    pub version: String,
    /// "P" (positions) or "V" (positions and velocities)
    pub data_type: String,
    /// First epoch, canonical format
    pub start_epoch: String,
    /// Last epoch encountered, canonical format
    pub end_epoch: String,
    /// Number of epochs declared in the header
    pub number_of_epochs: u32,
    /// Input data descriptor (ORBIT, BRDC..)
    pub data_used: String,
    /// Coordinates system (IGS14, ITRF..)
    pub coordinate_system: String,
    /// Orbit type (FIT, EXT, BCT, BHN, HLM)
    pub orbit_type: String,
    /// Publishing agency
    pub agency: String,
    /// GPS week counter, as written
    pub gps_week: String,
    /// Seconds in GPS week of first epoch
    pub week_seconds: Option<f64>,
    /// Sampling interval (s)
    pub epoch_interval: Option<f64>,
    /// MJD of first epoch, including fractional day
    pub mjd: Option<f64>,
    /// Satellite identifiers, in header order
    pub satellites: Vec<String>,
    /// Declared number of satellites
    pub satellite_count: usize,
    /// Accuracy exponents, one per satellite slot
    pub accuracy: Vec<u32>,
    /// File constellation letter ("G", "M"..)
    pub constellation: String,
    /// File time system ("GPS", "UTC"..)
    pub time_system: String,
    /// Header comments
    pub comments: Vec<String>,
    /// First line, as is
    pub raw_first_line: String,
}

/// One satellite state, at one epoch
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteRecord {
    /// Satellite identifier, like "G01"
    pub id: String,
    /// System name, like "GPS"
    pub system: String,
    /// PRN, as written
    pub prn: String,
    /// Epoch, canonical format
    pub epoch: String,
    /// ECEF coordinates (m)
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Clock offset (ns)
    pub clock: f64,
}

impl SatelliteRecord {
    /// Returns true when one of the fields could not be parsed
    pub fn is_degraded(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.clock.is_nan()
    }
    /// Returns the [SP3Key] of this record
    pub fn key(&self) -> SP3Key<'_> {
        SP3Key {
            satellite: &self.id,
            epoch: &self.epoch,
        }
    }
}

/// Identifies a [SatelliteRecord] uniquely, within one document
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SP3Key<'a> {
    /// Satellite identifier
    pub satellite: &'a str,
    /// Epoch, canonical format
    pub epoch: &'a str,
}

/// Parsed (or generated) SP3 content
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SP3Document {
    pub header: Header,
    /// Epochs, in file order
    pub epochs: Vec<String>,
    /// Records, in file order
    pub records: Vec<SatelliteRecord>,
}

/// Compact description of an [SP3Document]
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    pub satellites: usize,
    pub epochs: usize,
    pub first_epoch: Option<String>,
    pub last_epoch: Option<String>,
    pub gps_week: String,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} satellites, {} epochs ({} - {}), GPS week {}",
            self.satellites,
            self.epochs,
            self.first_epoch.as_deref().unwrap_or("?"),
            self.last_epoch.as_deref().unwrap_or("?"),
            self.gps_week,
        )
    }
}

impl SP3Document {
    /// Parses local SP3 file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = reader::read_file(path)?;
        Ok(parse_sp3_file(&content))
    }
    /// Parses local gzip compressed SP3 file
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = reader::read_gzip_file(path)?;
        Ok(parse_sp3_file(&content))
    }
    /// Number of records that have at least one degraded field
    pub fn degraded_records(&self) -> usize {
        self.records.iter().filter(|r| r.is_degraded()).count()
    }
    /// Returns all records of given satellite, in file order
    pub fn satellite_records<'a>(
        &'a self,
        satellite: &'a str,
    ) -> impl Iterator<Item = &'a SatelliteRecord> + 'a {
        self.records.iter().filter(move |r| r.id == satellite)
    }
    /// Agency, as the last 4 characters of the first line
    pub fn agency_from_first_line(&self) -> String {
        let line = self.header.raw_first_line.trim_end();
        let n = line.chars().count();
        line.chars()
            .skip(n.saturating_sub(4))
            .collect::<String>()
            .trim()
            .to_string()
    }
    /// Returns a [Summary] of this document
    pub fn summary(&self) -> Summary {
        let satellites = if self.header.satellites.is_empty() {
            self.header.satellite_count
        } else {
            self.header.satellites.len()
        };
        Summary {
            satellites,
            epochs: self.epochs.len(),
            first_epoch: self.epochs.first().cloned(),
            last_epoch: self.epochs.last().cloned(),
            gps_week: self.header.gps_week.clone(),
        }
    }
}
