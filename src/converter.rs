//! Broadcast ephemeris to SP3 conversion
use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    constants::{Sp3Format, MJD_UNIX_REF, RECOMMENDED_INTERVAL_SECONDS, SECONDS_PER_DAY},
    constellation::system_name,
    epoch::{epoch_to_string, parse_unix_seconds},
    navigation::{Ephemeris, RinexNavigationDocument},
    prelude::{Epoch, Error},
    sp3::{Header, SP3Document, SatelliteRecord},
    timescale::gps_week_sow,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broadcast to SP3 conversion settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConverterOptions {
    /// Sampling interval (s)
    pub interval: f64,
    /// Agency written in the SP3 header
    pub agency: String,
    /// Coordinates system written in the SP3 header
    pub coordinate_system: String,
    /// Orbit type written in the SP3 header
    pub orbit_type: String,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            interval: Sp3Format::DEFAULT_INTERVAL_SECONDS,
            agency: "GNSS".to_string(),
            coordinate_system: "IGS14".to_string(),
            orbit_type: "FIT".to_string(),
        }
    }
}

impl ConverterOptions {
    /// Copies and returns [Self] with given sampling interval (s)
    pub fn with_interval(&self, interval: f64) -> Self {
        let mut s = self.clone();
        s.interval = interval;
        s
    }
    /// Copies and returns [Self] with given agency
    pub fn with_agency(&self, agency: &str) -> Self {
        let mut s = self.clone();
        s.agency = agency.to_string();
        s
    }
    /// Copies and returns [Self] with given coordinates system
    pub fn with_coordinate_system(&self, system: &str) -> Self {
        let mut s = self.clone();
        s.coordinate_system = system.to_string();
        s
    }
    /// Copies and returns [Self] with given orbit type
    pub fn with_orbit_type(&self, orbit_type: &str) -> Self {
        let mut s = self.clone();
        s.orbit_type = orbit_type.to_string();
        s
    }
    /// Verifies these options may be used
    pub fn validate(&self) -> Result<(), Error> {
        if self.interval.is_finite() && self.interval > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidInterval(self.interval))
        }
    }
    /// Returns true if the sampling interval lies within the recommended range
    pub fn is_recommended_interval(&self) -> bool {
        let (min, max) = RECOMMENDED_INTERVAL_SECONDS;
        self.interval >= min && self.interval <= max
    }
    fn header(&self) -> Header {
        Header {
            version: "d".to_string(),
            data_type: "P".to_string(),
            data_used: "BRDC".to_string(),
            coordinate_system: self.coordinate_system.clone(),
            orbit_type: self.orbit_type.clone(),
            agency: self.agency.clone(),
            time_system: "GPS".to_string(),
            ..Default::default()
        }
    }
}

/// Converts broadcast ephemerides to SP3, sampled every `interval` seconds
/// from the first ephemeris onwards. See [convert_with_options].
pub fn convert_broadcast_to_sp3(doc: &RinexNavigationDocument, interval: f64) -> SP3Document {
    convert_with_options(doc, &ConverterOptions::default().with_interval(interval))
}

/// Same as [convert_with_options], but reports invalid options,
/// missing ephemerides and oversampling as [Error]s.
pub fn try_convert(
    doc: &RinexNavigationDocument,
    options: &ConverterOptions,
) -> Result<SP3Document, Error> {
    options.validate()?;
    if doc.is_empty() {
        return Err(Error::NoEphemeris);
    }
    if let Some((t0, t1)) = time_span(doc) {
        epoch_count(t0, t1, options.interval)?;
    }
    Ok(convert_with_options(doc, options))
}

/// First and last time of clock (unix seconds)
fn time_span(doc: &RinexNavigationDocument) -> Option<(f64, f64)> {
    let first = doc.ephemerides.first()?;
    let last = doc.ephemerides.last()?;
    Some((
        parse_unix_seconds(&first.epoch)?,
        parse_unix_seconds(&last.epoch)?,
    ))
}

/// Number of epochs sampled every `interval` over [t0, t1]
fn epoch_count(t0: f64, t1: f64, interval: f64) -> Result<u32, Error> {
    let count = ((t1 - t0) / interval).floor() + 1.0;
    if !count.is_finite() || count <= 0.0 {
        Ok(0)
    } else if count > Sp3Format::MAX_EPOCHS as f64 {
        Err(Error::TooManyEpochs(count as u64))
    } else {
        Ok(count as u32)
    }
}

/// Converts broadcast ephemerides to SP3.
/// Each satellite state is computed from the ephemeris closest in time.
/// Satellites that cannot be resolved at a given epoch are omitted.
/// An empty document is returned when the options are invalid
/// or `doc` does not contain any ephemeris.
pub fn convert_with_options(
    doc: &RinexNavigationDocument,
    options: &ConverterOptions,
) -> SP3Document {
    let mut sp3 = SP3Document {
        header: options.header(),
        ..Default::default()
    };

    if let Err(e) = options.validate() {
        log::warn!("broadcast conversion: {}", e);
        return sp3;
    }
    if !options.is_recommended_interval() {
        log::warn!(
            "broadcast conversion: {}s interval is outside of recommended range",
            options.interval
        );
    }

    if doc.is_empty() {
        log::warn!("broadcast conversion: no ephemeris data found");
        return sp3;
    }

    let (t0, t1) = match time_span(doc) {
        Some(span) => span,
        None => {
            log::warn!("broadcast conversion: invalid ephemeris epoch");
            return sp3;
        },
    };

    let satellites = doc
        .ephemerides
        .iter()
        .map(|eph| eph.satellite.clone())
        .unique()
        .collect::<Vec<_>>();

    // candidate ephemerides, per satellite, in file order
    let mut candidates = HashMap::<&str, Vec<(f64, &Ephemeris)>>::new();
    for eph in doc.ephemerides.iter() {
        if let Some(toc) = parse_unix_seconds(&eph.epoch) {
            candidates
                .entry(eph.satellite.as_str())
                .or_default()
                .push((toc, eph));
        }
    }

    let nb_epochs = match epoch_count(t0, t1, options.interval) {
        Ok(count) => count,
        Err(e) => {
            log::warn!(
                "broadcast conversion: {}, truncated to {} epochs",
                e,
                Sp3Format::MAX_EPOCHS
            );
            Sp3Format::MAX_EPOCHS
        },
    };

    for i in 0..nb_epochs {
        let t_unix = t0 + i as f64 * options.interval;
        let t = Epoch::from_unix_seconds(t_unix);
        let epoch = epoch_to_string(t);

        for satellite in satellites.iter() {
            let closest = candidates.get(satellite.as_str()).and_then(|candidates| {
                candidates
                    .iter()
                    .min_by(|(a, _), (b, _)| (a - t_unix).abs().total_cmp(&(b - t_unix).abs()))
            });
            let state = match closest.and_then(|(_, eph)| eph.position_clock(t)) {
                Some(state) => state,
                None => {
                    log::debug!("{}({}): no satellite state", epoch, satellite);
                    continue;
                },
            };
            sp3.records.push(SatelliteRecord {
                id: satellite.clone(),
                system: system_name(satellite),
                prn: satellite.chars().skip(1).collect(),
                epoch: epoch.clone(),
                x: state.x,
                y: state.y,
                z: state.z,
                clock: state.clock,
            });
        }

        sp3.epochs.push(epoch);
    }

    let start = Epoch::from_unix_seconds(t0);
    let (week, sow) = gps_week_sow(start);

    let header = &mut sp3.header;
    header.start_epoch = epoch_to_string(start);
    header.end_epoch = sp3.epochs.last().cloned().unwrap_or_default();
    header.number_of_epochs = nb_epochs;
    header.gps_week = week.to_string();
    header.week_seconds = Some(sow);
    header.epoch_interval = Some(options.interval);
    header.mjd = Some(t0 / SECONDS_PER_DAY as f64 + MJD_UNIX_REF);
    header.constellation = match satellites
        .iter()
        .filter_map(|sat| sat.chars().next())
        .unique()
        .exactly_one()
    {
        Ok(letter) => letter.to_string(),
        Err(_) => "M".to_string(),
    };
    header.satellite_count = satellites.len();
    header.accuracy = vec![Sp3Format::DEFAULT_ACCURACY; satellites.len()];
    header.satellites = satellites;

    log::debug!(
        "broadcast conversion: {} epochs, {} records",
        sp3.epochs.len(),
        sp3.records.len()
    );

    sp3
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn default_options() {
        let options = ConverterOptions::default();
        assert_eq!(options.interval, 900.0);
        assert_eq!(options.agency, "GNSS");
        assert_eq!(options.coordinate_system, "IGS14");
        assert_eq!(options.orbit_type, "FIT");
        assert!(options.validate().is_ok());
        assert!(options.is_recommended_interval());
    }
    #[test]
    fn interval_validation() {
        for (interval, valid, recommended) in [
            (30.0, true, false),
            (60.0, true, true),
            (3600.0, true, true),
            (7200.0, true, false),
            (0.0, false, false),
            (-900.0, false, false),
            (f64::NAN, false, false),
            (f64::INFINITY, false, false),
        ] {
            let options = ConverterOptions::default().with_interval(interval);
            assert_eq!(options.validate().is_ok(), valid, "interval={}", interval);
            assert_eq!(
                options.is_recommended_interval(),
                recommended,
                "interval={}",
                interval
            );
        }
    }
    #[test]
    fn empty_document() {
        let doc = RinexNavigationDocument::default();
        let sp3 = convert_broadcast_to_sp3(&doc, 900.0);
        assert!(sp3.epochs.is_empty());
        assert!(sp3.records.is_empty());
        assert_eq!(sp3.header.version, "d");
        assert!(matches!(
            try_convert(&doc, &ConverterOptions::default()),
            Err(Error::NoEphemeris)
        ));
        assert!(matches!(
            try_convert(&doc, &ConverterOptions::default().with_interval(0.0)),
            Err(Error::InvalidInterval(_))
        ));
    }
    #[test]
    fn sp3_epoch_capacity() {
        assert_eq!(epoch_count(0.0, 7200.0, 900.0).unwrap(), 9);
        assert_eq!(epoch_count(0.0, 7200.0, 2700.0).unwrap(), 3);
        assert_eq!(epoch_count(0.0, 0.0, 900.0).unwrap(), 1);
        assert_eq!(epoch_count(7200.0, 0.0, 900.0).unwrap(), 0);
        assert_eq!(
            epoch_count(0.0, 9_999_998.0, 1.0).unwrap(),
            Sp3Format::MAX_EPOCHS
        );
        assert!(matches!(
            epoch_count(0.0, 9_999_999.0, 1.0),
            Err(Error::TooManyEpochs(10_000_000))
        ));
        assert!(matches!(
            epoch_count(0.0, 86_400.0, 1.0E-3),
            Err(Error::TooManyEpochs(_))
        ));
    }
}
