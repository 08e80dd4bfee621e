//! SP3 comparison and RMS statistics
use std::collections::HashMap;

use csv::Writer;

use crate::{
    prelude::Error,
    sp3::{SP3Document, SP3Key, SatelliteRecord},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Test minus reference deltas, for one satellite at one epoch
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffRecord {
    pub satellite: String,
    pub system: String,
    pub epoch: String,
    /// Position deltas (m)
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    /// Clock delta (ns)
    pub dclock: f64,
}

/// RMS statistics of one satellite
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RMSRecord {
    pub satellite: String,
    pub system: String,
    /// sqrt(rms_x² + rms_y² + rms_z²) (m)
    pub rms_3d: f64,
    pub rms_x: f64,
    pub rms_y: f64,
    pub rms_z: f64,
    /// (ns)
    pub rms_clock: f64,
}

impl RMSRecord {
    fn new(satellite: &str, system: &str, sum_sq: [f64; 4], n: usize) -> Self {
        let n = n as f64;
        let rms_x = (sum_sq[0] / n).sqrt();
        let rms_y = (sum_sq[1] / n).sqrt();
        let rms_z = (sum_sq[2] / n).sqrt();
        Self {
            satellite: satellite.to_string(),
            system: system.to_string(),
            rms_3d: (rms_x.powi(2) + rms_y.powi(2) + rms_z.powi(2)).sqrt(),
            rms_x,
            rms_y,
            rms_z,
            rms_clock: (sum_sq[3] / n).sqrt(),
        }
    }
}

/// Groups items per satellite, in order of first appearance
fn per_satellite<'a, T>(
    items: &'a [T],
    satellite: impl Fn(&T) -> &str,
) -> Vec<(&'a str, Vec<&'a T>)>
where
    T: 'a,
{
    let mut index = HashMap::<&str, usize>::new();
    let mut groups = Vec::<(&str, Vec<&T>)>::new();
    for item in items.iter() {
        let sat = satellite(item);
        match index.get(sat) {
            Some(pos) => groups[*pos].1.push(item),
            None => {
                index.insert(sat, groups.len());
                groups.push((sat, vec![item]));
            },
        }
    }
    groups
}

/// Case insensitive ordering, ties broken by plain ordering
fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_rms(rms: &mut [RMSRecord]) {
    rms.sort_by(|a, b| {
        natural_cmp(&a.system, &b.system).then_with(|| natural_cmp(&a.satellite, &b.satellite))
    });
}

/// Matches `test` against `reference` per (satellite, epoch) and returns
/// test minus reference deltas. Test records without reference are dropped.
/// When a key appears several times in `reference`, the first record is used.
pub fn compare_sp3_files(test: &SP3Document, reference: &SP3Document) -> Vec<DiffRecord> {
    let mut lookup = HashMap::<SP3Key, &SatelliteRecord>::with_capacity(reference.records.len());
    for record in reference.records.iter() {
        lookup.entry(record.key()).or_insert(record);
    }

    let diffs = test
        .records
        .iter()
        .filter_map(|record| {
            let refd = lookup.get(&record.key())?;
            Some(DiffRecord {
                satellite: record.id.clone(),
                system: record.system.clone(),
                epoch: record.epoch.clone(),
                dx: record.x - refd.x,
                dy: record.y - refd.y,
                dz: record.z - refd.z,
                dclock: record.clock - refd.clock,
            })
        })
        .collect::<Vec<_>>();

    log::debug!(
        "comparison: {}/{} matched records",
        diffs.len(),
        test.records.len()
    );

    diffs
}

/// RMS of the deltas, per satellite, sorted by (system, satellite).
/// One delta is enough to contribute.
pub fn calculate_diff_rms(diffs: &[DiffRecord]) -> Vec<RMSRecord> {
    let mut rms = per_satellite(diffs, |d| d.satellite.as_str())
        .into_iter()
        .map(|(satellite, diffs)| {
            let mut sum_sq = [0.0_f64; 4];
            for d in diffs.iter() {
                sum_sq[0] += d.dx.powi(2);
                sum_sq[1] += d.dy.powi(2);
                sum_sq[2] += d.dz.powi(2);
                sum_sq[3] += d.dclock.powi(2);
            }
            RMSRecord::new(satellite, &diffs[0].system, sum_sq, diffs.len())
        })
        .collect::<Vec<_>>();
    sort_rms(&mut rms);
    rms
}

/// RMS of each satellite around its own mean state, sorted by (system, satellite).
/// Satellites with less than 2 records are excluded.
pub fn calculate_rms(doc: &SP3Document) -> Vec<RMSRecord> {
    let mut rms = per_satellite(&doc.records, |r| r.id.as_str())
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(satellite, records)| {
            let n = records.len() as f64;
            let mut mean = [0.0_f64; 4];
            for r in records.iter() {
                mean[0] += r.x / n;
                mean[1] += r.y / n;
                mean[2] += r.z / n;
                mean[3] += r.clock / n;
            }
            let mut sum_sq = [0.0_f64; 4];
            for r in records.iter() {
                sum_sq[0] += (r.x - mean[0]).powi(2);
                sum_sq[1] += (r.y - mean[1]).powi(2);
                sum_sq[2] += (r.z - mean[2]).powi(2);
                sum_sq[3] += (r.clock - mean[3]).powi(2);
            }
            RMSRecord::new(satellite, &records[0].system, sum_sq, records.len())
        })
        .collect::<Vec<_>>();
    sort_rms(&mut rms);
    rms
}

/// Splits (sorted) RMS records per system, in order of appearance
pub fn group_by_system(rms: &[RMSRecord]) -> Vec<(String, Vec<RMSRecord>)> {
    let mut groups = Vec::<(String, Vec<RMSRecord>)>::new();
    for record in rms.iter() {
        match groups.iter_mut().find(|(system, _)| *system == record.system) {
            Some((_, records)) => records.push(record.clone()),
            None => groups.push((record.system.clone(), vec![record.clone()])),
        }
    }
    groups
}

/// CSV header of the RMS export
pub const RMS_CSV_HEADER: [&str; 7] = [
    "Satellite",
    "System",
    "RMS 3D (m)",
    "RMS X (m)",
    "RMS Y (m)",
    "RMS Z (m)",
    "RMS Clock (ns)",
];

impl RMSRecord {
    /// CSV fields of this record, 6 decimals
    pub fn csv_record(&self) -> [String; 7] {
        [
            self.satellite.clone(),
            self.system.clone(),
            format!("{:.6}", self.rms_3d),
            format!("{:.6}", self.rms_x),
            format!("{:.6}", self.rms_y),
            format!("{:.6}", self.rms_z),
            format!("{:.6}", self.rms_clock),
        ]
    }
}

/// Formats RMS records as CSV, see [RMS_CSV_HEADER] and [RMSRecord::csv_record]
pub fn rms_to_csv(rms: &[RMSRecord]) -> Result<String, Error> {
    let mut w = Writer::from_writer(Vec::new());
    w.write_record(RMS_CSV_HEADER)?;
    for r in rms.iter() {
        w.write_record(r.csv_record())?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| Error::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod test {
    use super::*;
    fn diff(satellite: &str, system: &str, d: f64) -> DiffRecord {
        DiffRecord {
            satellite: satellite.to_string(),
            system: system.to_string(),
            epoch: "2020-01-01 00:00:00.00".to_string(),
            dx: d,
            dy: d,
            dz: d,
            dclock: d,
        }
    }
    #[test]
    fn diff_rms() {
        let diffs = vec![
            diff("G01", "GPS", 3.0),
            diff("G01", "GPS", -3.0),
            diff("E05", "Galileo", 1.0),
        ];
        let rms = calculate_diff_rms(&diffs);
        assert_eq!(rms.len(), 2);
        assert_eq!(rms[0].satellite, "E05");
        assert_eq!(rms[0].rms_x, 1.0);
        assert_eq!(rms[1].satellite, "G01");
        assert_eq!(rms[1].rms_x, 3.0);
        assert_eq!(rms[1].rms_clock, 3.0);
        assert!((rms[1].rms_3d - 27.0_f64.sqrt()).abs() < 1.0E-12);
    }
    #[test]
    fn sorting() {
        let diffs = vec![
            diff("R02", "GLONASS", 1.0),
            diff("G10", "GPS", 1.0),
            diff("G02", "GPS", 1.0),
            diff("C01", "BeiDou", 1.0),
        ];
        let sats = calculate_diff_rms(&diffs)
            .into_iter()
            .map(|r| r.satellite)
            .collect::<Vec<_>>();
        assert_eq!(sats, vec!["C01", "R02", "G02", "G10"]);
    }
    #[test]
    fn system_groups_and_csv() {
        let rms = calculate_diff_rms(&[
            diff("G01", "GPS", 1.0),
            diff("G02", "GPS", 2.0),
            diff("E01", "Galileo", 0.5),
        ]);
        let groups = group_by_system(&rms);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Galileo");
        assert_eq!(groups[1].0, "GPS");
        assert_eq!(groups[1].1.len(), 2);

        let csv = rms_to_csv(&groups[1].1[..1]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Satellite,System,RMS 3D (m),RMS X (m),RMS Y (m),RMS Z (m),RMS Clock (ns)")
        );
        assert_eq!(
            lines.next(),
            Some("G01,GPS,1.732051,1.000000,1.000000,1.000000,1.000000")
        );
        assert_eq!(lines.next(), None);
    }
}
