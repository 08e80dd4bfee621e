//! SP3 (revision D) formatter. Every line is exactly 60 characters wide.
use std::{
    collections::HashMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{
    constants::{Sp3Format, MJD_UNIX_REF, SECONDS_PER_DAY},
    epoch::{calendar, parse_epoch, parse_unix_seconds},
    prelude::{Epoch, Error},
    sp3::{SP3Document, SatelliteRecord},
    timescale::{gps_week_sow, TimeSystem},
};

const DESCRIPTORS: [&str; 5] = [
    "%c cc cc ccc ccc cccc cccc cccc cccc ccccc ccccc ccccc ccccc",
    "%f  1.2500000  1.025000000  0.00000000000  0.000000000000000",
    "%f  0.0000000  0.000000000  0.00000000000  0.000000000000000",
    "%i    0    0    0    0      0      0      0      0         0",
    "%i    0    0    0    0      0      0      0      0         0",
];

const COMMENTS: [&str; 5] = [
    "/* CONVERTED FROM BROADCAST EPHEMERIS",
    "/* BROADCAST EPHEMERIS USED AS SOURCE FOR ORBIT/CLOCK DATA",
    "/* GENERATED USING GNSS TOOLS",
    "/* ACCURACY OF ORBIT/CLOCK DATA IS LIMITED BY BROADCAST DATA",
    "/* ORBIT INTERPOLATION IS NOT RECOMMENDED",
];

/// Truncates content to at most `width` characters
fn truncate(content: &str, width: usize) -> &str {
    match content.char_indices().nth(width) {
        Some((offset, _)) => &content[..offset],
        None => content,
    }
}

/// Appends a line, truncated or padded to [Sp3Format::LINE_WIDTH]
fn push_line(content: &mut String, line: &str) {
    let line = truncate(line, Sp3Format::LINE_WIDTH);
    content.push_str(&format!("{:<width$}\n", line, width = Sp3Format::LINE_WIDTH));
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value.trim()
    }
}

/// Epochs in file order, completed with the ones only found in the records
fn ordered_epochs(doc: &SP3Document) -> Vec<&str> {
    doc.epochs
        .iter()
        .map(String::as_str)
        .chain(doc.records.iter().map(|r| r.epoch.as_str()))
        .filter(|epoch| !epoch.is_empty())
        .unique()
        .collect()
}

/// Sampling interval deduced from the first two epochs
fn epoch_interval(epochs: &[&str]) -> f64 {
    let interval = match (epochs.first(), epochs.get(1)) {
        (Some(first), Some(second)) => {
            match (parse_unix_seconds(first), parse_unix_seconds(second)) {
                (Some(t0), Some(t1)) => (t1 - t0).round(),
                _ => f64::NAN,
            }
        },
        _ => f64::NAN,
    };
    if interval.is_finite() && interval > 0.0 {
        interval
    } else {
        Sp3Format::DEFAULT_INTERVAL_SECONDS
    }
}

/// Constellation letter of the satellite table, "M" when mixed
fn constellation_letter(satellites: &[String]) -> String {
    let letters = satellites
        .iter()
        .filter_map(|sat| sat.chars().next())
        .unique()
        .collect::<Vec<_>>();
    match letters.as_slice() {
        [letter] => letter.to_string(),
        _ => "M".to_string(),
    }
}

fn format_header(doc: &SP3Document, epochs: &[&str], content: &mut String) {
    let header = &doc.header;

    let start = parse_epoch(&header.start_epoch)
        .or_else(|| epochs.first().and_then(|epoch| parse_epoch(epoch)))
        .unwrap_or_else(|| TimeSystem::GPS.epoch());

    let (y, m, d, hh, mm, ss) = calendar(start);

    push_line(
        content,
        &format!(
            "#dP{:4} {:>2} {:>2} {:>2} {:>2} {:>11.8} {:>7} {:>5} {:>5} {:>3} {:>4}",
            y,
            m,
            d,
            hh,
            mm,
            ss,
            header.number_of_epochs,
            truncate(or_default(&header.data_used, "ORBIT"), 5),
            truncate(or_default(&header.coordinate_system, "IGS14"), 5),
            truncate(or_default(&header.orbit_type, "FIT"), 3),
            truncate(or_default(&header.agency, "GNSS"), 4),
        ),
    );

    let (week, sow) = gps_week_sow(start);
    let mjd = start.to_unix_seconds() / SECONDS_PER_DAY as f64 + MJD_UNIX_REF;
    let mjd_day = mjd.floor();

    push_line(
        content,
        &format!(
            "## {:4} {:15.8} {:14.8} {:5} {:15.13}",
            week,
            sow,
            epoch_interval(epochs),
            mjd_day as i64,
            mjd - mjd_day,
        ),
    );

    format_satellites(doc, content);

    push_line(
        content,
        &format!(
            "%c {:<2} cc {:<3} ccc cccc cccc cccc cccc ccccc ccccc ccccc ccccc",
            constellation_letter(&header.satellites),
            truncate(or_default(&header.time_system, "GPS"), 3),
        ),
    );

    for line in DESCRIPTORS.iter().chain(COMMENTS.iter()) {
        push_line(content, line);
    }
}

/// Satellite table: "+" lines, then "++" accuracy lines, 10 lines at most
/// unless the table itself requires more.
fn format_satellites(doc: &SP3Document, content: &mut String) {
    let satellites = &doc.header.satellites;
    let nb_sat = satellites.len();
    let plus_lines = std::cmp::max(
        1,
        (nb_sat + Sp3Format::SATS_PER_LINE - 1) / Sp3Format::SATS_PER_LINE,
    );
    let accuracy_lines = Sp3Format::MAX_SAT_LINES.saturating_sub(plus_lines);

    for line in 0..plus_lines {
        let mut descriptor = if line == 0 {
            format!("+  {:>3}   ", nb_sat)
        } else {
            "+        ".to_string()
        };
        for slot in 0..Sp3Format::SATS_PER_LINE {
            match satellites.get(line * Sp3Format::SATS_PER_LINE + slot) {
                Some(sat) => descriptor.push_str(&format!("{:>3}", truncate(sat, 3))),
                None => descriptor.push_str("  0"),
            }
        }
        push_line(content, &descriptor);
    }

    for line in 0..accuracy_lines {
        let mut descriptor = "++       ".to_string();
        for slot in 0..Sp3Format::SATS_PER_LINE {
            let index = line * Sp3Format::SATS_PER_LINE + slot;
            if index < nb_sat {
                let accuracy = doc
                    .header
                    .accuracy
                    .get(index)
                    .copied()
                    .filter(|acc| *acc > 0 && *acc < 1000)
                    .unwrap_or(Sp3Format::DEFAULT_ACCURACY);
                descriptor.push_str(&format!("{:>3}", accuracy));
            } else {
                descriptor.push_str("  0");
            }
        }
        push_line(content, &descriptor);
    }
}

fn format_epoch(t: Epoch) -> String {
    let (y, m, d, hh, mm, ss) = calendar(t);
    format!(
        "*  {:4} {:>2} {:>2} {:>2} {:>2} {:>11.8}",
        y, m, d, hh, mm, ss
    )
}

fn format_position(record: &SatelliteRecord) -> String {
    format!(
        "P{:>3}{:14.6}{:14.6}{:14.6}{:14.6}",
        truncate(&record.id, 3),
        record.x / 1000.0,
        record.y / 1000.0,
        record.z / 1000.0,
        record.clock / 1000.0,
    )
}

/// Formats [SP3Document] as SP3 text.
/// Positions are written in km and clock offsets in µs.
/// Records are grouped per epoch, in epoch order.
pub fn generate_sp3_content(doc: &SP3Document) -> String {
    let epochs = ordered_epochs(doc);
    let mut content = String::new();

    format_header(doc, &epochs, &mut content);

    let mut per_epoch = HashMap::<&str, Vec<&SatelliteRecord>>::new();
    for record in doc.records.iter() {
        per_epoch
            .entry(record.epoch.as_str())
            .or_default()
            .push(record);
    }

    for epoch in epochs.iter() {
        let t = match parse_epoch(epoch) {
            Some(t) => t,
            None => {
                log::warn!("sp3 formatting: skipping invalid epoch \"{}\"", epoch);
                continue;
            },
        };
        push_line(&mut content, &format_epoch(t));
        if let Some(records) = per_epoch.get(epoch) {
            for record in records {
                push_line(&mut content, &format_position(record));
            }
        }
    }

    content.push_str("EOF\n");
    content
}

/// Formats and writes [SP3Document] to local file
pub fn write_sp3_file(doc: &SP3Document, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let mut fd = BufWriter::new(File::create(path)?);
    fd.write_all(generate_sp3_content(doc).as_bytes())?;
    fd.flush()?;
    log::debug!("sp3 file \"{}\" generated", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn line_padding() {
        let mut content = String::new();
        push_line(&mut content, "EP");
        push_line(&mut content, &"x".repeat(75));
        for line in content.lines() {
            assert_eq!(line.len(), 60);
        }
        assert_eq!(truncate("G01234", 3), "G01");
        assert_eq!(truncate("G1", 3), "G1");
    }
    #[test]
    fn epoch_line() {
        let t = Epoch::from_gregorian_utc(2019, 10, 27, 1, 15, 30, 0);
        assert_eq!(format_epoch(t), "*  2019 10 27  1 15 30.00000000");
    }
    #[test]
    fn rounded_minute_epoch() {
        let record = SatelliteRecord {
            id: "G01".to_string(),
            epoch: "2020-06-25 00:14:60.00".to_string(),
            x: 1.0E7,
            ..Default::default()
        };
        let doc = SP3Document {
            epochs: vec![record.epoch.clone()],
            records: vec![record],
            ..Default::default()
        };
        let content = generate_sp3_content(&doc);
        let lines = content.lines().collect::<Vec<_>>();
        let epoch = lines
            .iter()
            .position(|line| line.starts_with('*'))
            .expect("missing epoch line");
        assert_eq!(lines[epoch].trim_end(), "*  2020  6 25  0 15  0.00000000");
        assert!(lines[epoch + 1].starts_with("PG01  10000.000000"));
    }
    #[test]
    fn position_line() {
        let record = SatelliteRecord {
            id: "G01".to_string(),
            x: -22_335_782.004,
            y: -14_656_280.389,
            z: -1_218_238.499,
            clock: -176_397.152,
            ..Default::default()
        };
        assert_eq!(
            format_position(&record),
            "PG01 -22335.782004 -14656.280389  -1218.238499   -176.397152"
        );
    }
    #[test]
    fn interval_deduction() {
        assert_eq!(
            epoch_interval(&["2020-01-01 00:00:00.00", "2020-01-01 00:05:00.00"]),
            300.0
        );
        assert_eq!(epoch_interval(&["2020-01-01 00:00:00.00"]), 900.0);
        assert_eq!(epoch_interval(&["2020-01-01 00:00:00.00", "invalid"]), 900.0);
    }
    #[test]
    fn constellation_letters() {
        let gps = vec!["G01".to_string(), "G02".to_string()];
        assert_eq!(constellation_letter(&gps), "G");
        let mixed = vec!["G01".to_string(), "R02".to_string()];
        assert_eq!(constellation_letter(&mixed), "M");
        assert_eq!(constellation_letter(&[]), "M");
    }
}
