//! SP3 text parser. Parsing never fails: malformed fields degrade to NaN
//! or to default values, so partial content is always returned.
use crate::{
    constants::Sp3Format,
    constellation::system_name,
    epoch::format_epoch_fields,
    reader::column,
    sp3::{Header, SP3Document, SatelliteRecord},
};

fn is_comment(line: &str) -> bool {
    line.starts_with("/*")
}

fn is_end_of_file(line: &str) -> bool {
    line.trim_end().eq("EOF")
}

fn is_header_line1(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > 2 && bytes[0] == b'#' && matches!(bytes[1], b'a'..=b'd')
}

fn is_satellite_line(line: &str) -> bool {
    line.starts_with('+') && !line.starts_with("++")
}

fn is_new_epoch(line: &str) -> bool {
    line.starts_with('*')
}

fn is_position_entry(line: &str) -> bool {
    line.starts_with('P')
}

/// Parses a km (or µs) field and scales it to m (or ns)
fn scaled_field(line: &str, start: usize) -> f64 {
    column(line, start, start + Sp3Format::FIELD_WIDTH)
        .trim()
        .parse::<f64>()
        .map(|value| value * 1000.0)
        .unwrap_or(f64::NAN)
}

/// Builds canonical epoch from whitespace separated "Y M D h m s" fields
fn epoch_from_fields(content: &str) -> Option<String> {
    let fields = content.split_ascii_whitespace().take(6).collect::<Vec<_>>();
    format_epoch_fields(&fields)
}

fn parse_line1(header: &mut Header, line: &str) {
    header.raw_first_line = line.to_string();
    header.version = column(line, 1, 2).to_string();
    header.data_type = column(line, 2, 3).to_string();
    if let Some(epoch) = epoch_from_fields(column(line, 3, line.len())) {
        header.start_epoch = epoch;
    }
    header.number_of_epochs = column(line, 32, 39).trim().parse::<u32>().unwrap_or(0);
    header.data_used = column(line, 40, 45).trim().to_string();
    header.coordinate_system = column(line, 46, 51).trim().to_string();
    header.orbit_type = column(line, 52, 55).trim().to_string();
    header.agency = column(line, 56, 60).trim().to_string();
}

fn parse_line2(header: &mut Header, line: &str) {
    let items = column(line, 2, line.len())
        .split_ascii_whitespace()
        .collect::<Vec<_>>();
    if let Some(week) = items.first() {
        header.gps_week = week.to_string();
    }
    header.week_seconds = items.get(1).and_then(|s| s.parse::<f64>().ok());
    header.epoch_interval = items.get(2).and_then(|s| s.parse::<f64>().ok());
    header.mjd = match (
        items.get(3).and_then(|s| s.parse::<f64>().ok()),
        items.get(4).and_then(|s| s.parse::<f64>().ok()),
    ) {
        (Some(day), Some(fraction)) => Some(day + fraction),
        (Some(day), None) => Some(day),
        _ => None,
    };
    if let Some(agency) = items.get(5) {
        header.agency = agency.to_string();
    }
}

/// Reads the satellite slots of a "+" or "++" line
fn slots(line: &str) -> impl Iterator<Item = &str> {
    (0..Sp3Format::SATS_PER_LINE).map(move |i| {
        let start = Sp3Format::SAT_TABLE_OFFSET + i * Sp3Format::SAT_SLOT_WIDTH;
        column(line, start, start + Sp3Format::SAT_SLOT_WIDTH).trim()
    })
}

fn parse_satellites(header: &mut Header, line: &str, declared: Option<usize>) {
    for slot in slots(line) {
        if let Some(declared) = declared {
            if header.satellites.len() >= declared {
                return;
            }
        }
        if slot.is_empty() || slot.trim_start_matches('0').is_empty() {
            continue;
        }
        header.satellites.push(slot.to_string());
    }
}

fn parse_accuracy(header: &mut Header, line: &str) {
    let remaining = header.satellite_count.saturating_sub(header.accuracy.len());
    for slot in slots(line).take(remaining) {
        header.accuracy.push(slot.parse::<u32>().unwrap_or(0));
    }
}

fn parse_position(line: &str, epoch: &str) -> Option<SatelliteRecord> {
    let id = column(line, 1, 4).trim();
    if id.is_empty() {
        return None;
    }
    Some(SatelliteRecord {
        id: id.to_string(),
        system: system_name(id),
        prn: id.chars().skip(1).collect(),
        epoch: epoch.to_string(),
        x: scaled_field(line, 4),
        y: scaled_field(line, 18),
        z: scaled_field(line, 32),
        clock: scaled_field(line, 46),
    })
}

/// Parses SP3 content into an [SP3Document].
/// Positions are converted to meters and clock offsets to nanoseconds.
/// ```
/// use gnss_tools::prelude::parse_sp3_file;
/// let content = "#dP2019 10 27  0  0  0.00000000       1 ORBIT IGS14 HLM  IGS
/// +    1   G01  0  0  0  0  0  0  0  0  0  0  0  0  0  0  0  0
/// *  2019 10 27  0  0  0.00000000
/// PG01 -22335.782004 -14656.280389  -1218.238499   -176.397152
/// EOF";
/// let sp3 = parse_sp3_file(content);
/// assert_eq!(sp3.header.satellites, vec!["G01"]);
/// assert!((sp3.records[0].x + 22_335_782.004).abs() < 1.0E-6);
/// ```
pub fn parse_sp3_file(content: &str) -> SP3Document {
    let mut header = Header::default();
    let mut epochs = Vec::<String>::new();
    let mut records = Vec::<SatelliteRecord>::new();

    // satellite count, from the first "+" line, is authoritative
    let declared = content
        .lines()
        .find(|line| is_satellite_line(line))
        .and_then(|line| column(line, 2, 6).trim().parse::<usize>().ok());
    if let Some(declared) = declared {
        header.satellite_count = declared;
    }

    let mut in_header = true;
    let mut epoch = String::new();
    let mut descriptor_found = false;

    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if is_end_of_file(line) {
            break;
        }
        if is_comment(line) {
            if in_header {
                header
                    .comments
                    .push(column(line, 3, line.len()).trim_end().to_string());
            }
            continue;
        }
        if is_new_epoch(line) {
            in_header = false;
            match epoch_from_fields(column(line, 1, line.len())) {
                Some(e) => {
                    if header.start_epoch.is_empty() {
                        header.start_epoch = e.clone();
                    }
                    // first epoch included: single epoch products end where they start
                    header.end_epoch = e.clone();
                    epochs.push(e.clone());
                    epoch = e;
                },
                None => {
                    log::warn!("malformed epoch \"{}\"", line);
                },
            }
            continue;
        }
        if in_header {
            if line.starts_with("##") {
                parse_line2(&mut header, line);
            } else if line.starts_with("#h") {
                let items = column(line, 2, line.len())
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>();
                if items.len() > 1 {
                    header.number_of_epochs = items[0].parse::<u32>().unwrap_or(0);
                    header.coordinate_system = items[1].to_string();
                }
            } else if is_header_line1(line) {
                parse_line1(&mut header, line);
            } else if line.starts_with("++") {
                parse_accuracy(&mut header, line);
            } else if is_satellite_line(line) {
                parse_satellites(&mut header, line, declared);
            } else if line.starts_with("%c") {
                if !descriptor_found {
                    header.constellation = column(line, 3, 5).trim().to_string();
                    header.time_system = column(line, 9, 12).trim().to_string();
                    descriptor_found = true;
                }
            }
        } else if is_position_entry(line) {
            if let Some(record) = parse_position(line, &epoch) {
                records.push(record);
            }
        }
    }

    if declared.is_none() {
        header.satellite_count = header.satellites.len();
    }

    let doc = SP3Document {
        header,
        epochs,
        records,
    };

    log::debug!(
        "sp3: {} satellites, {} epochs, {} records",
        doc.header.satellites.len(),
        doc.epochs.len(),
        doc.records.len()
    );

    let degraded = doc.degraded_records();
    if degraded > 0 {
        log::warn!("sp3: {} records with unparsable fields", degraded);
    }

    doc
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn header_line1() {
        let mut header = Header::default();
        parse_line1(
            &mut header,
            "#cP2019 10 27  0  0  0.00000000      97 ORBIT IGS14 HLM  IGS",
        );
        assert_eq!(header.version, "c");
        assert_eq!(header.data_type, "P");
        assert_eq!(header.start_epoch, "2019-10-27 00:00:00.00");
        assert_eq!(header.number_of_epochs, 97);
        assert_eq!(header.data_used, "ORBIT");
        assert_eq!(header.coordinate_system, "IGS14");
        assert_eq!(header.orbit_type, "HLM");
        assert_eq!(header.agency, "IGS");
    }
    #[test]
    fn header_line2() {
        let mut header = Header::default();
        parse_line2(
            &mut header,
            "## 2077      0.00000000   900.00000000 58783 0.0000000000000",
        );
        assert_eq!(header.gps_week, "2077");
        assert_eq!(header.week_seconds, Some(0.0));
        assert_eq!(header.epoch_interval, Some(900.0));
        assert_eq!(header.mjd, Some(58783.0));
        assert_eq!(header.agency, "");
    }
    #[test]
    fn position_entry() {
        let record = parse_position(
            "PC01 -32312.652253  27060.656563    205.195454     63.035497",
            "2019-10-27 00:00:00.00",
        )
        .unwrap();
        assert_eq!(record.id, "C01");
        assert_eq!(record.system, "BeiDou");
        assert_eq!(record.prn, "01");
        assert!((record.x + 32_312_652.253).abs() < 1.0E-6);
        assert!((record.y - 27_060_656.563).abs() < 1.0E-6);
        assert!((record.z - 205_195.454).abs() < 1.0E-6);
        assert!((record.clock - 63_035.497).abs() < 1.0E-6);

        let record = parse_position("PG02  abcdefghijk", "").unwrap();
        assert!(record.x.is_nan());
        assert!(record.clock.is_nan());
        assert!(record.is_degraded());

        assert!(parse_position("P   ", "").is_none());
    }
}
