//! RINEX navigation parser. Like the SP3 parser, it never fails:
//! malformed words read as NaN and malformed blocks are skipped.
use crate::{
    constellation::is_block_start,
    epoch::format_epoch_fields,
    navigation::{Ephemeris, NavHeader, RinexNavigationDocument},
    reader::column,
};

/// Broadcast orbit lines that follow the epoch line
const MAX_ORBIT_LINES: usize = 7;

/// Width of one broadcast orbit word
const WORD_WIDTH: usize = 19;

/// Broadcast orbit words per line
const WORDS_PER_LINE: usize = 4;

/// Parses one (fortran styled) float word. Blank words are null values.
fn parse_word(content: &str) -> f64 {
    let content = content.trim();
    if content.is_empty() {
        return 0.0;
    }
    content
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

/// "R 1" is "R01"
fn normalize_satellite(content: &str) -> String {
    let content = content.trim();
    let mut chars = content.chars();
    match chars.next() {
        Some(letter) => format!("{}{:0>2}", letter, chars.as_str().trim()),
        None => String::new(),
    }
}

fn parse_header_line(header: &mut NavHeader, line: &str) -> bool {
    if line.contains("RINEX VERSION / TYPE") {
        header.version = column(line, 0, 9).trim().to_string();
        header.file_type = column(line, 20, 21).trim().to_string();
        header.satellite_system = column(line, 40, 41).trim().to_string();
    } else if line.contains("PGM / RUN BY / DATE") {
        header.program = column(line, 0, 20).trim().to_string();
        header.agency = column(line, 20, 40).trim().to_string();
        header.date = column(line, 40, 60).trim().to_string();
    } else if line.contains("LEAP SECONDS") {
        header.leap_seconds = line
            .split_ascii_whitespace()
            .next()
            .and_then(|leap| leap.parse::<i32>().ok())
            .unwrap_or(0);
    } else if line.contains("END OF HEADER") {
        return true;
    }
    false
}

fn parse_epoch_line(line: &str) -> Option<Ephemeris> {
    let fields = column(line, 3, 23)
        .split_ascii_whitespace()
        .collect::<Vec<_>>();
    let epoch = format_epoch_fields(&fields)?;
    Some(Ephemeris {
        epoch,
        satellite: normalize_satellite(column(line, 0, 3)),
        clock_bias: parse_word(column(line, 23, 42)),
        clock_drift: parse_word(column(line, 42, 61)),
        clock_drift_rate: parse_word(column(line, 61, 80)),
        data: Vec::with_capacity(MAX_ORBIT_LINES * WORDS_PER_LINE),
    })
}

fn parse_orbit_line(line: &str, indent: usize, data: &mut Vec<f64>) {
    for i in 0..WORDS_PER_LINE {
        let start = indent + i * WORD_WIDTH;
        if start >= line.len() {
            break;
        }
        data.push(parse_word(column(line, start, start + WORD_WIDTH)));
    }
}

/// Parses RINEX navigation content into a [RinexNavigationDocument].
/// Content that does not have an END OF HEADER marker
/// is considered header only.
pub fn parse_rinex_nav(content: &str) -> RinexNavigationDocument {
    let mut header = NavHeader::default();
    let mut ephemerides = Vec::<Ephemeris>::new();

    let mut in_header = true;
    let mut indent = 4;
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let line = line.trim_end();
        if in_header {
            if parse_header_line(&mut header, line) {
                in_header = false;
                // RINEX2 orbit lines are indented by 3
                if (1..3).contains(&header.version_major()) {
                    indent = 3;
                }
            }
            continue;
        }
        if !is_block_start(line) {
            continue;
        }

        let mut ephemeris = parse_epoch_line(line);
        if ephemeris.is_none() {
            log::warn!("rinex nav: malformed epoch line \"{}\"", line);
        }

        for _ in 0..MAX_ORBIT_LINES {
            match lines.peek() {
                Some(next) if !is_block_start(next) => {
                    if let Some(ephemeris) = ephemeris.as_mut() {
                        parse_orbit_line(next.trim_end(), indent, &mut ephemeris.data);
                    }
                    lines.next();
                },
                _ => break,
            }
        }

        if let Some(ephemeris) = ephemeris {
            ephemerides.push(ephemeris);
        }
    }

    log::debug!(
        "rinex nav: version \"{}\", {} ephemerides",
        header.version,
        ephemerides.len()
    );

    RinexNavigationDocument {
        header,
        ephemerides,
    }
}
