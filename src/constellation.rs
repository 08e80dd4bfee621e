//! Satellite system identification from SP3 / RINEX one letter codes
use crate::prelude::Constellation;

/// Returns the system name of a satellite identifier (or its 1 letter prefix).
/// Unknown prefixes are returned unchanged.
/// ```
/// use gnss_tools::prelude::system_name;
/// assert_eq!(system_name("G01"), "GPS");
/// assert_eq!(system_name("C"), "BeiDou");
/// assert_eq!(system_name("X12"), "X");
/// ```
pub fn system_name(id: &str) -> String {
    let letter = match id.chars().next() {
        Some(c) => c,
        None => return String::new(),
    };
    match letter {
        'G' => "GPS",
        'R' => "GLONASS",
        'E' => "Galileo",
        'C' => "BeiDou",
        'J' => "QZSS",
        'I' => "IRNSS",
        'S' => "SBAS",
        _ => return letter.to_string(),
    }
    .to_string()
}

/// Identifies [Constellation] from satellite identifier prefix.
pub(crate) fn constellation_from_id(id: &str) -> Option<Constellation> {
    match id.chars().next()? {
        'G' => Some(Constellation::GPS),
        'R' => Some(Constellation::Glonass),
        'E' => Some(Constellation::Galileo),
        'C' => Some(Constellation::BeiDou),
        'J' => Some(Constellation::QZSS),
        'I' => Some(Constellation::IRNSS),
        'S' => Some(Constellation::SBAS),
        _ => None,
    }
}

/// Returns true if this line opens a new navigation block,
/// that is "Xnn" where X is a known system letter.
pub(crate) fn is_block_start(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    if constellation_from_id(line).is_none() {
        return false;
    }
    (bytes[1].is_ascii_digit() || bytes[1] == b' ') && bytes[2].is_ascii_digit()
}
