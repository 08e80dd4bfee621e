//! Epoch descriptors, as found in SP3 and RINEX files.
//! Within this crate, epochs are carried as canonical "YYYY-MM-DD hh:mm:ss.ss"
//! strings, so two products agree on an epoch when their strings match.
//! Wall clock arithmetic goes through UTC labelled [Epoch]s and unix seconds,
//! which never introduces leap seconds.
use hifitime::{Duration, Epoch};

/// Builds the canonical epoch string from "Y M D h m s" fields.
/// Fields are zero padded, seconds are rounded to 2 decimals and
/// degrade to "00.00" when not parsable. Seconds rounded up to 60
/// carry over to the next minute.
/// Returns None when less than 6 fields are provided.
pub(crate) fn format_epoch_fields(fields: &[&str]) -> Option<String> {
    if fields.len() < 6 {
        return None;
    }
    let second = match fields[5].trim().parse::<f64>() {
        Ok(s) if s.is_finite() => format!("{:05.2}", s),
        _ => {
            log::warn!("epoch \"{}\": invalid seconds field", fields.join(" "));
            "00.00".to_string()
        },
    };
    let canonical = format!(
        "{:0>4}-{:0>2}-{:0>2} {:0>2}:{:0>2}:{}",
        fields[0].trim(),
        fields[1].trim(),
        fields[2].trim(),
        fields[3].trim(),
        fields[4].trim(),
        second,
    );
    if second.starts_with("60") {
        if let Some(t) = parse_epoch(&canonical) {
            return Some(epoch_to_string(t));
        }
    }
    Some(canonical)
}

/// Parses either the canonical form or the "Y M D h m s" form.
/// Seconds within [60, 61[ are carried over to the next minute.
pub(crate) fn parse_epoch(content: &str) -> Option<Epoch> {
    let normalized = content.replace(['-', ':', 'T'], " ");
    let items: Vec<&str> = normalized.split_ascii_whitespace().collect();
    if items.len() < 6 {
        return None;
    }
    let y = items[0].parse::<i32>().ok()?;
    let m = items[1].parse::<u8>().ok()?;
    let d = items[2].parse::<u8>().ok()?;
    let hh = items[3].parse::<u8>().ok()?;
    let mm = items[4].parse::<u8>().ok()?;
    let ss = items[5].parse::<f64>().ok()?;
    if !ss.is_finite() || !(0.0..61.0).contains(&ss) {
        return None;
    }
    let minute = Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, 0, 0).ok()?;
    Some(minute + Duration::from_total_nanoseconds((ss * 1.0E9).round() as i128))
}

/// Parses an epoch string straight into unix seconds
pub(crate) fn parse_unix_seconds(content: &str) -> Option<f64> {
    parse_epoch(content).map(|t| t.to_unix_seconds())
}

/// Calendar fields of an [Epoch], with fractional seconds
pub(crate) fn calendar(t: Epoch) -> (i32, u8, u8, u8, u8, f64) {
    let (y, m, d, hh, mm, ss, nanos) = t.to_gregorian_utc();
    (y, m, d, hh, mm, ss as f64 + nanos as f64 * 1.0E-9)
}

/// Canonical string representation of an [Epoch], to the closest 10 ms
pub(crate) fn epoch_to_string(t: Epoch) -> String {
    let (y, m, d, hh, mm, ss) = calendar(t.round(Duration::from_milliseconds(10.0)));
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:05.2}",
        y, m, d, hh, mm, ss
    )
}
