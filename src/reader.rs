//! File loading helpers. Parsers operate on complete, in memory text content.
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use crate::prelude::Error;

/// Reads whole [Read]able content into a String.
/// Invalid UTF-8 sequences are replaced, fields around them will degrade.
pub(crate) fn read_to_string<R: Read>(reader: R) -> Result<String, Error> {
    let mut reader = BufReader::new(reader);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads local file content
pub(crate) fn read_file(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    log::debug!("reading \"{}\"", path.display());
    let fd = File::open(path)?;
    read_to_string(fd)
}

/// Reads and decompresses local gzip file
#[cfg(feature = "flate2")]
pub(crate) fn read_gzip_file(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    log::debug!("reading gzip \"{}\"", path.display());
    let fd = File::open(path)?;
    read_to_string(GzDecoder::new(fd))
}

/// Extracts fixed columns [start, end) from a line, clamped to the line length.
/// Columns that do not fall on char boundaries read as empty.
pub(crate) fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}
