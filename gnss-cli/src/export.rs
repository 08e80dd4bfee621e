//! CSV exports
use crate::Error;
use csv::Writer;
use gnss_tools::prelude::{RMSRecord, RMS_CSV_HEADER};
use std::path::Path;

/// Writes the RMS table, one record per satellite
pub fn write_rms<P: AsRef<Path>>(rms: &[RMSRecord], path: P) -> Result<(), Error> {
    let mut w = Writer::from_path(path)?;
    w.write_record(RMS_CSV_HEADER)?;
    for record in rms.iter() {
        w.write_record(record.csv_record())?;
    }
    w.flush()?;
    Ok(())
}
