use thiserror::Error;

/// Errors that may rise when loading files, or when the caller
/// requests an operation that cannot be carried out.
/// Malformed GNSS fields never end up here: both parsers degrade
/// silently (NaN or default values) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// File access error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Navigation content did not contain a single usable ephemeris
    #[error("no valid ephemeris data found")]
    NoEphemeris,
    /// File name does not look like a supported navigation file
    #[error("invalid file extension: \"{0}\"")]
    InvalidFileName(String),
    /// Sampling interval must be a positive finite number of seconds
    #[error("invalid sampling interval: {0}s")]
    InvalidInterval(f64),
    /// Sampling would produce more epochs than an SP3 file can describe
    #[error("{0} epochs exceed SP3 capacity")]
    TooManyEpochs(u64),
    /// CSV export error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
