//! File name conventions for navigation inputs and SP3 outputs
use regex::Regex;

use crate::prelude::Error;

lazy_static! {
    /// Navigation file extensions: .n .p .nav .rnx and RINEX2 styled .YYn / .YYp
    static ref NAV_EXTENSION: Regex =
        Regex::new(r"(?i)\.(n|p|nav|rnx|\d+[np])(\.gz)?$").unwrap();
}

/// Returns true if this file name looks like a supported navigation file.
/// ```
/// use gnss_tools::prelude::is_navigation_file_name;
/// assert!(is_navigation_file_name("brdc0010.23p"));
/// assert!(is_navigation_file_name("BRDC00IGS_R_20230010000_01D_MN.rnx"));
/// assert!(!is_navigation_file_name("igs22390.sp3"));
/// ```
pub fn is_navigation_file_name(name: &str) -> bool {
    NAV_EXTENSION.is_match(name.trim())
}

/// Same as [is_navigation_file_name], reported as [Error::InvalidFileName]
pub fn check_navigation_file_name(name: &str) -> Result<(), Error> {
    if is_navigation_file_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidFileName(name.to_string()))
    }
}

/// Derives the SP3 output file name from the navigation input file name
/// ```
/// use gnss_tools::prelude::sp3_file_name;
/// assert_eq!(sp3_file_name("brdc0010.23p"), "brdc0010.sp3");
/// ```
pub fn sp3_file_name(nav_name: &str) -> String {
    let file_name = nav_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(nav_name);
    let base = file_name.split('.').next().unwrap_or(file_name);
    format!("{}.sp3", base)
}
