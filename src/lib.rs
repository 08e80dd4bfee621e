#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * GNSS-Tools: time systems, SP3 precise orbit analysis and
 * broadcast ephemeris to SP3 conversion.
 * This framework is shipped under the MPL-2.0 License.
 */

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

pub mod comparison;
pub mod converter;
pub mod filename;
pub mod navigation;
pub mod sp3;
pub mod timescale;

mod constants;
mod constellation;
mod epoch;
mod error;
mod reader;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        comparison::{
            calculate_diff_rms, calculate_rms, compare_sp3_files, group_by_system, rms_to_csv,
            DiffRecord, RMSRecord, RMS_CSV_HEADER,
        },
        constellation::system_name,
        converter::{convert_broadcast_to_sp3, convert_with_options, try_convert, ConverterOptions},
        error::Error,
        filename::{check_navigation_file_name, is_navigation_file_name, sp3_file_name},
        navigation::{
            parse_rinex_nav, Ephemeris, NavHeader, RinexNavigationDocument, SatelliteState,
        },
        sp3::{
            generate_sp3_content, parse_sp3_file, write_sp3_file, Header as SP3Header,
            SP3Document, SP3Key, SatelliteRecord, Summary,
        },
        timescale::{
            day_of_week_from_tow, day_of_week_name, dow_to_tow, from_week_tow, gps_week_sow,
            seconds_of_day, to_week_tow, to_week_tow_precise, tow_to_dow, TimeOfWeek, TimeSystem,
        },
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}
