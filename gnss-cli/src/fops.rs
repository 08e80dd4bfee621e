use crate::{export, Error};
use clap::ArgMatches;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use hifitime::Epoch;

use gnss_tools::prelude::{
    calculate_diff_rms, calculate_rms, check_navigation_file_name, compare_sp3_files,
    day_of_week_from_tow, day_of_week_name, from_week_tow, group_by_system,
    sp3_file_name, to_week_tow, to_week_tow_precise, try_convert, write_sp3_file,
    ConverterOptions, RMSRecord, RinexNavigationDocument, SP3Document, TimeSystem,
};

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn load_sp3(path: &Path) -> Result<SP3Document, Error> {
    let sp3 = if is_gzip(path) {
        SP3Document::from_gzip_file(path)?
    } else {
        SP3Document::from_file(path)?
    };
    info!("SP3 \"{}\": {}", path.display(), sp3.summary());
    Ok(sp3)
}

fn time_system(name: &str) -> Result<TimeSystem, Error> {
    match name.trim().to_lowercase().as_str() {
        "gps" | "gpst" => Ok(TimeSystem::GPS),
        "bds" | "bdt" | "beidou" => Ok(TimeSystem::BeiDou),
        _ => Err(Error::UnknownTimeSystem(name.to_string())),
    }
}

/*
 * UTC date time to week counters
 */
pub fn week(matches: &ArgMatches) -> Result<(), Error> {
    let datetime = matches.get_one::<String>("datetime").unwrap();

    let t = Epoch::from_str(datetime.trim())
        .map_err(|e| Error::DateTimeParsing(format!("{}: {}", datetime, e)))?;

    for system in [TimeSystem::GPS, TimeSystem::BeiDou] {
        let precise = to_week_tow_precise(t, system);
        let calendar = to_week_tow(t, system);
        let dow = day_of_week_from_tow(precise.tow);
        println!(
            "{} week {} tow {:.3} ({}), calendar tow {}",
            system,
            precise.week,
            precise.tow,
            day_of_week_name(dow).unwrap_or("?"),
            calendar.tow
        );
    }
    Ok(())
}

/*
 * Week counter to UTC date time
 */
pub fn utc(matches: &ArgMatches) -> Result<(), Error> {
    let week = *matches.get_one::<i64>("week").unwrap();
    let tow = *matches.get_one::<f64>("tow").unwrap();
    let system = time_system(matches.get_one::<String>("system").unwrap())?;

    if !(0.0..604_800.0).contains(&tow) {
        warn!("time of week {} is out of [0, 604800)", tow);
    }

    let t = from_week_tow(week, tow, system);
    println!("{}", t);
    Ok(())
}

/*
 * Broadcast ephemerides to SP3
 */
pub fn convert(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.get_one::<PathBuf>("file").unwrap();
    let input_name = input.to_string_lossy().to_string();

    check_navigation_file_name(&input_name)?;

    let nav = if is_gzip(input) {
        RinexNavigationDocument::from_gzip_file(input)?
    } else {
        RinexNavigationDocument::from_file(input)?
    };

    info!(
        "RINEX \"{}\": {} ephemerides",
        input.display(),
        nav.ephemerides.len()
    );

    let options = ConverterOptions::default()
        .with_interval(*matches.get_one::<f64>("interval").unwrap())
        .with_agency(matches.get_one::<String>("agency").unwrap())
        .with_coordinate_system(matches.get_one::<String>("crs").unwrap())
        .with_orbit_type(matches.get_one::<String>("orbit-type").unwrap());

    if !options.is_recommended_interval() {
        warn!(
            "{}s sampling interval is not recommended (60s to 3600s)",
            options.interval
        );
    }

    let sp3 = try_convert(&nav, &options)?;

    let output = match matches.get_one::<PathBuf>("output") {
        Some(output) => output.clone(),
        None => PathBuf::from(sp3_file_name(&input_name)),
    };

    write_sp3_file(&sp3, &output)?;
    info!("SP3 \"{}\" has been generated: {}", output.display(), sp3.summary());
    Ok(())
}

fn print_rms_table(rms: &[RMSRecord]) {
    for (system, records) in group_by_system(rms) {
        println!("{}", system);
        println!(
            "{:>5} {:>14} {:>14} {:>14} {:>14} {:>14}",
            "SV", "3D (m)", "X (m)", "Y (m)", "Z (m)", "Clock (ns)"
        );
        for r in records.iter() {
            println!(
                "{:>5} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6}",
                r.satellite, r.rms_3d, r.rms_x, r.rms_y, r.rms_z, r.rms_clock
            );
        }
    }
}

/*
 * SP3 RMS analysis
 */
pub fn analyze(matches: &ArgMatches) -> Result<(), Error> {
    let test = load_sp3(matches.get_one::<PathBuf>("file").unwrap())?;

    let rms = match matches.get_one::<PathBuf>("reference") {
        Some(reference) => {
            let reference = load_sp3(reference)?;
            let diffs = compare_sp3_files(&test, &reference);
            if diffs.is_empty() {
                warn!("no common (satellite, epoch) between both products");
            }
            calculate_diff_rms(&diffs)
        },
        None => calculate_rms(&test),
    };

    print_rms_table(&rms);

    if let Some(path) = matches.get_one::<PathBuf>("csv") {
        export::write_rms(&rms, path)?;
        info!("RMS table \"{}\" has been generated", path.display());
    }
    Ok(())
}
