//! Test toolkit
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    epoch::epoch_to_string,
    prelude::{system_name, Duration, Epoch, RMSRecord, SP3Document, SP3Header, SatelliteRecord},
};

/// Mixed RINEX3 navigation file: G01 (twice), R01, G02 and E01
pub const NAV_V3_MIXED: &str = "NAV/V3/BRDC00GOP_R_20201770000_01D_MN.rnx";

/// G30 broadcast record of 2021-01-02 and one BeiDou GEO (C01) record
pub const NAV_V3_REFERENCE: &str = "NAV/V3/ESBC00DNK_R_20210020000_01D_MN.rnx";

/// SP3-c product: G01, G02 and R03 over 3 epochs, one degraded record
pub const SP3_C_FINAL: &str = "SP3/C/IGS0OPSFIN_20201770000_01D_15M_ORB.SP3";

/// Returns full path to given test resource
pub fn test_resource(relative: &str) -> String {
    env!("CARGO_MANIFEST_DIR").to_owned() + "/test_resources/" + relative
}

/// Reads given test resource
pub fn test_resource_content(relative: &str) -> String {
    let path = test_resource(relative);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

/*
 * Test: panic if given content is not a correctly formatted SP3 (revision D) file
 */
pub fn is_sp3_formatted(content: &str) {
    let lines = content.lines().collect::<Vec<_>>();
    assert!(lines.len() > 22, "not enough lines: {}", lines.len());
    assert!(lines[0].starts_with("#dP"), "bad first line \"{}\"", lines[0]);
    assert!(lines[1].starts_with("## "), "bad second line \"{}\"", lines[1]);
    assert_eq!(lines.last(), Some(&"EOF"), "missing EOF marker");

    let plus_lines = lines.iter().filter(|l| l.starts_with("+ ")).count();
    let accuracy_lines = lines.iter().filter(|l| l.starts_with("++")).count();
    assert!(plus_lines > 0, "missing satellite table");
    assert_eq!(
        plus_lines + accuracy_lines,
        std::cmp::max(10, plus_lines),
        "bad satellite table"
    );

    for (nth, line) in lines[..lines.len() - 1].iter().enumerate() {
        assert_eq!(
            line.chars().count(),
            60,
            "line #{} is not 60 characters wide: \"{}\"",
            nth + 1,
            line
        );
    }
}

/*
 * Test: panic if both documents do not describe the same satellite states
 */
pub fn sp3_comparison(dut: &SP3Document, model: &SP3Document, tolerance: f64) {
    assert_eq!(dut.epochs, model.epochs, "epochs differ");
    assert_eq!(
        dut.header.satellites, model.header.satellites,
        "satellites differ"
    );
    assert_eq!(
        dut.records.len(),
        model.records.len(),
        "number of records differ"
    );
    for (dut, model) in dut.records.iter().zip(model.records.iter()) {
        assert_eq!(dut.key(), model.key());
        for (field, a, b) in [
            ("x", dut.x, model.x),
            ("y", dut.y, model.y),
            ("z", dut.z, model.z),
            ("clock", dut.clock, model.clock),
        ] {
            if a.is_nan() || b.is_nan() {
                assert!(
                    a.is_nan() && b.is_nan(),
                    "{:?}: {} degraded on one side only",
                    dut.key(),
                    field
                );
                continue;
            }
            let err = (a - b).abs();
            assert!(
                err < tolerance,
                "{:?}: {} {} != {} (err={})",
                dut.key(),
                field,
                a,
                b,
                err
            );
        }
    }
}

/*
 * Test: panic if one of the RMS values exceeds tolerance
 */
pub fn is_null_rms(rms: &[RMSRecord], tolerance: f64) {
    for record in rms.iter() {
        for (field, value) in [
            ("3D", record.rms_3d),
            ("x", record.rms_x),
            ("y", record.rms_y),
            ("z", record.rms_z),
            ("clock", record.rms_clock),
        ] {
            assert!(
                value.abs() < tolerance,
                "{} rms {}={} is not null",
                record.satellite,
                field,
                value
            );
        }
    }
}

/// Builds a reproducible random [SP3Document], sampled every 15'
/// from 2020-06-25 midnight.
pub fn random_sp3(seed: u64, satellites: &[&str], nb_epochs: usize) -> SP3Document {
    let mut rng = StdRng::seed_from_u64(seed);
    let t0 = Epoch::from_gregorian_utc_at_midnight(2020, 6, 25);

    let epochs = (0..nb_epochs)
        .map(|i| epoch_to_string(t0 + Duration::from_seconds(900.0 * i as f64)))
        .collect::<Vec<_>>();

    let mut records = Vec::with_capacity(nb_epochs * satellites.len());
    for epoch in epochs.iter() {
        for sat in satellites.iter() {
            records.push(SatelliteRecord {
                id: sat.to_string(),
                system: system_name(sat),
                prn: sat.chars().skip(1).collect(),
                epoch: epoch.clone(),
                x: rng.gen_range(-30.0E6..30.0E6),
                y: rng.gen_range(-30.0E6..30.0E6),
                z: rng.gen_range(-30.0E6..30.0E6),
                clock: rng.gen_range(-1.0E6..1.0E6),
            });
        }
    }

    SP3Document {
        header: SP3Header {
            version: "d".to_string(),
            data_type: "P".to_string(),
            start_epoch: epochs.first().cloned().unwrap_or_default(),
            end_epoch: epochs.last().cloned().unwrap_or_default(),
            number_of_epochs: nb_epochs as u32,
            satellites: satellites.iter().map(|sat| sat.to_string()).collect(),
            satellite_count: satellites.len(),
            ..Default::default()
        },
        epochs,
        records,
    }
}
