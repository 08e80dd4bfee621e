#[cfg(test)]
mod test {
    use crate::prelude::*;
    use crate::tests::toolkit::{
        is_sp3_formatted, sp3_comparison, test_resource, test_resource_content, SP3_C_FINAL,
    };
    #[test]
    fn sp3_c_header() {
        let sp3 = SP3Document::from_file(test_resource(SP3_C_FINAL)).unwrap();
        let header = &sp3.header;
        assert_eq!(header.version, "c");
        assert_eq!(header.data_type, "P");
        assert_eq!(header.start_epoch, "2020-06-25 00:00:00.00");
        assert_eq!(header.end_epoch, "2020-06-25 00:30:00.00");
        assert_eq!(header.number_of_epochs, 3);
        assert_eq!(header.data_used, "ORBIT");
        assert_eq!(header.coordinate_system, "IGS14");
        assert_eq!(header.orbit_type, "HLM");
        assert_eq!(header.agency, "IGS");
        assert_eq!(header.gps_week, "2111");
        assert_eq!(header.week_seconds, Some(345_600.0));
        assert_eq!(header.epoch_interval, Some(900.0));
        assert_eq!(header.mjd, Some(59_025.0));
        assert_eq!(header.satellites, vec!["G01", "G02", "R03"]);
        assert_eq!(header.satellite_count, 3);
        assert_eq!(header.accuracy, vec![2, 3, 4]);
        assert_eq!(header.constellation, "M");
        assert_eq!(header.time_system, "GPS");
        assert_eq!(
            header.comments,
            vec![
                "FINAL ORBIT COMBINATION FROM WEIGHTED AVERAGE OF:",
                "TEST PRODUCT"
            ]
        );
        assert_eq!(sp3.agency_from_first_line(), "IGS");
    }
    #[test]
    fn sp3_c_records() {
        let sp3 = parse_sp3_file(&test_resource_content(SP3_C_FINAL));
        assert_eq!(
            sp3.epochs,
            vec![
                "2020-06-25 00:00:00.00",
                "2020-06-25 00:15:00.00",
                "2020-06-25 00:30:00.00"
            ]
        );
        assert_eq!(sp3.records.len(), 9);
        assert_eq!(sp3.degraded_records(), 1);

        let first = &sp3.records[0];
        assert_eq!(first.id, "G01");
        assert_eq!(first.system, "GPS");
        assert_eq!(first.prn, "01");
        assert_eq!(first.epoch, "2020-06-25 00:00:00.00");
        assert!((first.x + 22_335_782.004).abs() < 1.0E-6);
        assert!((first.y + 14_656_280.389).abs() < 1.0E-6);
        assert!((first.z + 1_218_238.499).abs() < 1.0E-6);
        assert!((first.clock + 176_397.152).abs() < 1.0E-6);

        let glonass = sp3.satellite_records("R03").collect::<Vec<_>>();
        assert_eq!(glonass.len(), 3);
        assert!(glonass.iter().all(|r| r.system == "GLONASS"));
        assert_eq!(glonass[2].epoch, "2020-06-25 00:30:00.00");

        let degraded = sp3
            .records
            .iter()
            .find(|r| r.is_degraded())
            .expect("degraded record not found");
        assert_eq!(degraded.id, "G02");
        assert_eq!(degraded.epoch, "2020-06-25 00:30:00.00");
        assert!(degraded.y.is_nan());
        assert!((degraded.x - 14_001_112.203).abs() < 1.0E-6);
    }
    #[test]
    fn sp3_summary() {
        let sp3 = parse_sp3_file(&test_resource_content(SP3_C_FINAL));
        let summary = sp3.summary();
        assert_eq!(summary.satellites, 3);
        assert_eq!(summary.epochs, 3);
        assert_eq!(
            summary.to_string(),
            "3 satellites, 3 epochs (2020-06-25 00:00:00.00 - 2020-06-25 00:30:00.00), GPS week 2111"
        );
        let summary = SP3Document::default().summary();
        assert_eq!(summary.first_epoch, None);
        assert_eq!(
            summary.to_string(),
            "0 satellites, 0 epochs (? - ?), GPS week "
        );
    }
    #[test]
    fn sp3_partial_content() {
        // no EOF marker, truncated after the first epoch
        let content = test_resource_content(SP3_C_FINAL);
        let truncated = content
            .lines()
            .take_while(|line| !line.starts_with("*  2020  6 25  0 15"))
            .collect::<Vec<_>>()
            .join("\n");
        let sp3 = parse_sp3_file(&truncated);
        assert_eq!(sp3.epochs.len(), 1);
        assert_eq!(sp3.records.len(), 3);
        assert_eq!(sp3.header.end_epoch, "2020-06-25 00:00:00.00");
        assert_eq!(sp3.header.start_epoch, sp3.header.end_epoch);

        // data past EOF is ignored
        let extended = content.replace("EOF\n", "EOF\n*  2020  6 25  1  0  0.00000000\n");
        let sp3 = parse_sp3_file(&extended);
        assert_eq!(sp3.epochs.len(), 3);

        let sp3 = parse_sp3_file("");
        assert_eq!(sp3, SP3Document::default());
    }
    #[test]
    fn sp3_single_epoch() {
        let single = test_resource_content(SP3_C_FINAL)
            .lines()
            .take_while(|line| !line.starts_with("*  2020  6 25  0 15"))
            .chain(std::iter::once("EOF"))
            .collect::<Vec<_>>()
            .join("\n");
        let sp3 = parse_sp3_file(&single);
        assert_eq!(sp3.epochs, vec!["2020-06-25 00:00:00.00".to_string()]);
        assert_eq!(sp3.header.start_epoch, "2020-06-25 00:00:00.00");
        assert_eq!(sp3.header.end_epoch, "2020-06-25 00:00:00.00");
        let summary = sp3.summary();
        assert_eq!(summary.first_epoch, summary.last_epoch);
    }
    #[test]
    fn sp3_reformatting() {
        let sp3 = parse_sp3_file(&test_resource_content(SP3_C_FINAL));
        let content = generate_sp3_content(&sp3);
        is_sp3_formatted(&content);

        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "#dP2020  6 25  0  0  0.00000000       3 ORBIT IGS14 HLM  IGS"
        );
        assert_eq!(
            lines[1],
            "## 2111 345600.00000000   900.00000000 59025 0.0000000000000"
        );
        assert_eq!(
            lines[2],
            "+    3   G01G02R03  0  0  0  0  0  0  0  0  0  0  0  0  0  0"
        );
        assert_eq!(
            lines[3],
            "++         2  3  4  0  0  0  0  0  0  0  0  0  0  0  0  0  0"
        );
        assert!(lines[12].starts_with("%c M  cc GPS"));
        assert!(lines.contains(&"*  2020  6 25  0 30  0.00000000                             "));
        assert!(lines.contains(&"PG02  14001.112203           NaN  20112.103004    211.555213"));

        let parsed = parse_sp3_file(&content);
        assert_eq!(parsed.header.version, "d");
        assert_eq!(parsed.header.accuracy, vec![2, 3, 4]);
        assert_eq!(parsed.degraded_records(), 1);
        sp3_comparison(&parsed, &sp3, 1.0E-3);
    }
    #[test]
    fn sp3_file_generation() {
        let sp3 = SP3Document::from_file(test_resource(SP3_C_FINAL)).unwrap();
        let path = std::env::temp_dir().join("gnss-tools-sp3-file-generation.sp3");
        write_sp3_file(&sp3, &path).unwrap();
        let parsed = SP3Document::from_file(&path).unwrap();
        sp3_comparison(&parsed, &sp3, 1.0E-3);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            SP3Document::from_file("/this/file/does/not/exist.sp3"),
            Err(Error::Io(_))
        ));
    }
}
