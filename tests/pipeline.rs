use bzip2::{write::BzEncoder, Compression};
use fars::{
    make_filename, map_state, read_accidents, read_years, summarize_years, write_summary,
    BaseMap, DataDir, Error, MapOutcome,
};
use std::{fs::File, io::Write, path::Path};

const ACCIDENTS_2013: &str = "\
STATE,ST_CASE,VE_TOTAL,MONTH,DAY,YEAR,LATITUDE,LONGITUD,FATALS
1,10001,1,1,1,2013,32.6410,-85.3545,1
1,10002,2,1,5,2013,31.7513,-87.6761,1
1,10003,1,3,12,2013,99.9999,999.9999,2
6,60001,3,7,4,2013,34.0522,-118.2437,1
6,60002,1,12,31,2013,37.7749,-122.4194,1
";

const ACCIDENTS_2014: &str = "\
STATE,ST_CASE,VE_TOTAL,MONTH,DAY,YEAR,LATITUDE,LONGITUD,FATALS
1,10001,1,2,14,2014,33.5207,-86.8025,1
6,60001,2,2,20,2014,32.7157,-117.1611,1
6,60002,1,11,27,2014,38.5816,-121.4944,3
";

fn write_fixture(dir: &Path, year: i32, csv: &str) {
    let file = File::create(dir.join(make_filename(year).unwrap())).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder.write_all(csv.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), 2013, ACCIDENTS_2013);
    write_fixture(dir.path(), 2014, ACCIDENTS_2014);
    dir
}

#[test]
fn test_full_pipeline() {
    let dir = data_dir();
    let source = DataDir::new(dir.path());

    for year in [2013, 2014] {
        assert!(!read_accidents(source.path_for(year)).unwrap().is_empty());
    }

    let entries = read_years(&source, &[2013, 2014]);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| !entry.is_absent()));

    let summary = summarize_years(&source, &[2013, 2014, 2000]);
    assert_eq!(summary.years().collect::<Vec<_>>(), [2013, 2014]);
    assert_eq!(summary.rows().count(), 12);
    assert_eq!(summary.total(2013), Some(5));
    assert_eq!(summary.total(2014), Some(3));
    assert_eq!(summary.count(2013, 1), Some(2));
    assert_eq!(summary.count(2014, 2), Some(2));

    let mut out = Vec::new();
    write_summary(&mut out, &summary).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert!(csv.starts_with("MONTH,2013,2014\n1,2,0\n2,0,2\n"));
}

#[test]
fn test_missing_file() {
    let dir = data_dir();
    let path = DataDir::new(dir.path()).path_for(2000);
    let err = read_accidents(&path).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert!(err.to_string().contains(&path.display().to_string()));

    let entries = read_years(&DataDir::new(dir.path()), &[2000]);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_absent());
}

#[test]
fn test_map() {
    let dir = data_dir();
    let source = DataDir::new(dir.path());
    let base_map = BaseMap::from_reader(
        "group,longitude,latitude\nalabama,-88.2,35.0\nalabama,-85.0,35.0\nalabama,-85.0,31.0\n"
            .as_bytes(),
    )
    .unwrap();
    let output = dir.path().join("alabama_2013.svg");

    let outcome = map_state(&source, 1, 2013, &base_map, &output).unwrap();
    assert_eq!(outcome, MapOutcome::Rendered { points: 2 });
    assert!(output.exists());

    let err = map_state(&source, 56, 2013, &base_map, &output).unwrap_err();
    assert_eq!(err.to_string(), "invalid STATE number: 56");
}
