//! End-to-end integration tests for the trips processing pipeline
//!
//! Exercises the loader and persistence layers together against synthesized
//! raw CSV exports, verifying the artifact inventory and the round-trip
//! guarantees the downstream consumers rely on.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use trips_processor::app::services::artifact_writer::{
    PersistOptions, persist_clean_data, persist_station_names,
};
use trips_processor::app::services::trip_loader::load_clean_data;
use trips_processor::{ParquetOutcome, StationNameMap};

const HEADER: &str = "Rental Id,Duration,Bike Id,End Date,EndStation Id,EndStation Name,\
                      Start Date,StartStation Id,StartStation Name";

fn write_csv(dir: &Path, name: &str, rows: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(dir.join(name), contents).unwrap();
}

fn seed_raw_data(csv_dir: &Path) {
    write_csv(
        csv_dir,
        "2023-01.csv",
        &[
            "101,300,1,01/06/2023 08:20,14,Belgrove Street,01/06/2023 08:15,3,King's Cross",
            "102,540,2,01/06/2023 09:09,3,Kings X,01/06/2023 09:00,14,Belgrove Street",
            // Negative duration, must be cleaned away
            "103,-60,3,01/06/2023 09:29,14,Belgrove Street,01/06/2023 09:30,3,King's Cross",
        ],
    );
    write_csv(
        csv_dir,
        "2023-02.csv",
        &["104,600,4,01/07/2023 10:10,9,Oval Way,01/07/2023 10:00,3,King's Cross"],
    );
}

fn dir_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn full_pipeline_writes_complete_artifact_set() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (mut df, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    assert_eq!(df.height(), 3);

    let options = PersistOptions {
        write_parquet: true,
        timestamp: Some("20230701_1200".to_string()),
    };
    let artifacts = persist_clean_data(&mut df, &stations, &output_dir, &options).unwrap();

    assert_eq!(
        dir_file_names(&output_dir),
        vec![
            "cleaned_data_20230701_1200.ipc",
            "cleaned_data_20230701_1200.parquet",
            "cleaned_data_latest.ipc",
            "cleaned_data_latest.parquet",
            "station_id_to_names_20230701_1200.bin",
            "station_id_to_names_20230701_1200.json",
            "station_id_to_names_latest.bin",
            "station_id_to_names_latest.json",
            "station_names_20230701_1200.bin",
            "station_names_latest.bin",
        ]
    );
    assert!(artifacts.parquet.is_written());
}

#[test]
fn snapshot_round_trip_reconstructs_loader_output() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (mut df, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    let options = PersistOptions {
        write_parquet: false,
        timestamp: None,
    };
    let artifacts = persist_clean_data(&mut df, &stations, &output_dir, &options).unwrap();

    let reloaded = IpcReader::new(File::open(&artifacts.cleaned_data_path).unwrap())
        .finish()
        .unwrap();
    assert_eq!(reloaded, df);

    // Row index survives the round trip
    let trip_ids = reloaded
        .column("trip_id")
        .unwrap()
        .as_materialized_series()
        .u32()
        .unwrap()
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    assert_eq!(trip_ids, vec![0, 1, 2]);
}

#[test]
fn station_mapping_json_matches_observed_variants() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (mut df, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    let options = PersistOptions {
        write_parquet: false,
        timestamp: None,
    };
    let artifacts = persist_clean_data(&mut df, &stations, &output_dir, &options).unwrap();

    let json: BTreeMap<String, Vec<String>> = serde_json::from_str(
        &std::fs::read_to_string(&artifacts.station_map_json_path).unwrap(),
    )
    .unwrap();

    // Station 3 is named both ways across the surviving trips
    assert_eq!(json["3"], vec!["King's Cross", "Kings X"]);
    assert_eq!(json["9"], vec!["Oval Way"]);
    assert_eq!(json["14"], vec!["Belgrove Street"]);
    assert_eq!(json.len(), stations.station_count());
}

#[test]
fn no_timestamp_produces_base_names_with_latest_copies() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (mut df, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    let options = PersistOptions {
        write_parquet: false,
        timestamp: None,
    };
    persist_clean_data(&mut df, &stations, &output_dir, &options).unwrap();

    assert_eq!(
        dir_file_names(&output_dir),
        vec![
            "cleaned_data.ipc",
            "cleaned_data_latest.ipc",
            "station_id_to_names.bin",
            "station_id_to_names.json",
            "station_id_to_names_latest.bin",
            "station_id_to_names_latest.json",
            "station_names.bin",
            "station_names_latest.bin",
        ]
    );
}

#[test]
fn parquet_disabled_leaves_required_artifacts_intact() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (mut df, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    let options = PersistOptions {
        write_parquet: false,
        timestamp: Some("20230701_1200".to_string()),
    };
    let artifacts = persist_clean_data(&mut df, &stations, &output_dir, &options).unwrap();

    assert_eq!(artifacts.parquet, ParquetOutcome::Disabled);
    assert!(artifacts.parquet.path().is_none());
    assert!(artifacts.cleaned_data_path.exists());
    assert!(artifacts.station_map_json_path.exists());
    for name in dir_file_names(&output_dir) {
        assert!(!name.ends_with(".parquet"), "unexpected file: {name}");
    }
}

#[test]
fn stations_only_mode_produces_exactly_two_binaries() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    let output_dir = temp_dir.path().join("data");
    seed_raw_data(&csv_dir);

    let (_, stations) = load_clean_data(&csv_dir, None, None, false).unwrap();
    persist_station_names(&stations, &output_dir, Some("20230701_1200")).unwrap();

    assert_eq!(
        dir_file_names(&output_dir),
        vec![
            "station_names_20230701_1200.bin",
            "station_names_latest.bin",
        ]
    );

    // The set-valued structure is preserved byte-for-byte reloadable
    let raw = std::fs::read(output_dir.join("station_names_latest.bin")).unwrap();
    let decoded: StationNameMap = bincode::deserialize(&raw).unwrap();
    assert_eq!(decoded, stations);
}

#[test]
fn file_cap_limits_processed_input() {
    let temp_dir = TempDir::new().unwrap();
    let csv_dir = temp_dir.path().join("csvs");
    seed_raw_data(&csv_dir);

    let (df_all, _) = load_clean_data(&csv_dir, None, None, false).unwrap();
    let (df_capped, _) = load_clean_data(&csv_dir, Some(1), None, false).unwrap();

    assert!(df_capped.height() < df_all.height());
}
