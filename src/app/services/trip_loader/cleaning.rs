//! Header normalization and trip cleaning
//!
//! Bike-share operators have renamed their CSV columns repeatedly over the
//! years ("Rental Id" vs "Number", "StartStation Name" vs "Start station",
//! and so on). Each file is normalized to a canonical schema before the
//! per-file frames are concatenated diagonally, so files from different eras
//! can be cleaned with one set of expressions.

use crate::app::models::StationNameMap;
use crate::constants::{CSV_INFER_SCHEMA_LENGTH, TRIP_DATETIME_FORMATS, columns};
use crate::{Error, Result};
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

/// Map a raw CSV header to its canonical column name
///
/// Headers are compared case-insensitively with punctuation and whitespace
/// stripped, so "StartStation Id", "Start station number" and
/// "start_station_id" all land on the same canonical name.
pub fn canonical_column(raw: &str) -> Option<&'static str> {
    let key: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    match key.as_str() {
        "rentalid" | "number" => Some(columns::RENTAL_ID),
        "bikeid" | "bikenumber" => Some(columns::BIKE_ID),
        "duration" | "durationseconds" | "totalduration" => Some(columns::DURATION),
        "startdate" => Some(columns::START_DATE),
        "enddate" => Some(columns::END_DATE),
        "startstationid" | "startstationnumber" => Some(columns::START_STATION_ID),
        "startstationname" | "startstation" => Some(columns::START_STATION_NAME),
        "endstationid" | "endstationnumber" => Some(columns::END_STATION_ID),
        "endstationname" | "endstation" => Some(columns::END_STATION_NAME),
        _ => None,
    }
}

/// Read one raw trip CSV into an eager frame
pub fn read_trip_file(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(CSV_INFER_SCHEMA_LENGTH))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| Error::csv_load(path.display().to_string(), e.to_string()))
}

/// Normalize a raw frame to the canonical column set
///
/// Unrecognized columns are dropped. A file that lacks any of the required
/// columns after mapping is rejected with the file named in the error.
pub fn normalize_columns(df: DataFrame, path: &Path) -> Result<LazyFrame> {
    let mut selected = Vec::new();
    let mut seen: BTreeSet<&'static str> = BTreeSet::new();

    for name in df.get_column_names() {
        if let Some(canonical) = canonical_column(name.as_str()) {
            // First matching header wins when a file repeats a column
            if seen.insert(canonical) {
                selected.push(col(name.as_str()).alias(canonical));
            }
        }
    }

    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|c| !seen.contains(c))
        .collect();
    if !missing.is_empty() {
        return Err(Error::csv_load(
            path.display().to_string(),
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    Ok(df.lazy().select(selected))
}

/// Parse a raw date column, trying each known export format in order
fn parse_datetime(name: &str) -> Expr {
    let strptime = |format: &str| {
        col(name).cast(DataType::String).str().to_datetime(
            Some(TimeUnit::Milliseconds),
            None,
            StrptimeOptions {
                format: Some(format.into()),
                strict: false,
                exact: true,
                cache: true,
            },
            lit("raise"),
        )
    };

    let mut expr = strptime(TRIP_DATETIME_FORMATS[0]);
    for format in &TRIP_DATETIME_FORMATS[1..] {
        expr = expr.fill_null(strptime(format));
    }
    expr.alias(name)
}

/// Concatenate normalized per-file frames and apply the cleaning rules
///
/// Cleaning drops rows with unparseable timestamps, missing station ids or
/// names, non-positive durations, or an end time before the start time, then
/// attaches the `trip_id` row index over the surviving rows.
pub fn clean_trips(frames: Vec<LazyFrame>) -> Result<DataFrame> {
    let lf = concat_lf_diagonal(frames, UnionArgs::default())?;

    let df = lf
        .with_columns([
            parse_datetime(columns::START_DATE),
            parse_datetime(columns::END_DATE),
        ])
        .with_columns([
            col(columns::START_STATION_ID).cast(DataType::Int64),
            col(columns::END_STATION_ID).cast(DataType::Int64),
            col(columns::DURATION).cast(DataType::Int64),
        ])
        .drop_nulls(Some(vec![
            col(columns::START_DATE),
            col(columns::END_DATE),
            col(columns::START_STATION_ID),
            col(columns::START_STATION_NAME),
            col(columns::END_STATION_ID),
            col(columns::END_STATION_NAME),
            col(columns::DURATION),
        ]))
        .filter(col(columns::DURATION).gt(lit(0)))
        .filter(col(columns::END_DATE).gt_eq(col(columns::START_DATE)))
        .with_row_index(columns::TRIP_ID, None)
        .collect()?;

    Ok(df)
}

/// Collect every station name variant from both station column pairs
pub fn extract_station_names(df: &DataFrame) -> Result<StationNameMap> {
    let mut map = StationNameMap::new();

    for (id_col, name_col) in [
        (columns::START_STATION_ID, columns::START_STATION_NAME),
        (columns::END_STATION_ID, columns::END_STATION_NAME),
    ] {
        let ids = df.column(id_col)?.as_materialized_series().i64()?;
        let names = df.column(name_col)?.as_materialized_series().str()?;

        for (id, name) in ids.into_iter().zip(names) {
            if let (Some(id), Some(name)) = (id, name) {
                let name = name.trim();
                if !name.is_empty() {
                    map.record(id, name);
                }
            }
        }
    }

    Ok(map)
}
