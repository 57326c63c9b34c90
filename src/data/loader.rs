use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CollisionDataset, CollisionRecord};

/// Default dataset location, relative to the working directory.
pub const DATA_PATH: &str = "data/collisions.csv";

/// Row limit used for the initial load.
pub const DEFAULT_ROW_LIMIT: usize = 100_000;

// Source column names after lowercasing. Header matching is
// case-insensitive in every format.
pub const COL_DATE: &str = "crash date";
pub const COL_TIME: &str = "crash time";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_PERSONS: &str = "number of persons injured";
pub const COL_PEDESTRIANS: &str = "number of pedestrians injured";
pub const COL_CYCLISTS: &str = "number of cyclist injured";
pub const COL_MOTORISTS: &str = "number of motorist injured";
pub const COL_STREET: &str = "on street name";

/// Violations of the expected table shape.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a collision dataset from a file, reading at most `limit` source rows.
/// Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the NYC open-data export format (recommended)
/// * `.json`    – records-oriented array of objects with the same columns
/// * `.parquet` – flat columnar file with the same columns
///
/// All formats share the load semantics: at most `limit` rows are read, rows
/// without usable coordinates are dropped, blank injury counts parse as 0,
/// blank street names as `None`. Malformed cells abort the load.
pub fn load_file(path: &Path, limit: usize) -> Result<CollisionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, limit),
        "json" => load_json(path, limit),
        "parquet" | "pq" => load_parquet(path, limit),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Combine the source's separate date and time cells into one timestamp.
/// Dates are `MM/DD/YYYY`; times are `H:MM` or `H:MM:SS`.
fn parse_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%m/%d/%Y")
        .with_context(|| format!("'{date}' is not a MM/DD/YYYY date"))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .with_context(|| format!("'{time}' is not a HH:MM[:SS] time"))?;
    Ok(NaiveDateTime::new(date, time))
}

/// A coordinate cell: blank and non-finite values count as missing (the row
/// is dropped), anything unparsable is a load error.
fn parse_coord(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("'{s}' is not a coordinate"))?;
    Ok(v.is_finite().then_some(v))
}

/// An injury-count cell: blank parses as 0. Accepts the float spelling
/// (`"1.0"`) that Pandas re-exports produce.
fn parse_count(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = s.parse::<u32>() {
        return Ok(n);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("'{s}' is not an injury count"))?;
    if v < 0.0 || v.fract() != 0.0 || !v.is_finite() {
        bail!("'{s}' is not an injury count");
    }
    Ok(v as u32)
}

fn parse_street(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, limit: usize) -> Result<CollisionDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    // Lowercase the header row once, then address cells by index.
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    let col = |name: &str| -> Result<usize, SchemaError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    };

    let date_idx = col(COL_DATE)?;
    let time_idx = col(COL_TIME)?;
    let lat_idx = col(COL_LATITUDE)?;
    let lon_idx = col(COL_LONGITUDE)?;
    let persons_idx = col(COL_PERSONS)?;
    let pedestrians_idx = col(COL_PEDESTRIANS)?;
    let cyclists_idx = col(COL_CYCLISTS)?;
    let motorists_idx = col(COL_MOTORISTS)?;
    let street_idx = col(COL_STREET)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().take(limit).enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let ctx = || format!("CSV row {row_no}");
        let latitude = parse_coord(cell(lat_idx)).with_context(ctx)?;
        let longitude = parse_coord(cell(lon_idx)).with_context(ctx)?;
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            continue;
        };

        records.push(CollisionRecord {
            datetime: parse_datetime(cell(date_idx), cell(time_idx)).with_context(ctx)?,
            latitude,
            longitude,
            persons_injured: parse_count(cell(persons_idx)).with_context(ctx)?,
            pedestrians_injured: parse_count(cell(pedestrians_idx)).with_context(ctx)?,
            cyclists_injured: parse_count(cell(cyclists_idx)).with_context(ctx)?,
            motorists_injured: parse_count(cell(motorists_idx)).with_context(ctx)?,
            street: parse_street(cell(street_idx)),
        });
    }

    Ok(CollisionDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "crash date": "06/15/2021",
///     "crash time": "8:15",
///     "latitude": 40.7128,
///     "longitude": -74.006,
///     "number of persons injured": 1,
///     ...
///     "on street name": "BROADWAY"
///   },
///   ...
/// ]
/// ```
///
/// Keys are matched case-insensitively; coordinates and counts may also be
/// spelled as strings, as some portal exports do.
fn load_json(path: &Path, limit: usize) -> Result<CollisionDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::new();

    for (row_no, rec) in rows.iter().take(limit).enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {row_no} is not a JSON object"))?;
        let fields: BTreeMap<String, &JsonValue> = obj
            .iter()
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v))
            .collect();

        let ctx = || format!("JSON row {row_no}");

        let latitude = json_coord(fields.get(COL_LATITUDE).copied()).with_context(ctx)?;
        let longitude = json_coord(fields.get(COL_LONGITUDE).copied()).with_context(ctx)?;
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            continue;
        };

        let date = json_text(&fields, COL_DATE, row_no)?;
        let time = json_text(&fields, COL_TIME, row_no)?;

        records.push(CollisionRecord {
            datetime: parse_datetime(&date, &time).with_context(ctx)?,
            latitude,
            longitude,
            persons_injured: json_count(fields.get(COL_PERSONS).copied()).with_context(ctx)?,
            pedestrians_injured: json_count(fields.get(COL_PEDESTRIANS).copied())
                .with_context(ctx)?,
            cyclists_injured: json_count(fields.get(COL_CYCLISTS).copied()).with_context(ctx)?,
            motorists_injured: json_count(fields.get(COL_MOTORISTS).copied()).with_context(ctx)?,
            street: fields
                .get(COL_STREET)
                .and_then(|v| v.as_str())
                .and_then(parse_street),
        });
    }

    Ok(CollisionDataset::from_records(records))
}

fn json_text(fields: &BTreeMap<String, &JsonValue>, name: &str, row_no: usize) -> Result<String> {
    fields
        .get(name)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .with_context(|| format!("JSON row {row_no}: missing or non-string '{name}'"))
}

fn json_coord(val: Option<&JsonValue>) -> Result<Option<f64>> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64().filter(|v| v.is_finite())),
        Some(JsonValue::String(s)) => parse_coord(s),
        Some(other) => bail!("'{other}' is not a coordinate"),
    }
}

fn json_count(val: Option<&JsonValue>) -> Result<u32> {
    match val {
        None | Some(JsonValue::Null) => Ok(0),
        Some(JsonValue::Number(n)) => {
            let v = n.as_f64().context("non-numeric injury count")?;
            if v < 0.0 || v.fract() != 0.0 {
                bail!("'{v}' is not an injury count");
            }
            Ok(v as u32)
        }
        Some(JsonValue::String(s)) => parse_count(s),
        Some(other) => bail!("'{other}' is not an injury count"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the collision table.
///
/// Expected schema: the CSV columns as flat fields. Utf8 dates, times, and
/// street names; Float64 coordinates; integer or Float64 injury counts (the
/// latter is what Pandas writes for nullable count columns).
fn load_parquet(path: &Path, limit: usize) -> Result<CollisionDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut seen = 0usize;

    'batches: for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let idx_of = |name: &str| -> Result<usize, SchemaError> {
            schema
                .fields()
                .iter()
                .position(|f| f.name().trim().to_ascii_lowercase() == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };

        let date_col = batch.column(idx_of(COL_DATE)?);
        let time_col = batch.column(idx_of(COL_TIME)?);
        let lat_col = batch.column(idx_of(COL_LATITUDE)?);
        let lon_col = batch.column(idx_of(COL_LONGITUDE)?);
        let persons_col = batch.column(idx_of(COL_PERSONS)?);
        let pedestrians_col = batch.column(idx_of(COL_PEDESTRIANS)?);
        let cyclists_col = batch.column(idx_of(COL_CYCLISTS)?);
        let motorists_col = batch.column(idx_of(COL_MOTORISTS)?);
        let street_col = batch.column(idx_of(COL_STREET)?);

        for row in 0..batch.num_rows() {
            if seen == limit {
                break 'batches;
            }
            seen += 1;

            let ctx = || format!("Parquet row {}", seen - 1);

            let latitude = float_at(lat_col, row).with_context(ctx)?;
            let longitude = float_at(lon_col, row).with_context(ctx)?;
            let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
                continue;
            };

            let date = string_at(date_col, row)
                .with_context(ctx)?
                .with_context(|| format!("Parquet row {}: missing '{COL_DATE}'", seen - 1))?;
            let time = string_at(time_col, row)
                .with_context(ctx)?
                .with_context(|| format!("Parquet row {}: missing '{COL_TIME}'", seen - 1))?;

            records.push(CollisionRecord {
                datetime: parse_datetime(&date, &time).with_context(ctx)?,
                latitude,
                longitude,
                persons_injured: count_at(persons_col, row).with_context(ctx)?,
                pedestrians_injured: count_at(pedestrians_col, row).with_context(ctx)?,
                cyclists_injured: count_at(cyclists_col, row).with_context(ctx)?,
                motorists_injured: count_at(motorists_col, row).with_context(ctx)?,
                street: string_at(street_col, row)
                    .with_context(ctx)?
                    .as_deref()
                    .and_then(parse_street),
            });
        }
    }

    Ok(CollisionDataset::from_records(records))
}

// -- Arrow column helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(Some(arr.value(row).to_string()))
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            arr.value(row)
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            arr.value(row) as f64
        }
        other => bail!("expected a float column, got {other:?}"),
    };
    Ok(v.is_finite().then_some(v))
}

fn count_at(col: &Arc<dyn Array>, row: usize) -> Result<u32> {
    if col.is_null(row) {
        return Ok(0);
    }
    let v = match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            arr.value(row) as f64
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            arr.value(row) as f64
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            arr.value(row) as f64
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            arr.value(row)
        }
        other => bail!("expected an integer or float column, got {other:?}"),
    };
    if v < 0.0 || v.fract() != 0.0 || !v.is_finite() {
        bail!("'{v}' is not an injury count");
    }
    Ok(v as u32)
}

// ---------------------------------------------------------------------------
// LoadCache – memoized loading keyed by row limit
// ---------------------------------------------------------------------------

/// Explicit memoization of [`load_file`] keyed by the row-limit parameter.
///
/// Entries live for the whole session. Pointing the cache at a different
/// file resets it.
pub struct LoadCache {
    path: PathBuf,
    entries: BTreeMap<usize, Arc<CollisionDataset>>,
}

impl LoadCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LoadCache {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Switch the cache to a different source file, discarding cached tables.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path != self.path {
            self.path = path;
            self.entries.clear();
        }
    }

    /// The dataset for `limit` rows, loading it on the first request.
    pub fn get(&mut self, limit: usize) -> Result<Arc<CollisionDataset>> {
        if let Some(ds) = self.entries.get(&limit) {
            return Ok(ds.clone());
        }
        let ds = Arc::new(load_file(&self.path, limit)?);
        self.entries.insert(limit, ds.clone());
        Ok(ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "CRASH DATE,CRASH TIME,LATITUDE,LONGITUDE,\
NUMBER OF PERSONS INJURED,NUMBER OF PEDESTRIANS INJURED,\
NUMBER OF CYCLIST INJURED,NUMBER OF MOTORIST INJURED,ON STREET NAME";

    fn write_named(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_drops_rows_without_coordinates() {
        let csv = format!(
            "{HEADER}\n\
             06/15/2021,8:15,40.7128,-74.0060,1,1,0,0,BROADWAY\n\
             06/15/2021,8:30,,,2,0,1,1,ATLANTIC AVENUE\n\
             06/16/2021,17:05,40.6782,-73.9442,0,0,0,0,FLATBUSH AVENUE\n"
        );
        let file = write_named(".csv", &csv);
        let ds = load_file(file.path(), 100).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds
            .records
            .iter()
            .all(|r| r.latitude.is_finite() && r.longitude.is_finite()));
    }

    #[test]
    fn csv_respects_row_limit() {
        let mut csv = String::from(HEADER);
        for i in 0..10 {
            csv.push_str(&format!(
                "\n06/15/2021,{i}:00,40.7,-74.0,0,0,0,0,BROADWAY"
            ));
        }
        let file = write_named(".csv", &csv);
        let ds = load_file(file.path(), 4).unwrap();
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn csv_combines_date_and_time() {
        let csv = format!("{HEADER}\n06/15/2021,8:15,40.7128,-74.0060,1,1,0,0,BROADWAY\n");
        let file = write_named(".csv", &csv);
        let ds = load_file(file.path(), 100).unwrap();
        let r = &ds.records[0];
        assert_eq!(r.hour(), 8);
        assert_eq!(r.minute(), 15);
        assert_eq!(r.datetime.format("%Y-%m-%d").to_string(), "2021-06-15");
    }

    #[test]
    fn csv_headers_match_case_insensitively() {
        let csv = "crash date,Crash Time,latitude,Longitude,\
number of persons injured,NUMBER OF PEDESTRIANS INJURED,\
number of cyclist injured,number of motorist injured,On Street Name\n\
06/15/2021,8:15,40.7,-74.0,1,0,0,1,BROADWAY\n";
        let file = write_named(".csv", csv);
        let ds = load_file(file.path(), 100).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].motorists_injured, 1);
    }

    #[test]
    fn csv_blank_counts_parse_as_zero_and_blank_street_as_none() {
        let csv = format!("{HEADER}\n06/15/2021,8:15,40.7,-74.0,,,,,\n");
        let file = write_named(".csv", &csv);
        let ds = load_file(file.path(), 100).unwrap();
        let r = &ds.records[0];
        assert_eq!(r.persons_injured, 0);
        assert_eq!(r.pedestrians_injured, 0);
        assert_eq!(r.street, None);
    }

    #[test]
    fn csv_malformed_date_is_an_error() {
        let csv = format!("{HEADER}\n2021-06-15,8:15,40.7,-74.0,0,0,0,0,BROADWAY\n");
        let file = write_named(".csv", &csv);
        assert!(load_file(file.path(), 100).is_err());
    }

    #[test]
    fn csv_missing_column_is_a_schema_error() {
        let csv = "CRASH DATE,CRASH TIME,LATITUDE,LONGITUDE\n06/15/2021,8:15,40.7,-74.0\n";
        let file = write_named(".csv", csv);
        let err = load_file(file.path(), 100).unwrap_err();
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_named(".xlsx", "not a table");
        assert!(load_file(file.path(), 100).is_err());
    }

    #[test]
    fn json_loads_the_same_schema() {
        let json = r#"[
            {"crash date": "06/15/2021", "crash time": "8:15",
             "latitude": 40.7128, "longitude": -74.006,
             "number of persons injured": 2,
             "number of pedestrians injured": "1",
             "number of cyclist injured": null,
             "number of motorist injured": 1,
             "on street name": "BROADWAY"},
            {"crash date": "06/15/2021", "crash time": "9:00",
             "latitude": null, "longitude": -73.9,
             "number of persons injured": 0,
             "number of pedestrians injured": 0,
             "number of cyclist injured": 0,
             "number of motorist injured": 0,
             "on street name": null}
        ]"#;
        let file = write_named(".json", json);
        let ds = load_file(file.path(), 100).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.persons_injured, 2);
        assert_eq!(r.pedestrians_injured, 1);
        assert_eq!(r.cyclists_injured, 0);
        assert_eq!(r.street.as_deref(), Some("BROADWAY"));
    }

    #[test]
    fn json_respects_row_limit() {
        let json = r#"[
            {"crash date": "06/15/2021", "crash time": "8:15",
             "latitude": 40.7, "longitude": -74.0,
             "number of persons injured": 0,
             "number of pedestrians injured": 0,
             "number of cyclist injured": 0,
             "number of motorist injured": 0,
             "on street name": "BROADWAY"},
            {"crash date": "06/15/2021", "crash time": "9:00",
             "latitude": 40.7, "longitude": -74.0,
             "number of persons injured": 0,
             "number of pedestrians injured": 0,
             "number of cyclist injured": 0,
             "number of motorist injured": 0,
             "on street name": "BROADWAY"}
        ]"#;
        let file = write_named(".json", json);
        let ds = load_file(file.path(), 1).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn parquet_loads_the_same_schema() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("CRASH DATE", DataType::Utf8, false),
            Field::new("CRASH TIME", DataType::Utf8, false),
            Field::new("LATITUDE", DataType::Float64, true),
            Field::new("LONGITUDE", DataType::Float64, true),
            Field::new("NUMBER OF PERSONS INJURED", DataType::Int64, true),
            Field::new("NUMBER OF PEDESTRIANS INJURED", DataType::Int64, true),
            Field::new("NUMBER OF CYCLIST INJURED", DataType::Int64, true),
            Field::new("NUMBER OF MOTORIST INJURED", DataType::Int64, true),
            Field::new("ON STREET NAME", DataType::Utf8, true),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["06/15/2021", "06/15/2021"])),
                Arc::new(StringArray::from(vec!["8:15", "17:40"])),
                Arc::new(Float64Array::from(vec![Some(40.7128), None])),
                Arc::new(Float64Array::from(vec![Some(-74.006), Some(-73.9)])),
                Arc::new(Int64Array::from(vec![Some(1), Some(0)])),
                Arc::new(Int64Array::from(vec![Some(1), None])),
                Arc::new(Int64Array::from(vec![Some(0), Some(0)])),
                Arc::new(Int64Array::from(vec![Some(0), Some(0)])),
                Arc::new(StringArray::from(vec![Some("BROADWAY"), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path(), 100).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.hour(), 8);
        assert_eq!(r.pedestrians_injured, 1);
        assert_eq!(r.street.as_deref(), Some("BROADWAY"));
    }

    #[test]
    fn cache_returns_the_same_table_for_the_same_limit() {
        let csv = format!("{HEADER}\n06/15/2021,8:15,40.7,-74.0,0,0,0,0,BROADWAY\n");
        let file = write_named(".csv", &csv);
        let mut cache = LoadCache::new(file.path());

        let a = cache.get(10).unwrap();
        let b = cache.get(10).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let c = cache.get(5).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn cache_resets_when_pointed_at_a_new_file() {
        let csv_a = format!("{HEADER}\n06/15/2021,8:15,40.7,-74.0,0,0,0,0,BROADWAY\n");
        let csv_b = format!(
            "{HEADER}\n06/15/2021,8:15,40.7,-74.0,0,0,0,0,BROADWAY\n\
             06/15/2021,9:15,40.8,-73.9,0,0,0,0,BROADWAY\n"
        );
        let file_a = write_named(".csv", &csv_a);
        let file_b = write_named(".csv", &csv_b);

        let mut cache = LoadCache::new(file_a.path());
        assert_eq!(cache.get(10).unwrap().len(), 1);

        cache.set_path(file_b.path());
        assert_eq!(cache.get(10).unwrap().len(), 2);
    }
}
