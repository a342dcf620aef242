use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, DatasetError,
    LaunchDataset, LaunchRecord, Outcome, REQUIRED_COLUMNS, parse_payload,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – the same four columns
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading dataset {}", path.display()))?;

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("loading dataset {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} sites {:?}, payload {:.0}..={:.0} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.sites(),
        dataset.payload_min(),
        dataset.payload_max()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row restricted to the columns we use; everything else in the
/// file (flight number, mission outcome, ...) is ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: String,
    #[serde(rename = "class")]
    class: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DatasetError::MissingColumn(required.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let payload = parse_payload(&row.payload_mass, row_no)?;
        let outcome = Outcome::parse_class(&row.class, row_no)?;
        records.push(LaunchRecord::new(
            row_no,
            row.launch_site,
            payload,
            outcome,
            row.booster_version_category,
        )?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2296.0,
///     "class": 1,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &str| {
            obj.get(name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let site = json_string(field(COL_LAUNCH_SITE)?, i, COL_LAUNCH_SITE)?;
        let category = json_string(field(COL_BOOSTER_CATEGORY)?, i, COL_BOOSTER_CATEGORY)?;

        let payload_val = field(COL_PAYLOAD_MASS)?;
        let payload = match payload_val {
            JsonValue::Number(n) => n.as_f64().ok_or_else(|| DatasetError::InvalidPayload {
                row: i,
                value: n.to_string(),
            })?,
            JsonValue::String(s) => parse_payload(s, i)?,
            other => {
                return Err(DatasetError::InvalidPayload {
                    row: i,
                    value: other.to_string(),
                }
                .into());
            }
        };

        let outcome = match field(COL_CLASS)? {
            JsonValue::Bool(b) => Outcome::from_bool(*b),
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => Outcome::from_class_number(v, i)?,
                None => Outcome::parse_class(&n.to_string(), i)?,
            },
            JsonValue::String(s) => Outcome::parse_class(s, i)?,
            other => Outcome::parse_class(&other.to_string(), i)?,
        };

        records.push(LaunchRecord::new(i, site, payload, outcome, category)?);
    }

    Ok(records)
}

fn json_string(val: &JsonValue, row: usize, col: &str) -> Result<String> {
    val.as_str()
        .map(str::to_string)
        .with_context(|| format!("Row {row}: '{col}' is not a string"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four launch columns.  Works with files
/// written by **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`); extra columns are ignored.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = column(&batch, COL_PAYLOAD_MASS)?;
        let class_col = column(&batch, COL_CLASS)?;
        let category_col = column(&batch, COL_BOOSTER_CATEGORY)?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let site = string_cell(site_col, i, COL_LAUNCH_SITE)
                .with_context(|| format!("Row {row}"))?;
            let category = string_cell(category_col, i, COL_BOOSTER_CATEGORY)
                .with_context(|| format!("Row {row}"))?;
            let payload = number_cell(payload_col, i, COL_PAYLOAD_MASS)
                .with_context(|| format!("Row {row}"))?;
            let outcome = if class_col.data_type() == &DataType::Boolean {
                if class_col.is_null(i) {
                    bail!("Row {row}: null value in '{COL_CLASS}'");
                }
                Outcome::from_bool(class_col.as_boolean().value(i))
            } else {
                let v = number_cell(class_col, i, COL_CLASS).with_context(|| format!("Row {row}"))?;
                Outcome::from_class_number(v, row)?
            };

            records.push(LaunchRecord::new(row, site, payload, outcome, category)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DatasetError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn string_cell(col: &ArrayRef, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("'{name}' has type {other:?}, expected Utf8"),
    }
}

fn number_cell(col: &ArrayRef, row: usize, name: &str) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        other => bail!("'{name}' has type {other:?}, expected a numeric column"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    /// Root cause of an error chain as a `DatasetError`, if it is one.
    fn dataset_error(err: &anyhow::Error) -> Option<&DatasetError> {
        err.chain().find_map(|e| e.downcast_ref::<DatasetError>())
    }

    const SPACEX_CSV: &str = "\
,Flight Number,Launch Site,Mission Outcome,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,Success,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,Success,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,Success,0,525.0,F9 v1.0  B0005,v1.0
3,49,KSC LC-39A,Success,1,2490.0,F9 FT B1031.1,FT
4,12,VAFB SLC-4E,Success,1,500.0,F9 v1.1  B1003,v1.1
5,34,CCAFS SLC-40,Success,1,3600.0,F9 FT B1037.1,FT
";

    #[test]
    fn csv_with_extra_columns() {
        let file = write_temp(".csv", SPACEX_CSV);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(
            ds.sites(),
            ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
        assert_eq!(ds.booster_categories(), ["FT", "v1.0", "v1.1"]);
        assert_eq!(ds.payload_min(), 0.0);
        assert_eq!(ds.payload_max(), 3600.0);

        let first = &ds.records()[3];
        assert_eq!(first.launch_site, "KSC LC-39A");
        assert_eq!(first.payload_mass_kg, 2490.0);
        assert_eq!(first.outcome, Outcome::Success);
        assert_eq!(first.booster_version_category, "FT");
    }

    #[test]
    fn csv_cells_are_trimmed() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
             CCAFS LC-40,500,1,FT\n\
             \" CCAFS LC-40\",2000, 0,\"FT \"\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.sites(), ["CCAFS LC-40"]);
        assert_eq!(ds.booster_categories(), ["FT"]);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn csv_missing_column_is_named() {
        let file = write_temp(".csv", "Launch Site,class,Booster Version Category\nA,1,FT\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            dataset_error(&err),
            Some(&DatasetError::MissingColumn("Payload Mass (kg)".into()))
        );
    }

    #[test]
    fn csv_bad_class_reports_row() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1,FT\nA,20,yes,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            dataset_error(&err),
            Some(&DatasetError::InvalidClass {
                row: 1,
                value: "yes".into()
            })
        );
    }

    #[test]
    fn csv_negative_payload_is_rejected() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            Some(DatasetError::InvalidPayload { row: 0, .. })
        ));
    }

    #[test]
    fn csv_without_rows_is_empty_error() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(dataset_error(&err), Some(&DatasetError::Empty));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("spacex_launch_dash.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            dataset_error(&err),
            Some(&DatasetError::UnsupportedExtension("xlsx".into()))
        );
    }

    #[test]
    fn json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600.0, "class": false, "Booster Version Category": "B4"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.payload_max(), 9600.0);
    }

    #[test]
    fn json_missing_field() {
        let file = write_temp(
            ".json",
            r#"[{"Launch Site": "KSC LC-39A", "class": 1, "Booster Version Category": "FT"}]"#,
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            dataset_error(&err),
            Some(&DatasetError::MissingColumn("Payload Mass (kg)".into()))
        );
    }

    #[test]
    fn parquet_records() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new("Flight Number", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![677.0, 3136.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1.1", "FT"])),
                Arc::new(Int64Array::from(vec![7, 40])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].payload_mass_kg, 3136.0);
    }

    #[test]
    fn parquet_boolean_class_and_missing_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Boolean, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40"])),
                Arc::new(Float64Array::from(vec![677.0])),
                Arc::new(BooleanArray::from(vec![true])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            dataset_error(&err),
            Some(&DatasetError::MissingColumn(COL_BOOSTER_CATEGORY.into()))
        );
    }
}
