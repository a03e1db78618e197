use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Antibiotic, Observation};

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// What a column of the wide table holds. Names match case-insensitively;
/// `Bacteria` is accepted for the species column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Species,
    Mic(Antibiotic),
}

fn column_role(name: &str) -> Option<Column> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("species") || name.eq_ignore_ascii_case("bacteria") {
        return Some(Column::Species);
    }
    name.parse::<Antibiotic>().ok().map(Column::Mic)
}

/// Positions of the four required columns in a header list.
struct ColumnIndex {
    species: usize,
    mic: [usize; 3],
}

impl ColumnIndex {
    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut species = None;
        let mut mic = [None; 3];
        for (i, name) in names.into_iter().enumerate() {
            match column_role(name) {
                Some(Column::Species) => species = Some(i),
                Some(Column::Mic(a)) => mic[a as usize] = Some(i),
                None => {}
            }
        }
        let species = species.context("missing 'species' column")?;
        let mut resolved = [0usize; 3];
        for a in Antibiotic::ALL {
            resolved[a as usize] = mic[a as usize]
                .with_context(|| format!("missing '{}' column", a.name().to_lowercase()))?;
        }
        Ok(Self {
            species,
            mic: resolved,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the wide MIC table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one string column and three numeric columns
/// * `.json`    – `[{ "species": "...", "penicillin": 1.0, ... }, ...]`
/// * `.csv`     – header row, same four columns
///
/// Values are not validated here; non-positive MICs are rejected by
/// [`DatasetBuilder`](super::dataset::DatasetBuilder).
pub fn load_file(path: &Path) -> Result<Vec<Observation>> {
    match extension(path).as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Write observations to a file in the format given by its extension.
pub fn save_file(path: &Path, observations: &[Observation]) -> Result<()> {
    match extension(path).as_str() {
        "parquet" | "pq" => save_parquet(path, observations),
        "json" => save_json(path, observations),
        "csv" => save_csv(path, observations),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout `df.to_json(orient='records')` writes.
fn load_json(path: &Path) -> Result<Vec<Observation>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<Observation> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            let index = ColumnIndex::from_names(obj.keys().map(String::as_str))
                .with_context(|| format!("Row {i}"))?;
            let values: Vec<&JsonValue> = obj.values().collect();

            let species = values[index.species]
                .as_str()
                .with_context(|| format!("Row {i}: species is not a string"))?;
            let mic = |a: Antibiotic| -> Result<f64> {
                values[index.mic[a as usize]]
                    .as_f64()
                    .with_context(|| format!("Row {i}, {a}: not a number"))
            };
            Ok(Observation::new(
                species,
                mic(Antibiotic::Penicillin)?,
                mic(Antibiotic::Streptomycin)?,
                mic(Antibiotic::Neomycin)?,
            ))
        })
        .collect()
}

fn save_json(path: &Path, observations: &[Observation]) -> Result<()> {
    let text = serde_json::to_string_pretty(observations).context("serializing JSON")?;
    std::fs::write(path, text).context("writing JSON file")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index = ColumnIndex::from_names(headers.iter()).context("CSV header")?;

    let mut observations = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let species = record
            .get(index.species)
            .with_context(|| format!("CSV row {row_no}: missing species"))?;
        let mic = |a: Antibiotic| -> Result<f64> {
            let cell = record.get(index.mic[a as usize]).unwrap_or("");
            cell.trim()
                .parse::<f64>()
                .with_context(|| format!("CSV row {row_no}, {a}: '{cell}' is not a number"))
        };

        observations.push(Observation::new(
            species,
            mic(Antibiotic::Penicillin)?,
            mic(Antibiotic::Streptomycin)?,
            mic(Antibiotic::Neomycin)?,
        ));
    }

    Ok(observations)
}

fn save_csv(path: &Path, observations: &[Observation]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for obs in observations {
        writer.serialize(obs).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the wide table.
///
/// The species column may be Utf8 or LargeUtf8; MIC columns may be any
/// numeric type and are cast to Float64. Nulls are rejected.
fn load_parquet(path: &Path) -> Result<Vec<Observation>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut observations = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let index = ColumnIndex::from_names(schema.fields().iter().map(|f| f.name().as_str()))
            .context("parquet schema")?;

        let species_col = cast(batch.column(index.species), &DataType::Utf8)
            .context("species column is not text")?;
        let species = species_col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?;

        let mic_cols = Antibiotic::ALL
            .iter()
            .map(|a| {
                cast(batch.column(index.mic[*a as usize]), &DataType::Float64)
                    .with_context(|| format!("{a} column is not numeric"))
            })
            .collect::<Result<Vec<ArrayRef>>>()?;
        let mic_arrays = mic_cols
            .iter()
            .map(|c| {
                c.as_any()
                    .downcast_ref::<Float64Array>()
                    .context("expected Float64Array")
            })
            .collect::<Result<Vec<&Float64Array>>>()?;

        for row in 0..batch.num_rows() {
            if species.is_null(row) || mic_arrays.iter().any(|c| c.is_null(row)) {
                bail!("Row {row}: null value");
            }
            observations.push(Observation::new(
                species.value(row),
                mic_arrays[0].value(row),
                mic_arrays[1].value(row),
                mic_arrays[2].value(row),
            ));
        }
    }

    Ok(observations)
}

fn save_parquet(path: &Path, observations: &[Observation]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("penicillin", DataType::Float64, false),
        Field::new("streptomycin", DataType::Float64, false),
        Field::new("neomycin", DataType::Float64, false),
    ]));

    let species = StringArray::from(
        observations
            .iter()
            .map(|o| o.species.as_str())
            .collect::<Vec<_>>(),
    );
    let mut columns: Vec<ArrayRef> = vec![Arc::new(species)];
    for a in Antibiotic::ALL {
        let values: Vec<f64> = observations.iter().map(|o| o.mic(a)).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::embedded_observations;

    #[test]
    fn column_roles() {
        assert_eq!(column_role("Bacteria"), Some(Column::Species));
        assert_eq!(column_role("species"), Some(Column::Species));
        assert_eq!(column_role("NEOMYCIN"), Some(Column::Mic(Antibiotic::Neomycin)));
        assert_eq!(column_role("notes"), None);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = ColumnIndex::from_names(["species", "penicillin", "neomycin"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("streptomycin"), "{err}");
    }

    #[test]
    fn round_trips_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let observations = embedded_observations();
        for name in ["mic.csv", "mic.json", "mic.parquet"] {
            let path = dir.path().join(name);
            save_file(&path, &observations).unwrap();
            assert_eq!(load_file(&path).unwrap(), observations, "{name}");
        }
    }

    #[test]
    fn reads_dashboard_style_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.csv");
        std::fs::write(
            &path,
            "Bacteria,Penicillin,Streptomycin,Neomycin\nEscherichia coli,100,0.4,0.1\n",
        )
        .unwrap();
        let obs = load_file(&path).unwrap();
        assert_eq!(obs, vec![Observation::new("Escherichia coli", 100.0, 0.4, 0.1)]);
    }

    #[test]
    fn bad_cell_names_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "species,penicillin,streptomycin,neomycin\nX,1,lots,2\n").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("'lots' is not a number"), "{err:#}");
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
