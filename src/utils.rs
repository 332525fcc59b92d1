//! Utility routines for loading and storing data into files.
use ndarray::prelude::*;
use std::f64;
use std::fs;
use std::path::Path;
use std::error::Error;
use std::collections::BTreeMap;
use csv::{Reader, Writer, WriterBuilder};

use analysis::{AnalysisReport, AnalysisResult};
use table::{Attribute, AttributeKind, InformationTable, Preference};


#[derive(Deserialize)]
struct AttributeRecord {
    name: String,
    kind: String,
    preference: String,
}

/// Loads the attribute metadata file.
///
/// The file has a header `name,kind,preference` and one row per
/// condition attribute, in the order of the data file's columns:
///     price, numeric, cost
/// where kind is `numeric` or `nominal`, and preference is `gain`,
/// `cost` or `none`.
pub fn load_metadata<P: AsRef<Path>>(fname: P) -> Result<Vec<Attribute>, Box<dyn Error>> {
    let mut reader = Reader::from_path(fname)?;
    let mut attributes = vec![];

    for result in reader.deserialize() {
        let record: AttributeRecord = result?;
        let kind = match record.kind.trim() {
            "numeric" => AttributeKind::Numeric,
            "nominal" => AttributeKind::Nominal,
            other => return Err(format!("Unknown kind of attribute {}: {}",
                                        record.name, other).into()),
        };
        let preference = match record.preference.trim() {
            "gain" => Preference::Gain,
            "cost" => Preference::Cost,
            "none" | "" => Preference::None,
            other => return Err(format!("Unknown preference of attribute {}: {}",
                                        record.name, other).into()),
        };
        attributes.push(Attribute {
            name: record.name.trim().to_string(),
            kind: kind,
            preference: preference,
        });
    }

    Ok(attributes)
}

/// Loads a table from a metadata file and a CSV data file.
///
/// The data file has a header, and then for each row:
///     decision, x1, x2, ...
/// where the decision is a non-negative integer and x1, x2, ... are
/// the values of the attributes described in the metadata file. `?`
/// or an empty field marks a missing value. Nominal values are coded
/// by order of first appearance.
pub fn load_table<P, Q>(metadata_fname: P, data_fname: Q) -> Result<InformationTable, Box<dyn Error>>
        where P: AsRef<Path>, Q: AsRef<Path> {
    let attributes = load_metadata(metadata_fname)?;
    let d = attributes.len();
    let mut reader = Reader::from_path(data_fname)?;

    let mut values: Vec<f64> = Vec::new();
    let mut decisions: Vec<usize> = Vec::new();
    let mut codes: Vec<BTreeMap<String, usize>> = vec![BTreeMap::new(); d];

    for result in reader.records() {
        let record = result?;
        if record.len() != d + 1 {
            return Err(format!("Row {} has {} fields, expected {}",
                               decisions.len() + 1, record.len(), d + 1).into());
        }

        decisions.push(record[0].trim().parse::<usize>()?);

        for (a, field) in record.iter().skip(1).enumerate() {
            let field = field.trim();
            let value = if field.is_empty() || field == "?" {
                f64::NAN
            } else if attributes[a].is_nominal() {
                let next = codes[a].len();
                *codes[a].entry(field.to_string()).or_insert(next) as f64
            } else {
                field.parse::<f64>()?
            };
            values.push(value);
        }
    }

    let n = decisions.len();
    let values = Array::from_shape_vec((n, d), values)?;
    let table = InformationTable::new(attributes, values, Array::from_vec(decisions))?;

    Ok(table)
}

/// Stores the labels of an analysis result into a CSV file.
///
/// The file has a header `index,label,minority_decision,majority_decision`
/// and one row per record.
pub fn store_result<P: AsRef<Path>>(result: &AnalysisResult, fname: P) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(fname)?;

    writer.write_record(&["index", "label", "minority_decision", "majority_decision"])?;
    for r in result.records() {
        writer.write_record(&[r.index.to_string(),
                              r.label.name().to_string(),
                              r.minority_decision.to_string(),
                              r.majority_decision.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Stores every result of a report into `<dir>/<name>.csv`, creating
/// `dir` if needed.
pub fn store_report<P: AsRef<Path>>(report: &AnalysisReport, dir: P) -> Result<(), Box<dyn Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    for (name, result) in report.iter() {
        store_result(result, dir.join(format!("{}.csv", name)))?;
    }

    Ok(())
}

/// Stores bootstrap samples into a CSV file, one sample per line.
pub fn store_samples<P: AsRef<Path>>(samples: &[Vec<usize>], fname: P) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new()
                                   .flexible(true)
                                   .from_path(fname)?;

    for sample in samples {
        writer.write_record(sample.iter()
                                  .map(|i| i.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
