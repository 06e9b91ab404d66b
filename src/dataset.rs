// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Loading benchmark result files and pulling numeric columns out of them.
//!
//! A result file is a JSON array of flat objects, one per benchmark run:
//!
//! ```json
//! [{"label": "tight_bind", "terminals": 4, "tpm": 300.0, "percent_cached_tuple": 25}]
//! ```

use crate::Error;

use serde_json::{Map, Value};

use std::path::{Path, PathBuf};

/// One benchmark run, as read from a result file.
#[derive(Clone, Debug)]
pub struct Record {
    index: usize,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(index: usize, fields: Map<String, Value>) -> Self {
        Self { index, fields }
    }

    /// Position of the record within its file.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.fields.get(attribute)
    }

    pub fn label(&self) -> Option<&str> {
        self.get("label").and_then(Value::as_str)
    }
}

/// Predicate matching records whose `label` equals `label`.
pub fn label_is(label: &str) -> impl Fn(&Record) -> bool + '_ {
    move |record| record.label() == Some(label)
}

/// Parallel numeric columns, one per requested attribute, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl Columns {
    fn with_attributes(attributes: &[&str]) -> Self {
        Self {
            names: attributes.iter().map(|a| (*a).to_owned()).collect(),
            values: vec![Vec::new(); attributes.len()],
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&[f64]> {
        self.position(attribute).map(|i| self.values[i].as_slice())
    }

    /// Removes and returns the column for `attribute`.
    pub fn take(&mut self, attribute: &str) -> Option<Vec<f64>> {
        let i = self.position(attribute)?;
        self.names.remove(i);
        Some(self.values.remove(i))
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.values.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, attribute: &str) -> Option<usize> {
        self.names.iter().position(|name| name == attribute)
    }
}

/// Reads every record of a result file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, Error> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_records(path, &content)
}

fn parse_records(path: &Path, content: &str) -> Result<Vec<Record>, Error> {
    let value: Value = serde_json::from_str(content).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })?;

    let rows = match value {
        Value::Array(rows) => rows,
        _ => {
            return Err(Error::NotAnArray {
                path: path.to_owned(),
            })
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => Ok(Record::new(index, fields)),
            _ => Err(Error::NotAnObject {
                path: path.to_owned(),
                index,
            }),
        })
        .collect()
}

/// Extracts `attributes` from the records accepted by `filter`.
///
/// `path` is only used to name the source in errors.
pub fn extract<F>(
    path: &Path,
    records: &[Record],
    attributes: &[&str],
    filter: F,
) -> Result<Columns, Error>
where
    F: Fn(&Record) -> bool,
{
    let mut columns = Columns::with_attributes(attributes);

    for record in records.iter().filter(|r| filter(r)) {
        for (column, attribute) in columns.values.iter_mut().zip(attributes) {
            let value = record.get(attribute).ok_or_else(|| Error::MissingAttribute {
                path: path.to_owned(),
                index: record.index(),
                attribute: (*attribute).to_owned(),
            })?;
            let value = value.as_f64().ok_or_else(|| Error::NotNumeric {
                path: path.to_owned(),
                index: record.index(),
                attribute: (*attribute).to_owned(),
            })?;
            column.push(value);
        }
    }

    Ok(columns)
}

/// Loads `path` and extracts `attributes` from the records matching `filter`.
pub fn json_attr_values<P, F>(path: P, attributes: &[&str], filter: F) -> Result<Columns, Error>
where
    P: AsRef<Path>,
    F: Fn(&Record) -> bool,
{
    let path = path.as_ref();
    let records = load_records(path)?;
    let columns = extract(path, &records, attributes, filter)?;
    debug!(
        "{}: {} of {} records matched",
        path.display(),
        columns.len(),
        records.len()
    );
    Ok(columns)
}

/// Joins a result file path onto the data directory, leaving absolute
/// paths untouched.
pub fn resolve(data_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_owned()
    } else {
        data_dir.join(file)
    }
}
