// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: expected an array of records")]
    NotAnArray { path: PathBuf },
    #[error("{path}: record {index} is not an object")]
    NotAnObject { path: PathBuf, index: usize },
    #[error("{path}: record {index} has no attribute `{attribute}`")]
    MissingAttribute {
        path: PathBuf,
        index: usize,
        attribute: String,
    },
    #[error("{path}: record {index} attribute `{attribute}` is not a number")]
    NotNumeric {
        path: PathBuf,
        index: usize,
        attribute: String,
    },
    #[error("series has {len} values but the x-axis has {expected}")]
    LengthMismatch { len: usize, expected: usize },
    #[error("legend has {entries} entries for {series} series")]
    LegendOverflow { entries: usize, series: usize },
    #[error("invalid series style `{0}`")]
    Style(String),
    #[error("unknown colour `{0}`")]
    Colour(String),
    #[error("drawing failed: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),
    #[error("pdf conversion failed: {0}")]
    Pdf(String),
    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
}
