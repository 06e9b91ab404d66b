// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Renders TPM benchmark results as comparative line charts.
//!
//! Each figure plots the throughput of several benchmark configurations
//! against a shared x attribute (number of terminals, percent of cached
//! rows) and is written out as a single page PDF.

#[macro_use]
extern crate rustcommon_logger;

#[macro_use]
mod macros;

pub mod chart;
mod config;
mod config_file;
pub mod dataset;
mod error;
pub mod figure;

pub use crate::config::{Config, NAME, VERSION};
pub use crate::config_file::{ConfigFile, FigureSpec, General, Logging, SeriesSpec};
pub use crate::error::Error;

use crate::chart::{Chart, PdfWriter};

use std::path::PathBuf;

/// Renders every configured figure in order, reusing a single chart.
///
/// Stops at the first failure; figures already written are left in place.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, Error> {
    let pdf = PdfWriter::new();
    let mut chart = Chart::new(config.general().size());
    let mut written = Vec::with_capacity(config.figures().len());

    for spec in config.figures() {
        debug!("rendering {}", spec.output().display());
        written.push(figure::render(&mut chart, spec, config.general(), &pdf)?);
        chart.clear();
    }

    Ok(written)
}
