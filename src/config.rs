// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config_file::{ConfigFile, FigureSpec, General};
use crate::Error;

use clap::{App, Arg, ArgMatches};

use std::ffi::OsString;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Runtime configuration: the config file (or the built-in figures) with
/// command line overrides applied.
#[derive(Clone, Debug)]
pub struct Config {
    file: ConfigFile,
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .about("Render TPM benchmark results to PDF charts")
        .arg(
            Arg::with_name("CONFIG")
                .help("TOML file describing the figures to render")
                .index(1),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("directory the result files are relative to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .help("directory the figures are written to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("increase logging verbosity (stacking)")
                .multiple(true),
        )
}

impl Config {
    /// Builds the config from the process arguments. Exits on `--help`,
    /// `--version` and usage errors.
    pub fn new() -> Result<Self, Error> {
        let matches = app().get_matches();
        Self::from_matches(&matches)
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        let mut file = match matches.value_of("CONFIG") {
            Some(path) => ConfigFile::load_from_file(path)?,
            None => ConfigFile::default(),
        };

        let general = file.general_mut();
        if let Some(dir) = matches.value_of("data-dir") {
            general.set_data_dir(PathBuf::from(dir));
        }
        if let Some(dir) = matches.value_of("output-dir") {
            general.set_output_dir(PathBuf::from(dir));
        }
        let verbose = matches.occurrences_of("verbose");
        if verbose > 0 {
            let level = general.logging().raise(verbose);
            general.set_logging(level);
        }

        Ok(Self { file })
    }

    pub fn general(&self) -> &General {
        self.file.general()
    }

    pub fn figures(&self) -> &[FigureSpec] {
        self.file.figures()
    }
}
