// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::{cycle, Colour, LegendPosition, SeriesStyle};
use crate::Error;

use rustcommon_logger::LevelFilter;
use serde_derive::*;

use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    general: General,
    #[serde(default = "default_figures")]
    figure: Vec<FigureSpec>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            general: General::default(),
            figure: default_figures(),
        }
    }
}

impl ConfigFile {
    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn general_mut(&mut self) -> &mut General {
        &mut self.general
    }

    pub fn figures(&self) -> &[FigureSpec] {
        &self.figure
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks what serde cannot: every figure has series and every style
    /// string parses.
    pub fn validate(&self) -> Result<(), Error> {
        if self.figure.is_empty() {
            return Err(Error::Config("no figures configured".to_owned()));
        }
        for figure in &self.figure {
            if figure.series.is_empty() {
                return Err(Error::Config(format!(
                    "figure {} has no series",
                    figure.output.display()
                )));
            }
            if figure.legend.len() > figure.series.len() {
                return Err(Error::LegendOverflow {
                    entries: figure.legend.len(),
                    series: figure.series.len(),
                });
            }
            for (i, series) in figure.series.iter().enumerate() {
                series.style(i)?;
            }
        }
        Ok(())
    }
}

fn current_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

fn default_y() -> String {
    "tpm".to_owned()
}

fn default_y_desc() -> String {
    "TPM".to_owned()
}

fn default_legend_position() -> LegendPosition {
    LegendPosition::UpperLeft
}

fn solid() -> String {
    "-".to_owned()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logging {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Logging {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Logging::Error => LevelFilter::Error,
            Logging::Warn => LevelFilter::Warn,
            Logging::Info => LevelFilter::Info,
            Logging::Debug => LevelFilter::Debug,
            Logging::Trace => LevelFilter::Trace,
        }
    }

    /// The level `steps` notches more verbose, saturating at trace.
    pub fn raise(self, steps: u64) -> Self {
        const ORDER: [Logging; 5] = [
            Logging::Error,
            Logging::Warn,
            Logging::Info,
            Logging::Debug,
            Logging::Trace,
        ];
        let current = ORDER.iter().position(|l| *l == self).unwrap_or(2);
        let target = (current as u64 + steps).min(ORDER.len() as u64 - 1);
        ORDER[target as usize]
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "current_dir")]
    data_dir: PathBuf,
    #[serde(default = "current_dir")]
    output_dir: PathBuf,
    #[serde(default = "default_logging")]
    logging: Logging,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

fn default_logging() -> Logging {
    Logging::Info
}

impl Default for General {
    fn default() -> Self {
        Self {
            data_dir: current_dir(),
            output_dir: current_dir(),
            logging: default_logging(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl General {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = dir;
    }

    pub fn logging(&self) -> Logging {
        self.logging
    }

    pub fn set_logging(&mut self, level: Logging) {
        self.logging = level;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// One chart: several series from different result files plotted against
/// the x values of the first series.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureSpec {
    output: PathBuf,
    x: String,
    #[serde(default = "default_y")]
    y: String,
    #[serde(default)]
    x_desc: String,
    #[serde(default = "default_y_desc")]
    y_desc: String,
    #[serde(default)]
    legend: Vec<String>,
    #[serde(default = "default_legend_position")]
    legend_position: LegendPosition,
    series: Vec<SeriesSpec>,
}

impl FigureSpec {
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn x(&self) -> &str {
        &self.x
    }

    pub fn y(&self) -> &str {
        &self.y
    }

    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn legend(&self) -> &[String] {
        &self.legend
    }

    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }

    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesSpec {
    file: PathBuf,
    label: String,
    #[serde(default = "solid")]
    style: String,
    colour: Option<Colour>,
}

impl SeriesSpec {
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Records whose `label` field equals this are plotted.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Drawing style; `index` picks the default colour.
    pub fn style(&self, index: usize) -> Result<SeriesStyle, Error> {
        let colour = self.colour.unwrap_or_else(|| cycle(index));
        SeriesStyle::parse(&self.style, colour)
    }
}

const TIGHT_BIND: &str = "tight_bind";
const LOOSE_BIND: &str = "loose_bind";

fn default_legend() -> Vec<String> {
    vec![
        "DB-S-TB".to_owned(),
        "DB-S-LB(WAN setting)".to_owned(),
        "DB-S-LB(LAN setting)".to_owned(),
    ]
}

// tight bind, loose bind over WAN, loose bind over LAN
fn bind_series(tb: &str, lb_wan: &str, lb_lan: &str) -> Vec<SeriesSpec> {
    let series = |file: &str, label: &str, style: &str, colour: Colour| SeriesSpec {
        file: PathBuf::from(file),
        label: label.to_owned(),
        style: style.to_owned(),
        colour: Some(colour),
    };
    vec![
        series(tb, TIGHT_BIND, "--o", hexcolour!(0x1F77B4)),
        series(lb_wan, LOOSE_BIND, "-.v", hexcolour!(0x8C564B)),
        series(lb_lan, LOOSE_BIND, "-.<", hexcolour!(0xFF7F0E)),
    ]
}

fn default_figures() -> Vec<FigureSpec> {
    vec![
        FigureSpec {
            output: PathBuf::from("fig_s_tpm_bind.pdf"),
            x: "terminals".to_owned(),
            y: default_y(),
            x_desc: "number of terminals".to_owned(),
            y_desc: default_y_desc(),
            legend: default_legend(),
            legend_position: default_legend_position(),
            series: bind_series(
                "share/g7.4x_terminal_tb.json",
                "share/g7.4x_terminal_lb_wan.json",
                "share/g7.4x_terminal_lb_lan.json",
            ),
        },
        FigureSpec {
            output: PathBuf::from("fig_s_tpm_cache.pdf"),
            x: "percent_cached_tuple".to_owned(),
            y: default_y(),
            x_desc: "percent of CCB cached rows".to_owned(),
            y_desc: default_y_desc(),
            legend: default_legend(),
            legend_position: default_legend_position(),
            series: bind_series(
                "share/g7.4x_cache_tb.json",
                "share/g7.4x_cache_lb_wan.json",
                "share/g7.4x_cache_lb_lan.json",
            ),
        },
    ]
}
