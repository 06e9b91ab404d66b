// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! An in-memory multi-line chart which is populated, saved and then
//! cleared for reuse.

mod dash;
mod pdf;
mod scales;
mod style;

pub use self::dash::dash;
pub use self::pdf::PdfWriter;
pub use self::scales::TickedCoord;
pub use self::style::*;

use crate::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde_derive::Deserialize;

use std::ops::Range;
use std::path::Path;

const FONT: &str = "sans-serif";

/// Where the legend box is placed inside the plotting area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    fn into_plotters(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

#[derive(Clone, Debug)]
struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
    style: SeriesStyle,
    label: Option<String>,
}

impl Series {
    fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

pub struct Chart {
    size: (u32, u32),
    series: Vec<Series>,
    x_desc: String,
    y_desc: String,
    legend: Vec<String>,
    legend_position: LegendPosition,
    xticks: Option<Vec<f64>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new((640, 480))
    }
}

impl Chart {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            series: Vec::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            legend: Vec::new(),
            legend_position: LegendPosition::UpperLeft,
            xticks: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Adds a line. `x` and `y` must have the same length.
    pub fn plot(
        &mut self,
        x: &[f64],
        y: &[f64],
        style: SeriesStyle,
        label: Option<&str>,
    ) -> Result<&mut Self, Error> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                len: y.len(),
                expected: x.len(),
            });
        }
        self.series.push(Series {
            x: x.to_vec(),
            y: y.to_vec(),
            style,
            label: label.map(str::to_owned),
        });
        Ok(self)
    }

    pub fn set_xlabel(&mut self, desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = desc.as_ref().to_owned();
        self
    }

    pub fn set_ylabel(&mut self, desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = desc.as_ref().to_owned();
        self
    }

    /// Labels the series in plot order, replacing their own labels.
    pub fn legend<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<&mut Self, Error> {
        if labels.len() > self.series.len() {
            return Err(Error::LegendOverflow {
                entries: labels.len(),
                series: self.series.len(),
            });
        }
        self.legend = labels.iter().map(|l| l.as_ref().to_owned()).collect();
        Ok(self)
    }

    pub fn set_legend_position(&mut self, position: LegendPosition) -> &mut Self {
        self.legend_position = position;
        self
    }

    pub fn set_xticks(&mut self, ticks: &[f64]) -> &mut Self {
        let mut ticks = ticks.to_vec();
        ticks.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ticks.dedup();
        self.xticks = Some(ticks);
        self
    }

    /// Forgets everything plotted so far, keeping the canvas size.
    pub fn clear(&mut self) {
        self.series.clear();
        self.x_desc.clear();
        self.y_desc.clear();
        self.legend.clear();
        self.legend_position = LegendPosition::UpperLeft;
        self.xticks = None;
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Positions of the x-axis ticks that will be drawn.
    pub fn xticks(&self) -> Vec<f64> {
        match &self.xticks {
            Some(ticks) => ticks.clone(),
            None => scales::auto_ticks(self.x_range()),
        }
    }

    pub fn x_range(&self) -> Range<f64> {
        let ticks = self.xticks.iter().flatten().copied();
        padded(self.series.iter().flat_map(|s| s.x.iter().copied()).chain(ticks))
    }

    pub fn y_range(&self) -> Range<f64> {
        padded(self.series.iter().flat_map(|s| s.y.iter().copied()))
    }

    fn label(&self, i: usize) -> Option<&str> {
        self.legend
            .get(i)
            .or_else(|| self.series[i].label.as_ref())
            .map(String::as_str)
    }

    /// Renders the chart as an SVG document.
    pub fn render_svg(&self) -> Result<String, Error> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Writes the chart to `path`: SVG when it ends in `.svg`, otherwise PDF.
    pub fn save<P: AsRef<Path>>(&self, path: P, pdf: &PdfWriter) -> Result<(), Error> {
        let path = path.as_ref();
        let svg = self.render_svg()?;

        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        let bytes = if is_svg {
            svg.into_bytes()
        } else {
            pdf.convert(&svg)?
        };

        std::fs::write(path, bytes).map_err(|source| Error::Write {
            path: path.to_owned(),
            source,
        })
    }

    fn draw(&self, root: &DrawingArea<SVGBackend, Shift>) -> Result<(), Error> {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(
                TickedCoord::new(self.x_range(), self.xticks()),
                self.y_range(),
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .x_label_formatter(&|x: &f64| format!("{}", x))
            .axis_desc_style((FONT, 18))
            .label_style((FONT, 14))
            .draw()?;

        let stroke = stroke_px();
        let radius = marker_radius_px();
        let mut labeled = false;

        for (i, series) in self.series.iter().enumerate() {
            let colour = series.style.colour.rgb();
            let line = colour.stroke_width(stroke);
            let fill = colour.filled();
            let points = series.points();

            let pixels: Vec<(f64, f64)> = points
                .iter()
                .map(|p| {
                    let (x, y) = chart.backend_coord(p);
                    (x as f64, y as f64)
                })
                .collect();
            for run in dash(&pixels, &series.style.stroke.pattern()) {
                let run: Vec<(i32, i32)> = run
                    .into_iter()
                    .map(|(x, y)| (x.round() as i32, y.round() as i32))
                    .collect();
                root.draw(&PathElement::new(run, line))?;
            }

            let marker = series.style.marker;
            let anno = match marker {
                Marker::None => {
                    chart.draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                }
                Marker::Circle => chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, radius, fill)),
                )?,
                _ => chart.draw_series(points.iter().map(|&p| {
                    EmptyElement::at(p) + Polygon::new(marker.outline(radius), fill)
                }))?,
            };

            if let Some(label) = self.label(i) {
                labeled = true;
                let (a, b) = series.style.stroke.legend_segments();
                let anno = anno.label(label);
                if marker == Marker::None {
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (a, 0)], line)
                            + PathElement::new(vec![(b, 0), (20, 0)], line)
                    });
                } else {
                    let glyph: Vec<(i32, i32)> = marker
                        .legend_outline(radius)
                        .into_iter()
                        .map(|(dx, dy)| (dx + 10, dy))
                        .collect();
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (a, 0)], line)
                            + PathElement::new(vec![(b, 0), (20, 0)], line)
                            + Polygon::new(glyph.clone(), fill)
                    });
                }
            }
        }

        if labeled {
            chart
                .configure_series_labels()
                .position(self.legend_position.into_plotters())
                .margin(10)
                .label_font((FONT, 14))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }
}

/// Data range padded by 5% of its span on each side.
fn padded<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        0.0..1.0
    } else if min == max {
        (min - 1.0)..(max + 1.0)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(format: &str, colour: &str) -> SeriesStyle {
        SeriesStyle::parse(format, colour.parse().unwrap()).unwrap()
    }

    fn terminals_chart() -> Chart {
        let terminals = [1.0, 2.0, 4.0];
        let mut chart = Chart::default();
        chart
            .plot(&terminals, &[100.0, 180.0, 300.0], style("--o", "tab:blue"), None)
            .unwrap()
            .plot(&terminals, &[80.0, 150.0, 260.0], style("-.v", "tab:brown"), None)
            .unwrap()
            .plot(&terminals, &[90.0, 160.0, 280.0], style("-.<", "tab:orange"), None)
            .unwrap();
        chart.set_xlabel("number of terminals").set_ylabel("TPM");
        chart
            .legend(&["DB-S-TB", "DB-S-LB(WAN setting)", "DB-S-LB(LAN setting)"])
            .unwrap();
        chart.set_xticks(&terminals);
        chart
    }

    #[test]
    fn ticks_at_x_values() {
        let chart = terminals_chart();
        assert_eq!(chart.xticks(), vec![1.0, 2.0, 4.0]);

        let range = chart.x_range();
        assert!(range.start < 1.0 && range.end > 4.0);
        let range = chart.y_range();
        assert!(range.start < 80.0 && range.end > 300.0);
    }

    #[test]
    fn length_mismatch() {
        let mut chart = Chart::default();
        let err = chart
            .plot(&[1.0, 2.0, 4.0], &[100.0, 180.0], style("--o", "tab:blue"), None)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                len: 2,
                expected: 3
            }
        ));
        assert!(chart.is_empty());
    }

    #[test]
    fn legend_overflow() {
        let mut chart = Chart::default();
        chart
            .plot(&[1.0], &[1.0], style("-", "tab:blue"), None)
            .unwrap();
        assert!(chart.legend(&["a", "b"]).is_err());
        assert!(chart.legend(&["a"]).is_ok());
    }

    #[test]
    fn legend_overrides_series_labels() {
        let mut chart = Chart::default();
        chart
            .plot(&[1.0], &[1.0], style("-", "tab:blue"), Some("first"))
            .unwrap()
            .plot(&[1.0], &[2.0], style("-", "tab:red"), Some("second"))
            .unwrap();
        chart.legend(&["one"]).unwrap();
        assert_eq!(chart.label(0), Some("one"));
        assert_eq!(chart.label(1), Some("second"));
    }

    #[test]
    fn clear_resets_everything_but_size() {
        let mut chart = terminals_chart();
        chart.clear();
        assert!(chart.is_empty());
        assert_eq!(chart.size(), (640, 480));
        assert!(chart.xticks.is_none());
        assert!(chart.legend.is_empty());
        assert!(chart.x_desc.is_empty());
        assert_eq!(chart.x_range(), 0.0..1.0);
    }

    #[test]
    fn render_is_deterministic() {
        let chart = terminals_chart();
        let first = chart.render_svg().unwrap();
        let second = chart.render_svg().unwrap();
        assert!(first.contains("<svg"));
        assert_eq!(first, second);
    }

    fn text_labels(svg: &str) -> Vec<String> {
        svg.split("<text")
            .skip(1)
            .filter_map(|tag| {
                let body = &tag[tag.find('>')? + 1..];
                Some(body[..body.find("</text>")?].trim().to_owned())
            })
            .collect()
    }

    #[test]
    fn tick_labels_are_the_x_values() {
        let svg = terminals_chart().render_svg().unwrap();
        let labels = text_labels(&svg);
        for tick in &["1", "2", "4"] {
            assert!(labels.iter().any(|l| l == tick), "missing tick {}", tick);
        }
        for absent in &["3", "1.0", "2.0", "4.0"] {
            assert!(!labels.iter().any(|l| l == absent), "unexpected {}", absent);
        }
        for text in &["number of terminals", "TPM", "DB-S-TB", "DB-S-LB(LAN setting)"] {
            assert!(labels.iter().any(|l| l == text), "missing {}", text);
        }
    }

    #[test]
    fn legend_glyphs_carry_markers() {
        let mut chart = Chart::default();
        chart
            .plot(&[1.0, 2.0], &[1.0, 2.0], style("-v", "tab:brown"), Some("down"))
            .unwrap();
        let with_marker = chart.render_svg().unwrap();

        chart.clear();
        chart
            .plot(&[1.0, 2.0], &[1.0, 2.0], style("-", "tab:brown"), Some("plain"))
            .unwrap();
        let without = chart.render_svg().unwrap();

        // two data points plus one legend glyph
        assert_eq!(with_marker.matches("<polygon").count(), 3);
        assert_eq!(without.matches("<polygon").count(), 0);
    }

    #[test]
    fn empty_chart_renders() {
        let chart = Chart::default();
        assert!(chart.render_svg().is_ok());
    }

    #[test]
    fn padding() {
        assert_eq!(padded(vec![].into_iter()), 0.0..1.0);
        assert_eq!(padded(vec![5.0].into_iter()), 4.0..6.0);
        assert_eq!(padded(vec![0.0, 100.0].into_iter()), -5.0..105.0);
        assert_eq!(padded(vec![f64::NAN, 2.0].into_iter()), 1.0..3.0);
    }
}
