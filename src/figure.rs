// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::{Chart, PdfWriter, SeriesStyle};
use crate::dataset::{self, label_is};
use crate::{Error, FigureSpec, General};

use std::path::{Path, PathBuf};

/// The columns of one figure, ready to be plotted.
#[derive(Clone, Debug)]
pub struct FigureData {
    x: Vec<f64>,
    series: Vec<(Vec<f64>, SeriesStyle)>,
}

impl FigureData {
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self, index: usize) -> Option<&[f64]> {
        self.series.get(index).map(|(y, _)| y.as_slice())
    }
}

/// Reads every series of `spec`. The x values are taken from the first
/// series.
pub fn load(spec: &FigureSpec, data_dir: &Path) -> Result<FigureData, Error> {
    let attributes = [spec.x(), spec.y()];
    let mut x = None;
    let mut series = Vec::with_capacity(spec.series().len());

    for (i, source) in spec.series().iter().enumerate() {
        let style = source.style(i)?;
        let path = dataset::resolve(data_dir, source.file());
        let mut columns = dataset::json_attr_values(&path, &attributes, label_is(source.label()))?;

        if x.is_none() {
            x = columns.take(spec.x());
        }
        let y = columns.take(spec.y()).unwrap_or_default();
        series.push((y, style));
    }

    Ok(FigureData {
        x: x.unwrap_or_default(),
        series,
    })
}

/// Populates `chart` with `data` as described by `spec`.
pub fn draw(chart: &mut Chart, spec: &FigureSpec, data: &FigureData) -> Result<(), Error> {
    for (y, style) in &data.series {
        chart.plot(&data.x, y, *style, None)?;
    }
    chart
        .set_xlabel(spec.x_desc())
        .set_ylabel(spec.y_desc())
        .set_legend_position(spec.legend_position())
        .set_xticks(&data.x);
    chart.legend(spec.legend())?;
    Ok(())
}

/// Loads, draws and saves one figure, returning the path written.
///
/// `chart` is expected to be empty; the caller clears it between figures.
pub fn render(
    chart: &mut Chart,
    spec: &FigureSpec,
    general: &General,
    pdf: &PdfWriter,
) -> Result<PathBuf, Error> {
    let data = load(spec, general.data_dir())?;
    draw(chart, spec, &data)?;

    let output = dataset::resolve(general.output_dir(), spec.output());
    chart.save(&output, pdf)?;
    info!(
        "{}: {} series over {} points",
        output.display(),
        data.series.len(),
        data.x.len()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Colour;

    fn spec() -> FigureSpec {
        toml::from_str(
            r#"
            output = "fig.pdf"
            x = "terminals"
            x_desc = "number of terminals"
            legend = ["DB-S-TB", "DB-S-LB(WAN setting)", "DB-S-LB(LAN setting)"]

            [[series]]
            file = "tb.json"
            label = "tight_bind"
            style = "--o"

            [[series]]
            file = "lb_wan.json"
            label = "loose_bind"
            style = "-.v"

            [[series]]
            file = "lb_lan.json"
            label = "loose_bind"
            style = "-.<"
            "#,
        )
        .unwrap()
    }

    fn data(y: Vec<Vec<f64>>) -> FigureData {
        let style = SeriesStyle::parse("-", Colour::new(0, 0, 0)).unwrap();
        FigureData {
            x: vec![1.0, 2.0, 4.0],
            series: y.into_iter().map(|y| (y, style)).collect(),
        }
    }

    #[test]
    fn ticks_follow_shared_x() {
        let mut chart = Chart::default();
        let data = data(vec![
            vec![100.0, 180.0, 300.0],
            vec![80.0, 140.0, 250.0],
            vec![90.0, 160.0, 280.0],
        ]);
        draw(&mut chart, &spec(), &data).unwrap();
        assert_eq!(chart.xticks(), vec![1.0, 2.0, 4.0]);
        assert!(chart.render_svg().is_ok());
    }

    #[test]
    fn short_series_is_rejected() {
        let mut chart = Chart::default();
        let data = data(vec![
            vec![100.0, 180.0, 300.0],
            vec![80.0, 140.0],
            vec![90.0, 160.0, 280.0],
        ]);
        assert!(matches!(
            draw(&mut chart, &spec(), &data),
            Err(Error::LengthMismatch {
                len: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn load_takes_x_from_first_series() {
        let dir = std::env::temp_dir().join(format!("tpm-plot-figure-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("tb.json"),
            r#"[{"label": "tight_bind", "terminals": 1, "tpm": 100},
                {"label": "tight_bind", "terminals": 2, "tpm": 180}]"#,
        )
        .unwrap();
        let lb = r#"[{"label": "loose_bind", "terminals": 10, "tpm": 90},
                     {"label": "loose_bind", "terminals": 20, "tpm": 150}]"#;
        std::fs::write(dir.join("lb_wan.json"), lb).unwrap();
        std::fs::write(dir.join("lb_lan.json"), lb).unwrap();

        let data = load(&spec(), &dir).unwrap();
        assert_eq!(data.x(), &[1.0, 2.0]);
        assert_eq!(data.y(0), Some(&[100.0, 180.0][..]));
        assert_eq!(data.y(1), Some(&[90.0, 150.0][..]));
        assert_eq!(data.y(3), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
