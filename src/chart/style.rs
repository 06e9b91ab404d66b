// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;

use plotters::style::RGBColor;
use serde_derive::Deserialize;

use std::convert::TryFrom;
use std::str::FromStr;

/// Line width, in points.
pub const LINE_WIDTH: f64 = 2.2;
/// Marker diameter, in points.
pub const MARKER_SIZE: f64 = 12.0;

/// Pixels per point on the default 100 dpi canvas.
const PX_PER_PT: f64 = 100.0 / 72.0;

pub(crate) fn stroke_px() -> u32 {
    (LINE_WIDTH * PX_PER_PT).round() as u32
}

pub(crate) fn marker_radius_px() -> i32 {
    (MARKER_SIZE * PX_PER_PT / 2.0).round() as i32
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

// tab10
const NAMED: &[(&str, Colour)] = &[
    ("tab:blue", hexcolour!(0x1F77B4)),
    ("tab:orange", hexcolour!(0xFF7F0E)),
    ("tab:green", hexcolour!(0x2CA02C)),
    ("tab:red", hexcolour!(0xD62728)),
    ("tab:purple", hexcolour!(0x9467BD)),
    ("tab:brown", hexcolour!(0x8C564B)),
    ("tab:pink", hexcolour!(0xE377C2)),
    ("tab:gray", hexcolour!(0x7F7F7F)),
    ("tab:olive", hexcolour!(0xBCBD22)),
    ("tab:cyan", hexcolour!(0x17BECF)),
];

/// Colour used for the `n`th series when none is given.
pub fn cycle(n: usize) -> Colour {
    NAMED[n % NAMED.len()].1
}

impl FromStr for Colour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let Ok(v) = u32::from_str_radix(hex, 16) {
                    return Ok(Colour::new((v >> 16) as u8, (v >> 8) as u8, v as u8));
                }
            }
            return Err(Error::Colour(s.to_owned()));
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, colour)| *colour)
            .ok_or_else(|| Error::Colour(s.to_owned()))
    }
}

impl TryFrom<String> for Colour {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
}

impl Marker {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::TriangleUp),
            'v' => Some(Marker::TriangleDown),
            '<' => Some(Marker::TriangleLeft),
            '>' => Some(Marker::TriangleRight),
            _ => None,
        }
    }

    /// Polygon vertices relative to the data point, in pixels with y
    /// growing downwards. Empty for markers that are not polygons.
    pub fn outline(self, r: i32) -> Vec<(i32, i32)> {
        match self {
            Marker::None | Marker::Circle => Vec::new(),
            Marker::Square => vec![(-r, -r), (r, -r), (r, r), (-r, r)],
            Marker::TriangleUp => vec![(0, -r), (r, r), (-r, r)],
            Marker::TriangleDown => vec![(-r, -r), (r, -r), (0, r)],
            Marker::TriangleLeft => vec![(-r, 0), (r, -r), (r, r)],
            Marker::TriangleRight => vec![(r, 0), (-r, -r), (-r, r)],
        }
    }

    /// Like `outline`, but with circles approximated by a polygon so every
    /// legend glyph is drawn the same way.
    pub fn legend_outline(self, r: i32) -> Vec<(i32, i32)> {
        match self {
            Marker::Circle => (0..24)
                .map(|i| {
                    let theta = f64::from(i) * std::f64::consts::PI / 12.0;
                    let r = f64::from(r);
                    ((r * theta.cos()).round() as i32, (r * theta.sin()).round() as i32)
                })
                .collect(),
            _ => self.outline(r),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl Stroke {
    /// Alternating on/off lengths in units of line width.
    fn unscaled(self) -> &'static [f64] {
        match self {
            Stroke::Solid => &[],
            Stroke::Dashed => &[3.7, 1.6],
            Stroke::DashDot => &[6.4, 1.6, 1.0, 1.6],
            Stroke::Dotted => &[1.0, 1.65],
        }
    }

    /// Dash pattern in pixels. Empty for solid lines.
    pub fn pattern(self) -> Vec<f64> {
        let width = LINE_WIDTH * PX_PER_PT;
        self.unscaled().iter().map(|len| len * width).collect()
    }

    /// Two legend segments `(0..a)` and `(b..20)` suggesting the pattern.
    pub(crate) fn legend_segments(self) -> (i32, i32) {
        match self {
            Stroke::Solid => (10, 10),
            Stroke::Dashed => (8, 12),
            Stroke::DashDot => (12, 16),
            Stroke::Dotted => (3, 17),
        }
    }
}

/// How one series is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeriesStyle {
    pub colour: Colour,
    pub marker: Marker,
    pub stroke: Stroke,
}

impl SeriesStyle {
    /// Parses a format string such as `--o` (dashed, circles) or `-.v`
    /// (dash-dot, down triangles). A string with a marker but no line
    /// style draws a solid line.
    pub fn parse(format: &str, colour: Colour) -> Result<Self, Error> {
        let (stroke, rest) = if let Some(rest) = format.strip_prefix("--") {
            (Stroke::Dashed, rest)
        } else if let Some(rest) = format.strip_prefix("-.") {
            (Stroke::DashDot, rest)
        } else if let Some(rest) = format.strip_prefix(':') {
            (Stroke::Dotted, rest)
        } else if let Some(rest) = format.strip_prefix('-') {
            (Stroke::Solid, rest)
        } else {
            (Stroke::Solid, format)
        };

        let mut chars = rest.chars();
        let marker = match (chars.next(), chars.next()) {
            (None, _) => Marker::None,
            (Some(c), None) => {
                Marker::from_char(c).ok_or_else(|| Error::Style(format.to_owned()))?
            }
            _ => return Err(Error::Style(format.to_owned())),
        };

        Ok(Self {
            colour,
            marker,
            stroke,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_strings() {
        let blue: Colour = "tab:blue".parse().unwrap();

        let style = SeriesStyle::parse("--o", blue).unwrap();
        assert_eq!(style.stroke, Stroke::Dashed);
        assert_eq!(style.marker, Marker::Circle);

        let style = SeriesStyle::parse("-.v", blue).unwrap();
        assert_eq!(style.stroke, Stroke::DashDot);
        assert_eq!(style.marker, Marker::TriangleDown);

        let style = SeriesStyle::parse("-.<", blue).unwrap();
        assert_eq!(style.marker, Marker::TriangleLeft);

        let style = SeriesStyle::parse("-", blue).unwrap();
        assert_eq!(style.stroke, Stroke::Solid);
        assert_eq!(style.marker, Marker::None);

        let style = SeriesStyle::parse("s", blue).unwrap();
        assert_eq!(style.stroke, Stroke::Solid);
        assert_eq!(style.marker, Marker::Square);

        assert!(SeriesStyle::parse("--x", blue).is_err());
        assert!(SeriesStyle::parse("--oo", blue).is_err());
    }

    #[test]
    fn legend_outlines() {
        let circle = Marker::Circle.legend_outline(6);
        assert_eq!(circle.len(), 24);
        assert_eq!(circle[0], (6, 0));
        assert!(circle.iter().all(|&(x, y)| x.abs() <= 6 && y.abs() <= 6));
        assert_eq!(
            Marker::TriangleDown.legend_outline(6),
            Marker::TriangleDown.outline(6)
        );
        assert!(Marker::None.legend_outline(6).is_empty());
    }

    #[test]
    fn colours() {
        assert_eq!("tab:blue".parse::<Colour>().unwrap(), Colour::new(0x1f, 0x77, 0xb4));
        assert_eq!("tab:brown".parse::<Colour>().unwrap(), Colour::new(0x8c, 0x56, 0x4b));
        assert_eq!("tab:orange".parse::<Colour>().unwrap(), Colour::new(0xff, 0x7f, 0x0e));
        assert_eq!("#102030".parse::<Colour>().unwrap(), Colour::new(0x10, 0x20, 0x30));
        assert!("#1020".parse::<Colour>().is_err());
        assert!("chartreuse".parse::<Colour>().is_err());
        assert_eq!(cycle(0), cycle(10));
    }

    #[test]
    fn patterns_scale_with_line_width() {
        assert!(Stroke::Solid.pattern().is_empty());
        let dashed = Stroke::Dashed.pattern();
        assert_eq!(dashed.len(), 2);
        assert!(dashed[0] > dashed[1]);
        assert_eq!(Stroke::DashDot.pattern().len(), 4);
    }
}
