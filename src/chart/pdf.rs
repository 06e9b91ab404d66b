// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;

use svg2pdf::usvg::fontdb::{Database, Family, Query};
use svg2pdf::usvg::{Group, Node, Options, Tree};
use svg2pdf::{ConversionOptions, PageOptions};

use std::sync::Arc;

/// Families tried, in order, for the generic `sans-serif` family.
const SANS_SERIF: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Arial",
    "Helvetica",
];

/// Converts rendered SVG documents to single page PDFs.
///
/// Holds the font database used to outline text, so system fonts are only
/// scanned once per run.
pub struct PdfWriter {
    fonts: Arc<Database>,
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut fonts = Database::new();
        fonts.load_system_fonts();
        debug!("loaded {} font faces", fonts.len());
        Self::with_fonts(fonts)
    }

    fn with_fonts(mut fonts: Database) -> Self {
        match SANS_SERIF.iter().find(|family| installed(&fonts, family)) {
            Some(family) => {
                debug!("using {} for sans-serif text", family);
                fonts.set_sans_serif_family(*family);
            }
            None => warn!("no sans-serif font found, text cannot be converted"),
        }
        Self {
            fonts: Arc::new(fonts),
        }
    }

    fn parse(&self, svg: &str) -> Result<Tree, Error> {
        let options = Options {
            fontdb: self.fonts.clone(),
            ..Options::default()
        };
        Tree::from_str(svg, &options).map_err(|e| Error::Pdf(e.to_string()))
    }

    /// Fails rather than silently dropping text that has no usable font.
    pub fn convert(&self, svg: &str) -> Result<Vec<u8>, Error> {
        let tree = self.parse(svg)?;

        let expected = svg.matches("<text").count();
        let found = text_nodes(tree.root());
        if found < expected {
            return Err(Error::Pdf(format!(
                "{} of {} text elements have no usable font",
                expected - found,
                expected
            )));
        }

        svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
            .map_err(|e| Error::Pdf(format!("{:?}", e)))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn installed(fonts: &Database, family: &str) -> bool {
    let families = [Family::Name(family)];
    let query = Query {
        families: &families,
        ..Query::default()
    };
    fonts.query(&query).is_some()
}

fn text_nodes(group: &Group) -> usize {
    group
        .children()
        .iter()
        .map(|node| match node {
            Node::Group(group) => text_nodes(group),
            Node::Text(_) => 1,
            _ => 0,
        })
        .sum()
}
