//! Canvas geometry for drawing genes and motif hits.
//!
//! The layout only places things; drawing is done by [`crate::render`].
//! Coordinates are in pixels, one pixel per base along the x axis.

use thiserror::Error;

use crate::model::GeneIndex;

/// Errors that can occur while computing a layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("No records to draw")]
    NoRecords,
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Geometry constants.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Vertical space per gene
    pub slot_height: u32,
    /// Canvas width relative to the longest gene
    pub width_scale: f64,
    /// x origin of every gene, as a fraction of the canvas width
    pub x_origin_fraction: f64,
    /// Horizontal extent of a motif tick
    pub tick_width: f64,
    /// x of gene labels and of the caption
    pub text_x: f64,
    /// Distance from the gene line up to its label baseline
    pub label_offset: f64,
    /// Distance from the canvas bottom up to the caption baseline
    pub caption_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_height: 120,
            width_scale: 1.25,
            x_origin_fraction: 0.1,
            tick_width: 2.0,
            text_x: 10.0,
            label_offset: 20.0,
            caption_offset: 15.0,
        }
    }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A horizontal segment on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

impl Segment {
    fn new(x1: f64, x2: f64, y: f64) -> Self {
        Self { x1, x2, y }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }
}

/// A motif tick and the motif it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub motif: usize,
    pub segment: Segment,
}

/// Placement of one gene.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneLayout {
    pub id: String,
    pub y: f64,
    pub label: Point,
    /// Full-length gene line
    pub line: Segment,
    /// Exon box
    pub exon: Segment,
    pub ticks: Vec<Tick>,
}

/// Placement of every gene on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub x_origin: f64,
    pub genes: Vec<GeneLayout>,
    pub caption: Point,
}

impl Layout {
    /// Computes the layout of all genes, stacked top to bottom in input order.
    ///
    /// The canvas is `ceil(longest gene * width_scale)` wide and
    /// `gene count * slot_height` high. Genes are spread evenly so that the
    /// margin above the first gene equals the margin below the last one.
    pub fn compute(index: &GeneIndex, config: &LayoutConfig) -> LayoutResult<Self> {
        let max_length = index.max_length().ok_or(LayoutError::NoRecords)?;
        let count = index.len();

        let width = (max_length as f64 * config.width_scale).ceil() as u32;
        let height = count as u32 * config.slot_height;
        let x_origin = width as f64 * config.x_origin_fraction;
        let y_step = height as f64 / (count + 1) as f64;

        let genes = index
            .iter()
            .enumerate()
            .map(|(i, (record, hits))| {
                let y = y_step * (i + 1) as f64;
                let exon_x = x_origin + record.exon_start as f64;
                let ticks = hits
                    .iter()
                    .map(|hit| {
                        let x = x_origin + hit.start as f64;
                        Tick {
                            motif: hit.motif,
                            segment: Segment::new(x, x + config.tick_width, y),
                        }
                    })
                    .collect();

                GeneLayout {
                    id: record.id.clone(),
                    y,
                    label: Point {
                        x: config.text_x,
                        y: y - config.label_offset,
                    },
                    line: Segment::new(x_origin, x_origin + record.length as f64, y),
                    exon: Segment::new(exon_x, exon_x + record.exon_len as f64, y),
                    ticks,
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            x_origin,
            genes,
            caption: Point {
                x: config.text_x,
                y: height as f64 - config.caption_offset,
            },
        })
    }
}
