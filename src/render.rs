//! SVG rendering of a [`Layout`].
//!
//! Per gene: a thin line over the full length, a thick exon box on top, a label
//! above and one colored tick per motif hit. A caption at the bottom explains
//! the legend.

use std::path::Path;

use svg::node::element::{Line, Text};
use svg::Document;

use crate::layout::{Layout, Segment};

/// Visual styling. Positions come from the layout; everything else is here.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub gene_stroke: f64,
    pub exon_stroke: f64,
    pub tick_stroke: f64,
    pub gene_color: String,
    /// Tick colors, cycled by motif index
    pub motif_colors: Vec<String>,
    pub font_family: String,
    pub label_size: u32,
    pub caption_size: u32,
    pub caption: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            gene_stroke: 2.0,
            exon_stroke: 10.0,
            tick_stroke: 18.0,
            gene_color: "#000000".to_string(),
            motif_colors: vec!["#ff0000".to_string()],
            font_family: "Open Sans".to_string(),
            label_size: 16,
            caption_size: 12,
            caption: "*Black boxes represent exons. Red lines indicate locations of input motifs."
                .to_string(),
        }
    }
}

impl RenderStyle {
    /// Color of the ticks for a motif.
    pub fn motif_color(&self, motif: usize) -> &str {
        if self.motif_colors.is_empty() {
            return &self.gene_color;
        }
        &self.motif_colors[motif % self.motif_colors.len()]
    }
}

fn stroke(segment: &Segment, color: &str, width: f64) -> Line {
    Line::new()
        .set("x1", segment.x1)
        .set("y1", segment.y)
        .set("x2", segment.x2)
        .set("y2", segment.y)
        .set("stroke", color)
        .set("stroke-width", width)
}

fn text(content: &str, x: f64, y: f64, family: &str, size: u32) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", family)
        .set("font-size", size)
        .set("fill", "#000000")
}

/// Builds the SVG document for a layout.
pub fn render_document(layout: &Layout, style: &RenderStyle) -> Document {
    let mut doc = Document::new()
        .set("viewBox", (0, 0, layout.width, layout.height))
        .set("width", layout.width)
        .set("height", layout.height);

    // Lines and exons first so that ticks are drawn over them
    for gene in &layout.genes {
        doc = doc
            .add(stroke(&gene.line, &style.gene_color, style.gene_stroke))
            .add(stroke(&gene.exon, &style.gene_color, style.exon_stroke));
    }

    for gene in &layout.genes {
        for tick in &gene.ticks {
            doc = doc.add(stroke(
                &tick.segment,
                style.motif_color(tick.motif),
                style.tick_stroke,
            ));
        }
    }

    for gene in &layout.genes {
        doc = doc.add(
            text(
                &gene.id,
                gene.label.x,
                gene.label.y,
                &style.font_family,
                style.label_size,
            )
            .set("font-weight", "bold"),
        );
    }

    doc.add(text(
        &style.caption,
        layout.caption.x,
        layout.caption.y,
        &style.font_family,
        style.caption_size,
    ))
}

/// Renders a layout to an SVG string.
pub fn render_svg(layout: &Layout, style: &RenderStyle) -> String {
    render_document(layout, style).to_string()
}

/// Renders a layout and writes it to `path`.
pub fn write_svg<P: AsRef<Path>>(path: P, layout: &Layout, style: &RenderStyle) -> std::io::Result<()> {
    svg::save(path, &render_document(layout, style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GeneLayout, Point, Tick};

    fn layout() -> Layout {
        Layout {
            width: 125,
            height: 120,
            x_origin: 12.5,
            genes: vec![GeneLayout {
                id: "INSR".to_string(),
                y: 60.0,
                label: Point { x: 10.0, y: 40.0 },
                line: Segment { x1: 12.5, x2: 112.5, y: 60.0 },
                exon: Segment { x1: 32.5, x2: 62.5, y: 60.0 },
                ticks: vec![
                    Tick { motif: 0, segment: Segment { x1: 17.5, x2: 19.5, y: 60.0 } },
                    Tick { motif: 1, segment: Segment { x1: 72.5, x2: 74.5, y: 60.0 } },
                ],
            }],
            caption: Point { x: 10.0, y: 105.0 },
        }
    }

    #[test]
    fn test_render_contains_every_element() {
        let svg = render_svg(&layout(), &RenderStyle::default());

        assert!(svg.contains("width=\"125\""));
        assert!(svg.contains("height=\"120\""));
        assert_eq!(svg.matches("<line").count(), 4);
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.contains("INSR"));
        assert!(svg.contains("Black boxes represent exons"));
        assert!(svg.contains("x1=\"32.5\""));
        assert!(svg.contains("x2=\"74.5\""));
        assert_eq!(svg.matches("#ff0000").count(), 2);
    }

    #[test]
    fn test_motif_colors_cycle() {
        let style = RenderStyle {
            motif_colors: vec!["red".to_string(), "blue".to_string()],
            ..RenderStyle::default()
        };
        assert_eq!(style.motif_color(0), "red");
        assert_eq!(style.motif_color(1), "blue");
        assert_eq!(style.motif_color(2), "red");

        let svg = render_svg(&layout(), &style);
        assert!(svg.contains("stroke=\"blue\""));
    }

    #[test]
    fn test_no_motif_colors_falls_back_to_gene_color() {
        let style = RenderStyle {
            motif_colors: Vec::new(),
            ..RenderStyle::default()
        };
        assert_eq!(style.motif_color(3), "#000000");
    }
}
