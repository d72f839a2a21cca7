//! SVG path-data serialization and imported-overlay normalization.
//!
//! Export is lossless from the model: coordinates are emitted as the
//! stored `f64` values with no rounding or snapping. Import is the
//! opposite of symmetric — an imported SVG string is normalized for
//! display as an overlay and never parsed back into the curve model.

use crate::document::PathDocument;
use crate::path::BezierPath;
use std::fmt::Write;

/// Stroke color for exported paths.
pub const EXPORT_STROKE: &str = "black";
/// Stroke color variant while the document is being actively edited.
pub const EDITING_STROKE: &str = "red";
/// Stroke width for exported paths.
pub const EXPORT_STROKE_WIDTH: f64 = 2.0;

/// `viewBox` injected into overlay SVGs that lack one.
const DEFAULT_VIEW_BOX: &str = "viewBox=\"0 0 100 100\"";

/// Serialize one path as SVG path data.
///
/// Emits `M x0 y0` followed by one `C ox oy, ix iy, x y` group per
/// consecutive anchor pair. An absent outgoing handle on the left anchor
/// (or incoming handle on the right) degenerates to that anchor's own
/// position. Fewer than two anchors yields just the `M` command, zero
/// anchors the empty string.
pub fn path_data(path: &BezierPath) -> String {
    let Some(&first) = path.anchors.first() else {
        return String::new();
    };
    let mut d = format!("M {} {}", first.x, first.y);
    for i in 1..path.anchors.len() {
        let left = path.anchors[i - 1];
        let right = path.anchors[i];
        let out = path.handles_out[i - 1].unwrap_or(left);
        let incoming = path.handles_in[i].unwrap_or(right);
        // d is a String; write! cannot fail
        let _ = write!(
            d,
            " C {} {}, {} {}, {} {}",
            out.x, out.y, incoming.x, incoming.y, right.x, right.y
        );
    }
    d
}

/// Serialize the whole document as a standalone SVG string.
///
/// One `<path>` element per non-empty path, in document order, inside a
/// fixed envelope. Empty paths are omitted entirely.
pub fn document_svg(document: &PathDocument) -> String {
    document_svg_with_stroke(document, EXPORT_STROKE)
}

/// [`document_svg`] with a caller-chosen stroke color (the editing
/// variant renders red).
pub fn document_svg_with_stroke(document: &PathDocument, stroke: &str) -> String {
    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
    for path in document.paths.iter().filter(|p| !p.is_empty()) {
        let _ = writeln!(
            svg,
            "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" />",
            path_data(path),
            stroke,
            EXPORT_STROKE_WIDTH
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Normalize an imported SVG string for overlay display.
///
/// If the text carries no `viewBox` attribute, one is injected directly
/// after the first `<svg ` occurrence by literal substitution. The
/// geometry itself is left untouched; overlays are display-only.
pub fn normalize_overlay(svg_text: &str) -> String {
    if svg_text.contains("viewBox") {
        return svg_text.to_string();
    }
    svg_text.replacen("<svg ", &format!("<svg {DEFAULT_VIEW_BOX} "), 1)
}
