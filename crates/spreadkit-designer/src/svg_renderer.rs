//! SVG rendering of spread layouts.
//!
//! Two projections share the same geometry (board constants, percentage
//! placement, connector order):
//! - the thumbnail: slot boxes and plain connector lines, no state
//! - the canvas: adds the guide grid, dashed arrowed connectors, labels,
//!   selection emphasis and the coordinate readout
//!
//! Scenes are laid out in board units (`viewBox="0 0 100 100"`) so the SVG
//! scales to any pixel size.

use serde::{Deserialize, Serialize};
use spreadkit_core::Position;
use std::fmt::Write;

use crate::board::grid_lines;
use crate::canvas::{slot_views, DragState, SlotEmphasis, SlotView};
use crate::connectors::{connectors, Connector};

/// A rendered layout, independent of output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub slots: Vec<SlotView>,
    pub connectors: Vec<Connector>,
    /// Interactive decorations (grid, arrows, labels).
    pub interactive: bool,
}

/// Projects positions to a miniature, non-interactive preview.
pub fn render_thumbnail(positions: &[Position]) -> Scene {
    Scene {
        slots: slot_views(positions, DragState::Idle),
        connectors: connectors(positions),
        interactive: false,
    }
}

/// Projects positions to the editing canvas for the given state.
pub fn render_canvas(positions: &[Position], state: DragState) -> Scene {
    Scene {
        slots: slot_views(positions, state),
        connectors: connectors(positions),
        interactive: true,
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Scene {
    /// Whether the scene has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Serializes the scene as a standalone SVG document `size_px` square.
    pub fn to_svg(&self, size_px: u32) -> String {
        let mut svg = String::new();
        // writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 100 100">"#,
            size_px
        );
        svg.push_str(r##"<rect x="0" y="0" width="100" height="100" fill="#fafafa"/>"##);
        svg.push('\n');

        if self.interactive {
            self.write_grid(&mut svg);
            svg.push_str(
                r##"<defs><marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="#00000015"/></marker></defs>"##,
            );
            svg.push('\n');
        }

        for c in &self.connectors {
            let _ = write!(
                svg,
                r##"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="#00000010" stroke-width="0.3""##,
                c.start.0 * 100.0,
                c.start.1 * 100.0,
                c.end.0 * 100.0,
                c.end.1 * 100.0
            );
            if self.interactive {
                svg.push_str(r#" stroke-dasharray="1.2 0.6" marker-end="url(#arrowhead)""#);
            }
            svg.push_str("/>\n");
        }

        for slot in &self.slots {
            self.write_slot(&mut svg, slot);
        }

        if self.interactive && self.slots.is_empty() {
            svg.push_str(
                r##"<text x="50" y="50" font-size="3" text-anchor="middle" fill="#00000033">No positions added yet. Click "Add" to start.</text>"##,
            );
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn write_grid(&self, svg: &mut String) {
        let (vertical, horizontal) = grid_lines();
        svg.push_str(r##"<g stroke="#000000" stroke-opacity="0.03" stroke-width="0.2">"##);
        for x in vertical {
            let _ = write!(svg, r#"<line x1="{0}" y1="0" x2="{0}" y2="100"/>"#, x);
        }
        for y in horizontal {
            let _ = write!(svg, r#"<line x1="0" y1="{0}" x2="100" y2="{0}"/>"#, y);
        }
        svg.push_str("</g>\n");
    }

    fn write_slot(&self, svg: &mut String, slot: &SlotView) {
        let x = slot.left_pct - slot.width_pct / 2.0;
        let y = slot.top_pct - slot.height_pct / 2.0;
        let stroke = match slot.emphasis {
            SlotEmphasis::Normal if self.interactive => "#00000033",
            SlotEmphasis::Normal => "#0000001a",
            SlotEmphasis::Selected | SlotEmphasis::Dragging => "#000000",
        };
        let _ = write!(
            svg,
            r##"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="0.5" fill="#ffffff" stroke="{}" stroke-width="0.3""##,
            x, y, slot.width_pct, slot.height_pct, stroke
        );
        if !self.interactive {
            svg.push_str("/>\n");
            return;
        }
        let _ = writeln!(svg, r#" data-slot="{}"/>"#, slot.slot);
        let _ = writeln!(
            svg,
            r##"<text x="{:.3}" y="{:.3}" font-size="2" text-anchor="middle" fill="#00000066">{}</text>"##,
            slot.left_pct,
            slot.top_pct - 1.0,
            escape_xml(&slot.label)
        );
        let _ = writeln!(
            svg,
            r##"<text x="{:.3}" y="{:.3}" font-size="1.8" font-weight="bold" text-anchor="middle" fill="#000000">{}</text>"##,
            slot.left_pct,
            slot.top_pct + 1.5,
            escape_xml(&slot.title)
        );
        if let Some(coords) = &slot.coordinates {
            let _ = writeln!(
                svg,
                r##"<text x="{:.3}" y="{:.3}" font-size="1.6" text-anchor="middle" fill="#00000099">{}</text>"##,
                slot.left_pct,
                slot.top_pct + slot.height_pct / 2.0 + 2.5,
                coords
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Position> {
        vec![
            Position::new("2", 50, 50).with_text("Present", ""),
            Position::new("1", 10, 10).with_text("Past & <gone>", ""),
        ]
    }

    #[test]
    fn test_thumbnail_matches_canvas_geometry() {
        let thumb = render_thumbnail(&layout());
        let canvas = render_canvas(&layout(), DragState::Selected(0));
        assert_eq!(thumb.connectors, canvas.connectors);
        for (a, b) in thumb.slots.iter().zip(&canvas.slots) {
            assert_eq!((a.left_pct, a.top_pct), (b.left_pct, b.top_pct));
        }
        assert!(thumb.slots.iter().all(|s| s.coordinates.is_none()));
    }

    #[test]
    fn test_thumbnail_svg_has_boxes_and_lines() {
        let svg = render_thumbnail(&layout()).to_svg(120);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="120""#));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(!svg.contains("marker-end"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_canvas_svg_escapes_labels() {
        let svg = render_canvas(&layout(), DragState::Dragging(1)).to_svg(400);
        assert!(svg.contains("Past &amp; &lt;gone&gt;"));
        assert!(svg.contains("marker-end"));
        assert!(svg.contains(">10, 10</text>"));
        assert!(svg.contains(r#"data-slot="1""#));
    }

    #[test]
    fn test_empty_canvas_shows_hint() {
        let svg = render_canvas(&[], DragState::Idle).to_svg(400);
        assert!(svg.contains("No positions added yet"));
        assert!(render_thumbnail(&[]).is_empty());
    }
}
