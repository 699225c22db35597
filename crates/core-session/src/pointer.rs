//! Pointer-to-caret mapping.
//!
//! Coordinates are relative to the text content origin (the session
//! translates viewport-relative taps by the window start before calling
//! in). Column resolution scans cluster boundaries left to right and snaps
//! before the first cluster whose midpoint lies right of the tap; a tap
//! past the last midpoint snaps to line end. O(line length) per tap, which
//! lines bounded by the viewport width keep trivially cheap.

use core_buffer::{Caret, LineBuffer};
use core_glyph::{GlyphMetrics, grapheme};

/// Resolve the nearest valid caret position for a tap at content-relative
/// pixel coordinates.
pub fn caret_for_point<M: GlyphMetrics>(buf: &LineBuffer, metrics: &M, x: u32, y: u32) -> Caret {
    let line_height = metrics.line_height().max(1);
    let row = ((y / line_height) as usize).min(buf.line_count() - 1);
    let line = buf.line(row).unwrap_or("");

    let mut col = line.len();
    let mut byte = 0;
    for cluster in grapheme::iter(line) {
        let start = metrics.measure(&line[..byte]);
        let width = metrics.measure(cluster);
        if x < start + width / 2 {
            col = byte;
            break;
        }
        byte += cluster.len();
    }
    Caret::new(row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_glyph::MonoMetrics;

    fn buf(text: &str) -> LineBuffer {
        LineBuffer::from_text(10, text)
    }

    #[test]
    fn snaps_around_cluster_midpoints() {
        let b = buf("ab");
        let m = MonoMetrics::new(10, 18);
        assert_eq!(caret_for_point(&b, &m, 4, 0), Caret::new(0, 0));
        assert_eq!(caret_for_point(&b, &m, 7, 0), Caret::new(0, 1));
        assert_eq!(caret_for_point(&b, &m, 14, 0), Caret::new(0, 1));
        assert_eq!(caret_for_point(&b, &m, 15, 0), Caret::new(0, 2));
    }

    #[test]
    fn tap_past_line_end_snaps_to_end() {
        let b = buf("ab");
        let m = MonoMetrics::new(10, 18);
        assert_eq!(caret_for_point(&b, &m, 25, 0), Caret::new(0, 2));
        assert_eq!(caret_for_point(&b, &m, 9999, 0), Caret::new(0, 2));
    }

    #[test]
    fn empty_line_always_resolves_to_column_zero() {
        let b = buf("");
        let m = MonoMetrics::new(10, 18);
        assert_eq!(caret_for_point(&b, &m, 37, 0), Caret::origin());
    }

    #[test]
    fn row_follows_line_height_and_clamps() {
        let b = buf("a\nb\nc");
        let m = MonoMetrics::new(10, 18);
        assert_eq!(caret_for_point(&b, &m, 0, 0).line, 0);
        assert_eq!(caret_for_point(&b, &m, 0, 17).line, 0);
        assert_eq!(caret_for_point(&b, &m, 0, 18).line, 1);
        assert_eq!(caret_for_point(&b, &m, 0, 500).line, 2, "rows clamp to last line");
    }

    #[test]
    fn wide_clusters_shift_midpoints() {
        // "界a": 界 spans 0..20, a spans 20..30.
        let b = buf("界a");
        let m = MonoMetrics::new(10, 18);
        assert_eq!(caret_for_point(&b, &m, 9, 0).byte, 0);
        assert_eq!(caret_for_point(&b, &m, 10, 0).byte, "界".len());
        assert_eq!(caret_for_point(&b, &m, 24, 0).byte, "界".len());
        assert_eq!(caret_for_point(&b, &m, 25, 0).byte, "界a".len());
    }
}
