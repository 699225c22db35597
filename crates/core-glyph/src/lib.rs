//! Glyph measurement boundary and grapheme utilities.
//!
//! The editing core never renders text; it only asks "how wide would this
//! string be" and "how tall is one line". `GlyphMetrics` is that narrow
//! seam. Hosts inject a real implementation backed by their font engine;
//! tests and the terminal demo use the cell-grid [`MonoMetrics`].
//!
//! Contract:
//! - `measure` returns the rendered pixel width of `text` as a single run.
//!   It must be monotonic under concatenation: `measure(a+b) >= measure(a)`.
//! - `line_height` is constant for the lifetime of the metrics object.
//! - Neither call may block; both sit on the hot insertion path.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Pixel-measurement capability the editing core depends on.
pub trait GlyphMetrics {
    /// Rendered pixel width of `text` drawn as one run.
    fn measure(&self, text: &str) -> u32;
    /// Vertical extent of one line in pixels.
    fn line_height(&self) -> u32;
}

/// Fixed cell-grid metrics: every narrow cluster occupies one cell, wide
/// clusters (CJK, emoji) two. Terminal hosts use a 1x1 cell so pixel and
/// cell coordinates coincide; tests pick round cell sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonoMetrics {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl MonoMetrics {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Cell-per-pixel metrics for terminal hosts.
    pub fn terminal() -> Self {
        Self::new(1, 1)
    }
}

impl GlyphMetrics for MonoMetrics {
    fn measure(&self, text: &str) -> u32 {
        let cells: u32 = text
            .graphemes(true)
            .map(|g| cluster_cells(g) as u32)
            .sum();
        cells * self.cell_width
    }

    fn line_height(&self) -> u32 {
        self.cell_height
    }
}

/// Terminal cell width of one grapheme cluster.
///
/// Baseline comes from `unicode-width`; two corrections on top:
/// a cluster never collapses to zero cells (a combining-only cluster still
/// occupies its base cell), and anything carrying a pictographic or
/// regional-indicator codepoint is widened to 2. Over-estimating costs a
/// blank cell; under-estimating drifts every glyph after it.
pub fn cluster_cells(cluster: &str) -> u16 {
    if cluster.is_empty() {
        return 0;
    }
    let base = unicode_width::UnicodeWidthStr::width(cluster).max(1) as u16;
    if base == 1 && cluster.chars().any(has_emoji_signal) {
        return 2;
    }
    base
}

fn has_emoji_signal(c: char) -> bool {
    // Primary emoji blocks plus the Misc Symbols / Dingbats ranges where
    // legacy emoji live, and regional indicators (flag halves).
    ('\u{1F300}'..='\u{1FAFF}').contains(&c)
        || ('\u{2600}'..='\u{27BF}').contains(&c)
        || ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Normalize externally observed input: NFC composition plus CRLF/CR folded
/// to LF. Reconciliation diffs char counts, so composed and decomposed
/// spellings of the same text must map to one canonical form before any
/// comparison happens.
pub fn normalize_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.nfc().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Grapheme cluster boundary helpers operating on a single line.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// Previous cluster boundary strictly before `byte` (0 if none).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 || byte > line.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next cluster boundary strictly after `byte` (`line.len()` if none).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Whether `byte` sits on a cluster boundary (line ends included).
    pub fn is_boundary(line: &str, byte: usize) -> bool {
        byte == 0 || byte == line.len() || line.grapheme_indices(true).any(|(idx, _)| idx == byte)
    }

    /// Number of clusters in `line[..byte]`.
    pub fn cluster_index(line: &str, byte: usize) -> usize {
        line.grapheme_indices(true)
            .take_while(|(idx, _)| *idx < byte)
            .count()
    }

    /// Byte offset of the cluster at `index`, clamped to line end.
    pub fn byte_at_cluster(line: &str, index: usize) -> usize {
        line.grapheme_indices(true)
            .nth(index)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    /// Total cluster count of the line.
    pub fn count(line: &str) -> usize {
        line.graphemes(true).count()
    }
}
