//! Width-constrained insertion: the line-wrap policy.
//!
//! Wrapping is eager, not proactive: each cluster is tested against the
//! full candidate line (prefix + cluster + suffix) and the first one that
//! would overflow pushes the caret's tail onto a new line, mid-word or not.
//! The retry is a single bounded step rather than recursion: after one
//! split the cluster is applied where the caret landed. A cluster wider
//! than the viewport is accepted on an empty line — a line always holds at
//! least one cluster, which is what bounds the whole policy.

use core_buffer::LineBuffer;
use core_glyph::GlyphMetrics;

/// How an insertion resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Applied on the caret line as-is.
    Fit,
    /// The line was split at the caret first; applied on the new line.
    Wrapped,
    /// Line cap and width both exhausted; the cluster was discarded.
    Dropped,
}

/// Insert `text` (one cluster, or an escape expansion of one) at the caret,
/// splitting the line first when the candidate would exceed
/// `available_width` pixels.
pub fn insert_cluster<M: GlyphMetrics>(
    buf: &mut LineBuffer,
    metrics: &M,
    available_width: u32,
    text: &str,
) -> InsertOutcome {
    if fits_or_empty(buf, metrics, available_width, text) {
        buf.insert_str(text);
        return InsertOutcome::Fit;
    }
    if !buf.split_line() {
        return InsertOutcome::Dropped;
    }
    // Caret now sits at the start of the originally trailing portion.
    buf.insert_str(text);
    InsertOutcome::Wrapped
}

fn fits_or_empty<M: GlyphMetrics>(
    buf: &LineBuffer,
    metrics: &M,
    available_width: u32,
    text: &str,
) -> bool {
    let line = buf.caret_line();
    if line.is_empty() {
        return true;
    }
    let byte = buf.caret().byte;
    let mut candidate = String::with_capacity(line.len() + text.len());
    candidate.push_str(&line[..byte]);
    candidate.push_str(text);
    candidate.push_str(&line[byte..]);
    metrics.measure(&candidate) <= available_width
}
