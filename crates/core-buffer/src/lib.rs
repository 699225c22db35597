//! Capped line buffer with a single caret.
//!
//! `LineBuffer` owns an ordered sequence of lines (1..=`max_lines`, never
//! empty even when all text is deleted) and the caret editing them. It is
//! deliberately width-agnostic: whether an insertion fits the viewport is
//! the caller's decision; this type only applies the final splice and keeps
//! the caret valid.
//!
//! Invariants, held after every public call:
//! * `1 <= line_count() <= max_lines()`.
//! * No line contains a raw `\n`.
//! * The caret names an existing line and a cluster boundary within it
//!   (`0 <= byte <= line.len()`).
//!
//! None of the edit operations fail. Edge cases (delete at the origin, split
//! at the line cap) resolve to no-ops by policy, not errors.

use core_glyph::grapheme;

pub mod motion;

/// Hard upper bound on the configurable line cap.
pub const LINE_CAP_MAX: usize = 100;

/// Caret position: line index plus byte offset within that line. The byte
/// offset always sits on an extended-grapheme-cluster boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub line: usize,
    pub byte: usize,
}

impl Caret {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }

    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    caret: Caret,
    max_lines: usize,
}

impl LineBuffer {
    /// Empty buffer: one empty line, caret at the origin.
    ///
    /// `max_lines` is assumed validated by the session configuration
    /// (1..=[`LINE_CAP_MAX`]); debug builds assert it.
    pub fn new(max_lines: usize) -> Self {
        debug_assert!((1..=LINE_CAP_MAX).contains(&max_lines));
        Self {
            lines: vec![String::new()],
            caret: Caret::origin(),
            max_lines,
        }
    }

    /// Buffer seeded from existing text. Lines beyond the cap are truncated;
    /// the caret lands at the end of the last kept line.
    pub fn from_text(max_lines: usize, text: &str) -> Self {
        let mut buf = Self::new(max_lines);
        let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        lines.truncate(max_lines);
        if lines.is_empty() {
            lines.push(String::new());
        }
        let last = lines.len() - 1;
        let end = lines[last].len();
        buf.lines = lines;
        buf.caret = Caret::new(last, end);
        buf
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Line the caret currently sits on.
    pub fn caret_line(&self) -> &str {
        &self.lines[self.caret.line]
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Move the caret, clamping to a valid position. Out-of-range line
    /// indexes clamp to the last line; the byte offset snaps back to the
    /// nearest cluster boundary at or before the requested offset.
    pub fn set_caret(&mut self, caret: Caret) {
        let line = caret.line.min(self.lines.len() - 1);
        let text = &self.lines[line];
        let mut byte = caret.byte.min(text.len());
        if !grapheme::is_boundary(text, byte) {
            byte = grapheme::prev_boundary(text, byte);
        }
        self.caret = Caret::new(line, byte);
    }

    /// Splice `s` into the caret line at the caret and advance past it.
    /// `s` must not contain a line break; breaks go through [`split_line`].
    ///
    /// [`split_line`]: LineBuffer::split_line
    pub fn insert_str(&mut self, s: &str) {
        debug_assert!(!s.contains('\n'));
        let line = &mut self.lines[self.caret.line];
        line.insert_str(self.caret.byte, s);
        self.caret.byte += s.len();
    }

    /// Delete the cluster left of the caret (backspace). At column zero the
    /// current line merges onto the previous one and the caret lands at the
    /// join point; the merge reports `"\n"` as the removed text so callers
    /// accounting for an external accumulator stay consistent. At the buffer
    /// origin this is a no-op reporting `None`.
    pub fn delete_cluster_before(&mut self) -> Option<String> {
        let Caret { line, byte } = self.caret;
        if byte == 0 {
            if line == 0 {
                return None;
            }
            let merged = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            let join = prev.len();
            prev.push_str(&merged);
            self.caret = Caret::new(line - 1, join);
            return Some("\n".to_owned());
        }
        let text = &mut self.lines[line];
        let start = grapheme::prev_boundary(text, byte);
        let removed = text[start..byte].to_owned();
        text.replace_range(start..byte, "");
        self.caret.byte = start;
        Some(removed)
    }

    /// Split the caret line at the caret: the tail moves to a new line below
    /// and the caret lands at its start. Returns `false` (no-op) when the
    /// buffer already holds `max_lines` lines.
    pub fn split_line(&mut self) -> bool {
        if self.lines.len() >= self.max_lines {
            return false;
        }
        let Caret { line, byte } = self.caret;
        let tail = self.lines[line].split_off(byte);
        self.lines.insert(line + 1, tail);
        self.caret = Caret::new(line + 1, 0);
        true
    }

    /// All lines joined by `\n` — the sole externally persisted artifact.
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Total char count of the buffer, line breaks included. Matches the
    /// char length of [`full_text`] without building the string.
    ///
    /// [`full_text`]: LineBuffer::full_text
    pub fn char_count(&self) -> usize {
        let chars: usize = self.lines.iter().map(|l| l.chars().count()).sum();
        chars + self.lines.len() - 1
    }
}
