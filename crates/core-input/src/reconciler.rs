//! Accumulator reconciliation.
//!
//! State machine: `Idle` reconciles every observation immediately;
//! `Composing` (between composition start/end signals) ignores raw-input
//! changes because the platform is still rewriting the string, then
//! reconciles once on commit.
//!
//! A reconciliation pass diffs the previous and current observed values by
//! char count only:
//! * longer  -> the appended suffix is replayed as cluster insertions,
//!   with `\n` becoming line breaks;
//! * shorter -> that many backward deletions;
//! * equal   -> no-op. A same-length substitution (IME reinterpreting the
//!   tail) is indistinguishable from a no-op under length diffing and is
//!   dropped; this matches the observed platform behavior rather than
//!   attempting a full alignment.
//!
//! Observations are normalized (NFC, line endings folded to LF) before any
//! comparison, and `previous` stores the normalized form.

use core_glyph::{grapheme, normalize_input};

/// Composition phase of the external entry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionState {
    #[default]
    Idle,
    Composing,
}

/// Primitive edit derived from one reconciliation pass. The session applies
/// these in order through the width-constrained insertion path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert one grapheme cluster at the caret (never a line break).
    Insert(String),
    /// Split the current line at the caret.
    Break,
    /// Delete backwards; `chars` counts accumulator chars, not clusters.
    Delete { chars: usize },
}

/// Tracks the last observed value of the external accumulating entry string
/// and converts each new observation into [`EditOp`]s.
#[derive(Debug, Default)]
pub struct Reconciler {
    previous: String,
    state: CompositionState,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CompositionState {
        self.state
    }

    /// Last observed (normalized) accumulator value.
    pub fn previous(&self) -> &str {
        &self.previous
    }

    /// Raw-input-changed signal. Ignored mid-composition; otherwise runs a
    /// reconciliation pass against the previous observation.
    pub fn observe(&mut self, current: &str) -> Vec<EditOp> {
        if self.state == CompositionState::Composing {
            tracing::trace!(
                target: "session.reconcile",
                current_chars = current.chars().count(),
                "observation ignored mid-composition"
            );
            return Vec::new();
        }
        self.reconcile(current)
    }

    pub fn composition_start(&mut self) {
        tracing::debug!(target: "session.reconcile", "composition start");
        self.state = CompositionState::Composing;
    }

    /// Composition committed: back to `Idle`, then one immediate pass over
    /// the final accumulator value.
    pub fn composition_end(&mut self, current: &str) -> Vec<EditOp> {
        tracing::debug!(target: "session.reconcile", "composition end");
        self.state = CompositionState::Idle;
        self.reconcile(current)
    }

    /// Forget the baseline. Called after any primitive edit that bypassed
    /// reconciliation (navigation, discrete backspace, confirm), paired
    /// with clearing the external accumulator, so the next pass starts
    /// clean. A composition in flight keeps its flag; only the end signal
    /// closes it.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    fn reconcile(&mut self, current: &str) -> Vec<EditOp> {
        let current = normalize_input(current);
        let prev_chars = self.previous.chars().count();
        let cur_chars = current.chars().count();

        let mut ops = Vec::new();
        if cur_chars > prev_chars {
            // Assumed append: everything past the previous length.
            let skip: usize = current
                .char_indices()
                .nth(prev_chars)
                .map(|(i, _)| i)
                .unwrap_or(current.len());
            for cluster in grapheme::iter(&current[skip..]) {
                if cluster == "\n" {
                    ops.push(EditOp::Break);
                } else {
                    ops.push(EditOp::Insert(cluster.to_owned()));
                }
            }
        } else if cur_chars < prev_chars {
            ops.push(EditOp::Delete {
                chars: prev_chars - cur_chars,
            });
        } else if current != self.previous {
            tracing::debug!(
                target: "session.reconcile",
                chars = cur_chars,
                "same-length update dropped"
            );
        }

        tracing::trace!(
            target: "session.reconcile",
            prev_chars,
            cur_chars,
            ops = ops.len(),
            "reconciliation pass"
        );
        self.previous = current;
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(s: &str) -> EditOp {
        EditOp::Insert(s.to_owned())
    }

    #[test]
    fn type_type_backspace_backspace() {
        let mut r = Reconciler::new();
        let mut inserts = 0;
        let mut deletes = 0;
        for step in ["a", "ab", "a", ""] {
            for op in r.observe(step) {
                match op {
                    EditOp::Insert(_) => inserts += 1,
                    EditOp::Delete { chars } => deletes += chars,
                    EditOp::Break => panic!("no breaks expected"),
                }
            }
        }
        assert_eq!(inserts, 2);
        assert_eq!(deletes, 2);
        assert_eq!(r.previous(), "");
    }

    #[test]
    fn multi_char_append_splits_into_clusters() {
        let mut r = Reconciler::new();
        assert_eq!(
            r.observe("a界😀"),
            vec![insert("a"), insert("界"), insert("😀")]
        );
        assert_eq!(r.observe("a界😀x"), vec![insert("x")]);
    }

    #[test]
    fn newline_runs_become_breaks() {
        let mut r = Reconciler::new();
        assert_eq!(
            r.observe("a\n\nb"),
            vec![insert("a"), EditOp::Break, EditOp::Break, insert("b")]
        );
    }

    #[test]
    fn crlf_folds_before_diffing() {
        let mut r = Reconciler::new();
        assert_eq!(r.observe("a\r\nb"), vec![insert("a"), EditOp::Break, insert("b")]);
        // The stored baseline is the folded form: appending one char to the
        // raw accumulator yields exactly one op.
        assert_eq!(r.observe("a\r\nbc"), vec![insert("c")]);
    }

    #[test]
    fn nfc_applies_before_diffing() {
        let mut r = Reconciler::new();
        // Decomposed e + combining acute arrives as two chars but one
        // composed char after NFC; a later precomposed observation of the
        // same text is no change.
        assert_eq!(r.observe("e\u{0301}"), vec![insert("é")]);
        assert!(r.observe("é").is_empty());
    }

    #[test]
    fn shrink_emits_single_delete_with_count() {
        let mut r = Reconciler::new();
        r.observe("abcd");
        assert_eq!(r.observe("a"), vec![EditOp::Delete { chars: 3 }]);
    }

    #[test]
    fn same_length_update_is_noop() {
        let mut r = Reconciler::new();
        r.observe("ab");
        assert!(r.observe("ax").is_empty());
        // The baseline still advances to the observed value.
        assert_eq!(r.previous(), "ax");
    }

    #[test]
    fn composing_ignores_observations_until_end() {
        let mut r = Reconciler::new();
        r.observe("a");
        r.composition_start();
        assert!(r.observe("a日").is_empty());
        assert!(r.observe("a日本").is_empty());
        assert_eq!(r.state(), CompositionState::Composing);
        let ops = r.composition_end("a日本");
        assert_eq!(ops, vec![insert("日"), insert("本")]);
        assert_eq!(r.state(), CompositionState::Idle);
    }

    #[test]
    fn reset_clears_baseline_only() {
        let mut r = Reconciler::new();
        r.observe("abc");
        r.reset();
        assert_eq!(r.previous(), "");
        // Accumulator was cleared externally in tandem, so the next
        // observation is a fresh append.
        assert_eq!(r.observe("z"), vec![insert("z")]);

        r.composition_start();
        r.reset();
        assert_eq!(r.state(), CompositionState::Composing);
    }
}
