//! The editing session facade.
//!
//! One `EditSession` corresponds to one live editing surface: it owns the
//! line buffer and caret, the reconciler tracking the external entry
//! string, the blink timer, and the scoped binding to the platform input
//! surface. Handlers run synchronously to completion; the session is never
//! shared across concurrent editing surfaces.
//!
//! Invariants, held after every handled signal:
//! * buffer structure: `1 <= line_count <= max_lines`, caret valid;
//! * the caret line is inside the derived window;
//! * the reconciler baseline matches the external accumulator — every edit
//!   applied outside reconciliation resets the baseline and clears the
//!   accumulator through the surface binding.
//!
//! Logging policy: buffer and accumulator content never reaches the log
//! stream; events carry lengths, counts, and outcomes only.

use crate::blink::CaretBlink;
use crate::config::{ConfigError, SessionConfig};
use crate::inserter::{self, InsertOutcome};
use crate::pointer;
use crate::viewport::{self, Window};
use core_buffer::{Caret, LineBuffer, motion};
use core_glyph::GlyphMetrics;
use core_input::{Direction, EditOp, InputSignal, Reconciler};
use tracing::{debug, info};

/// Scoped binding to the platform text-entry surface. Acquired when the
/// session starts, released exactly once by [`EditSession::teardown`]
/// (or drop) on every exit path.
pub trait InputSurface {
    /// Direct platform focus to the entry surface.
    fn focus(&mut self);
    /// Remove platform focus.
    fn blur(&mut self);
    /// Empty the platform accumulator so the next reconciliation pass
    /// starts from a clean baseline.
    fn clear(&mut self);
    /// Unregister listeners and detach from the surface. Called once.
    fn detach(&mut self);
}

/// One visible line of the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine<'a> {
    pub text: &'a str,
    pub is_caret: bool,
}

/// Counters a host can surface instead of the silent-drop default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Clusters applied to the buffer.
    pub inserted: u64,
    /// Subset of `inserted` that forced a line split first.
    pub wrapped: u64,
    /// Clusters and line breaks discarded at full capacity.
    pub dropped: u64,
    /// Backward deletions applied (cluster or line merge).
    pub deleted: u64,
    /// Line splits applied.
    pub breaks: u64,
}

/// What a handled signal produced beyond internal mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalOutcome {
    Continue,
    /// Confirm was pressed; carries the full buffer text for the host to
    /// persist. The session itself stays alive.
    Confirmed(String),
}

pub struct EditSession<M: GlyphMetrics> {
    config: SessionConfig,
    metrics: M,
    buffer: LineBuffer,
    reconciler: Reconciler,
    blink: CaretBlink,
    surface: Option<Box<dyn InputSurface>>,
    refocus: Option<Box<dyn FnMut()>>,
    stats: SessionStats,
}

impl<M: GlyphMetrics> EditSession<M> {
    /// Validate the configuration and start an empty session. The only
    /// fatal condition this core knows lives here; nothing after
    /// construction returns an error.
    pub fn new(config: SessionConfig, metrics: M) -> Result<Self, ConfigError> {
        Self::with_text(config, metrics, "")
    }

    /// Start a session seeded with existing text (lines beyond the cap are
    /// truncated).
    pub fn with_text(config: SessionConfig, metrics: M, text: &str) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buffer: LineBuffer::from_text(config.max_lines, text),
            reconciler: Reconciler::new(),
            blink: CaretBlink::new(config.blink_interval),
            surface: None,
            refocus: None,
            stats: SessionStats::default(),
            config,
            metrics,
        })
    }

    /// Attach the platform entry surface and focus it.
    pub fn bind_surface(&mut self, mut surface: Box<dyn InputSurface>) {
        surface.focus();
        self.surface = Some(surface);
        info!(target: "session", "input binding acquired");
    }

    /// Host callback invoked after caret-affecting pointer events. Some
    /// platforms need a blur-then-delayed-focus dance to regain the entry
    /// surface after a tap; that quirk lives behind this hook.
    pub fn set_refocus_hook(&mut self, hook: impl FnMut() + 'static) {
        self.refocus = Some(Box::new(hook));
    }

    /// Dispatch one input signal. Handlers run to completion; the returned
    /// outcome is `Continue` for everything except confirm.
    pub fn handle(&mut self, signal: InputSignal) -> SignalOutcome {
        match signal {
            InputSignal::RawInputChanged(current) => {
                let ops = self.reconciler.observe(&current);
                self.apply_ops(ops, false);
            }
            InputSignal::CompositionStart => self.reconciler.composition_start(),
            InputSignal::CompositionEnd(current) => {
                let ops = self.reconciler.composition_end(&current);
                self.apply_ops(ops, true);
            }
            InputSignal::Navigation(dir) => self.on_navigation(dir),
            InputSignal::DeleteKey => self.on_delete_key(),
            InputSignal::ConfirmKey => return SignalOutcome::Confirmed(self.on_confirm()),
            InputSignal::PointerDown { x, y } => self.on_pointer_down(x, y),
            InputSignal::Tick => {
                self.blink.tick();
            }
        }
        SignalOutcome::Continue
    }

    // ---- reconciled edits ------------------------------------------------

    fn apply_ops(&mut self, ops: Vec<EditOp>, from_composition: bool) {
        if ops.is_empty() {
            return;
        }
        // The doubling shim guards direct character entry only; a committed
        // composition is replayed verbatim.
        let escape = self.config.escape_backslash && !from_composition;
        for op in ops {
            match op {
                EditOp::Insert(cluster) => self.insert_cluster(&cluster, escape),
                EditOp::Break => {
                    if self.buffer.split_line() {
                        self.stats.breaks += 1;
                    } else {
                        self.stats.dropped += 1;
                        debug!(target: "session.insert", "line break dropped at cap");
                    }
                }
                EditOp::Delete { chars } => self.delete_chars(chars),
            }
        }
        self.blink.reset();
    }

    fn insert_cluster(&mut self, cluster: &str, escape: bool) {
        let text = if escape && cluster == "\\" {
            "\\\\"
        } else {
            cluster
        };
        match inserter::insert_cluster(
            &mut self.buffer,
            &self.metrics,
            self.config.viewport_width,
            text,
        ) {
            InsertOutcome::Fit => self.stats.inserted += 1,
            InsertOutcome::Wrapped => {
                self.stats.inserted += 1;
                self.stats.wrapped += 1;
            }
            InsertOutcome::Dropped => {
                self.stats.dropped += 1;
                debug!(
                    target: "session.insert",
                    cluster_bytes = text.len(),
                    "cluster dropped at capacity"
                );
            }
        }
    }

    /// Apply a reconciled deletion of `chars` accumulator chars, clamped at
    /// the buffer origin.
    fn delete_chars(&mut self, chars: usize) {
        let mut remaining = chars;
        while remaining > 0 {
            match self.delete_left_unit() {
                Some(consumed) => remaining = remaining.saturating_sub(consumed),
                None => break,
            }
        }
    }

    /// One backspace step. Removes the cluster left of the caret (or merges
    /// lines); under the escape shim a doubled backslash comes out as one
    /// atomic unit. Returns the accumulator char count the step consumed,
    /// `None` at the buffer origin.
    fn delete_left_unit(&mut self) -> Option<usize> {
        let removed = self.buffer.delete_cluster_before()?;
        self.stats.deleted += 1;
        if self.config.escape_backslash && removed == "\\" {
            let caret = self.buffer.caret();
            if self.buffer.caret_line()[..caret.byte].ends_with('\\') {
                self.buffer.delete_cluster_before();
            }
            // Either way the pair (or lone half) stood for one entered char.
            return Some(1);
        }
        Some(removed.chars().count())
    }

    // ---- direct-key edits ------------------------------------------------

    fn on_navigation(&mut self, dir: Direction) {
        self.reset_external_baseline();
        match dir {
            Direction::Left => motion::left(&mut self.buffer),
            Direction::Right => motion::right(&mut self.buffer),
            Direction::Up => motion::up(&mut self.buffer),
            Direction::Down => motion::down(&mut self.buffer),
        }
        self.blink.reset();
    }

    fn on_delete_key(&mut self) {
        self.reset_external_baseline();
        self.delete_left_unit();
        self.blink.reset();
    }

    fn on_confirm(&mut self) -> String {
        self.reset_external_baseline();
        self.blink.reset();
        let text = self.buffer.full_text();
        info!(target: "session", text_chars = text.chars().count(), "confirmed");
        text
    }

    fn on_pointer_down(&mut self, x: u32, y: u32) {
        // Taps arrive viewport-relative; translate into content space by
        // the current window start before mapping.
        let window = self.window();
        let y_content = y + window.start as u32 * self.metrics.line_height();
        let caret = pointer::caret_for_point(&self.buffer, &self.metrics, x, y_content);
        self.buffer.set_caret(caret);
        self.reset_external_baseline();
        self.blink.reset();
        debug!(target: "session.pointer", line = caret.line, byte = caret.byte, "caret from tap");
        if let Some(hook) = self.refocus.as_mut() {
            hook();
        }
    }

    /// A primitive edit bypassed the reconciler: forget its baseline and
    /// empty the platform accumulator so nothing is double-counted.
    fn reset_external_baseline(&mut self) {
        self.reconciler.reset();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    // ---- render queries --------------------------------------------------

    fn window(&self) -> Window {
        let visible = viewport::visible_line_count(
            self.config.viewport_height,
            self.metrics.line_height(),
        );
        viewport::window(self.buffer.line_count(), self.buffer.caret().line, visible)
    }

    /// The current window's lines, caret line flagged.
    pub fn visible_lines(&self) -> Vec<VisibleLine<'_>> {
        let window = self.window();
        let caret_line = self.buffer.caret().line;
        (window.start..window.start + window.len)
            .map(|idx| VisibleLine {
                text: self.buffer.line(idx).unwrap_or(""),
                is_caret: idx == caret_line,
            })
            .collect()
    }

    /// Caret position in pixels, relative to the viewport content origin.
    pub fn caret_screen_position(&self) -> (u32, u32) {
        let caret = self.buffer.caret();
        let window = self.window();
        let x = self.metrics.measure(&self.buffer.caret_line()[..caret.byte]);
        let y = (caret.line - window.start) as u32 * self.metrics.line_height();
        (x, y)
    }

    /// Lines joined by `\n` — the sole externally persisted artifact.
    pub fn full_text(&self) -> String {
        self.buffer.full_text()
    }

    pub fn caret(&self) -> Caret {
        self.buffer.caret()
    }

    pub fn caret_visible(&self) -> bool {
        self.blink.visible()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Release the input binding. Idempotent; also runs on drop so an
    /// abnormal teardown path cannot leak a live listener into a dead
    /// session.
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.blur();
            surface.detach();
            info!(target: "session", "input binding released");
        }
    }
}

impl<M: GlyphMetrics> Drop for EditSession<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}
