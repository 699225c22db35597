//! Input signal vocabulary and accumulator reconciliation.
//!
//! The host's event loop delivers [`InputSignal`]s to the editing session
//! synchronously; each handler runs to completion before the next signal.
//! Character entry does not arrive as discrete keystrokes: the platform
//! owns an accumulating entry string (IME composition, mobile keyboards
//! that buffer autocomplete) and only its current value is observable. The
//! [`Reconciler`] turns successive observations of that string into
//! primitive edit operations.

mod reconciler;

pub use reconciler::{CompositionState, EditOp, Reconciler};

/// Caret navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Messages the editing session consumes. The host translates its platform
/// events (key handlers, composition callbacks, pointer taps, render ticks)
/// into these and delivers them in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSignal {
    /// The external accumulating entry string changed; carries its full
    /// current value, not a delta.
    RawInputChanged(String),
    /// A platform composition session opened (IME). Raw-input changes are
    /// in flux until the matching end signal.
    CompositionStart,
    /// The composition session committed; carries the accumulator's final
    /// value, reconciled immediately.
    CompositionEnd(String),
    /// Discrete navigation key.
    Navigation(Direction),
    /// Discrete backspace key.
    DeleteKey,
    /// Confirm/accept: the host receives the buffer text.
    ConfirmKey,
    /// Pointer tap at viewport-content-relative pixel coordinates.
    PointerDown { x: u32, y: u32 },
    /// Host render tick; drives caret blink only.
    Tick,
}
