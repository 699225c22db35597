//! Embeddable multi-line text-entry session.
//!
//! Composes the capped line buffer, the width-constrained line-wrap
//! policy, viewport windowing, caret blink, pointer-to-caret mapping, and
//! the reconciliation of an external accumulating entry source into one
//! [`EditSession`] facade. Hosts inject a [`core_glyph::GlyphMetrics`]
//! implementation and an [`InputSurface`] binding, deliver
//! [`core_input::InputSignal`]s from their event loop, and read back
//! visible lines plus the caret position for drawing.
//!
//! Everything here is single-threaded and synchronous: a handler runs to
//! completion before the next signal, there is no internal parallelism,
//! and the only time-driven state is the blink counter advanced by the
//! host's render tick.

pub mod blink;
pub mod config;
pub mod inserter;
pub mod pointer;
pub mod session;
pub mod viewport;

pub use config::{ConfigError, SessionConfig, load_host_config};
pub use session::{EditSession, InputSurface, SessionStats, SignalOutcome, VisibleLine};
pub use viewport::Window;
