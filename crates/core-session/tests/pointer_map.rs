//! Tap-to-caret resolution through the session, including window offsets.

use core_buffer::Caret;
use core_glyph::MonoMetrics;
use core_input::{Direction, InputSignal};
use core_session::{EditSession, SessionConfig};

fn session(text: &str) -> EditSession<MonoMetrics> {
    let cfg = SessionConfig {
        max_lines: 10,
        viewport_width: 100, // ten 10px cells
        viewport_height: 54, // three 18px rows
        escape_backslash: false,
        blink_interval: 30,
    };
    EditSession::with_text(cfg, MonoMetrics::new(10, 18), text).unwrap()
}

#[test]
fn taps_snap_to_cluster_midpoints() {
    let mut s = session("ab");
    s.handle(InputSignal::PointerDown { x: 4, y: 0 });
    assert_eq!(s.caret(), Caret::new(0, 0));
    s.handle(InputSignal::PointerDown { x: 14, y: 0 });
    assert_eq!(s.caret(), Caret::new(0, 1));
    s.handle(InputSignal::PointerDown { x: 25, y: 0 });
    assert_eq!(s.caret(), Caret::new(0, 2));
}

#[test]
fn tap_rows_clamp_to_buffer() {
    let mut s = session("a\nb");
    s.handle(InputSignal::PointerDown { x: 0, y: 53 });
    assert_eq!(s.caret().line, 1, "row past buffer clamps to last line");
}

#[test]
fn taps_resolve_within_the_scrolled_window() {
    // Six lines, three visible; caret starts on the last line so the
    // window is anchored at the bottom.
    let mut s = session("l0\nl1\nl2\nl3\nl4\nl5");
    assert_eq!(s.caret().line, 5);
    // Top visible row is line 3; a tap on the middle visible row must hit
    // line 4, not line 1.
    s.handle(InputSignal::PointerDown { x: 0, y: 18 });
    assert_eq!(s.caret(), Caret::new(4, 0));
}

#[test]
fn tap_moves_are_plain_caret_moves() {
    let mut s = session("hello");
    s.handle(InputSignal::PointerDown { x: 33, y: 0 });
    assert_eq!(s.caret(), Caret::new(0, 3));
    // Navigation continues from the tapped position.
    s.handle(InputSignal::Navigation(Direction::Right));
    assert_eq!(s.caret(), Caret::new(0, 4));
}
