//! Backslash escape shim: doubling on direct entry, atomic pair deletion,
//! and the composition-path exemption.

use core_glyph::MonoMetrics;
use core_input::InputSignal;
use core_session::{EditSession, SessionConfig};

fn session(escape: bool) -> EditSession<MonoMetrics> {
    let cfg = SessionConfig {
        max_lines: 3,
        viewport_width: 100,
        viewport_height: 54,
        escape_backslash: escape,
        blink_interval: 30,
    };
    EditSession::new(cfg, MonoMetrics::new(10, 18)).unwrap()
}

#[test]
fn backslash_doubles_on_direct_entry() {
    let mut s = session(true);
    s.handle(InputSignal::RawInputChanged("\\".to_owned()));
    assert_eq!(s.full_text(), "\\\\");
}

#[test]
fn direct_backspace_removes_the_pair_atomically() {
    let mut s = session(true);
    s.handle(InputSignal::RawInputChanged("\\".to_owned()));
    s.handle(InputSignal::DeleteKey);
    assert_eq!(s.full_text(), "", "one delete removes both halves");
}

#[test]
fn reconciled_backspace_removes_the_pair_too() {
    let mut s = session(true);
    // Accumulator: "a", "a\", then backspace to "a". The single-char
    // shrink must take the whole doubled pair with it.
    for step in ["a", "a\\", "a"] {
        s.handle(InputSignal::RawInputChanged(step.to_owned()));
    }
    assert_eq!(s.full_text(), "a");
}

#[test]
fn composition_commits_are_exempt_from_doubling() {
    let mut s = session(true);
    s.handle(InputSignal::CompositionStart);
    s.handle(InputSignal::CompositionEnd("\\".to_owned()));
    assert_eq!(s.full_text(), "\\", "committed text is replayed verbatim");
}

#[test]
fn policy_off_means_no_doubling() {
    let mut s = session(false);
    s.handle(InputSignal::RawInputChanged("\\".to_owned()));
    assert_eq!(s.full_text(), "\\");
    s.handle(InputSignal::RawInputChanged("".to_owned()));
    assert_eq!(s.full_text(), "");
}

#[test]
fn lone_backslash_still_deletes_cleanly() {
    // A backslash that entered through composition is un-doubled; escape
    // deletion must not eat the character before it.
    let mut s = session(true);
    s.handle(InputSignal::RawInputChanged("a".to_owned()));
    s.handle(InputSignal::CompositionStart);
    s.handle(InputSignal::CompositionEnd("a\\".to_owned()));
    assert_eq!(s.full_text(), "a\\");
    s.handle(InputSignal::DeleteKey);
    assert_eq!(s.full_text(), "a");
}
