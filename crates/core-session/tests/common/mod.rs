//! Shared fixtures for session integration tests.

use core_session::InputSurface;
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of the fake platform entry surface.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub accumulator: String,
    pub focus_calls: u32,
    pub blur_calls: u32,
    pub clear_calls: u32,
    pub detach_calls: u32,
}

/// Input-surface double recording every lifecycle call. The shared handle
/// plays the host side: tests push typed text into `accumulator` exactly
/// like a platform entry field would.
pub struct RecordingSurface(pub Rc<RefCell<SurfaceLog>>);

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (Self(log.clone()), log)
    }
}

impl InputSurface for RecordingSurface {
    fn focus(&mut self) {
        self.0.borrow_mut().focus_calls += 1;
    }

    fn blur(&mut self) {
        self.0.borrow_mut().blur_calls += 1;
    }

    fn clear(&mut self) {
        let mut log = self.0.borrow_mut();
        log.clear_calls += 1;
        log.accumulator.clear();
    }

    fn detach(&mut self) {
        self.0.borrow_mut().detach_calls += 1;
    }
}
