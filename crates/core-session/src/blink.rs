//! Caret blink timer. Purely cosmetic: a tick counter toggling a visibility
//! flag on a fixed cadence, consulted by the renderer and reset to visible
//! whenever the caret moves or the buffer changes.

#[derive(Debug, Clone, Copy)]
pub struct CaretBlink {
    interval: u32,
    ticks: u32,
    visible: bool,
}

impl CaretBlink {
    /// `interval` is the number of host render ticks per visibility toggle
    /// (validated positive by the session config).
    pub fn new(interval: u32) -> Self {
        Self {
            interval,
            ticks: 0,
            visible: true,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Advance one host render tick; returns the visibility after it.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.interval {
            self.ticks = 0;
            self.visible = !self.visible;
        }
        self.visible
    }

    /// Snap to visible and restart the cadence. Called on any edit or caret
    /// motion so the caret never blinks away mid-interaction.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_on_the_configured_cadence() {
        let mut b = CaretBlink::new(3);
        assert!(b.visible());
        assert!(b.tick());
        assert!(b.tick());
        assert!(!b.tick(), "third tick toggles off");
        assert!(!b.tick());
        assert!(!b.tick());
        assert!(b.tick(), "sixth tick toggles back on");
    }

    #[test]
    fn reset_restores_visibility_and_phase() {
        let mut b = CaretBlink::new(2);
        b.tick();
        b.tick(); // now hidden
        assert!(!b.visible());
        b.reset();
        assert!(b.visible());
        assert!(b.tick(), "cadence restarts from zero");
    }
}
