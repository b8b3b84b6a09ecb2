//! Input flags mutated by input events between ticks.

use tracing::warn;

/// Hand presence and primary-input flags.
///
/// `hand_visible` is driven by a count of visible sources (hands or
/// controllers): it turns on with the first detection and off when the last
/// one is lost.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSignals {
    hand_visible: bool,
    input_down: bool,
    visible_sources: u32,
}

impl InputSignals {
    #[inline]
    #[must_use]
    pub fn hand_visible(&self) -> bool {
        self.hand_visible
    }
    #[inline]
    #[must_use]
    pub fn input_down(&self) -> bool {
        self.input_down
    }
    #[inline]
    #[must_use]
    pub fn visible_sources(&self) -> u32 {
        self.visible_sources
    }

    pub fn press(&mut self) {
        self.input_down = true;
    }

    pub fn release(&mut self) {
        self.input_down = false;
    }

    pub fn source_detected(&mut self) {
        self.visible_sources = self.visible_sources.saturating_add(1);
        self.hand_visible = true;
    }

    /// Record a lost source. Returns `false` when no source was being
    /// tracked; the count stays at zero in that case.
    pub fn source_lost(&mut self) -> bool {
        let matched = self.visible_sources > 0;
        if matched {
            self.visible_sources -= 1;
        } else {
            warn!(target: "cursor", "source lost without a matching detection");
        }
        if self.visible_sources == 0 {
            self.hand_visible = false;
        }
        matched
    }

    /// Forget every tracked source (input disabled or cursor shut down).
    pub fn clear_sources(&mut self) {
        self.visible_sources = 0;
        self.hand_visible = false;
    }
}
