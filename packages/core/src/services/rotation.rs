//! Slideshow Rotation
//!
//! Cursor arithmetic for the display rotation: a single index into the
//! active subset, advanced round-robin on a fixed tick and clamped back
//! into range whenever the subset shrinks. The cursor knows nothing about
//! timers or content; [`PlaybackService`] owns the tick loop and feeds the
//! subset size in.
//!
//! [`PlaybackService`]: crate::services::PlaybackService

/// Round-robin cursor over the active content subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotation {
    cursor: usize,
}

impl Rotation {
    /// Create a rotation positioned at the first slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw cursor position, independent of any subset size
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pull the cursor back into range after the active subset changed.
    ///
    /// A cursor that fell off the end resets to the first slot rather
    /// than the last, so a shrunken rotation restarts from the top.
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = 0;
        }
    }

    /// Advance one slot, wrapping around the subset.
    ///
    /// Clamps first, so a stale cursor cannot wrap from out of range.
    /// With an empty subset the cursor holds at zero.
    pub fn advance(&mut self, len: usize) {
        self.clamp(len);
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Index to display for a subset of `len` items, if any.
    ///
    /// Returns `None` for an empty subset. A cursor beyond the end maps
    /// to the first slot, mirroring [`clamp`](Self::clamp) without
    /// mutating.
    pub fn current(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else if self.cursor < len {
            Some(self.cursor)
        } else {
            Some(0)
        }
    }
}
