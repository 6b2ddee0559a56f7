/// Keeps the frozen header and frozen label column aligned with the grid.
///
/// The grid scroll offset is the single source of truth. The grid reports it
/// once per frame; the header and label column only read translations from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSync {
    offset_x: f32,
    offset_y: f32,
}

impl ScrollSync {
    /// Record the grid's scroll position for this frame.
    pub fn follow_grid(&mut self, offset_x: f32, offset_y: f32) {
        self.offset_x = offset_x.max(0.0);
        self.offset_y = offset_y.max(0.0);
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    /// Horizontal translation applied to the frozen header.
    pub fn header_shift(&self) -> f32 {
        -self.offset_x
    }

    /// Vertical translation applied to the frozen label column.
    pub fn label_shift(&self) -> f32 {
        -self.offset_y
    }

    /// Offset that scrolls `content_x` to the left edge of the grid.
    pub fn scroll_target_for(content_x: f32) -> f32 {
        content_x.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifts_mirror_grid_offset() {
        let mut sync = ScrollSync::default();
        sync.follow_grid(120.0, 48.0);
        assert_eq!(sync.header_shift(), -120.0);
        assert_eq!(sync.label_shift(), -48.0);
        assert_eq!(sync.offset(), (120.0, 48.0));
    }

    #[test]
    fn test_overscroll_is_ignored() {
        let mut sync = ScrollSync::default();
        sync.follow_grid(-5.0, -1.0);
        assert_eq!(sync.offset(), (0.0, 0.0));
        assert_eq!(ScrollSync::scroll_target_for(-30.0), 0.0);
    }
}
