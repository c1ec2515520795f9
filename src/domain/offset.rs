pub const ROW_HEIGHT: i32 = 64;
pub const TRAILING_MARGIN: i32 = 10;
pub const VISIBLE_ROWS: usize = 3;

/// Geometry of the fixed-height result viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub row_height: i32,
    pub trailing_margin: i32,
    pub visible_rows: usize,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            trailing_margin: TRAILING_MARGIN,
            visible_rows: VISIBLE_ROWS,
        }
    }
}

impl ListLayout {
    /// Vertical translation in pixels that keeps the active row on screen.
    ///
    /// The last row is pulled fully into view with a trailing margin; any
    /// other row past the second sits one row below the top edge.
    pub fn offset(&self, active_index: usize, result_count: usize) -> i32 {
        if result_count == 0 || result_count <= self.visible_rows {
            return 0;
        }

        let active = active_index as i32;
        let visible = self.visible_rows as i32;
        if active_index == result_count - 1 {
            return (active - visible) * -self.row_height - self.trailing_margin;
        }
        if active_index > 1 {
            return (active - (visible - 1)) * -self.row_height;
        }
        0
    }

    /// Whole rows hidden above the viewport for a given offset. A partially
    /// hidden row counts as scrolled away.
    pub fn rows_scrolled(&self, offset: i32) -> usize {
        if offset >= 0 || self.row_height <= 0 {
            return 0;
        }
        let hidden = -offset;
        ((hidden + self.row_height - 1) / self.row_height) as usize
    }
}

pub fn list_offset(active_index: usize, result_count: usize) -> i32 {
    ListLayout::default().offset(active_index, result_count)
}
