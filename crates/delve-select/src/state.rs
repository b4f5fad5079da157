use delve_geom::CellCoord;

/// Cursor and gesture state. Owned by the caller and passed in on every query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub cursor: CellCoord,
    pub anchor: Option<CellCoord>,
    pub in_progress: bool,
}

impl SelectionState {
    pub fn at(cursor: CellCoord) -> Self {
        Self {
            cursor,
            anchor: None,
            in_progress: false,
        }
    }

    /// First stage of a two-stage gesture: pin the anchor at the cursor.
    pub fn begin(&mut self) {
        self.anchor = Some(self.cursor);
        self.in_progress = true;
    }

    /// Drop the gesture. Nothing was written, so nothing needs undoing.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.in_progress = false;
    }

    /// Gesture committed; returns the anchor it was started with.
    pub fn finish(&mut self) -> Option<CellCoord> {
        self.in_progress = false;
        self.anchor.take()
    }

    /// Anchor for geometry queries; a gesture that never began is anchored at the cursor.
    #[inline]
    pub fn anchor_or_cursor(&self) -> CellCoord {
        self.anchor.unwrap_or(self.cursor)
    }
}
