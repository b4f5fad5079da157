use delve_catalog::{CatalogError, Mode, ModeCatalog, ModeDescriptor, SelectionStyle};
use delve_geom::{CellCoord, Direction};
use delve_grid::{Grid, GridError};
use delve_place::{CommitReport, CopyBuffer, PlacementError, commit, paste};
use delve_select::{Highlight, SelectionState, highlight, selected_cells};
use delve_view::{DisplayDescriptor, LayerView, ViewError, Visibility};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::EditorConfig;

/// Input-level intents; key mapping lives elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction, u32),
    Goto { column: i32, row: i32 },
    LayerUp(u32),
    LayerDown(u32),
    SetMode(Mode),
    Select,
    Cancel,
    Paste,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    CursorMoved(CellCoord),
    LayerChanged(usize),
    ModeChanged { mode: Mode, cancelled_gesture: bool },
    GestureStarted(CellCoord),
    Committed(CommitReport),
    Captured { columns: usize, rows: usize, layers: usize },
    Pasted(CommitReport),
    Cancelled,
    Unchanged,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("copy failed: {0}")]
    Capture(#[from] GridError),
    #[error("nothing has been copied yet")]
    NothingToPaste,
}

/// One editing session: owns the grid and every piece of state the engine
/// crates take as parameters.
pub struct EditorSession {
    grid: Grid,
    selection: SelectionState,
    mode: Mode,
    catalog: ModeCatalog,
    visibility: Visibility,
    copy: Option<CopyBuffer>,
    rng: StdRng,
}

impl EditorSession {
    /// Starts on the middle layer with the cursor in the top-left corner.
    pub fn new(grid: Grid, catalog: ModeCatalog, visibility: Visibility, mode: Mode, seed: u64) -> Self {
        let layer = (grid.layers() / 2) as i32;
        Self {
            grid,
            selection: SelectionState::at(CellCoord::new(0, 0, layer)),
            mode,
            catalog,
            visibility,
            copy: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Session with the catalog, view settings, mode, seed and start layer taken
    /// from `cfg`.
    pub fn from_config(grid: Grid, cfg: &EditorConfig) -> Result<Self, CatalogError> {
        let mut s = Self::new(grid, ModeCatalog::load()?, cfg.visibility(), cfg.default_mode(), cfg.editor.seed);
        if let Some(layer) = cfg.editor.start_layer {
            s.set_layer(layer);
        }
        Ok(s)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn cursor(&self) -> CellCoord {
        self.selection.cursor
    }

    #[inline]
    pub fn layer(&self) -> usize {
        self.selection.cursor.layer as usize
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[inline]
    pub fn copy_buffer(&self) -> Option<&CopyBuffer> {
        self.copy.as_ref()
    }

    #[inline]
    pub fn descriptor(&self) -> &ModeDescriptor {
        self.catalog.get(self.mode)
    }

    pub fn set_layer(&mut self, layer: usize) {
        let max = self.grid.layers() - 1;
        self.selection.cursor.layer = layer.min(max) as i32;
    }

    /// Cells the active gesture would touch if committed now.
    pub fn pending_cells(&self) -> Vec<CellCoord> {
        selected_cells(self.descriptor(), self.selection.cursor, self.selection.anchor_or_cursor())
    }

    pub fn highlight_at(&self, column: i32, row: i32) -> Highlight {
        highlight(
            self.descriptor(),
            &self.selection,
            CellCoord::new(column, row, self.selection.cursor.layer),
        )
    }

    pub fn resolve(&self, column: i32, row: i32) -> Result<Option<DisplayDescriptor>, ViewError> {
        self.visibility
            .resolve(&self.grid, self.selection.cursor.layer, column, row)
    }

    pub fn layer_view(&self) -> Result<LayerView, ViewError> {
        LayerView::build(&self.visibility, &self.grid, self.layer())
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Outcome, SessionError> {
        let out = match cmd {
            Command::Move(dir, n) => {
                let (dx, dy) = dir.offset();
                let c = self.selection.cursor;
                self.move_cursor_to(
                    c.column as i64 + dx as i64 * n as i64,
                    c.row as i64 + dy as i64 * n as i64,
                )
            }
            Command::Goto { column, row } => self.move_cursor_to(column as i64, row as i64),
            Command::LayerUp(n) => {
                self.set_layer(self.layer().saturating_add(n as usize));
                Outcome::LayerChanged(self.layer())
            }
            Command::LayerDown(n) => {
                self.set_layer(self.layer().saturating_sub(n as usize));
                Outcome::LayerChanged(self.layer())
            }
            Command::SetMode(mode) => self.change_mode(mode),
            Command::Select => self.select()?,
            Command::Cancel => {
                if self.selection.in_progress {
                    self.selection.cancel();
                    Outcome::Cancelled
                } else {
                    Outcome::Unchanged
                }
            }
            Command::Paste => {
                let buf = self.copy.as_ref().ok_or(SessionError::NothingToPaste)?;
                Outcome::Pasted(paste(&mut self.grid, buf, self.selection.cursor)?)
            }
        };
        log::debug!(target: "session", "{:?} -> {:?}", cmd, out);
        Ok(out)
    }

    /// Targets are i64 so a step count times a direction never wraps before clamping.
    fn move_cursor_to(&mut self, column: i64, row: i64) -> Outcome {
        let c = &mut self.selection.cursor;
        c.column = column.clamp(0, self.grid.columns() as i64 - 1) as i32;
        c.row = row.clamp(0, self.grid.rows() as i64 - 1) as i32;
        Outcome::CursorMoved(*c)
    }

    fn change_mode(&mut self, mode: Mode) -> Outcome {
        let before = self.descriptor().style;
        self.mode = mode;
        let cancelled_gesture = self.selection.in_progress && self.descriptor().style != before;
        if cancelled_gesture {
            self.selection.cancel();
        }
        log::info!(target: "session", "mode: {}", self.descriptor().label);
        Outcome::ModeChanged {
            mode,
            cancelled_gesture,
        }
    }

    fn select(&mut self) -> Result<Outcome, SessionError> {
        let style = self.descriptor().style;
        let cursor = self.selection.cursor;
        if !self.selection.in_progress && style != SelectionStyle::Fixed {
            self.selection.begin();
            return Ok(Outcome::GestureStarted(cursor));
        }
        let anchor = self.selection.finish().unwrap_or(cursor);
        match style {
            SelectionStyle::Free | SelectionStyle::Fixed => {
                let mode = self.catalog.get(self.mode);
                let cells = selected_cells(mode, cursor, anchor);
                let report = commit(&mut self.grid, mode, &cells, &mut self.rng)?;
                log::info!(target: "session", "{}: {} cell(s)", mode.label, report.written);
                Ok(Outcome::Committed(report))
            }
            SelectionStyle::Copy => {
                let buf = CopyBuffer::capture(&self.grid, anchor, cursor)?;
                let (columns, rows, layers) = buf.extent();
                self.copy = Some(buf);
                Ok(Outcome::Captured {
                    columns,
                    rows,
                    layers,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_catalog::Material;

    fn session() -> EditorSession {
        let grid = Grid::solid(4, 6, 6).unwrap();
        EditorSession::new(grid, ModeCatalog::load().unwrap(), Visibility::default(), Mode::Dig, 1)
    }

    #[test]
    fn starts_on_middle_layer() {
        let s = session();
        assert_eq!(s.layer(), 2);
        assert_eq!(s.cursor(), CellCoord::new(0, 0, 2));
    }

    #[test]
    fn config_sets_start_layer_and_mode() {
        let cfg = EditorConfig::from_toml_str("[editor]\nstart_layer = 9\ndefault_mode = \"water\"").unwrap();
        let s = EditorSession::from_config(Grid::solid(4, 2, 2).unwrap(), &cfg).unwrap();
        assert_eq!(s.layer(), 3);
        assert_eq!(s.mode(), Mode::Water);
    }

    #[test]
    fn cursor_and_layer_are_clamped() {
        let mut s = session();
        s.apply(Command::Move(Direction::Left, 3)).unwrap();
        assert_eq!(s.cursor().column, 0);
        s.apply(Command::Move(Direction::Down, 100)).unwrap();
        assert_eq!(s.cursor().row, 5);
        assert_eq!(s.apply(Command::LayerUp(9)).unwrap(), Outcome::LayerChanged(3));
        assert_eq!(s.apply(Command::LayerDown(9)).unwrap(), Outcome::LayerChanged(0));
    }

    #[test]
    fn huge_step_counts_clamp_in_the_right_direction() {
        let mut s = session();
        s.apply(Command::Goto { column: 2, row: 1 }).unwrap();
        s.apply(Command::Move(Direction::Right, 3_000_000_000)).unwrap();
        assert_eq!(s.cursor().column, 5);
        s.apply(Command::Move(Direction::Right, i32::MAX as u32)).unwrap();
        assert_eq!(s.cursor().column, 5);
        s.apply(Command::Move(Direction::Up, u32::MAX)).unwrap();
        assert_eq!(s.cursor().row, 0);
        s.apply(Command::Goto { column: i32::MIN, row: i32::MAX }).unwrap();
        assert_eq!((s.cursor().column, s.cursor().row), (0, 5));
    }

    #[test]
    fn two_stage_free_gesture_digs_a_box() {
        let mut s = session();
        s.apply(Command::Goto { column: 1, row: 1 }).unwrap();
        assert!(matches!(s.apply(Command::Select).unwrap(), Outcome::GestureStarted(_)));
        // Nothing is written until the second stage.
        assert_eq!(s.grid().get(CellCoord::new(1, 1, 2)), Ok(Material::Stone.code()));
        s.apply(Command::Goto { column: 2, row: 3 }).unwrap();
        assert_eq!(s.pending_cells().len(), 6);
        let out = s.apply(Command::Select).unwrap();
        assert_eq!(out, Outcome::Committed(CommitReport { written: 6 }));
        assert_eq!(s.grid().get(CellCoord::new(2, 3, 2)), Ok(Material::Floor.code()));
        assert!(!s.selection().in_progress);
    }

    #[test]
    fn cancel_discards_gesture_without_writing() {
        let mut s = session();
        s.apply(Command::Select).unwrap();
        assert_eq!(s.apply(Command::Cancel).unwrap(), Outcome::Cancelled);
        assert_eq!(s.apply(Command::Cancel).unwrap(), Outcome::Unchanged);
        assert!(s.grid().cells().iter().all(|&c| c == Material::Stone.code()));
    }

    #[test]
    fn switching_style_cancels_gesture() {
        let mut s = session();
        s.apply(Command::Select).unwrap();
        let out = s.apply(Command::SetMode(Mode::Wall)).unwrap();
        assert_eq!(out, Outcome::ModeChanged { mode: Mode::Wall, cancelled_gesture: false });
        assert!(s.selection().in_progress);
        let out = s.apply(Command::SetMode(Mode::Copy)).unwrap();
        assert_eq!(out, Outcome::ModeChanged { mode: Mode::Copy, cancelled_gesture: true });
        assert!(!s.selection().in_progress);
    }

    #[test]
    fn fixed_mode_commits_immediately() {
        let mut s = session();
        s.apply(Command::SetMode(Mode::Carpenter)).unwrap();
        s.apply(Command::Goto { column: 2, row: 2 }).unwrap();
        let out = s.apply(Command::Select).unwrap();
        assert_eq!(out, Outcome::Committed(CommitReport { written: 9 }));
        assert_eq!(s.grid().get(CellCoord::new(2, 2, 2)), Ok(Material::CarpenterMiddle.code()));
    }

    #[test]
    fn fixed_mode_at_edge_reports_partial_commit() {
        let mut s = session();
        s.apply(Command::SetMode(Mode::Carpenter)).unwrap();
        let err = s.apply(Command::Select).unwrap_err();
        assert!(matches!(err, SessionError::Placement(PlacementError::Incomplete { written: 4, .. })));
        assert_eq!(s.grid().get(CellCoord::new(0, 0, 2)), Ok(Material::CarpenterMiddle.code()));
    }

    #[test]
    fn copy_then_paste() {
        let mut s = session();
        s.apply(Command::Goto { column: 0, row: 0 }).unwrap();
        s.apply(Command::Select).unwrap();
        s.apply(Command::Goto { column: 1, row: 0 }).unwrap();
        s.apply(Command::Select).unwrap();

        assert!(matches!(s.apply(Command::Paste), Err(SessionError::NothingToPaste)));

        s.apply(Command::SetMode(Mode::Door)).unwrap();
        s.apply(Command::Goto { column: 0, row: 0 }).unwrap();
        s.apply(Command::Select).unwrap();
        s.apply(Command::Select).unwrap();
        assert_eq!(s.grid().get(CellCoord::new(0, 0, 2)), Ok(Material::Door.code()));

        s.apply(Command::SetMode(Mode::Copy)).unwrap();
        s.apply(Command::Select).unwrap();
        s.apply(Command::Goto { column: 1, row: 0 }).unwrap();
        let out = s.apply(Command::Select).unwrap();
        assert_eq!(out, Outcome::Captured { columns: 2, rows: 1, layers: 1 });

        s.apply(Command::Goto { column: 3, row: 4 }).unwrap();
        assert_eq!(s.apply(Command::Paste).unwrap(), Outcome::Pasted(CommitReport { written: 2 }));
        assert_eq!(s.grid().get(CellCoord::new(3, 4, 2)), Ok(Material::Door.code()));
        assert_eq!(s.grid().get(CellCoord::new(4, 4, 2)), Ok(Material::Floor.code()));
    }

    #[test]
    fn resolve_follows_current_layer() {
        let mut s = session();
        s.apply(Command::Select).unwrap();
        s.apply(Command::Select).unwrap();
        let d = s.resolve(0, 0).unwrap().unwrap();
        assert_eq!(d.material, Material::Floor);
        assert_eq!(s.highlight_at(0, 0), Highlight::Selection);
        assert_eq!(s.highlight_at(1, 0), Highlight::None);
        assert_eq!(s.layer_view().unwrap().drawn_count(), 4);
    }
}
