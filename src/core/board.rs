//! Board module - manages the match-3 grid
//!
//! The board is a width x height grid where each cell is empty or holds a
//! piece type. Uses flat row-major storage (y * width + x).
//! Coordinates: (x, y) where x ranges left to right, y ranges top to bottom.
//! Gravity compacts pieces toward the bottom row; vacated cells at the top of
//! a column are refilled from the board's own RNG.
//!
//! Invariant: a freshly generated board never contains a run of 3 or more
//! equal pieces in any row or column. Boards produced by a completed cascade
//! satisfy the same invariant, because resolution only stops once a re-scan
//! finds no runs.

use crate::core::rng::SimpleRng;
use crate::error::GridError;
use crate::types::{Cell, Coord, PieceType, MIN_PIECE_TYPES, MIN_RUN};

/// One cascade pass: how many cells were cleared at which combo depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearStep {
    pub cleared: usize,
    pub combo: u32,
}

/// Everything one player action cleared, one step per cascade pass.
///
/// Steps are recorded in resolution order, so `steps[i].combo` is the 1-based
/// cascade depth and ascends strictly by one. Overlapping row/column groups
/// (L and T shapes) contribute their shared cells to `cleared` once per group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub steps: Vec<ClearStep>,
}

impl CascadeReport {
    /// True if the triggering action cleared anything
    pub fn matched(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Sum of cleared counts across all cascade passes
    pub fn total_cleared(&self) -> usize {
        self.steps.iter().map(|s| s.cleared).sum()
    }

    /// Deepest combo reached, 0 when nothing was cleared
    pub fn max_combo(&self) -> u32 {
        self.steps.last().map(|s| s.combo).unwrap_or(0)
    }
}

/// The puzzle board: generation, swaps, match detection, cascades, area clears
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    piece_types: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    /// Refill source; owning it keeps clears reproducible per seed
    rng: SimpleRng,
}

impl Board {
    /// Generate a match-free board.
    ///
    /// Fills cells left-to-right, top-to-bottom, re-sampling any candidate
    /// that would complete a run of 3 with the two neighbors directly to the
    /// left or directly above. Earlier cells are already match-free, so the
    /// two-neighbor check is sufficient.
    ///
    /// Fails if `piece_types < 3`: with only two types the re-sampling loop
    /// can exclude every candidate and never terminate.
    pub fn generate(
        width: usize,
        height: usize,
        piece_types: usize,
        mut rng: SimpleRng,
    ) -> Result<Self, GridError> {
        if piece_types < MIN_PIECE_TYPES {
            return Err(GridError::TooFewPieceTypes(piece_types));
        }

        let mut board = Self {
            width,
            height,
            piece_types,
            cells: vec![None; width * height],
            rng: SimpleRng::new(1),
        };

        for y in 0..height {
            for x in 0..width {
                let piece = loop {
                    let candidate = PieceType(rng.next_range(piece_types as u32) as u8);
                    if !board.creates_match_at(x, y, candidate) {
                        break candidate;
                    }
                };
                board.cells[y * width + x] = Some(piece);
            }
        }

        board.rng = rng;
        Ok(board)
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of distinct piece types in play
    pub fn piece_types(&self) -> usize {
        self.piece_types
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a byte grid: 0 = empty, piece type + 1 otherwise
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| match cell {
            Some(piece) => piece.0 + 1,
            None => 0,
        }));
    }

    /// Attempt a player swap between two cells.
    ///
    /// Out-of-bounds or non-adjacent coordinates are a no-op, as is a swap
    /// that produces no run (the exchange is reverted). A swap that produces
    /// runs resolves the full cascade before returning; the report's first
    /// step is at combo 1.
    pub fn swap(&mut self, a: Coord, b: Coord) -> CascadeReport {
        let (Some(ia), Some(ib)) = (self.index(a.x, a.y), self.index(b.x, b.y)) else {
            return CascadeReport::default();
        };
        if !a.is_adjacent(&b) {
            return CascadeReport::default();
        }

        self.cells.swap(ia, ib);
        let matches = self.find_matches();
        if matches.is_empty() {
            self.cells.swap(ia, ib);
            return CascadeReport::default();
        }

        self.resolve_matches(matches, 1)
    }

    /// Clear the full row and column through `(center_x, center_y)`.
    ///
    /// The column scan skips `y == center_y` so the center cell appears once.
    /// Cells outside the board are skipped when clearing but still included
    /// in the reported count (cf. `clear_row`, which validates instead).
    pub fn clear_cross(&mut self, center_x: usize, center_y: usize) -> CascadeReport {
        let mut cells = Vec::with_capacity(self.width + self.height);
        for x in 0..self.width {
            cells.push(Coord::new(x, center_y));
        }
        for y in 0..self.height {
            if y == center_y {
                continue;
            }
            cells.push(Coord::new(center_x, y));
        }

        self.clear_cells(&cells, 1)
    }

    /// Clear every cell in the given row, then cascade.
    ///
    /// Fails fast on an out-of-range row.
    pub fn clear_row(&mut self, row: usize) -> Result<CascadeReport, GridError> {
        if row >= self.height {
            return Err(GridError::RowOutOfBounds {
                row,
                height: self.height,
            });
        }

        let cells: Vec<Coord> = (0..self.width).map(|x| Coord::new(x, row)).collect();
        Ok(self.clear_cells(&cells, 1))
    }

    /// Clear an explicit cell list at the given combo depth, then run the
    /// collapse/re-scan pipeline for follow-up cascades.
    ///
    /// The reported count is the length of the requested list, whether or not
    /// each cell held a piece.
    fn clear_cells(&mut self, cells: &[Coord], combo: u32) -> CascadeReport {
        for cell in cells {
            if let Some(idx) = self.index(cell.x, cell.y) {
                self.cells[idx] = None;
            }
        }

        let mut report = CascadeReport {
            steps: vec![ClearStep {
                cleared: cells.len(),
                combo,
            }],
        };

        self.collapse();
        let follow_up = self.find_matches();
        let rest = self.resolve_matches(follow_up, combo + 1);
        report.steps.extend(rest.steps);
        report
    }

    /// Clear matched groups, collapse, re-scan; repeat until no runs remain.
    ///
    /// Each pass strictly reduces the cleared-yet-unfilled positions and the
    /// board is finite, so the loop terminates.
    fn resolve_matches(&mut self, mut matches: Vec<Vec<Coord>>, mut combo: u32) -> CascadeReport {
        let mut report = CascadeReport::default();

        while !matches.is_empty() {
            let mut cleared = 0;
            for group in &matches {
                for cell in group {
                    self.cells[cell.y * self.width + cell.x] = None;
                    cleared += 1;
                }
            }

            report.steps.push(ClearStep { cleared, combo });

            self.collapse();
            matches = self.find_matches();
            combo += 1;
        }

        report
    }

    /// Compact every column downward and refill the vacated cells at the top.
    ///
    /// Refills are unconstrained fresh samples: a collapsed board may itself
    /// contain runs, which the caller's re-scan picks up.
    fn collapse(&mut self) {
        for x in 0..self.width {
            let mut write_y = self.height;
            for y in (0..self.height).rev() {
                if let Some(piece) = self.cells[y * self.width + x] {
                    write_y -= 1;
                    if write_y != y {
                        self.cells[write_y * self.width + x] = Some(piece);
                        self.cells[y * self.width + x] = None;
                    }
                }
            }

            for y in 0..write_y {
                let piece = PieceType(self.rng.next_range(self.piece_types as u32) as u8);
                self.cells[y * self.width + x] = Some(piece);
            }
        }
    }

    /// Scan every row and every column for maximal runs of length >= 3.
    ///
    /// Row groups and column groups are reported independently, so an L- or
    /// T-shaped match yields two groups sharing the corner cell.
    fn find_matches(&self) -> Vec<Vec<Coord>> {
        let mut groups = Vec::new();

        // Rows, left to right
        for y in 0..self.height {
            let mut run = 1usize;
            for x in 1..self.width {
                if self.same_piece(x, y, x - 1, y) {
                    run += 1;
                } else {
                    if run >= MIN_RUN {
                        groups.push((0..run).map(|i| Coord::new(x - 1 - i, y)).collect());
                    }
                    run = 1;
                }
            }
            if run >= MIN_RUN {
                groups.push((0..run).map(|i| Coord::new(self.width - 1 - i, y)).collect());
            }
        }

        // Columns, top to bottom
        for x in 0..self.width {
            let mut run = 1usize;
            for y in 1..self.height {
                if self.same_piece(x, y, x, y - 1) {
                    run += 1;
                } else {
                    if run >= MIN_RUN {
                        groups.push((0..run).map(|i| Coord::new(x, y - 1 - i)).collect());
                    }
                    run = 1;
                }
            }
            if run >= MIN_RUN {
                groups.push((0..run).map(|i| Coord::new(x, self.height - 1 - i)).collect());
            }
        }

        groups
    }

    /// Whether two in-bounds cells hold the same non-empty piece type
    #[inline]
    fn same_piece(&self, ax: usize, ay: usize, bx: usize, by: usize) -> bool {
        match (
            self.cells[ay * self.width + ax],
            self.cells[by * self.width + bx],
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Whether placing `piece` at (x, y) would complete a run of 3 with the
    /// two already-placed neighbors to the left or above
    fn creates_match_at(&self, x: usize, y: usize, piece: PieceType) -> bool {
        if x >= 2
            && self.cells[y * self.width + x - 1] == Some(piece)
            && self.cells[y * self.width + x - 2] == Some(piece)
        {
            return true;
        }

        if y >= 2
            && self.cells[(y - 1) * self.width + x] == Some(piece)
            && self.cells[(y - 2) * self.width + x] == Some(piece)
        {
            return true;
        }

        false
    }

    /// Create from a 2D vector for testing (rows of cells, top row first)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>, piece_types: usize, rng: SimpleRng) -> Self {
        let height = cells_2d.len();
        let width = cells_2d.first().map(Vec::len).unwrap_or(0);
        assert!(cells_2d.iter().all(|row| row.len() == width));

        let mut cells = Vec::with_capacity(width * height);
        for row in &cells_2d {
            cells.extend(row.iter().copied());
        }

        Self {
            width,
            height,
            piece_types,
            cells,
            rng,
        }
    }

    /// Overwrite one cell for testing
    #[cfg(test)]
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y).expect("test coordinate out of bounds");
        self.cells[idx] = cell;
    }
}
