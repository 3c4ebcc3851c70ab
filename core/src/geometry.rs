//! Integer grid geometry: displacements, cells, rectangles and directions.
//!
//! Coordinates cover the whole `i32` range. Plain arithmetic saturates at the
//! limits; the `checked_*` forms report overflow instead.

use std::{
    fmt,
    iter::FusedIterator,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// Integer displacement between two cells.
///
/// The first component runs along rows and the second along columns, so a
/// vector of `(1, 0)` moves one row down and `(0, -1)` one column left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    row_delta: i32,
    column_delta: i32,
}

impl Vector {
    /// Displacement that leaves a cell where it is.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a vector from its row and column components.
    #[must_use]
    pub const fn new(row_delta: i32, column_delta: i32) -> Self {
        Self {
            row_delta,
            column_delta,
        }
    }

    /// Change in row index.
    #[must_use]
    pub const fn row_delta(&self) -> i32 {
        self.row_delta
    }

    /// Change in column index.
    #[must_use]
    pub const fn column_delta(&self) -> i32 {
        self.column_delta
    }

    /// Component-wise sum of two vectors, saturating at the `i32` limits.
    #[must_use]
    pub const fn add(self, other: Vector) -> Self {
        Self::new(
            self.row_delta.saturating_add(other.row_delta),
            self.column_delta.saturating_add(other.column_delta),
        )
    }

    /// Component-wise difference of two vectors, saturating at the `i32` limits.
    #[must_use]
    pub const fn subtract(self, other: Vector) -> Self {
        Self::new(
            self.row_delta.saturating_sub(other.row_delta),
            self.column_delta.saturating_sub(other.column_delta),
        )
    }

    /// Sum of the absolute components.
    #[must_use]
    pub const fn manhattan_length(self) -> u64 {
        self.row_delta.unsigned_abs() as u64 + self.column_delta.unsigned_abs() as u64
    }

    /// Reports whether the vector is a single step along exactly one axis.
    ///
    /// Zero-length and diagonal displacements are not unit steps.
    #[must_use]
    pub const fn is_unit_step(self) -> bool {
        self.manhattan_length() == 1
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Self::Output {
        Vector::add(self, other)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Self::Output {
        Vector::subtract(self, other)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({},{})", self.row_delta, self.column_delta)
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Coordinates are signed so arrangements may extend in any direction from
/// the origin. Ordering is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    row: i32,
    column: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Cell reached by applying the provided displacement, clamped to the
    /// coordinate limits.
    #[must_use]
    pub const fn translate(self, vector: Vector) -> Self {
        Self::new(
            self.row.saturating_add(vector.row_delta()),
            self.column.saturating_add(vector.column_delta()),
        )
    }

    /// Cell reached by applying the provided displacement, or `None` when it
    /// lies beyond the coordinate limits.
    #[must_use]
    pub const fn checked_translate(self, vector: Vector) -> Option<Self> {
        let Some(row) = self.row.checked_add(vector.row_delta()) else {
            return None;
        };
        let Some(column) = self.column.checked_add(vector.column_delta()) else {
            return None;
        };
        Some(Self::new(row, column))
    }

    /// Displacement that carries `other` onto `self`, saturating at the
    /// `i32` limits.
    #[must_use]
    pub const fn subtract(self, other: Cell) -> Vector {
        Vector::new(
            self.row.saturating_sub(other.row),
            self.column.saturating_sub(other.column),
        )
    }

    /// Displacement that carries `other` onto `self`, or `None` when it does
    /// not fit in a [`Vector`].
    #[must_use]
    pub const fn checked_subtract(self, other: Cell) -> Option<Vector> {
        let Some(row_delta) = self.row.checked_sub(other.row) else {
            return None;
        };
        let Some(column_delta) = self.column.checked_sub(other.column) else {
            return None;
        };
        Some(Vector::new(row_delta, column_delta))
    }

    /// Component-wise minimum of two cells.
    #[must_use]
    pub fn minimal_cell(self, other: Cell) -> Self {
        Self::new(self.row.min(other.row), self.column.min(other.column))
    }

    /// Component-wise maximum of two cells.
    #[must_use]
    pub fn maximal_cell(self, other: Cell) -> Self {
        Self::new(self.row.max(other.row), self.column.max(other.column))
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Cell) -> u64 {
        self.row.abs_diff(other.row) as u64 + self.column.abs_diff(other.column) as u64
    }

    /// Every cell in the inclusive box spanned by two corners, row-major.
    ///
    /// The corners may be given in any order; the box is normalised first,
    /// so both corners are always included and the range holds
    /// `(|drow| + 1) * (|dcol| + 1)` cells.
    #[must_use]
    pub fn range(corner1: Cell, corner2: Cell) -> CellRange {
        CellBounds::from_corners(corner1, corner2).cells()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({},{})", self.row, self.column)
    }
}

/// Axis-aligned inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellBounds {
    min: Cell,
    max: Cell,
}

impl CellBounds {
    /// Creates bounds covering both corners, whatever their order.
    #[must_use]
    pub fn from_corners(corner1: Cell, corner2: Cell) -> Self {
        Self {
            min: corner1.minimal_cell(corner2),
            max: corner1.maximal_cell(corner2),
        }
    }

    /// Bounds that cover exactly one cell.
    #[must_use]
    pub const fn single(cell: Cell) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    /// Upper-left corner.
    #[must_use]
    pub const fn min(&self) -> Cell {
        self.min
    }

    /// Lower-right corner.
    #[must_use]
    pub const fn max(&self) -> Cell {
        self.max
    }

    /// Reports whether the cell lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row() >= self.min.row()
            && cell.row() <= self.max.row()
            && cell.column() >= self.min.column()
            && cell.column() <= self.max.column()
    }

    /// Smallest bounds covering both `self` and the provided cell.
    #[must_use]
    pub fn include(self, cell: Cell) -> Self {
        Self {
            min: self.min.minimal_cell(cell),
            max: self.max.maximal_cell(cell),
        }
    }

    /// Number of rows spanned.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.min.row().abs_diff(self.max.row()).saturating_add(1)
    }

    /// Number of columns spanned.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.min.column().abs_diff(self.max.column()).saturating_add(1)
    }

    /// Restartable row-major enumeration of the covered cells.
    #[must_use]
    pub const fn cells(&self) -> CellRange {
        CellRange {
            min: self.min,
            max: self.max,
        }
    }
}

/// Finite, restartable row-major sequence of cells.
///
/// The range is a plain value; each call to [`CellRange::iter`] starts a
/// fresh pass from the first cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    min: Cell,
    max: Cell,
}

impl CellRange {
    /// Total number of cells the range yields.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let rows = (self.min.row().abs_diff(self.max.row()) as usize).saturating_add(1);
        let columns = (self.min.column().abs_diff(self.max.column()) as usize).saturating_add(1);
        rows.saturating_mul(columns)
    }

    /// Starts a new pass over the range.
    #[must_use]
    pub fn iter(&self) -> CellRangeIter {
        CellRangeIter {
            range: *self,
            next: Some(self.min),
            remaining: self.cell_count(),
        }
    }
}

impl IntoIterator for CellRange {
    type Item = Cell;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CellRange`].
#[derive(Clone, Debug)]
pub struct CellRangeIter {
    range: CellRange,
    next: Option<Cell>,
    remaining: usize,
}

impl Iterator for CellRangeIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let CellRange { min, max } = self.range;
        self.next = if current.column() < max.column() {
            Some(Cell::new(current.row(), current.column() + 1))
        } else if current.row() < max.row() {
            Some(Cell::new(current.row() + 1, min.column()))
        } else {
            None
        };
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CellRangeIter {}

impl FusedIterator for CellRangeIter {}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit displacement for the direction.
    #[must_use]
    pub const fn vector(self) -> Vector {
        match self {
            Self::North => Vector::new(-1, 0),
            Self::East => Vector::new(0, 1),
            Self::South => Vector::new(1, 0),
            Self::West => Vector::new(0, -1),
        }
    }

    /// Direction of a unit step between two cells, if they are adjacent.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let step = to.subtract(from);
        Self::ALL
            .into_iter()
            .find(|direction| direction.vector() == step)
    }
}
