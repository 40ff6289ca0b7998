use crate::chess::{Square, Tint};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The dimensions of a [`Board`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(into = "String", try_from = "String")]
#[display(fmt = "{}x{}", rows, columns)]
pub struct Geometry {
    #[cfg_attr(test, strategy(1u8..=12))]
    rows: u8,
    #[cfg_attr(test, strategy(1u8..=12))]
    columns: u8,
}

/// The reason why a [`Geometry`] could not be constructed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum GeometryError {
    #[display(fmt = "failed to parse board geometry, expected `RxC`")]
    InvalidSyntax,
    #[display(fmt = "a board must have at least one row and one column")]
    Empty,
}

impl Geometry {
    /// Constructs [`Geometry`] if both dimensions are non-zero.
    pub fn new(rows: u8, columns: u8) -> Result<Self, GeometryError> {
        if rows == 0 || columns == 0 {
            Err(GeometryError::Empty)
        } else {
            Ok(Geometry { rows, columns })
        }
    }

    /// The number of rows.
    #[inline(always)]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// The number of columns.
    #[inline(always)]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Whether `sq` lies within these dimensions.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        sq.row < self.rows && sq.column < self.columns
    }

    /// The number of squares.
    #[inline(always)]
    pub fn area(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    fn index(&self, sq: Square) -> Option<usize> {
        self.contains(sq)
            .then(|| sq.row as usize * self.columns as usize + sq.column as usize)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            rows: 8,
            columns: 8,
        }
    }
}

impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, columns) = s.split_once('x').ok_or(GeometryError::InvalidSyntax)?;
        let rows = rows.parse().map_err(|_| GeometryError::InvalidSyntax)?;
        let columns = columns.parse().map_err(|_| GeometryError::InvalidSyntax)?;
        Geometry::new(rows, columns)
    }
}

impl From<Geometry> for String {
    fn from(g: Geometry) -> Self {
        g.to_string()
    }
}

impl TryFrom<String> for Geometry {
    type Error = GeometryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// The attributes of a single square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Cell {
    /// Whether pieces may stand on or pass through this square.
    pub habitable: bool,
    /// Overrides the default checkered color.
    pub tint: Option<Tint>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            habitable: true,
            tint: None,
        }
    }
}

/// The reason why a [`Board`] could not be decoded.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected {} cells, found {}", expected, found)]
pub struct BoardShapeError {
    expected: usize,
    found: usize,
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename = "Board")]
struct RawBoard {
    geometry: Geometry,
    cells: Vec<Cell>,
}

/// The geometry of one playing surface along with its per-square attributes.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(into = "RawBoard", try_from = "RawBoard")]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Geometry::default())
    }
}

impl Board {
    /// A fully habitable board with no color overrides.
    pub fn new(geometry: Geometry) -> Self {
        Board {
            geometry,
            cells: vec![Cell::default(); geometry.area()],
        }
    }

    /// This board's [`Geometry`].
    #[inline(always)]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Whether `sq` exists on this board.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        self.geometry.contains(sq)
    }

    /// The attributes of `sq`, if it exists.
    #[inline(always)]
    pub fn cell(&self, sq: Square) -> Option<&Cell> {
        self.geometry.index(sq).map(|i| &self.cells[i])
    }

    /// Mutable attributes of `sq`, if it exists.
    #[inline(always)]
    pub fn cell_mut(&mut self, sq: Square) -> Option<&mut Cell> {
        self.geometry.index(sq).map(|i| &mut self.cells[i])
    }

    /// Whether `sq` exists and is habitable.
    #[inline(always)]
    pub fn is_habitable(&self, sq: Square) -> bool {
        self.cell(sq).is_some_and(|c| c.habitable)
    }

    /// An iterator over all squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let Geometry { rows, columns } = self.geometry;
        (0..rows).flat_map(move |r| (0..columns).map(move |c| Square::new(r, c)))
    }

    /// A board of another [`Geometry`] that keeps the attributes of the squares both share.
    pub fn reshape(&self, geometry: Geometry) -> Self {
        let mut board = Board::new(geometry);
        for sq in self.squares() {
            if let (Some(&cell), Some(target)) = (self.cell(sq), board.cell_mut(sq)) {
                *target = cell;
            }
        }

        board
    }
}

impl From<Board> for RawBoard {
    fn from(b: Board) -> Self {
        RawBoard {
            geometry: b.geometry,
            cells: b.cells,
        }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardShapeError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.cells.len() != raw.geometry.area() {
            return Err(BoardShapeError {
                expected: raw.geometry.area(),
                found: raw.cells.len(),
            });
        }

        Ok(Board {
            geometry: raw.geometry,
            cells: raw.cells,
        })
    }
}
