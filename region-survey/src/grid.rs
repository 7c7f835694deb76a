use miette::Diagnostic;
use nom::{
    character::complete::{newline, satisfy},
    multi::{many1, separated_list1},
    IResult,
};
use thiserror::Error;

use crate::direction::Direction;

/// Value returned by [`Grid::get`] for out-of-bounds reads.
pub const OUT_OF_BOUNDS: char = '\0';

#[derive(Debug, Error, Diagnostic)]
pub enum SurveyError {
    #[error("input contains no grid rows")]
    #[diagnostic(code(region_survey::empty_grid))]
    EmptyGrid,

    #[error("row {line} has {found} cells, expected {expected}")]
    #[diagnostic(
        code(region_survey::ragged_row),
        help("every row of the grid must have the same length")
    )]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to parse grid: {0}")]
    #[diagnostic(code(region_survey::parse))]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring position one step away in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rectangular board of labeled cells, row-major, shape-immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Builds a grid from rows of labels. Ragged or empty input is rejected
    /// here so the trace never has to deal with it.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self, SurveyError> {
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(SurveyError::EmptyGrid);
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SurveyError::RaggedRow {
                    line: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// The label at `pos`, or [`OUT_OF_BOUNDS`] when `pos` lies outside the
    /// grid. Never fails; callers probe neighbors without bounds checks.
    pub fn get(&self, pos: Position) -> char {
        if !self.valid(pos) {
            return OUT_OF_BOUNDS;
        }
        self.cells[self.index(pos)]
    }

    /// Flat index for board-shaped overlays. Caller must have checked bounds.
    pub(crate) fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// All positions in row-major order, top-to-bottom, left-to-right.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

// region: Nom parser
fn parse_rows(input: &str) -> IResult<&str, Vec<Vec<char>>> {
    separated_list1(newline, many1(satisfy(|c: char| c.is_ascii_alphanumeric())))(input)
}

/// Parses a grid from newline-separated rows of alphanumeric labels.
pub fn parse(input: &str) -> Result<Grid, SurveyError> {
    let (_, rows) =
        parse_rows(input.trim_end()).map_err(|e| SurveyError::Parse(e.to_string()))?;
    Grid::from_rows(rows)
}
// endregion
