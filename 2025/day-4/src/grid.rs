use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

/// A paper roll with fewer occupied neighbors than this can be reached by a forklift.
pub const ACCESS_THRESHOLD: usize = 4;

/// The eight `(d_row, d_col)` offsets around a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Occupied,
    Empty,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Cell::Occupied),
            '.' => Some(Cell::Empty),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Cell::Occupied => '@',
            Cell::Empty => '.',
        }
    }

    pub fn is_occupied(self) -> bool {
        self == Cell::Occupied
    }
}

/// A 0-indexed `(row, col)` coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shifts the position, or returns `None` when it would leave the non-negative quadrant.
    fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ParseError {
    #[error("the grid is empty")]
    #[diagnostic(
        code(day4::parse::empty),
        help("provide at least one row of '@' and '.' cells")
    )]
    Empty,

    #[error("row {row} has {found} cells but the first row has {expected}")]
    #[diagnostic(
        code(day4::parse::ragged_row),
        help("every row of the grid must have the same length")
    )]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell {found:?} at row {row}, column {col}")]
    #[diagnostic(
        code(day4::parse::unknown_cell),
        help("cells must be '@' (paper roll) or '.' (empty)")
    )]
    UnknownCell { row: usize, col: usize, found: char },
}

/// A rectangular snapshot of the printing department floor.
///
/// Grids are values: [`Grid::apply_removal`] returns a new snapshot instead of
/// editing the current one, so every removal decision in a round is taken
/// against the same state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = input
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);
        let lines = &lines[..end];

        let cols = lines.first().ok_or(ParseError::Empty)?.chars().count();
        let mut cells = Vec::with_capacity(lines.len() * cols);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }

            for (col, c) in line.chars().enumerate() {
                let cell =
                    Cell::from_char(c).ok_or(ParseError::UnknownCell { row, col, found: c })?;
                cells.push(cell);
            }
        }

        Ok(Grid {
            rows: lines.len(),
            cols,
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.cols).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

impl Grid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    /// Returns the cell at `pos`, or `None` if it is out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_occupied)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows)
            .cartesian_product(0..cols)
            .map(|(row, col)| Position::new(row, col))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Counts occupied cells among the 8 in-bounds neighbors of `pos`. No wraparound.
    pub fn neighbor_count(&self, pos: Position) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|&neighbor| self.is_occupied(neighbor))
            .count()
    }

    pub fn is_removable(&self, pos: Position) -> bool {
        self.is_occupied(pos) && self.neighbor_count(pos) < ACCESS_THRESHOLD
    }

    /// Every occupied cell with fewer than [`ACCESS_THRESHOLD`] occupied neighbors,
    /// judged against this snapshot only. Returned in row-major order.
    pub fn find_removable(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.is_removable(pos))
            .collect()
    }

    /// Returns a copy of the grid with `positions` emptied. Out-of-bounds positions are ignored.
    pub fn apply_removal(&self, positions: &[Position]) -> Grid {
        let mut next = self.clone();
        for &pos in positions {
            if let Some(idx) = self.index(pos) {
                next.cells[idx] = Cell::Empty;
            }
        }
        next
    }

    /// Renders the grid with every currently removable roll drawn as `x`.
    pub fn mark_removable(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let pos = Position::new(row, col);
                        if self.is_removable(pos) {
                            'x'
                        } else {
                            self.cells[row * self.cols + col].as_char()
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }

    /// Iterates over the nonempty removal rounds until the grid reaches a fixed point.
    pub fn rounds(self) -> Rounds {
        Rounds {
            grid: self,
            index: 0,
        }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn run_to_fixpoint(self) -> Reduction {
        let mut reduction = Reduction::default();

        for round in self.rounds() {
            if round.index == 0 {
                reduction.first_round_count = round.removed.len();
            }
            reduction.total_removed += round.removed.len();
            reduction.rounds += 1;
        }

        tracing::debug!(?reduction, "reached fixed point");
        reduction
    }
}

/// Outcome of reducing a grid until nothing more can be removed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Reduction {
    /// Rolls accessible in the initial grid.
    pub first_round_count: usize,
    /// Rolls removed across all rounds.
    pub total_removed: usize,
    /// Number of nonempty rounds.
    pub rounds: usize,
}

/// One nonempty round of simultaneous removal.
#[derive(Clone, Debug)]
pub struct Round {
    /// 0-based round number.
    pub index: usize,
    pub removed: Vec<Position>,
    /// The snapshot after this round's removals.
    pub grid: Grid,
}

pub struct Rounds {
    grid: Grid,
    index: usize,
}

impl Iterator for Rounds {
    type Item = Round;

    fn next(&mut self) -> Option<Round> {
        let removed = self.grid.find_removable();
        if removed.is_empty() {
            return None;
        }

        self.grid = self.grid.apply_removal(&removed);
        let index = self.index;
        self.index += 1;

        tracing::debug!(
            round = index + 1,
            removed = removed.len(),
            remaining = self.grid.occupied_count(),
            "removed accessible rolls"
        );
        tracing::trace!("\n{}", self.grid);

        Some(Round {
            index,
            removed,
            grid: self.grid.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    use rstest::rstest;

    const EXAMPLE: &str = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.";

    fn grid(input: &str) -> Grid {
        input.parse().unwrap()
    }

    #[test]
    fn parses_example() {
        let grid = grid(EXAMPLE);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.get(Position::new(0, 2)), Some(Cell::Occupied));
        assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(10, 0)), None);
        assert_eq!(grid.to_string(), EXAMPLE);
    }

    #[test]
    fn strips_surrounding_blank_lines() {
        let grid = grid("\n\n@.\r\n.@\r\n\n");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.to_string(), "@.\n.@");
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("\n  \n", ParseError::Empty)]
    #[case("@@\n@", ParseError::RaggedRow { row: 1, expected: 2, found: 1 })]
    #[case("@@\n\n@@", ParseError::RaggedRow { row: 1, expected: 2, found: 0 })]
    #[case("@.\n.#", ParseError::UnknownCell { row: 1, col: 1, found: '#' })]
    #[case("x@", ParseError::UnknownCell { row: 0, col: 0, found: 'x' })]
    fn rejects_malformed_grids(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(input.parse::<Grid>(), Err(expected));
    }

    #[rstest]
    #[case(Position::new(1, 1), 8)]
    #[case(Position::new(0, 0), 3)]
    #[case(Position::new(0, 1), 5)]
    #[case(Position::new(2, 2), 3)]
    fn counts_neighbors_within_bounds(#[case] pos: Position, #[case] expected: usize) {
        let grid = grid("@@@\n@@@\n@@@");
        assert_eq!(grid.neighbor_count(pos), expected);
    }

    #[test]
    fn isolated_roll_is_removed_in_first_round() {
        let grid = grid("...\n.@.\n...");
        let center = Position::new(1, 1);

        assert_eq!(grid.neighbor_count(center), 0);
        assert_eq!(grid.find_removable(), vec![center]);
        assert_eq!(
            grid.run_to_fixpoint(),
            Reduction {
                first_round_count: 1,
                total_removed: 1,
                rounds: 1,
            }
        );
    }

    #[test]
    fn surrounded_roll_waits_for_its_neighbors() {
        let grid = grid("@@@\n@@@\n@@@");
        let center = Position::new(1, 1);
        assert!(!grid.is_removable(center));

        let rounds: Vec<_> = grid.rounds().collect();
        let removed_in: Vec<usize> = rounds.iter().map(|round| round.removed.len()).collect();
        assert_eq!(removed_in, vec![4, 4, 1]);
        assert!(rounds[0].grid.is_occupied(center));
        assert!(rounds[1].grid.is_occupied(center));
        assert_eq!(rounds[2].removed, vec![center]);
    }

    #[test]
    fn removal_is_simultaneous_within_a_round() {
        // Emptying (0, 0) first would drop (1, 1) to 3 neighbors, but only
        // the snapshot at the start of the round counts.
        let grid = grid("@..\n.@@\n.@@");

        assert_eq!(
            grid.find_removable(),
            vec![
                Position::new(0, 0),
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        assert_eq!(
            grid.run_to_fixpoint(),
            Reduction {
                first_round_count: 4,
                total_removed: 5,
                rounds: 2,
            }
        );
    }

    #[test]
    fn apply_removal_leaves_original_untouched() {
        let original = grid(EXAMPLE);
        let removable = original.find_removable();
        let next = original.apply_removal(&removable);

        assert_eq!(original.to_string(), EXAMPLE);
        assert_eq!(
            next.occupied_count(),
            original.occupied_count() - removable.len()
        );
        assert!(removable.iter().all(|&pos| !next.is_occupied(pos)));
    }

    #[test]
    fn marks_accessible_rolls() {
        let expected = "..xx.xx@x.
x@@.@.@.@@
@@@@@.x.@@
@.@@@@..@.
x@.@@@@.@x
.@@@@@@@.@
.@.@.@.@@@
x.@@@.@@@@
.@@@@@@@@.
x.x.@@@.x.";
        assert_eq!(grid(EXAMPLE).mark_removable(), expected);
    }

    #[test]
    fn reduces_example() {
        assert_eq!(
            grid(EXAMPLE).run_to_fixpoint(),
            Reduction {
                first_round_count: 13,
                total_removed: 43,
                rounds: 9,
            }
        );
    }

    #[test]
    fn occupancy_strictly_decreases_each_round() {
        let grid = grid(EXAMPLE);
        let mut occupied = grid.occupied_count();

        for round in grid.rounds() {
            assert!(!round.removed.is_empty());
            let remaining = round.grid.occupied_count();
            assert!(remaining < occupied);
            assert_eq!(remaining, occupied - round.removed.len());
            occupied = remaining;
        }
    }

    #[rstest]
    #[case(EXAMPLE)]
    #[case("@@@\n@@@\n@@@")]
    #[case("....\n....")]
    fn fixed_point_is_idempotent(#[case] input: &str) {
        let stable = grid(input)
            .rounds()
            .last()
            .map(|round| round.grid)
            .unwrap_or_else(|| grid(input));

        assert!(stable.find_removable().is_empty());
        assert_eq!(stable.run_to_fixpoint(), Reduction::default());
    }

    #[rstest]
    #[timeout(Duration::from_secs(10))]
    fn terminates_on_fully_occupied_grid() {
        let input = vec!["@".repeat(100); 100].join("\n");
        let grid = grid(&input);

        let reduction = grid.clone().run_to_fixpoint();
        assert_eq!(reduction.first_round_count, 4);
        assert_eq!(reduction.total_removed, 4);
        assert!(grid.is_occupied(Position::new(50, 50)));
    }
}
