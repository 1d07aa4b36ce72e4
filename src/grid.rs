use crate::error::{LayoutError, PlacementError};
use log::info;
use std::fmt;

/// Unit offsets applied by [`Grid::neighbors`], in expansion order.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A cell address. Ordering is row-major, which the searches rely on to
/// break frontier ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coordinate> {
        Some(Coordinate {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    Source,
    Goal,
}

impl CellState {
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellState::Source | CellState::Goal)
    }

    fn opposite(self) -> Option<CellState> {
        match self {
            CellState::Source => Some(CellState::Goal),
            CellState::Goal => Some(CellState::Source),
            _ => None,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Free => "free cell",
            CellState::Blocked => "obstacle",
            CellState::Source => "source",
            CellState::Goal => "goal",
        };
        f.write_str(name)
    }
}

/// Square grid of cell states. Source and goal positions are cached next to
/// the cells and kept in sync by [`Grid::set_cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<CellState>>,
    source: Option<Coordinate>,
    goal: Option<Coordinate>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![vec![CellState::Free; size]; size],
            source: None,
            goal: None,
        }
    }

    /// Builds a grid from an ASCII layout: `.` free, `#` blocked, `S` source,
    /// `G` goal. Every row must be as long as there are rows.
    pub fn from_rows(rows: &[&str]) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        let mut grid = Grid::new(rows.len());

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != grid.size {
                return Err(LayoutError::Ragged {
                    row,
                    len,
                    expected: grid.size,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let at = Coordinate::new(row, col);
                let state = match glyph {
                    '.' => continue,
                    '#' => CellState::Blocked,
                    'S' => CellState::Source,
                    'G' => CellState::Goal,
                    _ => return Err(LayoutError::UnknownGlyph { glyph, at }),
                };
                grid.set_cell(at, state)?;
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn source(&self) -> Option<Coordinate> {
        self.source
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.goal
    }

    pub fn is_in_bounds(&self, pos: Coordinate) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Out-of-bounds cells are neither blocked nor free; callers filter them
    /// with [`Grid::is_in_bounds`].
    pub fn is_blocked(&self, pos: Coordinate) -> bool {
        self.state(pos) == Some(CellState::Blocked)
    }

    /// A cell a search may stand on: in bounds and not blocked.
    pub fn is_traversable(&self, pos: Coordinate) -> bool {
        self.is_in_bounds(pos) && !self.is_blocked(pos)
    }

    pub fn state(&self, pos: Coordinate) -> Option<CellState> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == CellState::Blocked)
            .count()
    }

    /// Sets one cell. Endpoint roles are exclusive: a source or goal cannot
    /// go on an obstacle, on the other endpoint, or be set twice. On error
    /// the grid is untouched.
    pub fn set_cell(&mut self, pos: Coordinate, state: CellState) -> Result<(), PlacementError> {
        let current = self.state(pos).ok_or(PlacementError::OutOfBounds(pos))?;
        if current == state {
            return Ok(());
        }

        match state {
            CellState::Source | CellState::Goal => {
                if current == CellState::Blocked {
                    return Err(PlacementError::OnObstacle { role: state, at: pos });
                }
                if Some(current) == state.opposite() {
                    return Err(PlacementError::OccupiedByEndpoint {
                        at: pos,
                        occupant: current,
                    });
                }
                if let Some(at) = self.endpoint(state) {
                    return Err(PlacementError::AlreadyAssigned { role: state, at });
                }
            }
            CellState::Blocked if current.is_endpoint() => {
                return Err(PlacementError::OccupiedByEndpoint {
                    at: pos,
                    occupant: current,
                });
            }
            _ => {}
        }

        if current.is_endpoint() {
            self.set_endpoint(current, None);
        }
        if state.is_endpoint() {
            self.set_endpoint(state, Some(pos));
        }
        self.cells[pos.row][pos.col] = state;
        info!("{} set to {}", pos, state);
        Ok(())
    }

    /// Resets every cell to free and forgets both endpoints.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(CellState::Free);
        }
        self.source = None;
        self.goal = None;
    }

    /// Orthogonal, in-bounds, unblocked neighbours of `pos` in
    /// [`DIRECTIONS`] order. Recomputed on every call.
    pub fn neighbors(&self, pos: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(move |&next| self.is_traversable(next))
    }

    fn endpoint(&self, role: CellState) -> Option<Coordinate> {
        match role {
            CellState::Source => self.source,
            CellState::Goal => self.goal,
            _ => None,
        }
    }

    fn set_endpoint(&mut self, role: CellState, at: Option<Coordinate>) {
        match role {
            CellState::Source => self.source = at,
            CellState::Goal => self.goal = at,
            _ => {}
        }
    }
}

/// Free-function form of [`Grid::neighbors`].
pub fn neighbors(grid: &Grid, cell: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
    grid.neighbors(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn bounds_and_blocked() {
        let mut grid = Grid::new(3);
        assert!(grid.is_in_bounds(c(2, 2)));
        assert!(!grid.is_in_bounds(c(3, 0)));
        assert!(!grid.is_blocked(c(5, 5)));

        grid.set_cell(c(1, 1), CellState::Blocked).unwrap();
        assert!(grid.is_blocked(c(1, 1)));
        assert_eq!(grid.blocked_count(), 1);
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let grid = Grid::new(3);
        let around: Vec<_> = grid.neighbors(c(1, 1)).collect();
        assert_eq!(around, vec![c(1, 2), c(2, 1), c(1, 0), c(0, 1)]);
    }

    #[test]
    fn neighbors_skip_edges_and_obstacles() {
        let grid = Grid::from_rows(&[".#.", "...", "..."]).unwrap();
        let corner: Vec<_> = grid.neighbors(c(0, 0)).collect();
        assert_eq!(corner, vec![c(1, 0)]);

        let outside: Vec<_> = neighbors(&grid, c(7, 7)).collect();
        assert!(outside.is_empty());
    }

    #[test]
    fn endpoint_cannot_go_on_obstacle() {
        let mut grid = Grid::new(4);
        grid.set_cell(c(0, 0), CellState::Blocked).unwrap();
        let before = grid.clone();

        for _ in 0..3 {
            let err = grid.set_cell(c(0, 0), CellState::Goal).unwrap_err();
            assert_eq!(
                err,
                PlacementError::OnObstacle {
                    role: CellState::Goal,
                    at: c(0, 0)
                }
            );
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn endpoint_roles_are_exclusive() {
        let mut grid = Grid::new(4);
        grid.set_cell(c(0, 0), CellState::Goal).unwrap();

        assert!(matches!(
            grid.set_cell(c(0, 0), CellState::Source),
            Err(PlacementError::OccupiedByEndpoint { .. })
        ));
        assert_eq!(
            grid.set_cell(c(1, 1), CellState::Goal),
            Err(PlacementError::AlreadyAssigned {
                role: CellState::Goal,
                at: c(0, 0)
            })
        );
        assert!(matches!(
            grid.set_cell(c(0, 0), CellState::Blocked),
            Err(PlacementError::OccupiedByEndpoint { .. })
        ));

        grid.set_cell(c(3, 3), CellState::Source).unwrap();
        assert_eq!(grid.source(), Some(c(3, 3)));
        assert_eq!(grid.goal(), Some(c(0, 0)));
    }

    #[test]
    fn freeing_an_endpoint_releases_the_role() {
        let mut grid = Grid::new(2);
        grid.set_cell(c(0, 1), CellState::Source).unwrap();
        grid.set_cell(c(0, 1), CellState::Free).unwrap();
        assert_eq!(grid.source(), None);
        grid.set_cell(c(1, 1), CellState::Source).unwrap();
        assert_eq!(grid.source(), Some(c(1, 1)));
    }

    #[test]
    fn out_of_bounds_placement_is_rejected() {
        let mut grid = Grid::new(2);
        assert_eq!(
            grid.set_cell(c(2, 0), CellState::Blocked),
            Err(PlacementError::OutOfBounds(c(2, 0)))
        );
    }

    #[test]
    fn layout_parsing() {
        let grid = Grid::from_rows(&["S.", "#G"]).unwrap();
        assert_eq!(grid.source(), Some(c(0, 0)));
        assert_eq!(grid.goal(), Some(c(1, 1)));
        assert!(grid.is_blocked(c(1, 0)));

        assert!(matches!(
            Grid::from_rows(&["..", "."]),
            Err(LayoutError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["x"]),
            Err(LayoutError::UnknownGlyph { glyph: 'x', .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["SS", ".."]),
            Err(LayoutError::Placement(PlacementError::AlreadyAssigned { .. }))
        ));
    }
}
