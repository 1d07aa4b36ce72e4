use crate::grid::Coordinate;
use std::fmt;

/// Route from source to goal, both inclusive, source first.
///
/// Only the searches build paths, so a `Path` is never empty and
/// consecutive entries are always orthogonal neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coordinate>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Coordinate>) -> Self {
        debug_assert!(!cells.is_empty());
        Path { cells }
    }

    /// Walks predecessor links back from `goal` and reverses them.
    pub(crate) fn from_predecessors<F>(goal: Coordinate, mut previous: F) -> Self
    where
        F: FnMut(Coordinate) -> Option<Coordinate>,
    {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(prev) = previous(current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();
        Path::new(cells)
    }

    /// Number of coordinates, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than [`Path::len`].
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Coordinate {
        self.cells[0]
    }

    pub fn goal(&self) -> Coordinate {
        self.cells[self.cells.len() - 1]
    }

    pub fn contains(&self, pos: &Coordinate) -> bool {
        self.cells.contains(pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.cells
    }

    /// True when every consecutive pair is one orthogonal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|pair| pair[0].is_adjacent(&pair[1]))
    }
}

impl IntoIterator for Path {
    type Item = Coordinate;
    type IntoIter = std::vec::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}
