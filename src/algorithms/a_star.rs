use crate::algorithms::common::{endpoints_valid, FrontierEntry, PathfindingAlgorithm, SearchReport, SearchState};
use crate::grid::{Coordinate, Grid};
use crate::path::Path;
use log::debug;
use std::collections::BinaryHeap;

/// Implements A* over the 4-connected grid with a Manhattan-distance
/// heuristic, which is admissible and consistent for unit moves.
#[derive(Default)]
pub struct AStar;

impl AStar {
    /// Creates a new instance of the A* algorithm provider.
    pub fn new() -> Self {
        AStar
    }

    fn heuristic(pos: Coordinate, goal: Coordinate) -> usize {
        pos.manhattan(&goal)
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    /// Finds a minimum-hop path from `start` to `goal`.
    ///
    /// The frontier is ordered by `f = g + h`; relaxation compares `g` only.
    /// Ties on `f` go to the lower coordinate.
    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> SearchReport {
        if !endpoints_valid(grid, start, goal) {
            return SearchReport::unreachable(0);
        }
        if start == goal {
            return SearchReport::found(Path::new(vec![start]), 0);
        }

        let mut state = SearchState::new(start);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry::new(Self::heuristic(start, goal), start));
        let mut expanded = 0;

        while let Some(FrontierEntry { priority: f_score, pos: current }) = frontier.pop() {
            if current == goal {
                let path = state.reconstruct(goal);
                debug!(
                    "{}: {} -> {} in {} steps, {} expanded, {} reached",
                    self.name(),
                    start,
                    goal,
                    path.steps(),
                    expanded,
                    state.reached()
                );
                return SearchReport::found(path, expanded);
            }

            let Some(g_score) = state.cost(current) else {
                continue;
            };
            // h is fixed per cell, so a larger f means a stale g
            if f_score > g_score + Self::heuristic(current, goal) {
                continue;
            }
            expanded += 1;

            for neighbor in grid.neighbors(current) {
                let tentative_g = g_score + 1;
                if state.relax(neighbor, tentative_g, current) {
                    let f = tentative_g + Self::heuristic(neighbor, goal);
                    frontier.push(FrontierEntry::new(f, neighbor));
                }
            }
        }

        debug!("{}: no path {} -> {} after {} expanded", self.name(), start, goal, expanded);
        SearchReport::unreachable(expanded)
    }
}

pub fn run_a_star(grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<Path> {
    AStar::new().find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn straight_row_expands_only_the_row() {
        let grid = Grid::new(10);
        let report = AStar::new().search(&grid, c(0, 0), c(0, 9));
        let path = report.path.unwrap();
        assert_eq!(path.len(), 10);
        assert!(path.iter().all(|p| p.row == 0));
        assert_eq!(report.expanded, 9);
    }

    #[test]
    fn expands_fewer_cells_than_dijkstra() {
        let grid = Grid::new(10);
        let a_star = AStar::new().search(&grid, c(0, 0), c(0, 9));
        let dijkstra = Dijkstra::new().search(&grid, c(0, 0), c(0, 9));
        assert!(a_star.expanded < dijkstra.expanded);
        assert_eq!(a_star.path, dijkstra.path);
    }

    #[test]
    fn finds_the_gap_in_a_wall() {
        let grid = Grid::from_rows(&[
            "......",
            "......",
            "#####.",
            "......",
            "......",
            "......",
        ])
        .unwrap();
        let path = run_a_star(&grid, c(0, 0), c(5, 0)).unwrap();
        assert_eq!(path.steps(), 15);
        assert!(path.contains(&c(2, 5)));
        assert!(path.is_contiguous());
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let grid = Grid::from_rows(&[".#...", "#....", ".....", ".....", "....."]).unwrap();
        let report = AStar::new().search(&grid, c(0, 0), c(4, 4));
        assert!(report.path.is_none());
        assert_eq!(report.expanded, 1);
    }

    #[test]
    fn heuristic_is_manhattan() {
        assert_eq!(AStar::heuristic(c(1, 7), c(4, 2)), 8);
        assert_eq!(AStar::heuristic(c(3, 3), c(3, 3)), 0);
    }
}
