use crate::algorithms::common::{endpoints_valid, FrontierEntry, PathfindingAlgorithm, SearchReport, SearchState};
use crate::grid::{Coordinate, Grid};
use crate::path::Path;
use log::debug;
use std::collections::BinaryHeap;

/// Uniform-cost search over the 4-connected grid, every move costing 1.
#[derive(Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    /// Finds a minimum-hop path from `start` to `goal`.
    ///
    /// Cells may sit in the frontier several times; an entry whose distance
    /// is worse than the recorded one is skipped when popped. The goal test
    /// happens on pop.
    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> SearchReport {
        if !endpoints_valid(grid, start, goal) {
            return SearchReport::unreachable(0);
        }
        if start == goal {
            return SearchReport::found(Path::new(vec![start]), 0);
        }

        let mut state = SearchState::new(start);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry::new(0, start));
        let mut expanded = 0;

        while let Some(FrontierEntry { priority: distance, pos: current }) = frontier.pop() {
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
            if state.cost(current).is_some_and(|best| distance > best) {
                continue;
            }
            expanded += 1;

            for neighbor in grid.neighbors(current) {
                let candidate = distance + 1;
                if state.relax(neighbor, candidate, current) {
                    frontier.push(FrontierEntry::new(candidate, neighbor));
                }
            }
        }

        debug!("{}: no path {} -> {} after {} expanded", self.name(), start, goal, expanded);
        SearchReport::unreachable(expanded)
    }
}

pub fn run_dijkstra(grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<Path> {
    Dijkstra::new().find_path(grid, start, goal)
}
