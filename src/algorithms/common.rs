use crate::algorithms::a_star::AStar;
use crate::algorithms::dijkstra::Dijkstra;
use crate::grid::{Coordinate, Grid};
use crate::path::Path;
use log::warn;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub trait PathfindingAlgorithm {
    fn name(&self) -> &'static str;

    /// Runs one search to completion. The grid is only read.
    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> SearchReport;

    fn find_path(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<Path> {
        self.search(grid, start, goal).path
    }
}

/// Outcome of a single search: the path, if any, and how many cells were
/// expanded to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub path: Option<Path>,
    pub expanded: usize,
}

impl SearchReport {
    pub fn found(path: Path, expanded: usize) -> Self {
        SearchReport {
            path: Some(path),
            expanded,
        }
    }

    pub fn unreachable(expanded: usize) -> Self {
        SearchReport {
            path: None,
            expanded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::AStar];

    pub fn searcher(self) -> Box<dyn PathfindingAlgorithm> {
        match self {
            Algorithm::Dijkstra => Box::new(Dijkstra::new()),
            Algorithm::AStar => Box::new(AStar::new()),
        }
    }

    pub fn run(self, grid: &Grid, start: Coordinate, goal: Coordinate) -> SearchReport {
        self.searcher().search(grid, start, goal)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => f.write_str("Dijkstra"),
            Algorithm::AStar => f.write_str("A*"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d" | "dijkstra" => Ok(Algorithm::Dijkstra),
            "a" | "astar" | "a_star" | "a*" => Ok(Algorithm::AStar),
            other => Err(format!("unknown algorithm: {}", other)),
        }
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the lowest priority
/// first, then the lowest coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub priority: usize,
    pub pos: Coordinate,
}

impl FrontierEntry {
    pub fn new(priority: usize, pos: Coordinate) -> Self {
        FrontierEntry { priority, pos }
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison to make BinaryHeap a min-heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

/// Per-call bookkeeping: best known cost to each reached cell and the cell
/// it was reached from.
pub(crate) struct SearchState {
    costs: FxHashMap<Coordinate, usize>,
    previous: FxHashMap<Coordinate, Coordinate>,
}

impl SearchState {
    pub fn new(start: Coordinate) -> Self {
        let mut costs = FxHashMap::default();
        costs.insert(start, 0);
        SearchState {
            costs,
            previous: FxHashMap::default(),
        }
    }

    pub fn cost(&self, pos: Coordinate) -> Option<usize> {
        self.costs.get(&pos).copied()
    }

    /// Records `cost` for `pos` via `from` if it beats what is known.
    /// Returns whether the record changed.
    pub fn relax(&mut self, pos: Coordinate, cost: usize, from: Coordinate) -> bool {
        match self.costs.get(&pos) {
            Some(&best) if cost >= best => false,
            _ => {
                self.costs.insert(pos, cost);
                self.previous.insert(pos, from);
                true
            }
        }
    }

    pub fn reached(&self) -> usize {
        self.costs.len()
    }

    pub fn reconstruct(&self, goal: Coordinate) -> Path {
        Path::from_predecessors(goal, |at| self.previous.get(&at).copied())
    }
}

/// Both endpoints must be cells a search can stand on.
pub(crate) fn endpoints_valid(grid: &Grid, start: Coordinate, goal: Coordinate) -> bool {
    for (label, pos) in [("start", start), ("goal", goal)] {
        if !grid.is_in_bounds(pos) {
            warn!("search {} {} is outside the {}x{} grid", label, pos, grid.size(), grid.size());
            return false;
        }
        if grid.is_blocked(pos) {
            warn!("search {} {} is on an obstacle", label, pos);
            return false;
        }
    }
    true
}
