use crate::algorithms::Algorithm;
use crate::grid::{Coordinate, Grid};
use crate::path::Path;
use log::{debug, warn};
use pathfinding::prelude::bfs;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData::default()
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            let total: Duration = self.find_path_times.iter().sum();
            let calls = self.find_path_times.len();
            match u32::try_from(calls).ok().and_then(|n| total.checked_div(n)) {
                Some(average) => average,
                None => Duration::from_nanos((total.as_nanos() / calls as u128) as u64),
            }
        }
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    pub path: Option<Path>,
    pub expanded: usize,
    pub timing_data: TimingData,
    /// Every repeated run returned the same path.
    pub deterministic: bool,
}

impl AlgorithmResult {
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Path::len)
    }
}

/// Both algorithms run on one grid, next to an independent BFS hop count.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub reference_len: Option<usize>,
    pub results: Vec<AlgorithmResult>,
}

impl Comparison {
    /// Runs every algorithm `repeats` times (at least once) on `grid`.
    pub fn run(grid: &Grid, start: Coordinate, goal: Coordinate, repeats: usize) -> Self {
        let reference_len = reference_path_len(grid, start, goal);
        let results = Algorithm::ALL
            .iter()
            .map(|&algorithm| run_timed(algorithm, grid, start, goal, repeats.max(1)))
            .collect();

        Comparison {
            start,
            goal,
            reference_len,
            results,
        }
    }

    /// True when every algorithm found a path exactly when the reference did,
    /// with the same number of cells.
    pub fn lengths_agree(&self) -> bool {
        self.results.iter().all(|r| r.path_len() == self.reference_len)
    }
}

/// Shortest path length (cells, endpoints included) from the `pathfinding`
/// crate's breadth-first search over the same neighbour function.
pub fn reference_path_len(grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<usize> {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return None;
    }
    bfs(&start, |p| grid.neighbors(*p).collect::<Vec<_>>(), |p| *p == goal).map(|path| path.len())
}

fn run_timed(algorithm: Algorithm, grid: &Grid, start: Coordinate, goal: Coordinate, repeats: usize) -> AlgorithmResult {
    let searcher = algorithm.searcher();
    let mut timing_data = TimingData::new();
    let mut reports = Vec::with_capacity(repeats);

    for _ in 0..repeats {
        let find_path_start = Instant::now();
        reports.push(searcher.search(grid, start, goal));
        timing_data.find_path_times.push(find_path_start.elapsed());
    }

    let deterministic = reports.windows(2).all(|pair| pair[0].path == pair[1].path);
    if !deterministic {
        warn!("{} returned a different path on a repeated run", algorithm);
    }
    let report = match reports.into_iter().next() {
        Some(report) => report,
        None => searcher.search(grid, start, goal),
    };
    debug!(
        "{}: {} calls, average {:.2?}",
        algorithm,
        timing_data.total_calls(),
        timing_data.average_find_path_time()
    );

    AlgorithmResult {
        algorithm,
        path: report.path,
        expanded: report.expanded,
        timing_data,
        deterministic,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ALGORITHM COMPARISON RESULTS ===")?;
        writeln!(f, "Start: {} | Goal: {}", self.start, self.goal)?;
        match self.reference_len {
            Some(len) => writeln!(f, "Reference shortest path (BFS): {} steps", len - 1)?,
            None => writeln!(f, "Reference shortest path (BFS): unreachable")?,
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<10} {:<8} {:<8} {:<10} {:<15} {:<8}",
            "Algorithm", "Found", "Steps", "Expanded", "Avg Find Path", "Stable"
        )?;
        writeln!(f, "{}", "-".repeat(64))?;

        for result in &self.results {
            let found = if result.path.is_some() { "yes" } else { "no" };
            let steps = result
                .path
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.steps().to_string());
            let stable = if result.deterministic { "yes" } else { "no" };
            writeln!(
                f,
                "{:<10} {:<8} {:<8} {:<10} {:<15} {:<8}",
                result.algorithm.to_string(),
                found,
                steps,
                result.expanded,
                format!("{:.2?}", result.timing_data.average_find_path_time()),
                stable
            )?;
        }

        writeln!(f)?;
        if self.lengths_agree() {
            writeln!(f, "All algorithms agree with the reference path length.")?;
        } else {
            writeln!(f, "Path lengths disagree with the reference!")?;
        }
        Ok(())
    }
}
