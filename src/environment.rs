use crate::error::PlacementError;
use crate::grid::{CellState, Coordinate, Grid};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A generated layout: source in the upper-left quadrant, goal in the
/// lower-right one, walls scattered everywhere else.
#[derive(Debug, Clone)]
pub struct EnvironmentSetup {
    pub seed: u64,
    pub grid: Grid,
}

impl EnvironmentSetup {
    /// Grids smaller than this have no room for separate quadrants.
    pub const MIN_SIZE: usize = 2;

    /// Generate a layout. Passing the same seed reproduces the same grid.
    pub fn generate(grid_size: usize, num_walls: usize, seed: Option<u64>) -> Result<Self, PlacementError> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let size = grid_size.max(Self::MIN_SIZE);
        let half = size / 2;

        let start = Coordinate::new(rng.gen_range(0..half), rng.gen_range(0..half));
        let goal = Coordinate::new(rng.gen_range(half..size), rng.gen_range(half..size));

        let mut grid = Grid::new(size);
        grid.set_cell(start, CellState::Source)?;
        grid.set_cell(goal, CellState::Goal)?;

        // Walls only go on free cells, so at most size^2 - 2 fit.
        let target = num_walls.min(size.saturating_mul(size).saturating_sub(2));
        let max_attempts = target.saturating_mul(3);
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < target && attempts < max_attempts {
            let pos = Coordinate::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if grid.state(pos) == Some(CellState::Free) {
                grid.set_cell(pos, CellState::Blocked)?;
                walls_placed += 1;
            }
            attempts += 1;
        }

        info!(
            "Generated environment - seed: {}, start: {}, goal: {}, walls: {}",
            seed, start, goal, walls_placed
        );

        Ok(EnvironmentSetup { seed, grid })
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.grid.source()
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.grid.goal()
    }
}
