use crate::algorithms::{Algorithm, SearchReport};
use crate::error::{CommandError, PlacementError};
use crate::grid::{CellState, Coordinate, Grid};
use crate::path::Path;
use log::{info, warn};
use std::str::FromStr;

pub const WELCOME: &str =
    "Welcome to Omni World, a real time situation analysis tool. Let's begin by setting the obstacles. Press '0' when done.";

/// What a click means right now. Obstacles come first, then the goal, then
/// the source; searches can run once both endpoints exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Obstacles,
    Goal,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Coordinate),
    Advance,
    Run(Algorithm),
    Move,
    Reset,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "c" | "click" => {
                let coords = parts
                    .map(str::parse)
                    .collect::<Result<Vec<usize>, _>>()
                    .map_err(|_| CommandError::BadClick(s.trim().to_string()))?;
                match coords.as_slice() {
                    &[row, col] => Ok(Command::Click(Coordinate::new(row, col))),
                    _ => Err(CommandError::BadClick(s.trim().to_string())),
                }
            }
            "0" | "next" => Ok(Command::Advance),
            "m" | "move" => Ok(Command::Move),
            "reset" => Ok(Command::Reset),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<Algorithm>()
                .map(Command::Run)
                .map_err(|_| CommandError::Unknown(head.to_string())),
        }
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    /// Walk the robot along this path, calling [`Session::step_robot`] per
    /// cell and [`Session::finish_move`] at the end.
    Animate(Path),
    Quit,
}

/// Owns the grid and everything the user has set up so far.
pub struct Session {
    grid: Grid,
    phase: Phase,
    instructions: String,
    path: Option<Path>,
    last_search: Option<(Algorithm, SearchReport)>,
    trail: Vec<Coordinate>,
    robot: Option<Coordinate>,
}

impl Session {
    pub fn new(grid_size: usize) -> Self {
        Session {
            grid: Grid::new(grid_size),
            phase: Phase::Obstacles,
            instructions: WELCOME.to_string(),
            path: None,
            last_search: None,
            trail: Vec::new(),
            robot: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn last_search(&self) -> Option<&(Algorithm, SearchReport)> {
        self.last_search.as_ref()
    }

    pub fn trail(&self) -> &[Coordinate] {
        &self.trail
    }

    pub fn robot(&self) -> Option<Coordinate> {
        self.robot
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Click(pos) => self.click(pos),
            Command::Advance => self.advance(),
            Command::Run(algorithm) => self.run(algorithm),
            Command::Move => return self.start_move(),
            Command::Reset => self.reset(),
            Command::Quit => return Outcome::Quit,
        }
        Outcome::Redraw
    }

    fn click(&mut self, pos: Coordinate) {
        if !self.grid.is_in_bounds(pos) {
            self.instructions = format!("{} is outside the grid.", pos);
            return;
        }

        let role = match self.phase {
            Phase::Obstacles => CellState::Blocked,
            Phase::Goal => CellState::Goal,
            Phase::Source => CellState::Source,
        };

        match self.grid.set_cell(pos, role) {
            Ok(()) => {
                self.instructions = match role {
                    CellState::Goal => "Goal is set. Press '0' to start setting the source point.".to_string(),
                    CellState::Source => {
                        "Source is set. Press 'D' for Dijkstra or 'A' for A* to find the path.".to_string()
                    }
                    _ => format!("Obstacle placed at {}. Press '0' when done.", pos),
                };
            }
            Err(err) => {
                warn!("placement rejected: {}", err);
                self.instructions = rejection_message(&err);
            }
        }
    }

    fn advance(&mut self) {
        match self.phase {
            Phase::Obstacles => {
                self.phase = Phase::Goal;
                self.instructions = "Now set the goal point by clicking on a tile.".to_string();
            }
            Phase::Goal if self.grid.goal().is_some() => {
                self.phase = Phase::Source;
                self.instructions = "Now set the source point by clicking on a tile.".to_string();
            }
            Phase::Goal => {
                self.instructions = "Set the goal before moving on.".to_string();
                return;
            }
            Phase::Source => return,
        }
        info!("phase changed to {:?}", self.phase);
    }

    fn run(&mut self, algorithm: Algorithm) {
        let (Some(source), Some(goal)) = (self.grid.source(), self.grid.goal()) else {
            self.instructions = "Set both the goal and the source first.".to_string();
            return;
        };

        let report = algorithm.run(&self.grid, source, goal);
        self.trail.clear();
        self.robot = None;
        self.path = report.path.clone();
        self.instructions = match &report.path {
            Some(_) => format!("Path found using {}. Press 'M' to move the robot.", algorithm),
            None => format!("No path found using {}.", algorithm),
        };
        info!("{} search expanded {} cells", algorithm, report.expanded);
        self.last_search = Some((algorithm, report));
    }

    fn start_move(&mut self) -> Outcome {
        match self.path.take() {
            Some(path) => {
                self.instructions = "Robot is moving along the path.".to_string();
                self.trail.clear();
                self.robot = None;
                Outcome::Animate(path)
            }
            None => {
                self.instructions = "No path to follow yet.".to_string();
                Outcome::Redraw
            }
        }
    }

    /// Moves the robot one cell; the cell it leaves joins the trail.
    pub fn step_robot(&mut self, pos: Coordinate) {
        if let Some(previous) = self.robot.replace(pos) {
            self.trail.push(previous);
        }
    }

    pub fn finish_move(&mut self) {
        if let Some(last) = self.robot {
            self.trail.push(last);
        }
        self.instructions = "Robot has reached the goal.".to_string();
    }

    fn reset(&mut self) {
        self.grid.clear();
        self.phase = Phase::Obstacles;
        self.instructions = WELCOME.to_string();
        self.path = None;
        self.last_search = None;
        self.trail.clear();
        self.robot = None;
        info!("session reset");
    }
}

fn rejection_message(err: &PlacementError) -> String {
    match err {
        PlacementError::OnObstacle { role: CellState::Goal, .. } => {
            "You cannot set the GOAL node on an OBSTACLE!".to_string()
        }
        PlacementError::OnObstacle { .. } | PlacementError::OccupiedByEndpoint { occupant: CellState::Goal, .. } => {
            "You cannot set the SOURCE node on an OBSTACLE or the GOAL node!".to_string()
        }
        PlacementError::AlreadyAssigned { role: CellState::Goal, .. } => "Goal is already set.".to_string(),
        PlacementError::AlreadyAssigned { .. } => "Source is already set.".to_string(),
        other => format!("{}.", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn ready_session() -> Session {
        let mut session = Session::new(5);
        for cmd in ["c 1 1", "c 1 2", "0", "c 4 4", "0", "c 0 0"] {
            session.handle(cmd.parse().unwrap());
        }
        session
    }

    #[test]
    fn parses_commands() {
        assert_eq!("click 2 3".parse::<Command>(), Ok(Command::Click(c(2, 3))));
        assert_eq!("C 0 9".parse::<Command>(), Ok(Command::Click(c(0, 9))));
        assert_eq!("0".parse::<Command>(), Ok(Command::Advance));
        assert_eq!("D".parse::<Command>(), Ok(Command::Run(Algorithm::Dijkstra)));
        assert_eq!("astar".parse::<Command>(), Ok(Command::Run(Algorithm::AStar)));
        assert_eq!("m".parse::<Command>(), Ok(Command::Move));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!("click 1".parse::<Command>(), Err(CommandError::BadClick(_))));
        assert!(matches!("click a b".parse::<Command>(), Err(CommandError::BadClick(_))));
        assert_eq!("jump".parse::<Command>(), Err(CommandError::Unknown("jump".to_string())));
    }

    #[test]
    fn walks_through_the_phases() {
        let mut session = Session::new(5);
        assert_eq!(session.phase(), Phase::Obstacles);
        assert_eq!(session.instructions(), WELCOME);

        session.handle(Command::Click(c(2, 2)));
        assert!(session.grid().is_blocked(c(2, 2)));

        session.handle(Command::Advance);
        assert_eq!(session.phase(), Phase::Goal);
        session.handle(Command::Advance);
        assert_eq!(session.phase(), Phase::Goal);
        assert_eq!(session.instructions(), "Set the goal before moving on.");

        session.handle(Command::Click(c(4, 4)));
        assert_eq!(session.grid().goal(), Some(c(4, 4)));
        session.handle(Command::Click(c(3, 3)));
        assert_eq!(session.instructions(), "Goal is already set.");
        assert_eq!(session.grid().goal(), Some(c(4, 4)));

        session.handle(Command::Advance);
        assert_eq!(session.phase(), Phase::Source);
        session.handle(Command::Click(c(0, 0)));
        assert_eq!(session.grid().source(), Some(c(0, 0)));
    }

    #[test]
    fn rejected_placements_leave_the_grid_alone() {
        let mut session = Session::new(4);
        session.handle(Command::Click(c(1, 1)));
        session.handle(Command::Advance);
        let before = session.grid().clone();

        session.handle(Command::Click(c(1, 1)));
        assert_eq!(session.instructions(), "You cannot set the GOAL node on an OBSTACLE!");
        assert_eq!(session.grid(), &before);

        session.handle(Command::Click(c(2, 2)));
        session.handle(Command::Advance);
        let before = session.grid().clone();
        session.handle(Command::Click(c(2, 2)));
        assert_eq!(
            session.instructions(),
            "You cannot set the SOURCE node on an OBSTACLE or the GOAL node!"
        );
        session.handle(Command::Click(c(1, 1)));
        assert_eq!(session.grid(), &before);

        session.handle(Command::Click(c(9, 9)));
        assert_eq!(session.instructions(), "(9, 9) is outside the grid.");
    }

    #[test]
    fn search_requires_both_endpoints() {
        let mut session = Session::new(4);
        session.handle(Command::Run(Algorithm::Dijkstra));
        assert_eq!(session.instructions(), "Set both the goal and the source first.");
        assert!(session.last_search().is_none());
    }

    #[test]
    fn finds_and_walks_a_path() {
        let mut session = ready_session();
        session.handle(Command::Run(Algorithm::AStar));
        assert_eq!(session.instructions(), "Path found using A*. Press 'M' to move the robot.");
        let steps = session.path().unwrap().steps();
        assert_eq!(steps, 8);

        let Outcome::Animate(path) = session.handle(Command::Move) else {
            panic!("expected an animation");
        };
        assert!(session.path().is_none());
        for &pos in path.iter() {
            session.step_robot(pos);
        }
        session.finish_move();

        assert_eq!(session.robot(), Some(c(4, 4)));
        assert_eq!(session.trail(), path.as_slice());
        assert_eq!(session.instructions(), "Robot has reached the goal.");

        assert_eq!(session.handle(Command::Move), Outcome::Redraw);
        assert_eq!(session.instructions(), "No path to follow yet.");
    }

    #[test]
    fn reports_missing_path() {
        let mut session = Session::new(3);
        for cmd in ["c 0 1", "c 1 0", "c 1 1", "0", "c 2 2", "0", "c 0 0", "d"] {
            session.handle(cmd.parse().unwrap());
        }
        assert_eq!(session.instructions(), "No path found using Dijkstra.");
        assert_eq!(session.handle(Command::Move), Outcome::Redraw);
    }

    #[test]
    fn reset_starts_over() {
        let mut session = ready_session();
        session.handle(Command::Run(Algorithm::Dijkstra));
        session.handle(Command::Reset);
        assert_eq!(session.phase(), Phase::Obstacles);
        assert_eq!(session.grid(), &Grid::new(5));
        assert!(session.path().is_none());
        assert_eq!(session.handle(Command::Quit), Outcome::Quit);
    }
}
