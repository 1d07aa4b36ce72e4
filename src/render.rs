use crate::grid::{CellState, Coordinate, Grid};

pub const LEGEND: &str = "Legend: S=Source, G=Goal, R=Robot, *=Trail, #=Obstacle, .=Empty";

/// Text picture of the grid with row and column headers. `trail` marks cells
/// the robot has already visited; `robot` is drawn on top of everything.
pub fn render_grid(grid: &Grid, trail: &[Coordinate], robot: Option<Coordinate>) -> String {
    let mut out = String::new();
    out.push_str(LEGEND);
    out.push('\n');

    out.push_str("   ");
    for col in 0..grid.size() {
        out.push_str(&format!("{:2}", col % 10));
    }
    out.push('\n');

    for row in 0..grid.size() {
        out.push_str(&format!("{:2} ", row));
        for col in 0..grid.size() {
            let pos = Coordinate::new(row, col);
            let glyph = if Some(pos) == robot {
                'R'
            } else {
                match grid.state(pos) {
                    Some(CellState::Source) => 'S',
                    Some(CellState::Goal) => 'G',
                    Some(CellState::Blocked) => '#',
                    _ if trail.contains(&pos) => '*',
                    _ => '.',
                }
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Greedy word wrap. A word longer than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Instructions box drawn under the grid.
pub fn instruction_banner(text: &str, width: usize) -> String {
    let rule = "-".repeat(width + 4);
    let mut out = format!("{}\n", rule);
    for line in wrap_text(text, width) {
        out.push_str(&format!("| {:<width$} |\n", line, width = width));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}
