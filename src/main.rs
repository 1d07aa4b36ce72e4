use anyhow::{bail, Context, Result};
use clap::Parser;

use omni_world::config::Config;
use omni_world::environment::EnvironmentSetup;
use omni_world::path::Path;
use omni_world::render::{instruction_banner, render_grid};
use omni_world::session::{Command, Outcome, Session};
use omni_world::statistics::Comparison;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    config.validate()?;

    if config.compare {
        run_comparison(&config)
    } else {
        run_session(&config)
    }
}

fn run_comparison(config: &Config) -> Result<()> {
    println!("Starting path planning comparison...");
    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    println!("Walls: {}, Repeats per algorithm: {}", config.num_walls, config.repeats);

    let environment = EnvironmentSetup::generate(config.grid_size, config.num_walls, config.seed)
        .context("failed to generate a layout")?;
    println!("Environment seed: {} (for reproducibility)", environment.seed);

    let (Some(start), Some(goal)) = (environment.start(), environment.goal()) else {
        bail!("generated layout is missing an endpoint");
    };

    if !config.no_visualization {
        println!();
        print!("{}", render_grid(&environment.grid, &[], None));
    }
    println!();

    let comparison = Comparison::run(&environment.grid, start, goal, config.repeats);
    print!("{}", comparison);
    Ok(())
}

fn run_session(config: &Config) -> Result<()> {
    println!("Commands: click <row> <col> | 0 (next) | d (Dijkstra) | a (A*) | m (move) | reset | q");
    let mut session = Session::new(config.grid_size);
    draw(&session, config)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                prompt()?;
                continue;
            }
        };

        match session.handle(command) {
            Outcome::Redraw => draw(&session, config)?,
            Outcome::Animate(path) => animate(&mut session, path, config)?,
            Outcome::Quit => break,
        }
    }
    Ok(())
}

/// Walks the robot along `path` at the configured pace.
fn animate(session: &mut Session, path: Path, config: &Config) -> Result<()> {
    let delay = Duration::from_millis(config.delay_ms);
    for pos in path {
        session.step_robot(pos);
        if !config.no_visualization {
            draw(session, config)?;
            thread::sleep(delay);
        }
    }
    session.finish_move();
    draw(session, config)
}

fn draw(session: &Session, config: &Config) -> Result<()> {
    if !config.no_visualization {
        clear_screen();
    }
    println!("=== OMNI WORLD ===");
    print!("{}", render_grid(session.grid(), session.trail(), session.robot()));
    print!("{}", instruction_banner(session.instructions(), config.banner_width));
    if let Some((algorithm, report)) = session.last_search() {
        println!("Last search: {} expanded {} cells", algorithm, report.expanded);
    }
    prompt()
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("failed to flush stdout")
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
