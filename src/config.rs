use crate::error::ConfigError;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Paint obstacles on a grid and watch Dijkstra or A* plan a route", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 10)]
    pub grid_size: usize,

    /// Pause between robot steps while moving along a path
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Run both algorithms on a generated layout instead of the interactive session
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    #[arg(long, default_value_t = 20)]
    pub num_walls: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Searches per algorithm in comparison mode, for timing
    #[arg(long, default_value_t = 5)]
    pub repeats: usize,

    #[arg(long, default_value_t = 40)]
    pub banner_width: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.banner_width == 0 {
            return Err(ConfigError::EmptyBanner);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 10,
            delay_ms: 500,
            no_visualization: false,
            compare: false,
            num_walls: 20,
            seed: None,
            repeats: 5,
            banner_width: 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let parsed = Config::parse_from(["omni_world"]);
        let default = Config::default();
        assert_eq!(parsed.grid_size, default.grid_size);
        assert_eq!(parsed.delay_ms, default.delay_ms);
        assert_eq!(parsed.num_walls, default.num_walls);
        assert_eq!(parsed.repeats, default.repeats);
        assert_eq!(parsed.banner_width, default.banner_width);
        assert!(parsed.seed.is_none());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn rejects_zero_sized_grid() {
        let config = Config::parse_from(["omni_world", "--grid-size", "0"]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn parses_compare_flags() {
        let config = Config::parse_from(["omni_world", "--compare", "--seed", "7", "--num-walls", "3"]);
        assert!(config.compare);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.num_walls, 3);
    }
}
