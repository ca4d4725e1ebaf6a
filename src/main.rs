use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{WallLayout, WorldConfig};
use grid_snake::modes::{HumanMode, TrainConfig, TrainMode, VisualizeMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake simulation with a Q-learning agent")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Let the snake wrap around the grid edges
    #[arg(long)]
    wrap: bool,

    /// Wall layout
    #[arg(long)]
    walls: Option<Walls>,

    /// Seed for edible placement and exploration
    #[arg(long)]
    seed: Option<u64>,

    /// Training episodes (train and watch modes)
    #[arg(long, default_value = "2000")]
    episodes: usize,

    /// JSON file with a world configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where terminal UI modes write logs when RUST_LOG is set
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Train a Q-learning agent headless and log progress
    Train,
    /// Train, then watch the agent play
    Watch,
}

#[derive(Clone, ValueEnum)]
enum Walls {
    None,
    Border,
}

impl Cli {
    fn world_config(&self) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => load_world_config(path)?,
            None => WorldConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if self.wrap {
            config.wrap_around = true;
        }
        if let Some(walls) = &self.walls {
            config.walls = match walls {
                Walls::None => WallLayout::None,
                Walls::Border => WallLayout::Border,
            };
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate().context("Invalid world configuration")?;
        Ok(config)
    }

    fn train_config(&self, world_config: WorldConfig) -> TrainConfig {
        let mut config = TrainConfig::new(self.episodes);
        config.log_frequency = (self.episodes / 20).max(1);
        config.world_config = world_config;
        config.agent_config.seed = self.seed;
        config
    }
}

fn load_world_config(path: &Path) -> Result<WorldConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
}

#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    File,
    Off,
}

/// Terminal UI modes draw on stderr, so their logs go to a file and only on request
fn log_target(mode: Mode, rust_log_set: bool) -> LogTarget {
    match (mode, rust_log_set) {
        (Mode::Train, _) => LogTarget::Stderr,
        (Mode::Human | Mode::Watch, true) => LogTarget::File,
        (Mode::Human | Mode::Watch, false) => LogTarget::Off,
    }
}

fn init_tracing(mode: Mode, log_file: &Path) -> Result<()> {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_target(mode, rust_log_set) {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init(),
        LogTarget::File => {
            let file = File::create(log_file)
                .with_context(|| format!("Failed to create log file {:?}", log_file))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Off => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.mode, &cli.log_file)?;

    let world_config = cli.world_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(world_config)?;
            human_mode.run().await?;
        }
        Mode::Train => {
            let train_config = cli.train_config(world_config);
            TrainMode::new(train_config)?.run()?;
        }
        Mode::Watch => {
            let train_config = cli.train_config(world_config.clone());
            let agent = TrainMode::new(train_config)?.run()?;
            let mut visualize_mode = VisualizeMode::new(agent, world_config)?;
            visualize_mode.run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_modes_never_log_to_stderr() {
        for mode in [Mode::Human, Mode::Watch] {
            assert_eq!(log_target(mode, true), LogTarget::File);
            assert_eq!(log_target(mode, false), LogTarget::Off);
        }
        assert_eq!(log_target(Mode::Train, false), LogTarget::Stderr);
        assert_eq!(log_target(Mode::Train, true), LogTarget::Stderr);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["grid_snake", "--mode", "watch", "--walls", "border"]);
        assert_eq!(cli.log_file, PathBuf::from("grid_snake.log"));

        let config = cli.world_config().unwrap();
        assert_eq!(config.walls, WallLayout::Border);
        assert_eq!(config.grid_size, 15);
    }
}
