use anyhow::Result;
use clap::Parser;
use snake_duel::audio::{AudioSink, Mute, TerminalBell};
use snake_duel::game::GameConfig;
use snake_duel::modes::HumanMode;
use snake_duel::records::FileRecordStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Snake game for one or two players in the terminal")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the best score and best time
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Log file (defaults to snake_duel.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell when a snake crashes
    #[arg(long)]
    bell: bool,

    /// Also ring the bell when food is eaten
    #[arg(long, requires = "bell")]
    bell_on_eat: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("snake_duel.log"));
    snake_duel::logging::init(&log_file)?;

    let config = cli.game_config()?;
    log::info!("Starting with {:?}", config);

    let records = FileRecordStore::new(&cli.data_dir);
    let audio: Box<dyn AudioSink> = if cli.bell {
        Box::new(TerminalBell::new(cli.bell_on_eat))
    } else {
        Box::new(Mute)
    };

    let mut human_mode = HumanMode::new(config, records, audio);
    human_mode.run().await?;

    Ok(())
}
