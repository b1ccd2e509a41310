mod app;
mod broadcaster;
mod colors;
mod config;
mod game_ui;
mod state;

use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, Validate};
use common::games::SessionRng;
use common::games::snake::{run_game_loop, SimulationEngine};
use common::version::VERSION;
use common::{log, logger};
use eframe::egui;
use tokio::sync::mpsc;

use app::SnakeApp;
use broadcaster::LocalBroadcaster;
use config::{get_config_manager, Config};
use state::SharedState;

#[derive(Parser)]
#[command(name = "reversal_snake", version = VERSION)]
struct Args {
    /// Config file to use instead of the one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn load_config(path: Option<PathBuf>) -> Config {
    let result = match path {
        Some(path) => ConfigManager::from_yaml_file(path).get_or_create_config(),
        None => get_config_manager().get_or_create_config(),
    };
    result.unwrap_or_else(|e| {
        log!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(args.config);
    let settings = config.snake.to_settings();
    settings.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let engine = SimulationEngine::new(&settings, rng)?;

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let broadcaster = LocalBroadcaster::new(shared_state.clone());
    let session_settings = settings.clone();
    let game_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to start game runtime: {}", e);
                return None;
            }
        };
        Some(rt.block_on(run_game_loop(
            engine,
            session_settings,
            broadcaster,
            command_rx,
        )))
    });

    let canvas_side = config.window.cell_size * settings.grid_size as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas_side + 32.0, canvas_side + 140.0])
            .with_title(format!("Reversal Snake {}", VERSION)),
        ..Default::default()
    };

    let cell_size = config.window.cell_size;
    let tick_interval = settings.tick_interval;
    eframe::run_native(
        "Reversal Snake",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SnakeApp::new(
                shared_state,
                command_tx,
                cell_size,
                tick_interval,
            )))
        }),
    )?;

    match game_thread.join() {
        Ok(Some(summary)) => log!(
            "Best score this session: {} over {} rounds",
            summary.best_score,
            summary.rounds
        ),
        Ok(None) => {}
        Err(_) => log!("Game thread panicked"),
    }

    Ok(())
}
