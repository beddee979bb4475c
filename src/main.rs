use std::io::{self, Stdout};
use std::path::Path;

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use run_with_mind::app::App;
use run_with_mind::config::Config;
use run_with_mind::input::TerminalInput;
use run_with_mind::level::LevelGenerator;
use run_with_mind::render::{Renderer, Theme};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let _log_guard = setup_logging(&config.log_dir)?;
    tracing::info!(?config, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    println!("Thank you for playing!");
    Ok(())
}

fn run(config: &Config) -> anyhow::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let screen: Renderer<Stdout> = Renderer::new(io::stdout(), Theme::default());
    let mut app = App::new(
        TerminalInput,
        screen,
        rng,
        LevelGenerator::default(),
        config.save_path.clone(),
    );
    app.run().context("game loop failed")
}

/// File-only logging; the terminal belongs to the game.
fn setup_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "run-with-mind.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();
    Ok(guard)
}
