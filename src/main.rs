//! Seer - a guess-the-character game client
//!
//! Asks yes/no style questions served by a remote oracle until it names the
//! character the player is thinking of, and learns new characters when it
//! fails.

mod config;
mod confetti;
mod console;
mod oracle;
mod runtime;
mod state_machine;

use confetti::{spawn_animation, ConfettiEngine, ConfettiHandle, TracingRenderer};
use config::SeerConfig;
use console::{ConsoleSurface, LearningForm};
use oracle::{HttpOracle, LoggingOracle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seer=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = SeerConfig::from_env()?;
    tracing::info!(
        oracle_url = %config.oracle_url,
        frame_ms = config.frame_interval.as_millis(),
        "Configuration loaded"
    );

    let oracle = LoggingOracle::new(HttpOracle::new(&config.oracle_url)?);

    let (confetti, commands) = ConfettiHandle::channel();
    let engine = ConfettiEngine::new(config.surface, StdRng::from_entropy());
    let animation = spawn_animation(
        engine,
        TracingRenderer::new(),
        commands,
        config.frame_interval,
    );

    let form = LearningForm::default();
    let surface = ConsoleSurface::new(std::io::stdout(), form.clone());
    let (handle, game) = runtime::spawn_game(oracle, surface, confetti);

    let stdin = BufReader::new(tokio::io::stdin());
    let result = console::read_intents(stdin, &form, &handle, &mut std::io::stdout()).await;

    // Dropping the last handle stops the runtime, which drops the confetti
    // handle in turn
    drop(handle);
    if let Err(e) = game.await {
        tracing::error!(error = %e, "Game runtime panicked");
    }
    if let Err(e) = animation.await {
        tracing::error!(error = %e, "Confetti task panicked");
    }

    result?;
    tracing::info!("Goodbye");
    Ok(())
}
