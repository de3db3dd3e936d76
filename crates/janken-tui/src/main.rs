// Janken entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Create mpsc channels
// 4. Build the keyboard stand-in rig
// 5. Spawn the round controller task
// 6. Spawn the rig driver task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use janken_core::config;
use janken_core::controller::RoundController;
use janken_tui::rig::{self, HandSignal, KeyboardCamera, ScriptedRuntime, RUNTIME_WARMUP};
use janken_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Janken starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: model at {}, threshold {}, cooldown {}s",
        config.model.base_path, config.round.confidence_threshold, config.round.cooldown_secs
    );

    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

    let signal = HandSignal::default();
    let runtime = ScriptedRuntime::new(signal.clone(), RUNTIME_WARMUP);
    let camera = KeyboardCamera::new();

    let mut controller =
        RoundController::new(config, Box::new(runtime), Box::new(camera), ui_tx);

    let game_handle = tokio::spawn(async move {
        if let Err(e) = controller.initialize().await {
            warn!("Game not started: {}", e);
            return;
        }
        if let Err(e) = controller.run(shutdown_rx).await {
            error!("Round loop error: {}", e);
        }
        info!("Round loop finished after {} rounds", controller.rounds_played());
    });

    let rig_handle = tokio::spawn(rig::drive(cmd_rx, signal, shutdown_tx));

    // Blocks until the user confirms quit or presses Ctrl+C.
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(2), async {
        let _ = rig_handle.await;
    })
    .await;

    // A controller still waiting on setup never sees the shutdown signal.
    let abort = game_handle.abort_handle();
    if tokio::time::timeout(Duration::from_secs(2), game_handle)
        .await
        .is_err()
    {
        abort.abort();
    }

    info!("Janken shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("janken.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("janken_core=info,janken_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
