// src/system/signals.rs

use crate::constants::INTERRUPTED_EXIT_CODE;

/// Spawns a task that ends the whole process on Ctrl+C (and SIGTERM/SIGQUIT on Unix).
///
/// Subprocesses started by the runner get no special cleanup; they share the
/// terminal's process group and receive the interrupt themselves.
pub fn install_exit_handler() {
    tokio::spawn(async {
        wait_for_termination().await;
        log::debug!("Termination signal received, exiting.");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    });
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::terminate()), signal(SignalKind::quit())) {
        (Ok(mut terminate), Ok(mut quit)) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
                _ = quit.recv() => {}
            }
        }
        _ => {
            log::warn!("Could not register SIGTERM/SIGQUIT handlers, listening for Ctrl+C only.");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    let _ = tokio::signal::ctrl_c().await;
}
