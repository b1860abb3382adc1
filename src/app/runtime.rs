use crate::app::{ConfirmScreen, ScreenOutcome};
use crate::confirm::ConfirmScreenFactory;
use crate::error::Result;
use crate::input::spawn_input_thread;
use crate::render::{ColorTheme, TerminalUI};
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Open the confirmation screen on the real terminal and run it to completion.
///
/// Terminal input is collected on a blocking thread and forwarded onto a
/// channel; the thread is stopped and joined before returning.
pub async fn run_terminal_screen(
    factory: &ConfirmScreenFactory,
    theme: ColorTheme,
    animation: Duration,
) -> Result<ScreenOutcome> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    let input_thread = spawn_input_thread(tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

    let mut screen = ConfirmScreen::new(factory.create(), TerminalUI::with_theme(theme), animation);
    let outcome = screen.run(&mut rx).await;

    shutdown.store(true, Ordering::SeqCst);
    drop(rx);
    match tokio::task::spawn_blocking(move || input_thread.join()).await {
        Ok(Ok(())) => {}
        _ => warn!("input thread did not shut down cleanly"),
    }

    outcome
}
