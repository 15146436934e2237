//! Terminal stand-in for the payment window.
//!
//! Renders every published [`DisplayState`] and implements the "visit
//! website" action with the platform's default browser launcher.

use paylink_core::DisplayState;
use paylink_core::store::StateWatcher;
use serde::Serialize;
use std::io::Write;
use std::process::Command;
use tokio::task::JoinHandle;
use url::Url;

/// How states are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON line: the state plus the status text the window would show.
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    state: &'a DisplayState,
    status_text: String,
}

/// Spawn a task rendering every state until the store is dropped.
pub fn spawn_renderer(mut watcher: StateWatcher<DisplayState>, mode: RenderMode) -> JoinHandle<()> {
    tokio::spawn(async move {
        render(&watcher.current(), mode);
        while let Ok(state) = watcher.changed().await {
            render(&state, mode);
        }
        tracing::debug!("Renderer stopped");
    })
}

fn render(state: &DisplayState, mode: RenderMode) {
    let mut out = std::io::stdout().lock();
    let result = match mode {
        RenderMode::Text => writeln!(out, "{}", format_state(state)),
        RenderMode::Json => match format_json(state) {
            Ok(json) => writeln!(out, "{json}"),
            Err(e) => {
                tracing::error!("Failed to serialize display state: {}", e);
                Ok(())
            }
        },
    };
    if let Err(e) = result {
        tracing::warn!("Failed to render display state: {}", e);
    }
}

pub fn format_state(state: &DisplayState) -> String {
    let spinner = if state.loading { " …" } else { "" };
    format!(
        "Статус: {}{}\nСумма: {} {}\nСайт: {}",
        state.status, spinner, state.amount, state.currency, state.fallback_url
    )
}

pub fn format_json(state: &DisplayState) -> serde_json::Result<String> {
    serde_json::to_string(&JsonLine {
        state,
        status_text: state.status.to_string(),
    })
}

/// Open `url` in the system browser without waiting for it.
pub fn open_url(url: &Url) -> std::io::Result<()> {
    #[cfg(windows)]
    let launcher = "explorer";
    #[cfg(target_os = "macos")]
    let launcher = "open";
    #[cfg(not(any(windows, target_os = "macos")))]
    let launcher = "xdg-open";

    tracing::info!("Opening {} with {}", url, launcher);
    Command::new(launcher).arg(url.as_str()).spawn()?;
    Ok(())
}
