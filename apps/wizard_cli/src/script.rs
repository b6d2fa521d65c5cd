use std::{fs, path::Path};

use anyhow::{Context, Result};
use client_core::WizardSession;
use tracing::{debug, warn};
use wizard::{Notification, NotificationLevel, WizardAction};

/// Reads a JSON array of tagged wizard actions.
pub fn load_script(path: &Path) -> Result<Vec<WizardAction>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&raw).with_context(|| format!("invalid script {}", path.display()))
}

pub fn parse_script(raw: &str) -> Result<Vec<WizardAction>> {
    Ok(serde_json::from_str(raw)?)
}

/// Dispatches every action in order; rejected actions are counted and
/// logged but do not stop the script.
pub fn apply_script(session: &mut WizardSession, actions: Vec<WizardAction>) -> usize {
    let mut rejected = 0;
    for action in actions {
        let name = action.name();
        match session.dispatch(action) {
            Ok(()) => debug!(action = name, step = ?session.state().current_step(), "applied"),
            Err(err) => {
                rejected += 1;
                warn!(action = name, error = %err, "action rejected");
            }
        }
    }
    rejected
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
        NotificationLevel::Warning => "warn",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
