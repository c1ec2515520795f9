use anyhow::Result;
use tracing::info;

use crate::domain::commands::Command;

/// Receiver of palette dispatches. The palette calls `invoke` exactly once per
/// submitted or clicked command.
pub trait ShortcutRegistry {
    fn invoke(&mut self, command: &Command) -> Result<()>;
}

/// Registry that records each dispatched action and logs it.
#[derive(Debug, Default)]
pub struct LoggingRegistry {
    dispatched: Vec<String>,
}

impl LoggingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatched(&self) -> &[String] {
        &self.dispatched
    }

    pub fn last_dispatched(&self) -> Option<&str> {
        self.dispatched.last().map(String::as_str)
    }
}

impl ShortcutRegistry for LoggingRegistry {
    fn invoke(&mut self, command: &Command) -> Result<()> {
        info!(
            action = command.action(),
            label = command.label().unwrap_or_default(),
            "shortcut dispatched"
        );
        self.dispatched.push(command.action().to_string());
        Ok(())
    }
}
