use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::commands::{Command, ShortcutRecord};

#[derive(Debug, Clone)]
pub struct ShortcutsStore {
    path: PathBuf,
}

impl ShortcutsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the shortcut set, falling back to the built-in set when the
    /// file does not exist.
    pub fn load(&self) -> Result<Vec<Command>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no shortcuts file, using defaults");
            return Ok(default_shortcuts());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read shortcuts file: {}", self.path.display()))?;
        let records = serde_json::from_str::<Vec<ShortcutRecord>>(&content)
            .with_context(|| format!("failed to parse shortcuts file: {}", self.path.display()))?;

        Ok(records.into_iter().map(Command::from).collect())
    }

    /// Like [`ShortcutsStore::load`], but writes the built-in set to disk
    /// on first run so it can be edited.
    pub fn load_or_init(&self) -> Result<Vec<Command>> {
        if self.path.exists() {
            return self.load();
        }

        let commands = default_shortcuts();
        let records: Vec<ShortcutRecord> = commands.iter().map(ShortcutRecord::from).collect();
        self.save(&records)?;
        info!(path = %self.path.display(), "wrote default shortcuts");
        Ok(commands)
    }

    pub fn save(&self, records: &[ShortcutRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create shortcuts directory: {}", parent.display())
            })?;
        }

        let body =
            serde_json::to_string_pretty(records).context("failed to serialize shortcuts")?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write shortcuts file: {}", self.path.display()))?;

        Ok(())
    }
}

pub fn default_shortcuts() -> Vec<Command> {
    vec![
        Command::new("Go to Home", &["g", "h"], "go-home"),
        Command::new("Go to Articles", &["g", "a"], "go-articles"),
        Command::new("Go to Careers", &["g", "c"], "go-careers"),
        Command::new("Go to Labs", &["g", "l"], "go-labs"),
        Command::new("Go to Team", &["g", "t"], "go-team"),
        Command::new("Contact Hopper", &["c", "h"], "contact"),
        Command::new("Open command line", &["cmd", "k"], "command-line"),
        Command::new("Close command line", &["esc"], "close"),
    ]
}
