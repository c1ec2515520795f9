use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::domain::commands::Command;
use crate::domain::matcher::FuzzyMatcher;
use crate::domain::palette::{CommandPalette, PaletteRow};
use crate::integrations::key_symbols::{KeySymbols, StandardKeySymbols};
use crate::integrations::registry::{LoggingRegistry, ShortcutRegistry};
use crate::storage::config::RuntimeConfig;
use crate::storage::shortcuts::ShortcutsStore;
use crate::ui::Tui;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub debug: bool,
    pub config_path: Option<PathBuf>,
    pub shortcuts_path: Option<PathBuf>,
}

pub struct App {
    pub running: bool,
    pub status_message: String,
    palette: CommandPalette,
    commands: Arc<[Command]>,
    registry: Box<dyn ShortcutRegistry>,
    symbols: Box<dyn KeySymbols>,
}

impl App {
    pub fn new(commands: Vec<Command>, registry: Box<dyn ShortcutRegistry>) -> Self {
        Self::new_with_palette(commands, registry, CommandPalette::default())
    }

    pub fn new_with_palette(
        commands: Vec<Command>,
        registry: Box<dyn ShortcutRegistry>,
        palette: CommandPalette,
    ) -> Self {
        let commands: Arc<[Command]> = commands.into();
        let status_message = format!(
            "Loaded {} shortcuts | Ctrl+P opens the palette",
            commands.len()
        );
        Self {
            running: true,
            status_message,
            palette,
            commands,
            registry,
            symbols: Box::new(StandardKeySymbols),
        }
    }

    pub fn with_symbols(mut self, symbols: Box<dyn KeySymbols>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn palette_open(&self) -> bool {
        self.palette.is_open()
    }

    pub fn palette_input(&self) -> &str {
        self.palette.query().unwrap_or_default()
    }

    pub fn palette_rows(&self) -> Vec<PaletteRow> {
        self.palette.rows(&*self.symbols)
    }

    pub fn palette_offset(&self) -> i32 {
        self.palette.offset()
    }

    pub fn toggle_palette(&mut self) {
        if self.palette.is_open() {
            self.close_overlays();
        } else {
            self.palette.open(Arc::clone(&self.commands));
            self.status_message = "Type your command".to_string();
        }
    }

    pub fn close_overlays(&mut self) {
        if self.palette.is_open() {
            self.palette.close();
            self.status_message = "Palette closed".to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.palette.push_char(c);
    }

    pub fn backspace_input(&mut self) {
        self.palette.backspace();
    }

    pub fn select_next(&mut self) {
        self.palette.navigate_down();
    }

    pub fn select_previous(&mut self) {
        self.palette.navigate_up();
    }

    pub fn submit_current_input(&mut self) -> Result<()> {
        if !self.palette.is_open() {
            return Ok(());
        }
        let dispatched = self.palette.submit(&mut *self.registry)?;
        self.report_dispatch(dispatched);
        Ok(())
    }

    /// Dispatches the visible row at `index` as if it had been clicked.
    pub fn select_row(&mut self, index: usize) -> Result<()> {
        if !self.palette.is_open() {
            return Ok(());
        }
        if let Some(command) = self.palette.select(index, &mut *self.registry)? {
            self.report_dispatch(Some(command));
        }
        Ok(())
    }

    pub fn request_quit(&mut self) {
        self.palette.close();
        self.running = false;
        self.status_message = "Bye".to_string();
    }

    fn report_dispatch(&mut self, dispatched: Option<Command>) {
        self.status_message = match dispatched {
            Some(command) => format!(
                "Dispatched {} ({})",
                command.label().unwrap_or_default(),
                command.action()
            ),
            None => "No command matched".to_string(),
        };
    }
}

pub fn run(options: RunOptions) -> Result<()> {
    let config = match &options.config_path {
        Some(path) => RuntimeConfig::load_from_path(path),
        None => RuntimeConfig::load(),
    }
    .context("load runtime config")?;

    init_tracing(options.debug, &config)?;

    let shortcuts_path = options
        .shortcuts_path
        .clone()
        .unwrap_or_else(|| config.shortcuts.path.clone());
    let store = ShortcutsStore::new(shortcuts_path);
    let commands = store.load_or_init().context("load shortcuts on startup")?;
    info!(
        shortcuts = commands.len(),
        path = %store.path().display(),
        policy = config.palette.active_policy.label(),
        "starting command palette"
    );

    let palette = CommandPalette::new(
        FuzzyMatcher::new(config.matcher),
        config.layout,
        config.palette.active_policy,
    );
    let mut app = App::new_with_palette(commands, Box::new(LoggingRegistry::new()), palette);
    let mut tui = Tui::new()?;

    if let Err(err) = tui.run(&mut app) {
        warn!(error = ?err, "tui exited with error");
        return Err(err);
    }

    Ok(())
}

fn init_tracing(debug: bool, config: &RuntimeConfig) -> Result<()> {
    let default_filter = if debug { "cmdpal=debug" } else { "cmdpal=info" };

    // The TUI owns stdout, so logs only go to a file when one is configured.
    let writer = match &config.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(())
}
