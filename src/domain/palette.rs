use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::domain::commands::{Command, CommandKind};
use crate::domain::matcher::FuzzyMatcher;
use crate::domain::offset::ListLayout;
use crate::domain::tracker::ActiveItem;
use crate::integrations::key_symbols::KeySymbols;
use crate::integrations::registry::ShortcutRegistry;

/// What happens to the highlighted row when the query changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivePolicy {
    /// Highlight the best match again.
    #[default]
    Reset,
    /// Keep the current position, pulled back into range if the list shrank.
    Clamp,
}

impl ActivePolicy {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "clamp" => Ok(Self::Clamp),
            _ => Err(anyhow!(
                "invalid active policy '{value}' (expected reset or clamp)"
            )),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Clamp => "clamp",
        }
    }
}

/// One result as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRow {
    pub label: String,
    pub keyword: String,
    pub remainder: String,
    pub kind: CommandKind,
    pub highlighted: bool,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone)]
struct OpenPalette {
    commands: Arc<[Command]>,
    query: String,
    results: Vec<usize>,
    active: ActiveItem,
}

#[derive(Debug, Clone, Default)]
enum PaletteState {
    #[default]
    Idle,
    Open(OpenPalette),
}

#[derive(Debug, Clone, Default)]
pub struct CommandPalette {
    matcher: FuzzyMatcher,
    layout: ListLayout,
    policy: ActivePolicy,
    state: PaletteState,
}

impl CommandPalette {
    pub fn new(matcher: FuzzyMatcher, layout: ListLayout, policy: ActivePolicy) -> Self {
        Self {
            matcher,
            layout,
            policy,
            state: PaletteState::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PaletteState::Open(_))
    }

    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    pub fn query(&self) -> Option<&str> {
        self.open_state().map(|open| open.query.as_str())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.open_state().map(|open| open.active.index())
    }

    pub fn results(&self) -> Vec<&Command> {
        match self.open_state() {
            Some(open) => open
                .results
                .iter()
                .map(|&idx| &open.commands[idx])
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn result_count(&self) -> usize {
        self.open_state().map_or(0, |open| open.results.len())
    }

    /// Scroll translation for the current highlight, 0 while closed.
    pub fn offset(&self) -> i32 {
        match self.open_state() {
            Some(open) => self
                .layout
                .offset(open.active.index(), open.results.len()),
            None => 0,
        }
    }

    pub fn rows(&self, symbols: &dyn KeySymbols) -> Vec<PaletteRow> {
        let Some(open) = self.open_state() else {
            return Vec::new();
        };

        open.results
            .iter()
            .enumerate()
            .map(|(position, &idx)| {
                let command = &open.commands[idx];
                let (keyword, remainder) = command.label_parts();
                PaletteRow {
                    label: command.label().unwrap_or_default().to_string(),
                    keyword: keyword.to_string(),
                    remainder: remainder.to_string(),
                    kind: command.kind(),
                    highlighted: position == open.active.index(),
                    keys: command
                        .keys()
                        .iter()
                        .map(|key| symbols.symbol(key))
                        .collect(),
                }
            })
            .collect()
    }

    /// Starts a session over `commands`, discarding any session in progress.
    pub fn open(&mut self, commands: impl Into<Arc<[Command]>>) {
        let commands = commands.into();
        let results = labeled_indices(&commands);
        debug!(
            commands = commands.len(),
            results = results.len(),
            "palette opened"
        );
        self.state = PaletteState::Open(OpenPalette {
            commands,
            query: String::new(),
            results,
            active: ActiveItem::default(),
        });
    }

    pub fn close(&mut self) {
        if self.is_open() {
            debug!("palette closed");
        }
        self.state = PaletteState::Idle;
    }

    /// Replaces the query and recomputes the result list.
    pub fn input(&mut self, query: impl Into<String>) {
        let policy = self.policy;
        let PaletteState::Open(open) = &mut self.state else {
            return;
        };

        open.query = query.into();
        open.results = if open.query.is_empty() {
            labeled_indices(&open.commands)
        } else {
            self.matcher
                .rank(&open.query, &open.commands)
                .into_iter()
                .map(|hit| hit.index)
                .collect()
        };
        open.active = match policy {
            ActivePolicy::Reset => ActiveItem::default(),
            ActivePolicy::Clamp => open.active.clamp(open.results.len()),
        };
        debug!(
            query = %open.query,
            results = open.results.len(),
            active = open.active.index(),
            "palette query updated"
        );
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(query) = self.query() {
            let mut next = query.to_string();
            next.push(c);
            self.input(next);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(query) = self.query() {
            let mut next = query.to_string();
            if next.pop().is_some() {
                self.input(next);
            }
        }
    }

    pub fn navigate_down(&mut self) {
        if let PaletteState::Open(open) = &mut self.state {
            open.active = open.active.next(open.results.len());
        }
    }

    pub fn navigate_up(&mut self) {
        if let PaletteState::Open(open) = &mut self.state {
            open.active = open.active.previous(open.results.len());
        }
    }

    /// Dispatches the result at `index` regardless of the highlight and
    /// closes the palette.
    ///
    /// Nothing happens when the palette is closed or the index is past the
    /// end of the result list.
    pub fn select(
        &mut self,
        index: usize,
        registry: &mut dyn ShortcutRegistry,
    ) -> Result<Option<Command>> {
        let Some(command) = self.result_at(index) else {
            return Ok(None);
        };
        self.close();
        dispatch(&command, registry)?;
        Ok(Some(command))
    }

    /// Dispatches the highlighted result and closes the palette.
    ///
    /// With no results the palette still closes but nothing is dispatched.
    pub fn submit(&mut self, registry: &mut dyn ShortcutRegistry) -> Result<Option<Command>> {
        let Some(active) = self.active_index() else {
            return Ok(None);
        };
        let command = self.result_at(active);
        self.close();
        if let Some(command) = &command {
            dispatch(command, registry)?;
        }
        Ok(command)
    }

    fn result_at(&self, index: usize) -> Option<Command> {
        let open = self.open_state()?;
        let idx = *open.results.get(index)?;
        Some(open.commands[idx].clone())
    }

    fn open_state(&self) -> Option<&OpenPalette> {
        match &self.state {
            PaletteState::Open(open) => Some(open),
            PaletteState::Idle => None,
        }
    }
}

fn dispatch(command: &Command, registry: &mut dyn ShortcutRegistry) -> Result<()> {
    debug!(action = command.action(), "dispatching palette command");
    registry.invoke(command)
}

fn labeled_indices(commands: &[Command]) -> Vec<usize> {
    commands
        .iter()
        .enumerate()
        .filter(|(_, command)| command.label().is_some())
        .map(|(idx, _)| idx)
        .collect()
}
