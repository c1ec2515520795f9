pub mod render;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::App;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn run(&mut self, app: &mut App) -> Result<()> {
        while app.running {
            self.terminal
                .draw(|frame| render::render(frame, app))
                .map_err(anyhow::Error::from)?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        handle_key_event(app, key);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Applies one key press to the app. Dispatch failures land in the status line.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    let result = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.request_quit();
            Ok(())
        }
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
            app.toggle_palette();
            Ok(())
        }
        (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='9')) => {
            let row = c.to_digit(10).unwrap_or(1) as usize - 1;
            app.select_row(row)
        }
        (_, KeyCode::Esc) => {
            app.close_overlays();
            Ok(())
        }
        (_, KeyCode::Enter) => app.submit_current_input(),
        (_, KeyCode::Backspace) => {
            app.backspace_input();
            Ok(())
        }
        (_, KeyCode::Up) => {
            app.select_previous();
            Ok(())
        }
        (_, KeyCode::Down) => {
            app.select_next();
            Ok(())
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) if app.palette_open() => {
            app.push_char(c);
            Ok(())
        }
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.request_quit();
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(err) = result {
        app.status_message = format!("Error: {err}");
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().execute(LeaveAlternateScreen);
    }
}
