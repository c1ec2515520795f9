use std::sync::{Arc, Mutex};

use anyhow::Result;
use cmdpal::app::App;
use cmdpal::domain::commands::Command;
use cmdpal::integrations::registry::ShortcutRegistry;
use cmdpal::ui::handle_key_event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

struct MockRegistry {
    log: Arc<Mutex<Vec<String>>>,
}

impl ShortcutRegistry for MockRegistry {
    fn invoke(&mut self, command: &Command) -> Result<()> {
        self.log
            .lock()
            .expect("lock log")
            .push(command.action().to_string());
        Ok(())
    }
}

fn app_with_log() -> (App, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let commands = vec![
        Command::new("Go to Home", &["g", "h"], "home"),
        Command::new("Go to Articles", &["g", "a"], "articles"),
        Command::new("Close tab", &["cmd", "w"], "close-tab"),
    ];
    let app = App::new(commands, Box::new(MockRegistry { log: log.clone() }));
    (app, log)
}

fn press(app: &mut App, code: KeyCode) {
    handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn ctrl_p_toggles_palette() {
    let (mut app, _) = app_with_log();
    assert!(!app.palette_open());

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
    assert!(app.palette_open());

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
    assert!(!app.palette_open());
}

#[test]
fn typing_filters_and_enter_dispatches() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();

    type_text(&mut app, "close");
    assert_eq!(app.palette_input(), "close");
    assert_eq!(app.palette_rows().len(), 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(log.lock().expect("lock log").as_slice(), &["close-tab".to_string()]);
    assert!(!app.palette_open());
    assert_eq!(app.status_message, "Dispatched Close tab (close-tab)");
}

#[test]
fn arrow_keys_move_highlight() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Up);
    let rows = app.palette_rows();
    assert!(rows[1].highlighted);

    press(&mut app, KeyCode::Enter);
    assert_eq!(log.lock().expect("lock log").as_slice(), &["articles".to_string()]);
}

#[test]
fn alt_digit_selects_visible_row() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT));
    assert_eq!(log.lock().expect("lock log").as_slice(), &["close-tab".to_string()]);
    assert!(!app.palette_open());
}

#[test]
fn escape_closes_without_dispatch() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();
    type_text(&mut app, "go");
    press(&mut app, KeyCode::Esc);

    assert!(!app.palette_open());
    assert!(log.lock().expect("lock log").is_empty());
}

#[test]
fn enter_with_no_match_reports_status() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();
    type_text(&mut app, "xyz");
    press(&mut app, KeyCode::Enter);

    assert!(log.lock().expect("lock log").is_empty());
    assert_eq!(app.status_message, "No command matched");
}

#[test]
fn q_quits_only_when_palette_closed() {
    let (mut app, _) = app_with_log();
    app.toggle_palette();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.running);
    assert_eq!(app.palette_input(), "q");

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.running);
}

#[test]
fn custom_key_symbols_reach_rows() {
    let (app, _) = app_with_log();
    let mut app = app.with_symbols(Box::new(|key: &str| format!("[{key}]")));
    app.toggle_palette();

    let rows = app.palette_rows();
    assert_eq!(rows[0].keys, vec!["[g]".to_string(), "[h]".to_string()]);
}

#[test]
fn modifier_chords_are_not_typed_into_the_query() {
    let (mut app, log) = app_with_log();
    app.toggle_palette();

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert_eq!(app.palette_input(), "");
    assert!(app.palette_open());
    assert!(app.running);

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    assert_eq!(app.palette_input(), "G");
    assert!(log.lock().expect("lock log").is_empty());
}
