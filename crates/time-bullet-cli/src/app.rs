use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyModifiers};
use time_bullet_engine::{
    Clock, Document, Key, KeyEvent, Modifiers, SystemClock, TimeBullets, io,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    TimeFormat,
    UseUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Settings(SettingsField),
}

/// What the main loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App<C: Clock = SystemClock> {
    pub path: PathBuf,
    pub document: Document,
    pub bullets: TimeBullets<C>,
    pub focus: Focus,
    pub status: String,
    saved_version: u64,
    quit_pending: bool,
}

impl<C: Clock> App<C> {
    pub fn new(path: PathBuf, document: Document, bullets: TimeBullets<C>) -> Self {
        let saved_version = document.version();
        Self {
            path,
            document,
            bullets,
            focus: Focus::Editor,
            status: String::from("Type -[t] then space to start a time bullet"),
            saved_version,
            quit_pending: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    pub fn save(&mut self) {
        match io::write_document(&self.path, &self.document) {
            Ok(()) => {
                self.saved_version = self.document.version();
                self.status = format!("Saved {}", self.path.display());
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", self.path.display());
                self.status = format!("Error saving file: {e}");
            }
        }
    }

    pub fn handle_key(&mut self, key: TermKeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let quit = match key.code {
            KeyCode::Char('q') => ctrl,
            KeyCode::Esc => self.focus == Focus::Editor,
            _ => false,
        };
        if quit {
            return self.request_quit();
        }
        self.quit_pending = false;

        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Editor;
                return Control::Continue;
            }
            KeyCode::Char('s') if ctrl => {
                self.save();
                return Control::Continue;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Editor => Focus::Settings(SettingsField::TimeFormat),
                    Focus::Settings(_) => Focus::Editor,
                };
                return Control::Continue;
            }
            _ => {}
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Settings(field) => self.handle_settings_key(field, key),
        }
        Control::Continue
    }

    /// Quit right away when everything is saved, otherwise only on a second
    /// request in a row.
    fn request_quit(&mut self) -> Control {
        if !self.is_dirty() || self.quit_pending {
            return Control::Quit;
        }
        self.quit_pending = true;
        self.status =
            String::from("Unsaved changes: press Esc or Ctrl-Q again to quit, Ctrl-S to save");
        Control::Continue
    }

    fn handle_editor_key(&mut self, key: TermKeyEvent) {
        match key.code {
            KeyCode::Left => self.document.move_left(),
            KeyCode::Right => self.document.move_right(),
            KeyCode::Up => self.document.move_up(),
            KeyCode::Down => self.document.move_down(),
            KeyCode::Home => self.document.move_line_start(),
            KeyCode::End => self.document.move_line_end(),
            KeyCode::Backspace => self.document.backspace(),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Enter | KeyCode::Char(_) => {
                if let Some(event) = to_key_event(&key) {
                    self.type_key(event);
                }
            }
            _ => {}
        }
    }

    /// The editor's native handling wrapped around the keydown observer.
    ///
    /// Enter splits the line first so the observer sees the new line; typed
    /// characters are inserted only if the observer didn't claim the key.
    fn type_key(&mut self, mut event: KeyEvent) {
        if event.key == Key::Enter {
            self.document.split_line();
        }

        self.bullets.handle_keydown(&mut self.document, &mut event);

        if !event.is_default_prevented() {
            match event.key {
                Key::Space => self.document.insert_char(' '),
                Key::Char(c) => self.document.insert_char(c),
                Key::Enter | Key::Other => {}
            }
        }
    }

    fn handle_settings_key(&mut self, field: SettingsField, key: TermKeyEvent) {
        match (field, key.code) {
            (_, KeyCode::Up) => self.focus = Focus::Settings(SettingsField::TimeFormat),
            (_, KeyCode::Down) => self.focus = Focus::Settings(SettingsField::UseUtc),
            (SettingsField::TimeFormat, KeyCode::Char(c)) => {
                let mut format = self.bullets.config().time_format.clone();
                format.push(c);
                self.bullets.set_time_format(format);
            }
            (SettingsField::TimeFormat, KeyCode::Backspace) => {
                let mut format = self.bullets.config().time_format.clone();
                format.pop();
                self.bullets.set_time_format(format);
            }
            (SettingsField::UseUtc, KeyCode::Char(' ') | KeyCode::Enter) => {
                let use_utc = !self.bullets.config().use_utc;
                self.bullets.set_use_utc(use_utc);
            }
            _ => {}
        }
    }
}

/// Translate a terminal key into the engine's keydown event.
pub fn to_key_event(key: &TermKeyEvent) -> Option<KeyEvent> {
    let engine_key = match key.code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::from_char(c),
        _ => return None,
    };
    let modifiers = Modifiers {
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        meta: key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };
    Some(KeyEvent::with_modifiers(engine_key, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use time_bullet_engine::{Config, FixedClock};

    fn app(dir: &TempDir) -> App<FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap());
        App::new(
            dir.path().join("today.md"),
            Document::new(),
            TimeBullets::new(Config::default(), clock),
        )
    }

    fn press(app: &mut App<FixedClock>, code: KeyCode) -> Control {
        app.handle_key(TermKeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<FixedClock>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_trigger_and_enter() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        type_text(&mut app, "-[t] stand-up");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "review");

        assert_eq!(app.document.text(), "- [14:05] stand-up\n- [14:05] review");
        assert!(app.is_dirty());
    }

    #[test]
    fn test_ctrl_s_saves_and_clears_dirty() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        type_text(&mut app, "-[t] note");

        app.handle_key(TermKeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert!(!app.is_dirty());
        let saved = std::fs::read_to_string(dir.path().join("today.md")).unwrap();
        assert_eq!(saved, "- [14:05] note");
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
        assert_eq!(
            app.handle_key(TermKeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Control::Quit
        );
        assert_eq!(press(&mut app, KeyCode::Char('q')), Control::Continue);
    }

    #[test]
    fn test_unsaved_changes_survive_first_quit_request() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        type_text(&mut app, "-[t] note");

        assert_eq!(press(&mut app, KeyCode::Esc), Control::Continue);
        assert_eq!(app.document.text(), "- [14:05] note");
        assert!(app.is_dirty());
        assert!(app.status.starts_with("Unsaved changes"));

        assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
    }

    #[test]
    fn test_typing_after_quit_request_cancels_it() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        type_text(&mut app, "draft");

        let ctrl_q = TermKeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_q), Control::Continue);
        type_text(&mut app, "!");
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Continue);
        assert_eq!(app.document.text(), "draft!");

        app.handle_key(TermKeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
    }

    #[test]
    fn test_esc_leaves_settings_panel() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Tab);
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Continue);
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn test_settings_panel_edits_format_and_toggle() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Settings(SettingsField::TimeFormat));
        type_text(&mut app, ":ss");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.bullets.config().time_format, "HH:mm:ss");
        assert!(!app.bullets.config().use_utc);
        assert_eq!(app.focus, Focus::Editor);
        // Settings edits don't touch the document
        assert_eq!(app.document.text(), "");
    }

    #[test]
    fn test_clearing_format_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Tab);
        for _ in 0.."HH:mm".len() {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "-[t] ");

        assert_eq!(app.bullets.config().time_format, "");
        assert_eq!(app.document.text(), "- [14:05] ");
    }

    #[test]
    fn test_to_key_event_maps_modifiers() {
        let shift_enter = TermKeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        let event = to_key_event(&shift_enter).unwrap();
        assert_eq!(event.key, Key::Enter);
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.ctrl);

        let space = TermKeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let event = to_key_event(&space).unwrap();
        assert_eq!(event.key, Key::Space);

        assert_eq!(
            to_key_event(&TermKeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
            None
        );
    }
}
