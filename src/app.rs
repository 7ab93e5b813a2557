use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::warn;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::difficulty::Difficulty;
use crate::effects::Effects;
use crate::scheduler::Millis;
use crate::session::{ClickOutcome, SessionController, HIT_REWARD};
use crate::ui::layout;

/// What the screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Hunting,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: SessionController,
    pub effects: Effects,
    pub area: Rect,
    /// Latest clock reading seen, for time-based drawing
    pub now: Millis,
    store: Option<FileConfigStore>,
}

impl App {
    pub fn new(difficulty: Difficulty, seed: Option<u64>, store: Option<FileConfigStore>) -> Self {
        let mut app = Self {
            session: SessionController::new(difficulty, seed),
            effects: Effects::new(),
            area: Rect::default(),
            now: 0,
            store,
        };
        app.resize(80, 24);
        app
    }

    pub fn phase(&self) -> Phase {
        if self.session.is_running() {
            Phase::Hunting
        } else if self.session.last_round().is_some() {
            Phase::GameOver
        } else {
            Phase::Ready
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        let play = layout::split(self.area).play;
        self.session.set_bounds(layout::bounds_for(play));
    }

    pub fn on_tick(&mut self, now: Millis) {
        self.now = now;
        self.session.advance_to(now);
        self.effects.update(now);
    }

    pub fn start(&mut self, now: Millis) {
        self.now = now;
        let difficulty = self.session.difficulty();
        self.session.start(difficulty, now);
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.effects.clear();
    }

    /// Changes difficulty and remembers it, unless a hunt is running
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.session.select_difficulty(difficulty).is_err() {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&Config { difficulty }) {
                warn!(path = %store.path().display(), "could not save config: {e}");
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Millis) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit
            }
            KeyCode::Char('s') | KeyCode::Enter => self.start(now),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('1') => self.select_difficulty(Difficulty::Easy),
            KeyCode::Char('2') => self.select_difficulty(Difficulty::Medium),
            KeyCode::Char('3') => self.select_difficulty(Difficulty::Hard),
            KeyCode::Char('d') => self.select_difficulty(self.session.difficulty().next()),
            _ => {}
        }
        KeyAction::Continue
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Millis) -> ClickOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return ClickOutcome::Ignored;
        }

        let play = layout::split(self.area).play;
        let Some(point) = layout::cell_to_point(play, mouse.column, mouse.row) else {
            return ClickOutcome::Ignored;
        };

        self.now = now;
        let outcome = self.session.interact(point, now);
        if let ClickOutcome::Hit { .. } = outcome {
            self.effects.hit(point, HIT_REWARD, now);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use tempfile::tempdir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        App::new(Difficulty::Easy, Some(99), None)
    }

    /// Cell at the middle of the active target
    fn target_center_cell(app: &App) -> (u16, u16) {
        let play = layout::split(app.area).play;
        let target = app.session.active_target().expect("active target");
        let r = layout::target_rect(play, target).expect("target on screen");
        (r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn test_new_app_is_ready() {
        let app = app();
        assert_eq!(app.phase(), Phase::Ready);
        assert_eq!(
            app.session.bounds(),
            layout::bounds_for(layout::split(app.area).play)
        );
    }

    #[test]
    fn test_start_and_reset_keys() {
        let mut app = app();
        assert_eq!(app.on_key(key('s'), 0), KeyAction::Continue);
        assert_eq!(app.phase(), Phase::Hunting);

        app.on_key(key('r'), 10);
        assert_eq!(app.phase(), Phase::Ready);
        assert_eq!(app.session.score(), 0);
    }

    #[test]
    fn test_enter_starts_too() {
        let mut app = app();
        app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), 0);
        assert!(app.session.is_running());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(app.on_key(key('q'), 0), KeyAction::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), 0),
            KeyAction::Quit
        );
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 0),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        app.on_key(release, 0);
        assert!(!app.session.is_running());
    }

    #[test]
    fn test_difficulty_keys_only_when_stopped() {
        let mut app = app();
        app.on_key(key('3'), 0);
        assert_eq!(app.session.difficulty(), Difficulty::Hard);
        app.on_key(key('d'), 0);
        assert_eq!(app.session.difficulty(), Difficulty::Easy);
        app.on_key(key('2'), 0);
        assert_eq!(app.session.difficulty(), Difficulty::Medium);
        assert_eq!(app.session.time_remaining(), 20);

        app.on_key(key('s'), 0);
        app.on_key(key('1'), 100);
        assert_eq!(app.session.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_choice_is_saved() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::new(Difficulty::Easy, Some(1), Some(store.clone()));

        app.on_key(key('3'), 0);
        assert_eq!(store.load().difficulty, Difficulty::Hard);

        // Rejected changes are not persisted
        app.on_key(key('s'), 0);
        app.on_key(key('1'), 0);
        assert_eq!(store.load().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_click_on_target_scores_and_bursts() {
        let mut app = app();
        app.on_key(key('s'), 0);
        let (col, row) = target_center_cell(&app);

        let outcome = app.on_mouse(click(col, row), 200);
        assert_eq!(outcome, ClickOutcome::Hit { score: 10 });
        assert!(app.effects.is_active());
        assert!(app.session.active_target().is_some());
    }

    #[test]
    fn test_click_outside_play_area_ignored() {
        let mut app = app();
        app.on_key(key('s'), 0);
        assert_eq!(app.on_mouse(click(0, 0), 10), ClickOutcome::Ignored);
    }

    #[test]
    fn test_non_left_clicks_ignored() {
        let mut app = app();
        app.on_key(key('s'), 0);
        let (col, row) = target_center_cell(&app);
        let mut ev = click(col, row);
        ev.kind = MouseEventKind::Down(MouseButton::Right);
        assert_eq!(app.on_mouse(ev, 10), ClickOutcome::Ignored);
        ev.kind = MouseEventKind::Moved;
        assert_eq!(app.on_mouse(ev, 10), ClickOutcome::Ignored);
        assert_eq!(app.session.score(), 0);
    }

    #[test]
    fn test_round_ends_in_game_over() {
        let mut app = app();
        app.on_key(key('3'), 0);
        app.on_key(key('s'), 0);
        app.on_tick(10_000);
        assert_eq!(app.phase(), Phase::GameOver);

        // play again
        app.on_key(key('r'), 10_100);
        assert_eq!(app.phase(), Phase::Ready);
        app.on_key(key('s'), 10_200);
        assert_eq!(app.phase(), Phase::Hunting);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut app = app();
        app.resize(120, 40);
        let play = layout::split(app.area).play;
        assert_eq!(app.session.bounds(), layout::bounds_for(play));
        assert_eq!(play.width, 116);
    }
}
