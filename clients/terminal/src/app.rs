use crate::audio::TerminalAudio;
use crate::event::{AppEvent, Event, EventHandler};
use courtside_core::{
    Config, Event as GameEvent, Game, GameSnapshot, Renderer, Session, Side, Theme, Vec2, Viewport,
};
use ratatui::{
    crossterm::event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    layout::{Constraint, Direction, Layout, Rect},
    DefaultTerminal,
};
use std::collections::VecDeque;
use std::io::{stdout, Write};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Start,
    Themes,
    Game,
}

/// Menu states for navigation
#[derive(Debug, Default)]
pub struct MenuState {
    pub start_selected: usize,
    pub theme_selected: usize,
}

/// Holds the most recent frame until the next draw
#[derive(Debug, Default)]
pub struct FrameBuffer {
    latest: Option<GameSnapshot>,
    frames: u64,
}

impl FrameBuffer {
    pub fn latest(&self) -> Option<&GameSnapshot> {
        self.latest.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for FrameBuffer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.latest = Some(*snapshot);
        self.frames += 1;
    }
}

pub type GameSession = Session<FrameBuffer, TerminalAudio>;

/// Screen areas of the game view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub hud: Rect,
    /// Field including its border
    pub field_block: Rect,
    /// Cells the field is drawn into
    pub field: Rect,
    pub footer: Rect,
}

/// Game board size constants
pub const MIN_GAME_WIDTH: u16 = 60;
pub const MIN_GAME_HEIGHT: u16 = 24;
const MAX_GAME_WIDTH: u16 = 110;
const MAX_GAME_HEIGHT: u16 = 44;
const TITLE_HEIGHT: u16 = 3;
const HUD_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 3;
const DEBUG_HEIGHT: u16 = 7;
/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;
const EVENT_LOG_LEN: usize = 4;

/// Split the terminal into the title bar and the content area.
pub fn split_screen(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE_HEIGHT), Constraint::Min(5)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Lay out HUD, field and footer inside `area`, keeping the field's
/// proportions on screen.
pub fn game_layout(area: Rect, show_debug: bool, config: &Config) -> GameLayout {
    let width = MAX_GAME_WIDTH.min(area.width);
    let height = MAX_GAME_HEIGHT.min(area.height);
    let game_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let footer_height = if show_debug { DEBUG_HEIGHT } else { FOOTER_HEIGHT };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HUD_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(footer_height),
        ])
        .split(game_area);

    let slot = chunks[1];
    let max_cols = slot.width.saturating_sub(2);
    let max_rows = slot.height.saturating_sub(2);
    let aspect = config.field_width / config.field_height * CELL_ASPECT;
    let (cols, rows) = if (max_rows as f32 * aspect) <= max_cols as f32 {
        ((max_rows as f32 * aspect) as u16, max_rows)
    } else {
        (max_cols, (max_cols as f32 / aspect) as u16)
    };
    let cols = cols.max(1).min(max_cols.max(1));
    let rows = rows.max(1).min(max_rows.max(1));

    let field_block = Rect {
        x: slot.x + slot.width.saturating_sub(cols + 2) / 2,
        y: slot.y + slot.height.saturating_sub(rows + 2) / 2,
        width: cols + 2,
        height: rows + 2,
    };
    let field = Rect {
        x: field_block.x + 1,
        y: field_block.y + 1,
        width: cols,
        height: rows,
    };

    GameLayout {
        hud: chunks[0],
        field_block,
        field,
        footer: chunks[2],
    }
}

/// Field coordinates under screen cell (`column`, `row`), or `None` when the
/// cell is outside the field.
pub fn pointer_to_field(field: Rect, column: u16, row: u16, config: &Config) -> Option<Vec2> {
    let inside = column >= field.x
        && column < field.x + field.width
        && row >= field.y
        && row < field.y + field.height;
    if !inside {
        return None;
    }

    let viewport = Viewport::new(field.width as usize, field.height as usize, config);
    let x = ((column - field.x) as f32 + 0.5) * config.field_width / field.width as f32;
    let y = viewport.field_y_from_row((row - field.y) as usize);
    Some(Vec2::new(x, y))
}

/// Move a keyboard-driven target by `delta`, staying on the field.
pub fn nudge_target(current: f32, delta: f32, config: &Config) -> f32 {
    (current + delta).clamp(0.0, config.field_height)
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "player",
        Side::Opponent => "computer",
    }
}

/// One-line log entry for a game event
pub fn describe_event(event: &GameEvent) -> String {
    match *event {
        GameEvent::PaddleHit { side } => format!("{} paddle hit", side_name(side)),
        GameEvent::Scored { scorer, score } => format!(
            "{} scores ({}-{})",
            side_name(scorer),
            score.player,
            score.opponent
        ),
        GameEvent::MatchOver { winner } => format!("{} won the match", side_name(winner)),
    }
}

fn wrap_step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// Main application
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub screen: AppScreen,
    pub menu_state: MenuState,
    pub config: Config,
    /// Theme of the running game
    pub theme: Theme,
    pub session: Option<GameSession>,
    /// Last pointer position in field coordinates
    pub pointer: Vec2,
    pub show_debug: bool,
    /// Most recent game events, newest last
    pub event_log: VecDeque<String>,
    pub events: EventHandler,
    /// Current terminal size
    pub terminal_size: (u16, u16),
    /// Whether the game is paused because the terminal is too small
    pub ui_paused: bool,
}

impl App {
    /// Constructs a new instance of App
    pub fn new() -> color_eyre::Result<Self> {
        let config = Config::default();
        config.validate()?;
        let events = EventHandler::new(config.tick_hz)?;
        let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((80, 24));

        let mut app = Self {
            running: true,
            screen: AppScreen::Start,
            menu_state: MenuState::default(),
            config,
            theme: Theme::default(),
            session: None,
            pointer: Vec2::zero(),
            show_debug: false,
            event_log: VecDeque::with_capacity(EVENT_LOG_LEN),
            events,
            terminal_size: (width, height),
            ui_paused: false,
        };
        app.handle_resize(width, height);
        Ok(app)
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick(),
            Event::Crossterm(event) => match event {
                CrosstermEvent::Key(key_event) => self.handle_key_event(key_event)?,
                CrosstermEvent::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                _ => {}
            },
            Event::App(app_event) => self.handle_app_event(app_event)?,
        }
        Ok(())
    }

    /// Handle key events and convert to app events
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> color_eyre::Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }

        // Global quit keys
        match key_event.code {
            KeyCode::Char('q') => {
                self.events.send(AppEvent::Quit);
                return Ok(());
            }
            KeyCode::Char('c') | KeyCode::Char('C')
                if key_event.modifiers == KeyModifiers::CONTROL =>
            {
                self.events.send(AppEvent::Quit);
                return Ok(());
            }
            _ => {}
        }

        let pressed = key_event.kind == KeyEventKind::Press;
        match self.screen {
            AppScreen::Start | AppScreen::Themes => {
                if pressed {
                    match key_event.code {
                        KeyCode::Up => self.events.send(AppEvent::MenuUp),
                        KeyCode::Down => self.events.send(AppEvent::MenuDown),
                        KeyCode::Enter => self.events.send(AppEvent::MenuSelect),
                        KeyCode::Esc => {
                            if self.screen == AppScreen::Themes {
                                self.events.send(AppEvent::NavigateToStart);
                            } else {
                                self.events.send(AppEvent::Quit);
                            }
                        }
                        _ => {}
                    }
                }
            }
            AppScreen::Game => {
                let nudge = self.config.paddle_height / 4.0;
                match key_event.code {
                    KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.nudge(-nudge),
                    KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.nudge(nudge),
                    KeyCode::Esc if pressed => self.events.send(AppEvent::NavigateToStart),
                    KeyCode::Char(' ') | KeyCode::Enter if pressed => self.restart(),
                    KeyCode::Char('d') | KeyCode::Char('D') if pressed => {
                        self.show_debug = !self.show_debug;
                    }
                    KeyCode::Char('m') | KeyCode::Char('M') if pressed => {
                        if let Some(session) = self.session.as_mut() {
                            session.audio_mut().toggle_mute();
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Pointer moves steer the paddle; a left click restarts a finished match.
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if self.screen != AppScreen::Game {
            return;
        }
        let Some(layout) = self.current_layout() else {
            return;
        };

        match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let Some(pointer) = pointer_to_field(
                    layout.field,
                    mouse_event.column,
                    mouse_event.row,
                    &self.config,
                ) else {
                    return;
                };
                self.pointer = pointer;
                if let Some(session) = self.session.as_mut() {
                    session.set_human_target(pointer.y);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.restart(),
            _ => {}
        }
    }

    /// Handle application events
    fn handle_app_event(&mut self, app_event: AppEvent) -> color_eyre::Result<()> {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::NavigateToStart => self.navigate_to_start(),
            AppEvent::NavigateToThemes => self.navigate_to_themes(),
            AppEvent::NavigateToGame => self.navigate_to_game()?,
            AppEvent::MenuUp => self.menu_move(false),
            AppEvent::MenuDown => self.menu_move(true),
            AppEvent::MenuSelect => self.menu_select(),
            AppEvent::TerminalResize(width, height) => self.handle_resize(width, height),
        }
        Ok(())
    }

    /// Advance the game by one tick
    fn tick(&mut self) {
        if self.screen != AppScreen::Game || self.ui_paused {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let entries: Vec<String> = match session.tick() {
            Ok(events) => events.iter().map(describe_event).collect(),
            Err(e) => vec![format!("tick rejected: {e}")],
        };
        if session.audio_mut().take_bell() {
            ring_bell();
        }
        for entry in entries {
            self.log(entry);
        }
    }

    fn restart(&mut self) {
        let restarted = self
            .session
            .as_mut()
            .map(|session| session.restart())
            .unwrap_or(false);
        if restarted {
            self.log("new match".to_string());
        }
    }

    fn nudge(&mut self, delta: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let current = session.game().human_target().unwrap_or_else(|| {
            session
                .snapshot()
                .player_paddle
                .center_y(session.config())
        });
        let target = nudge_target(current, delta, &self.config);
        session.set_human_target(target);
        self.pointer.y = target;
    }

    fn log(&mut self, entry: String) {
        if self.event_log.len() == EVENT_LOG_LEN {
            self.event_log.pop_front();
        }
        self.event_log.push_back(entry);
    }

    // Navigation methods
    fn quit(&mut self) {
        self.running = false;
    }

    fn navigate_to_start(&mut self) {
        self.screen = AppScreen::Start;
    }

    fn navigate_to_themes(&mut self) {
        self.screen = AppScreen::Themes;
    }

    fn navigate_to_game(&mut self) -> color_eyre::Result<()> {
        self.start_local_game()?;
        self.screen = AppScreen::Game;
        Ok(())
    }

    fn menu_move(&mut self, forward: bool) {
        match self.screen {
            AppScreen::Start => {
                let len = self.get_start_menu_items().len();
                self.menu_state.start_selected =
                    wrap_step(self.menu_state.start_selected, len, forward);
            }
            AppScreen::Themes => {
                let len = self.get_theme_menu_items().len();
                self.menu_state.theme_selected =
                    wrap_step(self.menu_state.theme_selected, len, forward);
            }
            AppScreen::Game => {}
        }
    }

    fn menu_select(&mut self) {
        match self.screen {
            AppScreen::Start => match self.menu_state.start_selected {
                0 => self.events.send(AppEvent::NavigateToThemes),
                _ => self.events.send(AppEvent::Quit),
            },
            AppScreen::Themes => {
                if self.menu_state.theme_selected < Theme::builtin_names().len() {
                    self.events.send(AppEvent::NavigateToGame);
                } else {
                    self.events.send(AppEvent::NavigateToStart);
                }
            }
            AppScreen::Game => {}
        }
    }

    // Terminal size management
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.ui_paused = width < MIN_GAME_WIDTH || height < MIN_GAME_HEIGHT;
    }

    /// Layout of the game view for the current terminal size
    pub fn current_layout(&self) -> Option<GameLayout> {
        if self.ui_paused {
            return None;
        }
        let (width, height) = self.terminal_size;
        let (_, content) = split_screen(Rect::new(0, 0, width, height));
        Some(game_layout(content, self.show_debug, &self.config))
    }

    fn start_local_game(&mut self) -> color_eyre::Result<()> {
        let name = Theme::builtin_names()
            .get(self.menu_state.theme_selected)
            .copied()
            .unwrap_or("dusk");
        self.theme = Theme::by_name(name)?;

        let game = Game::new(self.config)?;
        let audio = TerminalAudio::new(self.theme.sounds.clone());
        self.session = Some(Session::new(game, FrameBuffer::default(), audio));
        self.pointer = Vec2::zero();
        self.event_log.clear();
        Ok(())
    }

    // Helper methods for UI
    pub fn get_start_menu_items(&self) -> Vec<&str> {
        vec!["Play vs Computer", "Quit"]
    }

    pub fn get_theme_menu_items(&self) -> Vec<&str> {
        let mut items = Theme::builtin_names().to_vec();
        items.push("Back");
        items
    }
}

fn ring_bell() {
    let mut out = stdout();
    let _ = out.write_all(b"\x07").and_then(|_| out.flush());
}
