use color_eyre::eyre::WrapErr;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement},
};
use std::{
    io::stdout,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Emitted once per simulation tick
    Tick,
    /// Crossterm events (keyboard, mouse, etc.)
    Crossterm(CrosstermEvent),
    /// Application events
    App(AppEvent),
}

/// Application events for navigation and game control
#[derive(Clone, Debug)]
pub enum AppEvent {
    Quit,
    NavigateToStart,
    NavigateToThemes,
    NavigateToGame,
    MenuUp,
    MenuDown,
    MenuSelect,
    /// Terminal resize event
    TerminalResize(u16, u16), // width, height
}

/// Terminal event handler with mouse capture and enhanced keyboard support
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
}

impl EventHandler {
    /// Start the event thread, emitting `Tick` at `tick_hz`.
    pub fn new(tick_hz: u16) -> color_eyre::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));

        enable_raw_mode()?;
        if keyboard_enhanced {
            queue!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        execute!(stdout(), EnableMouseCapture).wrap_err("failed to enable mouse capture")?;

        let actor = EventThread::new(sender.clone(), tick_interval(tick_hz));
        thread::spawn(move || {
            if let Err(e) = actor.run() {
                eprintln!("Event thread error: {e}");
            }
        });

        Ok(Self {
            sender,
            receiver,
            keyboard_enhanced,
        })
    }

    /// Receives an event from the sender (blocking)
    pub fn next(&self) -> color_eyre::Result<Event> {
        Ok(self.receiver.recv()?)
    }

    /// Queue an app event
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
        if self.keyboard_enhanced {
            let _ = queue!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
    }
}

fn tick_interval(tick_hz: u16) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(tick_hz.max(1)))
}

/// A thread that handles reading crossterm events and emitting tick events
struct EventThread {
    sender: mpsc::Sender<Event>,
    tick_interval: Duration,
}

impl EventThread {
    fn new(sender: mpsc::Sender<Event>, tick_interval: Duration) -> Self {
        Self {
            sender,
            tick_interval,
        }
    }

    fn run(self) -> color_eyre::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            if timeout == Duration::ZERO {
                last_tick = Instant::now();
                if !self.send(Event::Tick) {
                    return Ok(());
                }
            }

            if event::poll(timeout).wrap_err("failed to poll for crossterm events")? {
                let event = event::read().wrap_err("failed to read crossterm event")?;
                let sent = match event {
                    CrosstermEvent::Resize(width, height) => {
                        self.send(Event::App(AppEvent::TerminalResize(width, height)))
                    }
                    _ => self.send(Event::Crossterm(event)),
                };
                if !sent {
                    return Ok(());
                }
            }
        }
    }

    /// False once the receiving side has gone away
    fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}
