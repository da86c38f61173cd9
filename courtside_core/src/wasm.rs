//! WASM bridge module for a browser canvas front end.
//!
//! JavaScript owns the timer, the canvas and the `Audio` elements. It calls
//! `step` once per tick, draws from `snapshot_json`, and plays whatever
//! `drain_cues` returns.

use log::warn;
use wasm_bindgen::prelude::*;

use crate::session::{AudioSink, NullRenderer, Session};
use crate::{Config, Game, Side, Theme};

/// Audio adapter that queues sound asset names for JavaScript to play
struct CueQueue {
    sounds: crate::theme::SoundCues,
    pending: Vec<String>,
    music_playing: bool,
}

impl AudioSink for CueQueue {
    fn on_paddle_hit(&mut self) {
        self.pending.push(self.sounds.paddle_hit.clone());
    }

    fn on_score(&mut self, scorer: Side) {
        self.pending.push(self.sounds.for_score(scorer).to_string());
    }

    fn on_match_won(&mut self) {
        self.pending.push(self.sounds.win.clone());
    }

    fn on_match_lost(&mut self) {
        self.pending.push(self.sounds.lose.clone());
    }

    fn start_music(&mut self) {
        self.music_playing = true;
    }

    fn pause_music(&mut self) {
        self.music_playing = false;
    }

    fn resume_music(&mut self) {
        self.music_playing = true;
    }
}

/// WASM-compatible wrapper around a game session
#[wasm_bindgen]
pub struct WasmGame {
    session: Session<NullRenderer, CueQueue>,
    theme: Theme,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game from a JSON configuration and a built-in theme name.
    /// Empty or unparsable JSON falls back to the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: String, theme_name: String) -> Result<WasmGame, JsValue> {
        let config = if config_json.trim().is_empty() {
            Config::default()
        } else {
            match Config::from_json(&config_json) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config JSON, using defaults: {}", e);
                    Config::default()
                }
            }
        };

        let theme = Theme::by_name(&theme_name).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Game::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let audio = CueQueue {
            sounds: theme.sounds.clone(),
            pending: Vec::new(),
            music_playing: false,
        };

        Ok(WasmGame {
            session: Session::new(game, NullRenderer, audio),
            theme,
        })
    }

    /// Pointer moved to field y `y`
    pub fn set_human_target(&mut self, y: f32) {
        self.session.set_human_target(y);
    }

    /// Pointer pressed; returns whether a new match started
    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    /// Step the game forward one tick.
    /// Returns the tick's events as a JSON array.
    pub fn step(&mut self) -> Result<String, JsValue> {
        let events = self
            .session
            .tick()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the current snapshot as a JSON string
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.session.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize snapshot: {}", e);
                "{}".to_string()
            }
        }
    }

    /// Get the active theme as a JSON string
    pub fn theme_json(&self) -> String {
        serde_json::to_string(&self.theme).unwrap_or_else(|_| "{}".to_string())
    }

    /// Sound asset names queued since the last call, as a JSON array
    pub fn drain_cues(&mut self) -> String {
        let cues = std::mem::take(&mut self.session.audio_mut().pending);
        serde_json::to_string(&cues).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether the background track should be playing
    pub fn music_playing(&self) -> bool {
        self.session.audio().music_playing
    }

    /// Sound asset for the looping background track
    pub fn music_track(&self) -> String {
        self.theme.sounds.music.clone()
    }

    /// Get the current tick number
    pub fn get_tick(&self) -> u32 {
        self.session.snapshot().tick
    }

    /// Check if the ball is in play
    pub fn is_active(&self) -> bool {
        self.session.game().is_active()
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> String {
        self.session.game().status_string().to_string()
    }

    /// Milliseconds between ticks
    pub fn tick_interval_ms(&self) -> f64 {
        self.session.config().tick_period_secs() * 1000.0
    }
}

/// Create a default config as JSON string (utility for JavaScript)
#[wasm_bindgen]
pub fn default_config_json() -> String {
    let config = Config::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => json,
        Err(_) => "{}".to_string(),
    }
}

/// Initialize WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
