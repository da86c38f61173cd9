//! Terminal stand-in for the game's sound effects.
//!
//! A terminal cannot play the themed audio files, so paddle hits ring the
//! bell and every other cue is shown by name in the HUD.

use courtside_core::theme::SoundCues;
use courtside_core::{AudioSink, Side};

pub struct TerminalAudio {
    sounds: SoundCues,
    last_cue: Option<String>,
    music_playing: bool,
    bell_pending: bool,
    muted: bool,
}

impl TerminalAudio {
    pub fn new(sounds: SoundCues) -> Self {
        Self {
            sounds,
            last_cue: None,
            music_playing: false,
            bell_pending: false,
            muted: false,
        }
    }

    /// Name of the most recent cue
    pub fn last_cue(&self) -> Option<&str> {
        self.last_cue.as_deref()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn music_track(&self) -> &str {
        &self.sounds.music
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.bell_pending = false;
    }

    /// Whether the bell should ring now. Clears the request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    fn cue(&mut self, name: String) {
        self.last_cue = Some(name);
    }
}

impl AudioSink for TerminalAudio {
    fn on_paddle_hit(&mut self) {
        self.bell_pending = !self.muted;
        self.cue(self.sounds.paddle_hit.clone());
    }

    fn on_score(&mut self, scorer: Side) {
        self.cue(self.sounds.for_score(scorer).to_string());
    }

    fn on_match_won(&mut self) {
        self.cue(self.sounds.win.clone());
    }

    fn on_match_lost(&mut self) {
        self.cue(self.sounds.lose.clone());
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
