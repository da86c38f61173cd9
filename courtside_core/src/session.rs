//! Adapter seams and the tick-driven session that feeds them.
//!
//! A [`Session`] owns the [`Game`] and is the only writer of its state. Each
//! call to [`Session::tick`] runs one simulation step, forwards the events to
//! the [`AudioSink`] and hands a snapshot to the [`Renderer`]. Timing lives in
//! the caller: the terminal client drives it from its event thread, the
//! harness from a plain loop.

use log::info;

use crate::error::Result;
use crate::game::Game;
use crate::types::*;

/// Consumes one snapshot per tick
pub trait Renderer {
    fn render(&mut self, snapshot: &GameSnapshot);
}

/// Sound triggers. Every method defaults to a no-op so an adapter only
/// implements the cues it can play; the simulation never depends on them.
pub trait AudioSink {
    fn on_paddle_hit(&mut self) {}
    fn on_score(&mut self, _scorer: Side) {}
    fn on_match_won(&mut self) {}
    fn on_match_lost(&mut self) {}
    /// Start the looping background track
    fn start_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &GameSnapshot) {}
}

/// Audio adapter that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {}

/// Makes sure the win and lose cues play at most once per match
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EndCueLatch {
    pub win_played: bool,
    pub lose_played: bool,
}

impl EndCueLatch {
    /// Mark the cue for `winner` as played. Returns false if it already was.
    pub fn arm(&mut self, winner: Side) -> bool {
        let played = match winner {
            Side::Player => &mut self.win_played,
            Side::Opponent => &mut self.lose_played,
        };
        !std::mem::replace(played, true)
    }

    pub fn clear(&mut self) {
        *self = EndCueLatch::default();
    }
}

/// One running game wired to its render and audio adapters
pub struct Session<R: Renderer, A: AudioSink> {
    game: Game,
    renderer: R,
    audio: A,
    end_cues: EndCueLatch,
}

impl<R: Renderer, A: AudioSink> Session<R, A> {
    /// Wrap `game` and start the background track.
    pub fn new(game: Game, renderer: R, mut audio: A) -> Self {
        audio.start_music();
        Session {
            game,
            renderer,
            audio,
            end_cues: EndCueLatch::default(),
        }
    }

    /// Pointer moved. Last value before the next tick wins.
    pub fn set_human_target(&mut self, y: f32) {
        self.game.set_human_target(y);
    }

    /// Pointer pressed. Starts a new match if the current one is over.
    pub fn restart(&mut self) -> bool {
        if !self.game.restart() {
            return false;
        }
        self.end_cues.clear();
        self.audio.resume_music();
        true
    }

    /// Run one simulation step, then notify audio and render.
    ///
    /// A rejected step renders nothing and returns the error; the state is
    /// unchanged so the caller may keep ticking once the input is fixed.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        let events = self.game.step()?;
        self.dispatch(&events);
        let snapshot = self.game.snapshot();
        self.renderer.render(&snapshot);
        Ok(events)
    }

    fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::PaddleHit { .. } => self.audio.on_paddle_hit(),
                Event::Scored { scorer, .. } => self.audio.on_score(scorer),
                Event::MatchOver { winner } => {
                    self.audio.pause_music();
                    if self.end_cues.arm(winner) {
                        match winner {
                            Side::Player => self.audio.on_match_won(),
                            Side::Opponent => self.audio.on_match_lost(),
                        }
                    } else {
                        info!("end-of-match cue for {:?} already played", winner);
                    }
                }
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &Config {
        &self.game.config
    }

    pub fn end_cues(&self) -> EndCueLatch {
        self.end_cues
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingAudio {
        hits: u32,
        scores: Vec<Side>,
        won: u32,
        lost: u32,
        music_on: bool,
    }

    impl AudioSink for CountingAudio {
        fn on_paddle_hit(&mut self) {
            self.hits += 1;
        }
        fn on_score(&mut self, scorer: Side) {
            self.scores.push(scorer);
        }
        fn on_match_won(&mut self) {
            self.won += 1;
        }
        fn on_match_lost(&mut self) {
            self.lost += 1;
        }
        fn start_music(&mut self) {
            self.music_on = true;
        }
        fn pause_music(&mut self) {
            self.music_on = false;
        }
        fn resume_music(&mut self) {
            self.music_on = true;
        }
    }

    #[derive(Default)]
    struct FrameCounter {
        frames: u32,
        last: Option<GameSnapshot>,
    }

    impl Renderer for FrameCounter {
        fn render(&mut self, snapshot: &GameSnapshot) {
            self.frames += 1;
            self.last = Some(*snapshot);
        }
    }

    fn session() -> Session<FrameCounter, CountingAudio> {
        let game = Game::new(Config::default()).unwrap();
        Session::new(game, FrameCounter::default(), CountingAudio::default())
    }

    #[test]
    fn test_latch_arms_once_per_side() {
        let mut latch = EndCueLatch::default();
        assert!(latch.arm(Side::Player));
        assert!(!latch.arm(Side::Player));
        assert!(latch.arm(Side::Opponent));

        latch.clear();
        assert_eq!(latch, EndCueLatch::default());
    }

    #[test]
    fn test_music_starts_with_session() {
        let session = session();
        assert!(session.audio().music_on);
    }

    #[test]
    fn test_every_tick_renders() {
        let mut session = session();
        for _ in 0..3 {
            session.tick().unwrap();
        }
        assert_eq!(session.renderer().frames, 3);
        assert_eq!(session.renderer().last, Some(session.snapshot()));
    }

    #[test]
    fn test_losing_match_plays_lose_cue_and_pauses_music() {
        let mut session = session();
        session.game.state.match_state.score = Score::new(0, 2);
        session.game.state.ball = Ball::new(Vec2::new(5.0, 10.0), Vec2::new(-10.0, 0.0));

        session.tick().unwrap();

        let audio = session.audio();
        assert_eq!(audio.scores, vec![Side::Opponent]);
        assert_eq!(audio.lost, 1);
        assert_eq!(audio.won, 0);
        assert!(!audio.music_on);
        assert!(session.end_cues().lose_played);

        // Frozen world: no more cues
        session.tick().unwrap();
        assert_eq!(session.audio().lost, 1);
    }

    #[test]
    fn test_restart_clears_latch_and_resumes_music() {
        let mut session = session();
        assert!(!session.restart());

        session.game.state.match_state.score = Score::new(2, 0);
        session.game.state.opponent.top_y = 0.0;
        session.game.state.ball = Ball::new(Vec2::new(795.0, 400.0), Vec2::new(10.0, 0.0));
        session.tick().unwrap();
        assert_eq!(session.audio().won, 1);

        assert!(session.restart());
        assert_eq!(session.end_cues(), EndCueLatch::default());
        assert!(session.audio().music_on);
        assert_eq!(session.snapshot().score, Score::new(0, 0));
    }

    #[test]
    fn test_null_adapters_are_enough() {
        let game = Game::new(Config::default()).unwrap();
        let mut session = Session::new(game, NullRenderer, NullAudio);
        for _ in 0..100 {
            session.tick().unwrap();
        }
        assert_eq!(session.snapshot().tick, 100);
    }
}
