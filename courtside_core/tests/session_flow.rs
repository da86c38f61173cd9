use courtside_core::*;

#[derive(Default)]
struct RecordingAudio {
    cues: Vec<&'static str>,
    music_on: bool,
}

impl AudioSink for RecordingAudio {
    fn on_paddle_hit(&mut self) {
        self.cues.push("hit");
    }
    fn on_score(&mut self, scorer: Side) {
        self.cues.push(match scorer {
            Side::Player => "player-score",
            Side::Opponent => "opponent-score",
        });
    }
    fn on_match_won(&mut self) {
        self.cues.push("won");
    }
    fn on_match_lost(&mut self) {
        self.cues.push("lost");
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
struct RecordingRenderer {
    frames: Vec<GameSnapshot>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.frames.push(*snapshot);
    }
}

fn play_until_over(session: &mut Session<RecordingRenderer, RecordingAudio>) -> Side {
    for _ in 0..100_000 {
        session.tick().unwrap();
        if let Some(winner) = session.snapshot().winner() {
            return winner;
        }
    }
    panic!("match did not finish");
}

#[test]
fn test_full_match_with_absent_player() {
    let game = Game::new(Config::default()).unwrap();
    let mut session = Session::new(game, RecordingRenderer::default(), RecordingAudio::default());

    // Paddle parked far above the field
    session.set_human_target(-1000.0);
    let winner = play_until_over(&mut session);

    let audio = session.audio();
    let score = session.snapshot().score;
    assert_eq!(score.get(winner), 3);
    assert!(score.get(winner.opposite()) < 3);
    assert!(!audio.music_on);

    let end_cue = match winner {
        Side::Player => "won",
        Side::Opponent => "lost",
    };
    assert_eq!(audio.cues.last(), Some(&end_cue));
    assert_eq!(audio.cues.iter().filter(|c| **c == end_cue).count(), 1);

    let scores = audio
        .cues
        .iter()
        .filter(|c| c.ends_with("-score"))
        .count() as u32;
    assert_eq!(scores, score.player + score.opponent);

    // One frame per tick, the last one showing the end of the match
    let frames = &session.renderer().frames;
    assert_eq!(frames.last().map(|f| f.phase), Some(Phase::MatchOver(winner)));
}

#[test]
fn test_frozen_until_restart_then_new_match() {
    let game = Game::new(Config::default()).unwrap();
    let mut session = Session::new(game, RecordingRenderer::default(), RecordingAudio::default());
    session.set_human_target(-1000.0);
    play_until_over(&mut session);

    let frozen = session.snapshot();
    let cues = session.audio().cues.len();
    for _ in 0..30 {
        assert!(session.tick().unwrap().is_empty());
    }
    assert_eq!(session.snapshot(), frozen);
    assert_eq!(session.audio().cues.len(), cues);

    assert!(session.restart());
    assert!(!session.restart());
    assert!(session.audio().music_on);

    let fresh = session.snapshot();
    assert_eq!(fresh.phase, Phase::Playing);
    assert_eq!(fresh.score, Score::new(0, 0));
    assert_eq!(fresh.ball.vel, Config::default().ball_start_speed);
    assert_eq!(fresh.ball.pos, frozen.ball.pos);

    // A second match plays its end cue again
    let winner = play_until_over(&mut session);
    let end_cue = match winner {
        Side::Player => "won",
        Side::Opponent => "lost",
    };
    assert_eq!(session.audio().cues.last(), Some(&end_cue));
}

#[test]
fn test_last_pointer_position_wins() {
    let game = Game::new(Config::default()).unwrap();
    let mut session = Session::new(game, RecordingRenderer::default(), RecordingAudio::default());

    session.set_human_target(100.0);
    session.set_human_target(420.0);
    session.set_human_target(310.0);
    session.tick().unwrap();

    assert_eq!(session.snapshot().player_paddle.top_y, 260.0);
}

#[test]
fn test_bad_pointer_value_is_reported_and_skipped() {
    let game = Game::new(Config::default()).unwrap();
    let mut session = Session::new(game, RecordingRenderer::default(), RecordingAudio::default());

    session.tick().unwrap();
    session.set_human_target(f32::INFINITY);
    let err = session.tick().unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(session.renderer().frames.len(), 1);

    session.set_human_target(300.0);
    session.tick().unwrap();
    assert_eq!(session.snapshot().tick, 2);
}
