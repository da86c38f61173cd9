//! Headless harness that plays courtside_core with a scripted human.
//!
//! The scripted player chases the ball with a configurable lag, matches
//! restart automatically, and every event is printed as it happens.

use clap::Parser;
use color_eyre::eyre::WrapErr;
use courtside_core::theme::SoundCues;
use courtside_core::{
    AudioSink, Config, Event, Game, GameSnapshot, Renderer, Session, Side, Theme,
};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::collections::VecDeque;
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "courtside_harness", about = "Autoplay courtside matches headlessly")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// JSON file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in theme providing cue names and end-of-match text
    #[arg(long, default_value = "dusk")]
    theme: String,

    /// Ticks between the ball moving and the scripted player reacting
    #[arg(long, default_value_t = 4)]
    player_lag: usize,

    /// Distance the scripted player aims below the ball
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    player_offset: f32,

    /// Print only the summary
    #[arg(long)]
    quiet: bool,

    /// Sleep one tick period between ticks
    #[arg(long)]
    realtime: bool,
}

/// Human stand-in that aims at where the ball was `lag` ticks ago,
/// shifted by `offset`
struct ScriptedPlayer {
    lag: usize,
    offset: f32,
    seen: VecDeque<f32>,
}

impl ScriptedPlayer {
    fn new(lag: usize, offset: f32) -> Self {
        Self {
            lag,
            offset,
            seen: VecDeque::with_capacity(lag + 1),
        }
    }

    fn target(&mut self, ball_y: f32) -> f32 {
        self.seen.push_back(ball_y);
        if self.seen.len() > self.lag + 1 {
            self.seen.pop_front();
        }
        self.seen.front().copied().unwrap_or(ball_y) + self.offset
    }
}

/// Audio adapter that logs cue names
struct LogAudio {
    sounds: SoundCues,
    cues: u64,
    music_playing: bool,
}

impl LogAudio {
    fn new(sounds: SoundCues) -> Self {
        Self {
            sounds,
            cues: 0,
            music_playing: false,
        }
    }

    fn play(&mut self, cue: &str) {
        self.cues += 1;
        debug!("cue {}", cue);
    }
}

impl AudioSink for LogAudio {
    fn on_paddle_hit(&mut self) {
        let cue = self.sounds.paddle_hit.clone();
        self.play(&cue);
    }

    fn on_score(&mut self, scorer: Side) {
        let cue = self.sounds.for_score(scorer).to_string();
        self.play(&cue);
    }

    fn on_match_won(&mut self) {
        let cue = self.sounds.win.clone();
        self.play(&cue);
    }

    fn on_match_lost(&mut self) {
        let cue = self.sounds.lose.clone();
        self.play(&cue);
    }

    fn start_music(&mut self) {
        self.music_playing = true;
        debug!("music {}", self.sounds.music);
    }

    fn pause_music(&mut self) {
        self.music_playing = false;
    }

    fn resume_music(&mut self) {
        self.music_playing = true;
    }
}

/// Renderer that only keeps statistics
#[derive(Default)]
struct StatsRenderer {
    frames: u64,
    max_speed: f32,
}

impl Renderer for StatsRenderer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.frames += 1;
        let speed = snapshot.ball.vel.x.hypot(snapshot.ball.vel.y);
        if speed > self.max_speed {
            self.max_speed = speed;
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    ticks: u64,
    matches: u32,
    player_wins: u32,
    opponent_wins: u32,
    player_hits: u32,
    opponent_hits: u32,
    points: u32,
    cues: u64,
    frames: u64,
    max_speed: f32,
    interrupted: bool,
}

impl Summary {
    fn record(&mut self, event: &Event) {
        match *event {
            Event::PaddleHit { side: Side::Player } => self.player_hits += 1,
            Event::PaddleHit { side: Side::Opponent } => self.opponent_hits += 1,
            Event::Scored { .. } => self.points += 1,
            Event::MatchOver { winner } => {
                self.matches += 1;
                match winner {
                    Side::Player => self.player_wins += 1,
                    Side::Opponent => self.opponent_wins += 1,
                }
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> color_eyre::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config = Config::from_json(&text)
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn print_event(
    out: &mut impl Write,
    tick: u32,
    event: &Event,
    theme: &Theme,
) -> std::io::Result<()> {
    let (color, text) = match *event {
        Event::PaddleHit { side } => (Color::Cyan, format!("{:?} paddle hit", side)),
        Event::Scored { scorer, score } => (
            if scorer == Side::Player {
                Color::Green
            } else {
                Color::Red
            },
            format!(
                "{:?} scores, {} - {}",
                scorer, score.player, score.opponent
            ),
        ),
        Event::MatchOver { winner } => (
            Color::Yellow,
            format!("{} {}", theme.headline(winner), theme.message(winner)),
        ),
    };
    queue!(
        out,
        Print(format!("[tick {:>6}] ", tick)),
        SetForegroundColor(color),
        Print(text),
        ResetColor,
        Print("\n")
    )?;
    out.flush()
}

fn run(
    args: &Args,
    config: Config,
    theme: &Theme,
    running: &AtomicBool,
    out: &mut impl Write,
) -> color_eyre::Result<Summary> {
    let game = Game::new(config)?;
    let mut session = Session::new(
        game,
        StatsRenderer::default(),
        LogAudio::new(theme.sounds.clone()),
    );
    let mut player = ScriptedPlayer::new(args.player_lag, args.player_offset);
    let mut summary = Summary::default();
    let period = Duration::from_secs_f64(config.tick_period_secs());

    info!(
        "running {} ticks at {} Hz with theme {}",
        args.ticks, config.tick_hz, theme.name
    );

    for _ in 0..args.ticks {
        if !running.load(Ordering::SeqCst) {
            info!("interrupted after {} ticks", summary.ticks);
            summary.interrupted = true;
            break;
        }

        let ball_y = session.snapshot().ball.pos.y;
        session.set_human_target(player.target(ball_y));
        let events = session.tick().wrap_err("simulation step failed")?;
        summary.ticks += 1;

        let tick = session.snapshot().tick;
        for event in &events {
            summary.record(event);
            if !args.quiet {
                print_event(out, tick, event, theme)?;
            }
        }

        if !session.game().is_active() && session.restart() {
            info!("match {} finished, restarting", summary.matches);
        }

        if args.realtime {
            std::thread::sleep(period);
        }
    }

    debug!("music playing at exit: {}", session.audio().music_playing);
    summary.cues = session.audio().cues;
    summary.frames = session.renderer().frames;
    summary.max_speed = session.renderer().max_speed;
    Ok(summary)
}

fn print_summary(out: &mut impl Write, summary: &Summary) -> std::io::Result<()> {
    let lines = [
        format!("ticks:          {} ({} frames)", summary.ticks, summary.frames),
        format!(
            "matches:        {} (player {}, computer {})",
            summary.matches, summary.player_wins, summary.opponent_wins
        ),
        format!(
            "paddle hits:    player {}, computer {}",
            summary.player_hits, summary.opponent_hits
        ),
        format!("points:         {}", summary.points),
        format!("audio cues:     {}", summary.cues),
        format!("max ball speed: {:.1}", summary.max_speed),
    ];

    queue!(out, SetForegroundColor(Color::Cyan), Print("--- SUMMARY ---\n"), ResetColor)?;
    for line in lines {
        queue!(out, Print(line), Print("\n"))?;
    }
    if summary.interrupted {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print("(interrupted)\n"),
            ResetColor
        )?;
    }
    out.flush()
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let theme = Theme::by_name(&args.theme)?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .wrap_err("failed to install Ctrl-C handler")?;

    let mut out = stdout();
    let summary = run(&args, config, &theme, &running, &mut out)?;
    print_summary(&mut out, &summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["courtside_harness"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_args_defaults() {
        let args = args(&[]);
        assert_eq!(args.ticks, 3000);
        assert_eq!(args.theme, "dusk");
        assert_eq!(args.player_lag, 4);
        assert!(args.config.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_scripted_player_lags() {
        let mut player = ScriptedPlayer::new(2, 0.0);
        assert_eq!(player.target(10.0), 10.0);
        assert_eq!(player.target(20.0), 10.0);
        assert_eq!(player.target(30.0), 10.0);
        assert_eq!(player.target(40.0), 20.0);

        let mut instant = ScriptedPlayer::new(0, 5.0);
        assert_eq!(instant.target(10.0), 15.0);
        assert_eq!(instant.target(20.0), 25.0);
    }

    #[test]
    fn test_summary_counts_events() {
        let mut summary = Summary::default();
        summary.record(&Event::PaddleHit { side: Side::Player });
        summary.record(&Event::PaddleHit { side: Side::Opponent });
        summary.record(&Event::Scored {
            scorer: Side::Opponent,
            score: courtside_core::Score::new(0, 3),
        });
        summary.record(&Event::MatchOver {
            winner: Side::Opponent,
        });

        assert_eq!(summary.player_hits, 1);
        assert_eq!(summary.opponent_hits, 1);
        assert_eq!(summary.points, 1);
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.opponent_wins, 1);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert_eq!(load_config(None).unwrap(), Config::default());
        assert!(load_config(Some(Path::new("/nonexistent/courtside.json"))).is_err());
    }

    #[test]
    fn test_run_plays_and_restarts_matches() {
        // Aiming two paddle halves below the ball never connects
        let args = args(&["--ticks", "2000", "--player-lag", "0", "--player-offset", "200"]);
        let running = AtomicBool::new(true);
        let mut out = Vec::new();

        let summary = run(&args, Config::default(), &Theme::dusk(), &running, &mut out).unwrap();

        assert_eq!(summary.ticks, 2000);
        assert!(summary.matches >= 1);
        assert_eq!(summary.player_hits, 0);
        assert_eq!(summary.matches, summary.player_wins + summary.opponent_wins);
        assert_eq!(summary.frames, 2000);
        assert!(summary.points >= 3 * summary.matches);
        assert!(summary.max_speed >= Config::default().ball_start_speed.x.hypot(12.0));

        let printed = String::from_utf8_lossy(&out);
        assert!(printed.contains("scores"));
    }

    #[test]
    fn test_interrupted_run_stops_early() {
        let args = args(&["--quiet"]);
        let running = AtomicBool::new(false);
        let mut out = Vec::new();

        let summary = run(&args, Config::default(), &Theme::classic(), &running, &mut out).unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.ticks, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_output() {
        let summary = Summary {
            ticks: 10,
            matches: 2,
            player_wins: 1,
            opponent_wins: 1,
            max_speed: 17.0,
            ..Summary::default()
        };
        let mut out = Vec::new();
        print_summary(&mut out, &summary).unwrap();

        let printed = String::from_utf8_lossy(&out);
        assert!(printed.contains("matches:        2 (player 1, computer 1)"));
        assert!(printed.contains("max ball speed: 17.0"));
        assert!(!printed.contains("interrupted"));
    }
}
