//! Main game logic and state management.

use log::{debug, info, warn};

use crate::error::{Result, SimError};
use crate::match_state::MatchState;
use crate::opponent;
use crate::physics::Physics;
use crate::types::*;

/// Everything that changes from tick to tick, as one owned value
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimulationState {
    pub tick: Tick,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub match_state: MatchState,
}

impl SimulationState {
    /// Initial state: ball at its start position and speed, both paddles at
    /// their start height, score 0-0.
    pub fn new(config: &Config) -> Self {
        SimulationState {
            tick: 0,
            ball: Ball::new(config.ball_start, config.ball_start_speed),
            player: Paddle::new(config.paddle_start_y),
            opponent: Paddle::new(config.paddle_start_y),
            match_state: MatchState::new(),
        }
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.tick,
            ball: self.ball,
            player_paddle: self.player,
            opponent_paddle: self.opponent,
            score: self.match_state.score,
            phase: self.match_state.phase,
        }
    }

    /// Fail on the first non-finite number in the state.
    pub fn check_finite(&self) -> Result<()> {
        let fields = [
            ("ball.pos.x", self.ball.pos.x),
            ("ball.pos.y", self.ball.pos.y),
            ("ball.vel.x", self.ball.vel.x),
            ("ball.vel.y", self.ball.vel.y),
            ("player.top_y", self.player.top_y),
            ("opponent.top_y", self.opponent.top_y),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, value)) => Err(SimError::InvalidState { field, value }),
            None => Ok(()),
        }
    }
}

/// Advance `state` by one tick.
///
/// Order within a tick: human target, opponent paddle, ball motion, player
/// side, opponent side, top/bottom walls. Both sides are checked every tick,
/// so a degenerate field can produce events from both. While the match is
/// over the state comes back untouched.
pub fn step(
    config: &Config,
    state: SimulationState,
    input: &TickInput,
) -> Result<(SimulationState, Vec<Event>)> {
    if state.match_state.is_over() {
        return Ok((state, Vec::new()));
    }

    let mut next = state;

    if let Some(target) = input.human_target {
        if !target.is_finite() {
            return Err(SimError::InvalidState {
                field: "human_target",
                value: target,
            });
        }
        next.player.top_y = target - config.paddle_height / 2.0;
    }
    next.check_finite()?;

    next.opponent = opponent::track_ball(next.opponent, next.ball.pos.y, config);

    Physics::advance_ball(&mut next.ball);

    let mut events = Vec::with_capacity(2);
    resolve_side(config, &mut next, Side::Player, &mut events);
    resolve_side(config, &mut next, Side::Opponent, &mut events);

    if Physics::ball_hit_vertical_bound(&next.ball, config) {
        Physics::reflect_vertical(&mut next.ball);
    }

    next.check_finite()?;
    next.tick = next.tick.wrapping_add(1);
    Ok((next, events))
}

/// Paddle contact or a point for the other side, once the ball is in
/// `side`'s band.
fn resolve_side(
    config: &Config,
    state: &mut SimulationState,
    side: Side,
    events: &mut Vec<Event>,
) {
    if !Physics::ball_in_band(&state.ball, side, config) {
        return;
    }

    let paddle = state.paddle(side);
    if Physics::paddle_intersects_ball(&paddle, &state.ball, config) {
        Physics::deflect(&mut state.ball, &paddle, config);
        debug!(
            "tick {}: {:?} paddle hit, ball vel ({:.1}, {:.1})",
            state.tick, side, state.ball.vel.x, state.ball.vel.y
        );
        events.push(Event::PaddleHit { side });
    } else if Physics::ball_past_edge(&state.ball, side, config) {
        let scorer = side.opposite();
        let winner = state
            .match_state
            .record_point(scorer, config.winning_score);
        let score = state.match_state.score;

        debug!(
            "tick {}: {:?} scored, {}-{}",
            state.tick, scorer, score.player, score.opponent
        );
        events.push(Event::Scored { scorer, score });

        if let Some(winner) = winner {
            info!(
                "match over at tick {}: {:?} wins {}-{}",
                state.tick, winner, score.player, score.opponent
            );
            events.push(Event::MatchOver { winner });
        }

        Physics::recenter_ball(&mut state.ball, config);
    }
}

/// Game state plus the latest human input
pub struct Game {
    pub config: Config,
    pub state: SimulationState,
    human_target: Option<f32>,
}

impl Game {
    /// Create a new game with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Game {
            config,
            state: SimulationState::new(&config),
            human_target: None,
        })
    }

    /// Record where the pointer is. Only the last value before a tick counts.
    pub fn set_human_target(&mut self, y: f32) {
        self.human_target = Some(y);
    }

    pub fn human_target(&self) -> Option<f32> {
        self.human_target
    }

    /// Step the game simulation forward by one tick.
    ///
    /// On error the state is left as it was before the call.
    pub fn step(&mut self) -> Result<Vec<Event>> {
        let input = TickInput::new(self.human_target);
        match step(&self.config, self.state, &input) {
            Ok((next, events)) => {
                self.state = next;
                Ok(events)
            }
            Err(err) => {
                warn!("tick {} rejected: {}", self.state.tick, err);
                Err(err)
            }
        }
    }

    /// Start a new match after `MatchOver`. Scores go back to 0-0 and the
    /// ball velocity to the configured start speed; the ball keeps its
    /// position. Ignored while playing.
    pub fn restart(&mut self) -> bool {
        if !self.state.match_state.restart() {
            return false;
        }
        self.state.ball.vel = self.config.ball_start_speed;
        info!("match restarted at tick {}", self.state.tick);
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.match_state.phase
    }

    pub fn score(&self) -> Score {
        self.state.match_state.score
    }

    /// Get the current winner (if the match is over)
    pub fn winner(&self) -> Option<Side> {
        self.state.match_state.winner()
    }

    /// Is the ball in play?
    pub fn is_active(&self) -> bool {
        matches!(self.phase(), Phase::Playing)
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> &'static str {
        match self.phase() {
            Phase::Playing => "Playing",
            Phase::MatchOver(Side::Player) => "Player won",
            Phase::MatchOver(Side::Opponent) => "Computer won",
        }
    }
}
