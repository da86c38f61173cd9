//! Core types and constants for the fixed-tick paddle game.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Tick counter type
pub type Tick = u32;

/// Which paddle a value belongs to.
///
/// The player paddle sits on the left edge and follows the pointer, the
/// opponent paddle sits on the right edge and tracks the ball.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// 2D vector in field units (pixels of the logical field)
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Game configuration.
///
/// All values are in field units and are fixed for the lifetime of a game.
/// The defaults reproduce the classic 800×600 canvas layout.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Field width
    pub field_width: f32,
    /// Field height
    pub field_height: f32,
    /// Paddle thickness along x
    pub paddle_width: f32,
    /// Paddle length along y
    pub paddle_height: f32,
    /// Gap between a field edge and its paddle
    pub paddle_side_offset: f32,
    /// Top edge of both paddles at process start
    pub paddle_start_y: f32,
    /// Ball extent used by the band and wall checks
    pub ball_size: f32,
    /// Ball position at process start
    pub ball_start: Vec2,
    /// Ball velocity at process start and after a restart
    pub ball_start_speed: Vec2,
    /// Score to win
    pub winning_score: u32,
    /// Opponent paddle movement per tick
    pub opponent_step: f32,
    /// Opponent holds still while its centre is within this distance of the ball
    pub opponent_dead_zone: f32,
    /// Vertical velocity per unit of offset from the paddle centre after a hit
    pub deflection: f32,
    /// Tick frequency (Hz)
    pub tick_hz: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_width: 800.0,
            field_height: 600.0,
            paddle_width: 5.0,
            paddle_height: 100.0,
            paddle_side_offset: 20.0,
            paddle_start_y: 200.0,
            ball_size: 50.0,
            ball_start: Vec2::new(50.0, 50.0),
            ball_start_speed: Vec2::new(12.0, 12.0),
            winning_score: 3,
            opponent_step: 8.0,
            opponent_dead_zone: 35.0,
            deflection: 0.35,
            tick_hz: 30,
        }
    }
}

impl Config {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let finite = [
            ("paddle_side_offset", self.paddle_side_offset),
            ("paddle_start_y", self.paddle_start_y),
            ("opponent_step", self.opponent_step),
            ("opponent_dead_zone", self.opponent_dead_zone),
            ("deflection", self.deflection),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }

        if !self.ball_start.is_finite() {
            return Err(SimError::InvalidConfig {
                field: "ball_start",
                reason: "must be finite".to_string(),
            });
        }
        if !self.ball_start_speed.is_finite() {
            return Err(SimError::InvalidConfig {
                field: "ball_start_speed",
                reason: "must be finite".to_string(),
            });
        }
        if self.winning_score == 0 {
            return Err(SimError::InvalidConfig {
                field: "winning_score",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tick_hz == 0 {
            return Err(SimError::InvalidConfig {
                field: "tick_hz",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON configuration; missing keys keep
    /// their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Field centre, where the ball is placed after every point
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Tick period in seconds
    pub fn tick_period_secs(&self) -> f64 {
        1.0 / f64::from(self.tick_hz)
    }
}

/// Paddle state. Only the top edge moves; the rest comes from [`Config`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paddle {
    /// Y position of the top edge
    pub top_y: f32,
}

impl Paddle {
    pub fn new(top_y: f32) -> Self {
        Paddle { top_y }
    }

    pub fn center_y(&self, config: &Config) -> f32 {
        self.top_y + config.paddle_height / 2.0
    }
}

/// Ball state
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ball {
    /// Position
    pub pos: Vec2,
    /// Velocity, in field units per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Ball { pos, vel }
    }
}

/// Points for both sides
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new(player: u32, opponent: u32) -> Self {
        Score { player, opponent }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

/// Match phase
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Ball in play
    Playing,
    /// Someone reached the winning score; the world is frozen until restart
    MatchOver(Side),
}

/// Human input for one tick.
///
/// `human_target` is the pointer y the player paddle should be centred on;
/// `None` leaves the paddle where it is.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TickInput {
    pub human_target: Option<f32>,
}

impl TickInput {
    pub fn new(human_target: Option<f32>) -> Self {
        TickInput { human_target }
    }
}

/// Events that can occur during a tick, in the order they happened
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    /// The ball bounced off a paddle
    PaddleHit { side: Side },
    Scored {
        scorer: Side,
        score: Score, // Score after this point
    },
    /// The point just scored ended the match
    MatchOver { winner: Side },
}

/// Read-only projection of the simulation handed to adapters after a tick
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    pub tick: Tick,
    pub ball: Ball,
    pub player_paddle: Paddle,
    pub opponent_paddle: Paddle,
    pub score: Score,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn paddle(&self, side: Side) -> Paddle {
        match side {
            Side::Player => self.player_paddle,
            Side::Opponent => self.opponent_paddle,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::MatchOver(winner) => Some(winner),
            Phase::Playing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Player.opposite(), Side::Opponent);
        assert_eq!(Side::Opponent.opposite(), Side::Player);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.field_center(), Vec2::new(400.0, 300.0));
        assert_eq!(config.winning_score, 3);
        assert_eq!(config.tick_hz, 30);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = Config {
            field_width: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig {
                field: "field_width",
                ..
            })
        ));

        let config = Config {
            deflection: f32::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            winning_score: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            tick_hz: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_config_from_partial_json() {
        let config = Config::from_json(r#"{ "winning_score": 5, "opponent_step": 4.0 }"#).unwrap();
        assert_eq!(config.winning_score, 5);
        assert_eq!(config.opponent_step, 4.0);
        assert_eq!(config.field_width, 800.0);

        assert!(Config::from_json(r#"{ "tick_hz": 0 }"#).is_err());
        assert!(matches!(
            Config::from_json("not json"),
            Err(SimError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_score_increment() {
        let mut score = Score::default();
        score.increment(Side::Opponent);
        score.increment(Side::Opponent);
        score.increment(Side::Player);

        assert_eq!(score, Score::new(1, 2));
        assert_eq!(score.get(Side::Player), 1);
        assert_eq!(score.get(Side::Opponent), 2);
    }

    #[test]
    fn test_paddle_center() {
        let config = Config::default();
        let paddle = Paddle::new(200.0);
        assert_eq!(paddle.center_y(&config), 250.0);
    }

    #[test]
    fn test_snapshot_paddle_by_side() {
        let snapshot = GameSnapshot {
            tick: 3,
            ball: Ball::new(Vec2::new(400.0, 300.0), Vec2::new(12.0, 12.0)),
            player_paddle: Paddle::new(120.0),
            opponent_paddle: Paddle::new(340.0),
            score: Score::new(1, 2),
            phase: Phase::MatchOver(Side::Opponent),
        };

        assert_eq!(snapshot.paddle(Side::Player), Paddle::new(120.0));
        assert_eq!(snapshot.paddle(Side::Opponent), Paddle::new(340.0));
        assert_eq!(snapshot.winner(), Some(Side::Opponent));
    }
}
