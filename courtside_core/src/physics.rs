//! Collision predicates and ball response rules.
//!
//! Everything here is axis-aligned and evaluated on the ball's position after
//! it has moved for the tick. There is no swept test, so a ball travelling
//! further than a band's depth in one tick can skip the paddle entirely.

use crate::types::*;

/// Collision and motion helpers for the simulation step
pub struct Physics;

impl Physics {
    /// Depth of the horizontal band next to each edge in which paddle
    /// contact is checked.
    pub fn band_depth(config: &Config) -> f32 {
        config.paddle_side_offset + config.paddle_width + config.ball_size
    }

    /// Has the ball reached the band on `side`?
    pub fn ball_in_band(ball: &Ball, side: Side, config: &Config) -> bool {
        let depth = Self::band_depth(config);
        match side {
            Side::Player => ball.pos.x < depth,
            Side::Opponent => ball.pos.x > config.field_width - depth,
        }
    }

    /// True iff the ball's vertical centre lies in `[top_y, top_y + height)`.
    pub fn paddle_intersects_ball(paddle: &Paddle, ball: &Ball, config: &Config) -> bool {
        ball.pos.y >= paddle.top_y && ball.pos.y < paddle.top_y + config.paddle_height
    }

    pub fn ball_past_left_edge(ball: &Ball) -> bool {
        ball.pos.x < 0.0
    }

    pub fn ball_past_right_edge(ball: &Ball, field_width: f32) -> bool {
        ball.pos.x > field_width
    }

    /// Has the ball fully left the field behind `side`'s paddle?
    pub fn ball_past_edge(ball: &Ball, side: Side, config: &Config) -> bool {
        match side {
            Side::Player => Self::ball_past_left_edge(ball),
            Side::Opponent => Self::ball_past_right_edge(ball, config.field_width),
        }
    }

    /// Wall check with a ball-size margin at both ends:
    /// `y > field_height - ball_size || y < ball_size`.
    pub fn ball_hit_vertical_bound(ball: &Ball, config: &Config) -> bool {
        ball.pos.y > config.field_height - config.ball_size || ball.pos.y < config.ball_size
    }

    /// One Euler step, no substeps.
    pub fn advance_ball(ball: &mut Ball) {
        ball.pos.x += ball.vel.x;
        ball.pos.y += ball.vel.y;
    }

    /// Bounce off a paddle.
    ///
    /// Horizontal speed is incremented before it is negated, so a ball
    /// arriving at the right paddle with `vx` leaves with `-(vx + 1)`.
    /// Vertical speed is replaced by the offset from the paddle centre
    /// scaled by `config.deflection`.
    pub fn deflect(ball: &mut Ball, paddle: &Paddle, config: &Config) {
        ball.vel.x = -(ball.vel.x + 1.0);

        let delta_y = ball.pos.y - paddle.center_y(config);
        ball.vel.y = delta_y * config.deflection;
    }

    pub fn reflect_vertical(ball: &mut Ball) {
        ball.vel.y = -ball.vel.y;
    }

    /// Put the ball back at the field centre heading the other way. Speed
    /// magnitude is carried over.
    pub fn recenter_ball(ball: &mut Ball, config: &Config) {
        ball.vel.x = -ball.vel.x;
        ball.pos = config.field_center();
    }
}
