//! Computer-controlled paddle.

use crate::types::*;

/// Discrete-step tracking rule for the opponent paddle.
///
/// If the paddle centre is more than the dead zone above the ball the paddle
/// moves down one step, more than the dead zone below it moves up one step,
/// otherwise it holds. The step never scales with distance and there is no
/// trajectory prediction.
pub fn track_ball(paddle: Paddle, ball_y: f32, config: &Config) -> Paddle {
    let center = paddle.center_y(config);

    let top_y = if center < ball_y - config.opponent_dead_zone {
        paddle.top_y + config.opponent_step
    } else if center > ball_y + config.opponent_dead_zone {
        paddle.top_y - config.opponent_step
    } else {
        paddle.top_y
    };

    Paddle::new(top_y)
}
