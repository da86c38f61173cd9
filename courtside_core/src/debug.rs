//! Fixed-width debug readout of ball, pointer and paddle numbers.

use crate::types::*;

/// Right-align `value` in five columns, keeping only the last five
/// characters when it is longer.
pub fn align_right(value: &str) -> String {
    let padded = format!("{value:>5}");
    let skip = padded.chars().count().saturating_sub(5);
    padded.chars().skip(skip).collect()
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DebugReadout {
    pub ball_vel: Vec2,
    pub ball_pos: Vec2,
    pub pointer: Vec2,
    pub player_top: f32,
    pub opponent_top: f32,
}

impl DebugReadout {
    pub fn new(snapshot: &GameSnapshot, pointer: Vec2) -> Self {
        DebugReadout {
            ball_vel: snapshot.ball.vel,
            ball_pos: snapshot.ball.pos,
            pointer,
            player_top: snapshot.player_paddle.top_y,
            opponent_top: snapshot.opponent_paddle.top_y,
        }
    }

    pub fn lines(&self) -> [String; 5] {
        [
            format!(
                "ballSpeedX:{}    ballSpeedY:{}",
                align_right(&format!("{:.1}", self.ball_vel.x)),
                align_right(&format!("{:.1}", self.ball_vel.y)),
            ),
            format!(
                "     ballX:{}         ballY:{}",
                align_right(&format!("{:.0}", self.ball_pos.x)),
                align_right(&format!("{:.0}", self.ball_pos.y)),
            ),
            format!(
                "mousePos.x:{}    mousePos.y:{}",
                align_right(&format!("{:.0}", self.pointer.x)),
                align_right(&format!("{:.0}", self.pointer.y)),
            ),
            format!(
                "                 playerPaddleY:{}",
                align_right(&format!("{:.0}", self.player_top))
            ),
            format!(
                "               computerPaddleY:{}",
                align_right(&format!("{:.0}", self.opponent_top))
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_right() {
        assert_eq!(align_right("12.0"), " 12.0");
        assert_eq!(align_right(""), "     ");
        assert_eq!(align_right("12345"), "12345");
        assert_eq!(align_right("-123.5"), "123.5");
    }

    #[test]
    fn test_lines_are_fixed_width() {
        let snapshot = GameSnapshot {
            tick: 7,
            ball: Ball::new(Vec2::new(400.0, 300.0), Vec2::new(-13.0, 2.46)),
            player_paddle: Paddle::new(150.0),
            opponent_paddle: Paddle::new(-8.0),
            score: Score::default(),
            phase: Phase::Playing,
        };
        let lines = DebugReadout::new(&snapshot, Vec2::new(12.0, 200.0)).lines();

        assert_eq!(lines[0], "ballSpeedX:-13.0    ballSpeedY:  2.5");
        assert_eq!(lines[1], "     ballX:  400         ballY:  300");
        assert_eq!(lines[2], "mousePos.x:   12    mousePos.y:  200");
        assert_eq!(lines[3], "                 playerPaddleY:  150");
        assert_eq!(lines[4], "               computerPaddleY:   -8");
    }
}
