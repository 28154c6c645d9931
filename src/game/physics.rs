use rand::Rng;
use tracing::debug;

use super::state::{
    Ball, GameState, Paddle, Score, Side, BALL_SPEED, COURT_HEIGHT, COURT_MARGIN, COURT_WIDTH,
};

pub const HIT_SPEEDUP: f32 = 1.05; // |vx| multiplier on each paddle hit
pub const HIT_ANGLE_FACTOR: f32 = 1.2; // vy = BALL_SPEED * offset * HIT_ANGLE_FACTOR

/// What happened during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub goal: Option<Side>,
}

/// Advance one frame. Nothing moves unless the game is running.
pub fn update<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> PhysicsEvents {
    if !state.is_running() {
        return PhysicsEvents::default();
    }

    move_paddle(&mut state.left_paddle);
    move_paddle(&mut state.right_paddle);

    let events = move_ball(
        &mut state.ball,
        &state.left_paddle,
        &state.right_paddle,
        &mut state.score,
        rng,
    );

    if let Some(side) = events.paddle_hit {
        debug!(
            "{} paddle hit, vx={:.2} vy={:.2}",
            side.label(),
            state.ball.vx,
            state.ball.vy
        );
    }
    if let Some(side) = events.goal {
        debug!(
            "{} scores, score now {}-{}",
            side.label(),
            state.score.left,
            state.score.right
        );
    }

    events
}

/// Apply the paddle's speed, then clamp it inside the court margins
pub fn move_paddle(paddle: &mut Paddle) {
    paddle.rect.y += paddle.speed;

    if paddle.rect.top() < COURT_MARGIN {
        paddle.rect.set_top(COURT_MARGIN);
    }
    if paddle.rect.bottom() > COURT_HEIGHT - COURT_MARGIN {
        paddle.rect.set_bottom(COURT_HEIGHT - COURT_MARGIN);
    }
}

/// Move the ball one step, bounce it off walls and paddles, and score it when
/// it leaves the court.
///
/// Wall bounces only flip `vy`; the ball is not pushed back out of the wall,
/// so a fast ball can sink into the margin and jitter there.
pub fn move_ball<R: Rng + ?Sized>(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    score: &mut Score,
    rng: &mut R,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    ball.rect.x += ball.vx as i32;
    ball.rect.y += ball.vy as i32;

    if ball.rect.top() <= COURT_MARGIN || ball.rect.bottom() >= COURT_HEIGHT - COURT_MARGIN {
        ball.vy = -ball.vy;
        events.wall_bounce = true;
    }

    // The vx sign check keeps an overlapping ball from bouncing twice
    if ball.vx < 0.0 && ball.rect.intersects(&left.rect) {
        bounce_off_paddle(ball, left, Side::Right);
        events.paddle_hit = Some(Side::Left);
    }
    if ball.vx > 0.0 && ball.rect.intersects(&right.rect) {
        bounce_off_paddle(ball, right, Side::Left);
        events.paddle_hit = Some(Side::Right);
    }

    if ball.rect.right() < 0 {
        score.award(Side::Right);
        ball.serve(Some(Side::Right), rng);
        events.goal = Some(Side::Right);
    } else if ball.rect.left() > COURT_WIDTH {
        score.award(Side::Left);
        ball.serve(Some(Side::Left), rng);
        events.goal = Some(Side::Left);
    }

    events
}

/// Contact point on the paddle, -1.0 at the top edge to 1.0 at the bottom edge
pub fn contact_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.rect.center_y() - paddle.rect.center_y()) as f32 / (paddle.rect.height as f32 / 2.0)
}

fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, toward: Side) {
    let offset = contact_offset(ball, paddle);
    let speed = ball.vx.abs() * HIT_SPEEDUP;

    ball.vx = match toward {
        Side::Left => -speed,
        Side::Right => speed,
    };
    ball.vy = BALL_SPEED * offset * HIT_ANGLE_FACTOR;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Bounds, Phase, BALL_SIZE, PADDLE_HEIGHT, PADDLE_SPEED};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    fn ball_at(x: i32, y: i32, vx: f32, vy: f32) -> Ball {
        Ball {
            rect: Bounds::new(x, y, BALL_SIZE, BALL_SIZE),
            vx,
            vy,
        }
    }

    fn paddles() -> (Paddle, Paddle) {
        (Paddle::new(Side::Left), Paddle::new(Side::Right))
    }

    #[test]
    fn test_paddle_stays_inside_margins() {
        for start in (-200..=COURT_HEIGHT + 200).step_by(7) {
            for speed in [-PADDLE_SPEED, 0, PADDLE_SPEED] {
                let mut paddle = Paddle::new(Side::Left);
                paddle.rect.y = start;
                paddle.speed = speed;

                move_paddle(&mut paddle);

                assert!(paddle.rect.top() >= COURT_MARGIN, "start={start} speed={speed}");
                assert!(
                    paddle.rect.bottom() <= COURT_HEIGHT - COURT_MARGIN,
                    "start={start} speed={speed}"
                );
            }
        }
    }

    #[test]
    fn test_paddle_moves_by_speed_inside_court() {
        let mut paddle = Paddle::new(Side::Right);
        let start = paddle.rect.y;
        paddle.speed = PADDLE_SPEED;

        move_paddle(&mut paddle);

        assert_eq!(paddle.rect.y, start + PADDLE_SPEED);
    }

    #[test]
    fn test_ball_position_truncates_velocity() {
        let (left, right) = paddles();
        let mut score = Score::default();
        let mut ball = ball_at(400, 200, 6.3, -4.5);

        move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(ball.rect.x, 406);
        assert_eq!(ball.rect.y, 196);
    }

    #[test]
    fn test_wall_bounce_inverts_vy_only() {
        let (left, right) = paddles();
        let mut score = Score::default();

        let mut top = ball_at(400, 22, 6.0, -4.5);
        let events = move_ball(&mut top, &left, &right, &mut score, &mut rng());
        assert!(events.wall_bounce);
        assert_eq!(top.vy, 4.5);
        assert_eq!(top.vx, 6.0);
        // No position correction
        assert_eq!(top.rect.y, 18);

        let mut bottom = ball_at(400, COURT_HEIGHT - COURT_MARGIN - BALL_SIZE - 2, -6.0, 4.5);
        move_ball(&mut bottom, &left, &right, &mut score, &mut rng());
        assert_eq!(bottom.vy, -4.5);
        assert_eq!(bottom.vx, -6.0);
    }

    #[test]
    fn test_left_paddle_hit_at_center_goes_straight() {
        let (left, right) = paddles();
        let mut score = Score::default();
        // Centre of the ball level with the centre of the paddle
        let mut ball = ball_at(56, left.rect.center_y() - BALL_SIZE / 2, -6.0, 0.0);

        let events = move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(events.paddle_hit, Some(Side::Left));
        assert!((ball.vx - 6.0 * HIT_SPEEDUP).abs() < EPSILON);
        assert!(ball.vy.abs() < EPSILON);
    }

    #[test]
    fn test_paddle_hit_angle_follows_offset() {
        let (left, right) = paddles();
        let mut score = Score::default();

        // Ball centre at the bottom edge of the paddle: offset +1
        let bottom_y = left.rect.center_y() + PADDLE_HEIGHT / 2 - BALL_SIZE / 2;
        let mut low = ball_at(56, bottom_y, -6.0, 0.0);
        move_ball(&mut low, &left, &right, &mut score, &mut rng());
        assert!((low.vy - BALL_SPEED * HIT_ANGLE_FACTOR).abs() < EPSILON);

        // Ball centre at the top edge of the right paddle: offset -1
        let top_y = right.rect.center_y() - PADDLE_HEIGHT / 2 - BALL_SIZE / 2;
        let mut high = ball_at(right.rect.x - BALL_SIZE + 2, top_y, 6.0, 0.0);
        let events = move_ball(&mut high, &left, &right, &mut score, &mut rng());
        assert_eq!(events.paddle_hit, Some(Side::Right));
        assert!(high.vx < 0.0);
        assert!((high.vy + BALL_SPEED * HIT_ANGLE_FACTOR).abs() < EPSILON);
    }

    #[test]
    fn test_contact_offset_is_monotonic() {
        let (left, _) = paddles();
        let mut previous = f32::NEG_INFINITY;

        for dy in -50..=50 {
            let ball = ball_at(50, left.rect.center_y() + dy - BALL_SIZE / 2, -6.0, 0.0);
            let offset = contact_offset(&ball, &left);
            assert!(offset > previous);
            if dy == 0 {
                assert_eq!(offset, 0.0);
            } else {
                assert_eq!(offset > 0.0, dy > 0);
            }
            previous = offset;
        }
    }

    #[test]
    fn test_each_hit_speeds_ball_up() {
        let (left, right) = paddles();
        let mut score = Score::default();
        let y = left.rect.center_y() - BALL_SIZE / 2;
        let mut ball = ball_at(56, y, -6.0, 0.0);
        let mut last_speed = ball.vx.abs();

        for _ in 0..5 {
            // Put the ball back just right of the left paddle, heading left
            ball.rect = Bounds::new(left.rect.right() + 2, y, BALL_SIZE, BALL_SIZE);
            ball.vx = -ball.vx.abs();
            ball.vy = 0.0;

            move_ball(&mut ball, &left, &right, &mut score, &mut rng());

            let speed = ball.vx.abs();
            assert!(speed > last_speed);
            assert!((speed - last_speed * HIT_SPEEDUP).abs() < EPSILON);
            last_speed = speed;
        }
    }

    #[test]
    fn test_ball_moving_away_does_not_bounce() {
        let (left, right) = paddles();
        let mut score = Score::default();
        let mut ball = ball_at(46, left.rect.center_y(), 6.0, 0.0);

        let events = move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(events.paddle_hit, None);
        assert_eq!(ball.vx, 6.0);
    }

    #[test]
    fn test_exit_left_scores_for_player_two() {
        let (left, right) = paddles();
        let mut score = Score::new(1, 1);
        let mut ball = ball_at(-10, 100, -6.0, 0.0);

        let events = move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(events.goal, Some(Side::Right));
        assert_eq!(score, Score::new(1, 2));
        assert!(ball.vx > 0.0);
        assert_eq!(ball.vx, BALL_SPEED);
        assert_eq!(ball.rect.x, COURT_WIDTH / 2 - BALL_SIZE / 2);
        assert_eq!(ball.rect.y, COURT_HEIGHT / 2 - BALL_SIZE / 2);
    }

    #[test]
    fn test_exit_right_scores_for_player_one() {
        let (left, right) = paddles();
        let mut score = Score::default();
        let mut ball = ball_at(COURT_WIDTH - 5, 100, 6.0, 0.0);

        let events = move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(events.goal, Some(Side::Left));
        assert_eq!(score, Score::new(1, 0));
        assert_eq!(ball.vx, -BALL_SPEED);
    }

    #[test]
    fn test_ball_partly_outside_does_not_score() {
        let (left, right) = paddles();
        let mut score = Score::default();
        let mut ball = ball_at(-2, 100, -6.0, 0.0);

        // Right edge is at 6 after the move, still inside
        let events = move_ball(&mut ball, &left, &right, &mut score, &mut rng());

        assert_eq!(events.goal, None);
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut rng = rng();
        let mut state = GameState::new(&mut rng);
        state.left_paddle.speed = PADDLE_SPEED;
        state.right_paddle.speed = -PADDLE_SPEED;
        state.toggle_pause();
        let frozen = state.clone();

        for _ in 0..240 {
            let events = update(&mut state, &mut rng);
            assert_eq!(events, PhysicsEvents::default());
        }

        assert_eq!(state, frozen);
        assert_eq!(state.phase, Phase::Paused);
    }

    #[test]
    fn test_running_update_moves_paddles_and_ball() {
        let mut rng = rng();
        let mut state = GameState::new(&mut rng);
        state.left_paddle.speed = PADDLE_SPEED;
        let paddle_y = state.left_paddle.rect.y;
        let ball_x = state.ball.rect.x;

        update(&mut state, &mut rng);

        assert_eq!(state.left_paddle.rect.y, paddle_y + PADDLE_SPEED);
        assert_eq!(state.ball.rect.x, ball_x + state.ball.vx as i32);
    }
}
