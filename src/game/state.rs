use rand::Rng;

use super::input::InputAction;
use super::verdict::Verdict;

// Court geometry in virtual units. The renderer scales this onto the terminal.
pub const COURT_WIDTH: i32 = 900;
pub const COURT_HEIGHT: i32 = 520;
pub const COURT_MARGIN: i32 = 20; // Paddles clamp and the ball bounces at this inset

pub const PADDLE_WIDTH: i32 = 14;
pub const PADDLE_HEIGHT: i32 = 100;
pub const PADDLE_INSET: i32 = 40; // Distance from the side edge to the paddle
pub const PADDLE_SPEED: i32 = 6;

pub const BALL_SIZE: i32 = 14;
pub const BALL_SPEED: f32 = 6.0;
pub const SERVE_VY_FACTOR: f32 = 0.75;

/// Integer axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.width / 2;
        self.y = cy - self.height / 2;
    }

    pub fn set_center_y(&mut self, cy: i32) {
        self.y = cy - self.height / 2;
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// On-screen name of the player on this side
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Requested paddle movement, as driven by key presses and releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleMotion {
    Up,
    Down,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Bounds,
    pub speed: i32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => COURT_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
        };
        let mut rect = Bounds::new(x, 0, PADDLE_WIDTH, PADDLE_HEIGHT);
        rect.set_center_y(COURT_HEIGHT / 2);

        Self { rect, speed: 0 }
    }

    pub fn set_motion(&mut self, motion: PaddleMotion) {
        self.speed = match motion {
            PaddleMotion::Up => -PADDLE_SPEED,
            PaddleMotion::Down => PADDLE_SPEED,
            PaddleMotion::Stop => 0,
        };
    }

    pub fn recenter(&mut self) {
        self.rect.set_center_y(COURT_HEIGHT / 2);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub rect: Bounds,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    /// Create a ball at the centre of the court, served in a random direction
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut ball = Self {
            rect: Bounds::new(0, 0, BALL_SIZE, BALL_SIZE),
            vx: 0.0,
            vy: 0.0,
        };
        ball.serve(None, rng);
        ball
    }

    /// Recentre the ball and launch it toward `toward`, or a random side when `None`.
    /// Vertical direction is always random.
    pub fn serve<R: Rng + ?Sized>(&mut self, toward: Option<Side>, rng: &mut R) {
        self.rect.set_center(COURT_WIDTH / 2, COURT_HEIGHT / 2);

        let direction = match toward {
            Some(Side::Left) => -1.0,
            Some(Side::Right) => 1.0,
            None => random_sign(rng),
        };
        self.vx = direction * BALL_SPEED;
        self.vy = random_sign(rng) * BALL_SPEED * SERVE_VY_FACTOR;
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Where the game loop currently is.
/// `Announcing` carries the verdict captured when the restart was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Announcing(Verdict),
}

/// Whether the loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub phase: Phase,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_paddle: Paddle::new(Side::Left),
            right_paddle: Paddle::new(Side::Right),
            ball: Ball::new(rng),
            score: Score::default(),
            phase: Phase::Running,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The pending winner announcement, if a restart was requested
    pub fn announcement(&self) -> Option<Verdict> {
        match self.phase {
            Phase::Announcing(verdict) => Some(verdict),
            _ => None,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            announcing @ Phase::Announcing(_) => announcing,
        };
    }

    /// Enter the announcement phase with the verdict for the current score
    pub fn request_restart(&mut self) {
        if self.announcement().is_none() {
            self.phase = Phase::Announcing(Verdict::from_score(&self.score));
        }
    }

    /// Leave the announcement phase: clear the score, re-serve and re-centre
    /// both paddles. Always resumes in `Running`.
    pub fn finish_announcement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.announcement().is_none() {
            return;
        }

        self.score.reset();
        self.ball.serve(None, rng);
        self.left_paddle.recenter();
        self.right_paddle.recenter();
        self.phase = Phase::Running;
    }

    /// Apply one input action. Paddle speeds change in every phase; they only
    /// move the paddle while running.
    pub fn apply(&mut self, action: InputAction) -> LoopControl {
        match action {
            InputAction::Quit => return LoopControl::Quit,
            InputAction::TogglePause => self.toggle_pause(),
            InputAction::Restart => self.request_restart(),
            InputAction::Paddle(side, motion) => self.paddle_mut(side).set_motion(motion),
        }
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_state() -> GameState {
        GameState::new(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_paddles_start_centered_at_their_insets() {
        let state = new_state();

        assert_eq!(state.left_paddle.rect.x, 40);
        assert_eq!(state.right_paddle.rect.x, COURT_WIDTH - 40 - PADDLE_WIDTH);
        assert_eq!(state.left_paddle.rect.center_y(), COURT_HEIGHT / 2);
        assert_eq!(state.right_paddle.rect.center_y(), COURT_HEIGHT / 2);
        assert_eq!(state.left_paddle.speed, 0);
    }

    #[test]
    fn test_serve_centers_ball_at_base_speed() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ball = Ball::new(&mut rng);

        for toward in [Some(Side::Left), Some(Side::Right), None] {
            ball.rect = Bounds::new(-300, 17, BALL_SIZE, BALL_SIZE);
            ball.vx = 19.0;
            ball.serve(toward, &mut rng);

            assert_eq!(ball.rect.x, COURT_WIDTH / 2 - BALL_SIZE / 2);
            assert_eq!(ball.rect.y, COURT_HEIGHT / 2 - BALL_SIZE / 2);
            assert_eq!(ball.vx.abs(), BALL_SPEED);
            assert_eq!(ball.vy.abs(), BALL_SPEED * SERVE_VY_FACTOR);
            match toward {
                Some(Side::Left) => assert!(ball.vx < 0.0),
                Some(Side::Right) => assert!(ball.vx > 0.0),
                None => {}
            }
        }
    }

    #[test]
    fn test_random_serve_uses_both_directions() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ball = Ball::new(&mut rng);
        let mut saw_left = false;
        let mut saw_right = false;

        for _ in 0..64 {
            ball.serve(None, &mut rng);
            if ball.vx < 0.0 {
                saw_left = true;
            } else {
                saw_right = true;
            }
        }

        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_pause_toggles_between_running_and_paused() {
        let mut state = new_state();

        state.toggle_pause();
        assert_eq!(state.phase, Phase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_restart_captures_verdict_and_ignores_pause() {
        let mut state = new_state();
        state.score = Score::new(3, 5);

        state.request_restart();
        assert_eq!(state.announcement(), Some(Verdict::Winner(Side::Right)));

        // Neither pausing nor a second restart changes the pending announcement
        state.score = Score::new(9, 0);
        state.toggle_pause();
        state.request_restart();
        assert_eq!(state.announcement(), Some(Verdict::Winner(Side::Right)));
    }

    #[test]
    fn test_finish_announcement_resets_everything() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = GameState::new(&mut rng);
        state.score = Score::new(3, 5);
        state.left_paddle.rect.set_top(COURT_MARGIN);
        state.right_paddle.rect.set_bottom(COURT_HEIGHT - COURT_MARGIN);
        state.ball.rect = Bounds::new(700, 30, BALL_SIZE, BALL_SIZE);
        state.toggle_pause();

        state.request_restart();
        state.finish_announcement(&mut rng);

        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, Score::new(0, 0));
        assert_eq!(state.ball.rect.x, COURT_WIDTH / 2 - BALL_SIZE / 2);
        assert_eq!(state.ball.rect.y, COURT_HEIGHT / 2 - BALL_SIZE / 2);
        assert_eq!(state.ball.vx.abs(), BALL_SPEED);
        assert_eq!(state.left_paddle.rect.center_y(), COURT_HEIGHT / 2);
        assert_eq!(state.right_paddle.rect.center_y(), COURT_HEIGHT / 2);
    }

    #[test]
    fn test_finish_without_announcement_is_noop() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new(&mut rng);
        state.score = Score::new(2, 1);
        let before = state.clone();

        state.finish_announcement(&mut rng);

        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_sets_paddle_speed_and_quits() {
        let mut state = new_state();

        let control = state.apply(InputAction::Paddle(Side::Left, PaddleMotion::Up));
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(state.left_paddle.speed, -PADDLE_SPEED);

        state.apply(InputAction::Paddle(Side::Right, PaddleMotion::Down));
        assert_eq!(state.right_paddle.speed, PADDLE_SPEED);

        state.apply(InputAction::Paddle(Side::Left, PaddleMotion::Stop));
        assert_eq!(state.left_paddle.speed, 0);

        assert_eq!(state.apply(InputAction::Quit), LoopControl::Quit);
    }

    #[test]
    fn test_bounds_edges_do_not_intersect() {
        let a = Bounds::new(0, 0, 10, 10);
        let touching = Bounds::new(10, 0, 10, 10);
        let overlapping = Bounds::new(9, 9, 10, 10);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }
}
