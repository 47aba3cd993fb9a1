use core::time::Duration;

use nalgebra::{Point2, Vector2, Vector3};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use hal::display::{Align, Canvas, Color, Point, Primitive};

use super::{aligned_text, ModeKind, Tick};
use crate::config;

pub const BALL_MIN: (f32, f32) = (10.0, 10.0);
pub const BALL_MAX: (f32, f32) = (230.0, 125.0);
pub const BALL_START: (f32, f32) = (120.0, 67.0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    /// Bubble floats uphill
    BubbleUnderIce,
    /// Ball rolls downhill
    BallOnTable,
}

impl Theme {
    fn sign(self) -> f32 {
        match self {
            Self::BubbleUnderIce => 1.0,
            Self::BallOnTable => -1.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::BubbleUnderIce => Self::BallOnTable,
            Self::BallOnTable => Self::BubbleUnderIce,
        }
    }
}

pub struct TiltGame {
    config: config::Game,
    ball: Point2<f32>,
    goal: Option<Point>,
    theme: Theme,
    flash_until: Option<Duration>,
    rng: SmallRng,
}

impl TiltGame {
    pub fn new(config: &config::Game, now: Duration) -> Self {
        Self {
            config: *config,
            ball: Point2::new(BALL_START.0, BALL_START.1),
            goal: None,
            theme: Theme::BubbleUnderIce,
            flash_until: None,
            rng: SmallRng::seed_from_u64(config.seed ^ now.as_millis() as u64),
        }
    }

    pub fn ball(&self) -> Point2<f32> {
        self.ball
    }

    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn place_goal(&mut self) -> Point {
        let goal = Point::new(self.rng.gen_range(20..220), self.rng.gen_range(20..120));
        trace!("Goal placed at ({}, {})", goal.x, goal.y);
        self.goal = Some(goal);
        goal
    }

    fn roll(&mut self, acceleration: &Vector3<f32>) {
        let tilt = Vector2::new(acceleration.x, -acceleration.y);
        self.ball += tilt * self.theme.sign() * self.config.speed;
        self.ball.x = self.ball.x.clamp(BALL_MIN.0, BALL_MAX.0);
        self.ball.y = self.ball.y.clamp(BALL_MIN.1, BALL_MAX.1);
    }

    fn reached(&self, goal: Point) -> bool {
        let distance = self.ball - Point2::new(goal.x as f32, goal.y as f32);
        let radius = self.config.collision_radius;
        distance.norm_squared() < radius * radius
    }

    fn draw(&self, goal: Point, canvas: &mut impl Canvas) {
        let ball = Point::new(self.ball.x as i32, self.ball.y as i32);
        let circle = |center, radius, color| Primitive::Circle { center, radius, color, filled: true };
        let title = Point::new(120, 5);
        match self.theme {
            Theme::BubbleUnderIce => {
                canvas.draw(Primitive::Clear(Color::rgb(180, 220, 255)));
                let ink = Color::rgb(0, 50, 150);
                aligned_text(canvas, "BUBBLE UNDER ICE", title, 1, ink, Align::Center);
                canvas.draw(circle(goal, 10, Color::WHITE));
                canvas.draw(circle(goal, 6, Color::rgb(0, 0, 100)));
                canvas.draw(circle(ball, 8, Color::WHITE));
            }
            Theme::BallOnTable => {
                canvas.draw(Primitive::Clear(Color::WHITE));
                aligned_text(canvas, "BALL ON TABLE", title, 1, Color::DARK_GREY, Align::Center);
                canvas.draw(circle(goal, 8, Color::BLACK));
                canvas.draw(circle(ball, 8, Color::RED));
            }
        }
    }

    pub fn update(&mut self, tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
        if let Some(until) = self.flash_until {
            if tick.now < until {
                canvas.draw(Primitive::Clear(Color::YELLOW));
                return None;
            }
            self.flash_until = None;
        }

        let goal = match self.goal {
            Some(goal) => goal,
            None => self.place_goal(),
        };
        self.roll(&tick.sample.acceleration);
        self.draw(goal, canvas);

        if self.reached(goal) {
            self.theme = self.theme.flipped();
            self.goal = None;
            self.flash_until = Some(tick.now + self.config.flash());
            debug!("Goal reached, switching to {:?}", self.theme);
            canvas.draw(Primitive::Clear(Color::YELLOW));
        }
        None
    }
}

mod test {
    #[test]
    fn test_ball_stays_in_bounds() {
        use core::time::Duration;

        use super::{TiltGame, BALL_MAX, BALL_MIN};
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let mut game = TiltGame::new(&config::Game::default(), Duration::ZERO);
        let keys = Keys::default();
        let mut canvas = Recorder::default();
        let pushes = [[50.0, -50.0, 0.0], [-1e6, 1e6, 0.0], [3.0, 8.0, 1.0], [0.0, -2.0, 0.0]];
        for (i, accel) in pushes.iter().cycle().take(64).enumerate() {
            let sample = SensorSample::new(*accel, [0.0; 3]);
            let now = Duration::from_millis(i as u64 * 500);
            game.update(&Tick { now, sample: &sample, keys: &keys }, &mut canvas);
            let ball = game.ball();
            assert!(BALL_MIN.0 <= ball.x && ball.x <= BALL_MAX.0);
            assert!(BALL_MIN.1 <= ball.y && ball.y <= BALL_MAX.1);
        }
    }

    #[test]
    fn test_tilt_direction() {
        use core::time::Duration;

        use nalgebra::{Point2, Vector3};

        use super::{Theme, TiltGame};
        use crate::config;

        let mut game = TiltGame::new(&config::Game::default(), Duration::ZERO);
        game.roll(&Vector3::new(1.0, 0.5, 0.0));
        assert_eq!(game.ball(), Point2::new(124.0, 65.0));

        game.theme = Theme::BallOnTable;
        game.roll(&Vector3::new(1.0, 0.5, 0.0));
        assert_eq!(game.ball(), Point2::new(120.0, 67.0));
    }

    #[test]
    fn test_goal_collision() {
        use core::time::Duration;

        use hal::display::{Color, Point};
        use nalgebra::Point2;

        use super::{Theme, TiltGame};
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let mut game = TiltGame::new(&config::Game::default(), Duration::ZERO);
        game.ball = Point2::new(100.0, 100.0);
        game.goal = Some(Point::new(105, 105));

        let flat = SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]);
        let keys = Keys::default();
        let mut canvas = Recorder::default();
        let now = Duration::from_secs(5);
        game.update(&Tick { now, sample: &flat, keys: &keys }, &mut canvas);
        assert_eq!(game.theme(), Theme::BallOnTable);
        assert_eq!(game.goal(), None);
        assert_eq!(canvas.clears.last(), Some(&Color::YELLOW));

        // flashing holds the game still
        canvas.clear();
        let now = now + Duration::from_millis(100);
        game.update(&Tick { now, sample: &flat, keys: &keys }, &mut canvas);
        assert_eq!(canvas.clears, [Color::YELLOW]);
        assert!(canvas.circles.is_empty());
        assert_eq!(game.goal(), None);

        canvas.clear();
        let now = now + Duration::from_millis(100);
        game.update(&Tick { now, sample: &flat, keys: &keys }, &mut canvas);
        assert_eq!(canvas.clears.first(), Some(&Color::WHITE));
        assert!(!canvas.circles.is_empty());
    }

    #[test]
    fn test_goal_placement_range() {
        use core::time::Duration;

        use super::TiltGame;
        use crate::config;

        let mut game = TiltGame::new(&config::Game::default(), Duration::from_millis(1234));
        for _ in 0..500 {
            let goal = game.place_goal();
            assert!((20..220).contains(&goal.x));
            assert!((20..120).contains(&goal.y));
        }
    }

    #[test]
    fn test_fresh_game() {
        use core::time::Duration;

        use nalgebra::Point2;

        use super::{Theme, TiltGame};
        use crate::config;

        let game = TiltGame::new(&config::Game::default(), Duration::from_secs(42));
        assert_eq!(game.ball(), Point2::new(120.0, 67.0));
        assert_eq!(game.goal(), None);
        assert_eq!(game.theme(), Theme::BubbleUnderIce);
    }
}
