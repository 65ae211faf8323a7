//! Game state and core session types
//!
//! One `GameState` per session: the run state (score, level, phase), handles
//! to the engine bodies it drives, and the HUD texts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::brick_layout;
use crate::engine::{
    BodyDesc, BodyGroup, BodyId, Engine, PhysicsWorld, Shape, TextId, TextStyle,
};
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended by the player
    Paused,
    /// Ball fell out the bottom; waiting for restart
    GameOver,
}

/// Notable transitions, queued for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken { brick: BrickId, score: u64 },
    LevelAdvanced { level: u32, speed: f32 },
    Paused,
    Resumed,
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// Index of a brick in the grid (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickId(pub usize);

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: BodyId,
    pub spawn: Vec2,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: BodyId,
}

/// A brick slot in the grid. The slot outlives any number of breaks.
#[derive(Debug, Clone)]
pub struct Brick {
    pub id: BrickId,
    pub body: BodyId,
    pub position: Vec2,
    pub active: bool,
}

/// On-screen texts
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: TextId,
    pub level: TextId,
    pub game_over: TextId,
    pub pause: TextId,
}

impl Hud {
    fn create<W: Engine>(world: &mut W, settings: &Settings) -> Self {
        let center = Vec2::new(settings.field.width / 2.0, settings.field.height / 2.0);
        let overlay = TextStyle {
            position: center,
            font_size: 64.0,
            origin: Vec2::splat(0.5),
        };

        let score = world.create_text(
            &score_label(0),
            &TextStyle {
                position: Vec2::new(16.0, 16.0),
                font_size: 32.0,
                origin: Vec2::ZERO,
            },
        );
        let level = world.create_text(
            &level_label(1),
            &TextStyle {
                position: Vec2::new(center.x, 20.0),
                font_size: 30.0,
                origin: Vec2::new(0.5, 0.0),
            },
        );
        let game_over = world.create_text("Game Over", &overlay);
        world.set_text_visible(game_over, false);
        let pause = world.create_text("Pause", &overlay);
        world.set_text_visible(pause, false);

        Self {
            score,
            level,
            game_over,
            pause,
        }
    }
}

pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn level_label(level: u32) -> String {
    format!("Level: {}", level)
}

/// Serializable summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub level: u32,
    pub phase: GamePhase,
    pub active_bricks: usize,
    pub total_bricks: usize,
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Always a multiple of the brick reward since the last restart
    pub score: u64,
    /// Starts at 1, +1 per cleared field
    pub level: u32,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Fixed grid, allocated once per session
    pub bricks: Vec<Brick>,
    pub hud: Hud,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create the ball, paddle, brick grid and HUD in the engine
    pub fn new<W: Engine>(world: &mut W, settings: Settings) -> Self {
        let mut ball_desc = BodyDesc::new(
            BodyGroup::Ball,
            settings.ball.spawn,
            Shape::Circle {
                radius: settings.ball.radius,
            },
        );
        ball_desc.velocity = settings.ball.spawn_velocity();
        ball_desc.bounce = 1.0;
        ball_desc.collide_world_bounds = true;
        ball_desc.report_world_bounds = true;
        let ball = Ball {
            body: world.create_body(&ball_desc),
            spawn: settings.ball.spawn,
        };

        let mut paddle_desc = BodyDesc::new(
            BodyGroup::Paddle,
            settings.paddle.spawn,
            Shape::Rect {
                size: settings.paddle.size,
            },
        );
        paddle_desc.immovable = true;
        paddle_desc.collide_world_bounds = true;
        let paddle = Paddle {
            body: world.create_body(&paddle_desc),
        };

        let brick_size = Vec2::new(settings.field.brick_width, settings.field.brick_body_height);
        let bricks: Vec<Brick> = brick_layout(&settings.field)
            .into_iter()
            .enumerate()
            .map(|(i, placement)| {
                let mut desc = BodyDesc::new(
                    BodyGroup::Brick,
                    placement.position,
                    Shape::Rect { size: brick_size },
                );
                desc.immovable = true;
                desc.tint = Some(placement.variant.color());
                Brick {
                    id: BrickId(i),
                    body: world.create_body(&desc),
                    position: placement.position,
                    active: true,
                }
            })
            .collect();

        let hud = Hud::create(world, &settings);

        log::info!(
            "Session state created: {} bricks ({} rows), field {}x{}",
            bricks.len(),
            settings.field.brick_rows,
            settings.field.width,
            settings.field.height
        );

        Self {
            settings,
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            ball,
            paddle,
            bricks,
            hud,
            events: Vec::new(),
        }
    }

    pub fn active_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Look up the brick slot owning an engine body
    pub fn brick_index(&self, body: BodyId) -> Option<usize> {
        self.bricks.iter().position(|b| b.body == body)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, world: &impl PhysicsWorld) -> Snapshot {
        Snapshot {
            score: self.score,
            level: self.level,
            phase: self.phase,
            active_bricks: self.active_brick_count(),
            total_bricks: self.bricks.len(),
            ball_pos: world.position(self.ball.body),
            ball_vel: world.velocity(self.ball.body),
        }
    }
}
