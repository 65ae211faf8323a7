//! Brick Breaker - single-screen arcade breakout core
//!
//! Core modules:
//! - `sim`: Run state, brick layout, collision reactions and the run controller
//! - `engine`: Narrow interface to the physics/rendering collaborator
//! - `input`: Level- and edge-triggered keyboard queries
//! - `session`: Mount/unmount lifecycle and per-frame driver
//! - `settings`: Data-driven game tuning

pub mod engine;
pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_WIDTH: f32 = 60.0;
    /// Row pitch height used by the layout (body is shorter, see below)
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_BODY_HEIGHT: f32 = 20.0;
    pub const BRICK_SPACING: f32 = 10.0;
    pub const BRICK_LEFT_MARGIN: f32 = 50.0;
    pub const BRICK_TOP_MARGIN: f32 = 100.0;
    /// Points per broken brick
    pub const BRICK_REWARD: u64 = 10;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPAWN_X: f32 = 400.0;
    pub const BALL_SPAWN_Y: f32 = 500.0;
    /// Speed on each axis at level 1 / after restart
    pub const BALL_BASE_SPEED: f32 = 150.0;
    /// Added to the per-axis speed for every level reached
    pub const BALL_SPEED_INCREMENT: f32 = 50.0;

    /// Paddle defaults
    pub const PADDLE_SPAWN_X: f32 = 400.0;
    pub const PADDLE_SPAWN_Y: f32 = 550.0;
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Horizontal velocity gained per pixel of off-center paddle contact
    pub const PADDLE_DEFLECTION: f32 = 10.0;
}
