//! Game settings and tuning
//!
//! Loaded from JSON; any missing field falls back to the built-in default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Playfield and brick grid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
    pub brick_rows: u32,
    pub brick_width: f32,
    /// Row pitch height for the grid
    pub brick_height: f32,
    /// Collision/render height of a single brick
    pub brick_body_height: f32,
    pub brick_spacing: f32,
    pub left_margin: f32,
    pub top_margin: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            brick_rows: BRICK_ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_body_height: BRICK_BODY_HEIGHT,
            brick_spacing: BRICK_SPACING,
            left_margin: BRICK_LEFT_MARGIN,
            top_margin: BRICK_TOP_MARGIN,
        }
    }
}

/// Ball spawn and speed progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub spawn: Vec2,
    pub base_speed: f32,
    pub speed_increment: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            spawn: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            base_speed: BALL_BASE_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
        }
    }
}

impl BallSettings {
    /// Per-axis speed for a given level
    pub fn speed_for_level(&self, level: u32) -> f32 {
        self.base_speed + level as f32 * self.speed_increment
    }

    /// Velocity applied on spawn and restart (up-right)
    pub fn spawn_velocity(&self) -> Vec2 {
        Vec2::new(self.base_speed, -self.base_speed)
    }
}

/// Paddle spawn, size and steering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub spawn: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub deflection: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(PADDLE_SPAWN_X, PADDLE_SPAWN_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed: PADDLE_SPEED,
            deflection: PADDLE_DEFLECTION,
        }
    }
}

/// Complete session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
    /// Points per broken brick
    pub brick_reward: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            ball: BallSettings::default(),
            paddle: PaddleSettings::default(),
            brick_reward: BRICK_REWARD,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject geometry that cannot produce a playable grid
    pub fn validate(&self) -> Result<()> {
        let field = &self.field;
        if field.width <= 0.0 || field.height <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "field must be positive, got {}x{}",
                field.width, field.height
            )));
        }
        if field.brick_rows == 0 {
            return Err(Error::InvalidSettings("brick_rows must be at least 1".into()));
        }
        if field.brick_width <= 0.0 || field.brick_spacing < 0.0 {
            return Err(Error::InvalidSettings(
                "brick_width must be positive and brick_spacing non-negative".into(),
            ));
        }
        if field.width < field.brick_width + field.brick_spacing {
            return Err(Error::InvalidSettings(format!(
                "field width {} fits no brick columns",
                field.width
            )));
        }
        if self.brick_reward == 0 {
            return Err(Error::InvalidSettings("brick_reward must be positive".into()));
        }
        Ok(())
    }
}
