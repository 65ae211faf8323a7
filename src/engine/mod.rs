//! Physics/rendering collaborator interface
//!
//! The game core never integrates motion or detects overlaps itself. It
//! creates bodies, reads and writes their velocities, and reacts to the
//! contacts the engine reports through [`ContactHandler`].

pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use headless::{HeadlessEngine, ScriptedEvent, TeardownProbe};

/// Handle to a physics body owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Handle to an on-screen text owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextId(pub u32);

/// Collision groups used to route contacts to the right reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyGroup {
    Ball,
    Paddle,
    Brick,
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

/// Everything the engine needs to create a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub group: BodyGroup,
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
    /// Restitution against bounds and immovable bodies (1.0 = perfectly elastic)
    pub bounce: f32,
    /// Infinite effective mass; contacts never push it
    pub immovable: bool,
    /// Clamp to (and bounce off) the world bounds
    pub collide_world_bounds: bool,
    /// Report bound contacts to [`ContactHandler::on_world_bound_exit`]
    pub report_world_bounds: bool,
    /// RGB fill; `None` draws the group's default
    pub tint: Option<u32>,
}

impl BodyDesc {
    pub fn new(group: BodyGroup, position: Vec2, shape: Shape) -> Self {
        Self {
            group,
            position,
            velocity: Vec2::ZERO,
            shape,
            bounce: 0.0,
            immovable: false,
            collide_world_bounds: false,
            report_world_bounds: false,
            tint: None,
        }
    }
}

/// Which world edges a body touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundEdges {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
}

impl BoundEdges {
    pub const DOWN: Self = Self {
        up: false,
        down: true,
        left: false,
        right: false,
    };
}

/// Text placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub position: Vec2,
    pub font_size: f32,
    /// Horizontal/vertical origin (0.0 = top-left, 0.5 = centered)
    pub origin: Vec2,
}

/// Body creation and kinematic access
pub trait PhysicsWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyId;

    fn position(&self, body: BodyId) -> Vec2;
    fn set_position(&mut self, body: BodyId, position: Vec2);

    fn velocity(&self, body: BodyId) -> Vec2;
    fn set_velocity(&mut self, body: BodyId, velocity: Vec2);

    fn set_velocity_x(&mut self, body: BodyId, vx: f32) {
        let vel = self.velocity(body);
        self.set_velocity(body, Vec2::new(vx, vel.y));
    }

    /// Disabled bodies neither collide nor render
    fn set_enabled(&mut self, body: BodyId, enabled: bool);
    fn set_collide_world_bounds(&mut self, body: BodyId, enabled: bool);

    /// Suspend simulation stepping without discarding state
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
}

/// On-screen text
pub trait TextDisplay {
    fn create_text(&mut self, content: &str, style: &TextStyle) -> TextId;
    fn set_text(&mut self, text: TextId, content: &str);
    fn set_text_visible(&mut self, text: TextId, visible: bool);
}

/// Reactions the engine invokes when it detects contacts.
///
/// Calls happen synchronously inside [`Engine::step`] and never overlap.
pub trait ContactHandler<W> {
    /// Ball touched the paddle
    fn on_paddle_contact(&mut self, world: &mut W);
    /// Ball touched an enabled brick
    fn on_brick_contact(&mut self, world: &mut W, brick: BodyId);
    /// A bound-reporting body touched the world edges
    fn on_world_bound_exit(&mut self, world: &mut W, body: BodyId, edges: BoundEdges);
}

/// The full collaborator: physics, text, stepping and teardown
pub trait Engine: PhysicsWorld + TextDisplay {
    /// Advance the simulation one frame, delivering contacts to `handler`.
    /// Does nothing while paused.
    fn step(&mut self, dt: f32, handler: &mut dyn ContactHandler<Self>)
    where
        Self: Sized;

    /// Release every body, text and render resource
    fn destroy(&mut self);
}
