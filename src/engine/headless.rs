//! In-memory engine for tests, replays and headless hosts
//!
//! Stores bodies and texts, honors pause, and hands queued scripted events to
//! the contact handler on `step`. It never integrates motion: positions and
//! velocities only change when somebody sets them. A paused world detects no
//! contacts, so pausing discards anything still queued.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{
    BodyDesc, BodyGroup, BodyId, BoundEdges, ContactHandler, Engine, PhysicsWorld, TextDisplay,
    TextId, TextStyle,
};

/// A contact the headless engine will report on its next unpaused step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    /// Ball overlaps the paddle
    PaddleContact,
    /// Ball overlaps the given brick body
    BrickContact { brick: BodyId },
    /// Body reached the world edges
    WorldBound { body: BodyId, edges: BoundEdges },
}

#[derive(Debug, Clone)]
pub struct HeadlessBody {
    pub desc: BodyDesc,
    pub position: Vec2,
    pub velocity: Vec2,
    pub enabled: bool,
    pub collide_world_bounds: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessText {
    pub content: String,
    pub style: TextStyle,
    pub visible: bool,
}

/// Counts engine teardowns; survives the engine being dropped
#[derive(Debug, Clone, Default)]
pub struct TeardownProbe(Rc<Cell<u32>>);

impl TeardownProbe {
    pub fn count(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct HeadlessEngine {
    bodies: Vec<HeadlessBody>,
    texts: Vec<HeadlessText>,
    pending: VecDeque<ScriptedEvent>,
    paused: bool,
    destroyed: bool,
    steps: u64,
    teardowns: TeardownProbe,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a contact for the next step. Dropped while paused.
    pub fn queue(&mut self, event: ScriptedEvent) {
        if self.paused {
            log::debug!("World paused, dropping {:?}", event);
            return;
        }
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn body(&self, body: BodyId) -> Option<&HeadlessBody> {
        self.bodies.get(body.0 as usize)
    }

    pub fn text(&self, text: TextId) -> Option<&HeadlessText> {
        self.texts.get(text.0 as usize)
    }

    /// First body created in the given group
    pub fn find_body(&self, group: BodyGroup) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.desc.group == group)
            .map(|i| BodyId(i as u32))
    }

    /// Bodies in the given group, in creation order
    pub fn bodies_in(&self, group: BodyGroup) -> Vec<BodyId> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.desc.group == group)
            .map(|(i, _)| BodyId(i as u32))
            .collect()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn teardown_probe(&self) -> TeardownProbe {
        self.teardowns.clone()
    }

    fn body_mut(&mut self, body: BodyId) -> Option<&mut HeadlessBody> {
        self.bodies.get_mut(body.0 as usize)
    }

    fn is_enabled(&self, body: BodyId) -> bool {
        self.body(body).is_some_and(|b| b.enabled)
    }

    /// Whether the engine would actually report this contact right now
    fn deliverable(&self, event: &ScriptedEvent) -> bool {
        let ball_live = self
            .find_body(BodyGroup::Ball)
            .is_some_and(|ball| self.is_enabled(ball));
        match *event {
            ScriptedEvent::PaddleContact => ball_live,
            ScriptedEvent::BrickContact { brick } => ball_live && self.is_enabled(brick),
            ScriptedEvent::WorldBound { body, .. } => self.body(body).is_some_and(|b| {
                b.enabled && b.collide_world_bounds && b.desc.report_world_bounds
            }),
        }
    }
}

impl PhysicsWorld for HeadlessEngine {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(HeadlessBody {
            desc: desc.clone(),
            position: desc.position,
            velocity: desc.velocity,
            enabled: true,
            collide_world_bounds: desc.collide_world_bounds,
        });
        id
    }

    fn position(&self, body: BodyId) -> Vec2 {
        self.body(body).map(|b| b.position).unwrap_or(Vec2::ZERO)
    }

    fn set_position(&mut self, body: BodyId, position: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.position = position;
        }
    }

    fn velocity(&self, body: BodyId) -> Vec2 {
        self.body(body).map(|b| b.velocity).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.velocity = velocity;
        }
    }

    fn set_enabled(&mut self, body: BodyId, enabled: bool) {
        if let Some(b) = self.body_mut(body) {
            b.enabled = enabled;
        }
    }

    fn set_collide_world_bounds(&mut self, body: BodyId, enabled: bool) {
        if let Some(b) = self.body_mut(body) {
            b.collide_world_bounds = enabled;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pending.clear();
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl TextDisplay for HeadlessEngine {
    fn create_text(&mut self, content: &str, style: &TextStyle) -> TextId {
        let id = TextId(self.texts.len() as u32);
        self.texts.push(HeadlessText {
            content: content.to_string(),
            style: *style,
            visible: true,
        });
        id
    }

    fn set_text(&mut self, text: TextId, content: &str) {
        if let Some(t) = self.texts.get_mut(text.0 as usize) {
            t.content = content.to_string();
        }
    }

    fn set_text_visible(&mut self, text: TextId, visible: bool) {
        if let Some(t) = self.texts.get_mut(text.0 as usize) {
            t.visible = visible;
        }
    }
}

impl Engine for HeadlessEngine {
    fn step(&mut self, _dt: f32, handler: &mut dyn ContactHandler<Self>) {
        if self.paused || self.destroyed {
            return;
        }
        self.steps += 1;

        // Handlers may pause the world (game over), which drops the rest
        while !self.paused {
            let Some(event) = self.pending.pop_front() else {
                break;
            };
            if !self.deliverable(&event) {
                log::debug!("Dropping undeliverable contact {:?}", event);
                continue;
            }
            match event {
                ScriptedEvent::PaddleContact => handler.on_paddle_contact(self),
                ScriptedEvent::BrickContact { brick } => handler.on_brick_contact(self, brick),
                ScriptedEvent::WorldBound { body, edges } => {
                    handler.on_world_bound_exit(self, body, edges)
                }
            }
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.bodies.clear();
        self.texts.clear();
        self.pending.clear();
        self.destroyed = true;
        self.teardowns.0.set(self.teardowns.0.get() + 1);
    }
}
