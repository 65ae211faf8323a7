//! Reactions to ball contacts reported by the engine
//!
//! The engine handles the bounce itself. These reactions only add paddle
//! steering, break bricks and drive scoring.

use super::progress::{advance_level, award_brick};
use super::state::{BrickId, GameEvent, GamePhase, GameState};
use super::tick::check_game_over;
use crate::engine::{BodyId, BoundEdges, ContactHandler, Engine};

/// Outcome of a brick contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Contact ignored (inactive brick, unknown body, or not playing)
    Ignored,
    /// Brick broken, field still has bricks
    Broken,
    /// Last brick broken; level advanced and field reset
    Cleared,
}

/// Horizontal velocity after a paddle contact.
///
/// Off-center hits steer the ball away from the paddle center in proportion
/// to the offset. A dead-center hit keeps the current velocity.
#[inline]
pub fn paddle_deflection(ball_x: f32, paddle_x: f32, vx: f32, factor: f32) -> f32 {
    if ball_x < paddle_x {
        -factor * (paddle_x - ball_x)
    } else if ball_x > paddle_x {
        factor * (ball_x - paddle_x)
    } else {
        vx
    }
}

/// Apply paddle steering to the ball. Vertical velocity is left to the engine.
pub fn ball_hit_paddle<W: Engine>(state: &GameState, world: &mut W) {
    let ball_x = world.position(state.ball.body).x;
    let paddle_x = world.position(state.paddle.body).x;
    let vel = world.velocity(state.ball.body);

    let vx = paddle_deflection(ball_x, paddle_x, vel.x, state.settings.paddle.deflection);
    if vx != vel.x {
        world.set_velocity_x(state.ball.body, vx);
    }
    log::debug!("Paddle hit at offset {:.1}, vx {:.1}", ball_x - paddle_x, vx);
}

/// Break a brick, score it, and advance the level when the field is empty
pub fn ball_hit_brick<W: Engine>(state: &mut GameState, world: &mut W, body: BodyId) -> BrickHit {
    if state.phase != GamePhase::Playing {
        log::warn!("Brick contact while {:?}, ignoring", state.phase);
        return BrickHit::Ignored;
    }
    let Some(index) = state.brick_index(body) else {
        log::warn!("Contact with unknown brick body {:?}", body);
        return BrickHit::Ignored;
    };
    if !state.bricks[index].active {
        log::warn!("Contact with inactive brick {}, ignoring", index);
        return BrickHit::Ignored;
    }

    state.bricks[index].active = false;
    world.set_enabled(body, false);
    let score = award_brick(state, world);
    state.push_event(GameEvent::BrickBroken {
        brick: BrickId(index),
        score,
    });
    log::debug!("Brick {} broken, score {}", index, score);

    if state.active_brick_count() == 0 {
        advance_level(state, world);
        BrickHit::Cleared
    } else {
        BrickHit::Broken
    }
}

impl<W: Engine> ContactHandler<W> for GameState {
    fn on_paddle_contact(&mut self, world: &mut W) {
        if self.phase == GamePhase::Playing {
            ball_hit_paddle(self, world);
        }
    }

    fn on_brick_contact(&mut self, world: &mut W, brick: BodyId) {
        ball_hit_brick(self, world, brick);
    }

    fn on_world_bound_exit(&mut self, world: &mut W, body: BodyId, edges: BoundEdges) {
        check_game_over(self, world, body, edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeadlessEngine, PhysicsWorld};
    use crate::settings::Settings;
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (HeadlessEngine, GameState) {
        let mut world = HeadlessEngine::new();
        let state = GameState::new(&mut world, Settings::default());
        (world, state)
    }

    #[test]
    fn test_deflection_left_of_center() {
        assert_eq!(paddle_deflection(380.0, 400.0, 150.0, 10.0), -200.0);
    }

    #[test]
    fn test_deflection_right_of_center() {
        assert_eq!(paddle_deflection(425.0, 400.0, -150.0, 10.0), 250.0);
    }

    #[test]
    fn test_deflection_dead_center_keeps_velocity() {
        assert_eq!(paddle_deflection(400.0, 400.0, -123.0, 10.0), -123.0);
    }

    #[test]
    fn test_ball_hit_paddle_only_touches_vx() {
        let (mut world, state) = setup();
        world.set_position(state.ball.body, Vec2::new(390.0, 530.0));
        world.set_velocity(state.ball.body, Vec2::new(150.0, -150.0));
        ball_hit_paddle(&state, &mut world);
        assert_eq!(world.velocity(state.ball.body), Vec2::new(-100.0, -150.0));
    }

    #[test]
    fn test_paddle_contact_ignored_after_game_over() {
        let (mut world, mut state) = setup();
        world.set_position(state.ball.body, Vec2::new(380.0, 530.0));
        world.set_velocity(state.ball.body, Vec2::new(150.0, -150.0));

        state.phase = GamePhase::GameOver;
        state.on_paddle_contact(&mut world);
        assert_eq!(world.velocity(state.ball.body), Vec2::new(150.0, -150.0));

        state.phase = GamePhase::Playing;
        state.on_paddle_contact(&mut world);
        assert_eq!(world.velocity(state.ball.body), Vec2::new(-200.0, -150.0));
    }

    #[test]
    fn test_brick_hit_scores_and_disables() {
        let (mut world, mut state) = setup();
        let body = state.bricks[4].body;
        assert_eq!(ball_hit_brick(&mut state, &mut world, body), BrickHit::Broken);
        assert_eq!(state.score, 10);
        assert!(!state.bricks[4].active);
        assert!(!world.body(body).unwrap().enabled);
        assert_eq!(state.active_brick_count(), 54);
    }

    #[test]
    fn test_brick_hit_does_not_move_ball() {
        let (mut world, mut state) = setup();
        let before = (
            world.position(state.ball.body),
            world.velocity(state.ball.body),
        );
        let body = state.bricks[0].body;
        ball_hit_brick(&mut state, &mut world, body);
        assert_eq!(
            (
                world.position(state.ball.body),
                world.velocity(state.ball.body)
            ),
            before
        );
    }

    #[test]
    fn test_double_hit_is_noop() {
        let (mut world, mut state) = setup();
        let body = state.bricks[0].body;
        ball_hit_brick(&mut state, &mut world, body);
        assert_eq!(ball_hit_brick(&mut state, &mut world, body), BrickHit::Ignored);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_unknown_body_is_ignored() {
        let (mut world, mut state) = setup();
        let paddle = state.paddle.body;
        assert_eq!(ball_hit_brick(&mut state, &mut world, paddle), BrickHit::Ignored);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_hits_outside_playing_are_ignored() {
        let (mut world, mut state) = setup();
        state.phase = GamePhase::GameOver;
        let body = state.bricks[0].body;
        assert_eq!(ball_hit_brick(&mut state, &mut world, body), BrickHit::Ignored);
        assert!(state.bricks[0].active);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_brick_clears_field() {
        let (mut world, mut state) = setup();
        let bodies: Vec<BodyId> = state.bricks.iter().map(|b| b.body).collect();
        let (last, rest) = bodies.split_last().unwrap();
        for &body in rest {
            assert_eq!(ball_hit_brick(&mut state, &mut world, body), BrickHit::Broken);
        }
        assert_eq!(state.level, 1);
        assert_eq!(ball_hit_brick(&mut state, &mut world, *last), BrickHit::Cleared);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 550);
        assert_eq!(state.active_brick_count(), 55);
        assert_eq!(world.velocity(state.ball.body), Vec2::new(250.0, -250.0));
    }

    proptest! {
        #[test]
        fn prop_deflection_rule(ball_x in 0.0f32..800.0, paddle_x in 0.0f32..800.0, vx in -500.0f32..500.0) {
            let out = paddle_deflection(ball_x, paddle_x, vx, 10.0);
            if ball_x < paddle_x {
                prop_assert_eq!(out, -10.0 * (paddle_x - ball_x));
                prop_assert!(out < 0.0);
            } else if ball_x > paddle_x {
                prop_assert_eq!(out, 10.0 * (ball_x - paddle_x));
                prop_assert!(out > 0.0);
            } else {
                prop_assert_eq!(out, vx);
            }
        }

        #[test]
        fn prop_partial_clear_scores_linearly(hits in 0usize..55) {
            let (mut world, mut state) = setup();
            let bodies: Vec<BodyId> = state.bricks.iter().map(|b| b.body).collect();
            for &body in bodies.iter().take(hits) {
                ball_hit_brick(&mut state, &mut world, body);
            }
            prop_assert_eq!(state.score, 10 * hits as u64);
            prop_assert_eq!(state.level, 1);
            prop_assert_eq!(state.active_brick_count(), 55 - hits);
        }
    }
}
