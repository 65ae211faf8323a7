//! Score, level and field resets

use glam::Vec2;

use super::state::{GameEvent, GameState, level_label, score_label};
use crate::engine::Engine;

/// Add the brick reward to the score and refresh the display
pub fn award_brick<W: Engine>(state: &mut GameState, world: &mut W) -> u64 {
    state.score += state.settings.brick_reward;
    world.set_text(state.hud.score, &score_label(state.score));
    state.score
}

/// Field cleared: bump the level, speed the ball up and restore every brick.
///
/// The ball is relaunched up-right at `base + level * increment` on both axes.
/// Score carries over.
pub fn advance_level<W: Engine>(state: &mut GameState, world: &mut W) {
    state.level += 1;
    let speed = state.settings.ball.speed_for_level(state.level);
    world.set_velocity(state.ball.body, Vec2::new(speed, -speed));
    reset_bricks(state, world);
    world.set_text(state.hud.level, &level_label(state.level));

    log::info!("Level {} (ball speed {})", state.level, speed);
    state.push_event(GameEvent::LevelAdvanced {
        level: state.level,
        speed,
    });
}

/// Reactivate every brick in its grid slot, whatever its current state
pub fn reset_bricks<W: Engine>(state: &mut GameState, world: &mut W) {
    for brick in &mut state.bricks {
        world.set_position(brick.body, brick.position);
        world.set_enabled(brick.body, true);
        brick.active = true;
    }
}
