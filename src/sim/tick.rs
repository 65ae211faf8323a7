//! Per-frame run controller
//!
//! Each tick runs in a fixed order: paddle velocity, pause toggle, restart.
//! A pause press and a held restart on the same tick resolve to the pause.

use glam::Vec2;

use super::progress::reset_bricks;
use super::state::{GameEvent, GamePhase, GameState, level_label, score_label};
use crate::engine::{BodyId, BoundEdges, Engine};
use crate::input::{InputState, Key};

/// Advance the run controller by one frame
pub fn tick<W: Engine>(state: &mut GameState, world: &mut W, input: &impl InputState) {
    update_paddle_velocity(state, world, input);
    update_pause_state(state, world, input);
    restart_game(state, world, input);
}

/// Steer the paddle from the held arrow keys. Left wins when both are held.
fn update_paddle_velocity<W: Engine>(state: &GameState, world: &mut W, input: &impl InputState) {
    if state.phase == GamePhase::Paused {
        return;
    }
    let speed = state.settings.paddle.speed;
    let vx = if input.is_down(Key::Left) {
        -speed
    } else if input.is_down(Key::Right) {
        speed
    } else {
        0.0
    };
    world.set_velocity_x(state.paddle.body, vx);
}

/// Flip between Playing and Paused on a pause key press edge
fn update_pause_state<W: Engine>(state: &mut GameState, world: &mut W, input: &impl InputState) {
    if !input.just_pressed(Key::Pause) {
        return;
    }

    match state.phase {
        GamePhase::Playing => {
            world.pause();
            world.set_text_visible(state.hud.pause, true);
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
            log::info!("Paused");
        }
        GamePhase::Paused => {
            world.resume();
            world.set_text_visible(state.hud.pause, false);
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Resumed);
            log::info!("Resumed");
        }
        GamePhase::GameOver => {}
    }
}

/// Full reset while the restart key is held, unless paused
fn restart_game<W: Engine>(state: &mut GameState, world: &mut W, input: &impl InputState) {
    if state.phase == GamePhase::Paused || !input.is_down(Key::Restart) {
        return;
    }

    state.score = 0;
    state.level = 1;
    world.set_text(state.hud.score, &score_label(0));
    world.set_text(state.hud.level, &level_label(1));
    world.set_text_visible(state.hud.game_over, false);

    world.set_position(state.ball.body, state.ball.spawn);
    world.set_velocity(state.ball.body, state.settings.ball.spawn_velocity());
    world.set_collide_world_bounds(state.ball.body, true);

    reset_bricks(state, world);
    world.resume();

    if state.phase == GamePhase::GameOver {
        log::info!("Restarted after game over");
    }
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::Restarted);
}

/// Ball left through the bottom edge: freeze it and end the run
pub fn check_game_over<W: Engine>(
    state: &mut GameState,
    world: &mut W,
    body: BodyId,
    edges: BoundEdges,
) {
    if !edges.down || body != state.ball.body {
        return;
    }
    if state.phase != GamePhase::Playing {
        log::warn!("Bottom bound reached while {:?}, ignoring", state.phase);
        return;
    }

    world.set_velocity(state.ball.body, Vec2::ZERO);
    world.set_collide_world_bounds(state.ball.body, false);
    world.set_text_visible(state.hud.game_over, true);
    world.pause();

    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    log::info!("Game over: score {}, level {}", state.score, state.level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeadlessEngine, PhysicsWorld};
    use crate::input::Keyboard;
    use crate::settings::Settings;

    fn setup() -> (HeadlessEngine, GameState, Keyboard) {
        let mut world = HeadlessEngine::new();
        let state = GameState::new(&mut world, Settings::default());
        (world, state, Keyboard::new())
    }

    fn frame(state: &mut GameState, world: &mut HeadlessEngine, keys: &mut Keyboard, held: &[Key]) {
        keys.set_held(held);
        tick(state, world, &*keys);
    }

    #[test]
    fn test_paddle_follows_keys() {
        let (mut world, mut state, mut keys) = setup();
        let paddle = state.paddle.body;

        frame(&mut state, &mut world, &mut keys, &[Key::Left]);
        assert_eq!(world.velocity(paddle).x, -500.0);
        frame(&mut state, &mut world, &mut keys, &[Key::Right]);
        assert_eq!(world.velocity(paddle).x, 500.0);
        frame(&mut state, &mut world, &mut keys, &[Key::Left, Key::Right]);
        assert_eq!(world.velocity(paddle).x, -500.0);
        frame(&mut state, &mut world, &mut keys, &[]);
        assert_eq!(world.velocity(paddle).x, 0.0);
    }

    #[test]
    fn test_paddle_ignored_while_paused() {
        let (mut world, mut state, mut keys) = setup();
        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        assert_eq!(state.phase, GamePhase::Paused);
        frame(&mut state, &mut world, &mut keys, &[Key::Right]);
        assert_eq!(world.velocity(state.paddle.body).x, 0.0);
    }

    #[test]
    fn test_tick_pause() {
        let (mut world, mut state, mut keys) = setup();

        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(world.is_paused());
        assert!(world.text(state.hud.pause).unwrap().visible);

        // Holding the key is not another press
        for _ in 0..5 {
            frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        }
        assert_eq!(state.phase, GamePhase::Paused);

        frame(&mut state, &mut world, &mut keys, &[]);
        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!world.is_paused());
        assert!(!world.text(state.hud.pause).unwrap().visible);
    }

    #[test]
    fn test_one_flip_per_press() {
        let (mut world, mut state, mut keys) = setup();
        let mut flips = 0;
        for press in 0..7 {
            let before = state.phase;
            frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
            frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
            frame(&mut state, &mut world, &mut keys, &[]);
            if state.phase != before {
                flips += 1;
            }
            let expected = if press % 2 == 0 {
                GamePhase::Paused
            } else {
                GamePhase::Playing
            };
            assert_eq!(state.phase, expected);
        }
        assert_eq!(flips, 7);
    }

    #[test]
    fn test_game_over_freezes_ball() {
        let (mut world, mut state, _) = setup();
        let ball = state.ball.body;
        check_game_over(&mut state, &mut world, ball, BoundEdges::DOWN);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(world.velocity(ball), Vec2::ZERO);
        assert!(!world.body(ball).unwrap().collide_world_bounds);
        assert!(world.is_paused());
        assert!(world.text(state.hud.game_over).unwrap().visible);
    }

    #[test]
    fn test_other_edges_are_not_game_over() {
        let (mut world, mut state, _) = setup();
        let ball = state.ball.body;
        let edges = BoundEdges {
            up: true,
            left: true,
            right: true,
            down: false,
        };
        check_game_over(&mut state, &mut world, ball, edges);
        assert_eq!(state.phase, GamePhase::Playing);

        let paddle = state.paddle.body;
        check_game_over(&mut state, &mut world, paddle, BoundEdges::DOWN);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_not_reachable_from_paused() {
        let (mut world, mut state, mut keys) = setup();
        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        let ball = state.ball.body;
        check_game_over(&mut state, &mut world, ball, BoundEdges::DOWN);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_pause_ignored_during_game_over() {
        let (mut world, mut state, mut keys) = setup();
        let ball = state.ball.body;
        check_game_over(&mut state, &mut world, ball, BoundEdges::DOWN);
        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(world.is_paused());
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut world, mut state, mut keys) = setup();
        state.score = 120;
        state.level = 3;
        state.bricks[2].active = false;
        world.set_enabled(state.bricks[2].body, false);
        world.set_position(state.ball.body, Vec2::new(300.0, 610.0));
        let ball = state.ball.body;
        check_game_over(&mut state, &mut world, ball, BoundEdges::DOWN);

        frame(&mut state, &mut world, &mut keys, &[Key::Restart]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.active_brick_count(), state.bricks.len());
        assert_eq!(world.position(ball), Vec2::new(400.0, 500.0));
        assert_eq!(world.velocity(ball), Vec2::new(150.0, -150.0));
        assert!(world.body(ball).unwrap().collide_world_bounds);
        assert!(!world.is_paused());
        assert!(!world.text(state.hud.game_over).unwrap().visible);
        assert_eq!(world.text(state.hud.score).unwrap().content, "Score: 0");
        assert_eq!(world.text(state.hud.level).unwrap().content, "Level: 1");
    }

    #[test]
    fn test_restart_blocked_while_paused() {
        let (mut world, mut state, mut keys) = setup();
        state.score = 40;
        frame(&mut state, &mut world, &mut keys, &[Key::Pause]);
        frame(&mut state, &mut world, &mut keys, &[Key::Restart]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_simultaneous_pause_and_restart_pauses() {
        let (mut world, mut state, mut keys) = setup();
        state.score = 40;
        frame(&mut state, &mut world, &mut keys, &[Key::Pause, Key::Restart]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, 40);
    }
}
