//! Session lifecycle
//!
//! A session is mounted onto an engine, driven one frame at a time by the
//! host, and unmounted exactly once. Dropping a mounted session unmounts it.

use crate::engine::Engine;
use crate::input::InputState;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, tick};

pub struct Session<E: Engine> {
    engine: E,
    state: GameState,
    mounted: bool,
}

impl<E: Engine> Session<E> {
    /// Build the ball, paddle, bricks and HUD on `engine` and start playing
    pub fn mount(mut engine: E, settings: Settings) -> Self {
        let state = GameState::new(&mut engine, settings);
        log::info!("Session mounted");
        Self {
            engine,
            state,
            mounted: true,
        }
    }

    /// Run one frame: controller tick first, then the engine step that
    /// delivers contacts
    pub fn frame(&mut self, dt: f32, input: &impl InputState) {
        if !self.mounted {
            return;
        }
        tick(&mut self.state, &mut self.engine, input);
        self.engine.step(dt, &mut self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access for hosts that feed it contacts or positions
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(&self.engine)
    }

    /// Tear down the engine and end the session
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.engine.destroy();
        log::info!(
            "Session unmounted (score {}, level {})",
            self.state.score,
            self.state.level
        );
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
