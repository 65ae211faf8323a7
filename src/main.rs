//! Brick Breaker headless runner
//!
//! Mounts a session on the headless engine and drives it either from a JSON
//! replay script or from a seeded attract-mode autopilot, then prints the
//! final snapshot as JSON.

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;

use brick_breaker::engine::{BoundEdges, HeadlessEngine, PhysicsWorld, ScriptedEvent};
use brick_breaker::input::{Key, Keyboard};
use brick_breaker::sim::GamePhase;
use brick_breaker::{Error, Result, Session, Settings};

const DT: f32 = 1.0 / 60.0;

/// Contact injected by a replay frame
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayContact {
    /// Ball touches the paddle, optionally from a given x position
    Paddle { ball_x: Option<f32> },
    /// Ball touches the brick at this grid index
    Brick { index: usize },
    /// Ball falls out the bottom
    Bottom,
}

#[derive(Debug, Clone, Deserialize)]
struct ReplayFrame {
    #[serde(default)]
    held: Vec<Key>,
    #[serde(default)]
    contacts: Vec<ReplayContact>,
    /// Run this frame this many times (contacts only on the first)
    #[serde(default = "one")]
    repeat: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
struct Replay {
    #[serde(default)]
    settings: Option<Settings>,
    frames: Vec<ReplayFrame>,
}

impl Replay {
    fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn from_json(json: &str) -> Result<Self> {
        let replay: Replay = serde_json::from_str(json)?;
        if let Some(settings) = &replay.settings {
            settings.validate()?;
        }
        Ok(replay)
    }
}

/// Drive a headless Brick Breaker session and print the final snapshot
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Settings JSON (overrides settings embedded in the script)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Replay script JSON; without one the attract-mode autopilot plays
    #[arg(long)]
    script: Option<PathBuf>,
    /// Attract-mode RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Attract-mode frame count
    #[arg(long, default_value_t = 3600)]
    frames: u32,
}

fn inject(session: &mut Session<HeadlessEngine>, contact: &ReplayContact) {
    let ball = session.state().ball.body;
    let event = match *contact {
        ReplayContact::Paddle { ball_x } => {
            if let Some(x) = ball_x {
                let y = session.engine().position(ball).y;
                session.engine_mut().set_position(ball, Vec2::new(x, y));
            }
            ScriptedEvent::PaddleContact
        }
        ReplayContact::Brick { index } => match session.state().bricks.get(index) {
            Some(brick) => ScriptedEvent::BrickContact { brick: brick.body },
            None => {
                log::warn!("Replay references missing brick {}", index);
                return;
            }
        },
        ReplayContact::Bottom => ScriptedEvent::WorldBound {
            body: ball,
            edges: BoundEdges::DOWN,
        },
    };
    session.engine_mut().queue(event);
}

fn run_replay(session: &mut Session<HeadlessEngine>, replay: &Replay) {
    let mut keys = Keyboard::new();
    for frame in &replay.frames {
        for contact in &frame.contacts {
            inject(session, contact);
        }
        for _ in 0..frame.repeat.max(1) {
            keys.set_held(&frame.held);
            session.frame(DT, &keys);
            log_events(session);
        }
    }
}

/// Autopilot: wiggles the paddle, breaks random bricks, sometimes misses
fn run_attract(session: &mut Session<HeadlessEngine>, seed: u64, frames: u32) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut keys = Keyboard::new();

    for _ in 0..frames {
        let mut held = Vec::new();
        match session.state().phase {
            GamePhase::GameOver => {
                if rng.random_bool(0.05) {
                    held.push(Key::Restart);
                }
            }
            GamePhase::Paused => {
                if rng.random_bool(0.1) {
                    held.push(Key::Pause);
                }
            }
            GamePhase::Playing => {
                match rng.random_range(0..3) {
                    0 => held.push(Key::Left),
                    1 => held.push(Key::Right),
                    _ => {}
                }
                if rng.random_bool(0.002) {
                    held.push(Key::Pause);
                }

                let active: Vec<usize> = session
                    .state()
                    .bricks
                    .iter()
                    .filter(|b| b.active)
                    .map(|b| b.id.0)
                    .collect();
                if !active.is_empty() && rng.random_bool(0.1) {
                    let index = active[rng.random_range(0..active.len())];
                    inject(session, &ReplayContact::Brick { index });
                }
                if rng.random_bool(0.03) {
                    let paddle_x = session
                        .engine()
                        .position(session.state().paddle.body)
                        .x;
                    let offset = rng.random_range(-50.0..50.0);
                    inject(
                        session,
                        &ReplayContact::Paddle {
                            ball_x: Some(paddle_x + offset),
                        },
                    );
                }
                if rng.random_bool(0.001) {
                    inject(session, &ReplayContact::Bottom);
                }
            }
        }

        keys.set_held(&held);
        session.frame(DT, &keys);
        log_events(session);
    }
}

fn log_events(session: &mut Session<HeadlessEngine>) {
    for event in session.drain_events() {
        log::debug!("{:?}", event);
    }
}

fn run(args: Args) -> Result<()> {
    let replay = args.script.as_deref().map(Replay::load).transpose()?;
    let settings = match (&args.settings, replay.as_ref().and_then(|r| r.settings.clone())) {
        (Some(path), _) => Settings::load(path)?,
        (None, Some(settings)) => settings,
        (None, None) => Settings::default(),
    };

    let mut session = Session::mount(HeadlessEngine::new(), settings);
    match &replay {
        Some(replay) => {
            log::info!("Replaying {} frames", replay.frames.len());
            run_replay(&mut session, replay);
        }
        None => {
            log::info!("Attract mode: seed {}, {} frames", args.seed, args.frames);
            run_attract(&mut session, args.seed, args.frames);
        }
    }

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    session.unmount();
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
