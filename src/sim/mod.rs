//! Game simulation
//!
//! All gameplay rules live here. Motion and overlap detection belong to the
//! engine; this module only reacts:
//! - `layout`: brick grid placement
//! - `collision`: paddle steering and brick breaking
//! - `progress`: score, level advance, field reset
//! - `tick`: pause, restart and game over

pub mod collision;
pub mod layout;
pub mod progress;
pub mod state;
pub mod tick;

pub use collision::{BrickHit, ball_hit_brick, ball_hit_paddle, paddle_deflection};
pub use layout::{BrickPlacement, BrickVariant, brick_count, brick_layout, column_count};
pub use progress::{advance_level, award_brick, reset_bricks};
pub use state::{Ball, Brick, BrickId, GameEvent, GamePhase, GameState, Hud, Paddle, Snapshot};
pub use tick::{check_game_over, tick};
