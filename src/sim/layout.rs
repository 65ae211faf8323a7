//! Brick grid layout
//!
//! Columns are as many brick cells as fit across the field width; rows are
//! fixed. Positions are brick centers, matching how bodies are placed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::FieldSettings;

/// Cosmetic brick color, cycled across the grid diagonally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickVariant {
    Yellow,
    Green,
    Blue,
}

impl BrickVariant {
    pub const PALETTE: [BrickVariant; 3] =
        [BrickVariant::Yellow, BrickVariant::Green, BrickVariant::Blue];

    /// Variant for a grid cell
    pub fn for_cell(row: u32, col: u32) -> Self {
        Self::PALETTE[((row + col) as usize) % Self::PALETTE.len()]
    }

    /// RGB fill color
    pub fn color(self) -> u32 {
        match self {
            BrickVariant::Yellow => 0xd8d839,
            BrickVariant::Green => 0x93df76,
            BrickVariant::Blue => 0x76badf,
        }
    }
}

/// Where one brick goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickPlacement {
    pub row: u32,
    pub col: u32,
    pub position: Vec2,
    pub variant: BrickVariant,
}

/// Number of brick columns that fit the field
pub fn column_count(field: &FieldSettings) -> u32 {
    let cell = field.brick_width + field.brick_spacing;
    if cell <= 0.0 || field.width <= 0.0 {
        return 0;
    }
    (field.width / cell).floor() as u32
}

/// Total bricks in the grid
pub fn brick_count(field: &FieldSettings) -> usize {
    field.brick_rows as usize * column_count(field) as usize
}

/// Compute every brick placement, row-major
pub fn brick_layout(field: &FieldSettings) -> Vec<BrickPlacement> {
    let cols = column_count(field);
    let pitch = Vec2::new(
        field.brick_width + field.brick_spacing,
        field.brick_height + field.brick_spacing,
    );

    let mut placements = Vec::with_capacity(brick_count(field));
    for row in 0..field.brick_rows {
        for col in 0..cols {
            placements.push(BrickPlacement {
                row,
                col,
                position: Vec2::new(
                    field.left_margin + col as f32 * pitch.x,
                    field.top_margin + row as f32 * pitch.y,
                ),
                variant: BrickVariant::for_cell(row, col),
            });
        }
    }
    placements
}
