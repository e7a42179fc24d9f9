//! Sprite patterns and palettes

use super::{Palette, Pattern};

/// Ground tile (8x8)
#[rustfmt::skip]
pub const GROUND: Pattern = Pattern {
    rows: &[
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[1, 2, 1, 1, 1, 1, 2, 1],
        &[1, 1, 1, 2, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 2, 1, 1],
        &[2, 1, 1, 1, 1, 1, 1, 2],
        &[1, 1, 2, 1, 1, 1, 1, 1],
        &[1, 1, 1, 1, 2, 1, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
    ],
};

/// Checkpoint flag (5x10)
#[rustfmt::skip]
pub const CHECKPOINT_FLAG: Pattern = Pattern {
    rows: &[
        &[0, 0, 1, 1, 1],
        &[0, 0, 1, 2, 1],
        &[0, 0, 1, 1, 1],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
    ],
};

/// Goal flag (8x12)
#[rustfmt::skip]
pub const GOAL_FLAG: Pattern = Pattern {
    rows: &[
        &[0, 0, 0, 1, 1, 1, 1, 1],
        &[0, 0, 0, 1, 2, 2, 2, 1],
        &[0, 0, 0, 1, 2, 2, 2, 1],
        &[0, 0, 0, 1, 1, 1, 1, 1],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0],
    ],
};

/// The player slime (6x4)
#[rustfmt::skip]
pub const SLIME: Pattern = Pattern {
    rows: &[
        &[0, 1, 1, 1, 1, 0],
        &[1, 2, 1, 1, 2, 1],
        &[1, 1, 1, 1, 1, 1],
        &[0, 1, 1, 1, 1, 0],
    ],
};

/// Colour ids in the 16-colour palette
pub mod colors {
    pub const BACKGROUND: u8 = 0;
    pub const RED: u8 = 1;
    pub const BROWN: u8 = 6;
    pub const DARK_BROWN: u8 = 8;
    pub const YELLOW: u8 = 9;
    pub const GREEN: u8 = 10;
    pub const LIGHT_BLUE: u8 = 11;
    pub const WHITE: u8 = 15;
}

use colors::*;

pub const GROUND_PALETTE: Palette = Palette::new(BROWN, DARK_BROWN);
pub const CHECKPOINT_PALETTE: Palette = Palette::new(WHITE, YELLOW);
pub const CHECKPOINT_ACTIVE_PALETTE: Palette = Palette::new(GREEN, LIGHT_BLUE);
pub const GOAL_PALETTE: Palette = Palette::new(WHITE, GREEN);
/// Light blue body with white eyes
pub const SLIME_PALETTE: Palette = Palette::new(LIGHT_BLUE, WHITE);

pub const GAME_OVER_TEXT: Palette = Palette::solid(RED);
pub const CLEAR_TEXT: Palette = Palette::solid(GREEN);
pub const PROMPT_TEXT: Palette = Palette::solid(WHITE);

/// RGBA for each colour id
pub const RGBA: [[u8; 4]; 16] = [
    [0x10, 0x10, 0x18, 0xff], // 0 background
    [0xe0, 0x30, 0x30, 0xff], // 1 red
    [0x20, 0x60, 0x30, 0xff], // 2 dark green
    [0x20, 0x30, 0x70, 0xff], // 3 dark blue
    [0x70, 0x30, 0x80, 0xff], // 4 purple
    [0x50, 0x50, 0x58, 0xff], // 5 dark grey
    [0x9a, 0x5c, 0x2c, 0xff], // 6 brown
    [0xb0, 0xb0, 0xb8, 0xff], // 7 light grey
    [0x5e, 0x3a, 0x1c, 0xff], // 8 dark brown
    [0xf8, 0xd8, 0x40, 0xff], // 9 yellow
    [0x40, 0xc8, 0x50, 0xff], // 10 green
    [0x60, 0xc8, 0xf0, 0xff], // 11 light blue
    [0x30, 0x60, 0xe0, 0xff], // 12 blue
    [0xf0, 0x90, 0xb0, 0xff], // 13 pink
    [0xf0, 0x90, 0x30, 0xff], // 14 orange
    [0xf8, 0xf8, 0xf8, 0xff], // 15 white
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_sizes() {
        for (pattern, w, h) in [
            (&GROUND, 8, 8),
            (&CHECKPOINT_FLAG, 5, 10),
            (&GOAL_FLAG, 8, 12),
            (&SLIME, 6, 4),
        ] {
            assert_eq!(pattern.width(), w);
            assert_eq!(pattern.height(), h);
            assert!(pattern.rows.iter().all(|r| r.len() == w));
        }
    }
}
