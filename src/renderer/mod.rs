//! Visual surface
//!
//! The game draws with indexed-colour pixel-art sprites and short text
//! strings. Anything that can place, move and remove those, and scroll a
//! viewport, can display the game. [`Framebuffer`] is the built-in software
//! implementation.

pub mod font;
pub mod framebuffer;
pub mod patterns;

pub use framebuffer::Framebuffer;

use glam::Vec2;

/// Handle to a sprite or text placed on a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

/// Pixel-art pattern. Cell value 0 is transparent, 1 and 2 select palette slots.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub rows: &'static [&'static [u8]],
}

impl Pattern {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Colour ids for pattern cells 1 and 2 (text uses `primary` only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: u8,
    pub secondary: u8,
}

impl Palette {
    pub const fn new(primary: u8, secondary: u8) -> Self {
        Self { primary, secondary }
    }

    /// Single-colour palette for text
    pub const fn solid(color: u8) -> Self {
        Self::new(color, color)
    }

    /// Colour id for a pattern cell, `None` when transparent
    #[inline]
    pub fn resolve(self, cell: u8) -> Option<u8> {
        match cell {
            0 => None,
            1 => Some(self.primary),
            _ => Some(self.secondary),
        }
    }
}

/// Write-only drawing target
pub trait Surface {
    fn place_sprite(&mut self, pattern: &'static Pattern, pos: Vec2, palette: Palette) -> Handle;
    fn place_text(&mut self, text: &str, pos: Vec2, palette: Palette) -> Handle;
    fn move_sprite(&mut self, handle: Handle, pos: Vec2);
    /// Remove a sprite or text. Unknown handles are ignored.
    fn remove(&mut self, handle: Handle);
    fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32);
}
