//! Software surface
//!
//! Keeps every placed sprite and text by handle and rasterizes the current
//! viewport into a buffer of colour ids on demand. Items are drawn in
//! placement order, so later placements cover earlier ones.

use std::collections::BTreeMap;

use glam::Vec2;

use super::font::{ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, lit};
use super::patterns::{RGBA, colors};
use super::{Handle, Palette, Pattern, Surface};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug)]
enum Item {
    Sprite {
        pattern: &'static Pattern,
        pos: Vec2,
        palette: Palette,
    },
    Text {
        text: String,
        pos: Vec2,
        palette: Palette,
    },
}

/// Visible window into world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
}

/// Indexed-colour software renderer
#[derive(Debug)]
pub struct Framebuffer {
    items: BTreeMap<Handle, Item>,
    next_id: u32,
    viewport: Viewport,
    pixels: Vec<u8>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Framebuffer at the game's logical resolution
    pub fn new() -> Self {
        let width = SCREEN_WIDTH as usize;
        let height = SCREEN_HEIGHT as usize;
        Self {
            items: BTreeMap::new(),
            next_id: 1,
            viewport: Viewport {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            pixels: vec![colors::BACKGROUND; width * height],
        }
    }

    fn insert(&mut self, item: Item) -> Handle {
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sprite_count(&self) -> usize {
        self.items
            .values()
            .filter(|item| matches!(item, Item::Sprite { .. }))
            .count()
    }

    /// Position and palette of a live sprite
    pub fn sprite(&self, handle: Handle) -> Option<(Vec2, Palette)> {
        match self.items.get(&handle)? {
            Item::Sprite { pos, palette, .. } => Some((*pos, *palette)),
            Item::Text { .. } => None,
        }
    }

    /// Live texts in placement order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2)> + '_ {
        self.items.values().filter_map(|item| match item {
            Item::Text { text, pos, .. } => Some((text.as_str(), *pos)),
            Item::Sprite { .. } => None,
        })
    }

    /// Rasterize the viewport and return the colour ids, row-major
    pub fn compose(&mut self) -> &[u8] {
        self.pixels.fill(colors::BACKGROUND);
        let origin = Vec2::new(self.viewport.x, self.viewport.y);

        for item in self.items.values() {
            match item {
                Item::Sprite {
                    pattern,
                    pos,
                    palette,
                } => {
                    let screen = (*pos - origin).floor();
                    for (dy, row) in pattern.rows.iter().enumerate() {
                        for (dx, &cell) in row.iter().enumerate() {
                            if let Some(color) = palette.resolve(cell) {
                                put_pixel(
                                    &mut self.pixels,
                                    &self.viewport,
                                    screen.x as i32 + dx as i32,
                                    screen.y as i32 + dy as i32,
                                    color,
                                );
                            }
                        }
                    }
                }
                Item::Text { text, pos, palette } => {
                    let screen = (*pos - origin).floor();
                    for (i, c) in text.chars().enumerate() {
                        let Some(rows) = glyph(c) else { continue };
                        let gx = screen.x as i32 + (i * ADVANCE) as i32;
                        for (dy, &row) in rows.iter().enumerate().take(GLYPH_HEIGHT) {
                            for dx in 0..GLYPH_WIDTH {
                                if lit(row, dx) {
                                    put_pixel(
                                        &mut self.pixels,
                                        &self.viewport,
                                        gx + dx as i32,
                                        screen.y as i32 + dy as i32,
                                        palette.primary,
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }

        &self.pixels
    }

    /// Colour ids from the last `compose`, expanded to RGBA8
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&id| RGBA[(id & 0x0f) as usize])
            .collect()
    }

    /// Text dump of the last `compose`, one line per row
    pub fn to_ascii(&self) -> String {
        const CHARS: &[u8; 16] = b" rgbp.#:%yGoBkO@";
        let mut out = String::with_capacity((self.viewport.width + 1) * self.viewport.height);
        for row in self.pixels.chunks(self.viewport.width) {
            out.extend(row.iter().map(|&id| CHARS[(id & 0x0f) as usize] as char));
            out.push('\n');
        }
        out
    }
}

fn put_pixel(pixels: &mut [u8], viewport: &Viewport, x: i32, y: i32, color: u8) {
    if x < 0 || y < 0 || x as usize >= viewport.width || y as usize >= viewport.height {
        return;
    }
    pixels[y as usize * viewport.width + x as usize] = color;
}

impl Surface for Framebuffer {
    fn place_sprite(&mut self, pattern: &'static Pattern, pos: Vec2, palette: Palette) -> Handle {
        self.insert(Item::Sprite {
            pattern,
            pos,
            palette,
        })
    }

    fn place_text(&mut self, text: &str, pos: Vec2, palette: Palette) -> Handle {
        self.insert(Item::Text {
            text: text.to_owned(),
            pos,
            palette,
        })
    }

    fn move_sprite(&mut self, handle: Handle, new_pos: Vec2) {
        if let Some(Item::Sprite { pos, .. }) = self.items.get_mut(&handle) {
            *pos = new_pos;
        }
    }

    fn remove(&mut self, handle: Handle) {
        self.items.remove(&handle);
    }

    fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let width = width.max(1.0) as usize;
        let height = height.max(1.0) as usize;
        if width != self.viewport.width || height != self.viewport.height {
            self.pixels = vec![colors::BACKGROUND; width * height];
        }
        self.viewport = Viewport {
            x,
            y,
            width,
            height,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::patterns::{GROUND, GROUND_PALETTE, SLIME, SLIME_PALETTE};

    fn pixel(fb: &Framebuffer, x: usize, y: usize) -> u8 {
        fb.pixels[y * fb.viewport.width + x]
    }

    #[test]
    fn test_sprite_is_drawn_relative_to_viewport() {
        let mut fb = Framebuffer::new();
        fb.place_sprite(&GROUND, Vec2::new(40.0, 100.0), GROUND_PALETTE);

        fb.compose();
        assert_eq!(pixel(&fb, 40, 100), GROUND_PALETTE.primary);
        assert_eq!(pixel(&fb, 41, 101), GROUND_PALETTE.secondary);
        assert_eq!(pixel(&fb, 39, 100), colors::BACKGROUND);

        fb.set_viewport(32.0, 0.0, 160.0, 120.0);
        fb.compose();
        assert_eq!(pixel(&fb, 8, 100), GROUND_PALETTE.primary);
        assert_eq!(pixel(&fb, 40, 100), colors::BACKGROUND);
    }

    #[test]
    fn test_transparent_cells_keep_background() {
        let mut fb = Framebuffer::new();
        fb.place_sprite(&GROUND, Vec2::new(0.0, 0.0), GROUND_PALETTE);
        fb.place_sprite(&SLIME, Vec2::new(0.0, 0.0), SLIME_PALETTE);
        fb.compose();
        // Slime corner is transparent, ground shows through
        assert_eq!(pixel(&fb, 0, 0), GROUND_PALETTE.primary);
        assert_eq!(pixel(&fb, 1, 0), SLIME_PALETTE.primary);
    }

    #[test]
    fn test_clipping_at_edges() {
        let mut fb = Framebuffer::new();
        fb.place_sprite(&GROUND, Vec2::new(-4.0, 116.0), GROUND_PALETTE);
        fb.place_sprite(&GROUND, Vec2::new(156.0, -4.0), GROUND_PALETTE);
        fb.compose();
        assert_eq!(pixel(&fb, 0, 116), GROUND_PALETTE.primary);
        assert_eq!(pixel(&fb, 159, 0), GROUND_PALETTE.primary);
    }

    #[test]
    fn test_move_and_remove() {
        let mut fb = Framebuffer::new();
        let h = fb.place_sprite(&SLIME, Vec2::new(4.0, 96.0), SLIME_PALETTE);
        fb.move_sprite(h, Vec2::new(10.0, 96.0));
        assert_eq!(fb.sprite(h), Some((Vec2::new(10.0, 96.0), SLIME_PALETTE)));

        fb.remove(h);
        assert_eq!(fb.sprite(h), None);
        assert_eq!(fb.sprite_count(), 0);
        fb.remove(h);
    }

    #[test]
    fn test_text_rendering() {
        let mut fb = Framebuffer::new();
        let h = fb.place_text("T", Vec2::new(10.0, 20.0), Palette::solid(15));
        assert_eq!(fb.texts().collect::<Vec<_>>(), vec![("T", Vec2::new(10.0, 20.0))]);
        assert_eq!(fb.sprite(h), None);

        fb.compose();
        assert_eq!(pixel(&fb, 10, 20), 15);
        assert_eq!(pixel(&fb, 11, 21), 15);
        assert_eq!(pixel(&fb, 10, 21), colors::BACKGROUND);
    }

    #[test]
    fn test_output_formats() {
        let mut fb = Framebuffer::new();
        fb.compose();
        assert_eq!(fb.to_rgba().len(), 160 * 120 * 4);
        let ascii = fb.to_ascii();
        assert_eq!(ascii.lines().count(), 120);
        assert!(ascii.lines().all(|l| l.len() == 160));
    }
}
