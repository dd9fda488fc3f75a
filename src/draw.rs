// Window + software drawing utilities.
// Three jobs live here:
// 1) `Drawer`: the on-screen window, key polling and mouse polling.
// 2) Pixel-level primitives (put_pixel, the 2-px stroke segment).
// 3) Frame composition: toolbar strip + canvas, built fresh each frame so
//    overlays are never burned into the annotation surface.

use crate::error::Error;
use crate::types::Surface;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Height of the color toolbar drawn above the canvas.
pub const TOOLBAR_HEIGHT: usize = 28;
/// Canvas size shown before the first capture.
pub const PLACEHOLDER_WIDTH: usize = 800;
pub const PLACEHOLDER_HEIGHT: usize = 450;
/// Stroke width of every annotation segment, in pixels.
pub const STROKE_WIDTH: i32 = 2;

const SWATCH_SIZE: usize = 18;
const SWATCH_GAP: usize = 6;
const TOOLBAR_BG: u32 = 0x002B2B2B;
const PLACEHOLDER_BG: u32 = 0x001A1A1A;
const HIGHLIGHT: u32 = 0x00FFFFFF;

const PALETTE_KEYS: [Key; 8] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the composed frame (toolbar + canvas).
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the composed pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &Surface) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// C requests a fresh screen capture.
    pub fn capture_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// S exports the current canvas to a PNG file.
    pub fn save_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Number keys 1..=8 select a palette color; None when no key was hit.
    pub fn palette_key(&self) -> Option<usize> {
        PALETTE_KEYS
            .iter()
            .position(|&k| self.window.is_key_pressed(k, KeyRepeat::No))
    }

    /// Mouse position in window pixel coordinates.
    /// None once the pointer has left the window, which must end any stroke.
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    /// True while the left button is held; drives the drawing gesture.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/* ---------- Software drawing: pixels and stroke segments ---------- */

/// Put a pixel on the surface if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut Surface, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw one straight stroke segment from (x0,y0) to (x1,y1) using Bresenham,
/// thickened to STROKE_WIDTH by stamping a 2x2 block at every step.
pub fn draw_segment(fb: &mut Surface, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        for oy in 0..STROKE_WIDTH {
            for ox in 0..STROKE_WIDTH {
                put_pixel(fb, x0 + ox, y0 + oy, color);
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn fill_rect(fb: &mut Surface, x: usize, y: usize, w: usize, h: usize, color: u32) {
    for row in y..(y + h).min(fb.height) {
        for col in x..(x + w).min(fb.width) {
            fb.pixels[row * fb.width + col] = color;
        }
    }
}

/* ---------- Frame composition: toolbar + canvas ---------- */

fn swatch_origin(index: usize) -> (usize, usize) {
    let x = SWATCH_GAP + index * (SWATCH_SIZE + SWATCH_GAP);
    let y = (TOOLBAR_HEIGHT - SWATCH_SIZE) / 2;
    (x, y)
}

/// Which palette swatch (if any) sits under a toolbar-area click.
pub fn swatch_hit(x: usize, y: usize, count: usize) -> Option<usize> {
    for i in 0..count {
        let (sx, sy) = swatch_origin(i);
        if x >= sx && x < sx + SWATCH_SIZE && y >= sy && y < sy + SWATCH_SIZE {
            return Some(i);
        }
    }
    None
}

/// Build the frame shown in the window: toolbar swatches on top, then either
/// the annotation surface or the pre-capture placeholder. `screen` must be
/// sized to the canvas plus the toolbar strip.
pub fn compose(screen: &mut Surface, surface: Option<&Surface>, palette: &[u32], selected: usize) {
    // Toolbar strip with one swatch per palette color.
    fill_rect(screen, 0, 0, screen.width, TOOLBAR_HEIGHT, TOOLBAR_BG);
    for (i, &color) in palette.iter().enumerate() {
        let (sx, sy) = swatch_origin(i);
        fill_rect(screen, sx, sy, SWATCH_SIZE, SWATCH_SIZE, color);
        if i == selected {
            // 1-px outline around the active color.
            fill_rect(screen, sx - 1, sy - 1, SWATCH_SIZE + 2, 1, HIGHLIGHT);
            fill_rect(screen, sx - 1, sy + SWATCH_SIZE, SWATCH_SIZE + 2, 1, HIGHLIGHT);
            fill_rect(screen, sx - 1, sy, 1, SWATCH_SIZE, HIGHLIGHT);
            fill_rect(screen, sx + SWATCH_SIZE, sy, 1, SWATCH_SIZE, HIGHLIGHT);
        }
    }

    // Canvas area: the annotated raster, or a dark placeholder before the
    // first capture.
    match surface {
        Some(surface) => {
            let rows = surface.height.min(screen.height - TOOLBAR_HEIGHT);
            let cols = surface.width.min(screen.width);
            for y in 0..rows {
                let src = y * surface.width;
                let dst = (TOOLBAR_HEIGHT + y) * screen.width;
                screen.pixels[dst..dst + cols].copy_from_slice(&surface.pixels[src..src + cols]);
            }
        }
        None => {
            let h = screen.height - TOOLBAR_HEIGHT;
            fill_rect(screen, 0, TOOLBAR_HEIGHT, screen.width, h, PLACEHOLDER_BG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut fb = Surface::filled(4, 4, 0);
        put_pixel(&mut fb, -1, 2, 0x00FF0000);
        put_pixel(&mut fb, 4, 0, 0x00FF0000);
        put_pixel(&mut fb, 0, 9, 0x00FF0000);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn segment_is_two_pixels_wide() {
        let mut fb = Surface::filled(32, 32, 0);
        draw_segment(&mut fb, 5, 10, 15, 10, 0x0000FF00);
        // Both rows of the 2-px stroke are painted along the whole span.
        for x in 5..=15 {
            assert_eq!(fb.pixels[10 * 32 + x], 0x0000FF00);
            assert_eq!(fb.pixels[11 * 32 + x], 0x0000FF00);
        }
        // Rows outside the stroke stay untouched.
        assert_eq!(fb.pixels[9 * 32 + 10], 0);
        assert_eq!(fb.pixels[12 * 32 + 10], 0);
    }

    #[test]
    fn diagonal_segment_connects_its_endpoints() {
        let mut fb = Surface::filled(32, 32, 0);
        draw_segment(&mut fb, 10, 10, 20, 20, 0x00FF0000);
        for i in 10..=20 {
            assert_eq!(fb.pixels[i * 32 + i], 0x00FF0000);
        }
    }

    #[test]
    fn swatch_hit_maps_clicks_to_palette_indices() {
        let (sx, sy) = swatch_origin(2);
        assert_eq!(swatch_hit(sx + 1, sy + 1, 8), Some(2));
        assert_eq!(swatch_hit(0, 0, 8), None);
        // A click past the last swatch selects nothing.
        assert_eq!(swatch_hit(sx + 1, sy + 1, 2), None);
    }
}
