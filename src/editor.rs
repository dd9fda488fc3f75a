// The annotation state machine: owns the captured payload, the drawing
// surface, the active stroke color and the pointer gesture. Every mutation
// of widget state goes through one of the methods below, so the whole
// drawing behavior is testable without a window.

use crate::draw;
use crate::error::Error;
use crate::types::{CapturedImage, Surface};

/// Default stroke color: red.
pub const DEFAULT_COLOR: u32 = 0x00FF0000;

/// Pointer gesture. `Drawing` exists only between a pointer-down and the
/// matching pointer-up (or the pointer leaving the canvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Drawing { last: (i32, i32) },
}

pub struct Editor {
    captured: Option<CapturedImage>,
    surface: Option<Surface>,
    color: u32,
    gesture: Gesture,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            captured: None,
            surface: None,
            color: DEFAULT_COLOR,
            gesture: Gesture::Idle,
        }
    }

    /// Install a fresh capture: decode it, size a new surface to the bitmap
    /// and draw the base image into it. Any strokes on the previous surface
    /// are discarded and the gesture resets to idle.
    ///
    /// Decoding happens before any state is touched, so a corrupt payload
    /// leaves the previous capture and surface fully intact.
    pub fn publish_capture(&mut self, img: CapturedImage) -> Result<(), Error> {
        let decoded = image::load_from_memory(&img.png)
            .map_err(|e| Error::Decode(format!("decode capture: {e}")))?
            .to_rgb8();
        let (w, h) = decoded.dimensions();

        let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
        for px in decoded.pixels() {
            let [r, g, b] = px.0;
            pixels.push(((r as u32) << 16) | ((g as u32) << 8) | (b as u32));
        }

        self.surface = Some(Surface {
            width: w as usize,
            height: h as usize,
            pixels,
        });
        self.captured = Some(img);
        self.gesture = Gesture::Idle;
        log::info!("capture published, canvas is {w}x{h}");
        Ok(())
    }

    /// Pointer down inside the canvas: begin a stroke at (x, y).
    /// Ignored before the first capture (there is nothing to draw on).
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        if self.surface.is_none() {
            return;
        }
        self.gesture = Gesture::Drawing { last: (x, y) };
    }

    /// Pointer moved to (x, y). While drawing, paint one straight segment
    /// from the previous point in the current color, then restart the path
    /// at (x, y). Moves while idle are no-ops.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        let Gesture::Drawing { last } = self.gesture else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            draw::draw_segment(surface, last.0, last.1, x, y, self.color);
        }
        self.gesture = Gesture::Drawing { last: (x, y) };
    }

    /// Pointer released, or it left the canvas bounds: close the stroke.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Select the color for subsequent segments. Existing strokes keep
    /// the color they were drawn with.
    pub fn set_color(&mut self, color: u32) {
        self.color = color;
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// The most recently published capture payload, if any.
    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    /// A capture payload of `w` x `h` pixels, all one color.
    fn solid_capture(w: u32, h: u32, rgb: [u8; 3]) -> CapturedImage {
        let img = RgbImage::from_pixel(w, h, Rgb(rgb));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        CapturedImage {
            png,
            width: w,
            height: h,
        }
    }

    #[test]
    fn surface_matches_capture_dimensions() {
        let mut editor = Editor::new();
        editor.publish_capture(solid_capture(40, 30, [9, 9, 9])).unwrap();
        let surface = editor.surface().unwrap();
        assert_eq!((surface.width, surface.height), (40, 30));
        let captured = editor.captured().unwrap();
        assert_eq!((captured.width, captured.height), (40, 30));
    }

    #[test]
    fn corrupt_payload_leaves_state_untouched() {
        let mut editor = Editor::new();
        editor
            .publish_capture(solid_capture(16, 16, [1, 2, 3]))
            .unwrap();
        let before = editor.surface().unwrap().clone();

        let corrupt = CapturedImage {
            png: b"definitely not a png".to_vec(),
            width: 16,
            height: 16,
        };
        assert!(editor.publish_capture(corrupt).is_err());
        assert!(editor.captured().is_some());
        assert_eq!(*editor.surface().unwrap(), before);
    }

    #[test]
    fn republish_discards_prior_strokes() {
        let mut editor = Editor::new();
        editor
            .publish_capture(solid_capture(32, 32, [255, 255, 255]))
            .unwrap();
        editor.pointer_down(5, 5);
        editor.pointer_move(20, 20);
        editor.pointer_up();
        assert!(editor.surface().unwrap().pixels.contains(&DEFAULT_COLOR));

        editor
            .publish_capture(solid_capture(32, 32, [255, 255, 255]))
            .unwrap();
        let surface = editor.surface().unwrap();
        assert!(surface.pixels.iter().all(|&p| p == 0x00FFFFFF));
    }

    #[test]
    fn moves_while_idle_change_no_pixels() {
        let mut editor = Editor::new();
        editor
            .publish_capture(solid_capture(32, 32, [255, 255, 255]))
            .unwrap();
        let before = editor.surface().unwrap().clone();
        editor.pointer_move(3, 3);
        editor.pointer_move(30, 30);
        assert_eq!(*editor.surface().unwrap(), before);
    }

    #[test]
    fn down_before_any_capture_is_ignored() {
        let mut editor = Editor::new();
        editor.pointer_down(4, 4);
        editor.pointer_move(8, 8);
        assert!(editor.surface().is_none());
    }

    #[test]
    fn stroke_uses_the_then_current_color() {
        let mut editor = Editor::new();
        editor
            .publish_capture(solid_capture(64, 64, [255, 255, 255]))
            .unwrap();

        // First stroke in the default red.
        editor.pointer_down(10, 10);
        editor.pointer_move(20, 20);
        editor.pointer_up();
        let surface = editor.surface().unwrap();
        assert_eq!(surface.pixels[15 * 64 + 15], DEFAULT_COLOR);
        assert_eq!(surface.pixels[10 * 64 + 10], DEFAULT_COLOR);
        assert_eq!(surface.pixels[20 * 64 + 20], DEFAULT_COLOR);

        // A color change after pointer-up affects only the next stroke.
        editor.set_color(0x0000FF00);
        editor.pointer_down(40, 40);
        editor.pointer_move(50, 40);
        editor.pointer_up();
        let surface = editor.surface().unwrap();
        assert_eq!(surface.pixels[40 * 64 + 45], 0x0000FF00);
        assert_eq!(surface.pixels[15 * 64 + 15], DEFAULT_COLOR);
    }

    #[test]
    fn stroke_ends_when_pointer_leaves_canvas() {
        let mut editor = Editor::new();
        editor
            .publish_capture(solid_capture(32, 32, [255, 255, 255]))
            .unwrap();
        editor.pointer_down(5, 5);
        editor.pointer_up(); // pointer left the canvas
        let before = editor.surface().unwrap().clone();
        editor.pointer_move(25, 25); // re-entry without a new press
        assert_eq!(*editor.surface().unwrap(), before);
    }
}
