// Screen capture and editor:
// • C captures one frame of the screen into the canvas.
// • Hold Left Mouse on the canvas to draw freehand strokes.
// • 1..8 (or clicking a toolbar swatch) picks the stroke color.
// • S saves the annotated canvas as screen-capture-edited.png. ESC quits.

mod capture;
mod draw;
mod editor;
mod error;
mod export;
mod types;

use draw::{Drawer, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH, TOOLBAR_HEIGHT};
use editor::Editor;
use error::Error;
use types::Surface;

const TITLE: &str = "Screen Capture Editor";

/// Stroke colors offered in the toolbar, 0x00RRGGBB. Index 0 is the default.
const PALETTE: [u32; 8] = [
    0x00FF0000, // red
    0x0000C000, // green
    0x000000FF, // blue
    0x00FFD800, // yellow
    0x00FF00FF, // magenta
    0x0000C8FF, // cyan
    0x00FFFFFF, // white
    0x00000000, // black
];

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Widget state + window setup ---
       The window opens on a dark placeholder canvas until the first capture. */
    let mut editor = Editor::new();
    let mut selected = 0usize; // toolbar highlight; editor.color is authoritative
    let mut drawer = Drawer::new(TITLE, PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT + TOOLBAR_HEIGHT)?;
    let mut screen = Surface::filled(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT + TOOLBAR_HEIGHT, 0);

    /* --- Pointer edge detection ---
       minifb polls button state; comparing against the previous frame turns
       that into the down/move/up events the editor consumes. */
    let mut was_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Capture: grab one frame, publish it, rebuild the window at the
              capture's pixel size. A refusal is logged and changes nothing. */
        if drawer.capture_pressed() {
            match capture::capture_screen() {
                Ok(img) => match editor.publish_capture(img) {
                    Ok(()) => {
                        if let Some(img) = editor.captured() {
                            let (w, h) = (img.width as usize, img.height as usize);
                            drawer = Drawer::new(TITLE, w, h + TOOLBAR_HEIGHT)?;
                            screen = Surface::filled(w, h + TOOLBAR_HEIGHT, 0);
                            was_down = false;
                        }
                    }
                    Err(e) => log::error!("capture rejected: {e}"),
                },
                Err(e) => log::error!("screen capture failed: {e}"),
            }
        }

        /* 2) Export: write the annotated canvas; a no-op before any capture. */
        if drawer.save_pressed() {
            match export::save_image(&editor) {
                Ok(true) => log::info!("saved {}", export::EXPORT_FILENAME),
                Ok(false) => log::debug!("nothing to save yet"),
                Err(e) => log::error!("export failed: {e}"),
            }
        }

        /* 3) Color selection via number keys. */
        if let Some(i) = drawer.palette_key() {
            selected = i;
            editor.set_color(PALETTE[i]);
        }

        /* 4) Pointer: translate window coordinates into canvas-relative ones
              and feed the gesture edges to the editor. Leaving the canvas
              (into the toolbar or out of the window) ends the stroke. */
        let down = drawer.left_mouse_down();
        let pos = drawer.mouse_pos();
        let canvas_pos = pos.and_then(|(x, y)| {
            (y >= TOOLBAR_HEIGHT).then(|| (x as i32, (y - TOOLBAR_HEIGHT) as i32))
        });

        if down && !was_down {
            match (pos, canvas_pos) {
                (_, Some((x, y))) => editor.pointer_down(x, y),
                (Some((x, y)), None) => {
                    // Click landed on the toolbar: maybe a swatch.
                    if let Some(i) = draw::swatch_hit(x, y, PALETTE.len()) {
                        selected = i;
                        editor.set_color(PALETTE[i]);
                    }
                }
                (None, None) => {}
            }
        } else if down && was_down {
            match canvas_pos {
                Some((x, y)) => editor.pointer_move(x, y),
                None => editor.pointer_up(),
            }
        } else if !down && was_down {
            editor.pointer_up();
        }
        was_down = down;

        /* 5) Compose and present. Overlays (toolbar, placeholder) live only
              in the screen buffer, never on the annotation surface. */
        draw::compose(&mut screen, editor.surface(), &PALETTE, selected);
        drawer.present(&screen)?;
    }

    Ok(())
}
