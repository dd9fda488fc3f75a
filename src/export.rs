// Serializes the annotated surface to PNG and writes the download file.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::editor::Editor;
use crate::error::Error;
use crate::types::Surface;

/// Fixed name of the exported file, written to the working directory.
pub const EXPORT_FILENAME: &str = "screen-capture-edited.png";

/// Encode the surface losslessly; decoding the result gives back the exact
/// pixel content of the surface.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>, Error> {
    let mut img = RgbImage::new(surface.width as u32, surface.height as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let p = surface.pixels[(y as usize) * surface.width + (x as usize)];
        *px = Rgb([(p >> 16) as u8, (p >> 8) as u8, p as u8]);
    }
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::Encode(format!("encode surface: {e}")))?;
    Ok(png)
}

/// Write the current canvas to EXPORT_FILENAME in the working directory.
/// With no capture yet there is nothing to save: Ok(false), no file touched.
pub fn save_image(editor: &Editor) -> Result<bool, Error> {
    save_image_in(editor, Path::new("."))
}

/// Same as `save_image`, but into an explicit directory.
pub fn save_image_in(editor: &Editor, dir: &Path) -> Result<bool, Error> {
    let Some(surface) = editor.surface() else {
        return Ok(false);
    };
    let png = encode_png(surface)?;
    let path = dir.join(EXPORT_FILENAME);
    std::fs::write(&path, &png)
        .map_err(|e| Error::Export(format!("write {}: {e}", path.display())))?;
    Ok(true)
}
