// Grabs one still frame of the screen and hands it on as an encoded image.
// The platform capture handle lives only for the duration of this call:
// nothing keeps recording after the single frame is read.

use std::io::Cursor;

use image::ImageFormat;
use xcap::Monitor;

use crate::error::Error;
use crate::types::CapturedImage;

/// Capture one frame of the primary monitor and encode it as PNG.
///
/// Any failure (no monitor enumerable, the platform refusing the grab)
/// comes back as `CaptureUnavailable`; the caller's state is untouched and
/// the user may simply retry.
pub fn capture_screen() -> Result<CapturedImage, Error> {
    // 1) Enumerate displays. An empty list is the "nothing to share" case.
    let monitors = Monitor::all()
        .map_err(|e| Error::CaptureUnavailable(format!("enumerate monitors: {e}")))?;
    let monitor = monitors
        .into_iter()
        .next()
        .ok_or_else(|| Error::CaptureUnavailable("no monitor available".into()))?;

    // 2) Grab exactly one frame. The monitor handle drops right after,
    //    so no capture session stays open past this function.
    let frame = monitor
        .capture_image()
        .map_err(|e| Error::CaptureUnavailable(format!("grab frame: {e}")))?;
    let (width, height) = (frame.width(), frame.height());
    log::debug!("captured frame {width}x{height}");

    // 3) Encode the frame as a lossless PNG payload.
    let mut png = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::Encode(format!("encode capture: {e}")))?;

    Ok(CapturedImage { png, width, height })
}
