// One error type for the whole widget.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame buffer to the window failed
    #[error("Screen capture unavailable: {0}")]
    CaptureUnavailable(String), // No monitor, or the platform refused the grab
    #[error("Capture decode error: {0}")]
    Decode(String), // The captured payload did not decode to a bitmap
    #[error("PNG encode error: {0}")]
    Encode(String), // Serializing a raster to PNG failed
    #[error("Export write error: {0}")]
    Export(String), // Writing the exported file failed
}
