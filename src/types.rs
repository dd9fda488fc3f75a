// Core types shared by capture, editor and export.

/// The mutable raster the base image and all strokes are composited into.
/// Its dimensions are fixed from one capture until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,     // pixels
    pub height: usize,    // pixels
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl Surface {
    /// A surface with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }
}

/// One successful screen grab, kept as its encoded lossless payload.
/// Replaced wholesale by the next capture; never mutated in place.
#[derive(Clone)]
pub struct CapturedImage {
    pub png: Vec<u8>, // lossless PNG bytes
    pub width: u32,
    pub height: u32,
}
