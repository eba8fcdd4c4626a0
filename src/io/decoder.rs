//! Decoder capability - turning captured frames into QR payloads
//!
//! Decode internals stay in the external `rqrr` library; this module only
//! adapts raw frame buffers to it.

use crate::domain::types::Frame;
use image::{DynamicImage, RgbaImage};
use parking_lot::Mutex;
use tracing::debug;

/// Frame-to-payload capability.
pub trait Decoder: Send + Sync {
    /// Decode one frame. `None` means no code in the frame - the expected
    /// steady state while the user lines the code up, never an error.
    fn decode(&self, frame: &Frame) -> Option<String>;
}

/// QR decoder backed by the external `rqrr` library.
#[derive(Default)]
pub struct QrDecoder;

impl QrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for QrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())?;
        let luma = DynamicImage::ImageRgba8(rgba).into_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            frame.width as usize,
            frame.height as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, content)) => return Some(content),
                // A misdetected grid in a noisy frame; keep looking
                Err(e) => debug!(error = %e, "qr_grid_decode_failed"),
            }
        }
        None
    }
}

/// Decoder that yields a fixed payload once a set number of frames have
/// passed. Stands in for a code being held up to the simulated camera.
pub struct ScriptedDecoder {
    payload: String,
    remaining: Mutex<u32>,
}

impl ScriptedDecoder {
    pub fn new(payload: impl Into<String>, after_frames: u32) -> Self {
        Self { payload: payload.into(), remaining: Mutex::new(after_frames) }
    }
}

impl Decoder for ScriptedDecoder {
    fn decode(&self, _frame: &Frame) -> Option<String> {
        let mut remaining = self.remaining.lock();
        if *remaining == 0 {
            Some(self.payload.clone())
        } else {
            *remaining -= 1;
            None
        }
    }
}
