//! JPEG image format support
//!
//! Reads baseline and progressive JPEG using the `jpeg-decoder` crate.
//! Grayscale, RGB and CMYK sources all decode to opaque RGBA. There is no
//! JPEG writer; rectified output is always written as PNG.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use rectiplane_core::{Pix, PixMut, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    let expected = width as usize * height as usize * samples;
    if pixels.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG frame has {} bytes, expected {}",
            pixels.len(),
            expected
        )));
    }

    let mut pix_mut = PixMut::new(width, height)?;
    for (dst, px) in pix_mut
        .data_mut()
        .iter_mut()
        .zip(pixels.chunks_exact(samples))
    {
        *dst = match info.pixel_format {
            PixelFormat::L8 => color::compose_rgb(px[0], px[0], px[0]),
            // Big-endian 16-bit luma; keep the high byte
            PixelFormat::L16 => color::compose_rgb(px[0], px[0], px[0]),
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            PixelFormat::CMYK32 => cmyk_to_rgb(px[0], px[1], px[2], px[3]),
        };
    }

    Ok(pix_mut.into())
}

fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> u32 {
    let ink = |v: u8| ((255 - v as u32) * (255 - k as u32) / 255) as u8;
    color::compose_rgb(ink(c), ink(m), ink(y))
}
