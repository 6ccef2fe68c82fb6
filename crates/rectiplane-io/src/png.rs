//! PNG image format support
//!
//! Every PNG colour type is read through the decoder's
//! `normalize_to_color8` transformation (palette expansion, 16-bit strip),
//! so only four 8-bit layouts reach the pixel loop. Writing always
//! produces 8-bit RGBA.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use rectiplane_core::{Pix, PixMut, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into an RGBA `Pix`.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if data.len() < bytes_per_row * height as usize || bytes_per_row < samples * width as usize {
        return Err(IoError::InvalidData("PNG frame is truncated".to_string()));
    }

    let mut pix_mut = PixMut::new(width, height)?;
    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..samples * width as usize];
        for (x, px) in row.chunks_exact(samples).enumerate() {
            let pixel = match *px {
                [g] => color::compose_rgb(g, g, g),
                [g, a] => color::compose_rgba(g, g, g, a),
                [r, g, b] => color::compose_rgb(r, g, b),
                [r, g, b, a] => color::compose_rgba(r, g, b, a),
                _ => 0,
            };
            pix_mut.set_pixel_unchecked(x as u32, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write an RGBA `Pix` as an 8-bit RGBA PNG.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&pix.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}
