//! rectiplane-io - Image decoding and encoding
//!
//! Loads photographs into RGBA [`Pix`] rasters and writes rectified
//! results back out.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature     |
//! |--------|------|-------|-------------|
//! | PNG    | yes  | yes   | `png-format`|
//! | JPEG   | yes  | no    | `jpeg`      |

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};

use rectiplane_core::Pix;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read an image from a file, detecting the format from its signature.
///
/// # Errors
///
/// Returns an error if the file cannot be read, its format is unknown or
/// not enabled, or the decoder rejects the data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let pix = read_image_mem(&data)?;
    debug!(
        path = %path.display(),
        width = pix.width(),
        height = pix.height(),
        "decoded image"
    );
    Ok(pix)
}

/// Decode an image held in memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats without an encoder.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let bytes = write_image_mem(pix, format)?;
    fs::write(path, bytes)?;
    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => {
            let mut out = Vec::new();
            png::write_png(pix, &mut out)?;
            Ok(out)
        }
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            other
        ))),
    }
}
