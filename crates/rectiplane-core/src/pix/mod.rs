//! PIX - The RGBA raster container
//!
//! `Pix` holds the source photograph and every rectified buffer produced
//! from it.
//!
//! # Pixel layout
//!
//! - One packed `u32` per pixel, row-major, no row padding
//! - Channel order is RGBA with red in the MSB (see [`crate::color`])
//! - A new raster is zero-filled, i.e. transparent black
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared, read-only ownership). The
//! source image is shared this way by every resampling call. To modify pixel
//! data, convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    /// One packed RGBA word per pixel, row-major
    data: Vec<u32>,
}

impl PixData {
    fn zeroed(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0u32; len],
        })
    }
}

/// PIX - RGBA raster
///
/// `Pix` is the image type passed between the io, transform and rectify
/// crates. It uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use rectiplane_core::Pix;
///
/// let pix = Pix::new(600, 600).unwrap();
/// assert_eq!(pix.width(), 600);
/// assert_eq!(pix.get_pixel(0, 0), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new transparent PIX with the specified dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the pixel count does not fit in memory addressing.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height)?),
        })
    }

    /// Create a PIX from tightly packed 8-bit RGBA bytes.
    ///
    /// This is the hand-off format of canvas-style image data
    /// (`[r, g, b, a, r, g, b, a, ...]`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `bytes.len() != width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut data = PixData::zeroed(width, height)?;
        let expected = data.data.len() * 4;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        for (dst, chunk) in data.data.iter_mut().zip(bytes.chunks_exact(4)) {
            *dst = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Pix {
            inner: Arc::new(data),
        })
    }

    /// Export the pixels as tightly packed 8-bit RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.inner
            .data
            .iter()
            .flat_map(|px| px.to_be_bytes())
            .collect()
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two PIX have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Take the pixels without copying if this is the only handle.
    ///
    /// Returns `self` unchanged when the data is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Copy the pixels into a new, exclusively owned [`PixMut`].
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`. Exclusive ownership guarantees that only one
/// resampling pass writes a given buffer at a time.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new transparent mutable raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::zeroed(width, height)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set every pixel to `val`.
    pub fn fill(&mut self, val: u32) {
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}
