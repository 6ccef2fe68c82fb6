//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Checked accessors return `None`/`Err` outside the raster; the
//! `_unchecked` variants are for inner loops whose bounds are already
//! established and panic on violation instead of corrupting memory.

use super::{Pix, PixMut};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[offset(self.width(), x, y)]
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[offset(self.width(), x, y)]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            let len = self.data().len();
            return Err(Error::IndexOutOfBounds {
                index: offset(self.width(), x.min(self.width()), y),
                len,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = offset(self.width(), x, y);
        self.data_mut()[idx] = val;
    }

    /// Set an RGBA pixel at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let mut pm = PixMut::new(5, 4).unwrap();
        pm.set_pixel(4, 3, 42).unwrap();
        assert_eq!(pm.get_pixel(4, 3), Some(42));
        assert_eq!(pm.data()[19], 42);
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(4, 3), Some(42));
        assert_eq!(pix.get_pixel(5, 3), None);
        assert_eq!(pix.get_pixel(0, 4), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut pm = PixMut::new(2, 2).unwrap();
        assert!(matches!(
            pm.set_pixel(2, 0, 1),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(pm.set_pixel(0, 2, 1).is_err());
        assert!(pm.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_set_rgba() {
        let mut pm = PixMut::new(1, 1).unwrap();
        pm.set_rgba(0, 0, 200, 100, 50, 25).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgba(0, 0), Some((200, 100, 50, 25)));
    }
}
