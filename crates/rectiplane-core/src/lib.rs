//! rectiplane core - basic data structures for perspective rectification
//!
//! This crate provides the fundamental data structures and numeric
//! building blocks used throughout the rectiplane workspace:
//!
//! - [`Pix`] / [`PixMut`] - RGBA raster container (immutable / mutable)
//! - [`Point`] / [`Pta`] - 2D points and index-addressed point arrays
//! - [`linalg`] - dense matrices, typed products, Gauss-Jordan solving
//! - [`geometry`] - implicit lines and line-line intersection

pub mod error;
pub mod geometry;
pub mod linalg;
pub mod pix;
pub mod pta;

pub use error::{Error, Result};
pub use geometry::{LineCoeffs, PARALLEL_EPSILON, line_intersection};
pub use linalg::{Matrix, dot, gauss_solve, transpose};
pub use pix::{Pix, PixMut};
pub use pta::{Point, Pta};

/// Packing of RGBA samples into `0xRRGGBBAA` pixels.
///
/// A pixel value of [`color::TRANSPARENT`] is the cleared state of every
/// freshly created raster and of every output pixel that sampled nothing.
pub mod color {
    /// Fully transparent black.
    pub const TRANSPARENT: u32 = 0;

    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Opaque pixel (alpha 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Split a pixel into `(r, g, b, a)`.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = pixel.to_be_bytes();
        (r, g, b, a)
    }

    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        (pixel & 0xff) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_byte_order() {
            let p = compose_rgba(0x12, 0x34, 0x56, 0x78);
            assert_eq!(p, 0x1234_5678);
            assert_eq!(extract_rgba(p), (0x12, 0x34, 0x56, 0x78));
            assert_eq!(alpha(p), 0x78);
        }

        #[test]
        fn test_rgb_is_opaque() {
            assert_eq!(extract_rgba(compose_rgb(1, 2, 3)), (1, 2, 3, 255));
            assert_eq!(alpha(TRANSPARENT), 0);
        }
    }
}
