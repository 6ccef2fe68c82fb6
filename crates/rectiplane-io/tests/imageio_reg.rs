//! Image I/O regression test
//!
//! Encodes the synthetic quadrant pattern, decodes it again through the
//! signature-dispatching reader, and checks file-level round trips.

use rectiplane_io::{ImageFormat, IoError, read_image, read_image_mem, write_image, write_image_mem};
use rectiplane_test::{RegParams, fixtures, regout_dir};

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");

    let pix = fixtures::quadrant_pattern(64).unwrap();
    let bytes = write_image_mem(&pix, ImageFormat::Png).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.compare_pix(&pix, &back);

    std::fs::create_dir_all(regout_dir()).unwrap();
    let path = format!("{}/imageio.roundtrip.png", regout_dir());
    write_image(&pix, &path, ImageFormat::Png).unwrap();
    let from_file = read_image(&path).unwrap();
    rp.compare_pix(&pix, &from_file);
    rp.compare_values(64.0, from_file.width() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn imageio_reg_errors() {
    assert!(matches!(
        read_image_mem(b"not an image"),
        Err(IoError::UnsupportedFormat(_))
    ));
    let pix = fixtures::quadrant_pattern(8).unwrap();
    assert!(matches!(
        write_image_mem(&pix, ImageFormat::Jpeg),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        read_image("/nonexistent/rectiplane/input.png"),
        Err(IoError::Io(_))
    ));
}
