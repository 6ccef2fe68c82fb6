//! Regression test parameters and checks

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use rectiplane_core::{Pix, Point};
use rectiplane_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check values and rasters (default)
    #[default]
    Compare,
    /// Also write every checked raster to `tests/regout/` for inspection
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything but `display` means compare.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("display") => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test.
///
/// Every check bumps a running index, so a failure message names the
/// check that produced it. A failed check does not abort the test; call
/// [`RegParams::cleanup`] at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "homography")
    pub test_name: String,
    index: usize,
    pub mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!("==== {test_name}_reg ({mode:?}) ====");
        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Index of the most recent check.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Advance the index and record a failure unless `ok`.
    fn check(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg #{}: {}", self.test_name, self.index, detail());
            eprintln!("{msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// Check `|expected - actual| <= delta`.
    ///
    /// A NaN on either side never matches.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(diff <= delta, || {
            format!("expected {expected}, got {actual} (diff {diff} > {delta})")
        })
    }

    /// Check that two points are within `delta` of each other.
    pub fn compare_points(&mut self, expected: Point, actual: Point, delta: f64) -> bool {
        let dist = expected.distance_to(actual);
        self.check(dist <= delta, || {
            format!(
                "expected ({}, {}), got ({}, {}) (distance {dist} > {delta})",
                expected.x, expected.y, actual.x, actual.y
            )
        })
    }

    /// Check that two rasters have the same size and identical pixels.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        if !expected.sizes_equal(actual) {
            return self.check(false, || {
                format!(
                    "raster size {}x{} vs {}x{}",
                    expected.width(),
                    expected.height(),
                    actual.width(),
                    actual.height()
                )
            });
        }
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        let w = expected.width() as usize;
        self.check(mismatch.is_none(), || {
            let i = mismatch.unwrap_or_default();
            format!("first pixel mismatch at ({}, {})", i % w, i / w)
        })
    }

    /// Write a raster to `tests/regout/` when in display mode.
    ///
    /// The file is named `<test>.<index>.png`. In compare mode this only
    /// advances the index.
    pub fn write_pix(&mut self, pix: &Pix) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        fs::create_dir_all(regout_dir())?;
        let path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ImageFormat::Png.extension()
        );
        rectiplane_io::write_image(pix, &path, ImageFormat::Png).map_err(|e| {
            TestError::ImageWrite {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        eprintln!("wrote {path}");
        Ok(())
    }

    /// Print a summary and return `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("==== {}_reg passed ({} checks) ====", self.test_name, self.index);
            true
        } else {
            eprintln!(
                "==== {}_reg FAILED ({} of {} checks) ====",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
            false
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
