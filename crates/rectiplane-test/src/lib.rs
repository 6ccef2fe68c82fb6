//! rectiplane-test - Regression test framework
//!
//! Shared harness for the `*_reg.rs` integration tests of every crate in
//! the workspace, plus synthetic fixtures so the tests need no image files.
//!
//! - **Compare** (default): run every check, record failures
//! - **Display**: additionally write checked rasters to `tests/regout/`
//!
//! # Usage
//!
//! ```ignore
//! use rectiplane_test::RegParams;
//!
//! let mut rp = RegParams::new("homography");
//! rp.compare_values(600.0, x, 1e-6);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rectiplane-test is at crates/rectiplane-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
