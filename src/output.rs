//! The module responsible for preparing the folder that output is written to.
use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};

/// The default folder for output, relative to the working directory
const OUTPUT_DIRECTORY_ROOT: &str = "sir_results";

/// Get the path to the default output folder
pub fn get_output_dir() -> PathBuf {
    PathBuf::from(OUTPUT_DIRECTORY_ROOT)
}

/// Create a new output directory, if it doesn't already exist.
///
/// An existing directory is only reused if it is empty or `allow_overwrite` is set.
///
/// # Returns
///
/// Whether existing output will be overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        let is_empty = output_dir
            .read_dir()
            .with_context(|| format!("Could not read {}", output_dir.display()))?
            .next()
            .is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace its contents."
        );

        return Ok(true);
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(false)
}
