//! Code for loading program settings.
use crate::get_sir_config_dir;
use crate::log::DEFAULT_LOG_LEVEL;
use crate::solver::{
    DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_MAX_STEPS, DEFAULT_RELATIVE_TOLERANCE, SolverSettings,
};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Default log level for program
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_relative_tolerance() -> f64 {
    DEFAULT_RELATIVE_TOLERANCE
}

fn default_absolute_tolerance() -> f64 {
    DEFAULT_ABSOLUTE_TOLERANCE
}

fn default_max_steps() -> u32 {
    DEFAULT_MAX_STEPS
}

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    let mut path = get_sir_config_dir();
    path.push(SETTINGS_FILE_NAME);

    path
}

/// Program settings from config file
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The default program log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to overwrite output files by default
    #[serde(default)]
    pub overwrite: bool,
    /// Relative tolerance for the ODE solver
    #[serde(default = "default_relative_tolerance")]
    pub relative_tolerance: f64,
    /// Absolute tolerance for the ODE solver
    #[serde(default = "default_absolute_tolerance")]
    pub absolute_tolerance: f64,
    /// Maximum number of steps the ODE solver may take between two consecutive output times
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            overwrite: false,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Settings {
    /// Read the settings file from the user's config directory.
    ///
    /// If the file is not present, default values for settings will be used
    ///
    /// # Returns
    ///
    /// The program settings as a `Settings` struct or an error if the file is invalid
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read from the specified path, falling back to defaults if the file doesn't exist
    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(file_path)
            .with_context(|| format!("Could not read {}", file_path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Could not parse {}", file_path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", file_path.display()))?;

        Ok(settings)
    }

    /// Check that the solver settings make sense
    fn validate(&self) -> Result<()> {
        ensure!(
            self.relative_tolerance.is_finite() && self.relative_tolerance > 0.0,
            "relative_tolerance must be a finite number greater than zero"
        );
        ensure!(
            self.absolute_tolerance.is_finite() && self.absolute_tolerance > 0.0,
            "absolute_tolerance must be a finite number greater than zero"
        );
        ensure!(self.max_steps > 0, "max_steps cannot be zero");

        Ok(())
    }

    /// The settings for the ODE solver
    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            relative_tolerance: self.relative_tolerance,
            absolute_tolerance: self.absolute_tolerance,
            max_steps: self.max_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_settings(dir: &Path, contents: &str) -> PathBuf {
        let file_path = dir.join(SETTINGS_FILE_NAME);
        let mut file = File::create(&file_path).unwrap();
        write!(file, "{contents}").unwrap();
        file_path
    }

    #[test]
    fn test_settings_load_from_path_no_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME); // NB: doesn't exist
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path() {
        let dir = tempdir().unwrap();
        let file_path = write_settings(dir.path(), "log_level = \"warn\"\nmax_steps = 2000\n");

        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings {
                log_level: "warn".to_string(),
                max_steps: 2000,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_settings_load_from_path_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = write_settings(dir.path(), "");
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path_unknown_field() {
        let dir = tempdir().unwrap();
        let file_path = write_settings(dir.path(), "debug_model = true\n");
        assert_error!(
            Settings::load_from_path(&file_path),
            format!("Could not parse {}", file_path.display())
        );
    }

    #[rstest]
    #[case(
        "relative_tolerance = 0.0",
        "relative_tolerance must be a finite number greater than zero"
    )]
    #[case(
        "absolute_tolerance = -1e-6",
        "absolute_tolerance must be a finite number greater than zero"
    )]
    #[case(
        "absolute_tolerance = nan",
        "absolute_tolerance must be a finite number greater than zero"
    )]
    #[case("max_steps = 0", "max_steps cannot be zero")]
    fn test_settings_invalid(#[case] contents: &str, #[case] msg: &str) {
        let dir = tempdir().unwrap();
        let file_path = write_settings(dir.path(), contents);
        let err = Settings::load_from_path(&file_path).unwrap_err();
        assert_eq!(err.root_cause().to_string(), msg);
    }

    #[test]
    fn test_solver_settings() {
        let settings = Settings {
            relative_tolerance: 1e-6,
            absolute_tolerance: 1e-4,
            max_steps: 10,
            ..Settings::default()
        };
        assert_eq!(
            settings.solver_settings(),
            SolverSettings {
                relative_tolerance: 1e-6,
                absolute_tolerance: 1e-4,
                max_steps: 10,
            }
        );
        assert_eq!(Settings::default().solver_settings(), SolverSettings::default());
    }
}
