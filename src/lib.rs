//! Common functionality for the SIR epidemic simulator.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod chart;
pub mod cli;
pub mod log;
pub mod model;
pub mod output;
pub mod parameters;
pub mod settings;
pub mod simulation;
pub mod solver;

#[cfg(test)]
mod fixture;

/// Get the directory where the program's configuration files are stored
pub fn get_sir_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No user config dir on this platform; fall back to the working directory
        return PathBuf::new();
    };

    config_dir.push("sir");
    config_dir
}
