//! Integration tests for running the simulation from start to finish.
use sir::chart::CHART_FILE_NAME;
use sir::cli::{RunOpts, handle_run_command};
use sir::log::{LOG_ERROR_FILE_NAME, LOG_INFO_FILE_NAME, is_logger_initialised};
use sir::parameters::ModelParameters;
use sir::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `run` command.
///
/// We also check that the logger is initialised after it is run. Everything is in one test
/// because the logger can only be initialised once per process.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("SIR_LOG_LEVEL", "off") };
    assert!(!is_logger_initialised());

    let tempdir = tempdir().unwrap();

    // Save results to non-existent directory to check that directory creation works
    let output_dir = tempdir.path().join("results");
    let opts = RunOpts {
        output_dir: Some(output_dir.clone()),
        overwrite: false,
    };
    let trajectory =
        handle_run_command(&ModelParameters::new(1000), &opts, Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());
    assert_eq!(trajectory.len(), 31);
    assert!(output_dir.join(CHART_FILE_NAME).is_file());
    assert!(output_dir.join(LOG_INFO_FILE_NAME).is_file());
    assert!(output_dir.join(LOG_ERROR_FILE_NAME).is_file());

    // Output folder is no longer empty
    let err = handle_run_command(&ModelParameters::new(1000), &opts, Some(Settings::default()))
        .unwrap_err();
    assert_eq!(
        err.chain().next().unwrap().to_string(),
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    );

    // Second time will fail because the logging is already initialised
    let opts = RunOpts {
        output_dir: Some(output_dir),
        overwrite: true,
    };
    assert_eq!(
        handle_run_command(&ModelParameters::new(1000), &opts, Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
