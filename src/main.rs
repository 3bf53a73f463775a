//! Provides the main entry point to the program.
use ::log::error;
use human_panic::setup_panic;
use sir::cli::run_cli;
use sir::log::is_logger_initialised;

fn main() {
    setup_panic!();

    if let Err(err) = run_cli() {
        if is_logger_initialised() {
            error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        std::process::exit(1);
    }
}
