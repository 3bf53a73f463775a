//! Fixtures for tests
use crate::parameters::ModelParameters;
use crate::solver::SolverSettings;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// The example scenario: a population of 1000 with one initial infection and default rates
#[fixture]
pub fn default_parameters() -> ModelParameters {
    ModelParameters {
        population: 1000,
        infection_rate: 0.07,
        recovery_rate: 0.02,
        infected_0: 1,
        recovered_0: 0,
        timespan_days: 31,
    }
}

#[fixture]
pub fn solver_settings() -> SolverSettings {
    SolverSettings::default()
}
