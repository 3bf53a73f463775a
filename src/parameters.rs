//! Defines the `ModelParameters` struct, which holds the inputs for a single simulation run.
use crate::model::{SirState, basic_reproduction_number};
use log::warn;

/// Default infection rate (β) per day
pub const DEFAULT_INFECTION_RATE: f64 = 0.07;
/// Default recovery rate (γ) per day
pub const DEFAULT_RECOVERY_RATE: f64 = 0.02;
/// Default number of infected individuals on day 0
pub const DEFAULT_INFECTED_0: i64 = 1;
/// Default number of recovered individuals on day 0
pub const DEFAULT_RECOVERED_0: i64 = 0;
/// Default number of days to simulate
pub const DEFAULT_TIMESPAN_DAYS: i64 = 31;

/// The parameters for a simulation run.
///
/// These are deliberately not validated: inconsistent values (e.g. more initial infections than
/// there are people) give meaningless trajectories rather than errors. See [`Self::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    /// Total number of individuals
    pub population: i64,
    /// Infection rate (β) per day
    pub infection_rate: f64,
    /// Recovery rate (γ) per day
    pub recovery_rate: f64,
    /// Number of infected individuals on day 0
    pub infected_0: i64,
    /// Number of recovered individuals on day 0
    pub recovered_0: i64,
    /// Number of days to simulate
    pub timespan_days: i64,
}

impl ModelParameters {
    /// Create parameters for the given population, with default values for everything else
    pub fn new(population: i64) -> Self {
        Self {
            population,
            infection_rate: DEFAULT_INFECTION_RATE,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            infected_0: DEFAULT_INFECTED_0,
            recovered_0: DEFAULT_RECOVERED_0,
            timespan_days: DEFAULT_TIMESPAN_DAYS,
        }
    }

    /// The number of susceptible individuals on day 0.
    ///
    /// This is negative if there are more initially infected and recovered individuals than the
    /// total population. It is calculated in floating point so that extreme counts cannot overflow.
    pub fn susceptible_0(&self) -> f64 {
        self.population as f64 - self.infected_0 as f64 - self.recovered_0 as f64
    }

    /// The state of the population on day 0
    pub fn initial_state(&self) -> SirState {
        SirState::new(
            self.susceptible_0(),
            self.infected_0 as f64,
            self.recovered_0 as f64,
        )
    }

    /// The basic reproduction number (R₀) for these parameters
    pub fn basic_reproduction_number(&self) -> f64 {
        basic_reproduction_number(self.infection_rate, self.recovery_rate)
    }

    /// Evenly spaced time points from day 0 to the last day (inclusive).
    ///
    /// There is one point per day of the timespan, so the spacing is slightly more than a day.
    /// A timespan of one day gives just day 0 and a timespan of zero or less gives no points.
    pub fn time_grid(&self) -> Vec<f64> {
        let Ok(num) = usize::try_from(self.timespan_days) else {
            return Vec::new();
        };

        match num {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let end = self.timespan_days as f64;
                let step = end / (num - 1) as f64;
                let mut grid: Vec<f64> = (0..num).map(|i| i as f64 * step).collect();

                // Make sure the end point is exact
                grid[num - 1] = end;
                grid
            }
        }
    }

    /// Warn about values which are accepted, but will not give a sensible simulation.
    ///
    /// Returns the number of warnings issued.
    pub fn check(&self) -> usize {
        let mut warnings = Vec::new();
        if self.population <= 0 {
            warnings.push(format!(
                "Population is {}: results will be non-finite or meaningless",
                self.population
            ));
        }
        if self.susceptible_0() < 0.0 {
            warnings.push(format!(
                "Initial susceptible count is negative ({}): infected_0 + recovered_0 exceeds the \
                population",
                self.susceptible_0()
            ));
        }
        if self.infected_0 < 0 || self.recovered_0 < 0 {
            warnings.push("Initial infected and recovered counts should not be negative".into());
        }
        if self.infection_rate < 0.0 || self.recovery_rate < 0.0 {
            warnings.push("Infection and recovery rates should not be negative".into());
        }
        if self.timespan_days <= 0 {
            warnings.push(format!(
                "Timespan is {} days: no time points will be simulated",
                self.timespan_days
            ));
        }

        for warning in &warnings {
            warn!("{warning}");
        }

        warnings.len()
    }
}
