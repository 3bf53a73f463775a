//! Functionality for running the SIR simulation.
use crate::model::{Compartment, SirState, derivative};
use crate::parameters::ModelParameters;
use crate::solver::{SolverSettings, integrate};
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};

/// The simulated state of the population at each point of the time grid
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<SirState>,
}

impl Trajectory {
    /// The time points (days)
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The state at each time point
    pub fn states(&self) -> &[SirState] {
        &self.states
    }

    /// The number of time points
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the trajectory has no time points
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The values for a single compartment over time
    pub fn series(&self, compartment: Compartment) -> Vec<f64> {
        self.states.iter().map(|state| state.get(compartment)).collect()
    }

    /// The state at the last time point, if any
    pub fn final_state(&self) -> Option<&SirState> {
        self.states.last()
    }

    /// The time and number of infected individuals when infections peak.
    ///
    /// Non-finite values are ignored. If there are several equal maxima, the first is returned.
    pub fn peak_infected(&self) -> Option<(f64, f64)> {
        self.iter()
            .map(|(t, state)| (t, state.infected))
            .filter(|(_, infected)| infected.is_finite())
            .fold(None, |peak, (t, infected)| match peak {
                Some((_, max)) if max >= infected => peak,
                _ => Some((t, infected)),
            })
    }

    /// Iterate over `(time, state)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, &SirState)> {
        self.times.iter().copied().zip(&self.states)
    }
}

/// Integrate the SIR model with the given parameters.
///
/// Returns one `(S, I, R)` triple per point of the time grid. See [`ModelParameters::time_grid`].
///
/// # Arguments
///
/// * `population` - Total number of individuals
/// * `infection_rate` - Infection rate (β) per day
/// * `recovery_rate` - Recovery rate (γ) per day
/// * `infected_0` - Number of infected individuals on day 0
/// * `recovered_0` - Number of recovered individuals on day 0
/// * `timespan_days` - Number of days to simulate
pub fn simulate(
    population: i64,
    infection_rate: f64,
    recovery_rate: f64,
    infected_0: i64,
    recovered_0: i64,
    timespan_days: i64,
) -> Result<Vec<(f64, f64, f64)>> {
    let params = ModelParameters {
        population,
        infection_rate,
        recovery_rate,
        infected_0,
        recovered_0,
        timespan_days,
    };
    let trajectory = integrate_model(&params, &SolverSettings::default())?;

    Ok(trajectory
        .states
        .into_iter()
        .map(|state| (state.susceptible, state.infected, state.recovered))
        .collect())
}

/// Integrate the SIR model over the time grid defined by `params`
pub fn integrate_model(params: &ModelParameters, settings: &SolverSettings) -> Result<Trajectory> {
    let population = params.population as f64;
    let (infection_rate, recovery_rate) = (params.infection_rate, params.recovery_rate);
    let times = params.time_grid();
    let y0: [f64; 3] = params.initial_state().into();

    let solution = integrate(
        |t, y: &[f64; 3]| {
            let state = SirState::from(*y);
            derivative(&state, t, population, infection_rate, recovery_rate).into()
        },
        y0,
        &times,
        settings,
    )
    .context("Failed to integrate model")?;

    debug!(
        "Solver finished: {} function evaluations, {} accepted steps, {} rejected steps",
        solution.n_evaluations, solution.n_accepted, solution.n_rejected
    );

    Ok(Trajectory {
        times,
        states: solution.states.into_iter().map_into().collect(),
    })
}

/// Run the simulation, logging a summary of the results.
///
/// # Arguments
///
/// * `params` - The model parameters
/// * `settings` - Settings for the ODE solver
pub fn run(params: &ModelParameters, settings: &SolverSettings) -> Result<Trajectory> {
    info!(
        "Simulating population of {} over {} days (β = {}, γ = {}, R₀ = {:.3})",
        params.population,
        params.timespan_days,
        params.infection_rate,
        params.recovery_rate,
        params.basic_reproduction_number()
    );
    params.check();
    info!("Initial state: {}", params.initial_state());

    let trajectory = integrate_model(params, settings)?;

    if let Some((day, infected)) = trajectory.peak_infected() {
        info!("Peak infections: {infected:.3} on day {day:.2}");
    }
    if let Some(state) = trajectory.final_state() {
        info!("Final state: {state}");
    }

    Ok(trajectory)
}
