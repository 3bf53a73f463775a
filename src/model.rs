//! The SIR model itself: the state of the population and its rates of change.
use derive_more::Display;
use strum::{Display as StrumDisplay, EnumIter};

/// The number of individuals in each compartment at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Display)]
#[display("S = {susceptible:.3}, I = {infected:.3}, R = {recovered:.3}")]
pub struct SirState {
    /// Individuals who can still be infected
    pub susceptible: f64,
    /// Individuals who are currently infected (and infectious)
    pub infected: f64,
    /// Individuals who have recovered and are immune
    pub recovered: f64,
}

impl SirState {
    /// Create a new [`SirState`]
    pub fn new(susceptible: f64, infected: f64, recovered: f64) -> Self {
        Self {
            susceptible,
            infected,
            recovered,
        }
    }

    /// The total number of individuals across all compartments
    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.recovered
    }

    /// The value for the given compartment
    pub fn get(&self, compartment: Compartment) -> f64 {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Infected => self.infected,
            Compartment::Recovered => self.recovered,
        }
    }
}

impl From<[f64; 3]> for SirState {
    fn from([susceptible, infected, recovered]: [f64; 3]) -> Self {
        Self::new(susceptible, infected, recovered)
    }
}

impl From<SirState> for [f64; 3] {
    fn from(state: SirState) -> Self {
        [state.susceptible, state.infected, state.recovered]
    }
}

/// One of the three compartments of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
pub enum Compartment {
    /// Susceptible individuals
    #[strum(to_string = "S")]
    Susceptible,
    /// Infected individuals
    #[strum(to_string = "I")]
    Infected,
    /// Recovered individuals
    #[strum(to_string = "R")]
    Recovered,
}

/// Calculate the instantaneous rates of change of the SIR state.
///
/// The system is time-invariant, so `_t` is only there to match the signature expected by the
/// solver. No validation is carried out: a population of zero will give non-finite rates.
///
/// # Arguments
///
/// * `state` - The current state
/// * `_t` - The current time (days)
/// * `population` - The total population size
/// * `infection_rate` - Infection rate (β) per day
/// * `recovery_rate` - Recovery rate (γ) per day
pub fn derivative(
    state: &SirState,
    _t: f64,
    population: f64,
    infection_rate: f64,
    recovery_rate: f64,
) -> SirState {
    let SirState {
        susceptible: s,
        infected: i,
        ..
    } = *state;

    let ds_dt = -infection_rate * s * i / population;
    let di_dt = -ds_dt - recovery_rate * i;
    let dr_dt = recovery_rate * i;

    SirState::new(ds_dt, di_dt, dr_dt)
}

/// The basic reproduction number (R₀) for the given rates
pub fn basic_reproduction_number(infection_rate: f64, recovery_rate: f64) -> f64 {
    infection_rate / recovery_rate
}
