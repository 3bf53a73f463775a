//! Integration of ODE initial-value problems at a set of output times.
//!
//! The stepping itself is done by the adaptive Dormand-Prince 5(4) method (`RK45`) from the `ivp`
//! crate. The system is integrated from one output time to the next, so every output time is hit
//! exactly and the step limit applies to each output interval separately.
use anyhow::{Result, anyhow, ensure};
use ivp::prelude::{IVP, Method, Options, solve_ivp};
use log::trace;

/// Default relative tolerance for the solver
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;
/// Default absolute tolerance for the solver
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-8;
/// Default maximum number of steps between two consecutive output times
pub const DEFAULT_MAX_STEPS: u32 = 500;

/// Error control settings for the solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    /// Relative tolerance for the local error estimate
    pub relative_tolerance: f64,
    /// Absolute tolerance for the local error estimate
    pub absolute_tolerance: f64,
    /// The maximum number of steps the solver may take between two consecutive output times
    pub max_steps: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// The output of the solver
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// The state at each of the requested output times
    pub states: Vec<[f64; N]>,
    /// The number of evaluations of the derivative function
    pub n_evaluations: usize,
    /// The number of accepted steps
    pub n_accepted: usize,
    /// The number of rejected steps
    pub n_rejected: usize,
}

/// A derivative function over a fixed-size state, in the form the `ivp` crate expects
struct System<F, const N: usize> {
    f: F,
}

impl<F, const N: usize> IVP for System<F, N>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    fn ode(&self, x: f64, y: &[f64], dydx: &mut [f64]) {
        let y: [f64; N] = std::array::from_fn(|i| y[i]);
        dydx.copy_from_slice(&(self.f)(x, &y));
    }
}

/// Integrate an ODE system, returning the state at each of the given output times.
///
/// The first output is always `y0` itself (i.e. the state at `times[0]`). Any extra fixed
/// arguments for the derivative function should be captured by the `f` closure.
///
/// If the derivative becomes non-finite (e.g. because of a division by zero), the remaining
/// outputs are filled with NaN rather than treated as an error.
///
/// # Arguments
///
/// * `f` - The derivative function, taking the time and the current state
/// * `y0` - The initial state
/// * `times` - Output times, which must be in non-decreasing order
/// * `settings` - Error control settings
///
/// # Returns
///
/// The solution, or an error if the output times are out of order or the solver failed between
/// two output times.
pub fn integrate<F, const N: usize>(
    f: F,
    y0: [f64; N],
    times: &[f64],
    settings: &SolverSettings,
) -> Result<Solution<N>>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    ensure!(
        times.windows(2).all(|w| w[0] <= w[1]),
        "Output times must be in non-decreasing order"
    );

    let mut solution = Solution {
        states: Vec::with_capacity(times.len()),
        n_evaluations: 0,
        n_accepted: 0,
        n_rejected: 0,
    };
    if times.is_empty() {
        return Ok(solution);
    }

    let system = System { f };
    let mut y = y0;
    solution.states.push(y);
    for (k, interval) in times.windows(2).enumerate() {
        let (t, t_next) = (interval[0], interval[1]);

        solution.n_evaluations += 1;
        if !(system.f)(t, &y).iter().all(|dy| dy.is_finite()) {
            trace!("Non-finite derivative at t = {t}");
            let remaining = times.len() - 1 - k;
            solution
                .states
                .extend(std::iter::repeat_n([f64::NAN; N], remaining));
            break;
        }

        if t_next > t {
            y = solution.step(&system, t, t_next, &y, settings)?;
        }
        solution.states.push(y);
    }

    Ok(solution)
}

impl<const N: usize> Solution<N> {
    /// Integrate from `t` to `t_next`, accumulating the solver statistics
    fn step<F>(
        &mut self,
        system: &System<F, N>,
        t: f64,
        t_next: f64,
        y: &[f64; N],
        settings: &SolverSettings,
    ) -> Result<[f64; N]>
    where
        F: Fn(f64, &[f64; N]) -> [f64; N],
    {
        let options = Options::builder()
            .method(Method::DOPRI5)
            .rtol(settings.relative_tolerance)
            .atol(settings.absolute_tolerance)
            .t_eval(vec![t_next])
            .build();
        let result = solve_ivp(system, t, t_next, y, options)
            .map_err(|err| anyhow!("Solver failed between t = {t} and t = {t_next}: {err:?}"))?;

        self.n_evaluations += result.nfev;
        self.n_accepted += result.naccpt;
        self.n_rejected += result.nrejct;
        ensure!(
            result.nstep <= settings.max_steps as usize,
            "Solver exceeded the maximum number of steps ({}) between t = {t} and t = {t_next}",
            settings.max_steps
        );

        let y_next = result
            .y
            .last()
            .ok_or_else(|| anyhow!("Solver returned no output at t = {t_next}"))?;
        ensure!(
            y_next.len() == N,
            "Solver returned a state of the wrong size at t = {t_next}"
        );

        Ok(std::array::from_fn(|i| y_next[i]))
    }
}
