//! Integration tests for the core simulation interface.
use float_cmp::assert_approx_eq;
use sir::simulation::simulate;

#[test]
fn test_simulate_example_scenario() {
    let result = simulate(1000, 0.07, 0.02, 1, 0, 31).unwrap();
    assert_eq!(result.len(), 31);
    assert_eq!(result[0], (999.0, 1.0, 0.0));

    // β/γ = 3.5 > 1, so an outbreak is under way
    assert!(result[30].1 > result[0].1);
    assert!(result[30].2 > result[0].2);

    for &(s, i, r) in &result {
        assert_approx_eq!(f64, s + i + r, 1000.0, epsilon = 1e-6);
        assert!(s >= 0.0 && i >= 0.0 && r >= 0.0);
    }
}

#[test]
fn test_simulate_recovered_non_decreasing() {
    let result = simulate(10_000, 0.25, 0.1, 10, 0, 200).unwrap();
    assert!(result.windows(2).all(|w| w[1].2 >= w[0].2));
}

#[test]
fn test_simulate_no_infection() {
    let result = simulate(1000, 0.07, 0.02, 0, 20, 31).unwrap();
    assert!(result.iter().all(|&state| state == (980.0, 0.0, 20.0)));
}

#[test]
fn test_simulate_single_day() {
    assert_eq!(
        simulate(1000, 0.07, 0.02, 1, 0, 1).unwrap(),
        [(999.0, 1.0, 0.0)]
    );
}

#[test]
fn test_simulate_below_threshold() {
    // β/γ < 1, so infections die out from the start
    let result = simulate(1000, 0.01, 0.05, 50, 0, 50).unwrap();
    assert!(result.windows(2).all(|w| w[1].1 < w[0].1));
}
