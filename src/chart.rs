//! Rendering of simulation results as a line chart.
//!
//! The chart is written as an SVG file, with one line per compartment of the model.
use crate::model::Compartment;
use crate::simulation::Trajectory;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use strum::IntoEnumIterator;

/// The file name for the chart
pub const CHART_FILE_NAME: &str = "sir_chart.svg";

/// Chart dimensions in pixels
const CHART_SIZE: (u32, u32) = (1024, 768);

/// Background colour for the plotting area
const PLOT_BACKGROUND: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);

/// Opacity of the series lines
const SERIES_ALPHA: f64 = 0.5;

/// Width of the series and grid lines in pixels
const LINE_WIDTH: u32 = 2;

/// How far the y axis extends beyond the total population
const Y_AXIS_HEADROOM: f64 = 1.1;

/// The colour used to draw the given compartment
fn series_colour(compartment: Compartment) -> RGBColor {
    match compartment {
        Compartment::Susceptible => BLUE,
        Compartment::Infected => RED,
        Compartment::Recovered => GREEN,
    }
}

/// Upper limit for an axis, falling back to 1 if the data gives no sensible range
fn axis_max(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Write a chart of the trajectory to an SVG file.
///
/// # Arguments
///
/// * `trajectory` - The simulation results
/// * `population` - The total population, used to scale the y axis
/// * `file_path` - Where to save the chart
pub fn write_chart(trajectory: &Trajectory, population: i64, file_path: &Path) -> Result<()> {
    let root = SVGBackend::new(file_path, CHART_SIZE).into_drawing_area();
    draw_chart(&root, trajectory, population)
        .with_context(|| format!("Failed to write chart to {}", file_path.display()))
}

/// Draw the chart on any drawing area
fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    trajectory: &Trajectory,
    population: i64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_max = axis_max(trajectory.times().last().copied().unwrap_or_default());
    let y_max = axis_max(population as f64 * Y_AXIS_HEADROOM);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart.plotting_area().fill(&PLOT_BACKGROUND)?;
    chart
        .configure_mesh()
        .x_desc("Days")
        .y_desc("N People")
        .bold_line_style(WHITE.stroke_width(LINE_WIDTH))
        .max_light_lines(0)
        .draw()?;

    for compartment in Compartment::iter() {
        let style = series_colour(compartment)
            .mix(SERIES_ALPHA)
            .stroke_width(LINE_WIDTH);
        let points = trajectory
            .iter()
            .map(|(t, state)| (t, state.get(compartment)))
            .filter(|(_, value)| value.is_finite());

        chart
            .draw_series(LineSeries::new(points, style))?
            .label(compartment.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.5))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{default_parameters, solver_settings};
    use crate::parameters::ModelParameters;
    use crate::simulation::integrate_model;
    use crate::solver::SolverSettings;
    use rstest::rstest;
    use tempfile::tempdir;

    fn render_to_string(trajectory: &Trajectory, population: i64) -> String {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, CHART_SIZE).into_drawing_area();
            draw_chart(&root, trajectory, population).unwrap();
        }
        buf
    }

    #[rstest]
    fn test_draw_chart(default_parameters: ModelParameters, solver_settings: SolverSettings) {
        let trajectory = integrate_model(&default_parameters, &solver_settings).unwrap();
        let svg = render_to_string(&trajectory, default_parameters.population);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Days"));
        assert!(svg.contains("N People"));
        assert!(svg.matches("<polyline").count() >= 3);
    }

    #[rstest]
    fn test_draw_chart_empty(default_parameters: ModelParameters, solver_settings: SolverSettings) {
        let params = ModelParameters {
            timespan_days: 0,
            ..default_parameters
        };
        let trajectory = integrate_model(&params, &solver_settings).unwrap();
        assert!(trajectory.is_empty());
        assert!(render_to_string(&trajectory, 0).contains("Days"));
    }

    #[rstest]
    fn test_write_chart(default_parameters: ModelParameters, solver_settings: SolverSettings) {
        let trajectory = integrate_model(&default_parameters, &solver_settings).unwrap();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(CHART_FILE_NAME);
        write_chart(&trajectory, default_parameters.population, &file_path).unwrap();
        assert!(file_path.is_file());
    }

    #[test]
    fn test_axis_max() {
        assert_eq!(axis_max(1100.0), 1100.0);
        assert_eq!(axis_max(0.0), 1.0);
        assert_eq!(axis_max(-5.0), 1.0);
        assert_eq!(axis_max(f64::NAN), 1.0);
    }

    #[test]
    fn test_series_colours_are_distinct() {
        let colours: Vec<_> = Compartment::iter()
            .map(|compartment| series_colour(compartment).rgb())
            .collect();
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
        assert_ne!(colours[0], colours[2]);
    }
}
