//! Figure output: candidate locations as circles sized by their normalized
//! spike-count score, a red cross at the true location, a green cross at
//! the estimate.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::hrtf::set::HrtfSet;
use crate::pipeline::Outcome;

const AZIM_RANGE: (f32, f32) = (-5.0, 350.0);
const ELEV_RANGE: (f32, f32) = (-50.0, 95.0);

pub fn render_estimate(
    path: &Path,
    set: &HrtfSet,
    outcome: &Outcome,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .caption("Sound localization with HRTFs", ("sans-serif", 22))
        .build_cartesian_2d(AZIM_RANGE.0..AZIM_RANGE.1, ELEV_RANGE.0..ELEV_RANGE.1)?;

    chart
        .configure_mesh()
        .x_desc("Azimuth (deg)")
        .y_desc("Elevation (deg)")
        .draw()?;

    // assembly responses, radius proportional to the normalized score
    chart.draw_series(set.directions.iter().zip(&outcome.scores.scores).map(
        |(d, &score)| {
            let radius = (2.0 + 16.0 * score).round() as i32;
            Circle::new(
                (d.azim_deg, d.elev_deg),
                radius,
                BLUE.mix(0.4).filled(),
            )
        },
    ))?;

    let truth = set.directions[outcome.true_index];
    chart.draw_series(std::iter::once(Cross::new(
        (truth.azim_deg, truth.elev_deg),
        10,
        RED.stroke_width(2),
    )))?;

    if let Some(est) = outcome.scores.estimate {
        let d = set.directions[est];
        chart.draw_series(std::iter::once(Cross::new(
            (d.azim_deg, d.elev_deg),
            12,
            GREEN.stroke_width(2),
        )))?;
    }

    root.present()?;
    Ok(())
}
