// src/report/chart.rs

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;

/// Renders the marks-progress chart to an SVG file at `path`,
/// overwriting any previous chart.
///
/// `points` is an ordered sequence of (date label, marks scored) pairs;
/// the caller is expected to have sorted it by date.
pub fn render_progress_chart(points: &[(String, u32)], path: &Path) -> Result<(), AppError> {
    let root = SVGBackend::new(path, (900, 420)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let y_max = points.iter().map(|(_, m)| *m).max().unwrap_or(0) + 10;
    let x_max = points.len().saturating_sub(1).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Marks Progress", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(0..x_max, 0..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_labels(points.len().min(10).max(2))
        .x_label_formatter(&|idx: &usize| {
            points
                .get(*idx)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        })
        .x_desc("Date")
        .y_desc("Marks Scored")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().enumerate().map(|(i, (_, m))| (i, *m)),
            &BLUE,
        ))
        .map_err(draw_err)?;

    // Markers on each data point, like the original chart.
    chart
        .draw_series(
            points
                .iter()
                .enumerate()
                .map(|(i, (_, m))| Circle::new((i, *m), 3, BLUE.filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::InternalServerError(format!("chart rendering failed: {}", err))
}
