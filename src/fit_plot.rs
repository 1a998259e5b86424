use crate::dataset::Dataset;
use crate::stats::LinReg;

use itertools::Itertools;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

pub const DEFAULT_PLOT: &str = "fit.svg";
pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;

fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.minmax_by(|a, b| a.total_cmp(b)).into_option()?;
    let span = if max > min { max - min } else { max.abs().max(1.) };
    let pad = span * 0.05;
    Some((min - pad, max + pad))
}

/// Draws the samples and the fitted line into an SVG file.
pub fn draw_fit<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    model: &LinReg,
) -> Result<(), Box<dyn Error>> {
    let (xmin, xmax) = padded_range(dataset.x.iter().copied()).ok_or("nothing to plot")?;
    let line = [(xmin, model.calculate(xmin)), (xmax, model.calculate(xmax))];
    let (ymin, ymax) = padded_range(dataset.y.iter().copied().chain(line.iter().map(|p| p.1)))
        .ok_or("nothing to plot")?;

    let root_area = SVGBackend::new(path.as_ref(), (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root_area)
        .caption(format!("{} vs {}", dataset.ylabel, dataset.xlabel), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;

    ctx.configure_mesh().x_desc(&dataset.xlabel).y_desc(&dataset.ylabel).draw()?;

    ctx.draw_series(
        dataset
            .x
            .iter()
            .zip(dataset.y.iter())
            .map(|(&x, &y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;
    let orange = RGBColor(255, 165, 0);
    ctx.draw_series(LineSeries::new(line, orange.stroke_width(2)))?;

    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::padded_range;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([0., 10., 5.].into_iter()).unwrap();
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_padded_range_single_value() {
        let (lo, hi) = padded_range([3.].into_iter()).unwrap();
        assert!(lo < 3. && hi > 3.);
    }

    #[test]
    fn test_padded_range_empty() {
        assert_eq!(padded_range(std::iter::empty::<f64>()), None);
    }
}
