//! PNG rendering of the FRC curves and of the ring diagnostic mask

use crate::{rings::RingsSink, FrcCurve};
use ndarray::Array2;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw the chart: {0}")]
    Drawing(String),
}
type Result<T> = std::result::Result<T, PlotError>;

fn drawing<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Plots the FRC and the threshold curve(s)
pub fn plot_frc<P: AsRef<Path>>(frc: &FrcCurve, path: P) -> Result<()> {
    let plot = BitMapBackend::new(path.as_ref(), (768, 512)).into_drawing_area();
    plot.fill(&WHITE).map_err(drawing)?;

    let x_max = frc.x_fsc.last().cloned().unwrap_or(1f64).max(1e-3);
    let mut chart = ChartBuilder::on(&plot)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(0f64..x_max, 0f64..1.05f64)
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .x_desc("Spatial frequency [Nyquist]")
        .y_desc("FRC")
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            frc.x_fsc.iter().cloned().zip(frc.fsc.iter().cloned()),
            &BLACK,
        ))
        .map_err(drawing)?
        .label("FRC")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));
    for ((t, label), color) in frc
        .threshold
        .curves()
        .zip(frc.labels())
        .zip(colorous::TABLEAU10.iter())
    {
        let rgb = RGBColor(color.r, color.g, color.b);
        chart
            .draw_series(LineSeries::new(
                frc.x_t.iter().cloned().zip(t.iter().cloned()),
                &rgb,
            ))
            .map_err(drawing)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(drawing)?;
    plot.present().map_err(drawing)?;
    log::info!("FRC plot saved to {:?}", path.as_ref());
    Ok(())
}

/// Ring diagnostic mask rendered to a PNG file
pub struct PngRingsSink {
    path: PathBuf,
}
impl PngRingsSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
    fn draw(&self, mask: &Array2<bool>, title: &str) -> Result<()> {
        let (rows, cols) = mask.dim();
        let plot = BitMapBackend::new(&self.path, (640, 640)).into_drawing_area();
        plot.fill(&WHITE).map_err(drawing)?;
        let mut chart = ChartBuilder::on(&plot)
            .caption(title, ("sans-serif", 12))
            .set_label_area_size(LabelAreaPosition::Left, 40)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(0..cols as i32, 0..rows as i32)
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .draw()
            .map_err(drawing)?;
        let color = colorous::ORANGES.eval_continuous(0.9);
        let rgb = RGBColor(color.r, color.g, color.b);
        chart
            .draw_series(
                mask.indexed_iter()
                    .filter(|&(_, &lit)| lit)
                    .map(|((i, j), _)| {
                        let (i, j) = (i as i32, j as i32);
                        Rectangle::new([(j, i), (j + 1, i + 1)], rgb.filled())
                    }),
            )
            .map_err(drawing)?;
        plot.present().map_err(drawing)?;
        Ok(())
    }
}
impl RingsSink for PngRingsSink {
    fn render(&self, mask: &Array2<bool>, title: &str) {
        match self.draw(mask, title) {
            Ok(()) => log::info!("rings diagnostic saved to {:?}", self.path),
            Err(e) => log::warn!("failed to render the rings diagnostic: {}", e),
        }
    }
}
