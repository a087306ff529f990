//! Static Chart Renderer
//! Draws the monthly mean volume lines into a PNG.
//!
//! Layout: one line per period, x = month, y = mean volume, light grid.
//! Title and legend live in the surrounding page. The bitmap carries no text:
//! plotters is built without a font backend, so no label area may be reserved.

use crate::stats::MonthlySeries;
use chrono::Datelike;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

// Line colours, oldest period first
const BLUE: RGBColor = RGBColor(91, 155, 213);
const RED: RGBColor = RGBColor(237, 125, 49);
const GREEN: RGBColor = RGBColor(112, 173, 71);
const PALETTE: [RGBColor; 3] = [BLUE, RED, GREEN];

const GRID: RGBColor = RGBColor(200, 200, 200);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No series to draw")]
    NoData,
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn drawing<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// CSS hex colour of the line drawn for the series at `idx`.
    pub fn series_color_hex(idx: usize) -> String {
        let RGBColor(r, g, b) = PALETTE[idx % PALETTE.len()];
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Render the series as a line chart and encode it as PNG bytes.
    pub fn render_monthly_volume_png(
        series: &[MonthlySeries],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ChartError> {
        if series.iter().all(|s| s.points.is_empty()) {
            return Err(ChartError::NoData);
        }

        let (x_min, x_max) = Self::x_range(series);
        let y_max = Self::y_max(series);

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .build_cartesian_2d(x_min..x_max, 0.0..y_max)
                .map_err(drawing)?;

            chart
                .configure_mesh()
                .light_line_style(GRID.mix(0.3).stroke_width(1))
                .bold_line_style(GRID.stroke_width(1))
                .draw()
                .map_err(drawing)?;

            for (idx, s) in series.iter().enumerate() {
                let color = PALETTE[idx % PALETTE.len()];
                chart
                    .draw_series(LineSeries::new(
                        s.points
                            .iter()
                            .map(|p| (Self::month_index(p.month), p.mean_volume)),
                        color.stroke_width(2),
                    ))
                    .map_err(drawing)?;
            }

            root.present().map_err(drawing)?;
        }

        let img = RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer(width, height))?;
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    /// Months since year 0, so consecutive months are one unit apart.
    fn month_index(date: chrono::NaiveDate) -> f64 {
        (date.year() as f64) * 12.0 + date.month0() as f64
    }

    fn x_range(series: &[MonthlySeries]) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in series.iter().flat_map(|s| s.points.iter()) {
            let x = Self::month_index(p.month);
            min = min.min(x);
            max = max.max(x);
        }
        if min >= max {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        }
    }

    fn y_max(series: &[MonthlySeries]) -> f64 {
        let max = series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p.mean_volume)
            .filter(|v| v.is_finite())
            .fold(0.0f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}
