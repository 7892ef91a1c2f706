//! Loss-curve rendering
//!
//! Draws both per-epoch loss sequences into a single PNG line chart at
//! the end of training.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::error::{GanError, Result};
use crate::training::LossHistory;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const AXIS: Rgb<u8> = Rgb([200, 200, 200]);
const GEN_COLOR: Rgb<u8> = Rgb([33, 150, 243]);
const DISC_COLOR: Rgb<u8> = Rgb([255, 152, 0]);

/// Renders the generator/discriminator loss curves as a line chart
#[derive(Debug, Clone)]
pub struct LossCurve {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for LossCurve {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            margin: 40,
        }
    }
}

impl LossCurve {
    /// Render both loss sequences against epoch index into `path`
    pub fn render(&self, history: &LossHistory, path: impl AsRef<Path>) -> Result<PathBuf> {
        if history.is_empty() {
            return Err(GanError::Config(
                "loss history is empty; nothing to plot".to_string(),
            ));
        }

        let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        // Axes along the left and bottom margins
        let x0 = self.margin;
        let y0 = self.height - self.margin;
        draw_line(&mut canvas, x0 as i32, self.margin as i32, x0 as i32, y0 as i32, AXIS);
        draw_line(
            &mut canvas,
            x0 as i32,
            y0 as i32,
            (self.width - self.margin) as i32,
            y0 as i32,
            AXIS,
        );

        let all_values = history
            .gen_losses
            .iter()
            .chain(history.disc_losses.iter());
        let mut min_loss = f64::INFINITY;
        let mut max_loss = f64::NEG_INFINITY;
        for &value in all_values {
            min_loss = min_loss.min(value);
            max_loss = max_loss.max(value);
        }
        let range = if (max_loss - min_loss).abs() > 1e-12 {
            max_loss - min_loss
        } else {
            1.0
        };

        self.draw_series(&mut canvas, &history.gen_losses, min_loss, range, GEN_COLOR);
        self.draw_series(&mut canvas, &history.disc_losses, min_loss, range, DISC_COLOR);

        let path = path.as_ref().to_path_buf();
        canvas.save(&path)?;
        Ok(path)
    }

    fn draw_series(
        &self,
        canvas: &mut RgbImage,
        values: &[f64],
        min_loss: f64,
        range: f64,
        color: Rgb<u8>,
    ) {
        let plot_width = (self.width - 2 * self.margin) as f64;
        let plot_height = (self.height - 2 * self.margin) as f64;
        let denom = (values.len().max(2) - 1) as f64;

        let project = |i: usize, value: f64| -> (i32, i32) {
            let x = self.margin as f64 + (i as f64 / denom) * plot_width;
            let y = (self.height - self.margin) as f64 - ((value - min_loss) / range) * plot_height;
            (x as i32, y as i32)
        };

        if values.len() == 1 {
            let (x, y) = project(0, values[0]);
            put_pixel_checked(canvas, x, y, color);
            return;
        }

        for i in 1..values.len() {
            let (px, py) = project(i - 1, values[i - 1]);
            let (x, y) = project(i, values[i]);
            draw_line(canvas, px, py, x, y, color);
        }
    }
}

fn put_pixel_checked(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line segment
fn draw_line(canvas: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel_checked(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_curve_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_curve.png");

        let mut history = LossHistory::new();
        history.record_epoch(2.0, 1.2);
        history.record_epoch(1.5, 1.3);
        history.record_epoch(1.1, 1.4);

        let written = LossCurve::default().render(&history, &path).unwrap();
        assert!(written.exists());

        let rendered = image::open(&written).unwrap();
        assert_eq!(rendered.width(), 800);
        assert_eq!(rendered.height(), 480);
    }

    #[test]
    fn test_loss_curve_single_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_curve.png");

        let mut history = LossHistory::new();
        history.record_epoch(1.0, 1.0);

        assert!(LossCurve::default().render(&history, &path).is_ok());
    }

    #[test]
    fn test_loss_curve_rejects_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_curve.png");

        let history = LossHistory::new();
        assert!(LossCurve::default().render(&history, &path).is_err());
    }
}
