use image::{imageops, GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Segment};

/// Largest side used when comparing renderings.
const COMPARISON_SIDE: u32 = 400;
/// Lines between two error samples.
const DEFAULT_INTERVAL: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Line thickness must be at least one pixel")]
    Thickness,
    #[error("Error sampling interval must be at least one line")]
    Interval,
}

/// Black-on-white rendering of the accepted lines, compared against the original
/// image to follow how close the string art gets. Purely observational: the
/// planner never reads it.
pub struct Comparison {
    original: GrayImage,
    rendering: GrayImage,
    thickness: u32,
}

impl Comparison {
    pub fn new(original: GrayImage, thickness: u32) -> Result<Self, Error> {
        if thickness == 0 {
            return Err(Error::Thickness);
        }
        let rendering = GrayImage::from_pixel(original.width(), original.height(), Luma([255]));
        Ok(Self {
            original,
            rendering,
            thickness,
        })
    }

    pub fn draw_line(&mut self, from: Point<isize>, to: Point<isize>) {
        let low = -((self.thickness as isize - 1) / 2);
        let high = self.thickness as isize / 2;
        let (width, height) = (self.rendering.width(), self.rendering.height());
        for point in Segment::new(from, to).points_between() {
            for dy in low..=high {
                for dx in low..=high {
                    let (x, y) = (point.x + dx, point.y + dy);
                    if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                        self.rendering.put_pixel(x as u32, y as u32, Luma([0]));
                    }
                }
            }
        }
    }

    pub fn rendering(&self) -> &GrayImage {
        &self.rendering
    }

    /// Mean squared pixel difference, both images downscaled to at most 400 pixels a side.
    pub fn mean_squared_error(&self) -> f64 {
        let original = shrink(&self.original);
        let rendering = shrink(&self.rendering);
        let pixels = (original.width() * original.height()).max(1);
        let sum: f64 = original
            .pixels()
            .zip(rendering.pixels())
            .map(|(a, b)| {
                let diff = f64::from(a.0[0]) - f64::from(b.0[0]);
                diff * diff
            })
            .sum();
        sum / f64::from(pixels)
    }
}

fn shrink(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    if width <= COMPARISON_SIDE && height <= COMPARISON_SIDE {
        return image.clone();
    }
    let scale = f64::from(COMPARISON_SIDE) / f64::from(width.max(height));
    let width = ((f64::from(width) * scale).round() as u32).max(1);
    let height = ((f64::from(height) * scale).round() as u32).max(1);
    imageops::thumbnail(image, width, height)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorSample {
    pub total_cost: f64,
    pub error: f64,
}

/// Error curve against string used, sampled every `interval` lines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorHistory {
    interval: usize,
    recorded: usize,
    samples: Vec<ErrorSample>,
}

impl Default for ErrorHistory {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            recorded: 0,
            samples: Vec::new(),
        }
    }
}

impl ErrorHistory {
    pub fn new(interval: usize) -> Result<Self, Error> {
        if interval == 0 {
            return Err(Error::Interval);
        }
        Ok(Self {
            interval,
            ..Self::default()
        })
    }

    /// Counts a line and samples the error when the interval is reached.
    pub fn record(&mut self, total_cost: f64, comparison: &Comparison) -> Option<f64> {
        self.recorded += 1;
        if self.recorded % self.interval != 0 {
            return None;
        }
        let error = comparison.mean_squared_error();
        self.samples.push(ErrorSample { total_cost, error });
        Some(error)
    }

    pub fn samples(&self) -> &[ErrorSample] {
        &self.samples
    }
}
