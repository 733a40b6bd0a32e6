use std::fs;
use std::io;
use std::path::Path;

use crate::color::Color;

const MAX_PIXEL_VALUE: u8 = 255;
const DEFAULT_LINE_WIDTH: usize = 70;

/// Controls how [`Canvas::to_ppm_with`] lays out the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmOptions {
    /// Maximum characters per line of pixel data. None writes each canvas row on one line.
    pub line_width: Option<usize>,
}

impl Default for PpmOptions {
    fn default() -> Self {
        Self {
            line_width: Some(DEFAULT_LINE_WIDTH),
        }
    }
}

/// A grid of colors, stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Vec<Color>>,
}

impl Canvas {
    /// A canvas with every pixel black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![vec![Color::black(); width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if x or y are outside the canvas.
    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[y][x]
    }

    /// Panics if x or y are outside the canvas.
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y][x] = color;
    }

    /// Get a PPM-format string for the pixel values of the canvas,
    /// with lines wrapped at 70 characters.
    pub fn to_ppm(&self) -> String {
        self.to_ppm_with(PpmOptions::default())
    }

    pub fn to_ppm_with(&self, options: PpmOptions) -> String {
        let mut lines = vec![
            "P3".to_string(),
            format!("{} {}", self.width, self.height),
            MAX_PIXEL_VALUE.to_string(),
        ];

        for row in &self.pixels {
            let values = row
                .iter()
                .flat_map(|pixel| [pixel.red(), pixel.green(), pixel.blue()])
                .map(|channel| clamp_and_scale(channel).to_string());
            lines.extend(wrap(values, options.line_width));
        }

        lines.join("\n") + "\n"
    }

    /// Writes [`Canvas::to_ppm_with`] output to a file, replacing it if it exists.
    pub fn write_ppm(&self, path: impl AsRef<Path>, options: PpmOptions) -> io::Result<()> {
        fs::write(path, self.to_ppm_with(options))
    }
}

/// Joins values with single spaces, starting a new line whenever
/// the next value would push the current one past max_width.
fn wrap(values: impl Iterator<Item = String>, max_width: Option<usize>) -> Vec<String> {
    let mut lines = vec![];
    let mut line = String::new();
    for value in values {
        if !line.is_empty() {
            let too_long = max_width.map_or(false, |max| line.len() + 1 + value.len() > max);
            if too_long {
                lines.push(std::mem::take(&mut line));
            } else {
                line.push(' ');
            }
        }
        line.push_str(&value);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Clamps to [0, 1], then scales to 0-255.
fn clamp_and_scale(value: f64) -> u8 {
    (value.clamp(0., 1.) * MAX_PIXEL_VALUE as f64).round() as u8
}
