//! Chart rendering: time-series scatter/fill plots for the station report
//! and pie charts for the schedule statistics.

mod canvas;
pub mod colors;
pub mod font;
mod pie;
mod timeseries;

pub use canvas::Canvas;
pub use pie::PieChart;
pub use timeseries::{Marker, Series, TimeSeriesChart};

use crate::errors::AppResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// A chart drawn to an RGB raster, ready to be saved or embedded.
#[derive(Clone)]
pub struct RenderedChart {
    image: RgbImage,
}

impl RenderedChart {
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw 8-bit RGB samples, row by row.
    pub fn rgb_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn png_bytes(&self) -> AppResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    pub fn to_base64(&self) -> AppResult<String> {
        Ok(STANDARD.encode(self.png_bytes()?))
    }

    pub fn save_png(&self, path: &Path) -> AppResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
