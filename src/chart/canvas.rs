//! Raster drawing surface for the report charts.
//!
//! Coordinates are pixels with the origin at the top-left corner. Drawing
//! outside the image is clipped silently.

use crate::chart::colors::{Color, blend};
use crate::chart::font::{ADVANCE, GLYPH_H, glyph, text_width};
use image::RgbImage;

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        if self.inside(x, y) {
            Some(*self.img.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    fn inside(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.img.width() as i64 && y < self.img.height() as i64
    }

    pub fn put(&mut self, x: i64, y: i64, c: Color) {
        if self.inside(x, y) {
            self.img.put_pixel(x as u32, y as u32, c);
        }
    }

    fn put_blended(&mut self, x: i64, y: i64, c: Color, alpha: f32) {
        if let Some(bg) = self.pixel(x, y) {
            self.img.put_pixel(x as u32, y as u32, blend(bg, c, alpha));
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, c: Color) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, c);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, w: i64, h: i64, c: Color) {
        self.line(x, y, x + w - 1, y, c, 1);
        self.line(x, y + h - 1, x + w - 1, y + h - 1, c, 1);
        self.line(x, y, x, y + h - 1, c, 1);
        self.line(x + w - 1, y, x + w - 1, y + h - 1, c, 1);
    }

    /// Bresenham line with a square brush `thickness` pixels wide.
    pub fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, c: Color, thickness: u32) {
        let t = thickness.max(1) as i64;
        let off = (t - 1) / 2;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.fill_rect(x - off, y - off, t, t, c);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn dashed_hline(&mut self, x0: i64, x1: i64, y: i64, c: Color, thickness: u32) {
        const DASH: i64 = 8;
        const GAP: i64 = 5;
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let mut x = lo;
        while x <= hi {
            let end = (x + DASH - 1).min(hi);
            self.line(x, y, end, y, c, thickness);
            x += DASH + GAP;
        }
    }

    pub fn disk(&mut self, cx: i64, cy: i64, r: i64, c: Color) {
        let r2 = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, c);
                }
            }
        }
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, c: Color, thickness: u32) {
        let half = thickness.max(1) as f64 / 2.0;
        let (inner, outer) = ((r - half).max(0.0), r + half);
        let x0 = (cx - outer).floor() as i64;
        let x1 = (cx + outer).ceil() as i64;
        let y0 = (cy - outer).floor() as i64;
        let y1 = (cy + outer).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = ((x as f64 + 0.5 - cx).powi(2) + (y as f64 + 0.5 - cy).powi(2)).sqrt();
                if d >= inner && d <= outer {
                    self.put(x, y, c);
                }
            }
        }
    }

    /// Fill a polygon (even-odd rule, sampled at pixel centres).
    ///
    /// With `alpha` below 1 the colour is blended over what is already drawn.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], c: Color, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor() as i64;
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;

        let mut xs: Vec<f64> = Vec::with_capacity(points.len());
        for y in min_y.max(0)..=max_y.min(self.height() as i64 - 1) {
            let sy = y as f64 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sy && sy < by) || (by <= sy && sy < ay) {
                    xs.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i64;
                let end = (pair[1] - 0.5).floor() as i64;
                for x in start..=end {
                    if alpha >= 1.0 {
                        self.put(x, y, c);
                    } else {
                        self.put_blended(x, y, c, alpha);
                    }
                }
            }
        }
    }

    /// Fill a pie wedge. Angles in degrees, counter-clockwise from 3 o'clock.
    pub fn fill_wedge(&mut self, cx: f64, cy: f64, r: f64, start_deg: f64, sweep_deg: f64, c: Color) {
        if sweep_deg <= 0.0 {
            return;
        }
        let x0 = (cx - r).floor() as i64;
        let x1 = (cx + r).ceil() as i64;
        let y0 = (cy - r).floor() as i64;
        let y1 = (cy + r).ceil() as i64;
        let r2 = r * r;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = cy - (y as f64 + 0.5);
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let angle = dy.atan2(dx).to_degrees();
                let rel = (angle - start_deg).rem_euclid(360.0);
                if sweep_deg >= 360.0 || rel < sweep_deg {
                    self.put(x, y, c);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn text(&mut self, x: i64, y: i64, text: &str, c: Color, scale: u32) {
        let s = scale.max(1) as i64;
        let mut pen = x;
        for ch in text.chars() {
            let cols = glyph(ch);
            for (col, bits) in cols.iter().enumerate() {
                for row in 0..GLYPH_H {
                    if bits & (1 << row) != 0 {
                        self.fill_rect(pen + col as i64 * s, y + row as i64 * s, s, s, c);
                    }
                }
            }
            pen += ADVANCE as i64 * s;
        }
    }

    /// Draw `text` horizontally centred on `cx`.
    pub fn text_centered(&mut self, cx: i64, y: i64, text: &str, c: Color, scale: u32) {
        let w = text_width(text, scale) as i64;
        self.text(cx - w / 2, y, text, c, scale);
    }

    /// Draw `text` so that it ends at `right`.
    pub fn text_right(&mut self, right: i64, y: i64, text: &str, c: Color, scale: u32) {
        let w = text_width(text, scale) as i64;
        self.text(right - w, y, text, c, scale);
    }
}
