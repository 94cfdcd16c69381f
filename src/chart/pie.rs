use crate::chart::RenderedChart;
use crate::chart::canvas::Canvas;
use crate::chart::colors::{self, coolwarm};
use crate::chart::font::{text_height, text_width};
use crate::utils::stats::percentages;

/// Share of a total per category, e.g. sessions per observing program.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Angle of the first wedge edge, degrees counter-clockwise from 3 o'clock.
    pub start_angle: f64,
    pub size: u32,
}

impl PieChart {
    pub fn new(title: &str, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            title: title.to_string(),
            labels,
            values,
            start_angle: 140.0,
            size: 900,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Percentage of each wedge; sums to 100 for a positive total.
    pub fn percentages(&self) -> Vec<f64> {
        percentages(&self.values)
    }

    /// `label: 12.34%` per category, in wedge order.
    pub fn legend_entries(&self) -> Vec<String> {
        self.labels
            .iter()
            .zip(self.percentages())
            .map(|(l, p)| format!("{l}: {p:.2}%"))
            .collect()
    }

    pub fn render(&self) -> RenderedChart {
        let size = self.size;
        let s = size as f64;
        let mut canvas = Canvas::new(size, size, colors::WHITE);

        canvas.text_centered(size as i64 / 2, 24, &self.title, colors::BLACK, 3);

        let (cx, cy, r) = (s * 0.58, s * 0.52, s * 0.30);
        let pcts = self.percentages();
        let n = self.values.len().max(1);

        if self.total() <= 0.0 {
            canvas.text_centered(cx as i64, cy as i64, "No data", colors::FRAME, 3);
            return RenderedChart::from_image(canvas.into_image());
        }

        // Wedges first, then edges and labels on top.
        let mut wedges = Vec::with_capacity(self.values.len());
        let mut angle = self.start_angle;
        for (i, p) in pcts.iter().enumerate() {
            let sweep = 360.0 * p / 100.0;
            canvas.fill_wedge(cx, cy, r, angle, sweep, coolwarm(i as f64 / n as f64));
            wedges.push((angle, sweep));
            angle += sweep;
        }

        for (start, sweep) in &wedges {
            if *sweep <= 0.0 || *sweep >= 360.0 {
                continue;
            }
            let (ex, ey) = polar(cx, cy, r, *start);
            canvas.line(cx as i64, cy as i64, ex as i64, ey as i64, colors::BLACK, 2);
        }
        canvas.circle(cx, cy, r, colors::BLACK, 2);

        let scale = 2;
        let half_h = text_height(scale) as i64 / 2;
        for (i, (start, sweep)) in wedges.iter().enumerate() {
            if *sweep <= 0.0 {
                continue;
            }
            let mid = start + sweep / 2.0;

            let (px, py) = polar(cx, cy, r * 0.75, mid);
            canvas.text_centered(px as i64, py as i64 - half_h, &format!("{:.2}%", pcts[i]), colors::BLACK, scale);

            let (lx, ly) = polar(cx, cy, r * 1.05, mid);
            let label = &self.labels[i];
            if mid.to_radians().cos() >= 0.0 {
                canvas.text(lx as i64 + 4, ly as i64 - half_h, label, colors::DARK, scale);
            } else {
                canvas.text_right(lx as i64 - 4, ly as i64 - half_h, label, colors::DARK, scale);
            }
        }

        self.draw_legend(&mut canvas, n);
        RenderedChart::from_image(canvas.into_image())
    }

    fn draw_legend(&self, canvas: &mut Canvas, n: usize) {
        let scale = 2;
        let entries = self.legend_entries();
        let row_h = text_height(scale) as i64 + 10;
        let text_w = entries
            .iter()
            .map(|e| text_width(e, scale) as i64)
            .max()
            .unwrap_or(0);

        let x0 = 12;
        let box_w = text_w + 48;
        let box_h = entries.len() as i64 * row_h + 12;
        let y0 = (canvas.height() as i64 - box_h - 24).max(0);

        canvas.fill_rect(x0, y0, box_w, box_h, colors::WHITE);
        canvas.stroke_rect(x0, y0, box_w, box_h, colors::FRAME);

        for (i, entry) in entries.iter().enumerate() {
            let y = y0 + 8 + i as i64 * row_h;
            canvas.fill_rect(x0 + 8, y, 24, text_height(scale) as i64, coolwarm(i as f64 / n as f64));
            canvas.text(x0 + 40, y, entry, colors::BLACK, scale);
        }
    }
}

/// Point on the circle around (cx, cy); y grows downwards in the image.
fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let a = deg.to_radians();
    (cx + r * a.cos(), cy - r * a.sin())
}
