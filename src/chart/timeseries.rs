use crate::chart::RenderedChart;
use crate::chart::canvas::Canvas;
use crate::chart::colors::{self, Color};
use crate::chart::font::{text_height, text_width};
use crate::utils::stats::bounds;
use chrono::{DateTime, NaiveDateTime};

const MARGIN_LEFT: i64 = 78;
const MARGIN_RIGHT: i64 = 24;
const MARGIN_TOP: i64 = 56;
const MARGIN_BOTTOM: i64 = 64;
const MAX_TICKS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Disk,
    Square,
}

/// One layer of a time-series chart.
#[derive(Debug, Clone)]
pub enum Series {
    Scatter {
        points: Vec<(NaiveDateTime, f64)>,
        color: Color,
        marker: Marker,
        size: u32,
        label: Option<String>,
    },
    /// Area between the series and y = 0.
    Fill {
        points: Vec<(NaiveDateTime, f64)>,
        color: Color,
        alpha: f32,
    },
    HLine {
        y: f64,
        color: Color,
        dashed: bool,
        label: Option<String>,
    },
}

impl Series {
    pub fn scatter(points: Vec<(NaiveDateTime, f64)>, color: Color, marker: Marker, size: u32) -> Self {
        Series::Scatter {
            points,
            color,
            marker,
            size,
            label: None,
        }
    }

    pub fn fill(points: Vec<(NaiveDateTime, f64)>) -> Self {
        Series::Fill {
            points,
            color: colors::BLUE,
            alpha: 0.5,
        }
    }

    pub fn median_line(y: f64, color: Color) -> Self {
        Series::HLine {
            y,
            color,
            dashed: true,
            label: None,
        }
    }

    pub fn labelled(mut self, text: &str) -> Self {
        match &mut self {
            Series::Scatter { label, .. } | Series::HLine { label, .. } => {
                *label = Some(text.to_string());
            }
            Series::Fill { .. } => {}
        }
        self
    }

    fn points(&self) -> &[(NaiveDateTime, f64)] {
        match self {
            Series::Scatter { points, .. } | Series::Fill { points, .. } => points,
            Series::HLine { .. } => &[],
        }
    }
}

/// Metric against session date, drawn the way the station reports show
/// W.RMS, performance, detection rates and positions.
#[derive(Debug, Clone)]
pub struct TimeSeriesChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_range: Option<(f64, f64)>,
    pub grid: bool,
    pub width: u32,
    pub height: u32,
    pub series: Vec<Series>,
}

impl TimeSeriesChart {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Date".to_string(),
            y_label: String::new(),
            y_range: None,
            grid: true,
            width: 640,
            height: 480,
            series: Vec::new(),
        }
    }

    pub fn y_label(mut self, label: &str) -> Self {
        self.y_label = label.to_string();
        self
    }

    pub fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }

    pub fn grid(mut self, on: bool) -> Self {
        self.grid = on;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn push(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.points().is_empty())
    }

    fn x_domain(&self) -> Option<(f64, f64)> {
        let xs: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points().iter().map(|(t, _)| seconds(*t)))
            .collect();
        let (lo, hi) = bounds(&xs)?;
        if hi - lo < 1.0 {
            Some((lo - 86_400.0, hi + 86_400.0))
        } else {
            Some((lo, hi))
        }
    }

    fn y_domain(&self) -> (f64, f64) {
        if let Some(r) = self.y_range {
            return r;
        }
        let ys: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| match s {
                Series::HLine { y, .. } => vec![*y],
                other => other.points().iter().map(|(_, v)| *v).collect(),
            })
            .collect();
        match bounds(&ys) {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi - lo) * 0.05;
                (lo - pad, hi + pad)
            }
            Some((v, _)) => (v - 1.0, v + 1.0),
            None => (0.0, 1.0),
        }
    }

    pub fn render(&self) -> RenderedChart {
        let mut canvas = Canvas::new(self.width, self.height, colors::WHITE);
        let w = self.width as i64;
        let h = self.height as i64;

        let plot = PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: w - MARGIN_RIGHT,
            bottom: h - MARGIN_BOTTOM,
            x: self.x_domain().unwrap_or((0.0, 1.0)),
            y: self.y_domain(),
        };

        canvas.text_centered(w / 2, 14, &self.title, colors::DARK, 2);
        canvas.text_centered(
            (plot.left + plot.right) / 2,
            h - 8 - text_height(1) as i64,
            &self.x_label,
            colors::DARK,
            1,
        );
        if !self.y_label.is_empty() {
            canvas.text(8, MARGIN_TOP - 16, &self.y_label, colors::DARK, 1);
        }

        self.draw_y_axis(&mut canvas, &plot);

        if !self.has_data() {
            canvas.text_centered(
                (plot.left + plot.right) / 2,
                (plot.top + plot.bottom) / 2,
                "No data",
                colors::FRAME,
                2,
            );
            canvas.stroke_rect(plot.left, plot.top, plot.right - plot.left + 1, plot.bottom - plot.top + 1, colors::FRAME);
            return RenderedChart::from_image(canvas.into_image());
        }

        self.draw_x_axis(&mut canvas, &plot);

        for s in &self.series {
            if let Series::Fill { points, color, alpha } = s {
                let mut sorted = points.clone();
                sorted.sort_by_key(|(t, _)| *t);
                if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
                    let base = plot.py(0.0_f64.clamp(plot.y.0, plot.y.1));
                    let mut poly: Vec<(f64, f64)> =
                        sorted.iter().map(|(t, v)| (plot.px(seconds(*t)), plot.py(*v))).collect();
                    poly.push((plot.px(seconds(last.0)), base));
                    poly.push((plot.px(seconds(first.0)), base));
                    canvas.fill_polygon(&poly, *color, *alpha);
                }
            }
        }

        for s in &self.series {
            match s {
                Series::Scatter {
                    points,
                    color,
                    marker,
                    size,
                    ..
                } => {
                    for (t, v) in points {
                        let (x, y) = (plot.px(seconds(*t)) as i64, plot.py(*v) as i64);
                        if y < plot.top || y > plot.bottom {
                            continue;
                        }
                        draw_marker(&mut canvas, x, y, *marker, *size, *color);
                    }
                }
                Series::HLine { y, color, dashed, .. } => {
                    let py = plot.py(*y) as i64;
                    if py >= plot.top && py <= plot.bottom {
                        if *dashed {
                            canvas.dashed_hline(plot.left, plot.right, py, *color, 2);
                        } else {
                            canvas.line(plot.left, py, plot.right, py, *color, 2);
                        }
                    }
                }
                Series::Fill { .. } => {}
            }
        }

        canvas.stroke_rect(
            plot.left,
            plot.top,
            plot.right - plot.left + 1,
            plot.bottom - plot.top + 1,
            colors::FRAME,
        );

        self.draw_legend(&mut canvas, &plot);

        RenderedChart::from_image(canvas.into_image())
    }

    fn draw_y_axis(&self, canvas: &mut Canvas, plot: &PlotArea) {
        let ticks = nice_ticks(plot.y.0, plot.y.1, 6);
        let step = if ticks.len() > 1 { ticks[1] - ticks[0] } else { 1.0 };
        let decimals = decimals_for(step);

        for t in ticks {
            let y = plot.py(t) as i64;
            if self.grid {
                canvas.dashed_hline(plot.left, plot.right, y, colors::GRID, 1);
            }
            canvas.line(plot.left - 4, y, plot.left, y, colors::FRAME, 1);
            canvas.text_right(
                plot.left - 8,
                y - text_height(1) as i64 / 2,
                &format!("{t:.decimals$}"),
                colors::DARK,
                1,
            );
        }
    }

    fn draw_x_axis(&self, canvas: &mut Canvas, plot: &PlotArea) {
        let label_w = text_width("0000-00-00", 1) as i64 + 12;
        let max_ticks = ((plot.right - plot.left) / label_w).clamp(2, 6);
        let span = plot.x.1 - plot.x.0;

        for i in 0..max_ticks {
            let xv = plot.x.0 + span * i as f64 / (max_ticks - 1) as f64;
            let x = plot.px(xv) as i64;
            canvas.line(x, plot.bottom, x, plot.bottom + 4, colors::FRAME, 1);
            if let Some(dt) = DateTime::from_timestamp(xv as i64, 0) {
                let label = dt.naive_utc().format("%Y-%m-%d").to_string();
                canvas.text_centered(x, plot.bottom + 10, &label, colors::DARK, 1);
            }
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, plot: &PlotArea) {
        let entries: Vec<(&str, Color, bool)> = self
            .series
            .iter()
            .filter_map(|s| match s {
                Series::Scatter {
                    label: Some(l), color, ..
                } => Some((l.as_str(), *color, false)),
                Series::HLine {
                    label: Some(l), color, ..
                } => Some((l.as_str(), *color, true)),
                _ => None,
            })
            .collect();
        if entries.is_empty() {
            return;
        }

        let row_h = 14;
        let text_w = entries
            .iter()
            .map(|(l, _, _)| text_width(l, 1) as i64)
            .max()
            .unwrap_or(0);
        let box_w = text_w + 40;
        let box_h = entries.len() as i64 * row_h + 8;
        let x0 = plot.right - box_w - 6;
        let y0 = plot.top + 6;

        canvas.fill_rect(x0, y0, box_w, box_h, colors::WHITE);
        canvas.stroke_rect(x0, y0, box_w, box_h, colors::GRID);

        for (i, (label, color, is_line)) in entries.iter().enumerate() {
            let cy = y0 + 4 + i as i64 * row_h + row_h / 2;
            if *is_line {
                canvas.dashed_hline(x0 + 6, x0 + 26, cy, *color, 2);
            } else {
                canvas.disk(x0 + 16, cy, 3, *color);
            }
            canvas.text(x0 + 32, cy - 3, label, colors::DARK, 1);
        }
    }
}

struct PlotArea {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    x: (f64, f64),
    y: (f64, f64),
}

impl PlotArea {
    fn px(&self, v: f64) -> f64 {
        let span = (self.x.1 - self.x.0).max(f64::EPSILON);
        self.left as f64 + (v - self.x.0) / span * (self.right - self.left) as f64
    }

    fn py(&self, v: f64) -> f64 {
        let span = (self.y.1 - self.y.0).max(f64::EPSILON);
        self.bottom as f64 - (v - self.y.0) / span * (self.bottom - self.top) as f64
    }
}

fn seconds(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

fn draw_marker(canvas: &mut Canvas, x: i64, y: i64, marker: Marker, size: u32, color: Color) {
    let r = (size as i64).max(1);
    match marker {
        Marker::Disk => canvas.disk(x, y, r, color),
        Marker::Square => canvas.fill_rect(x - r, y - r, 2 * r + 1, 2 * r + 1, color),
    }
}

/// Round tick positions covering [lo, hi], roughly `target` of them.
pub(crate) fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || target < 2 {
        return vec![lo];
    }
    let raw = (hi - lo) / (target - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * mag;

    let mut ticks = Vec::new();
    let mut t = (lo / step).ceil() * step;
    while t <= hi + step * 1e-9 && ticks.len() < MAX_TICKS {
        ticks.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
        let next = t + step;
        // step below the float resolution at this magnitude
        if next <= t {
            break;
        }
        t = next;
    }
    ticks
}

fn decimals_for(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    }
}
