//! Braille line/area chart for the objects-log series

use ratatui::prelude::*;

use crate::themes::Theme;

// ─── Braille canvas ─────────────────────────────────────────────────

/// Braille dot positions (each cell is 2 columns x 4 rows)
/// Bit positions:
///   0x01 0x08
///   0x02 0x10
///   0x04 0x20
///   0x40 0x80
const BRAILLE_BASE: u32 = 0x2800;
const BRAILLE_BITS: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Dot grid backing one chart render; colour is tracked per terminal cell
struct BrailleCanvas {
    cols: usize,
    rows: usize,
    dots: Vec<bool>,
    colors: Vec<Option<Color>>,
}

impl BrailleCanvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            dots: vec![false; cols * 2 * rows * 4],
            colors: vec![None; cols * rows],
        }
    }

    fn dot_width(&self) -> usize {
        self.cols * 2
    }

    fn dot_height(&self) -> usize {
        self.rows * 4
    }

    fn set(&mut self, gx: usize, gy: usize, color: Color) {
        let width = self.dot_width();
        let gx = gx.min(width - 1);
        let gy = gy.min(self.dot_height() - 1);
        self.dots[gy * width + gx] = true;
        self.colors[(gy / 4) * self.cols + gx / 2] = Some(color);
    }

    /// Set a dot and, if `baseline` is given, every dot between it and the baseline
    fn column(&mut self, gx: usize, gy: usize, baseline: Option<usize>, color: Color) {
        match baseline {
            Some(base) => {
                for y in gy.min(base)..=gy.max(base) {
                    self.set(gx, y, color);
                }
            }
            None => self.set(gx, gy, color),
        }
    }

    /// Bresenham line between two dots
    fn line(&mut self, from: (i32, i32), to: (i32, i32), baseline: Option<usize>, color: Color) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (x0, y0);

        loop {
            self.column(cx.max(0) as usize, cy.max(0) as usize, baseline, color);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    fn draw(&self, origin_x: u16, origin_y: u16, buf: &mut Buffer, fallback: Color) {
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let mut braille: u32 = 0;
                for (row, bits) in BRAILLE_BITS.iter().enumerate() {
                    for (col, bit) in bits.iter().enumerate() {
                        let gy = cy * 4 + row;
                        let gx = cx * 2 + col;
                        if self.dots[gy * self.dot_width() + gx] {
                            braille |= bit;
                        }
                    }
                }

                if braille != 0 {
                    let ch = char::from_u32(BRAILLE_BASE + braille).unwrap_or(' ');
                    let pos = (origin_x + cx as u16, origin_y + cy as u16);
                    if let Some(cell) = buf.cell_mut(pos) {
                        cell.set_char(ch);
                        let color = self.colors[cy * self.cols + cx].unwrap_or(fallback);
                        cell.set_style(Style::default().fg(color));
                    }
                }
            }
        }
    }
}

// ─── Line chart ─────────────────────────────────────────────────────

/// A data series for the line chart
#[derive(Clone, Debug)]
pub struct Series {
    pub data: Vec<f64>,
    pub color: Color,
    pub label: String,
    /// Fill the area between the line and zero
    pub fill: bool,
}

impl Series {
    pub fn new(label: impl Into<String>, color: Color, data: Vec<f64>) -> Self {
        Self {
            data,
            color,
            label: label.into(),
            fill: false,
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

/// Line chart using braille-dot rendering for high resolution.
///
/// Points are spread evenly across the full width, so the chart always
/// shows the whole series whatever the container size. Non-finite values
/// break the line.
#[derive(Clone, Debug, Default)]
pub struct LineChart {
    pub series: Vec<Series>,
    /// Labels for the first and last x position
    pub x_labels: Option<(String, String)>,
}

impl LineChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x_labels(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.x_labels = Some((first.into(), last.into()));
        self
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Y range over all finite values; filled charts always include zero
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self
            .series
            .iter()
            .flat_map(|s| s.data.iter())
            .copied()
            .filter(|v| v.is_finite())
            .peekable();
        values.peek()?;

        let (mut min_val, mut max_val) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if self.series.iter().any(|s| s.fill) {
            min_val = min_val.min(0.0);
            max_val = max_val.max(0.0);
        }
        Some((min_val, max_val))
    }

    fn footer_rows(&self) -> u16 {
        1 + u16::from(self.series.len() > 1)
    }

    /// Render the line chart into the given area
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.height < 4 || area.width < 12 {
            return;
        }

        // Reserve space for Y-axis labels (8 chars), x labels and legend
        let y_label_width: u16 = 8;
        let chart_x = area.x + y_label_width;
        let chart_width = area.width.saturating_sub(y_label_width);
        let chart_height = area.height.saturating_sub(self.footer_rows());

        if chart_width == 0 || chart_height == 0 {
            return;
        }

        let Some((min_val, max_val)) = self.value_range() else {
            let msg = "No data";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            buf.set_string(x, area.y + area.height / 2, msg, Style::default().fg(theme.text_muted));
            return;
        };
        let range = if (max_val - min_val).abs() < f64::EPSILON {
            1.0
        } else {
            max_val - min_val
        };

        let mut canvas = BrailleCanvas::new(chart_width as usize, chart_height as usize);
        let grid_w = canvas.dot_width();
        let grid_h = canvas.dot_height();
        let to_gy = |v: f64| -> usize {
            let normalized = ((v - min_val) / range).clamp(0.0, 1.0);
            ((1.0 - normalized) * (grid_h - 1) as f64).round() as usize
        };
        let baseline = to_gy(0.0);

        for series in &self.series {
            let n = series.data.len();
            let to_gx = |i: usize| -> usize {
                if n <= 1 {
                    0
                } else {
                    (i as f64 / (n - 1) as f64 * (grid_w - 1) as f64).round() as usize
                }
            };
            let fill_to = series.fill.then_some(baseline);

            let mut prev: Option<(i32, i32)> = None;
            for (i, &value) in series.data.iter().enumerate() {
                if !value.is_finite() {
                    prev = None;
                    continue;
                }
                let point = (to_gx(i) as i32, to_gy(value) as i32);
                match prev {
                    Some(from) => canvas.line(from, point, fill_to, series.color),
                    None => canvas.column(point.0 as usize, point.1 as usize, fill_to, series.color),
                }
                prev = Some(point);
            }
        }

        canvas.draw(chart_x, area.y, buf, theme.accent);

        // Y-axis labels (top, middle, bottom)
        let labels = [
            (area.y, format_value(max_val)),
            (area.y + chart_height / 2, format_value((max_val + min_val) / 2.0)),
            (area.y + chart_height.saturating_sub(1), format_value(min_val)),
        ];
        for (y, label) in &labels {
            let padded = format!("{:>7}", label);
            let text: String = padded.chars().take(y_label_width as usize - 1).collect();
            buf.set_string(area.x, *y, text, Style::default().fg(theme.text_muted));
        }

        // X-axis: first and last timestamp
        let axis_y = area.y + chart_height;
        if let Some((first, last)) = &self.x_labels {
            let style = Style::default().fg(theme.text_muted);
            buf.set_stringn(chart_x, axis_y, first, chart_width as usize, style);
            let last_width = last.chars().count() as u16;
            if last_width + first.chars().count() as u16 + 1 < chart_width {
                buf.set_string(area.right() - last_width, axis_y, last, style);
            }
        }

        // Legend (if multiple series)
        if self.series.len() > 1 {
            let legend_y = axis_y + 1;
            let mut lx = chart_x;
            for series in &self.series {
                if lx + series.label.chars().count() as u16 + 4 > area.right() {
                    break;
                }
                buf.set_string(lx, legend_y, "\u{25CF}", Style::default().fg(series.color));
                lx += 1;
                buf.set_string(lx, legend_y, &series.label, Style::default().fg(theme.text_secondary));
                lx += series.label.chars().count() as u16 + 2;
            }
        }
    }
}

fn format_value(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.abs() >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{:.1}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(chart: &LineChart, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf, &Theme::default());
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    fn is_braille(s: &str) -> bool {
        s.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn test_canvas_clamps_dots_to_grid() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set(0, 0, Color::Red);
        canvas.set(100, 100, Color::Blue);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        canvas.draw(0, 0, &mut buf, Color::White);
        // Top-left dot in the first cell, bottom-right dot in the last
        assert_eq!(buf[(0u16, 0u16)].symbol(), "\u{2801}");
        assert_eq!(buf[(1u16, 0u16)].symbol(), "\u{2880}");
        assert_eq!(buf[(1u16, 0u16)].fg, Color::Blue);
    }

    #[test]
    fn test_value_range_includes_zero_when_filled() {
        let mut chart = LineChart::new();
        chart.add_series(Series::new("a", Color::Red, vec![5.0, 7.0]));
        assert_eq!(chart.value_range(), Some((5.0, 7.0)));

        chart.add_series(Series::new("b", Color::Blue, vec![6.0, f64::NAN]).filled());
        assert_eq!(chart.value_range(), Some((0.0, 7.0)));
    }

    #[test]
    fn test_renders_braille_line() {
        let mut chart = LineChart::new().with_x_labels("08:00", "09:00");
        chart.add_series(Series::new("Score", Color::Green, vec![0.0, 1.0, 0.5, 0.8]));
        let lines = rendered(&chart, 40, 10);
        assert!(lines.iter().any(|l| is_braille(l)));
        assert!(lines[9].contains("08:00"));
        assert!(lines[9].contains("09:00"));
    }

    #[test]
    fn test_all_nan_shows_no_data() {
        let mut chart = LineChart::new();
        chart.add_series(Series::new("Score", Color::Green, vec![f64::NAN, f64::NAN]));
        let lines = rendered(&chart, 40, 10);
        assert!(lines.iter().any(|l| l.contains("No data")));
        assert!(!lines.iter().any(|l| is_braille(l)));
    }

    #[test]
    fn test_legend_lists_every_series() {
        let mut chart = LineChart::new();
        chart.add_series(Series::new("Detected", Color::Green, vec![1.0, 2.0]).filled());
        chart.add_series(Series::new("Unsafe", Color::Red, vec![0.0, 1.0]).filled());
        let lines = rendered(&chart, 60, 10);
        assert!(lines[9].contains("Detected"));
        assert!(lines[9].contains("Unsafe"));
    }

    #[test]
    fn test_tiny_area_renders_nothing() {
        let mut chart = LineChart::new();
        chart.add_series(Series::new("a", Color::Red, vec![1.0, 2.0]));
        let lines = rendered(&chart, 10, 3);
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12.0");
        assert_eq!(format_value(2_500.0), "2.5K");
        assert_eq!(format_value(3_000_000.0), "3.0M");
    }
}
