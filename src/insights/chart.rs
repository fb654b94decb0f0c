//! Text charts. A [Chart] describes what should be drawn, [render_chart] turns it into a
//! [Figure] that can be printed to a terminal.

use std::fmt::Display;

use ansi_term::{Colour, Style};

use crate::utils::percentage::share_percentage;

/// Amount of columns the widest value takes.
const PLOT_WIDTH: usize = 40;

pub const CORNFLOWER_BLUE: Colour = Colour::RGB(100, 149, 237);
pub const LIGHT_SALMON: Colour = Colour::RGB(255, 160, 122);

/// Soft colours for distinguishing slices of a pie chart.
pub const SOFT_PALETTE: [Colour; 12] = [
    Colour::RGB(31, 119, 180),
    Colour::RGB(255, 127, 14),
    Colour::RGB(44, 160, 44),
    Colour::RGB(214, 39, 40),
    Colour::RGB(148, 103, 189),
    Colour::RGB(140, 86, 75),
    Colour::RGB(227, 119, 194),
    Colour::RGB(127, 127, 127),
    Colour::RGB(188, 189, 34),
    Colour::RGB(23, 190, 207),
    Colour::RGB(240, 128, 128),
    Colour::RGB(102, 205, 170),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone)]
pub struct Chart {
    kind: ChartKind,
    title: String,
    series: Vec<(String, f64)>,
    colours: Vec<Colour>,
    x_label: Option<String>,
    y_label: Option<String>,
}

impl Chart {
    pub fn new(kind: ChartKind, title: impl Into<String>, series: Vec<(String, f64)>) -> Self {
        Self {
            kind,
            title: title.into(),
            series,
            colours: vec![],
            x_label: None,
            y_label: None,
        }
    }

    pub fn with_colour(self, colour: Colour) -> Self {
        self.with_colours(vec![colour])
    }

    /// Colours are assigned to series points in order and repeat when there are fewer colours
    /// than points.
    pub fn with_colours(self, colours: Vec<Colour>) -> Self {
        Self { colours, ..self }
    }

    pub fn with_x_label(self, label: impl Into<String>) -> Self {
        Self {
            x_label: Some(label.into()),
            ..self
        }
    }

    pub fn with_y_label(self, label: impl Into<String>) -> Self {
        Self {
            y_label: Some(label.into()),
            ..self
        }
    }

    fn colour(&self, index: usize) -> Option<Colour> {
        if self.colours.is_empty() {
            None
        } else {
            Some(self.colours[index % self.colours.len()])
        }
    }
}

/// A rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    lines: Vec<String>,
}

impl Figure {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Renders the chart. With `styled` set the output contains ANSI escape codes.
pub fn render_chart(chart: &Chart, styled: bool) -> Figure {
    let painter = Painter { styled };
    let mut lines = vec![painter.paint(Style::new().bold(), &chart.title)];

    match chart.kind {
        ChartKind::Line | ChartKind::Bar => render_axis_chart(chart, &painter, &mut lines),
        ChartKind::Pie => render_pie_chart(chart, &painter, &mut lines),
    }

    Figure { lines }
}

struct Painter {
    styled: bool,
}

impl Painter {
    fn paint(&self, style: Style, text: &str) -> String {
        if self.styled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_opt(&self, colour: Option<Colour>, text: &str) -> String {
        match colour {
            Some(colour) => self.paint(colour.normal(), text),
            None => text.to_string(),
        }
    }
}

fn scale(series: &[(String, f64)]) -> f64 {
    let max = series.iter().map(|v| v.1).fold(0., f64::max);
    if max > 0. {
        max
    } else {
        1.
    }
}

fn column(value: f64, scale: f64) -> usize {
    ((value.max(0.) / scale) * (PLOT_WIDTH - 1) as f64).round() as usize
}

fn label_width(chart: &Chart) -> usize {
    chart
        .series
        .iter()
        .map(|v| v.0.chars().count())
        .chain(chart.x_label.iter().map(|v| v.chars().count()))
        .max()
        .unwrap_or(0)
}

fn render_axis_chart(chart: &Chart, painter: &Painter, lines: &mut Vec<String>) {
    let width = label_width(chart);
    if chart.x_label.is_some() || chart.y_label.is_some() {
        lines.push(format!(
            "{:<width$} │ {}",
            chart.x_label.as_deref().unwrap_or(""),
            chart.y_label.as_deref().unwrap_or("")
        ));
    }

    let scale = scale(&chart.series);
    let mut previous_column: Option<usize> = None;

    for (index, (label, value)) in chart.series.iter().enumerate() {
        let column = column(*value, scale);
        let plot = match chart.kind {
            ChartKind::Bar => "█".repeat(column + 1),
            _ => {
                // Each point is connected to the previous one to show the trend.
                let mut row = vec![' '; PLOT_WIDTH];
                if let Some(previous) = previous_column {
                    let (from, to) = (previous.min(column), previous.max(column));
                    for cell in row.iter_mut().take(to).skip(from) {
                        *cell = '─';
                    }
                }
                row[column] = 'o';
                previous_column = Some(column);
                row.into_iter().collect::<String>()
            }
        };
        let plot = format!("{plot:<PLOT_WIDTH$}");
        lines.push(format!(
            "{label:<width$} │ {} {value:.2}",
            painter.paint_opt(chart.colour(index), &plot)
        ));
    }
}

fn render_pie_chart(chart: &Chart, painter: &Painter, lines: &mut Vec<String>) {
    let width = label_width(chart);
    let whole: f64 = chart.series.iter().map(|v| v.1.max(0.)).sum();

    let mut strip = String::new();
    for (index, (label, value)) in chart.series.iter().enumerate() {
        let share = share_percentage(value.max(0.), whole);
        let cells = ((*share / 100.) * PLOT_WIDTH as f64).round() as usize;
        let fill = if painter.styled {
            "█".to_string()
        } else {
            label.chars().next().map(String::from).unwrap_or_default()
        };
        strip += &painter.paint_opt(chart.colour(index), &fill.repeat(cells));

        lines.push(format!(
            "{} {label:<width$} {:>6}",
            painter.paint_opt(chart.colour(index), "■"),
            share.to_string(),
        ));
    }
    lines.push(strip);
}
