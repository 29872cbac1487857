use eframe::egui::Color32;
use thiserror::Error;

use super::prepare::{GroupedSeries, PreparedSeries, SeriesPair};
use super::ChartKind;
use crate::color::ColorMap;
use crate::data::model::CellValue;

/// Angle, in degrees counter-clockwise from the positive x axis, of the first wedge.
pub const PIE_START_ANGLE: f64 = 140.0;
pub const BAR_WIDTH: f64 = 0.8;
pub const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("nothing to draw: the series is empty")]
    EmptySeries,
    /// Reachable from user data: preparation only refuses a zero total, so a
    /// category whose values sum below zero arrives here and is refused.
    #[error("category '{label}' has a negative total and cannot be drawn as a wedge")]
    NegativeWedge { label: String },
}

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

/// Title and axis captions of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl ChartLabels {
    fn new(kind: ChartKind, x: &str, y: &str) -> Self {
        let title = match kind {
            ChartKind::Bar => format!("Bar Graph of {y} by {x}"),
            ChartKind::Line => format!("Line Graph of {y} by {x}"),
            ChartKind::Pie => format!("Pie Chart of {y} by {x}"),
        };
        ChartLabels {
            title,
            x_axis: x.to_string(),
            y_axis: y.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    /// Slot on the x axis, equal to the row index.
    pub position: f64,
    pub value: f64,
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    /// Group sum the wedge stands for.
    pub value: f64,
    pub share: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub color: Color32,
}

impl Wedge {
    /// Percentage caption, e.g. `42.9%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.share * 100.0)
    }

    /// Direction of the wedge's bisector, in degrees.
    pub fn mid_angle(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// The drawable content of a figure.
#[derive(Debug, Clone, PartialEq)]
pub enum Marks {
    Bars {
        bars: Vec<BarMark>,
        /// One tick label per row, including rows without a bar.
        tick_labels: Vec<String>,
    },
    Line {
        /// Runs of consecutive complete points; a missing coordinate starts a new run.
        segments: Vec<Vec<[f64; 2]>>,
        color: Color32,
    },
    Pie(Vec<Wedge>),
}

/// A finished chart, independent of any drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub kind: ChartKind,
    pub labels: ChartLabels,
    pub marks: Marks,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Turn a prepared series into a figure.
pub fn render(series: &PreparedSeries) -> Result<Figure, RenderError> {
    match series {
        PreparedSeries::Bar(pair) => render_bar(pair),
        PreparedSeries::Line(pair) => render_line(pair),
        PreparedSeries::Pie(grouped) => render_pie(grouped),
    }
}

fn render_bar(pair: &SeriesPair<CellValue>) -> Result<Figure, RenderError> {
    if pair.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    let colors = ColorMap::new(pair.points.iter().map(|(c, _)| c));

    let tick_labels = pair.points.iter().map(|(c, _)| c.to_string()).collect();
    let bars = pair
        .points
        .iter()
        .enumerate()
        .filter_map(|(row, (category, value))| {
            value.map(|value| BarMark {
                position: row as f64,
                value,
                label: category.to_string(),
                color: colors.color_for(category),
            })
        })
        .collect();

    Ok(Figure {
        kind: ChartKind::Bar,
        labels: ChartLabels::new(ChartKind::Bar, &pair.x_name, &pair.y_name),
        marks: Marks::Bars { bars, tick_labels },
    })
}

fn render_line(pair: &SeriesPair<Option<f64>>) -> Result<Figure, RenderError> {
    if pair.is_empty() {
        return Err(RenderError::EmptySeries);
    }

    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for point in &pair.points {
        match point {
            (Some(x), Some(y)) => current.push([*x, *y]),
            _ if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Ok(Figure {
        kind: ChartKind::Line,
        labels: ChartLabels::new(ChartKind::Line, &pair.x_name, &pair.y_name),
        marks: Marks::Line {
            segments,
            color: LINE_COLOR,
        },
    })
}

fn render_pie(grouped: &GroupedSeries) -> Result<Figure, RenderError> {
    if grouped.groups.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    if let Some(negative) = grouped.groups.iter().find(|g| g.share < 0.0) {
        return Err(RenderError::NegativeWedge {
            label: negative.label.to_string(),
        });
    }

    log::debug!(
        "Pie of '{}' over {} groups, total {}",
        grouped.value_name,
        grouped.groups.len(),
        grouped.total
    );
    let colors = ColorMap::new(grouped.groups.iter().map(|g| &g.label));
    let mut start = PIE_START_ANGLE;
    let wedges = grouped
        .groups
        .iter()
        .map(|g| {
            let sweep = g.share * 360.0;
            let wedge = Wedge {
                label: g.label.to_string(),
                value: g.sum,
                share: g.share,
                start_deg: start,
                sweep_deg: sweep,
                color: colors.color_for(&g.label),
            };
            start += sweep;
            wedge
        })
        .collect();

    Ok(Figure {
        kind: ChartKind::Pie,
        labels: ChartLabels::new(ChartKind::Pie, &grouped.category_name, &grouped.value_name),
        marks: Marks::Pie(wedges),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::prepare::{prepare_bar, prepare_line, prepare_pie};
    use crate::data::loader::load_bytes;

    #[test]
    fn titles_follow_chart_templates() {
        let table = load_bytes(b"region,x,y\nNorth,1,10\nSouth,2,20\n").expect("csv");

        let bar = prepare_bar(Some(&table), "region", "y").expect("bar");
        let line = prepare_line(Some(&table), "x", "y").expect("line");
        let pie = prepare_pie(Some(&table), "region", "y").expect("pie");

        let bar = render(&PreparedSeries::Bar(bar)).expect("figure");
        assert_eq!(bar.labels.title, "Bar Graph of y by region");
        assert_eq!(bar.labels.x_axis, "region");
        assert_eq!(bar.labels.y_axis, "y");

        let line = render(&PreparedSeries::Line(line)).expect("figure");
        assert_eq!(line.labels.title, "Line Graph of y by x");

        let pie = render(&PreparedSeries::Pie(pie)).expect("figure");
        assert_eq!(pie.labels.title, "Pie Chart of y by region");
    }

    #[test]
    fn bars_skip_missing_values_but_keep_ticks() {
        let table = load_bytes(b"k,v\na,1\nb,\na,3\n").expect("csv");
        let pair = prepare_bar(Some(&table), "k", "v").expect("bar");
        let figure = render(&PreparedSeries::Bar(pair)).expect("figure");

        let Marks::Bars { bars, tick_labels } = figure.marks else {
            panic!("expected bars");
        };
        assert_eq!(tick_labels, vec!["a", "b", "a"]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].position, 2.0);
        assert_eq!(bars[0].color, bars[1].color);
    }

    #[test]
    fn line_breaks_at_missing_points() {
        let table = load_bytes(b"x,y\n1,1\n2,\n3,3\n4,4\n").expect("csv");
        let pair = prepare_line(Some(&table), "x", "y").expect("line");
        let figure = render(&PreparedSeries::Line(pair)).expect("figure");

        let Marks::Line { segments, .. } = figure.marks else {
            panic!("expected a line");
        };
        assert_eq!(segments, vec![vec![[1.0, 1.0]], vec![[3.0, 3.0], [4.0, 4.0]]]);
    }

    #[test]
    fn wedges_cover_full_circle_from_start_angle() {
        let table = load_bytes(b"region,sales\nNorth,10\nSouth,20\nNorth,5\n").expect("csv");
        let pie = prepare_pie(Some(&table), "region", "sales").expect("pie");
        let figure = render(&PreparedSeries::Pie(pie)).expect("figure");

        let Marks::Pie(wedges) = figure.marks else {
            panic!("expected a pie");
        };
        assert_eq!(wedges[0].start_deg, PIE_START_ANGLE);
        let swept: f64 = wedges.iter().map(|w| w.sweep_deg).sum();
        assert!((swept - 360.0).abs() < 1e-9);
        assert_eq!(wedges[0].percent_label(), "42.9%");
        assert_eq!(wedges[1].percent_label(), "57.1%");
        assert!((wedges[1].start_deg - (PIE_START_ANGLE + wedges[0].sweep_deg)).abs() < 1e-12);
    }

    #[test]
    fn empty_series_cannot_be_rendered() {
        let pair = SeriesPair::<Option<f64>> {
            x_name: "x".into(),
            y_name: "y".into(),
            points: Vec::new(),
        };
        assert_eq!(
            render(&PreparedSeries::Line(pair)),
            Err(RenderError::EmptySeries)
        );
    }

    #[test]
    fn negative_group_is_not_drawn() {
        let table = load_bytes(b"k,v\na,10\nb,-2\n").expect("csv");
        let pie = prepare_pie(Some(&table), "k", "v").expect("pie");
        assert_eq!(
            render(&PreparedSeries::Pie(pie)),
            Err(RenderError::NegativeWedge { label: "b".into() })
        );
    }
}
