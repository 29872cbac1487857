use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::render::{BarMark, Figure, Marks, Wedge, BAR_WIDTH};
use crate::state::AppState;

/// Arc resolution of pie wedges, in points per full turn.
const ARC_STEPS: f64 = 180.0;

// ---------------------------------------------------------------------------
// Chart view (central panel)
// ---------------------------------------------------------------------------

/// Render the latest chart action in the central panel.
pub fn chart_view(ui: &mut Ui, state: &AppState) {
    let Some(output) = &state.output else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.table.is_some() {
                "Pick columns in Plot Settings and press Generate"
            } else {
                "Open a CSV file to begin  (File → Open…)"
            };
            ui.heading(hint);
        });
        return;
    };

    ui.weak(output.request.to_string());

    match &output.result {
        Ok(figure) => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(&figure.labels.title);
            });
            draw_figure(ui, figure);
        }
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
        }
    }
}

fn draw_figure(ui: &mut Ui, figure: &Figure) {
    log::trace!("Drawing {} figure", figure.kind);
    match &figure.marks {
        Marks::Bars { bars, tick_labels } => draw_bars(ui, figure, bars, tick_labels.clone()),
        Marks::Line { segments, color } => draw_line(ui, figure, segments, *color),
        Marks::Pie(wedges) => draw_pie(ui, wedges),
    }
}

fn draw_bars(ui: &mut Ui, figure: &Figure, marks: &[BarMark], tick_labels: Vec<String>) {
    let bars: Vec<Bar> = marks
        .iter()
        .map(|m| {
            Bar::new(m.position, m.value)
                .name(&m.label)
                .fill(m.color)
                .width(BAR_WIDTH)
        })
        .collect();

    Plot::new("bar_chart")
        .x_axis_label(&figure.labels.x_axis)
        .y_axis_label(&figure.labels.y_axis)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            tick_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&figure.labels.y_axis));
        });
}

fn draw_line(ui: &mut Ui, figure: &Figure, segments: &[Vec<[f64; 2]>], color: Color32) {
    Plot::new("line_chart")
        .x_axis_label(&figure.labels.x_axis)
        .y_axis_label(&figure.labels.y_axis)
        .show_grid(true)
        .show(ui, |plot_ui| {
            for segment in segments {
                let line = Line::new(PlotPoints::from(segment.clone()))
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);
                plot_ui.points(
                    Points::new(PlotPoints::from(segment.clone()))
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

fn draw_pie(ui: &mut Ui, wedges: &[Wedge]) {
    Plot::new("pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for wedge in wedges {
                plot_ui.polygon(
                    Polygon::new(wedge_outline(wedge))
                        .name(format!("{}: {}", wedge.label, wedge.value))
                        .fill_color(wedge.color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = wedge.mid_angle().to_radians();
                let (label_x, label_y) = (1.15 * mid.cos(), 1.15 * mid.sin());
                plot_ui.text(Text::new(PlotPoint::new(label_x, label_y), wedge.label.clone()));
                let (pct_x, pct_y) = (0.6 * mid.cos(), 0.6 * mid.sin());
                plot_ui.text(
                    Text::new(PlotPoint::new(pct_x, pct_y), wedge.percent_label())
                        .color(Color32::WHITE),
                );
            }
        });
}

/// Closed outline of a unit-radius wedge: centre, then the arc.
fn wedge_outline(wedge: &Wedge) -> PlotPoints {
    let steps = ((wedge.sweep_deg / 360.0) * ARC_STEPS).ceil().max(1.0) as usize;
    let start = wedge.start_deg.to_radians();
    let sweep = wedge.sweep_deg.to_radians();

    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + sweep * (i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    PlotPoints::from(points)
}
