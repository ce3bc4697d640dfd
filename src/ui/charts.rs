use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, Painter, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints,
    Points, Text,
};

use crate::color::{bucket_color, generate_palette};
use crate::data::bucket::Metric;
use crate::data::filter::{FilterCriteria, RankedTrack};
use crate::data::views;

const PLOT_HEIGHT: f32 = 280.0;
const PIE_SIZE: f32 = 180.0;

/// Axis labels for a categorical axis whose categories sit at 0, 1, 2, …
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Top tracks bar chart
// ---------------------------------------------------------------------------

pub fn top_tracks_chart(ui: &mut Ui, rows: &[RankedTrack]) {
    ui.heading("Top most streamed songs");
    let entries = views::bar_view(rows);
    let color = generate_palette(1).first().copied().unwrap_or(Color32::LIGHT_BLUE);

    Plot::new("top_tracks")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_label("Song")
        .y_axis_label("Streams")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(category_formatter(views::track_labels(rows)))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = entries
                .iter()
                .enumerate()
                .map(|(i, e)| Bar::new(i as f64, e.value).name(&e.label).width(0.6))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("Streams").color(color));

            for (i, e) in entries.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, e.value), RichText::new(&e.text).small())
                        .anchor(egui::Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Playlist membership per platform
// ---------------------------------------------------------------------------

pub fn playlist_chart(ui: &mut Ui, rows: &[RankedTrack]) {
    ui.heading("Top songs by platform");
    let series = views::playlist_view(rows);
    let colors = generate_palette(series.len());

    Plot::new("playlists")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_label("Song")
        .y_axis_label("Number of playlists")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(category_formatter(views::track_labels(rows)))
        .show(ui, |plot_ui| {
            for (s, color) in series.iter().zip(colors) {
                let points: Vec<[f64; 2]> =
                    s.points.iter().map(|&(i, v)| [i as f64, v]).collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(s.name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(s.name)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Streams by release month
// ---------------------------------------------------------------------------

fn month_ordinal(date: NaiveDate) -> f64 {
    (date.year() as f64) * 12.0 + date.month0() as f64
}

fn month_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let ordinal = mark.value.round();
    if (mark.value - ordinal).abs() > 1e-6 {
        return String::new();
    }
    let ordinal = ordinal as i64;
    let year = ordinal.div_euclid(12);
    let month = ordinal.rem_euclid(12) + 1;
    format!("{year}-{month:02}")
}

pub fn monthly_chart(ui: &mut Ui, rows: &[RankedTrack], criteria: &FilterCriteria) {
    ui.heading(format!(
        "Streams of songs released {}–{} (months {} to {})",
        criteria.years.0, criteria.years.1, criteria.months.0, criteria.months.1
    ));
    let points: Vec<[f64; 2]> = views::monthly_view(rows)
        .into_iter()
        .map(|(date, streams)| [month_ordinal(date), streams])
        .collect();
    let color = generate_palette(3).get(2).copied().unwrap_or(Color32::LIGHT_BLUE);

    Plot::new("monthly")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_label("Month")
        .y_axis_label("Streams")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 12.0, 120.0]))
        .x_axis_formatter(month_label)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Streams")
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).color(color).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Bucketed pie charts
// ---------------------------------------------------------------------------

/// Fill the circular sector between angles `from` and `to` (radians).
/// Split into quarter-turn pieces so each polygon stays convex.
fn paint_sector(painter: &Painter, center: Pos2, radius: f32, from: f32, to: f32, fill: Color32) {
    let sweep = to - from;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece = sweep / pieces as f32;
    for p in 0..pieces {
        let start = from + piece * p as f32;
        let segments = 16;
        let mut points = Vec::with_capacity(segments + 2);
        points.push(center);
        for s in 0..=segments {
            let angle = start + piece * s as f32 / segments as f32;
            points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
        }
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }
}

pub fn pie_chart(ui: &mut Ui, rows: &[RankedTrack], metric: Metric) {
    ui.strong(metric.title());
    let slices = views::pie_view(rows, metric);
    if slices.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let outline = Stroke::new(1.0, ui.visuals().weak_text_color());
    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(PIE_SIZE, PIE_SIZE), Sense::hover());
        let center = response.rect.center();
        let radius = PIE_SIZE * 0.45;

        let mut angle = -FRAC_PI_2;
        for slice in &slices {
            let sweep = slice.fraction as f32 * TAU;
            paint_sector(&painter, center, radius, angle, angle + sweep, bucket_color(slice.bucket));
            if slices.len() > 1 {
                let edge = center + radius * egui::vec2(angle.cos(), angle.sin());
                painter.line_segment([center, edge], outline);
            }
            angle += sweep;
        }
        painter.circle_stroke(center, radius, outline);

        let step = metric.step() as i64;
        ui.vertical(|ui: &mut Ui| {
            for slice in &slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, bucket_color(slice.bucket));
                    ui.label(format!(
                        "{}–{}: {} ({:.0}%)",
                        slice.bucket,
                        slice.bucket + step,
                        slice.count,
                        slice.fraction * 100.0
                    ));
                });
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ordinal_round_trips_through_label() {
        let date = NaiveDate::from_ymd_opt(2022, 11, 1).unwrap();
        let ordinal = month_ordinal(date);
        assert_eq!(ordinal, 2022.0 * 12.0 + 10.0);
        assert_eq!(month_label_for(ordinal), "2022-11");
        assert_eq!(month_label_for(ordinal + 2.0), "2023-01");
        assert_eq!(month_label_for(ordinal + 0.5), "");
    }

    #[test]
    fn category_labels_only_on_whole_positions() {
        let fmt = category_formatter(vec!["a".into(), "b".into()]);
        assert_eq!(fmt(mark(1.0), &(0.0..=1.0)), "b");
        assert_eq!(fmt(mark(0.5), &(0.0..=1.0)), "");
        assert_eq!(fmt(mark(2.0), &(0.0..=2.0)), "");
        assert_eq!(fmt(mark(-1.0), &(-1.0..=1.0)), "");
    }

    fn mark(value: f64) -> GridMark {
        GridMark {
            value,
            step_size: 1.0,
        }
    }

    fn month_label_for(value: f64) -> String {
        month_label(mark(value), &(value..=value))
    }
}
