use eframe::egui::{Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::RankedTrack;
use crate::data::views;

const ROW_HEIGHT: f32 = 20.0;

/// Track, artists and formatted streams of the filtered top tracks.
pub fn top_tracks_table(ui: &mut Ui, rows: &[RankedTrack]) {
    ui.heading("Top songs");
    let table_rows = views::table_view(rows);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(180.0))
        .column(Column::remainder().at_least(140.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Song");
            });
            header.col(|ui| {
                ui.strong("Artist(s)");
            });
            header.col(|ui| {
                ui.strong("Streams");
            });
        })
        .body(|mut body| {
            for row in &table_rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.track);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.artists);
                    });
                    table_row.col(|ui| {
                        ui.with_layout(Layout::right_to_left(eframe::egui::Align::Center), |ui| {
                            ui.monospace(&row.streams);
                        });
                    });
                });
            }
        });
}
