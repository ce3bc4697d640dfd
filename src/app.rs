use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::bucket::Metric;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

const DATASET_URL: &str = "https://www.kaggle.com/datasets/abdulszz/spotify-most-streamed-songs";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StreamboardApp {
    pub state: AppState,
}

impl StreamboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StreamboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new("Streaming Statistics").size(28.0));
    ui.label(RichText::new("Most famous songs on streaming services").strong());
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Dataset:");
        ui.hyperlink(DATASET_URL);
    });
    ui.label(
        "Most streamed songs on Spotify, enriched with playlist and chart \
         presence on Apple Music and Deezer.",
    );
    ui.separator();

    let rows = &state.top;
    if rows.is_empty() {
        ui.label(
            RichText::new("No songs match the current filters. Select one or more artists.")
                .italics(),
        );
    }

    charts::top_tracks_chart(ui, rows);
    ui.add_space(12.0);
    charts::playlist_chart(ui, rows);
    ui.add_space(12.0);
    charts::monthly_chart(ui, rows, &state.criteria);
    ui.add_space(12.0);

    ui.columns(2, |cols| {
        charts::pie_chart(&mut cols[0], rows, Metric::Danceability);
        charts::pie_chart(&mut cols[0], rows, Metric::Energy);
        charts::pie_chart(&mut cols[1], rows, Metric::Acousticness);
        charts::pie_chart(&mut cols[1], rows, Metric::Tempo);
    });
    ui.add_space(12.0);

    table::top_tracks_table(ui, rows);
}
