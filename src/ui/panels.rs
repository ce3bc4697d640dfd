use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    // A missing file only shows egui's broken-image placeholder.
    let logo = format!("file://{}", state.logo.display());
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(200.0_f32.min(ui.available_width() * 0.8))
                .max_height(200.0)
                .rounding(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Filters");
    ui.separator();

    // ---- Release year ----
    ui.strong("Release year");
    let (min_year, max_year) = state.year_bounds();
    let (mut from_year, mut to_year) = state.criteria.years;
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut from_year, min_year..=max_year).text("from"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut to_year, min_year..=max_year).text("to"))
        .changed();
    if changed {
        state.set_years(from_year, to_year);
    }
    ui.separator();

    // ---- Release month ----
    ui.strong("Release month");
    let (mut from_month, mut to_month) = state.criteria.months;
    let mut changed = false;
    for (value, label) in [(&mut from_month, "from"), (&mut to_month, "to")] {
        changed |= ui
            .add(
                egui::Slider::new(value, 1..=12)
                    .text(label)
                    .custom_formatter(|n, _| format!("Month {n}")),
            )
            .changed();
    }
    if changed {
        state.set_months(from_month, to_month);
    }
    ui.separator();

    // ---- Artists ----
    let n_selected = state.criteria.artists.len();
    let n_total = state.artist_options.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("Artists  ({n_selected}/{n_total})"));
        if ui.small_button("Clear").clicked() {
            state.clear_artists();
        }
    });
    ui.add(egui::TextEdit::singleline(&mut state.artist_query).hint_text("Search…"));

    if n_selected == 0 {
        ui.label(RichText::new("Select at least one artist.").italics());
    }

    // Collect toggles first; the options borrow `state`.
    let mut toggled: Vec<String> = Vec::new();
    ScrollArea::vertical()
        .id_salt("artist_list")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in state.visible_artist_options() {
                let mut checked = state.criteria.artists.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    toggled.push(name.to_string());
                }
            }
        });
    for name in toggled {
        state.toggle_artist(&name);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} tracks loaded, {} shown",
            state.dataset.len(),
            state.top.len()
        ));
        ui.label(RichText::new(state.source.display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open streaming statistics")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
