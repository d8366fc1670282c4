//! Header: title, search box, feed tabs, state selector and refresh

use eframe::egui::{self, Color32, CornerRadius, RichText};

use crate::app::AffairsApp;
use crate::app_data;
use crate::controller::{Command, Edition};
use crate::ui::components::{accent_button, render_tab};

/// Render the header panel contents
pub fn render_header(app: &mut AffairsApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new("Current Affairs Hub")
                    .size(26.0)
                    .strong()
                    .color(theme.text_primary),
            );
            ui.label(
                RichText::new("Educational platform for UPSC & State-level exam preparation")
                    .color(theme.text_secondary),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let search_clicked = ui.add(accent_button(&theme, "Search")).clicked();
            let response = ui.add(
                egui::TextEdit::singleline(&mut app.ui.search_input)
                    .hint_text("Search news (e.g., 'NEET exam', 'economy')")
                    .desired_width(280.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if search_clicked || submitted {
                let query = app.ui.search_input.clone();
                app.dispatch(Command::Search(query));
            }
        });
    });

    ui.add_space(12.0);
    ui.horizontal_wrapped(|ui| {
        render_tab(app, ui, Edition::Global);
        render_tab(app, ui, Edition::India);
        ui.add_space(8.0);
        render_state_selector(app, ui);
        ui.add_space(8.0);

        let refresh = egui::Button::new(RichText::new("Refresh").color(Color32::WHITE))
            .fill(theme.refresh)
            .corner_radius(CornerRadius::same(6));
        if ui.add_enabled(!app.news.view.loading, refresh).clicked() {
            app.dispatch(Command::Refresh);
        }
    });
    ui.add_space(10.0);
}

fn render_state_selector(app: &mut AffairsApp, ui: &mut egui::Ui) {
    let selected = app.news.view.selected_state.clone();
    let selected_text = if selected.is_empty() {
        "Select Indian State"
    } else {
        selected.as_str()
    };

    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("state_select")
        .selected_text(selected_text)
        .width(200.0)
        .height(360.0)
        .show_ui(ui, |ui| {
            for state in app_data::selectable_states() {
                if ui
                    .selectable_label(selected == *state, state.as_str())
                    .clicked()
                {
                    chosen = Some(state.clone());
                }
            }
        });

    if let Some(state) = chosen {
        app.dispatch(Command::SelectState(state));
    }
}
