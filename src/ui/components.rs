//! Shared UI components for the news window

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, Stroke, Vec2};

use crate::app::AffairsApp;
use crate::controller::{Command, Edition, Tab};
use crate::ui::theme::Theme;

/// Render a feed tab button
pub fn render_tab(app: &mut AffairsApp, ui: &mut egui::Ui, edition: Edition) {
    let theme = &app.ui.current_theme;
    let is_active = app.news.view.tab == Tab::from(edition);

    let (bg, text_color) = if is_active {
        (theme.accent, theme.accent_text)
    } else {
        (theme.card_hover, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(edition.label()).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius::same(6))
        .min_size(Vec2::new(110.0, 32.0));

    if ui.add(button).clicked() {
        app.dispatch(Command::SelectFeed(edition));
    }
}

/// Small rounded label used for categories, regions and the Global marker
pub fn badge(ui: &mut egui::Ui, text: &str, bg: Color32, fg: Color32) {
    egui::Frame::new()
        .fill(bg)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(fg).size(11.0));
        });
}

/// Bordered card used for the status block and articles
pub fn card_frame(theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(theme.card)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(16))
        .stroke(Stroke::new(1.0, theme.border))
}

/// Filled button in the accent color
pub fn accent_button(theme: &Theme, label: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label.to_string()).color(theme.accent_text))
        .fill(theme.accent)
        .corner_radius(CornerRadius::same(6))
}

/// Open an article link in the system browser
pub fn open_link(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::error!("Failed to open {}: {}", url, e);
    }
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut AffairsApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let origin = app.news.client().origin().to_string();

    egui::Window::new("About Affairs")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Current Affairs Hub")
                        .size(22.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Global, India and state-level news for exam preparation")
                        .color(theme.text_secondary),
                );

                ui.add_space(8.0);
                ui.label(RichText::new(format!("Backend: {}", origin)).color(theme.text_muted).size(11.0));

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });
}
