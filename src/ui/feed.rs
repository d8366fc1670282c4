//! Feed area: status card, error banner, article grid and empty state

use eframe::egui::{self, CornerRadius, Margin, RichText, Stroke};

use crate::app::AffairsApp;
use crate::controller::Command;
use crate::ui::components::{accent_button, badge, card_frame, open_link};
use crate::ui::theme::Theme;
use crate::view::{ArticleCard, Body, EmptyNotice, PageView};

/// Narrowest a card column may get before the grid drops a column
const MIN_CARD_WIDTH: f32 = 340.0;

/// Render the feed for the current view state
pub fn render_feed(app: &mut AffairsApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let page = PageView::build(&app.news.view);

    render_status_card(ui, &theme, &page);
    ui.add_space(12.0);

    if let Some(error) = &page.error {
        egui::Frame::new()
            .fill(theme.error_bg)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(Margin::same(12))
            .stroke(Stroke::new(1.0, theme.error))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(error).color(theme.error));
            });
        ui.add_space(12.0);
    }

    match &page.body {
        Body::Loading => {
            ui.add_space(48.0);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(40.0).color(theme.accent));
            });
        }
        Body::Cards(cards) => {
            let max_columns = usize::from(app.config().appearance.max_columns.max(1));
            render_cards(ui, &theme, cards, max_columns);
        }
        Body::Empty(notice) => render_empty(app, ui, &theme, notice),
        Body::Blank => {}
    }
}

fn render_status_card(ui: &mut egui::Ui, theme: &Theme, page: &PageView) {
    let width = ui.available_width();
    card_frame(theme).show(ui, |ui| {
        ui.set_width(width - 34.0);
        ui.horizontal_wrapped(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(&page.header)
                        .size(18.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.label(RichText::new(&page.count_line).color(theme.text_secondary));
            });

            if let Some(hint) = &page.district_hint {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(hint).color(theme.text_secondary));
                    ui.label(RichText::new("Districts:").strong().color(theme.text_secondary));
                });
            }
        });
    });
}

fn render_cards(ui: &mut egui::Ui, theme: &Theme, cards: &[ArticleCard], max_columns: usize) {
    egui::ScrollArea::vertical()
        .id_salt("feed_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let fit = (ui.available_width() / MIN_CARD_WIDTH).floor() as usize;
            let columns = fit.clamp(1, max_columns);

            ui.columns(columns, |cols| {
                for (index, card) in cards.iter().enumerate() {
                    let col = &mut cols[index % columns];
                    col.push_id(&card.key, |ui| render_card(ui, theme, card));
                    col.add_space(12.0);
                }
            });
        });
}

fn render_card(ui: &mut egui::Ui, theme: &Theme, card: &ArticleCard) {
    card_frame(theme).show(ui, |ui| {
        ui.set_width(ui.available_width());

        let has_badges = card.category.is_some() || card.state.is_some() || card.district.is_some();
        if has_badges {
            ui.horizontal_wrapped(|ui| {
                if let Some(category) = &card.category {
                    let (bg, fg) = theme.badge_colors(category.style);
                    badge(ui, &category.label, bg, fg);
                }
                if let Some(state) = &card.state {
                    let (bg, fg) = theme.region_badge_colors(false);
                    badge(ui, state, bg, fg);
                }
                if let Some(district) = &card.district {
                    let (bg, fg) = theme.region_badge_colors(true);
                    badge(ui, district, bg, fg);
                }
            });
            ui.add_space(6.0);
        }

        ui.label(
            RichText::new(&card.title)
                .size(16.0)
                .strong()
                .color(theme.text_primary),
        );

        if let Some(summary) = &card.summary {
            ui.add_space(4.0);
            ui.label(RichText::new(summary).color(theme.text_secondary));
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(&card.source).strong().color(theme.text_muted));
            if card.global {
                let (bg, fg) = theme.region_badge_colors(true);
                badge(ui, "Global", bg, fg);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&card.published).size(12.0).color(theme.text_muted));
            });
        });

        if let Some(url) = &card.url {
            ui.add_space(8.0);
            if ui
                .link(RichText::new("Read Full Article →").color(theme.accent))
                .on_hover_text(url.as_str())
                .clicked()
            {
                open_link(url);
            }
        }
    });
}

fn render_empty(app: &mut AffairsApp, ui: &mut egui::Ui, theme: &Theme, notice: &EmptyNotice) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(notice.title)
                .size(18.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(6.0);
        ui.label(RichText::new(&notice.message).color(theme.text_secondary));
        ui.add_space(12.0);
        if ui.add(accent_button(theme, "Refresh News")).clicked() {
            app.dispatch(Command::Refresh);
        }
    });
}
