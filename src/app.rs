use eframe::egui::{self, RichText};

use crate::api::NewsClient;
use crate::config::Config;
use crate::controller::Command;
use crate::state::{NewsState, StateEvent, UiState};
use crate::ui::components::render_about_dialog;
use crate::ui::theme::ThemePreset;
use crate::ui::{render_feed, render_header};

/// Main application state
pub struct AffairsApp {
    /// Application configuration
    config: Config,
    /// Feed controller and its requests in flight
    pub(crate) news: NewsState,
    /// Theme, search box and dialog flags
    pub(crate) ui: UiState,
    /// Status message for the status bar
    status_message: String,
}

impl AffairsApp {
    /// Create the window state and start loading the global feed
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, client: NewsClient) -> Self {
        let theme = config.appearance.theme.theme();

        let mut app = Self {
            config,
            news: NewsState::new(client),
            ui: UiState::new(theme),
            status_message: "Ready".to_string(),
        };

        let events = app.news.initialize();
        app.handle_events(events);

        app
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a user command to the controller
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);
        let events = self.news.dispatch(command);
        self.handle_events(events);
    }

    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(message) => self.status_message = message,
                StateEvent::LogError(message) => tracing::error!("{}", message),
                StateEvent::LogInfo(message) => tracing::info!("{}", message),
            }
        }
    }

    fn set_theme(&mut self, preset: ThemePreset) {
        self.config.appearance.theme = preset;
        self.ui.current_theme = preset.theme();
        self.ui.theme_dirty = true;
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for AffairsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async tasks
        let events = self.news.poll();
        self.handle_events(events);
        if self.news.is_busy() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Theme", |ui| {
                    for preset in ThemePreset::all() {
                        let active = self.config.appearance.theme == *preset;
                        if ui.selectable_label(active, preset.name()).clicked() && !active {
                            self.set_theme(*preset);
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(self.ui.current_theme.panel)
                    .inner_margin(egui::Margin::symmetric(24, 4)),
            )
            .show(ctx, |ui| {
                render_header(self, ui);
            });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let origin = self.news.client().origin().to_string();
                    ui.label(RichText::new(origin).size(11.0).color(self.ui.current_theme.text_muted));
                });
            });
        });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.ui.current_theme.page)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                render_feed(self, ui);
            });

        render_about_dialog(self, ctx);
    }
}
