use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;

use crate::config::Settings;
use crate::controller::{Dashboard, Notice, NoticeLevel};
use crate::io::{FileStore, ProjectStore};
use crate::model::ProjectId;
use crate::ui;
use crate::ui::progress_chart::BarChart;
use crate::ui::project_list::ListAction;

/// Main application state.
pub struct DashboardApp {
    pub dashboard: Dashboard<FileStore, BarChart>,
    pub data_dir: PathBuf,
    pub upcoming_window_days: i64,

    // Widget buffers
    pub search_text: String,
    pub progress_inputs: HashMap<ProjectId, String>,

    // Dialog state
    pub show_about: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let data_dir = settings.resolved_data_dir();
        tracing::info!(dir = %data_dir.display(), "opening project store");
        let store = ProjectStore::with_key(FileStore::new(&data_dir), settings.storage_key.clone());
        let mut dashboard = Dashboard::new(
            store,
            BarChart::default(),
            Utc::now,
            settings.upcoming_window_days,
        );

        let loaded = format!("{} projects loaded", dashboard.projects().len());
        dashboard.set_notice(Notice::info(loaded));

        Self {
            dashboard,
            data_dir,
            upcoming_window_days: settings.upcoming_window_days,
            search_text: String::new(),
            progress_inputs: HashMap::new(),
            show_about: false,
        }
    }

    // --- File operations ---

    pub fn export_csv(&mut self) {
        if self.dashboard.projects().is_empty() {
            self.dashboard
                .set_notice(Notice::info("Nothing to export, there are no projects"));
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("projects.csv")
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.dashboard.projects(), &path) {
                Ok(count) => {
                    self.dashboard
                        .set_notice(Notice::info(format!("Exported {} projects to CSV", count)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "CSV export failed");
                    self.dashboard
                        .set_notice(Notice::error(format!("CSV export failed: {}", e)));
                }
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        if let Err(e) = std::fs::create_dir_all(&self.data_dir).and_then(|_| open::that(&self.data_dir)) {
            tracing::warn!(dir = %self.data_dir.display(), error = %e, "could not open data folder");
            self.dashboard
                .set_notice(Notice::error(format!("Could not open data folder: {}", e)));
        }
    }

    // --- Project operations ---

    fn handle_list_action(&mut self, action: ListAction) {
        // Errors are already reflected in the dashboard notice.
        let result = match action {
            ListAction::None => return,
            ListAction::Add => {
                self.dashboard.open_create();
                return;
            }
            ListAction::Edit(id) => {
                self.dashboard.open_edit(&id);
                return;
            }
            ListAction::ToggleStatus(id) => {
                let result = self.dashboard.toggle_status(&id);
                self.progress_inputs.remove(&id);
                result
            }
            ListAction::UpdateProgress(id, input) => {
                let result = self.dashboard.update_progress(&id, &input);
                if result.is_ok() {
                    self.progress_inputs.remove(&id);
                }
                result
            }
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "action reported an error");
        }
    }

    /// Text and color for the status bar.
    fn status_line(&self) -> (String, egui::Color32) {
        match self.dashboard.notice() {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => ui::theme::TEXT_SECONDARY,
                    NoticeLevel::Error => ui::theme::ERROR,
                };
                (notice.message.clone(), color)
            }
            None => ("Ready".to_string(), ui::theme::TEXT_DIM),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_add = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::N));
        if should_add && !self.dashboard.form().is_open() {
            self.dashboard.open_create();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        let (status_text, status_color) = self.status_line();
        let mut retry = false;
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if self.dashboard.is_dirty() {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::WARNING)
                                .color(ui::theme::ERROR),
                        );
                    }
                    ui.label(
                        egui::RichText::new(status_text)
                            .font(ui::theme::font_status())
                            .color(status_color),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Projects: {}",
                                self.dashboard.projects().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        if self.dashboard.is_dirty() && ui.small_button("Retry save").clicked() {
                            retry = true;
                        }
                    });
                });
            });
        if retry {
            if let Err(e) = self.dashboard.retry_save() {
                tracing::debug!(error = %e, "retry save failed");
            }
        }

        // Right panel: progress chart
        egui::SidePanel::right("chart_panel")
            .default_width(ui::theme::CHART_PANEL_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(12.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                self.dashboard.chart().show(ui);
            });

        // Central panel: counters, filters and cards
        let mut list_action = ListAction::None;
        let central_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(12.0));
        egui::CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            ui::stats_panel::show_stats(self.dashboard.stats(), self.upcoming_window_days, ui);
            ui.add_space(10.0);

            let mut filter = self.dashboard.filter();
            if ui::project_list::show_filter_bar(&mut filter, &mut self.search_text, ui) {
                self.dashboard.set_filter(filter);
                self.dashboard.set_search(self.search_text.clone());
            }
            ui.add_space(8.0);

            ui::project_list::prune_progress_inputs(&mut self.progress_inputs, self.dashboard.cards());
            list_action = ui::project_list::show_project_list(
                self.dashboard.cards(),
                &mut self.progress_inputs,
                ui,
            );
        });
        self.handle_list_action(list_action);

        // Dialogs
        if self.dashboard.form().is_open() {
            ui::dialogs::show_project_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
