use crate::app::DashboardApp;
use crate::controller::FormState;
use crate::model::ProjectKind;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the add/edit project dialog.
pub fn show_project_dialog(app: &mut DashboardApp, ctx: &Context) {
    let title = match app.dashboard.form() {
        FormState::OpenForEdit(_) => "Edit Project",
        _ => "Add New Project",
    };

    // Escape first closes an open date picker or combo box.
    let popup_open = ctx.memory(|m| m.any_popup_open());

    let mut submit = false;
    let mut cancel = false;
    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            let fields = app.dashboard.fields_mut();
            egui::Grid::new("project_form_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name *").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [240.0, 24.0],
                        egui::TextEdit::singleline(&mut fields.name)
                            .hint_text("Project name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Description").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [240.0, 60.0],
                        egui::TextEdit::multiline(&mut fields.description)
                            .hint_text("Optional")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Deadline *").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut fields.deadline)
                            .id_salt("dlg_dp_deadline"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Type *").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("project_kind_combo")
                        .selected_text(fields.kind.label())
                        .width(160.0)
                        .show_ui(ui, |ui| {
                            for kind in ProjectKind::ALL {
                                ui.selectable_value(&mut fields.kind, kind, kind.label());
                            }
                        });
                    ui.end_row();
                });

            // Inline validation message from the last submit attempt
            if let Some(err) = app.dashboard.form_error() {
                ui.add_space(4.0);
                ui.label(RichText::new(err.to_string()).size(11.0).color(theme::ERROR));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    submit = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancel = true;
                }
            });
            ui.add_space(2.0);
        });

    if !popup_open && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancel = true;
    }

    if submit {
        // A rejected submit keeps the dialog open with the error shown above.
        if let Err(e) = app.dashboard.submit_form() {
            tracing::debug!(error = %e, "project form rejected");
        }
    } else if cancel {
        app.dashboard.cancel_form();
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut DashboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Project Dashboard").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Track projects, progress and deadlines.");
                ui.label(
                    RichText::new(format!("Data folder: {}", app.data_dir.display()))
                        .size(10.0)
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
