use std::collections::HashMap;

use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::model::{ProjectId, ProjectStatus, StatusFilter};
use crate::ui::theme;
use crate::view::ProjectCard;

/// Actions that the project list can request.
pub enum ListAction {
    None,
    Add,
    Edit(ProjectId),
    ToggleStatus(ProjectId),
    UpdateProgress(ProjectId, String),
}

/// Status filter and search box. Returns true if either changed.
pub fn show_filter_bar(filter: &mut StatusFilter, search: &mut String, ui: &mut Ui) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(RichText::new(filter.label()).size(12.0))
            .width(120.0)
            .show_ui(ui, |ui| {
                for option in StatusFilter::ALL {
                    if ui.selectable_value(filter, option, option.label()).changed() {
                        changed = true;
                    }
                }
            });

        ui.label(RichText::new(icons::MAGNIFYING_GLASS).color(theme::TEXT_DIM));
        let resp = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(search).hint_text("Search projects..."),
        );
        changed |= resp.changed();
    });
    changed
}

/// Forget progress entry text for cards that are no longer shown.
pub fn prune_progress_inputs(progress_inputs: &mut HashMap<ProjectId, String>, cards: &[ProjectCard]) {
    if progress_inputs.is_empty() {
        return;
    }
    progress_inputs.retain(|id, _| cards.iter().any(|card| &card.id == id));
}

/// Render project cards. `progress_inputs` holds the per-card progress entry text.
pub fn show_project_list(
    cards: &[ProjectCard],
    progress_inputs: &mut HashMap<ProjectId, String>,
    ui: &mut Ui,
) -> ListAction {
    let mut action = ListAction::None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projects")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", cards.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  Add Project", icons::PLUS))
                    .color(Color32::WHITE)
                    .size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = ListAction::Add;
            }
        });
    });
    ui.add_space(6.0);

    if cards.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No projects to show").color(theme::TEXT_DIM));
        });
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for card in cards {
                if let Some(a) = show_card(card, progress_inputs, ui) {
                    action = a;
                }
                ui.add_space(6.0);
            }
        });

    action
}

fn show_card(
    card: &ProjectCard,
    progress_inputs: &mut HashMap<ProjectId, String>,
    ui: &mut Ui,
) -> Option<ListAction> {
    let mut action = None;

    let frame = egui::Frame {
        fill: theme::BG_CARD,
        rounding: egui::Rounding::same(theme::CARD_ROUNDING),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label(RichText::new(&card.name).strong().size(14.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let edit = ui.add(
                    egui::Button::new(RichText::new(icons::PENCIL_SIMPLE).color(theme::TEXT_SECONDARY))
                        .frame(false),
                );
                if edit.on_hover_text("Edit project").clicked() {
                    action = Some(ListAction::Edit(card.id.clone()));
                }
                let (badge, color) = match card.status {
                    ProjectStatus::Active => ("ACTIVE", theme::ACCENT),
                    ProjectStatus::Completed => ("COMPLETED", theme::SUCCESS),
                };
                ui.label(RichText::new(badge).size(9.5).strong().color(color));
            });
        });

        if !card.description.is_empty() {
            ui.label(RichText::new(&card.description).size(12.0).color(theme::TEXT_SECONDARY));
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new(card.kind_label).size(11.0).color(theme::TEXT_DIM));
            ui.label(RichText::new("·").size(11.0).color(theme::TEXT_DIM));
            ui.label(
                RichText::new(format!("Deadline: {}", card.deadline_label))
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        });

        ui.add_space(4.0);
        let fill = match card.status {
            ProjectStatus::Active => theme::ACCENT,
            ProjectStatus::Completed => theme::SUCCESS,
        };
        ui.add(
            egui::ProgressBar::new(card.bar_fraction)
                .desired_width(ui.available_width())
                .desired_height(8.0)
                .fill(fill)
                .rounding(egui::Rounding::same(4.0))
                .text(RichText::new(format!("{}%", card.progress)).size(9.0)),
        );
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let input = progress_inputs
                .entry(card.id.clone())
                .or_insert_with(|| card.progress.to_string());
            let field = ui.add_sized(
                [52.0, 22.0],
                egui::TextEdit::singleline(input).hint_text("0-100"),
            );
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Update Progress").clicked() || submitted {
                action = Some(ListAction::UpdateProgress(card.id.clone(), input.clone()));
            }

            let icon = match card.status {
                ProjectStatus::Active => icons::CHECK_CIRCLE,
                ProjectStatus::Completed => icons::ARROW_COUNTER_CLOCKWISE,
            };
            if ui
                .button(format!("{} {}", icon, card.action.label()))
                .clicked()
            {
                action = Some(ListAction::ToggleStatus(card.id.clone()));
            }
        });
    });

    action
}
