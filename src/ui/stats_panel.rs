use egui::{Color32, RichText, Ui};

use crate::model::DashboardStats;
use crate::ui::theme;

/// Render the row of headline counters.
pub fn show_stats(stats: DashboardStats, window_days: i64, ui: &mut Ui) {
    ui.columns(3, |cols| {
        stat_tile(&mut cols[0], "Active Projects", stats.active, theme::ACCENT);
        stat_tile(&mut cols[1], "Completed", stats.completed, theme::SUCCESS);
        stat_tile(
            &mut cols[2],
            &format!("Due within {window_days} days"),
            stats.upcoming_deadlines,
            theme::WARNING,
        );
    });
}

fn stat_tile(ui: &mut Ui, title: &str, value: usize, color: Color32) {
    egui::Frame::default()
        .fill(theme::BG_CARD)
        .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(11.0).color(theme::TEXT_SECONDARY));
            ui.label(RichText::new(value.to_string()).font(theme::font_stat()).color(color));
        });
}
