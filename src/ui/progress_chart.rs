use egui::{pos2, vec2, Align2, Rect, RichText, Rounding, Sense, Stroke, Ui};

use crate::model::ProgressDistribution;
use crate::ui::theme;

const MAX_TICK_INTERVALS: u32 = 10;

/// Anything that can display the four progress buckets.
pub trait ChartSink {
    fn redraw(&mut self, buckets: [u32; 4]);
}

/// Bar chart of the progress distribution, painted with egui.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    buckets: [u32; 4],
}

impl ChartSink for BarChart {
    fn redraw(&mut self, buckets: [u32; 4]) {
        self.buckets = buckets;
    }
}

impl BarChart {
    pub fn buckets(&self) -> [u32; 4] {
        self.buckets
    }

    /// Whole-number tick ceiling, at least 1 so an empty chart still has a scale.
    fn y_max(&self) -> u32 {
        self.buckets.iter().copied().max().unwrap_or(0).max(1)
    }

    /// Grid ticks from 0 to `y_max`, at most eleven of them.
    fn ticks(y_max: u32) -> impl Iterator<Item = u32> {
        let step = y_max.div_ceil(MAX_TICK_INTERVALS).max(1);
        (0..=y_max).step_by(step as usize)
    }

    pub fn show(&self, ui: &mut Ui) {
        ui.label(
            RichText::new("Project Progress Distribution")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(6.0);

        let size = vec2(ui.available_width(), 220.0);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        let plot = Rect::from_min_max(
            pos2(rect.left() + 24.0, rect.top() + 8.0),
            pos2(rect.right() - 4.0, rect.bottom() - 20.0),
        );
        let y_max = self.y_max();

        // Horizontal grid with integer ticks
        for tick in Self::ticks(y_max) {
            let y = plot.bottom() - plot.height() * tick as f32 / y_max as f32;
            painter.line_segment(
                [pos2(plot.left(), y), pos2(plot.right(), y)],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );
            painter.text(
                pos2(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                tick.to_string(),
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }

        let slot = plot.width() / self.buckets.len() as f32;
        for (i, &count) in self.buckets.iter().enumerate() {
            let x0 = plot.left() + slot * i as f32 + slot * 0.15;
            let x1 = x0 + slot * 0.7;
            let height = plot.height() * count as f32 / y_max as f32;
            let bar = Rect::from_min_max(pos2(x0, plot.bottom() - height), pos2(x1, plot.bottom()));
            painter.rect_filled(bar, Rounding::same(3.0), theme::CHART_COLORS[i]);

            let bar_response = ui.interact(bar, ui.id().with(("bucket", i)), Sense::hover());
            bar_response.on_hover_text(format!(
                "{}: {} project{}",
                ProgressDistribution::LABELS[i],
                count,
                if count == 1 { "" } else { "s" }
            ));

            painter.text(
                pos2((x0 + x1) / 2.0, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                ProgressDistribution::LABELS[i],
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}
