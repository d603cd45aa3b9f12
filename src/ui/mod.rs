pub mod dialogs;
pub mod progress_chart;
pub mod project_list;
pub mod stats_panel;
pub mod theme;
pub mod toolbar;
