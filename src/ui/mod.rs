pub mod dialogs;
pub mod resource_panel;
pub mod schedule_chart;
pub mod theme;
pub mod toolbar;
