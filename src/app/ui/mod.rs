pub mod camera_view;
pub mod control_panel;
pub mod metrics_panel;
pub mod status_bar;
pub mod swing_analyzer;

pub use camera_view::{render_error_panel, render_main_panel};
pub use control_panel::render_control_panel;
pub use metrics_panel::render_metrics_panel;
pub use status_bar::{render_bottom_status_bar, render_status_bar};
