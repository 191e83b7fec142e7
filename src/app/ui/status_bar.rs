use eframe::egui;

use crate::app::app_core::SwingApp;
use crate::app::state::TrackingState;

pub fn tracking_color(state: TrackingState) -> egui::Color32 {
    match state {
        TrackingState::Recording | TrackingState::Error => egui::Color32::from_rgb(200, 30, 30),
        TrackingState::Ready | TrackingState::Complete => egui::Color32::from_rgb(0, 150, 0),
        TrackingState::Analyzing | TrackingState::Initializing => egui::Color32::from_rgb(255, 165, 0),
        TrackingState::Idle => egui::Color32::from_rgb(120, 120, 120),
    }
}

pub fn render_status_bar(app: &mut SwingApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.heading("🏌 Golf Shot Tracker");
                ui.separator();

                ui.label("Status:");
                let tracking = app.state.session.tracking;
                ui.colored_label(tracking_color(tracking), tracking.as_str());

                ui.separator();
                ui.label(format!("Phase: {}", app.state.current_phase));

                if app.state.collector.is_collecting() {
                    ui.separator();
                    ui.colored_label(
                        egui::Color32::from_rgb(200, 30, 30),
                        format!("collecting ({} frames)", app.state.collector.buffered_frames()),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let settings = &app.state.camera_settings;
                    ui.label(format!(
                        "{} · {}x{} @ {:.0} fps · {}",
                        app.state.camera.name(),
                        settings.width,
                        settings.height,
                        settings.frame_rate,
                        settings.facing_mode.as_str()
                    ));
                });
            });
            ui.add_space(5.0);
        });
}

pub fn render_bottom_status_bar(app: &mut SwingApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_status_bar")
        .min_height(25.0)
        .show(ctx, |ui| {
            ui.add_space(3.0);
            ui.horizontal(|ui| {
                if !app.state.status_message.is_empty() {
                    ui.colored_label(egui::Color32::from_rgb(0, 100, 200), &app.state.status_message);
                    ui.separator();
                }

                let stats = &app.state.stats;
                ui.label(format!(
                    "Frames: {} sent / {} poses / {} empty / {} errors",
                    stats.frames_submitted, stats.poses_received, stats.empty_frames, stats.pose_errors
                ));
                ui.separator();
                ui.label(format!(
                    "Swings: {} detected / {} discarded",
                    stats.swings_detected, stats.swings_aborted
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(path) = app.config.config_path() {
                        ui.weak(format!("Config: {}", path.display()));
                    } else {
                        ui.weak("Config: defaults");
                    }
                });
            });
            ui.add_space(3.0);
        });
}
