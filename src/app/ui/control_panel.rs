use std::time::Instant;

use eframe::egui;

use crate::app::app_core::SwingApp;
use crate::app::handlers::{AnalysisHandler, TrackingHandler};
use crate::app::state::TrackingState;

const INSTRUCTIONS: [&str; 5] = [
    "Position yourself in frame with your golf club",
    "Click \"Start Tracking\" to initialize pose detection",
    "Click \"Start Recording\" when ready to swing",
    "Perform your golf swing naturally",
    "View analysis results on the right",
];

const TIPS: [&str; 5] = [
    "Ensure good lighting conditions",
    "Keep your full body visible in frame",
    "Stand perpendicular to the camera",
    "Maintain consistent distance from camera",
    "Use a contrasting background",
];

fn status_indicator(state: TrackingState) -> &'static str {
    match state {
        TrackingState::Recording => "🔴 Recording",
        TrackingState::Ready => "✅ Ready",
        TrackingState::Analyzing => "⚡ Analyzing",
        TrackingState::Complete => "✅ Analysis Complete",
        TrackingState::Error => "❌ Error",
        TrackingState::Initializing => "⏳ Initializing",
        TrackingState::Idle => "⏳ Idle",
    }
}

pub fn render_control_panel(app: &mut SwingApp, ctx: &egui::Context) {
    egui::SidePanel::left("control_panel")
        .resizable(false)
        .exact_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                ui.heading("System Status");
                let tracking = app.state.session.tracking;
                ui.colored_label(super::status_bar::tracking_color(tracking), status_indicator(tracking));

                ui.separator();
                ui.heading("Camera Controls");
                render_camera_buttons(app, ui);

                ui.separator();
                if ui
                    .add_enabled(app.state.session.can_request_demo(), egui::Button::new("🎯 Try Demo"))
                    .clicked()
                {
                    AnalysisHandler::request_demo(app, Instant::now());
                }

                if ui.button("💾 Save Settings").clicked() {
                    app.save_settings();
                }

                ui.separator();
                ui.heading("Instructions");
                for (i, step) in INSTRUCTIONS.iter().enumerate() {
                    ui.label(format!("{}. {}", i + 1, step));
                }

                ui.separator();
                ui.heading("💡 Tips for Best Results");
                for tip in TIPS.iter() {
                    ui.label(format!("• {}", tip));
                }

                ui.separator();
                ui.weak("Keys: T tracking · Space recording · C switch camera · D demo · Esc dismiss");
            });
        });
}

fn render_camera_buttons(app: &mut SwingApp, ui: &mut egui::Ui) {
    let session = app.state.session.clone();

    ui.vertical(|ui| {
        if !session.is_tracking {
            if ui
                .add_enabled(session.can_start_tracking(), egui::Button::new("📷 Start Tracking"))
                .clicked()
            {
                TrackingHandler::start_tracking(app);
            }
        } else {
            if ui.button("⏹ Stop Tracking").clicked() {
                TrackingHandler::stop_tracking(app);
            }
            if ui.button("🔄 Switch Camera").clicked() {
                TrackingHandler::switch_camera(app);
            }
        }

        if session.is_tracking && !session.is_recording {
            if ui
                .add_enabled(session.can_start_recording(), egui::Button::new("▶ Start Recording"))
                .clicked()
            {
                TrackingHandler::start_recording(app);
            }
        }

        if session.is_recording {
            let stop = egui::Button::new(egui::RichText::new("⏹ Stop Recording").color(egui::Color32::WHITE))
                .fill(egui::Color32::from_rgb(239, 68, 68));
            if ui.add(stop).clicked() {
                TrackingHandler::stop_recording(app);
            }
        }
    });
}
