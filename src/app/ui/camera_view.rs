use eframe::egui;

use crate::app::app_core::SwingApp;
use crate::app::handlers::TrackingHandler;
use crate::pose::overlay;

const MAX_VIEW_HEIGHT: f32 = 540.0;

pub fn render_main_panel(app: &mut SwingApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            render_camera_view(app, ui);
            ui.add_space(10.0);
            super::swing_analyzer::render_swing_analyzer(app, ui);
        });
    });
}

fn render_camera_view(app: &SwingApp, ui: &mut egui::Ui) {
    let aspect = app
        .state
        .last_frame
        .as_ref()
        .map(|frame| frame.aspect_ratio())
        .unwrap_or(16.0 / 9.0);
    let mut width = ui.available_width();
    let mut height = width / aspect;
    if height > MAX_VIEW_HEIGHT {
        height = MAX_VIEW_HEIGHT;
        width = height * aspect;
    }

    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, egui::Color32::from_rgb(17, 24, 39));

    let streaming = app.state.session.is_tracking && app.state.camera.is_active();
    if streaming {
        if let (Some(frame), Some(pose)) = (&app.state.last_frame, &app.state.last_pose) {
            overlay::draw_pose(&painter, rect, &pose.landmarks, frame.mirrored, &app.overlay_style);
        }
    } else {
        painter.text(
            rect.center() - egui::vec2(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            "📷 Camera not active",
            egui::FontId::proportional(22.0),
            egui::Color32::from_gray(220),
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            "Click \"Start Tracking\" to begin golf swing analysis",
            egui::FontId::proportional(14.0),
            egui::Color32::from_gray(160),
        );
    }

    if app.state.session.is_recording {
        overlay::draw_recording_indicator(&painter, rect);
    }
    if app.config.get_config().overlay.show_status {
        overlay::draw_status(&painter, rect, app.state.session.tracking.as_str());
    }
}

/// 可关闭的摄像头错误窗口，带重试
pub fn render_error_panel(app: &mut SwingApp, ctx: &egui::Context) {
    let Some(message) = app.state.session.error.clone() else {
        return;
    };

    let mut retry = false;
    let mut dismiss = false;
    egui::Window::new("Camera Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(
                egui::Color32::from_rgb(200, 100, 100),
                format!("Camera access failed: {}", message),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                retry = ui.button("Try Again").clicked();
                dismiss = ui.button("Dismiss").clicked();
            });
        });

    if retry {
        TrackingHandler::retry(app);
    } else if dismiss {
        TrackingHandler::dismiss_error(app);
    }
}
