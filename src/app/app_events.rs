use std::time::Instant;

use eframe::egui;
use log::{info, warn};

use super::app_core::SwingApp;
use super::handlers::{AnalysisHandler, TrackingHandler};

impl SwingApp {
    /// 与控制面板按钮对应的快捷键
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context, now: Instant) {
        let (space, track, demo, switch, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::T),
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::C),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if space && self.state.session.is_tracking {
            TrackingHandler::toggle_recording(self);
        }
        if track {
            TrackingHandler::toggle_tracking(self);
        }
        if demo {
            AnalysisHandler::request_demo(self, now);
        }
        if switch {
            TrackingHandler::switch_camera(self);
        }
        if escape {
            TrackingHandler::dismiss_error(self);
        }
    }

    /// 保存当前摄像头朝向
    pub fn save_settings(&mut self) {
        self.config.get_config_mut().camera.facing_mode = self.state.camera_settings.facing_mode;

        match self.config.save() {
            Ok(()) => {
                info!("Settings saved");
                self.state.status_message = "Settings saved".to_string();
            }
            Err(e) => {
                warn!("Failed to save settings: {}", e);
                self.state.status_message = format!("Failed to save settings: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::app_core::tests::detached_client;
    use crate::camera::SyntheticCamera;
    use crate::config::{ConfigManager, FacingMode};

    #[test]
    fn test_save_settings_writes_configured_file() {
        let dir = std::env::temp_dir().join(format!("swinghub_settings_{}", std::process::id()));
        let path = dir.join("custom.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let config = ConfigManager::load_or_default(&path);
        let mut app = SwingApp::with_camera(config, detached_client(), Box::new(SyntheticCamera::new()));
        TrackingHandler::start_tracking(&mut app);
        TrackingHandler::switch_camera(&mut app);
        app.save_settings();

        assert_eq!(app.state.status_message, "Settings saved");
        let saved = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(saved.get_config().camera.facing_mode, FacingMode::User);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_settings_without_file_reports_failure() {
        let mut app = crate::app::app_core::tests::test_app();
        app.save_settings();
        assert!(app.state.status_message.starts_with("Failed to save settings"));
    }
}
