use log::{error, info};

use crate::app::app_core::SwingApp;
use crate::app::state::TrackingAction;

pub struct TrackingHandler;

impl TrackingHandler {
    /// 只尝试一次打开摄像头，失败则进入错误状态
    pub fn start_tracking(app: &mut SwingApp) {
        if !app.state.session.can_start_tracking() {
            return;
        }
        app.state.dispatch(TrackingAction::StartTracking);

        let settings = app.state.camera_settings.clone();
        match app.state.camera.start(&settings) {
            Ok(()) => {
                info!("Camera '{}' started", app.state.camera.name());
                app.state.clear_stream();
                app.state.status_message = format!(
                    "Camera started ({}, {})",
                    app.state.camera.name(),
                    settings.facing_mode.as_str()
                );
                app.state.dispatch(TrackingAction::CameraReady);
            }
            Err(e) => {
                error!("Failed to start camera '{}': {}", app.state.camera.name(), e);
                app.state.camera.stop();
                app.state.status_message = "Camera unavailable".to_string();
                app.state.dispatch(TrackingAction::CameraFailed(e.to_string()));
            }
        }
    }

    pub fn stop_tracking(app: &mut SwingApp) {
        app.state.camera.stop();
        app.state.clear_stream();
        app.state.dispatch(TrackingAction::StopTracking);
        app.state.status_message = "Tracking stopped".to_string();
    }

    pub fn toggle_tracking(app: &mut SwingApp) {
        if app.state.session.is_tracking {
            Self::stop_tracking(app);
        } else {
            Self::start_tracking(app);
        }
    }

    /// 切换前后摄像头并重启视频流
    pub fn switch_camera(app: &mut SwingApp) {
        if !app.state.session.is_tracking {
            return;
        }

        let facing_mode = app.state.camera_settings.facing_mode.toggled();
        match app.state.camera.switch(facing_mode) {
            Ok(()) => {
                info!("Switched camera to {}", facing_mode.as_str());
                app.state.camera_settings.facing_mode = facing_mode;
                app.state.clear_stream();
                app.state.status_message = format!("Camera facing {}", facing_mode.as_str());
            }
            Err(e) => {
                error!("Failed to switch camera: {}", e);
                app.state.camera.stop();
                app.state.clear_stream();
                app.state.dispatch(TrackingAction::CameraFailed(e.to_string()));
            }
        }
    }

    pub fn start_recording(app: &mut SwingApp) {
        if !app.state.session.can_start_recording() {
            return;
        }
        app.state.collector.reset();
        app.state.dispatch(TrackingAction::StartRecording);
        app.state.status_message = "Recording, take your swing".to_string();
    }

    pub fn stop_recording(app: &mut SwingApp) {
        if !app.state.session.is_recording {
            return;
        }
        app.state.collector.reset();
        app.state.dispatch(TrackingAction::StopRecording);
        app.state.status_message = "Recording stopped".to_string();
    }

    pub fn toggle_recording(app: &mut SwingApp) {
        if app.state.session.is_recording {
            Self::stop_recording(app);
        } else {
            Self::start_recording(app);
        }
    }

    pub fn dismiss_error(app: &mut SwingApp) {
        app.state.dispatch(TrackingAction::DismissError);
    }

    pub fn retry(app: &mut SwingApp) {
        Self::dismiss_error(app);
        Self::start_tracking(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::app_core::tests::{test_app, test_app_with_camera};
    use crate::app::state::TrackingState;
    use crate::camera::ReplayCamera;
    use crate::config::FacingMode;

    #[test]
    fn test_start_and_stop_tracking() {
        let mut app = test_app();
        TrackingHandler::start_tracking(&mut app);
        assert_eq!(app.state.session.tracking, TrackingState::Ready);
        assert!(app.state.camera.is_active());

        TrackingHandler::start_recording(&mut app);
        assert!(app.state.session.is_recording);

        TrackingHandler::stop_tracking(&mut app);
        assert_eq!(app.state.session.tracking, TrackingState::Idle);
        assert!(!app.state.session.is_recording);
        assert!(!app.state.camera.is_active());
    }

    #[test]
    fn test_camera_rejection_is_not_recording() {
        let camera = Box::new(ReplayCamera::new("/nonexistent/recording.jsonl", false));
        let mut app = test_app_with_camera(camera);

        TrackingHandler::start_tracking(&mut app);
        assert_eq!(app.state.session.tracking, TrackingState::Error);
        assert!(app.state.session.error.is_some());
        assert!(!app.state.session.is_tracking);

        TrackingHandler::start_recording(&mut app);
        assert!(!app.state.session.is_recording);

        // 重试同样失败，仍处于错误状态
        TrackingHandler::retry(&mut app);
        assert_eq!(app.state.session.tracking, TrackingState::Error);
    }

    #[test]
    fn test_switch_camera_toggles_facing() {
        let mut app = test_app();
        TrackingHandler::switch_camera(&mut app);
        assert_eq!(app.state.camera_settings.facing_mode, FacingMode::Environment);

        TrackingHandler::start_tracking(&mut app);
        TrackingHandler::switch_camera(&mut app);
        assert_eq!(app.state.camera_settings.facing_mode, FacingMode::User);
        assert!(app.state.camera.is_active());
        assert_eq!(app.state.session.tracking, TrackingState::Ready);
    }
}
