use std::time::{Duration, Instant};

use eframe::{egui, Frame};
use log::info;

use super::handlers::{AnalysisHandler, FrameHandler};
use super::state::AppState;
use crate::camera::{create_camera_source, CameraSource};
use crate::config::ConfigManager;
use crate::plotter::SwingCharts;
use crate::pose::overlay::OverlayStyle;
use crate::pose::PoseClient;

const IDLE_REPAINT: Duration = Duration::from_millis(150);
const PENDING_REPAINT: Duration = Duration::from_millis(50);

pub struct SwingApp {
    pub state: AppState,
    pub config: ConfigManager,
    pub charts: SwingCharts,
    pub overlay_style: OverlayStyle,
}

impl SwingApp {
    pub fn new(config: ConfigManager, pose: PoseClient) -> Self {
        let camera = create_camera_source(&config.get_config().camera);
        Self::with_camera(config, pose, camera)
    }

    pub fn with_camera(config: ConfigManager, pose: PoseClient, camera: Box<dyn CameraSource>) -> Self {
        let app_config = config.get_config();
        info!(
            "Camera source: {} ({}x{} @ {} fps)",
            camera.name(),
            app_config.camera.width,
            app_config.camera.height,
            app_config.camera.frame_rate
        );

        let state = AppState::with_camera(app_config, pose, camera);
        let charts = SwingCharts::new(&app_config.overlay);
        let overlay_style = OverlayStyle::from(&app_config.overlay);

        Self {
            state,
            config,
            charts,
            overlay_style,
        }
    }

    fn repaint_interval(&self) -> Duration {
        if self.state.session.is_tracking {
            self.state.camera_settings.frame_interval() / 2
        } else if self.state.pending_analysis.is_some() {
            PENDING_REPAINT
        } else {
            IDLE_REPAINT
        }
    }
}

impl eframe::App for SwingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(egui::Visuals::light());

        let now = Instant::now();
        self.handle_keyboard_input(ctx, now);
        FrameHandler::handle_frames(self, now);
        AnalysisHandler::handle_pending(self, now);

        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_bottom_status_bar(self, ctx);
        crate::app::ui::render_control_panel(self, ctx);
        crate::app::ui::render_metrics_panel(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);
        crate::app::ui::render_error_panel(self, ctx);

        ctx.request_repaint_after(self.repaint_interval());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread::JoinHandle;

    use crossbeam_channel::bounded;

    use super::*;
    use crate::camera::SyntheticCamera;
    use crate::config::AppConfig;
    use crate::pose::{spawn_pose_worker, PassthroughProvider};

    pub(crate) fn test_config() -> ConfigManager {
        let mut config = AppConfig::default();
        config.metrics.seed = Some(7);
        ConfigManager::with_config(config)
    }

    /// 工作线程永不应答的客户端
    pub(crate) fn detached_client() -> PoseClient {
        let (task_sender, _) = bounded(1);
        let (_, response_receiver) = bounded(1);
        PoseClient::new(task_sender, response_receiver)
    }

    pub(crate) fn test_app() -> SwingApp {
        test_app_with_camera(Box::new(SyntheticCamera::new()))
    }

    pub(crate) fn test_app_with_camera(camera: Box<dyn CameraSource>) -> SwingApp {
        SwingApp::with_camera(test_config(), detached_client(), camera)
    }

    pub(crate) fn test_app_with_client(client: PoseClient) -> SwingApp {
        SwingApp::with_camera(test_config(), client, Box::new(SyntheticCamera::new()))
    }

    pub(crate) fn test_app_with_worker() -> (SwingApp, Arc<AtomicBool>, JoinHandle<()>) {
        let config = test_config();
        let shutdown = Arc::new(AtomicBool::new(false));
        let provider = Box::new(PassthroughProvider::new(&config.get_config().detection));
        let (client, handle) =
            spawn_pose_worker(provider, &config.get_config().channels, Arc::clone(&shutdown)).unwrap();
        let app = SwingApp::with_camera(config, client, Box::new(SyntheticCamera::new()));
        (app, shutdown, handle)
    }

    #[test]
    fn test_new_app_is_idle() {
        let app = test_app();
        assert_eq!(app.state.session, crate::app::state::SessionState::default());
        assert!(app.state.swing.is_none());
        assert_eq!(app.repaint_interval(), IDLE_REPAINT);
    }

    #[test]
    fn test_repaint_follows_frame_rate_while_tracking() {
        let mut app = test_app();
        crate::app::handlers::TrackingHandler::start_tracking(&mut app);
        assert!(app.repaint_interval() < Duration::from_millis(20));
    }
}
