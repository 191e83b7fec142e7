use std::time::{Duration, Instant};

use log::info;

use crate::app::app_core::SwingApp;
use crate::app::state::{PendingAnalysis, TrackingAction, TrackingState};
use crate::types::SwingRecord;

pub struct AnalysisHandler;

impl AnalysisHandler {
    /// 演示延时后生成示例挥杆，无需摄像头
    pub fn request_demo(app: &mut SwingApp, now: Instant) {
        if !app.state.session.can_request_demo() {
            return;
        }
        let delay = Duration::from_millis(app.config.get_config().analysis.demo_delay_ms);
        app.state.dispatch(TrackingAction::DemoRequested);
        app.state.pending_analysis = Some(PendingAnalysis { due: now + delay, demo: true });
        app.state.status_message = "Generating demo swing".to_string();
    }

    pub fn swing_detected(app: &mut SwingApp, record: SwingRecord, now: Instant) {
        info!(
            "Swing {} detected: {:.3}s, overall {:.1}",
            record.id, record.swing_tempo, record.metrics.overall_score
        );
        let delay = Duration::from_millis(app.config.get_config().analysis.analysis_delay_ms);

        app.state.stats.swings_detected += 1;
        app.state.swing = Some(record);
        app.state.dispatch(TrackingAction::SwingDetected);
        app.state.pending_analysis = Some(PendingAnalysis { due: now + delay, demo: false });
        app.state.status_message = "Swing captured, analyzing".to_string();
    }

    pub fn handle_pending(app: &mut SwingApp, now: Instant) {
        let Some(pending) = app.state.pending_analysis else {
            return;
        };
        if now < pending.due {
            return;
        }
        app.state.pending_analysis = None;

        if app.state.session.tracking != TrackingState::Analyzing {
            return;
        }
        if pending.demo {
            let record = app.state.demo_metrics.demo_swing();
            info!("Demo swing {} ready", record.id);
            app.state.swing = Some(record);
        }
        app.state.dispatch(TrackingAction::AnalysisFinished);
        app.state.status_message = "Analysis complete".to_string();
    }
}
