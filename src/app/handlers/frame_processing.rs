use std::time::Instant;

use log::{debug, error, info, warn};

use crate::analysis::{classify_phase, CollectorEvent};
use crate::app::app_core::SwingApp;
use crate::app::handlers::AnalysisHandler;
use crate::pose::PoseError;
use crate::types::{LandmarkFrame, PoseResponse};

pub struct FrameHandler;

impl FrameHandler {
    /// 采集循环的一次迭代：把到期的帧交给姿态线程，
    /// 再处理已返回的结果
    pub fn handle_frames(app: &mut SwingApp, now: Instant) {
        if app.state.session.is_tracking {
            Self::submit_frame(app, now);
        }
        Self::drain_results(app, now);
    }

    fn submit_frame(app: &mut SwingApp, now: Instant) {
        let Some(frame) = app.state.camera.poll_frame(now) else {
            return;
        };
        if app.state.pose.is_busy(now) {
            // 丢弃该帧，但保持画面更新
            app.state.last_frame = Some(frame);
            return;
        }

        app.state.last_frame = Some(frame.clone());
        match app.state.pose.submit(frame, now) {
            Ok(true) => app.state.stats.frames_submitted += 1,
            Ok(false) => {}
            Err(e) => Self::worker_lost(app, e),
        }
    }

    fn drain_results(app: &mut SwingApp, now: Instant) {
        loop {
            match app.state.pose.poll() {
                Ok(Some(response)) => Self::handle_response(app, response, now),
                Ok(None) => break,
                Err(e) => {
                    Self::worker_lost(app, e);
                    break;
                }
            }
        }
    }

    fn worker_lost(app: &mut SwingApp, e: PoseError) {
        if !app.state.pose_worker_lost {
            error!("Pose worker unavailable: {}", e);
            app.state.pose_worker_lost = true;
            app.state.status_message = "Pose detection unavailable".to_string();
        }
    }

    fn handle_response(app: &mut SwingApp, response: PoseResponse, now: Instant) {
        if !app.state.session.is_tracking {
            debug!("Discarding pose result for frame {} after tracking stopped", response.frame_index);
            return;
        }

        match response.result {
            Ok(Some(landmarks)) => {
                app.state.stats.poses_received += 1;
                Self::process_landmarks(app, landmarks, now);
            }
            Ok(None) => {
                app.state.stats.empty_frames += 1;
                app.state.last_pose = None;
            }
            Err(e) => {
                app.state.stats.pose_errors += 1;
                warn!("Pose estimation failed for frame {}: {}", response.frame_index, e);
            }
        }
    }

    /// 识别挥杆阶段，录制时送入挥杆采集器
    pub fn process_landmarks(app: &mut SwingApp, landmarks: LandmarkFrame, now: Instant) {
        if !app.state.session.is_recording {
            app.state.current_phase = classify_phase(&landmarks.landmarks);
            app.state.last_pose = Some(landmarks);
            return;
        }

        let outcome = app.state.collector.process(&landmarks);
        app.state.current_phase = outcome.phase;
        app.state.last_pose = Some(landmarks);

        match outcome.event {
            Some(CollectorEvent::Started { id, .. }) => {
                app.state.status_message = format!("Swing {} started", id);
            }
            Some(CollectorEvent::Finalized(record)) => {
                AnalysisHandler::swing_detected(app, record, now);
            }
            Some(CollectorEvent::Aborted { id, frames, elapsed_ms }) => {
                info!("Swing {} discarded after {} frames / {:.0} ms", id, frames, elapsed_ms);
                app.state.stats.swings_aborted += 1;
                app.state.status_message = "Swing took too long and was discarded".to_string();
            }
            None => {}
        }
    }
}
