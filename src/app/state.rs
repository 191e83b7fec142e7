use std::fmt;
use std::time::Instant;

use crate::analysis::{CollectorLimits, MetricsSynthesizer, SwingCollector};
use crate::camera::{create_camera_source, CameraSettings, CameraSource};
use crate::config::AppConfig;
use crate::pose::PoseClient;
use crate::types::{LandmarkFrame, SwingPhase, SwingRecord, VideoFrame};

/// 跟踪会话所处的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    Idle,
    Initializing,
    Ready,
    Recording,
    Analyzing,
    Complete,
    Error,
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingState::Idle => "idle",
            TrackingState::Initializing => "initializing",
            TrackingState::Ready => "ready",
            TrackingState::Recording => "recording",
            TrackingState::Analyzing => "analyzing",
            TrackingState::Complete => "complete",
            TrackingState::Error => "error",
        }
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 控件所依赖的会话状态，只通过 `reduce` 修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub tracking: TrackingState,
    pub is_tracking: bool,
    pub is_recording: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn can_start_tracking(&self) -> bool {
        !self.is_tracking && self.tracking != TrackingState::Initializing
    }

    pub fn can_start_recording(&self) -> bool {
        self.is_tracking && !self.is_recording && self.tracking == TrackingState::Ready
    }

    pub fn can_request_demo(&self) -> bool {
        self.tracking != TrackingState::Initializing && self.tracking != TrackingState::Analyzing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingAction {
    StartTracking,
    CameraReady,
    CameraFailed(String),
    StopTracking,
    StartRecording,
    StopRecording,
    SwingDetected,
    DemoRequested,
    AnalysisFinished,
    DismissError,
}

/// 根据动作计算下一个会话状态
/// 当前状态下不适用的动作不改变状态
pub fn reduce(state: &SessionState, action: TrackingAction) -> SessionState {
    let mut next = state.clone();

    match action {
        TrackingAction::StartTracking => {
            if state.can_start_tracking() {
                next.tracking = TrackingState::Initializing;
                next.error = None;
            }
        }
        TrackingAction::CameraReady => {
            if state.tracking == TrackingState::Initializing {
                next.tracking = TrackingState::Ready;
                next.is_tracking = true;
            }
        }
        TrackingAction::CameraFailed(message) => {
            next.tracking = TrackingState::Error;
            next.is_tracking = false;
            next.is_recording = false;
            next.error = Some(message);
        }
        TrackingAction::StopTracking => {
            if state.is_tracking || state.tracking == TrackingState::Initializing {
                next.tracking = TrackingState::Idle;
                next.is_tracking = false;
                next.is_recording = false;
            }
        }
        TrackingAction::StartRecording => {
            if state.can_start_recording() {
                next.tracking = TrackingState::Recording;
                next.is_recording = true;
            }
        }
        TrackingAction::StopRecording => {
            if state.is_recording {
                next.is_recording = false;
                next.tracking = if state.is_tracking {
                    TrackingState::Ready
                } else {
                    TrackingState::Idle
                };
            }
        }
        TrackingAction::SwingDetected => {
            if state.is_recording {
                next.tracking = TrackingState::Analyzing;
            }
        }
        TrackingAction::DemoRequested => {
            if state.can_request_demo() {
                next.tracking = TrackingState::Analyzing;
                next.error = None;
            }
        }
        TrackingAction::AnalysisFinished => {
            if state.tracking == TrackingState::Analyzing {
                next.tracking = TrackingState::Complete;
            }
        }
        TrackingAction::DismissError => {
            if state.tracking == TrackingState::Error {
                next.tracking = TrackingState::Idle;
                next.error = None;
            }
        }
    }

    next
}

/// 等待延时结束的模拟分析步骤
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingAnalysis {
    pub due: Instant,
    pub demo: bool,
}

/// 底部状态栏显示的计数
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames_submitted: u64,
    pub poses_received: u64,
    pub empty_frames: u64,
    pub pose_errors: u64,
    pub swings_detected: u64,
    pub swings_aborted: u64,
}

/// UI线程持有的应用状态
pub struct AppState {
    pub session: SessionState,
    pub camera: Box<dyn CameraSource>,
    pub camera_settings: CameraSettings,
    pub pose: PoseClient,
    pub collector: SwingCollector,
    pub demo_metrics: MetricsSynthesizer,
    pub last_frame: Option<VideoFrame>,
    pub last_pose: Option<LandmarkFrame>,
    pub current_phase: SwingPhase,
    pub swing: Option<SwingRecord>,
    pub pending_analysis: Option<PendingAnalysis>,
    pub status_message: String,
    pub pose_worker_lost: bool,
    pub stats: FrameStats,
}

impl AppState {
    pub fn new(config: &AppConfig, pose: PoseClient) -> Self {
        Self::with_camera(config, pose, create_camera_source(&config.camera))
    }

    pub fn with_camera(config: &AppConfig, pose: PoseClient, camera: Box<dyn CameraSource>) -> Self {
        Self {
            session: SessionState::default(),
            camera,
            camera_settings: CameraSettings::from(&config.camera),
            pose,
            collector: SwingCollector::new(
                CollectorLimits::from(&config.collector),
                MetricsSynthesizer::from_config(&config.metrics),
            ),
            demo_metrics: MetricsSynthesizer::new(config.metrics.seed.map(|seed| seed.wrapping_add(1))),
            last_frame: None,
            last_pose: None,
            current_phase: SwingPhase::Address,
            swing: None,
            pending_analysis: None,
            status_message: String::new(),
            pose_worker_lost: false,
            stats: FrameStats::default(),
        }
    }

    /// 通过 reducer 应用动作
    pub fn dispatch(&mut self, action: TrackingAction) {
        let next = reduce(&self.session, action);
        if next.tracking != self.session.tracking {
            log::info!("Tracking state: {} -> {}", self.session.tracking, next.tracking);
        }
        self.session = next;
    }

    /// 清除与当前视频流相关的所有状态
    pub fn clear_stream(&mut self) {
        self.last_frame = None;
        self.last_pose = None;
        self.current_phase = SwingPhase::Address;
        self.collector.reset();
        self.pose.restart_stream();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: Vec<TrackingAction>) -> SessionState {
        actions
            .into_iter()
            .fold(SessionState::default(), |state, action| reduce(&state, action))
    }

    fn ready() -> SessionState {
        run(vec![TrackingAction::StartTracking, TrackingAction::CameraReady])
    }

    #[test]
    fn test_start_tracking_goes_through_initializing() {
        let state = reduce(&SessionState::default(), TrackingAction::StartTracking);
        assert_eq!(state.tracking, TrackingState::Initializing);
        assert!(!state.is_tracking);
        assert!(!state.can_start_tracking());

        let state = reduce(&state, TrackingAction::CameraReady);
        assert_eq!(state.tracking, TrackingState::Ready);
        assert!(state.is_tracking);
    }

    #[test]
    fn test_camera_rejection_lands_in_error() {
        let state = run(vec![
            TrackingAction::StartTracking,
            TrackingAction::CameraFailed("Camera permission denied".to_string()),
        ]);

        assert_eq!(state.tracking, TrackingState::Error);
        assert!(!state.is_tracking);
        assert!(!state.is_recording);
        assert_eq!(state.error.as_deref(), Some("Camera permission denied"));

        // 错误状态下不能开始录制
        let state = reduce(&state, TrackingAction::StartRecording);
        assert!(!state.is_recording);
        assert_eq!(state.tracking, TrackingState::Error);

        let state = reduce(&state, TrackingAction::DismissError);
        assert_eq!(state.tracking, TrackingState::Idle);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_retry_after_error_clears_message() {
        let state = run(vec![
            TrackingAction::StartTracking,
            TrackingAction::CameraFailed("busy".to_string()),
            TrackingAction::StartTracking,
        ]);
        assert_eq!(state.tracking, TrackingState::Initializing);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_recording_only_from_ready() {
        let idle = reduce(&SessionState::default(), TrackingAction::StartRecording);
        assert_eq!(idle, SessionState::default());

        let recording = reduce(&ready(), TrackingAction::StartRecording);
        assert_eq!(recording.tracking, TrackingState::Recording);
        assert!(recording.is_recording);
        assert!(!recording.can_start_recording());

        let stopped = reduce(&recording, TrackingAction::StopRecording);
        assert_eq!(stopped.tracking, TrackingState::Ready);
        assert!(!stopped.is_recording);
    }

    #[test]
    fn test_swing_analysis_cycle() {
        let state = run(vec![
            TrackingAction::StartTracking,
            TrackingAction::CameraReady,
            TrackingAction::StartRecording,
            TrackingAction::SwingDetected,
        ]);
        assert_eq!(state.tracking, TrackingState::Analyzing);
        assert!(state.is_recording);

        let state = reduce(&state, TrackingAction::AnalysisFinished);
        assert_eq!(state.tracking, TrackingState::Complete);

        // complete 不等于 ready，重新录制需要先停止
        assert!(!state.can_start_recording());
        let state = reduce(&state, TrackingAction::StopRecording);
        assert!(state.can_start_recording());
    }

    #[test]
    fn test_swing_ignored_when_not_recording() {
        let state = reduce(&ready(), TrackingAction::SwingDetected);
        assert_eq!(state.tracking, TrackingState::Ready);
    }

    #[test]
    fn test_stop_tracking_resets_flags() {
        let state = run(vec![
            TrackingAction::StartTracking,
            TrackingAction::CameraReady,
            TrackingAction::StartRecording,
            TrackingAction::StopTracking,
        ]);
        assert_eq!(state.tracking, TrackingState::Idle);
        assert!(!state.is_tracking);
        assert!(!state.is_recording);
    }

    #[test]
    fn test_demo_without_camera() {
        let state = reduce(&SessionState::default(), TrackingAction::DemoRequested);
        assert_eq!(state.tracking, TrackingState::Analyzing);
        assert!(!state.is_tracking);

        // 分析中重复请求会被忽略
        assert_eq!(reduce(&state, TrackingAction::DemoRequested), state);

        let state = reduce(&state, TrackingAction::AnalysisFinished);
        assert_eq!(state.tracking, TrackingState::Complete);

        let initializing = reduce(&SessionState::default(), TrackingAction::StartTracking);
        assert_eq!(reduce(&initializing, TrackingAction::DemoRequested), initializing);
    }

    #[test]
    fn test_stale_analysis_finish_is_ignored() {
        let state = reduce(&ready(), TrackingAction::AnalysisFinished);
        assert_eq!(state.tracking, TrackingState::Ready);
    }
}
