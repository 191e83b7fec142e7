//! 代替实时摄像头的帧源

pub mod replay;
pub mod synthetic;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{CameraConfig, FacingMode};
use crate::types::VideoFrame;

pub use replay::ReplayCamera;
pub use synthetic::SyntheticCamera;

/// 启动视频源时请求的参数
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub facing_mode: FacingMode,
}

impl CameraSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1.0))
    }

    pub fn validate(&self) -> Result<(), CameraError> {
        if self.width == 0 || self.height == 0 {
            return Err(CameraError::UnsupportedConstraints(format!(
                "resolution {}x{}",
                self.width, self.height
            )));
        }
        if !(self.frame_rate > 0.0) || self.frame_rate > MAX_FRAME_RATE {
            return Err(CameraError::UnsupportedConstraints(format!(
                "frame rate {}",
                self.frame_rate
            )));
        }
        Ok(())
    }

    /// 前置摄像头画面镜像显示
    pub fn mirrored(&self) -> bool {
        self.facing_mode == FacingMode::User
    }
}

const MAX_FRAME_RATE: f64 = 240.0;

impl Default for CameraSettings {
    fn default() -> Self {
        Self::from(&CameraConfig::default())
    }
}

impl From<&CameraConfig> for CameraSettings {
    fn from(config: &CameraConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            frame_rate: config.frame_rate,
            facing_mode: config.facing_mode,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("Camera device unavailable: {0}")]
    Unavailable(String),
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("Unsupported camera constraints: {0}")]
    UnsupportedConstraints(String),
    #[error("Malformed recording {path} at line {line}: {reason}")]
    MalformedRecording {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("Camera is not started")]
    NotStarted,
}

/// 启动后持续产生视频帧的源
pub trait CameraSource {
    fn name(&self) -> &str;

    /// 打开视频流，只尝试一次，是否重试由调用方决定
    fn start(&mut self, settings: &CameraSettings) -> Result<(), CameraError>;

    /// 释放视频流，未启动时无操作
    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// 当前视频流的参数
    fn settings(&self) -> Option<&CameraSettings>;

    /// 返回 `now` 时刻到期的帧
    fn poll_frame(&mut self, now: Instant) -> Option<VideoFrame>;

    /// 以另一朝向重启视频流
    fn switch(&mut self, facing_mode: FacingMode) -> Result<(), CameraError> {
        let mut settings = self.settings().cloned().ok_or(CameraError::NotStarted)?;
        settings.facing_mode = facing_mode;
        self.stop();
        self.start(&settings)
    }
}

/// 根据摄像头配置创建视频源
///
/// `synthetic` 使用内置合成球手，
/// 其他值视为关键点录制文件路径
pub fn create_camera_source(config: &CameraConfig) -> Box<dyn CameraSource> {
    if config.source.eq_ignore_ascii_case("synthetic") {
        return Box::new(SyntheticCamera::new());
    }

    Box::new(ReplayCamera::new(&config.source, config.loop_playback))
}
