//! 姿态估计接口：输入一帧，输出零或一组关键点

pub mod overlay;
pub mod passthrough;
pub mod worker;

use crate::types::{LandmarkFrame, VideoFrame};

pub use passthrough::PassthroughProvider;
pub use worker::{run_pose_worker, spawn_pose_worker, PoseClient};

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Expected {expected} landmarks, got {found}")]
    InvalidLandmarks { expected: usize, found: usize },
    #[error("Pose worker disconnected")]
    Disconnected,
}

/// 能从视频帧得到人体关键点的提供者
///
/// `Ok(None)` 表示画面中没有检测到人体
pub trait PoseProvider: Send {
    fn name(&self) -> &str;

    fn estimate(&mut self, frame: &VideoFrame) -> Result<Option<LandmarkFrame>, PoseError>;
}
