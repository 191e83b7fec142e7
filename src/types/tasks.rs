use super::{LandmarkFrame, VideoFrame};
use crate::pose::PoseError;

/// 发送给姿态工作线程的请求
#[derive(Clone, Debug)]
pub enum PoseTask {
    /// `generation` 标识该帧所属的摄像头流
    Detect { frame: VideoFrame, generation: u64 },
    Shutdown,
}

/// 对一次 `PoseTask::Detect` 的应答
#[derive(Debug)]
pub struct PoseResponse {
    pub generation: u64,
    pub frame_index: u64,
    pub timestamp_ms: f64,
    pub result: Result<Option<LandmarkFrame>, PoseError>,
}

impl PoseResponse {
    pub fn detected(generation: u64, frame_index: u64, timestamp_ms: f64, landmarks: Option<LandmarkFrame>) -> Self {
        Self {
            generation,
            frame_index,
            timestamp_ms,
            result: Ok(landmarks),
        }
    }

    pub fn failed(generation: u64, frame_index: u64, timestamp_ms: f64, error: PoseError) -> Self {
        Self {
            generation,
            frame_index,
            timestamp_ms,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
