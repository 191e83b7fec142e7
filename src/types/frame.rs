use super::LandmarkFrame;

/// 摄像头源输出的一帧
///
/// 已知人体姿态的源（合成球手、关键点录制）
/// 会把姿态放在 `pretracked` 中，由姿态提供者决定如何使用
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub index: u64,
    pub timestamp_ms: f64,
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
    pub pretracked: Option<LandmarkFrame>,
}

impl VideoFrame {
    pub fn new(index: u64, timestamp_ms: f64, width: u32, height: u32) -> Self {
        Self {
            index,
            timestamp_ms,
            width,
            height,
            mirrored: false,
            pretracked: None,
        }
    }

    pub fn with_landmarks(mut self, landmarks: LandmarkFrame) -> Self {
        self.pretracked = Some(landmarks);
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 16.0 / 9.0;
        }
        self.width as f32 / self.height as f32
    }
}
