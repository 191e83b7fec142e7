use log::debug;

use super::{PoseError, PoseProvider};
use crate::config::DetectionConfig;
use crate::types::{LandmarkFrame, VideoFrame, LANDMARK_COUNT};

/// 直接使用视频源附带的关键点
///
/// 置信度采用先检测后跟踪的方式：
/// 超过 `min_detection_confidence` 才开始跟踪，
/// 之后只要高于 `min_tracking_confidence` 就保持跟踪
pub struct PassthroughProvider {
    min_detection_confidence: f64,
    min_tracking_confidence: f64,
    tracking: bool,
}

impl PassthroughProvider {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            min_detection_confidence: config.min_detection_confidence,
            min_tracking_confidence: config.min_tracking_confidence,
            tracking: false,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn threshold(&self) -> f64 {
        if self.tracking {
            self.min_tracking_confidence
        } else {
            self.min_detection_confidence
        }
    }
}

impl PoseProvider for PassthroughProvider {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn estimate(&mut self, frame: &VideoFrame) -> Result<Option<LandmarkFrame>, PoseError> {
        let Some(landmarks) = &frame.pretracked else {
            self.tracking = false;
            return Ok(None);
        };

        // 不完整的人体照常输出，分类器会判为 address
        if landmarks.landmarks.len() > LANDMARK_COUNT {
            return Err(PoseError::InvalidLandmarks {
                expected: LANDMARK_COUNT,
                found: landmarks.landmarks.len(),
            });
        }

        let confidence = landmarks.mean_visibility();
        if confidence < self.threshold() {
            if self.tracking {
                debug!("Lost body at frame {} (confidence {:.2})", frame.index, confidence);
            }
            self.tracking = false;
            return Ok(None);
        }

        self.tracking = true;
        Ok(Some(LandmarkFrame::new(frame.timestamp_ms, landmarks.landmarks.clone())))
    }
}
