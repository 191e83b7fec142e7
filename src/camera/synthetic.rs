use std::time::Instant;

use log::info;

use super::{CameraError, CameraSettings, CameraSource};
use crate::types::landmark::{
    LANDMARK_COUNT, LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST,
    RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::types::{Landmark, LandmarkFrame, VideoFrame};

/// 一次脚本挥杆的时长，从准备到准备
pub const SWING_CYCLE_MS: f64 = 4000.0;

const SHOULDER_Y: f64 = 0.42;
const SHOULDER_WIDTH: f64 = 0.2;
const BODY_VISIBILITY: f64 = 0.9;

/// （周期内时间，手腕相对肩部的偏移，手腕间距 / 肩宽）
const KEYFRAMES: [(f64, f64, f64); 10] = [
    (0.0, 0.0, 0.5),
    (800.0, 0.0, 0.5),
    (1100.0, 0.2, 0.8),
    (1500.0, 0.25, 2.0),
    (1800.0, 0.25, 2.0),
    (2000.0, -0.2, 0.8),
    (2200.0, -0.4, 0.8),
    (2800.0, -0.4, 0.8),
    (3400.0, 0.0, 0.5),
    (SWING_CYCLE_MS, 0.0, 0.5),
];

/// 循环挥杆的合成球手
///
/// 每帧都附带关键点，
/// 下游处理如同检测器真的检测到了人体
pub struct SyntheticCamera {
    settings: Option<CameraSettings>,
    started_at: Option<Instant>,
    next_due: Option<Instant>,
    frame_index: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            settings: None,
            started_at: None,
            next_due: None,
            frame_index: 0,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for SyntheticCamera {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn start(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        settings.validate()?;

        let now = Instant::now();
        self.settings = Some(settings.clone());
        self.started_at = Some(now);
        self.next_due = Some(now);
        self.frame_index = 0;

        info!(
            "Synthetic camera started: {}x{} @ {} fps, facing {}",
            settings.width,
            settings.height,
            settings.frame_rate,
            settings.facing_mode.as_str()
        );
        Ok(())
    }

    fn stop(&mut self) {
        if self.settings.take().is_some() {
            info!("Synthetic camera stopped after {} frames", self.frame_index);
        }
        self.started_at = None;
        self.next_due = None;
    }

    fn is_active(&self) -> bool {
        self.settings.is_some()
    }

    fn settings(&self) -> Option<&CameraSettings> {
        self.settings.as_ref()
    }

    fn poll_frame(&mut self, now: Instant) -> Option<VideoFrame> {
        let settings = self.settings.as_ref()?;
        let started_at = self.started_at?;
        if let Some(due) = self.next_due {
            if now < due {
                return None;
            }
        }

        let elapsed_ms = now.saturating_duration_since(started_at).as_secs_f64() * 1000.0;
        let landmarks = golfer_pose(elapsed_ms % SWING_CYCLE_MS);

        let mut frame = VideoFrame::new(self.frame_index, elapsed_ms, settings.width, settings.height);
        frame.mirrored = settings.mirrored();
        let frame = frame.with_landmarks(LandmarkFrame::new(elapsed_ms, landmarks));

        self.frame_index += 1;
        self.next_due = Some(now + settings.frame_interval());

        Some(frame)
    }
}

/// 线性插值得到周期内某时刻的手腕偏移和间距比
fn swing_shape(cycle_ms: f64) -> (f64, f64) {
    let t = cycle_ms.clamp(0.0, SWING_CYCLE_MS);
    for pair in KEYFRAMES.windows(2) {
        let (t0, offset0, spread0) = pair[0];
        let (t1, offset1, spread1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            let f = if span > 0.0 { (t - t0) / span } else { 1.0 };
            return (offset0 + (offset1 - offset0) * f, spread0 + (spread1 - spread0) * f);
        }
    }
    (0.0, 0.5)
}

/// 合成球手完整的33个关键点
pub fn golfer_pose(cycle_ms: f64) -> Vec<Landmark> {
    let (offset, spread_ratio) = swing_shape(cycle_ms);
    let point = |x: f64, y: f64| Landmark::new(x, y, 0.0, BODY_VISIBILITY);

    let mut landmarks = vec![point(0.5, 0.5); LANDMARK_COUNT];

    // 面部
    landmarks[0] = point(0.5, 0.27);
    for (i, dx) in [(1, -0.015), (2, -0.02), (3, -0.025), (4, 0.015), (5, 0.02), (6, 0.025)] {
        landmarks[i] = point(0.5 + dx, 0.25);
    }
    landmarks[7] = point(0.47, 0.26);
    landmarks[8] = point(0.53, 0.26);
    landmarks[9] = point(0.49, 0.29);
    landmarks[10] = point(0.51, 0.29);

    let left_shoulder = point(0.5 - SHOULDER_WIDTH / 2.0, SHOULDER_Y);
    let right_shoulder = point(0.5 + SHOULDER_WIDTH / 2.0, SHOULDER_Y);
    let half_spread = spread_ratio * SHOULDER_WIDTH / 2.0;
    let left_wrist = point(0.5 - half_spread, SHOULDER_Y + offset);
    let right_wrist = point(0.5 + half_spread, SHOULDER_Y + offset);

    landmarks[LEFT_SHOULDER] = left_shoulder;
    landmarks[RIGHT_SHOULDER] = right_shoulder;
    landmarks[LEFT_ELBOW] = midpoint(&left_shoulder, &left_wrist);
    landmarks[RIGHT_ELBOW] = midpoint(&right_shoulder, &right_wrist);
    landmarks[LEFT_WRIST] = left_wrist;
    landmarks[RIGHT_WRIST] = right_wrist;

    // 小指、食指、拇指位于手腕附近
    for (i, dy) in [(17, 0.02), (19, 0.025), (21, 0.015)] {
        landmarks[i] = point(left_wrist.x, left_wrist.y + dy);
        landmarks[i + 1] = point(right_wrist.x, right_wrist.y + dy);
    }

    landmarks[LEFT_HIP] = point(0.45, 0.62);
    landmarks[RIGHT_HIP] = point(0.55, 0.62);
    landmarks[LEFT_KNEE] = point(0.44, 0.77);
    landmarks[RIGHT_KNEE] = point(0.56, 0.77);
    landmarks[LEFT_ANKLE] = point(0.43, 0.92);
    landmarks[RIGHT_ANKLE] = point(0.57, 0.92);
    landmarks[29] = point(0.42, 0.94);
    landmarks[30] = point(0.58, 0.94);
    landmarks[31] = point(0.45, 0.95);
    landmarks[32] = point(0.55, 0.95);

    landmarks
}

fn midpoint(a: &Landmark, b: &Landmark) -> Landmark {
    Landmark::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, 0.0, BODY_VISIBILITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::analysis::{classify_phase, CollectorEvent, CollectorLimits, MetricsSynthesizer, SwingCollector};
    use crate::config::FacingMode;
    use crate::types::SwingPhase;

    #[test]
    fn test_keyframes_hit_each_phase() {
        assert_eq!(classify_phase(&golfer_pose(400.0)), SwingPhase::Address);
        assert_eq!(classify_phase(&golfer_pose(1100.0)), SwingPhase::Takeaway);
        assert_eq!(classify_phase(&golfer_pose(1600.0)), SwingPhase::Backswing);
        assert_eq!(classify_phase(&golfer_pose(2000.0)), SwingPhase::Downswing);
        assert_eq!(classify_phase(&golfer_pose(2500.0)), SwingPhase::FollowThrough);
        assert_eq!(classify_phase(&golfer_pose(3800.0)), SwingPhase::Address);
    }

    #[test]
    fn test_pose_is_complete() {
        for t in [0.0, 1234.0, 1600.0, 2500.0] {
            let pose = golfer_pose(t);
            assert_eq!(pose.len(), LANDMARK_COUNT);
            assert!(pose.iter().all(|l| !l.is_missing()));
            assert!(pose.iter().all(|l| (0.0..=1.0).contains(&l.x) && (0.0..=1.0).contains(&l.y)));
        }
    }

    #[test]
    fn test_one_cycle_yields_one_swing() {
        let mut collector = SwingCollector::new(CollectorLimits::default(), MetricsSynthesizer::seeded(3));
        let mut finalized = 0;

        let mut t = 0.0;
        while t < SWING_CYCLE_MS {
            let frame = LandmarkFrame::new(t, golfer_pose(t));
            if let Some(CollectorEvent::Finalized(record)) = collector.process(&frame).event {
                finalized += 1;
                assert!(record.swing_tempo > 0.5 && record.swing_tempo < 1.5);
            }
            t += 1000.0 / 30.0;
        }

        assert_eq!(finalized, 1);
        assert!(!collector.is_collecting());
    }

    #[test]
    fn test_frames_are_paced() {
        let mut camera = SyntheticCamera::new();
        let start = Instant::now();
        assert!(camera.poll_frame(start).is_none());

        camera.start(&CameraSettings::default()).unwrap();
        let now = Instant::now();
        let first = camera.poll_frame(now).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!((first.width, first.height), (1280, 720));
        assert!(first.pretracked.is_some());

        assert!(camera.poll_frame(now).is_none());

        let later = now + Duration::from_millis(40);
        let second = camera.poll_frame(later).unwrap();
        assert_eq!(second.index, 1);
        assert!(second.timestamp_ms > first.timestamp_ms);

        camera.stop();
        assert!(!camera.is_active());
        assert!(camera.poll_frame(later + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_user_facing_frames_are_mirrored() {
        let mut camera = SyntheticCamera::new();
        let settings = CameraSettings {
            facing_mode: FacingMode::User,
            ..CameraSettings::default()
        };
        camera.start(&settings).unwrap();
        let frame = camera.poll_frame(Instant::now()).unwrap();
        assert!(frame.mirrored);
    }

    #[test]
    fn test_rejects_unsupported_settings() {
        let mut camera = SyntheticCamera::new();
        let settings = CameraSettings {
            frame_rate: 0.0,
            ..CameraSettings::default()
        };
        assert!(camera.start(&settings).is_err());
        assert!(!camera.is_active());
    }
}
